//! Synthetic resume scoring. The uploaded content plays no part in the
//! result; every value is an independent draw from the random source.

use models::{CategoryScores, ResumeScore};

use crate::random::RandomSource;

pub const SUGGESTIONS: [&str; 5] = [
    "Add more industry-specific keywords to improve ATS compatibility",
    "Consider adding quantifiable achievements (e.g., \"Increased sales by 25%\")",
    "Include a professional summary at the top of your resume",
    "Add more technical skills relevant to your target positions",
    "Consider reformatting to use bullet points for better readability",
];

/// `(base, span)` of each draw: value = round(base + r * span).
const OVERALL: (f64, f64) = (65.0, 25.0);
const FORMATTING: (f64, f64) = (60.0, 35.0);
const KEYWORDS: (f64, f64) = (55.0, 40.0);
const EXPERIENCE: (f64, f64) = (50.0, 45.0);
const EDUCATION: (f64, f64) = (70.0, 25.0);
const SKILLS: (f64, f64) = (60.0, 35.0);

fn draw(rng: &dyn RandomSource, (base, span): (f64, f64)) -> u8 {
    (base + rng.next_unit() * span).round().clamp(0.0, 100.0) as u8
}

pub fn score_resume(rng: &dyn RandomSource) -> ResumeScore {
    let overall = draw(rng, OVERALL);
    let categories = CategoryScores {
        formatting: draw(rng, FORMATTING),
        keywords: draw(rng, KEYWORDS),
        experience: draw(rng, EXPERIENCE),
        education: draw(rng, EDUCATION),
        skills: draw(rng, SKILLS),
    };
    ResumeScore {
        overall,
        categories,
        suggestions: SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FixedRandom, SeededRandom};

    #[test]
    fn lowest_draw_gives_range_floors() {
        let score = score_resume(&FixedRandom::new(0.0));
        assert_eq!(score.overall, 65);
        assert_eq!(
            score.categories,
            CategoryScores { formatting: 60, keywords: 55, experience: 50, education: 70, skills: 60 }
        );
        assert_eq!(score.suggestions.len(), SUGGESTIONS.len());
        assert_eq!(score.suggestions[2], "Include a professional summary at the top of your resume");
    }

    #[test]
    fn midpoint_draw_rounds_half_up() {
        let score = score_resume(&FixedRandom::new(0.5));
        // 65 + 12.5
        assert_eq!(score.overall, 78);
        assert_eq!(score.categories.formatting, 78); // 60 + 17.5
        assert_eq!(score.categories.keywords, 75); // 55 + 20
        assert_eq!(score.categories.experience, 73); // 50 + 22.5
        assert_eq!(score.categories.education, 83); // 70 + 12.5
        assert_eq!(score.categories.skills, 78);
    }

    #[test]
    fn highest_draw_stays_within_ceilings() {
        let score = score_resume(&FixedRandom::new(1.0));
        assert_eq!(score.overall, 90);
        assert_eq!(score.categories.experience, 95);
        assert_eq!(score.categories.education, 95);
    }

    #[test]
    fn random_draws_stay_in_bounds() {
        let rng = SeededRandom::from_seed(2024);
        for _ in 0..500 {
            let score = score_resume(&rng);
            assert!((65..=90).contains(&score.overall));
            assert!(score.categories.iter().all(|(_, v)| v <= 100));
            assert!(!score.suggestions.is_empty());
        }
    }
}
