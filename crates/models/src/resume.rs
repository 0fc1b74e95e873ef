use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-category breakdown of a resume score, each value in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryScores {
    pub formatting: u8,
    pub keywords: u8,
    pub experience: u8,
    pub education: u8,
    pub skills: u8,
}

impl CategoryScores {
    /// `(name, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u8)> {
        [
            ("formatting", self.formatting),
            ("keywords", self.keywords),
            ("experience", self.experience),
            ("education", self.education),
            ("skills", self.skills),
        ]
        .into_iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResumeScore {
    pub overall: u8,
    pub categories: CategoryScores,
    pub suggestions: Vec<String>,
}

const ACCEPTED_EXTENSIONS: [&str; 3] = [".pdf", ".doc", ".docx"];

/// An uploaded resume blob. Content is carried but never inspected by the
/// backends.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: impl Into<Bytes>) -> Self {
        Self { file_name: file_name.into(), content_type, bytes: bytes.into() }
    }

    /// Guess a MIME type from the file extension.
    pub fn guess_content_type(file_name: &str) -> Option<&'static str> {
        let lower = file_name.to_ascii_lowercase();
        if lower.ends_with(".pdf") {
            Some("application/pdf")
        } else if lower.ends_with(".docx") {
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        } else if lower.ends_with(".doc") {
            Some("application/msword")
        } else {
            None
        }
    }

    /// Upload prefilter applied by callers before handing a file to a
    /// backend: PDF, anything whose MIME type mentions `document`, or a
    /// `.pdf`/`.doc`/`.docx` name when no type is known.
    pub fn has_accepted_type(&self) -> bool {
        match self.content_type.as_deref() {
            Some(ct) if !ct.is_empty() => ct == "application/pdf" || ct.contains("document"),
            _ => {
                let lower = self.file_name.to_ascii_lowercase();
                ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_types() {
        let pdf = ResumeFile::new("cv.pdf", Some("application/pdf".into()), "x");
        assert!(pdf.has_accepted_type());

        let docx = ResumeFile::new(
            "cv.docx",
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document".into()),
            "x",
        );
        assert!(docx.has_accepted_type());

        let png = ResumeFile::new("cv.png", Some("image/png".into()), "x");
        assert!(!png.has_accepted_type());

        // no MIME type: fall back to the extension
        assert!(ResumeFile::new("CV.DOC", None, "x").has_accepted_type());
        assert!(!ResumeFile::new("cv.txt", None, "x").has_accepted_type());
    }

    #[test]
    fn content_type_guess() {
        assert_eq!(ResumeFile::guess_content_type("a.PDF"), Some("application/pdf"));
        assert_eq!(ResumeFile::guess_content_type("a.doc"), Some("application/msword"));
        assert_eq!(ResumeFile::guess_content_type("a.txt"), None);
    }

    #[test]
    fn category_iteration_order() {
        let c = CategoryScores { formatting: 1, keywords: 2, experience: 3, education: 4, skills: 5 };
        let names: Vec<_> = c.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["formatting", "keywords", "experience", "education", "skills"]);
        assert_eq!(c.iter().map(|(_, v)| v as u32).sum::<u32>(), 15);
    }
}
