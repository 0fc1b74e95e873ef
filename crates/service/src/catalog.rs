//! The static set of job listings every recommendation call returns.

use models::{JobListing, JobType};
use once_cell::sync::Lazy;

pub const APPLICATION_SUBMITTED: &str = "Your application has been submitted successfully!";

#[allow(clippy::too_many_arguments)]
fn listing(
    id: &str,
    title: &str,
    company: &str,
    location: &str,
    salary: &str,
    match_score: u8,
    description: &str,
    requirements: &[&str],
    posted_at: &str,
    job_type: JobType,
) -> JobListing {
    JobListing {
        id: id.into(),
        title: title.into(),
        company: company.into(),
        location: location.into(),
        salary: salary.into(),
        match_score,
        description: description.into(),
        requirements: requirements.iter().map(|r| r.to_string()).collect(),
        posted_at: posted_at.into(),
        job_type,
    }
}

static JOBS: Lazy<Vec<JobListing>> = Lazy::new(|| {
    vec![
        listing(
            "1",
            "Senior Software Engineer",
            "TechCorp Inc.",
            "San Francisco, CA",
            "$150,000 - $200,000",
            92,
            "Join our innovative team to build next-generation cloud solutions.",
            &["5+ years experience", "React/TypeScript", "Cloud platforms"],
            "2 days ago",
            JobType::FullTime,
        ),
        listing(
            "2",
            "Full Stack Developer",
            "StartupXYZ",
            "Remote",
            "$120,000 - $160,000",
            88,
            "Build and scale our core product with modern technologies.",
            &["3+ years experience", "Node.js", "React", "PostgreSQL"],
            "1 week ago",
            JobType::Remote,
        ),
        listing(
            "3",
            "Frontend Engineer",
            "DesignStudio",
            "New York, NY",
            "$110,000 - $140,000",
            85,
            "Create beautiful, responsive user interfaces for our clients.",
            &["2+ years experience", "React", "CSS/Tailwind", "Figma"],
            "3 days ago",
            JobType::FullTime,
        ),
        listing(
            "4",
            "Backend Developer",
            "DataFlow Systems",
            "Austin, TX",
            "$130,000 - $170,000",
            79,
            "Design and implement robust backend services and APIs.",
            &["4+ years experience", "Python/Django", "REST APIs", "AWS"],
            "5 days ago",
            JobType::FullTime,
        ),
        listing(
            "5",
            "DevOps Engineer",
            "CloudNative Co",
            "Seattle, WA",
            "$140,000 - $180,000",
            74,
            "Manage and improve our cloud infrastructure and CI/CD pipelines.",
            &["3+ years experience", "Kubernetes", "Terraform", "AWS/GCP"],
            "1 day ago",
            JobType::Contract,
        ),
    ]
});

/// All listings, in catalog order.
pub fn jobs() -> &'static [JobListing] {
    &JOBS
}

pub fn find_job(id: &str) -> Option<&'static JobListing> {
    JOBS.iter().find(|j| j.id == id)
}
