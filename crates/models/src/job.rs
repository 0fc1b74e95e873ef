use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Remote,
}

impl JobType {
    pub const ALL: [JobType; 4] = [JobType::FullTime, JobType::PartTime, JobType::Contract, JobType::Remote];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Remote => "Remote",
        }
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub match_score: u8,
    pub description: String,
    pub requirements: Vec<String>,
    pub posted_at: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
}

/// Outcome of applying to a job. Nothing is recorded server side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApplicationResult {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_type_wire_names() {
        for t in JobType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
        let parsed: JobType = serde_json::from_str("\"Part-time\"").unwrap();
        assert_eq!(parsed, JobType::PartTime);
        assert!(serde_json::from_str::<JobType>("\"Internship\"").is_err());
    }

    #[test]
    fn listing_serializes_type_and_camel_case() {
        let job = JobListing {
            id: "9".into(),
            title: "t".into(),
            company: "c".into(),
            location: "l".into(),
            salary: "s".into(),
            match_score: 50,
            description: "d".into(),
            requirements: vec!["r".into()],
            posted_at: "today".into(),
            job_type: JobType::Remote,
        };
        let v = serde_json::to_value(&job).unwrap();
        assert_eq!(v["type"], "Remote");
        assert_eq!(v["matchScore"], 50);
        assert_eq!(v["postedAt"], "today");
    }
}
