//! Job search: remote listings API with mock templates as fallback

pub mod client;
pub mod templates;

pub use client::{JobSearchResults, JobService};

use serde::{Deserialize, Deserializer, Serialize};

/// Search criteria sent to the listings API
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobSearchParams {
    pub field: String,
    pub location: Option<String>,
    pub salary_min: Option<f64>,
    pub job_type: Option<String>,
    pub experience: Option<String>,
}

impl JobSearchParams {
    pub fn for_field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Default::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_salary_min(mut self, salary_min: f64) -> Self {
        self.salary_min = Some(salary_min);
        self
    }
}

/// A raw listing, as returned by the API or built from a mock template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobListing {
    #[serde(deserialize_with = "optional_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(alias = "jobTitle")]
    pub title: Option<String>,
    #[serde(alias = "companyName")]
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(alias = "salaryMin")]
    pub salary_min: Option<f64>,
    #[serde(alias = "salaryMax")]
    pub salary_max: Option<f64>,
    #[serde(alias = "jobType")]
    pub job_type: Option<String>,
    #[serde(alias = "jobDescription")]
    pub description: Option<String>,
    #[serde(alias = "requiredSkills")]
    pub required_skills: Option<Vec<String>>,
    #[serde(alias = "postedDate")]
    pub posted_date: Option<String>,
    #[serde(alias = "applicationUrl", alias = "applyUrl")]
    pub apply_url: Option<String>,
    #[serde(alias = "experienceLevel")]
    pub experience_level: Option<String>,
    #[serde(alias = "relevanceExplanation")]
    pub relevance_explanation: Option<String>,
}

fn optional_id<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(text) => text,
        RawId::Number(n) => n.to_string(),
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryBand {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRanges {
    pub entry: SalaryBand,
    pub mid: SalaryBand,
    pub senior: SalaryBand,
    pub lead: SalaryBand,
}

/// Hourly market bands for a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryData {
    pub field: String,
    pub location: String,
    pub salary_ranges: SalaryRanges,
    pub market_average: f64,
    pub demand_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_accepts_camel_case_aliases() {
        let json = r#"{"id": 42, "jobTitle": "Rust Engineer", "companyName": "Ferrous",
                       "salaryMin": 90, "requiredSkills": ["Rust"], "applyUrl": "https://jobs.example/42"}"#;
        let listing: JobListing = serde_json::from_str(json).unwrap();

        assert_eq!(listing.id.as_deref(), Some("42"));
        assert_eq!(listing.title.as_deref(), Some("Rust Engineer"));
        assert_eq!(listing.company.as_deref(), Some("Ferrous"));
        assert_eq!(listing.salary_min, Some(90.0));
        assert_eq!(listing.apply_url.as_deref(), Some("https://jobs.example/42"));
        assert!(listing.location.is_none());
    }

    #[test]
    fn test_params_builder() {
        let params = JobSearchParams::for_field("Data Analyst")
            .with_location("remote")
            .with_salary_min(70.0);
        assert_eq!(params.location.as_deref(), Some("remote"));
        assert_eq!(params.salary_min, Some(70.0));
        assert!(params.job_type.is_none());
    }
}
