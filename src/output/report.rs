//! The career report: everything one analysis run produced, ready for formatting

use crate::error::{NovaError, Result};
use crate::input::ExtractedResume;
use crate::processing::analyzer::{CareerAnalysis, DataSource};
use crate::processing::data_science::DataScienceAnalysis;
use crate::processing::position::PositionAnalysis;
use crate::processing::ranking::JobMatch;
use crate::processing::resume_analyzer::ResumeAnalysis;
use crate::processing::roadmap::RoadmapData;
use crate::session::UserProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerReport {
    pub profile: UserProfile,
    pub resume: ResumeSummary,
    pub analysis: ResumeAnalysis,
    pub analysis_source: DataSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_science: Option<DataScienceAnalysis>,
    pub position: PositionAnalysis,
    pub roadmap: RoadmapData,
    pub roadmap_source: DataSource,
    pub job_matches: Vec<JobMatch>,
    pub jobs_source: DataSource,
    pub metadata: ReportMetadata,
}

/// What was uploaded, without the text itself
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummary {
    pub file_name: String,
    pub size_bytes: u64,
    pub word_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub version: String,
    pub processing_time_ms: u64,
}

/// One-line reading of the match score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl Verdict {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Verdict::Excellent,
            60..=79 => Verdict::Good,
            40..=59 => Verdict::Fair,
            _ => Verdict::NeedsImprovement,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Excellent => "Excellent Match",
            Verdict::Good => "Good Match",
            Verdict::Fair => "Fair Match",
            Verdict::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&ExtractedResume> for ResumeSummary {
    fn from(resume: &ExtractedResume) -> Self {
        Self {
            file_name: resume.file_name.clone(),
            size_bytes: resume.size_bytes,
            word_count: resume.word_count,
        }
    }
}

impl CareerReport {
    pub fn new(profile: UserProfile, resume: &ExtractedResume, run: CareerAnalysis) -> Self {
        Self {
            profile,
            resume: ResumeSummary::from(resume),
            analysis: run.analysis,
            analysis_source: run.analysis_source,
            data_science: run.data_science,
            position: run.position,
            roadmap: run.roadmap,
            roadmap_source: run.roadmap_source,
            job_matches: run.job_matches,
            jobs_source: run.jobs_source,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                processing_time_ms: run.processing_time_ms,
            },
        }
    }

    pub fn match_score(&self) -> u8 {
        self.analysis.match_score
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_score(self.analysis.match_score)
    }

    /// Match score after the roadmap's estimated improvement, capped at 100
    pub fn projected_score(&self) -> u8 {
        self.analysis
            .match_score
            .saturating_add(self.roadmap.estimated_improvement)
            .min(100)
    }

    /// Whether any part of the report came from a mock generator
    pub fn uses_mock_data(&self) -> bool {
        [self.analysis_source, self.roadmap_source, self.jobs_source].contains(&DataSource::Mock)
    }

    /// Read a report previously saved as JSON
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| NovaError::InvalidInput(format!("{} is not a saved NOVA report: {}", path.display(), e)))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::processing::position::PositionAnalyzer;
    use crate::processing::ranking::rank_jobs;
    use crate::processing::resume_analyzer::{Impact, SkillGap};
    use crate::processing::roadmap::{RoadmapGenerator, Timeframe};
    use crate::jobs::{templates::mock_jobs, JobSearchParams};

    /// A report built entirely offline, shared by the formatter tests
    pub(crate) fn sample_report() -> CareerReport {
        let text = "Backend developer with 6 years experience. Python, SQL, Docker, AWS and Git. \
            Built REST APIs with Django. Bachelor degree in Computer Science.";
        let resume = ExtractedResume::from_text("jane_doe.txt", text);

        let analysis = ResumeAnalysis {
            experience_years: 6,
            education_level: "Bachelors".to_string(),
            match_score: 72,
            strengths: vec!["Strong problem-solving abilities with hands-on development experience".to_string()],
            gaps: vec![SkillGap {
                skill: "Kubernetes".to_string(),
                impact: Impact::High,
                time_to_acquire: "2-3 months".to_string(),
                description: Some("Container orchestration is expected for backend roles".to_string()),
            }],
            market_position: "Competitive".to_string(),
            ..Default::default()
        };

        let field = "Backend Developer";
        let roadmap = RoadmapGenerator::new().generate(&analysis, field, 80.0, Timeframe::SixMonth);
        let listings = mock_jobs(&JobSearchParams::for_field(field).with_salary_min(80.0));
        let mut job_matches = rank_jobs(&listings, &analysis, field, 80.0);
        job_matches.truncate(3);

        let run = CareerAnalysis {
            position: PositionAnalyzer::new().analyze(text, field).unwrap(),
            analysis,
            analysis_source: DataSource::Mock,
            data_science: None,
            roadmap,
            roadmap_source: DataSource::Mock,
            job_matches,
            jobs_source: DataSource::Mock,
            processing_time_ms: 12,
        };

        let profile = UserProfile {
            name: "Jane Doe".to_string(),
            target_field: field.to_string(),
            target_salary: 80.0,
        };
        CareerReport::new(profile, &resume, run)
    }

    #[test]
    fn test_verdict_bands() {
        assert_eq!(Verdict::from_score(95), Verdict::Excellent);
        assert_eq!(Verdict::from_score(80), Verdict::Excellent);
        assert_eq!(Verdict::from_score(79), Verdict::Good);
        assert_eq!(Verdict::from_score(40), Verdict::Fair);
        assert_eq!(Verdict::from_score(39).label(), "Needs Improvement");
    }

    #[test]
    fn test_report_summary_and_projection() {
        let report = sample_report();
        assert_eq!(report.resume.file_name, "jane_doe.txt");
        assert!(report.resume.word_count > 10);
        assert_eq!(report.verdict(), Verdict::Good);
        assert!(report.projected_score() >= report.match_score());
        assert!(report.projected_score() <= 100);
        assert!(report.uses_mock_data());
        assert_eq!(report.metadata.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_saved_report_loads_back() {
        let report = sample_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        std::fs::write(&path, serde_json::to_string_pretty(&report).unwrap()).unwrap();

        let loaded = CareerReport::load(&path).unwrap();
        assert_eq!(loaded.profile.name, "Jane Doe");
        assert_eq!(loaded.job_matches.len(), report.job_matches.len());
        assert_eq!(loaded.analysis_source, DataSource::Mock);
    }

    #[test]
    fn test_loading_other_json_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.json");
        std::fs::write(&path, r#"{"hello": "world"}"#).unwrap();
        assert!(matches!(CareerReport::load(&path), Err(NovaError::InvalidInput(_))));
    }
}
