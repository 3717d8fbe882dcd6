//! Guided analysis flow: landing, setup, analysis, dashboard

use crate::error::{NovaError, Result};
use crate::input::ExtractedResume;
use crate::output::report::CareerReport;
use crate::processing::analyzer::{CareerEngine, CareerRequest};
use crate::processing::roadmap::Timeframe;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_NAME: &str = "Professional";
pub const DEFAULT_TARGET_SALARY: f64 = 75.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Landing,
    Setup,
    Analysis,
    Dashboard,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Landing => "landing",
            Step::Setup => "setup",
            Step::Analysis => "analysis",
            Step::Dashboard => "dashboard",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub target_field: String,
    pub target_salary: f64,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            target_field: String::new(),
            target_salary: DEFAULT_TARGET_SALARY,
        }
    }
}

impl UserProfile {
    pub fn new(name: Option<String>, target_field: impl Into<String>, target_salary: f64) -> Self {
        Self {
            name: name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| DEFAULT_NAME.to_string()),
            target_field: target_field.into(),
            target_salary,
        }
    }
}

pub struct CareerSession {
    step: Step,
    profile: UserProfile,
    resume: Option<ExtractedResume>,
    report: Option<CareerReport>,
}

impl Default for CareerSession {
    fn default() -> Self {
        Self::new(UserProfile::default())
    }
}

impl CareerSession {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            step: Step::Landing,
            profile,
            resume: None,
            report: None,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut UserProfile {
        &mut self.profile
    }

    pub fn resume(&self) -> Option<&ExtractedResume> {
        self.resume.as_ref()
    }

    pub fn report(&self) -> Option<&CareerReport> {
        self.report.as_ref()
    }

    pub fn begin(&mut self) {
        if self.step == Step::Landing {
            self.step = Step::Setup;
        }
    }

    pub fn attach_resume(&mut self, resume: ExtractedResume) -> Result<()> {
        if self.step != Step::Setup {
            return Err(NovaError::InvalidInput(format!(
                "A resume can only be attached during setup (current step: {})",
                self.step
            )));
        }
        info!("Resume attached: {} ({} words)", resume.file_name, resume.word_count);
        self.resume = Some(resume);
        Ok(())
    }

    fn validate(&self) -> Result<&ExtractedResume> {
        if self.profile.target_field.trim().is_empty() {
            return Err(NovaError::InvalidInput("Please enter your target role first".to_string()));
        }
        let resume = self
            .resume
            .as_ref()
            .ok_or_else(|| NovaError::InvalidInput("Please upload your resume first".to_string()))?;
        if resume.is_blank() {
            return Err(NovaError::InvalidInput(
                "Resume content could not be extracted. Please try a different file.".to_string(),
            ));
        }
        Ok(resume)
    }

    /// Validate, run the engine, and move to the dashboard on success
    pub async fn submit(&mut self, engine: &CareerEngine, timeframe: Timeframe) -> Result<&CareerReport> {
        if self.step != Step::Setup {
            return Err(NovaError::InvalidInput(format!(
                "Analysis can only be submitted from setup (current step: {})",
                self.step
            )));
        }
        let resume = self.validate()?.clone();

        self.step = Step::Analysis;
        let request = CareerRequest {
            resume_text: resume.text.clone(),
            target_field: self.profile.target_field.clone(),
            target_salary: self.profile.target_salary,
            timeframe,
        };

        match engine.run(&request).await {
            Ok(run) => {
                self.step = Step::Dashboard;
                info!("Analysis complete in {}ms", run.processing_time_ms);
                Ok(self.report.insert(CareerReport::new(self.profile.clone(), &resume, run)))
            }
            Err(e) => {
                error!("Analysis failed: {}", e);
                Err(e)
            }
        }
    }

    /// Step back; landing has nowhere to go
    pub fn back(&mut self) -> Step {
        self.step = match self.step {
            Step::Dashboard | Step::Analysis => Step::Setup,
            Step::Setup | Step::Landing => Step::Landing,
        };
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Credentials};

    fn engine() -> CareerEngine {
        CareerEngine::new(&Config::default(), &Credentials::offline())
            .unwrap()
            .with_seed(5)
    }

    fn resume(text: &str) -> ExtractedResume {
        ExtractedResume::from_text("resume.txt", text)
    }

    #[test]
    fn test_profile_defaults() {
        let profile = UserProfile::default();
        assert_eq!(profile.name, "Professional");
        assert_eq!(profile.target_salary, 75.0);

        let blank = UserProfile::new(Some("  ".to_string()), "Designer", 60.0);
        assert_eq!(blank.name, "Professional");
    }

    #[test]
    fn test_navigation() {
        let mut session = CareerSession::default();
        assert_eq!(session.back(), Step::Landing);

        session.begin();
        assert_eq!(session.step(), Step::Setup);
        assert_eq!(session.back(), Step::Landing);
    }

    #[test]
    fn test_attach_requires_setup() {
        let mut session = CareerSession::default();
        assert!(matches!(
            session.attach_resume(resume("text")),
            Err(NovaError::InvalidInput(_))
        ));
        session.begin();
        assert!(session.attach_resume(resume("text")).is_ok());
    }

    #[tokio::test]
    async fn test_submit_validation_order() {
        let engine = engine();
        let mut session = CareerSession::new(UserProfile::new(None, " ", 75.0));
        session.begin();

        let err = session.submit(&engine, Timeframe::SixMonth).await.unwrap_err();
        assert!(err.to_string().contains("Please enter your target role first"));

        session.profile_mut().target_field = "Backend Developer".to_string();
        let err = session.submit(&engine, Timeframe::SixMonth).await.unwrap_err();
        assert!(err.to_string().contains("Please upload your resume first"));

        session.attach_resume(resume("   ")).unwrap();
        let err = session.submit(&engine, Timeframe::SixMonth).await.unwrap_err();
        assert!(err.to_string().contains("Resume content could not be extracted"));
        assert_eq!(session.step(), Step::Setup);
    }

    #[tokio::test]
    async fn test_engine_failure_stays_in_analysis() {
        let engine = engine();
        let mut session = CareerSession::new(UserProfile::new(None, "Backend Developer", f64::NAN));
        session.begin();
        session
            .attach_resume(resume("Backend engineer with Python and SQL."))
            .unwrap();

        let result = session.submit(&engine, Timeframe::SixMonth).await;
        assert!(matches!(result, Err(NovaError::InvalidInput(_))));
        assert_eq!(session.step(), Step::Analysis);
        assert!(session.report().is_none());

        assert_eq!(session.back(), Step::Setup);
    }

    #[tokio::test]
    async fn test_submit_reaches_dashboard() {
        let engine = engine();
        let mut session = CareerSession::new(UserProfile::new(
            Some("Sam Lee".to_string()),
            "Backend Developer",
            85.0,
        ));
        session.begin();
        session
            .attach_resume(resume("Backend engineer with 4 years experience in Python, SQL and Docker."))
            .unwrap();

        let report = session.submit(&engine, Timeframe::ThreeMonth).await.unwrap();
        assert_eq!(report.profile.name, "Sam Lee");
        assert_eq!(report.roadmap.timeline, Timeframe::ThreeMonth);

        assert_eq!(session.step(), Step::Dashboard);
        assert!(session.report().is_some());
        assert_eq!(session.back(), Step::Setup);
    }
}
