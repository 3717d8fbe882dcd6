//! Career engine: one analysis run from résumé text to ranked job matches

use crate::config::{Config, Credentials};
use crate::error::{NovaError, Result};
use crate::jobs::{JobSearchParams, JobService};
use crate::llm::prompts::{resume_analysis_prompt, roadmap_prompt};
use crate::llm::OpenAiClient;
use crate::processing::data_science::{self, DataScienceAnalysis, DataScienceAnalyzer};
use crate::processing::position::{PositionAnalysis, PositionAnalyzer};
use crate::processing::ranking::{rank_jobs, JobMatch};
use crate::processing::resume_analyzer::{HeuristicAnalyzer, ResumeAnalysis};
use crate::processing::roadmap::{RoadmapData, RoadmapGenerator, Timeframe};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

const ANALYSIS_MAX_TOKENS: u32 = 2000;
const ROADMAP_MAX_TOKENS: u32 = 4000;

/// Whether a result came from a live service or the local mock path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Mock,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Live => f.write_str("live"),
            DataSource::Mock => f.write_str("mock"),
        }
    }
}

/// What the engine needs for one run
#[derive(Debug, Clone)]
pub struct CareerRequest {
    pub resume_text: String,
    pub target_field: String,
    pub target_salary: f64,
    pub timeframe: Timeframe,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerAnalysis {
    pub analysis: ResumeAnalysis,
    pub analysis_source: DataSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_science: Option<DataScienceAnalysis>,
    pub position: PositionAnalysis,
    pub roadmap: RoadmapData,
    pub roadmap_source: DataSource,
    pub job_matches: Vec<JobMatch>,
    pub jobs_source: DataSource,
    pub processing_time_ms: u64,
}

/// Coordinates the analyzers and remote services for an analysis run
pub struct CareerEngine {
    openai: Option<OpenAiClient>,
    jobs: JobService,
    config: Config,
    seed: Option<u64>,
}

impl CareerEngine {
    pub fn new(config: &Config, credentials: &Credentials) -> Result<Self> {
        let services = &config.services;

        let openai = match credentials.usable_openai_key() {
            Some(key) => Some(OpenAiClient::new(
                &services.openai_base_url,
                key,
                services.request_timeout_secs,
            )?),
            None => {
                if credentials.openai_api_key.is_none() {
                    warn!("OpenAI API key not found, using mock analysis");
                }
                None
            }
        };

        let jobs = JobService::new(services, &config.analysis, credentials.rapidapi_key.clone())?;

        Ok(Self {
            openai,
            jobs,
            config: config.clone(),
            seed: None,
        })
    }

    /// Make the heuristic analysis reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn is_ai_configured(&self) -> bool {
        self.openai.is_some()
    }

    pub fn jobs(&self) -> &JobService {
        &self.jobs
    }

    /// Run every stage for one résumé
    pub async fn run(&self, request: &CareerRequest) -> Result<CareerAnalysis> {
        if request.resume_text.trim().is_empty() {
            return Err(NovaError::InvalidInput("Resume text is empty".to_string()));
        }
        if !request.target_salary.is_finite() {
            return Err(NovaError::InvalidInput(format!(
                "Target salary must be a number, got {}",
                request.target_salary
            )));
        }

        let start_time = Instant::now();
        let field = request.target_field.trim();

        // 1. Résumé analysis
        let (analysis, analysis_source) = self
            .analyze_resume(&request.resume_text, field, request.target_salary)
            .await;
        info!("Résumé match score: {}% ({})", analysis.match_score, analysis_source);

        // 2. Data-science breakdown, only for data roles
        let data_science = if data_science::applies_to(field) {
            Some(DataScienceAnalyzer::new().analyze(&request.resume_text)?)
        } else {
            None
        };

        // 3. Position breakdown
        let position = PositionAnalyzer::new().analyze(&request.resume_text, field)?;

        // 4. Roadmap
        let (roadmap, roadmap_source) = self
            .generate_roadmap(&analysis, field, request.target_salary, request.timeframe)
            .await;

        // 5-6. Job search and ranking
        let (job_matches, jobs_source) = self.find_jobs(&analysis, field, request.target_salary).await;

        Ok(CareerAnalysis {
            analysis,
            analysis_source,
            data_science,
            position,
            roadmap,
            roadmap_source,
            job_matches,
            jobs_source,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        })
    }

    pub async fn analyze_resume(
        &self,
        resume_text: &str,
        target_field: &str,
        target_salary: f64,
    ) -> (ResumeAnalysis, DataSource) {
        if let Some(openai) = &self.openai {
            let prompt = resume_analysis_prompt(resume_text, target_field, target_salary);
            match openai
                .chat_json::<ResumeAnalysis>(&self.config.services.analysis_model, &prompt, ANALYSIS_MAX_TOKENS)
                .await
            {
                Ok(analysis) => return (analysis, DataSource::Live),
                Err(e) => warn!("OpenAI analysis failed, falling back to mock analysis: {}", e),
            }
        }

        self.simulate_latency().await;
        let analysis = match self.seed {
            Some(seed) => HeuristicAnalyzer::new().analyze(
                resume_text,
                target_field,
                target_salary,
                &mut StdRng::seed_from_u64(seed),
            ),
            None => HeuristicAnalyzer::new().analyze(
                resume_text,
                target_field,
                target_salary,
                &mut rand::thread_rng(),
            ),
        };
        (analysis, DataSource::Mock)
    }

    pub async fn generate_roadmap(
        &self,
        analysis: &ResumeAnalysis,
        target_field: &str,
        target_salary: f64,
        timeframe: Timeframe,
    ) -> (RoadmapData, DataSource) {
        if let Some(openai) = &self.openai {
            let prompt = roadmap_prompt(analysis, target_field, target_salary, timeframe);
            match openai
                .chat_json::<RoadmapData>(&self.config.services.roadmap_model, &prompt, ROADMAP_MAX_TOKENS)
                .await
            {
                Ok(roadmap) => return (roadmap.with_defaults_from(timeframe), DataSource::Live),
                Err(e) => warn!("Roadmap generation failed, using template roadmap: {}", e),
            }
        }

        self.simulate_latency().await;
        let roadmap = RoadmapGenerator::new().generate(analysis, target_field, target_salary, timeframe);
        (roadmap, DataSource::Mock)
    }

    /// Search listings near the target rate and keep the best few
    pub async fn find_jobs(
        &self,
        analysis: &ResumeAnalysis,
        target_field: &str,
        target_salary: f64,
    ) -> (Vec<JobMatch>, DataSource) {
        let params = JobSearchParams::for_field(target_field)
            .with_location(self.config.analysis.job_location.clone())
            .with_salary_min(target_salary);

        let results = self.jobs.search(&params).await;
        let mut matches = rank_jobs(&results.listings, analysis, target_field, target_salary);
        matches.truncate(self.config.analysis.max_job_matches);

        (matches, results.source)
    }

    async fn simulate_latency(&self) {
        let delay = self.config.analysis.mock_delay_ms;
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_once;

    const ANALYST_RESUME: &str = "Data Analyst with 5 years experience. Python, SQL, Pandas, \
        Tableau and Excel dashboards. Statistics and machine learning with scikit-learn. \
        Master degree in Statistics. Fluent English.";

    fn offline_engine() -> CareerEngine {
        let mut config = Config::default();
        config.services.job_api_base_url = "http://127.0.0.1:9".to_string();
        CareerEngine::new(&config, &Credentials::offline()).unwrap().with_seed(11)
    }

    fn request(field: &str) -> CareerRequest {
        CareerRequest {
            resume_text: ANALYST_RESUME.to_string(),
            target_field: field.to_string(),
            target_salary: 75.0,
            timeframe: Timeframe::ThreeMonth,
        }
    }

    #[test]
    fn test_placeholder_key_is_not_configured() {
        let credentials = Credentials {
            openai_api_key: Some("your-openai-api-key-here".to_string()),
            ..Default::default()
        };
        let engine = CareerEngine::new(&Config::default(), &credentials).unwrap();
        assert!(!engine.is_ai_configured());
    }

    #[tokio::test]
    async fn test_offline_run_uses_mock_everywhere() {
        let result = offline_engine().run(&request("Data Analyst")).await.unwrap();

        assert_eq!(result.analysis_source, DataSource::Mock);
        assert_eq!(result.roadmap_source, DataSource::Mock);
        assert_eq!(result.jobs_source, DataSource::Mock);
        assert!(result.analysis.match_score <= 100);
        assert_eq!(result.roadmap.timeline, Timeframe::ThreeMonth);
        assert_eq!(result.job_matches.len(), 3);
        assert!(result.job_matches.windows(2).all(|w| w[0].match_score >= w[1].match_score));
    }

    #[tokio::test]
    async fn test_data_science_only_for_data_roles() {
        let engine = offline_engine();

        let data = engine.run(&request("Data Scientist")).await.unwrap();
        assert!(data.data_science.is_some());

        let product = engine.run(&request("Product Manager")).await.unwrap();
        assert!(product.data_science.is_none());
        assert!((1..=10).contains(&product.position.overall_relevance_score));
    }

    #[tokio::test]
    async fn test_failed_openai_call_falls_back() {
        let mut config = Config::default();
        config.services.openai_base_url = "http://127.0.0.1:9/v1".to_string();
        config.services.request_timeout_secs = 2;
        let credentials = Credentials {
            openai_api_key: Some("sk-test".to_string()),
            ..Default::default()
        };

        let engine = CareerEngine::new(&config, &credentials).unwrap().with_seed(3);
        assert!(engine.is_ai_configured());

        let (analysis, source) = engine.analyze_resume(ANALYST_RESUME, "Data Analyst", 75.0).await;
        assert_eq!(source, DataSource::Mock);
        assert!(!analysis.strengths.is_empty());

        let (roadmap, source) = engine
            .generate_roadmap(&analysis, "Data Analyst", 75.0, Timeframe::SixMonth)
            .await;
        assert_eq!(source, DataSource::Mock);
        assert_eq!(roadmap.phases.len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_request_is_rejected() {
        let engine = offline_engine();

        let mut blank = request("Data Analyst");
        blank.resume_text = "  \n ".to_string();
        assert!(matches!(engine.run(&blank).await, Err(NovaError::InvalidInput(_))));

        let mut bad_salary = request("Data Analyst");
        bad_salary.target_salary = f64::NAN;
        assert!(matches!(engine.run(&bad_salary).await, Err(NovaError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_live_analysis_is_used_when_reply_parses() {
        let content = "```json\n{\"experienceYears\": \"5+\", \"matchScore\": 78, \"marketPosition\": \"Strong\"}\n```";
        let body = serde_json::json!({"choices": [{"message": {"role": "assistant", "content": content}}]});
        let (base_url, _request) = serve_once(200, body.to_string()).await;

        let mut config = Config::default();
        config.services.openai_base_url = base_url;
        let credentials = Credentials {
            openai_api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        let engine = CareerEngine::new(&config, &credentials).unwrap();

        let (analysis, source) = engine.analyze_resume(ANALYST_RESUME, "Data Analyst", 75.0).await;
        assert_eq!(source, DataSource::Live);
        assert_eq!(analysis.experience_years, 5);
        assert_eq!(analysis.match_score, 78);
        assert_eq!(analysis.market_position, "Strong");
    }

    #[tokio::test]
    async fn test_job_matches_respect_configured_limit() {
        let mut config = Config::default();
        config.analysis.max_job_matches = 1;
        let engine = CareerEngine::new(&config, &Credentials::offline()).unwrap();

        let analysis = ResumeAnalysis::default();
        let (matches, source) = engine.find_jobs(&analysis, "Backend Developer", 80.0).await;
        assert_eq!(source, DataSource::Mock);
        assert_eq!(matches.len(), 1);
    }
}
