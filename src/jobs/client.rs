//! Job listings API client

use crate::config::{AnalysisConfig, ServiceConfig};
use crate::error::{NovaError, Result};
use crate::jobs::templates::{mock_jobs, mock_salary_data};
use crate::jobs::{JobListing, JobSearchParams, SalaryData};
use crate::processing::analyzer::DataSource;
use log::{debug, info, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Deserialize)]
#[serde(untagged)]
enum ListingsResponse {
    Wrapped { jobs: Vec<JobListing> },
    Bare(Vec<JobListing>),
}

impl ListingsResponse {
    fn into_listings(self) -> Vec<JobListing> {
        match self {
            ListingsResponse::Wrapped { jobs } => jobs,
            ListingsResponse::Bare(jobs) => jobs,
        }
    }
}

/// Listings plus where they came from
#[derive(Debug, Clone)]
pub struct JobSearchResults {
    pub listings: Vec<JobListing>,
    pub source: DataSource,
}

pub struct JobService {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    host: String,
    default_location: String,
}

impl JobService {
    pub fn new(services: &ServiceConfig, analysis: &AnalysisConfig, api_key: Option<String>) -> Result<Self> {
        if api_key.is_none() {
            warn!("RapidAPI key not found, using mock job listings");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(services.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: services.job_api_base_url.trim_end_matches('/').to_string(),
            host: services.job_api_host.clone(),
            default_location: analysis.job_location.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search the listings API, falling back to mock listings on any failure
    pub async fn search(&self, params: &JobSearchParams) -> JobSearchResults {
        let Some(api_key) = self.api_key.as_deref() else {
            info!("No RapidAPI key configured, returning mock jobs");
            return Self::mock_results(params);
        };

        match self.fetch(api_key, params).await {
            Ok(listings) => {
                info!("Fetched {} job listings for '{}'", listings.len(), params.field);
                JobSearchResults {
                    listings,
                    source: DataSource::Live,
                }
            }
            Err(e) => {
                warn!("Error fetching jobs, using mock data: {}", e);
                Self::mock_results(params)
            }
        }
    }

    async fn fetch(&self, api_key: &str, params: &JobSearchParams) -> Result<Vec<JobListing>> {
        let location = params
            .location
            .clone()
            .unwrap_or_else(|| self.default_location.clone());

        let mut query: Vec<(&str, String)> = vec![("query", params.field.clone()), ("location", location)];
        if let Some(salary_min) = params.salary_min.filter(|s| *s > 0.0) {
            query.push(("salary_min", salary_min.to_string()));
        }
        if let Some(job_type) = &params.job_type {
            query.push(("job_type", job_type.clone()));
        }
        if let Some(experience) = &params.experience {
            query.push(("experience_level", experience.clone()));
        }

        let url = format!("{}/list", self.base_url);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", &self.host)
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NovaError::RemoteService(format!("Job API error: {}", status)));
        }

        let body: ListingsResponse = response
            .json()
            .await
            .map_err(|e| NovaError::RemoteService(format!("Unexpected job API response: {}", e)))?;

        Ok(body.into_listings())
    }

    fn mock_results(params: &JobSearchParams) -> JobSearchResults {
        JobSearchResults {
            listings: mock_jobs(params),
            source: DataSource::Mock,
        }
    }

    /// Market salary bands for a field; there is no live source for these
    pub fn salary_data(&self, field: &str, location: Option<&str>) -> SalaryData {
        mock_salary_data(field, location.unwrap_or(&self.default_location))
    }
}
