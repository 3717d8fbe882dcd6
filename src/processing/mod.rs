//! Résumé scoring, roadmap generation and job ranking

pub mod keywords;
pub mod resume_analyzer;
pub mod data_science;
pub mod position;
pub mod roadmap;
pub mod ranking;
pub mod analyzer;

pub use analyzer::{CareerAnalysis, CareerEngine, CareerRequest, DataSource};
