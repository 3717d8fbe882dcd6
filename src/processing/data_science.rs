//! Data-science specific relevance analysis on a 1-10 scale

use crate::error::Result;
use crate::processing::keywords::{capitalize, score_tiers, CategoryBreakdown, KeywordText, KeywordTiers};
use serde::{Deserialize, Serialize};

const RELEVANT_EDUCATION: &[&str] = &[
    "data science", "statistics", "mathematics", "computer science", "physics", "engineering",
    "economics", "quantitative", "analytics", "machine learning", "artificial intelligence",
    "operations research",
];

const IRRELEVANT_FIELDS: &[&str] = &[
    "interior design", "fashion", "culinary", "hospitality", "retail", "construction",
    "civil engineering", "mechanical engineering", "architecture", "graphic design", "fine arts",
    "music", "theater", "real estate", "insurance sales", "restaurant management",
];

const DATA_ROLES: &[&str] = &[
    "data scientist", "data analyst", "business analyst", "research analyst",
    "quantitative analyst", "statistician", "machine learning engineer", "data engineer",
    "business intelligence", "market research",
];

const ANALYTICAL_KEYWORDS: &[&str] = &[
    "analysis", "analytics", "research", "modeling", "forecasting", "reporting", "insights",
    "metrics", "kpi", "dashboard",
];

const DEGREE_KEYWORDS: &[&str] = &["bachelor", "master", "phd", "doctorate", "degree"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataScienceAnalysis {
    pub overall_relevance_score: u8,
    pub key_strengths: Vec<String>,
    pub major_gaps: Vec<String>,
    pub irrelevant_elements: Vec<String>,
    pub improvement_recommendations: Vec<String>,
    pub job_readiness_assessment: String,
    pub technical_skills_breakdown: Vec<CategoryBreakdown>,
    pub experience_relevance: DataExperience,
    pub education_assessment: EducationAssessment,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataExperience {
    pub data_related_experience: Vec<String>,
    pub analytical_experience: Vec<String>,
    pub irrelevant_experience: Vec<String>,
    pub experience_score: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationAssessment {
    pub relevant_education: Vec<String>,
    pub supportive_education: Vec<String>,
    pub irrelevant_education: Vec<String>,
    pub education_score: u8,
}

/// Whether a target field calls for the data-science breakdown
pub fn applies_to(target_field: &str) -> bool {
    let field = target_field.to_lowercase();
    field.contains("data science") || field.contains("data scientist")
}

/// Clamp a signed tally into the 0-10 band
pub(crate) fn band(raw: i32) -> u8 {
    raw.clamp(0, 10) as u8
}

pub struct DataScienceAnalyzer {
    categories: Vec<(&'static str, KeywordTiers)>,
}

impl Default for DataScienceAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DataScienceAnalyzer {
    pub fn new() -> Self {
        let categories = vec![
            (
                "programming",
                KeywordTiers::new(
                    &["python", "sql", "r"],
                    &["pandas", "numpy", "scikit-learn", "jupyter", "git"],
                    &["scala", "java", "spark", "hadoop", "tensorflow", "pytorch"],
                ),
            ),
            (
                "statistics",
                KeywordTiers::new(
                    &["statistics", "probability", "hypothesis testing"],
                    &["regression", "statistical modeling", "a/b testing", "experimental design"],
                    &["bayesian", "time series", "multivariate analysis"],
                ),
            ),
            (
                "machine learning",
                KeywordTiers::new(
                    &["machine learning", "supervised learning", "unsupervised learning"],
                    &["classification", "regression", "clustering", "feature engineering", "model validation"],
                    &["deep learning", "neural networks", "nlp", "computer vision", "reinforcement learning"],
                ),
            ),
            (
                "data tools",
                KeywordTiers::new(
                    &["excel", "databases"],
                    &["tableau", "power bi", "aws", "azure", "gcp"],
                    &["docker", "kubernetes", "airflow", "kafka", "elasticsearch"],
                ),
            ),
            (
                "visualization",
                KeywordTiers::new(
                    &["data visualization"],
                    &["matplotlib", "seaborn", "plotly", "ggplot2"],
                    &["d3.js", "bokeh", "dash", "shiny"],
                ),
            ),
        ];

        Self { categories }
    }

    pub fn analyze(&self, resume_text: &str) -> Result<DataScienceAnalysis> {
        let text = KeywordText::new(resume_text);

        let irrelevant = text.find_present(IRRELEVANT_FIELDS)?;
        if irrelevant.len() > 2 {
            return Ok(irrelevant_analysis(irrelevant));
        }

        let breakdown = self
            .categories
            .iter()
            .map(|(name, tiers)| score_tiers(&text, name, tiers))
            .collect::<Result<Vec<_>>>()?;

        let data_roles = text.find_present(DATA_ROLES)?;
        let analytical = text.find_present(ANALYTICAL_KEYWORDS)?;
        let experience = DataExperience {
            experience_score: band(
                3 * data_roles.len() as i32 + analytical.len() as i32 - 2 * irrelevant.len() as i32,
            ),
            data_related_experience: data_roles,
            analytical_experience: analytical,
            irrelevant_experience: irrelevant.clone(),
        };

        let relevant_education = text.find_present(RELEVANT_EDUCATION)?;
        let degrees = text.find_present(DEGREE_KEYWORDS)?;
        let education = EducationAssessment {
            education_score: band(
                4 * relevant_education.len() as i32 + degrees.len() as i32 - 3 * irrelevant.len() as i32,
            ),
            relevant_education,
            supportive_education: degrees,
            irrelevant_education: irrelevant.clone(),
        };

        let overall = overall_score(&breakdown, &experience, &education);

        Ok(DataScienceAnalysis {
            overall_relevance_score: overall,
            key_strengths: key_strengths(&breakdown, &experience, &education),
            major_gaps: major_gaps(&breakdown, &experience, &education),
            irrelevant_elements: irrelevant
                .iter()
                .map(|field| format!("{} experience/background", field))
                .collect(),
            improvement_recommendations: recommendations(&breakdown, &experience, overall),
            job_readiness_assessment: readiness(overall).to_string(),
            technical_skills_breakdown: breakdown,
            experience_relevance: experience,
            education_assessment: education,
        })
    }
}

fn overall_score(breakdown: &[CategoryBreakdown], experience: &DataExperience, education: &EducationAssessment) -> u8 {
    let tech_avg = breakdown.iter().map(|c| c.score as f64).sum::<f64>() / 5.0;
    let weighted = tech_avg * 0.5
        + experience.experience_score as f64 * 0.3
        + education.education_score as f64 * 0.2;
    weighted.clamp(1.0, 10.0).round() as u8
}

fn key_strengths(breakdown: &[CategoryBreakdown], experience: &DataExperience, education: &EducationAssessment) -> Vec<String> {
    let mut strengths: Vec<String> = breakdown
        .iter()
        .filter(|c| c.score >= 7 && !c.present.is_empty())
        .map(|c| format!("Strong {} skills: {}", c.name, first_n(&c.present, 3)))
        .collect();

    if !experience.data_related_experience.is_empty() {
        strengths.push(format!(
            "Relevant data experience: {}",
            experience.data_related_experience.join(", ")
        ));
    }

    if !education.relevant_education.is_empty() {
        strengths.push(format!(
            "Relevant educational background: {}",
            education.relevant_education.join(", ")
        ));
    }

    if strengths.is_empty() {
        strengths.push("No significant strengths identified for data science".to_string());
    }
    strengths
}

fn major_gaps(breakdown: &[CategoryBreakdown], experience: &DataExperience, education: &EducationAssessment) -> Vec<String> {
    let mut gaps: Vec<String> = breakdown
        .iter()
        .filter(|c| c.score < 5 && !c.missing.is_empty())
        .map(|c| format!("Missing {} skills: {}", c.name, first_n(&c.missing, 3)))
        .collect();

    if experience.data_related_experience.is_empty() {
        gaps.push("No direct data science or analytics experience".to_string());
    }

    if education.relevant_education.is_empty() {
        gaps.push("No quantitative or technical educational background".to_string());
    }

    if gaps.is_empty() {
        gaps.push("Minor gaps in advanced specializations".to_string());
    }
    gaps
}

fn recommendations(breakdown: &[CategoryBreakdown], experience: &DataExperience, score: u8) -> Vec<String> {
    if score <= 3 {
        return to_strings(&[
            "Complete a comprehensive data science program or bootcamp",
            "Learn Python programming from scratch",
            "Study statistics and probability fundamentals",
            "Build 3-5 data science projects for portfolio",
        ]);
    }

    if score <= 6 {
        let mut recs: Vec<String> = breakdown
            .iter()
            .filter(|c| c.score < 6 && !c.missing.is_empty())
            .map(|c| {
                format!(
                    "Strengthen {}: focus on {}",
                    c.name,
                    c.missing.iter().take(2).cloned().collect::<Vec<_>>().join(" and ")
                )
            })
            .collect();

        if experience.data_related_experience.is_empty() {
            recs.push("Gain hands-on experience through internships or entry-level analyst roles".to_string());
        }
        return recs;
    }

    to_strings(&[
        "Focus on advanced specializations (deep learning, MLOps, etc.)",
        "Contribute to open-source data science projects",
        "Obtain advanced certifications in cloud platforms",
    ])
}

fn readiness(score: u8) -> &'static str {
    match score {
        0..=2 => "NOT READY: Candidate lacks fundamental data science skills and knowledge. Requires 12-18 months of intensive training.",
        3..=4 => "BEGINNER LEVEL: Some basic skills present but significant gaps remain. Suitable only for entry-level positions with extensive mentoring. Needs 6-12 months additional preparation.",
        5..=6 => "JUNIOR READY: Has foundational skills but needs practical experience. Suitable for junior data scientist or analyst roles with supervision. Recommend 3-6 months focused skill development.",
        7..=8 => "MID-LEVEL READY: Strong technical foundation with relevant experience. Ready for mid-level data science positions. Minor skill gaps can be addressed on the job.",
        _ => "SENIOR READY: Excellent technical skills and experience. Ready for senior data science roles and can contribute immediately to complex projects.",
    }
}

fn irrelevant_analysis(irrelevant: Vec<String>) -> DataScienceAnalysis {
    let empty_category = |name: &str, missing: &[&str]| CategoryBreakdown {
        name: name.to_string(),
        present: Vec::new(),
        missing: to_strings(missing),
        score: 0,
    };

    DataScienceAnalysis {
        overall_relevance_score: 1,
        key_strengths: Vec::new(),
        major_gaps: to_strings(&[
            "No data science technical skills identified",
            "No relevant analytical experience",
            "No quantitative educational background",
            "No programming or statistical knowledge demonstrated",
            "Complete field mismatch for data science requirements",
        ]),
        irrelevant_elements: irrelevant
            .iter()
            .map(|field| format!("Background in {} - not relevant to data science", field))
            .collect(),
        improvement_recommendations: to_strings(&[
            "Complete a comprehensive data science bootcamp or degree program",
            "Learn Python programming and SQL database management",
            "Study statistics, probability, and machine learning fundamentals",
            "Build a portfolio of data science projects to demonstrate skills",
            "Consider starting with entry-level analyst roles to gain relevant experience",
            "Obtain relevant certifications (Google Data Analytics, IBM Data Science, etc.)",
        ]),
        job_readiness_assessment: "NOT READY: This resume shows no relevance to data science. Candidate needs extensive retraining and skill development before being considered for any data science position. Recommend 12-18 months of intensive study and practice.".to_string(),
        technical_skills_breakdown: vec![
            empty_category("programming", &["Python", "SQL", "R"]),
            empty_category("statistics", &["Statistics", "Probability", "Hypothesis Testing"]),
            empty_category("machine learning", &["Machine Learning", "Supervised Learning"]),
            empty_category("data tools", &["Excel", "Tableau", "Databases"]),
            empty_category("visualization", &["Data Visualization", "Matplotlib"]),
        ],
        experience_relevance: DataExperience {
            irrelevant_experience: irrelevant.clone(),
            ..Default::default()
        },
        education_assessment: EducationAssessment {
            irrelevant_education: irrelevant,
            ..Default::default()
        },
    }
}

pub(crate) fn first_n(items: &[String], n: usize) -> String {
    items.iter().take(n).cloned().collect::<Vec<_>>().join(", ")
}

pub(crate) fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Category label as shown to users
pub fn category_label(name: &str) -> String {
    name.split_whitespace().map(capitalize).collect::<Vec<_>>().join(" ")
}
