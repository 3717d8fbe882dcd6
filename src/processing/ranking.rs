//! Ranking of job listings against an analysed résumé

use crate::jobs::JobListing;
use crate::processing::roadmap::format_rate;
use crate::processing::resume_analyzer::{ExtractedSkills, ResumeAnalysis};
use serde::{Deserialize, Serialize};

const MAX_RANKED: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatch {
    pub job_title: String,
    pub company_name: String,
    pub salary_min: f64,
    pub salary_max: f64,
    pub location: String,
    pub job_type: String,
    pub required_skills: Vec<String>,
    pub job_description: String,
    pub application_url: String,
    pub match_score: u8,
    pub match_reason: String,
}

impl JobMatch {
    pub fn salary_range(&self) -> String {
        format!("${}-{}/hr", format_rate(self.salary_min), format_rate(self.salary_max))
    }
}

/// Score every listing, highest first, keeping at most ten
pub fn rank_jobs(
    listings: &[JobListing],
    analysis: &ResumeAnalysis,
    target_field: &str,
    target_salary: f64,
) -> Vec<JobMatch> {
    let mut ranked: Vec<JobMatch> = listings
        .iter()
        .enumerate()
        .map(|(index, job)| to_match(index, job, analysis, target_field, target_salary))
        .collect();

    ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    ranked.truncate(MAX_RANKED);
    ranked
}

fn to_match(
    index: usize,
    job: &JobListing,
    analysis: &ResumeAnalysis,
    target_field: &str,
    target_salary: f64,
) -> JobMatch {
    let listed_skills = job.required_skills.as_deref().unwrap_or_default();

    let skill = skill_match(listed_skills, &analysis.extracted_skills);
    let experience = experience_match(job.experience_level.as_deref(), analysis.experience_years);
    let salary = salary_match(job.salary_min, job.salary_max, target_salary);
    let overall = (skill * 0.5 + experience * 0.3 + salary * 0.2).round();

    // An empty list from the board is kept as is; only a missing one is filled
    let required_skills = match &job.required_skills {
        Some(skills) => skills.clone(),
        None => analysis.extracted_skills.technical.iter().take(4).cloned().collect(),
    };

    JobMatch {
        job_title: non_empty(&job.title).unwrap_or_else(|| format!("{} Position", target_field)),
        company_name: non_empty(&job.company).unwrap_or_else(|| format!("Company {}", index + 1)),
        salary_min: positive(job.salary_min).unwrap_or_else(|| (target_salary - 20.0).max(30.0)),
        salary_max: positive(job.salary_max).unwrap_or(target_salary + 20.0),
        location: non_empty(&job.location).unwrap_or_else(|| "Remote".to_string()),
        job_type: non_empty(&job.job_type).unwrap_or_else(|| "Full-time".to_string()),
        required_skills,
        job_description: non_empty(&job.description)
            .unwrap_or_else(|| format!("Exciting {} opportunity with growth potential.", target_field)),
        application_url: non_empty(&job.apply_url).unwrap_or_else(|| "#".to_string()),
        match_score: overall.clamp(60.0, 95.0) as u8,
        match_reason: non_empty(&job.relevance_explanation).unwrap_or_else(|| {
            format!(
                "Strong alignment with your {} background and {} years of experience.",
                target_field, analysis.experience_years
            )
        }),
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

/// 70 with no listed skills, otherwise 50 plus up to 45 for overlap
pub fn skill_match(job_skills: &[String], user_skills: &ExtractedSkills) -> f64 {
    if job_skills.is_empty() {
        return 70.0;
    }

    let mine = user_skills.comparable();
    let matched = job_skills
        .iter()
        .map(|s| s.to_lowercase())
        .filter(|skill| mine.iter().any(|m| m.contains(skill.as_str()) || skill.contains(m.as_str())))
        .count();

    (50.0 + matched as f64 / job_skills.len() as f64 * 45.0).min(95.0)
}

/// Years expected for each seniority level; unknown levels count as mid.
/// Level keys match exactly.
fn level_range(level: Option<&str>) -> (u32, u32) {
    match level {
        Some("entry") => (0, 2),
        Some("senior") => (5, 10),
        Some("lead") => (8, 15),
        _ => (2, 5),
    }
}

pub fn experience_match(level: Option<&str>, years: u32) -> f64 {
    let (min, max) = level_range(level);
    let years = years as i64;
    let (min, max) = (min as i64, max as i64);

    if years >= min && years <= max {
        90.0
    } else if years >= min - 1 && years <= max + 2 {
        75.0
    } else {
        60.0
    }
}

/// Closeness of the listing's average rate to the target
pub fn salary_match(job_min: Option<f64>, job_max: Option<f64>, target_salary: f64) -> f64 {
    let bounds: Vec<f64> = [positive(job_min), positive(job_max)].into_iter().flatten().collect();
    if bounds.is_empty() {
        return 70.0;
    }
    if target_salary <= 0.0 {
        return 60.0;
    }

    let average = bounds.iter().sum::<f64>() / bounds.len() as f64;
    let percent_diff = (average - target_salary).abs() / target_salary;

    if percent_diff <= 0.1 {
        95.0
    } else if percent_diff <= 0.2 {
        85.0
    } else if percent_diff <= 0.3 {
        75.0
    } else {
        60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis() -> ResumeAnalysis {
        ResumeAnalysis {
            extracted_skills: ExtractedSkills {
                technical: vec!["Python".into(), "SQL".into(), "AWS".into(), "Docker".into(), "Git".into()],
                frameworks: vec!["Django".into()],
                tools: vec!["Tableau".into()],
                languages: vec!["English".into()],
            },
            experience_years: 4,
            match_score: 70,
            ..Default::default()
        }
    }

    fn listing(title: &str, skills: &[&str], min: f64, max: f64) -> JobListing {
        JobListing {
            title: Some(title.to_string()),
            required_skills: Some(skills.iter().map(|s| s.to_string()).collect()),
            salary_min: Some(min),
            salary_max: Some(max),
            ..Default::default()
        }
    }

    #[test]
    fn test_skill_match() {
        let user = analysis().extracted_skills;
        assert_eq!(skill_match(&[], &user), 70.0);

        let skills: Vec<String> = vec!["python".into(), "PostgreSQL".into(), "Rust".into()];
        // python and postgresql (contains sql) match
        assert_eq!(skill_match(&skills, &user), 80.0);
    }

    #[test]
    fn test_experience_bands() {
        assert_eq!(experience_match(Some("mid"), 4), 90.0);
        assert_eq!(experience_match(Some("senior"), 4), 75.0);
        assert_eq!(experience_match(Some("lead"), 4), 60.0);
        assert_eq!(experience_match(None, 7), 75.0);
        assert_eq!(experience_match(Some("entry"), 0), 90.0);
    }

    #[test]
    fn test_level_keys_match_exactly() {
        // "Entry" and " senior" are unknown levels and fall back to mid (2-5 years)
        assert_eq!(level_range(Some("Entry")), (2, 5));
        assert_eq!(level_range(Some(" senior")), (2, 5));
        assert_eq!(experience_match(Some("Entry"), 0), 60.0);
        assert_eq!(experience_match(Some("Senior"), 4), 90.0);
        assert_eq!(level_range(Some("lead")), (8, 15));
    }

    #[test]
    fn test_listed_empty_skills_stay_empty() {
        let listings = vec![
            listing("No skills listed", &[], 75.0, 75.0),
            JobListing {
                title: Some("Skills missing".to_string()),
                ..Default::default()
            },
        ];

        let ranked = rank_jobs(&listings, &analysis(), "Analyst", 75.0);

        let listed = ranked.iter().find(|m| m.job_title == "No skills listed").unwrap();
        assert!(listed.required_skills.is_empty());
        let missing = ranked.iter().find(|m| m.job_title == "Skills missing").unwrap();
        assert_eq!(missing.required_skills, vec!["Python", "SQL", "AWS", "Docker"]);
    }

    #[test]
    fn test_salary_bands() {
        assert_eq!(salary_match(None, None, 75.0), 70.0);
        assert_eq!(salary_match(Some(70.0), Some(80.0), 75.0), 95.0);
        assert_eq!(salary_match(Some(85.0), Some(95.0), 75.0), 85.0);
        assert_eq!(salary_match(Some(95.0), None, 75.0), 75.0);
        assert_eq!(salary_match(None, Some(150.0), 75.0), 60.0);
        assert_eq!(salary_match(Some(80.0), Some(90.0), 0.0), 60.0);
    }

    #[test]
    fn test_ranking_sorts_and_fills_defaults() {
        let listings = vec![
            listing("Poor fit", &["Cobol", "Fortran"], 200.0, 220.0),
            listing("Great fit", &["Python", "SQL", "AWS"], 70.0, 80.0),
            JobListing::default(),
        ];

        let ranked = rank_jobs(&listings, &analysis(), "Data Engineer", 75.0);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].job_title, "Great fit");
        assert!(ranked[0].match_score >= 93);
        assert!(ranked.iter().all(|m| (60..=95).contains(&m.match_score)));

        let filled = ranked.iter().find(|m| m.job_title == "Data Engineer Position").unwrap();
        assert_eq!(filled.company_name, "Company 3");
        assert_eq!(filled.salary_min, 55.0);
        assert_eq!(filled.salary_max, 95.0);
        assert_eq!(filled.location, "Remote");
        assert_eq!(filled.application_url, "#");
        assert_eq!(filled.required_skills, vec!["Python", "SQL", "AWS", "Docker"]);
        assert!(filled.match_reason.contains("4 years of experience"));
    }

    #[test]
    fn test_ranking_keeps_ten() {
        let listings: Vec<JobListing> = (0..14)
            .map(|i| listing(&format!("Job {}", i), &["Python"], 75.0, 75.0))
            .collect();
        assert_eq!(rank_jobs(&listings, &analysis(), "Analyst", 75.0).len(), 10);
    }

    #[test]
    fn test_salary_range_label() {
        let ranked = rank_jobs(&[listing("A", &[], 60.5, 90.0)], &analysis(), "Analyst", 75.0);
        assert_eq!(ranked[0].salary_range(), "$60.5-90/hr");
    }
}
