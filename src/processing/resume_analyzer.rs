//! Résumé analysis records and the offline heuristic analyzer

use crate::processing::keywords::{capitalize, KeywordText};
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractedSkills {
    pub technical: Vec<String>,
    pub frameworks: Vec<String>,
    pub tools: Vec<String>,
    pub languages: Vec<String>,
}

impl ExtractedSkills {
    /// Technical, framework and tool skills, lowercased
    pub fn comparable(&self) -> Vec<String> {
        self.technical
            .iter()
            .chain(&self.frameworks)
            .chain(&self.tools)
            .map(|s| s.to_lowercase())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    #[serde(alias = "high", alias = "HIGH")]
    High,
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "low", alias = "LOW")]
    Low,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Impact::High => "High",
            Impact::Medium => "Medium",
            Impact::Low => "Low",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGap {
    pub skill: String,
    pub impact: Impact,
    pub time_to_acquire: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeAnalysis {
    pub extracted_skills: ExtractedSkills,
    #[serde(deserialize_with = "lenient_count")]
    pub experience_years: u32,
    pub education_level: String,
    pub certifications: Vec<String>,
    #[serde(deserialize_with = "lenient_percent")]
    pub match_score: u8,
    pub strengths: Vec<String>,
    pub gaps: Vec<SkillGap>,
    pub market_position: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    /// The first number found; text such as "5+ years" reads as 5
    fn value(self) -> f64 {
        match self {
            LooseNumber::Number(n) => n,
            LooseNumber::Text(text) => Regex::new(r"-?\d+(\.\d+)?")
                .ok()
                .and_then(|re| re.find(&text).and_then(|m| m.as_str().parse().ok()))
                .unwrap_or(0.0),
        }
    }
}

pub(crate) fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u32, D::Error> {
    let value = LooseNumber::deserialize(deserializer)?.value();
    Ok(value.max(0.0).round() as u32)
}

pub(crate) fn lenient_percent<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u8, D::Error> {
    let value = LooseNumber::deserialize(deserializer)?.value();
    Ok(value.clamp(0.0, 100.0).round() as u8)
}

const TECH_KEYWORDS: &[&str] = &[
    "javascript", "python", "java", "react", "node", "sql", "aws", "docker", "kubernetes", "git",
];
const FRAMEWORK_KEYWORDS: &[&str] = &[
    "react", "angular", "vue", "express", "django", "spring", "laravel", "rails",
];
const TOOL_KEYWORDS: &[&str] = &[
    "git", "docker", "jenkins", "jira", "figma", "photoshop", "excel", "tableau",
];
const LANGUAGE_KEYWORDS: &[&str] = &["english", "spanish", "french", "german", "chinese", "japanese"];

const EXPERIENCE_INDICATORS: &[&str] = &["years", "experience", "senior", "lead", "manager", "director"];

const FIELD_KEYWORDS: &[(&str, &[&str])] = &[
    ("data", &["data", "analytics", "python", "sql", "tableau", "statistics", "machine", "learning", "pandas", "numpy", "visualization"]),
    ("software", &["software", "programming", "javascript", "react", "node", "java", "python", "git", "api", "database", "frontend", "backend"]),
    ("developer", &["developer", "programming", "javascript", "react", "node", "java", "python", "git", "api", "database", "frontend", "backend"]),
    ("engineer", &["engineer", "programming", "javascript", "react", "node", "java", "python", "git", "api", "database", "system", "architecture"]),
    ("product", &["product", "management", "roadmap", "agile", "scrum", "stakeholder", "strategy", "user", "requirements", "analytics"]),
    ("marketing", &["marketing", "digital", "seo", "content", "social", "campaign", "analytics", "brand", "advertising", "email"]),
    ("design", &["design", "ux", "ui", "figma", "sketch", "adobe", "prototype", "wireframe", "user", "interface", "visual"]),
    ("finance", &["finance", "financial", "accounting", "excel", "modeling", "budget", "analysis", "investment", "accounting", "reporting"]),
    ("sales", &["sales", "business", "development", "crm", "salesforce", "lead", "negotiation", "account", "revenue", "client"]),
];

const IRRELEVANT_FIELDS: &[(&str, &[&str])] = &[
    ("data", &["construction", "civil", "mechanical", "electrical", "plumbing", "carpentry", "welding", "painting", "interior", "architecture"]),
    ("software", &["construction", "civil", "mechanical", "plumbing", "carpentry", "welding", "painting", "interior", "chef", "cooking"]),
    ("developer", &["construction", "civil", "mechanical", "plumbing", "carpentry", "welding", "painting", "interior", "chef", "cooking"]),
    ("engineer", &["chef", "cooking", "painting", "interior", "fashion", "retail", "hospitality", "restaurant"]),
    ("product", &["construction", "civil", "mechanical", "plumbing", "carpentry", "welding", "chef", "cooking"]),
    ("marketing", &["construction", "civil", "mechanical", "plumbing", "carpentry", "welding", "programming", "coding"]),
    ("design", &["construction", "civil", "mechanical", "plumbing", "carpentry", "welding", "programming", "coding"]),
    ("finance", &["construction", "civil", "mechanical", "plumbing", "carpentry", "welding", "programming", "coding"]),
    ("sales", &["construction", "civil", "mechanical", "plumbing", "carpentry", "welding", "programming", "coding"]),
];

const MAX_GAPS: usize = 3;
const MAX_STRENGTHS: usize = 5;

/// Keyword-table résumé scorer used when no language model is available
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicAnalyzer;

impl HeuristicAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze<R: Rng + ?Sized>(
        &self,
        resume_text: &str,
        target_field: &str,
        target_salary: f64,
        rng: &mut R,
    ) -> ResumeAnalysis {
        let text = KeywordText::new(resume_text);
        let field = target_field.to_lowercase();

        let relevance = self.field_relevance(&text, &field, rng);

        let technical = Self::skills_from(&text, TECH_KEYWORDS);
        let frameworks = Self::skills_from(&text, FRAMEWORK_KEYWORDS);
        let tools = Self::skills_from(&text, TOOL_KEYWORDS);
        let languages = Self::skills_from(&text, LANGUAGE_KEYWORDS);

        let indicator_hits: usize = EXPERIENCE_INDICATORS
            .iter()
            .map(|indicator| text.words_containing(indicator) * 2)
            .sum();
        let experience_years = (2 + indicator_hits).clamp(1, 10) as u32;

        let field_matches: usize = field
            .split_whitespace()
            .map(|keyword| text.words_containing(keyword) * 10)
            .sum();

        let base_score =
            (relevance + field_matches as f64 + technical.len() as f64 * 2.0).clamp(15.0, 95.0);
        let salary_adjustment = if target_salary > 100.0 {
            -10.0
        } else if target_salary < 50.0 {
            10.0
        } else {
            0.0
        };
        let match_score = (base_score + salary_adjustment).clamp(15.0, 95.0).round() as u8;

        let education_level = if text.any_word_contains("master") || text.any_word_contains("mba") {
            "Masters"
        } else if text.any_word_contains("bachelor") || text.any_word_contains("degree") {
            "Bachelors"
        } else {
            "High School"
        };

        let certifications = text
            .words()
            .iter()
            .filter(|w| w.contains("certified") || w.contains("certification"))
            .take(3)
            .cloned()
            .collect();

        let gaps = field_specific_gaps(&field, &technical, &frameworks);
        let strengths = field_strengths(target_field, technical.len(), experience_years);

        ResumeAnalysis {
            extracted_skills: ExtractedSkills {
                technical: or_default(technical, &["JavaScript", "HTML", "CSS"]),
                frameworks: or_default(frameworks, &["React"]),
                tools: or_default(tools, &["Git", "VS Code"]),
                languages: or_default(languages, &["English"]),
            },
            experience_years,
            education_level: education_level.to_string(),
            certifications,
            match_score,
            strengths,
            gaps,
            market_position: market_position(match_score).to_string(),
        }
    }

    /// Relevance of the résumé to the field, roughly 5 to 95
    fn field_relevance<R: Rng + ?Sized>(&self, text: &KeywordText, field: &str, rng: &mut R) -> f64 {
        let jitter = rng.gen::<f64>() * 20.0;

        let irrelevant_hits = text.total_word_hits(irrelevant_fields_for(field));
        if irrelevant_hits > 5 {
            return 5.0 + jitter;
        }

        let relevant_hits = match field_keywords_for(field) {
            Some(keywords) => text.total_word_hits(keywords),
            None => text.total_word_hits(&field.split_whitespace().collect::<Vec<_>>()),
        };

        let floor = match relevant_hits {
            h if h > 15 => 75.0,
            h if h > 10 => 55.0,
            h if h > 5 => 35.0,
            _ => 15.0,
        };
        floor + jitter
    }

    fn skills_from(text: &KeywordText, table: &[&str]) -> Vec<String> {
        table
            .iter()
            .filter(|skill| text.any_word_contains(skill))
            .map(|skill| capitalize(skill))
            .collect()
    }
}

fn field_keywords_for(field: &str) -> Option<&'static [&'static str]> {
    FIELD_KEYWORDS
        .iter()
        .find(|(key, _)| field.contains(key))
        .map(|(_, keywords)| *keywords)
}

fn irrelevant_fields_for(field: &str) -> &'static [&'static str] {
    IRRELEVANT_FIELDS
        .iter()
        .find(|(key, _)| field.contains(key))
        .map(|(_, fields)| *fields)
        .unwrap_or(&[])
}

fn or_default(found: Vec<String>, fallback: &[&str]) -> Vec<String> {
    if found.is_empty() {
        fallback.iter().map(|s| s.to_string()).collect()
    } else {
        found
    }
}

pub fn market_position(match_score: u8) -> &'static str {
    if match_score > 80 {
        "Excellent"
    } else if match_score > 60 {
        "Good"
    } else {
        "Needs Improvement"
    }
}

fn gap(skill: &str, impact: Impact, time_to_acquire: &str, description: &str) -> SkillGap {
    SkillGap {
        skill: skill.to_string(),
        impact,
        time_to_acquire: time_to_acquire.to_string(),
        description: Some(description.to_string()),
    }
}

fn field_specific_gaps(field: &str, technical: &[String], frameworks: &[String]) -> Vec<SkillGap> {
    let mut gaps = Vec::new();

    if field.contains("developer") || field.contains("engineer") {
        if !technical.iter().any(|s| s.to_lowercase().contains("cloud")) {
            gaps.push(gap(
                "Cloud Computing (AWS/Azure)",
                Impact::High,
                "2-3 months",
                "Cloud skills are essential for modern development roles and significantly increase market value.",
            ));
        }
        if !frameworks.iter().any(|f| f.to_lowercase().contains("react")) {
            gaps.push(gap(
                "Modern Frontend Framework",
                Impact::High,
                "1-2 months",
                "React, Vue, or Angular knowledge is crucial for frontend development positions.",
            ));
        }
    }

    if field.contains("data") || field.contains("analyst") {
        gaps.push(gap(
            "Advanced SQL & Database Design",
            Impact::High,
            "1-2 months",
            "Advanced database skills are fundamental for data roles and analytics positions.",
        ));
        gaps.push(gap(
            "Python for Data Science",
            Impact::High,
            "2-3 months",
            "Python with pandas, numpy, and scikit-learn is essential for data analysis roles.",
        ));
    }

    if field.contains("product") || field.contains("manager") {
        gaps.push(gap(
            "Agile/Scrum Certification",
            Impact::Medium,
            "2-4 weeks",
            "Agile methodologies are standard in product management and team leadership roles.",
        ));
    }

    gaps.truncate(MAX_GAPS);
    gaps
}

fn field_strengths(target_field: &str, skill_count: usize, experience_years: u32) -> Vec<String> {
    let mut strengths = Vec::new();

    if experience_years > 5 {
        strengths.push(format!(
            "{}+ years of proven industry experience with demonstrated impact",
            experience_years
        ));
    }

    if skill_count > 5 {
        strengths.push(format!(
            "Versatile technical foundation spanning {} core technologies and frameworks",
            skill_count
        ));
    }

    let field = target_field.to_lowercase();
    let pair: [String; 2] = if field.contains("developer") || field.contains("engineer") {
        [
            "Strong problem-solving abilities with hands-on development experience".into(),
            "Technical architecture understanding and code quality focus".into(),
        ]
    } else if field.contains("data") {
        [
            "Analytical mindset with quantitative problem-solving approach".into(),
            "Experience with data interpretation and insight generation".into(),
        ]
    } else if field.contains("product") || field.contains("manager") {
        [
            "Strategic thinking with user-focused product development approach".into(),
            "Cross-functional collaboration and stakeholder management experience".into(),
        ]
    } else {
        [
            format!("Solid foundation in {} domain knowledge and best practices", target_field),
            "Adaptable professional with continuous learning mindset".into(),
        ]
    };
    strengths.extend(pair);

    if field.contains("senior") || field.contains("lead") {
        strengths.push("Leadership readiness with mentoring and team guidance capabilities".to_string());
    }

    strengths.truncate(MAX_STRENGTHS);
    strengths
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DEVELOPER_RESUME: &str = "Senior Software Developer with 8 years experience. \
        JavaScript, Python, React, Node, SQL, AWS, Docker and Git. \
        Built backend APIs and frontend apps with Express and Django. \
        Bachelor degree in Computer Science. AWS certified. Fluent English and Spanish.";

    const CONSTRUCTION_RESUME: &str = "Construction site supervisor. Civil works, mechanical \
        installs, plumbing and carpentry crews. Welding certified. Construction safety lead. \
        Civil engineering projects and mechanical maintenance.";

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_developer_resume_scores_well() {
        let analysis = HeuristicAnalyzer::new().analyze(DEVELOPER_RESUME, "Software Developer", 75.0, &mut rng());

        assert!(analysis.match_score >= 60, "score was {}", analysis.match_score);
        assert!(analysis.match_score <= 95);
        assert!(analysis.extracted_skills.technical.contains(&"Python".to_string()));
        assert!(analysis.extracted_skills.frameworks.contains(&"Express".to_string()));
        assert_eq!(analysis.extracted_skills.languages, vec!["English", "Spanish"]);
        assert_eq!(analysis.education_level, "Bachelors");
        assert_eq!(analysis.certifications, vec!["certified."]);
        assert!(analysis.experience_years >= 1 && analysis.experience_years <= 10);
    }

    #[test]
    fn test_irrelevant_resume_scores_low() {
        let analysis = HeuristicAnalyzer::new().analyze(CONSTRUCTION_RESUME, "Data Scientist", 75.0, &mut rng());
        assert!(analysis.match_score <= 35, "score was {}", analysis.match_score);
        assert_eq!(analysis.market_position, "Needs Improvement");
    }

    #[test]
    fn test_empty_skill_lists_fall_back_to_defaults() {
        let analysis = HeuristicAnalyzer::new().analyze("Friendly and punctual", "Barista", 20.0, &mut rng());
        let skills = &analysis.extracted_skills;

        assert_eq!(skills.technical, vec!["JavaScript", "HTML", "CSS"]);
        assert_eq!(skills.frameworks, vec!["React"]);
        assert_eq!(skills.tools, vec!["Git", "VS Code"]);
        assert_eq!(skills.languages, vec!["English"]);
        assert_eq!(analysis.education_level, "High School");
        assert!(analysis.gaps.is_empty());
    }

    #[test]
    fn test_salary_adjustment_lowers_high_targets() {
        let low = HeuristicAnalyzer::new().analyze(DEVELOPER_RESUME, "Sales", 75.0, &mut rng());
        let high = HeuristicAnalyzer::new().analyze(DEVELOPER_RESUME, "Sales", 150.0, &mut rng());
        assert!(high.match_score <= low.match_score);
    }

    #[test]
    fn test_gaps_are_capped_at_three() {
        let analysis = HeuristicAnalyzer::new().analyze("notes", "Data Engineer Manager", 75.0, &mut rng());
        assert_eq!(analysis.gaps.len(), 3);
        assert_eq!(analysis.gaps[0].skill, "Cloud Computing (AWS/Azure)");
        assert_eq!(analysis.gaps[2].skill, "Advanced SQL & Database Design");
    }

    #[test]
    fn test_senior_field_adds_leadership_strength() {
        let analysis = HeuristicAnalyzer::new().analyze(DEVELOPER_RESUME, "Senior Engineer", 75.0, &mut rng());
        assert!(analysis.strengths.len() <= 5);
        assert!(analysis
            .strengths
            .iter()
            .any(|s| s.starts_with("Leadership readiness")));
    }

    #[test]
    fn test_market_position_bands() {
        assert_eq!(market_position(81), "Excellent");
        assert_eq!(market_position(80), "Good");
        assert_eq!(market_position(60), "Needs Improvement");
    }

    #[test]
    fn test_model_reply_with_string_numbers_parses() {
        let json = r#"{
            "extractedSkills": {"technical": ["Rust"], "frameworks": [], "tools": [], "languages": []},
            "experienceYears": "5+ years",
            "educationLevel": "Masters",
            "certifications": [],
            "matchScore": "140",
            "strengths": ["Systems work"],
            "gaps": [{"skill": "Kubernetes", "impact": "medium", "timeToAcquire": "1 month"}],
            "marketPosition": "Strong"
        }"#;

        let analysis: ResumeAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.experience_years, 5);
        assert_eq!(analysis.match_score, 100);
        assert_eq!(analysis.gaps[0].impact, Impact::Medium);
        assert!(analysis.gaps[0].description.is_none());
    }
}
