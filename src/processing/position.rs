//! Position-specific relevance analysis on a 1-10 scale

use crate::error::Result;
use crate::processing::data_science::{band, first_n, to_strings, EducationAssessment};
use crate::processing::keywords::{score_tiers, CategoryBreakdown, KeywordText, KeywordTiers};
use serde::{Deserialize, Serialize};

const TRANSFERABLE_KEYWORDS: &[&str] = &[
    "leadership", "management", "analysis", "problem solving", "communication",
    "project management", "team work", "customer service", "training",
];

const DEGREE_KEYWORDS: &[&str] = &[
    "bachelor", "master", "phd", "doctorate", "degree", "diploma", "certificate",
];

const POSITION_ALIASES: &[(&str, &str)] = &[
    ("software developer", "software engineer"),
    ("full stack developer", "software engineer"),
    ("frontend developer", "software engineer"),
    ("backend developer", "software engineer"),
    ("web developer", "software engineer"),
    ("data analyst", "data scientist"),
    ("ml engineer", "data scientist"),
    ("machine learning engineer", "data scientist"),
    ("product owner", "product manager"),
    ("digital marketing manager", "marketing manager"),
    ("marketing specialist", "marketing manager"),
    ("financial advisor", "financial analyst"),
    ("investment analyst", "financial analyst"),
    ("ui designer", "ux designer"),
    ("product designer", "ux designer"),
    ("sales representative", "sales manager"),
    ("account executive", "sales manager"),
];

/// Title words, essential skills and industry terms for unknown positions
const GENERIC_PATTERNS: &[(&[&str], &[&str], &[&str])] = &[
    (
        &["engineer", "developer", "programmer"],
        &["programming", "software development", "technical skills"],
        &["software development", "programming", "technical expertise"],
    ),
    (
        &["manager", "director", "lead"],
        &["leadership", "management", "strategy"],
        &["leadership", "team management", "strategic planning"],
    ),
    (
        &["analyst", "research"],
        &["analysis", "research", "data analysis"],
        &["analytical thinking", "research methodology", "data interpretation"],
    ),
];

const GENERIC_INDUSTRY: &[&str] = &["professional", "industry knowledge", "best practices"];
const NO_SKILLS: &[&str] = &[];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionAnalysis {
    pub overall_relevance_score: u8,
    pub position_title: String,
    pub key_strengths: Vec<String>,
    pub major_gaps: Vec<String>,
    pub irrelevant_elements: Vec<String>,
    pub improvement_recommendations: Vec<String>,
    pub job_readiness_assessment: String,
    pub technical_skills_breakdown: Vec<CategoryBreakdown>,
    pub experience_relevance: PositionExperience,
    pub education_assessment: EducationAssessment,
    pub industry_alignment: IndustryAlignment,
    pub ats_optimization: AtsOptimization,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionExperience {
    pub relevant_experience: Vec<String>,
    pub transferable_experience: Vec<String>,
    pub irrelevant_experience: Vec<String>,
    pub experience_score: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryAlignment {
    pub keywords: Vec<String>,
    pub certifications: Vec<String>,
    pub alignment_score: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsOptimization {
    pub suggestions: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub score: u8,
}

/// What a résumé is checked against for one position
#[derive(Debug, Clone, Default)]
pub struct PositionRequirements {
    pub technical: Vec<(String, KeywordTiers)>,
    pub experience_keywords: Vec<String>,
    pub education_fields: Vec<String>,
    pub industry_keywords: Vec<String>,
    pub certifications: Vec<String>,
    pub irrelevant_fields: Vec<String>,
}

impl PositionRequirements {
    fn known(
        technical: Vec<(&str, KeywordTiers)>,
        experience: &[&str],
        education: &[&str],
        industry: &[&str],
        certifications: &[&str],
        irrelevant: &[&str],
    ) -> Self {
        Self {
            technical: technical.into_iter().map(|(name, tiers)| (name.to_string(), tiers)).collect(),
            experience_keywords: to_strings(experience),
            education_fields: to_strings(education),
            industry_keywords: to_strings(industry),
            certifications: to_strings(certifications),
            irrelevant_fields: to_strings(irrelevant),
        }
    }

    /// Requirements for a normalised position title
    pub fn for_position(position: &str) -> Self {
        match position {
            "software engineer" => Self::known(
                vec![
                    ("programming", KeywordTiers::new(
                        &["javascript", "python", "java", "c++", "c#"],
                        &["typescript", "go", "rust", "kotlin", "swift"],
                        &["assembly", "scala", "haskell", "clojure"],
                    )),
                    ("frameworks", KeywordTiers::new(
                        &["react", "angular", "vue", "node.js", "express"],
                        &["spring", "django", "flask", "laravel", "rails"],
                        &["next.js", "nuxt.js", "fastapi", "nestjs"],
                    )),
                    ("tools", KeywordTiers::new(
                        &["git", "docker", "linux", "sql", "rest api"],
                        &["kubernetes", "aws", "azure", "jenkins", "webpack"],
                        &["terraform", "ansible", "prometheus", "grafana"],
                    )),
                    ("databases", KeywordTiers::new(
                        &["mysql", "postgresql", "mongodb"],
                        &["redis", "elasticsearch", "cassandra"],
                        &["neo4j", "influxdb", "dynamodb"],
                    )),
                ],
                &["software development", "programming", "coding", "application development", "system design", "api development", "full stack", "backend", "frontend"],
                &["computer science", "software engineering", "information technology", "computer engineering", "mathematics"],
                &["agile", "scrum", "ci/cd", "microservices", "scalability", "performance optimization", "code review", "testing", "debugging"],
                &["aws certified", "azure certified", "google cloud", "oracle certified", "microsoft certified"],
                &["interior design", "fashion", "culinary", "hospitality", "construction", "civil engineering", "mechanical engineering"],
            ),
            "data scientist" => Self::known(
                vec![
                    ("programming", KeywordTiers::new(
                        &["python", "r", "sql"],
                        &["scala", "java", "julia"],
                        &["matlab", "sas", "spark"],
                    )),
                    ("libraries", KeywordTiers::new(
                        &["pandas", "numpy", "scikit-learn", "matplotlib"],
                        &["tensorflow", "pytorch", "keras", "seaborn"],
                        &["xgboost", "lightgbm", "plotly", "bokeh"],
                    )),
                    ("tools", KeywordTiers::new(
                        &["jupyter", "git", "excel"],
                        &["tableau", "power bi", "aws", "docker"],
                        &["airflow", "mlflow", "kubeflow", "databricks"],
                    )),
                    ("statistics", KeywordTiers::new(
                        &["statistics", "probability", "hypothesis testing"],
                        &["regression", "classification", "clustering", "time series"],
                        &["bayesian statistics", "causal inference", "experimental design"],
                    )),
                ],
                &["data analysis", "machine learning", "statistical modeling", "data mining", "predictive analytics", "business intelligence", "research"],
                &["data science", "statistics", "mathematics", "computer science", "physics", "economics", "engineering"],
                &["machine learning", "deep learning", "neural networks", "feature engineering", "model validation", "a/b testing", "data visualization"],
                &["google data analytics", "ibm data science", "microsoft azure data scientist", "aws machine learning"],
                &["interior design", "fashion", "culinary", "hospitality", "construction", "retail sales"],
            ),
            "product manager" => Self::known(
                vec![
                    ("analytics", KeywordTiers::new(
                        &["google analytics", "mixpanel", "amplitude"],
                        &["tableau", "sql", "excel"],
                        &["python", "r", "looker"],
                    )),
                    ("tools", KeywordTiers::new(
                        &["jira", "confluence", "slack", "figma"],
                        &["miro", "notion", "asana", "trello"],
                        &["productboard", "pendo", "fullstory"],
                    )),
                    ("frameworks", KeywordTiers::new(
                        &["agile", "scrum", "kanban"],
                        &["lean startup", "design thinking", "jobs-to-be-done"],
                        &["okrs", "rice framework", "kano model"],
                    )),
                ],
                &["product management", "product strategy", "roadmap", "user research", "market analysis", "stakeholder management", "cross-functional"],
                &["business", "marketing", "computer science", "engineering", "economics", "psychology"],
                &["user experience", "product-market fit", "go-to-market", "customer journey", "mvp", "product lifecycle", "competitive analysis"],
                &["certified scrum product owner", "product management certificate", "google product management"],
                &["construction", "civil engineering", "mechanical engineering", "interior design"],
            ),
            "marketing manager" => Self::known(
                vec![
                    ("digital", KeywordTiers::new(
                        &["google analytics", "facebook ads", "google ads"],
                        &["hubspot", "mailchimp", "hootsuite", "canva"],
                        &["salesforce", "marketo", "pardot", "adobe creative suite"],
                    )),
                    ("analytics", KeywordTiers::new(
                        &["excel", "google sheets"],
                        &["tableau", "power bi", "sql"],
                        &["python", "r", "google data studio"],
                    )),
                    ("content", KeywordTiers::new(
                        &["content creation", "copywriting", "social media"],
                        &["seo", "sem", "email marketing", "video editing"],
                        &["graphic design", "photography", "influencer marketing"],
                    )),
                ],
                &["marketing", "digital marketing", "brand management", "campaign management", "lead generation", "content marketing", "social media marketing"],
                &["marketing", "business", "communications", "journalism", "advertising", "psychology"],
                &["brand awareness", "customer acquisition", "conversion rate", "roi", "kpi", "attribution", "funnel optimization"],
                &["google ads certified", "facebook blueprint", "hubspot certified", "google analytics certified"],
                &["construction", "civil engineering", "mechanical engineering", "culinary"],
            ),
            "financial analyst" => Self::known(
                vec![
                    ("software", KeywordTiers::new(
                        &["excel", "powerpoint", "word"],
                        &["bloomberg", "factset", "quickbooks", "sap"],
                        &["python", "r", "vba", "sql"],
                    )),
                    ("analysis", KeywordTiers::new(
                        &["financial modeling", "valuation", "budgeting", "forecasting"],
                        &["dcf", "comparable analysis", "sensitivity analysis"],
                        &["monte carlo", "options pricing", "risk modeling"],
                    )),
                    ("reporting", KeywordTiers::new(
                        &["financial statements", "variance analysis", "kpi reporting"],
                        &["dashboard creation", "data visualization"],
                        &["tableau", "power bi", "qlik"],
                    )),
                ],
                &["financial analysis", "investment analysis", "budgeting", "forecasting", "financial planning", "corporate finance", "investment banking"],
                &["finance", "accounting", "economics", "business", "mathematics", "statistics"],
                &["financial statements", "cash flow", "roi", "npv", "irr", "wacc", "ebitda", "financial ratios"],
                &["cfa", "frm", "cpa", "chartered financial analyst"],
                &["interior design", "fashion", "culinary", "hospitality", "construction"],
            ),
            "ux designer" => Self::known(
                vec![
                    ("design", KeywordTiers::new(
                        &["figma", "sketch", "adobe xd", "invision"],
                        &["photoshop", "illustrator", "principle", "framer"],
                        &["after effects", "cinema 4d", "blender"],
                    )),
                    ("research", KeywordTiers::new(
                        &["user research", "usability testing", "personas", "user journey mapping"],
                        &["a/b testing", "surveys", "interviews", "card sorting"],
                        &["eye tracking", "heat mapping", "analytics"],
                    )),
                    ("prototyping", KeywordTiers::new(
                        &["wireframing", "prototyping", "mockups"],
                        &["interactive prototypes", "design systems"],
                        &["html", "css", "javascript"],
                    )),
                ],
                &["ux design", "ui design", "user experience", "user interface", "interaction design", "visual design", "product design"],
                &["design", "human-computer interaction", "psychology", "computer science", "fine arts", "graphic design"],
                &["user-centered design", "design thinking", "accessibility", "responsive design", "information architecture", "usability"],
                &["google ux design certificate", "adobe certified expert", "ixdf certification"],
                &["construction", "civil engineering", "mechanical engineering", "culinary"],
            ),
            "sales manager" => Self::known(
                vec![
                    ("crm", KeywordTiers::new(
                        &["salesforce", "hubspot", "pipedrive"],
                        &["zoho", "microsoft dynamics", "freshsales"],
                        &["pardot", "marketo", "outreach"],
                    )),
                    ("analytics", KeywordTiers::new(
                        &["excel", "google sheets"],
                        &["tableau", "power bi", "google analytics"],
                        &["sql", "python", "r"],
                    )),
                    ("communication", KeywordTiers::new(
                        &["email marketing", "linkedin sales navigator", "zoom"],
                        &["slack", "microsoft teams", "calendly"],
                        &["video editing", "presentation software"],
                    )),
                ],
                &["sales", "business development", "account management", "lead generation", "client relations", "revenue growth", "territory management"],
                &["business", "marketing", "communications", "psychology", "economics"],
                &["quota attainment", "pipeline management", "closing ratio", "customer acquisition", "relationship building", "negotiation"],
                &["salesforce certified", "hubspot sales certification", "challenger sale"],
                &["construction", "civil engineering", "mechanical engineering", "interior design"],
            ),
            other => Self::generic(other),
        }
    }

    /// Requirements derived from the words of an unknown title
    fn generic(position: &str) -> Self {
        let words: Vec<&str> = position.split_whitespace().collect();

        let (essential, industry) = GENERIC_PATTERNS
            .iter()
            .find(|(triggers, _, _)| words.iter().any(|w| triggers.contains(w)))
            .map(|(_, essential, industry)| (*essential, *industry))
            .unwrap_or((NO_SKILLS, GENERIC_INDUSTRY));

        let mut experience_keywords = to_strings(&words);
        experience_keywords.push(position.to_string());
        experience_keywords.push("professional experience".to_string());

        Self {
            technical: vec![("core".to_string(), KeywordTiers::new(essential, &[], &[]))],
            experience_keywords,
            education_fields: to_strings(&["business", "relevant field", "bachelor degree"]),
            industry_keywords: to_strings(industry),
            certifications: to_strings(&["relevant certifications", "professional development"]),
            irrelevant_fields: to_strings(&["completely unrelated fields"]),
        }
    }
}

/// Map title variants onto the seven known positions
pub fn normalize_position(position: &str) -> String {
    let normalized = position.trim().to_lowercase();
    POSITION_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(normalized)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PositionAnalyzer;

impl PositionAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, resume_text: &str, target_position: &str) -> Result<PositionAnalysis> {
        let text = KeywordText::new(resume_text);
        let requirements = PositionRequirements::for_position(&normalize_position(target_position));

        let irrelevant = text.find_present(&requirements.irrelevant_fields)?;
        if irrelevant.len() > 2 {
            return Ok(irrelevant_analysis(irrelevant, target_position));
        }

        let breakdown = requirements
            .technical
            .iter()
            .map(|(name, tiers)| score_tiers(&text, name, tiers))
            .collect::<Result<Vec<_>>>()?;

        let relevant = text.find_present(&requirements.experience_keywords)?;
        let transferable: Vec<String> = TRANSFERABLE_KEYWORDS
            .iter()
            .filter(|k| text.any_word_contains(k))
            .map(|k| k.to_string())
            .collect();
        let experience = PositionExperience {
            experience_score: band(
                3 * relevant.len() as i32 + transferable.len() as i32 - 2 * irrelevant.len() as i32,
            ),
            relevant_experience: relevant,
            transferable_experience: transferable,
            irrelevant_experience: irrelevant.clone(),
        };

        let relevant_education = text.find_present(&requirements.education_fields)?;
        let degrees: Vec<String> = DEGREE_KEYWORDS
            .iter()
            .filter(|k| text.any_word_contains(k))
            .map(|k| k.to_string())
            .collect();
        let education = EducationAssessment {
            education_score: band(
                4 * relevant_education.len() as i32 + degrees.len() as i32 - 3 * irrelevant.len() as i32,
            ),
            relevant_education,
            supportive_education: degrees,
            irrelevant_education: irrelevant.clone(),
        };

        let industry_keywords = text.find_present(&requirements.industry_keywords)?;
        let certifications = text.find_present(&requirements.certifications)?;
        let industry = IndustryAlignment {
            alignment_score: band(2 * industry_keywords.len() as i32 + 3 * certifications.len() as i32),
            keywords: industry_keywords,
            certifications,
        };

        let ats = ats_optimization(&text, &requirements);
        let overall = overall_score(&breakdown, &experience, &education, &industry);

        Ok(PositionAnalysis {
            overall_relevance_score: overall,
            position_title: target_position.to_string(),
            key_strengths: key_strengths(&breakdown, &experience, &education, &industry, target_position),
            major_gaps: major_gaps(&breakdown, &experience, &education, target_position),
            irrelevant_elements: irrelevant
                .iter()
                .map(|field| format!("{} experience/background", field))
                .collect(),
            improvement_recommendations: recommendations(
                &breakdown,
                &experience,
                overall,
                target_position,
                &requirements,
            ),
            job_readiness_assessment: readiness(overall, target_position),
            technical_skills_breakdown: breakdown,
            experience_relevance: experience,
            education_assessment: education,
            industry_alignment: industry,
            ats_optimization: ats,
        })
    }
}

fn ats_optimization(text: &KeywordText, requirements: &PositionRequirements) -> AtsOptimization {
    let missing_keywords: Vec<String> = requirements
        .technical
        .iter()
        .flat_map(|(_, tiers)| tiers.essential.iter())
        .filter(|skill| !text.contains(skill))
        .cloned()
        .collect();

    let mut suggestions = Vec::new();
    if !missing_keywords.is_empty() {
        suggestions.push("Add missing technical keywords throughout resume".to_string());
        suggestions.push("Include relevant skills in a dedicated skills section".to_string());
    }

    if requirements.industry_keywords.iter().any(|k| !text.contains(k)) {
        suggestions.push("Incorporate industry-specific terminology".to_string());
        suggestions.push("Use action verbs relevant to the field".to_string());
    }

    AtsOptimization {
        score: 10u8.saturating_sub(missing_keywords.len().min(10) as u8),
        suggestions,
        missing_keywords,
    }
}

fn overall_score(
    breakdown: &[CategoryBreakdown],
    experience: &PositionExperience,
    education: &EducationAssessment,
    industry: &IndustryAlignment,
) -> u8 {
    let tech_avg = if breakdown.is_empty() {
        0.0
    } else {
        breakdown.iter().map(|c| c.score as f64).sum::<f64>() / breakdown.len() as f64
    };

    let weighted = tech_avg * 0.4
        + experience.experience_score as f64 * 0.3
        + education.education_score as f64 * 0.15
        + industry.alignment_score as f64 * 0.15;
    weighted.clamp(1.0, 10.0).round() as u8
}

fn key_strengths(
    breakdown: &[CategoryBreakdown],
    experience: &PositionExperience,
    education: &EducationAssessment,
    industry: &IndustryAlignment,
    position: &str,
) -> Vec<String> {
    let mut strengths: Vec<String> = breakdown
        .iter()
        .filter(|c| c.score >= 7 && !c.present.is_empty())
        .map(|c| format!("Strong {} skills for {}: {}", c.name, position, first_n(&c.present, 3)))
        .collect();

    if !experience.relevant_experience.is_empty() {
        strengths.push(format!(
            "Relevant {} experience: {}",
            position.to_lowercase(),
            first_n(&experience.relevant_experience, 3)
        ));
    }

    if !education.relevant_education.is_empty() {
        strengths.push(format!(
            "Educational background aligned with {}: {}",
            position,
            education.relevant_education.join(", ")
        ));
    }

    if !industry.certifications.is_empty() {
        strengths.push(format!("Industry certifications: {}", industry.certifications.join(", ")));
    }

    if strengths.is_empty() {
        strengths.push(format!("Limited strengths identified for {} role", position));
    }
    strengths
}

fn major_gaps(
    breakdown: &[CategoryBreakdown],
    experience: &PositionExperience,
    education: &EducationAssessment,
    position: &str,
) -> Vec<String> {
    let mut gaps: Vec<String> = breakdown
        .iter()
        .filter(|c| c.score < 5 && !c.missing.is_empty())
        .map(|c| format!("Missing {} skills for {}: {}", c.name, position, first_n(&c.missing, 3)))
        .collect();

    if experience.relevant_experience.is_empty() {
        gaps.push(format!("No direct {} experience demonstrated", position.to_lowercase()));
    }

    if education.relevant_education.is_empty() {
        gaps.push(format!(
            "Educational background not aligned with typical {} requirements",
            position
        ));
    }

    if gaps.is_empty() {
        gaps.push(format!(
            "Minor gaps in advanced {} specializations",
            position.to_lowercase()
        ));
    }
    gaps
}

fn recommendations(
    breakdown: &[CategoryBreakdown],
    experience: &PositionExperience,
    score: u8,
    position: &str,
    requirements: &PositionRequirements,
) -> Vec<String> {
    let lower = position.to_lowercase();

    if score <= 3 {
        return vec![
            format!("Complete comprehensive {} training program or degree", lower),
            format!("Learn core technical skills required for {} roles", position),
            "Gain relevant experience through internships or entry-level positions".to_string(),
            format!("Build a portfolio demonstrating {} capabilities", lower),
        ];
    }

    if score <= 6 {
        let mut recs: Vec<String> = breakdown
            .iter()
            .filter(|c| c.score < 6 && !c.missing.is_empty())
            .map(|c| {
                format!(
                    "Strengthen {} skills: focus on {}",
                    c.name,
                    c.missing.iter().take(2).cloned().collect::<Vec<_>>().join(" and ")
                )
            })
            .collect();

        if experience.relevant_experience.is_empty() {
            recs.push(format!(
                "Gain hands-on {} experience through projects or internships",
                lower
            ));
        }

        if !requirements.certifications.is_empty() {
            recs.push(format!(
                "Obtain relevant certifications: {}",
                first_n(&requirements.certifications, 2)
            ));
        }
        return recs;
    }

    vec![
        format!("Focus on advanced {} specializations", lower),
        "Contribute to industry projects or open-source initiatives".to_string(),
        "Pursue senior-level certifications and continuous learning".to_string(),
        format!("Build thought leadership in {} field", lower),
    ]
}

fn readiness(score: u8, position: &str) -> String {
    let lower = position.to_lowercase();
    match score {
        0..=2 => format!("NOT READY: Candidate lacks fundamental {} skills and knowledge. Requires 12-24 months of intensive training and education.", lower),
        3..=4 => format!("BEGINNER LEVEL: Some basic skills present but significant gaps remain. Suitable only for entry-level {} positions with extensive mentoring. Needs 6-12 months additional preparation.", lower),
        5..=6 => format!("JUNIOR READY: Has foundational skills but needs practical experience. Suitable for junior {} roles with supervision. Recommend 3-6 months focused skill development.", lower),
        7..=8 => format!("MID-LEVEL READY: Strong foundation with relevant experience. Ready for mid-level {} positions. Minor skill gaps can be addressed on the job.", lower),
        _ => format!("SENIOR READY: Excellent skills and experience. Ready for senior {} roles and can contribute immediately to complex projects.", lower),
    }
}

fn irrelevant_analysis(irrelevant: Vec<String>, position: &str) -> PositionAnalysis {
    let lower = position.to_lowercase();

    PositionAnalysis {
        overall_relevance_score: 1,
        position_title: position.to_string(),
        key_strengths: Vec::new(),
        major_gaps: vec![
            format!("No {} technical skills identified", lower),
            format!("No relevant analytical or professional experience for {}", position),
            format!("No educational background aligned with {} requirements", position),
            format!("Complete field mismatch for {} position", position),
            format!("Missing all core competencies required for {} roles", position),
        ],
        irrelevant_elements: irrelevant
            .iter()
            .map(|field| format!("Background in {} - not relevant to {}", field, position))
            .collect(),
        improvement_recommendations: vec![
            format!("Complete comprehensive {} training program or degree", lower),
            format!("Learn core technical skills required for {} positions", position),
            "Gain relevant experience through internships, projects, or entry-level roles in the field".to_string(),
            format!("Build a portfolio demonstrating {} capabilities", lower),
            format!("Obtain industry-relevant certifications for {}", position),
            "Consider career transition planning with professional guidance".to_string(),
        ],
        job_readiness_assessment: format!(
            "NOT READY: This resume shows no relevance to {} positions. Candidate needs extensive retraining and skill development before being considered for any {} role. Recommend 12-24 months of intensive study and practice in the field.",
            position, lower
        ),
        technical_skills_breakdown: vec![CategoryBreakdown {
            name: "core".to_string(),
            present: Vec::new(),
            missing: vec![format!("Core {} skills", position)],
            score: 0,
        }],
        experience_relevance: PositionExperience {
            irrelevant_experience: irrelevant.clone(),
            ..Default::default()
        },
        education_assessment: EducationAssessment {
            irrelevant_education: irrelevant,
            ..Default::default()
        },
        industry_alignment: IndustryAlignment::default(),
        ats_optimization: AtsOptimization {
            suggestions: vec![
                format!("Add {} keywords", lower),
                "Complete career transition first".to_string(),
            ],
            missing_keywords: vec![format!("{} skills", position), "Relevant experience".to_string()],
            score: 0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGINEER_RESUME: &str = "Software engineer focused on backend and frontend software development. \
        JavaScript, TypeScript, Python and Java. React, Node.js and Express services on Docker and Linux. \
        Git, SQL, REST API design, PostgreSQL, MongoDB, Redis. Agile, scrum, code review, testing and \
        microservices. BSc Computer Science degree. AWS Certified developer. Team leadership and training.";

    #[test]
    fn test_aliases_normalize() {
        assert_eq!(normalize_position("  Web Developer "), "software engineer");
        assert_eq!(normalize_position("Account Executive"), "sales manager");
        assert_eq!(normalize_position("Chief Gardener"), "chief gardener");
    }

    #[test]
    fn test_known_position_has_table_categories() {
        let requirements = PositionRequirements::for_position("software engineer");
        let names: Vec<&str> = requirements.technical.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["programming", "frameworks", "tools", "databases"]);
    }

    #[test]
    fn test_generic_requirements_follow_title_words() {
        let requirements = PositionRequirements::for_position("platform programmer");
        assert_eq!(requirements.technical[0].1.essential[0], "programming");
        assert!(requirements.experience_keywords.contains(&"platform programmer".to_string()));

        let lead = PositionRequirements::for_position("team lead");
        assert_eq!(lead.industry_keywords[1], "team management");

        let other = PositionRequirements::for_position("florist");
        assert!(other.technical[0].1.essential.is_empty());
    }

    #[test]
    fn test_engineer_resume_scores_in_range() {
        let analysis = PositionAnalyzer::new()
            .analyze(ENGINEER_RESUME, "Backend Developer")
            .unwrap();

        assert_eq!(analysis.position_title, "Backend Developer");
        assert!(analysis.overall_relevance_score >= 5, "score {}", analysis.overall_relevance_score);
        assert!(analysis.overall_relevance_score <= 10);
        assert!(analysis.industry_alignment.certifications.contains(&"aws certified".to_string()));
        assert!(analysis.ats_optimization.missing_keywords.contains(&"c++".to_string()));
        assert!(analysis.ats_optimization.score <= 10);
    }

    #[test]
    fn test_unrelated_background_short_circuits() {
        let analysis = PositionAnalyzer::new()
            .analyze("Construction foreman, civil engineering and hospitality work", "Software Engineer")
            .unwrap();

        assert_eq!(analysis.overall_relevance_score, 1);
        assert_eq!(analysis.irrelevant_elements.len(), 3);
        assert!(analysis.job_readiness_assessment.contains("software engineer role"));
        assert_eq!(analysis.ats_optimization.score, 0);
    }

    #[test]
    fn test_unknown_title_never_drops_below_one() {
        let analysis = PositionAnalyzer::new().analyze("Loves plants", "Florist").unwrap();
        assert_eq!(analysis.overall_relevance_score, 1);
        assert!(analysis.job_readiness_assessment.starts_with("NOT READY"));
        assert!(analysis.improvement_recommendations[0].contains("florist"));
    }
}
