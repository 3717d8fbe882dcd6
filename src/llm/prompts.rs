//! Prompt templates for résumé analysis and roadmap generation

use crate::processing::resume_analyzer::ResumeAnalysis;
use crate::processing::roadmap::{format_rate, Timeframe};
use serde::Serialize;

const RESUME_ANALYSIS_TEMPLATE: &str = r#"You are an expert career analyst. Analyze this resume for a "{field}" role targeting ${salary}/hour.

CRITICAL SCORING REQUIREMENT: If this resume shows expertise in a completely different field (e.g., construction/civil engineering for software roles, creative arts for finance, etc.), the match score MUST be below 25.

First, assess field relevance:
- 0-25: Completely irrelevant field (construction resume for data science, etc.)
- 26-50: Minimal relevance with some transferable skills
- 51-75: Moderate relevance with several matching qualifications
- 76-100: High relevance with strong alignment

RESUME:
{resume}

Provide a comprehensive analysis in this exact JSON format:
{
  "extractedSkills": {
    "technical": ["list all technical skills found"],
    "frameworks": ["list all frameworks/libraries found"],
    "tools": ["list all tools and software mentioned"],
    "languages": ["programming languages and spoken languages"]
  },
  "experienceYears": "estimated years of experience",
  "educationLevel": "highest education level",
  "certifications": ["list all certifications mentioned"],
  "matchScore": "percentage match for the target role (0-100)",
  "strengths": ["key strengths that align with the target role"],
  "gaps": [
    {
      "skill": "specific missing skill or qualification",
      "impact": "High|Medium|Low",
      "timeToAcquire": "realistic timeframe to acquire",
      "description": "detailed explanation of why this is important for the role"
    }
  ],
  "marketPosition": "assessment relative to market expectations for this role and salary"
}

Consider:
1. What does a "{field}" role typically require?
2. Is this resume from a completely different field? (If yes, score below 25)
3. How does this resume match the role requirements?
4. How realistic is the ${salary}/hour target for this profile?

Respond with the JSON object only."#;

const ROADMAP_TEMPLATE: &str = r#"Create a comprehensive {timeframe} career roadmap for a {field} professional targeting ${salary}/hour roles.

CURRENT PROFILE ANALYSIS:
- Skills: {skills}
- Experience: {years} years
- Current Match Score: {score}%
- Gaps: {gaps}
- Strengths: {strengths}
- Target: {field} at ${salary}/hour

Create a strategic roadmap to increase match probability to 85%+ with this JSON structure:
{
  "timeline": "{timeframe}",
  "phases": [
    {
      "phase": "Phase 1: Skill Foundation & Gap Closure (Month 1-2)",
      "goals": ["specific, measurable goals"],
      "actions": [
        {
          "action": "specific actionable step",
          "timeRequired": "realistic timeframe",
          "priority": "High",
          "resources": ["specific resources and tools"]
        }
      ]
    }
  ],
  "milestones": [
    {
      "milestone": "specific achievement",
      "deadline": "specific timeframe",
      "scoreImpact": "realistic improvement"
    }
  ],
  "estimatedImprovement": "total expected improvement (0-100)",
  "successProbability": "probability of achieving target (0-100)",
  "timeToTarget": "expected time to reach the target",
  "keySuccessFactors": ["critical success factors"]
}

Focus on:
1. Addressing specific skill gaps identified in the analysis
2. Building a strong portfolio and professional presence
3. Strategic job search and interview preparation
4. Realistic timelines and measurable outcomes

Respond with the JSON object only."#;

pub fn resume_analysis_prompt(resume_text: &str, target_field: &str, target_salary: f64) -> String {
    RESUME_ANALYSIS_TEMPLATE
        .replace("{field}", target_field)
        .replace("{salary}", &format_rate(target_salary))
        .replace("{resume}", resume_text)
}

pub fn roadmap_prompt(
    analysis: &ResumeAnalysis,
    target_field: &str,
    target_salary: f64,
    timeframe: Timeframe,
) -> String {
    ROADMAP_TEMPLATE
        .replace("{timeframe}", timeframe.as_str())
        .replace("{field}", target_field)
        .replace("{salary}", &format_rate(target_salary))
        .replace("{skills}", &to_json(&analysis.extracted_skills))
        .replace("{years}", &analysis.experience_years.to_string())
        .replace("{score}", &analysis.match_score.to_string())
        .replace("{gaps}", &to_json(&analysis.gaps))
        .replace("{strengths}", &to_json(&analysis.strengths))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::resume_analyzer::{Impact, SkillGap};

    #[test]
    fn test_analysis_prompt_states_relevance_rule() {
        let prompt = resume_analysis_prompt("Built bridges for 10 years", "Data Scientist", 85.0);
        assert!(prompt.contains("\"Data Scientist\" role targeting $85/hour"));
        assert!(prompt.contains("the match score MUST be below 25"));
        assert!(prompt.contains("0-25: Completely irrelevant field"));
        assert!(prompt.contains("Built bridges for 10 years"));
        assert!(!prompt.contains("{field}"));
    }

    #[test]
    fn test_roadmap_prompt_embeds_profile() {
        let analysis = ResumeAnalysis {
            experience_years: 4,
            match_score: 62,
            strengths: vec!["SQL".to_string()],
            gaps: vec![SkillGap {
                skill: "Docker".to_string(),
                impact: Impact::Medium,
                time_to_acquire: "1 month".to_string(),
                description: None,
            }],
            ..Default::default()
        };

        let prompt = roadmap_prompt(&analysis, "Backend Developer", 72.5, Timeframe::ThreeMonth);
        assert!(prompt.starts_with("Create a comprehensive 3-month career roadmap for a Backend Developer"));
        assert!(prompt.contains("$72.5/hour"));
        assert!(prompt.contains("- Experience: 4 years"));
        assert!(prompt.contains("- Current Match Score: 62%"));
        assert!(prompt.contains("\"skill\":\"Docker\""));
        assert!(prompt.contains("\"timeline\": \"3-month\""));
    }
}
