//! Career roadmap records and the template generator

use crate::processing::resume_analyzer::{lenient_percent, ResumeAnalysis};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "3-month")]
    ThreeMonth,
    #[default]
    #[serde(rename = "6-month")]
    SixMonth,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::ThreeMonth => "3-month",
            Timeframe::SixMonth => "6-month",
        }
    }

    pub fn weeks(&self) -> u32 {
        match self {
            Timeframe::ThreeMonth => 12,
            Timeframe::SixMonth => 24,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "3-month" | "3" | "three" => Ok(Timeframe::ThreeMonth),
            "6-month" | "6" | "six" => Ok(Timeframe::SixMonth),
            other => Err(format!("unknown timeframe '{}', expected 3-month or 6-month", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoadmapAction {
    pub action: String,
    pub time_required: String,
    pub priority: String,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoadmapPhase {
    pub phase: String,
    pub goals: Vec<String>,
    pub actions: Vec<RoadmapAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Milestone {
    pub milestone: String,
    pub deadline: String,
    pub score_impact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoadmapData {
    pub timeline: Timeframe,
    pub phases: Vec<RoadmapPhase>,
    pub milestones: Vec<Milestone>,
    #[serde(deserialize_with = "lenient_percent")]
    pub estimated_improvement: u8,
    #[serde(deserialize_with = "lenient_percent")]
    pub success_probability: u8,
    pub time_to_target: String,
    pub key_success_factors: Vec<String>,
}

impl RoadmapData {
    /// Pin the requested timeline and fill fields a model reply may leave out
    pub fn with_defaults_from(mut self, timeframe: Timeframe) -> Self {
        self.timeline = timeframe;
        if self.time_to_target.trim().is_empty() {
            self.time_to_target = format!("{} weeks", timeframe.weeks());
        }
        self
    }
}

/// Hourly rate without a trailing `.0` for whole numbers
pub fn format_rate(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{:.0}", rate)
    } else {
        format!("{}", rate)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn action(action: impl Into<String>, time_required: &str, priority: &str, resources: &[&str]) -> RoadmapAction {
    RoadmapAction {
        action: action.into(),
        time_required: time_required.to_string(),
        priority: priority.to_string(),
        resources: strings(resources),
    }
}

fn milestone(milestone: impl Into<String>, deadline: &str, score_impact: &str) -> Milestone {
    Milestone {
        milestone: milestone.into(),
        deadline: deadline.to_string(),
        score_impact: score_impact.to_string(),
    }
}

/// Three-phase roadmap built from fixed templates and the analysis gaps
#[derive(Debug, Default, Clone, Copy)]
pub struct RoadmapGenerator;

impl RoadmapGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(
        &self,
        analysis: &ResumeAnalysis,
        target_field: &str,
        target_salary: f64,
        timeframe: Timeframe,
    ) -> RoadmapData {
        let priority_gaps = if analysis.gaps.is_empty() {
            "your priority skill gaps".to_string()
        } else {
            analysis
                .gaps
                .iter()
                .take(2)
                .map(|g| g.skill.as_str())
                .collect::<Vec<_>>()
                .join(" and ")
        };

        let gap_actions = analysis
            .gaps
            .iter()
            .take(3)
            .map(|gap| {
                action(
                    format!("Complete comprehensive {} training and certification", gap.skill),
                    &gap.time_to_acquire,
                    &gap.impact.to_string(),
                    &[
                        "Premium online courses (Coursera, Udemy, Pluralsight)",
                        "Official documentation and tutorials",
                        "Hands-on practice projects",
                        "Industry mentorship programs",
                    ],
                )
            })
            .collect();

        let foundation = RoadmapPhase {
            phase: "Phase 1: Skill Foundation & Gap Closure (Month 1-2)".to_string(),
            goals: vec![
                format!("Master {} to close critical gaps", priority_gaps),
                format!("Build 2-3 portfolio projects demonstrating {} expertise", target_field),
                "Establish strong LinkedIn presence and professional network".to_string(),
                "Complete industry-relevant certifications to boost credibility".to_string(),
            ],
            actions: gap_actions,
        };

        let advanced = RoadmapPhase {
            phase: "Phase 2: Advanced Skill Development & Portfolio Building (Month 3-4)".to_string(),
            goals: vec![
                format!("Achieve advanced proficiency in {} core technologies", target_field),
                "Create impressive portfolio showcasing real-world problem solving".to_string(),
                "Build professional network within target industry".to_string(),
                "Start contributing to open-source projects for visibility".to_string(),
            ],
            actions: vec![
                action(
                    format!("Complete advanced {} specialization and obtain industry certifications", target_field),
                    "6-8 weeks",
                    "High",
                    &[
                        "Advanced certification programs (AWS, Google Cloud, Microsoft)",
                        "Hands-on labs and real-world projects",
                        "Professional study groups and bootcamps",
                        "Industry conferences and workshops",
                    ],
                ),
                action(
                    "Develop 3-4 comprehensive portfolio projects with real business impact",
                    "6-8 weeks",
                    "High",
                    &[
                        "GitHub for version control and showcase",
                        "Professional portfolio website",
                        "Comprehensive project documentation",
                        "Video demonstrations and case studies",
                    ],
                ),
                action(
                    "Establish thought leadership through content creation",
                    "4 weeks",
                    "Medium",
                    &[
                        "LinkedIn articles and posts",
                        "Technical blog writing",
                        "Speaking at local meetups",
                        "Podcast appearances or hosting",
                    ],
                ),
            ],
        };

        let positioning = RoadmapPhase {
            phase: "Phase 3: Market Positioning & Job Search Optimization (Month 5-6)".to_string(),
            goals: strings(&[
                "Position yourself as a top-tier candidate in the market",
                "Launch strategic job search targeting premium opportunities",
                "Master technical interviews and salary negotiations",
                "Secure multiple job offers at target salary range",
            ]),
            actions: vec![
                action(
                    "Professional resume and LinkedIn optimization with ATS compatibility",
                    "2 weeks",
                    "High",
                    &[
                        "Professional resume writing services",
                        "ATS optimization tools and keywords",
                        "LinkedIn profile optimization",
                        "Professional headshots and branding",
                    ],
                ),
                action(
                    "Master technical interviews, system design, and behavioral questions",
                    "6 weeks",
                    "High",
                    &[
                        "LeetCode Premium and HackerRank",
                        "Mock interviews with industry professionals",
                        "System design interview preparation",
                        "Behavioral interview coaching and STAR method",
                    ],
                ),
                action(
                    "Strategic job applications and networking outreach",
                    "4 weeks",
                    "High",
                    &[
                        "Premium job boards and company research",
                        "Professional networking events",
                        "Recruiter relationship building",
                        "Salary negotiation coaching",
                    ],
                ),
            ],
        };

        let first_gap = analysis
            .gaps
            .first()
            .map(|g| g.skill.as_str())
            .unwrap_or("primary skill gap");

        let milestones = vec![
            milestone(format!("Master {} and complete certification", first_gap), "Week 6", "+20%"),
            milestone("Launch professional portfolio website with 3+ projects", "Week 10", "+15%"),
            milestone("Complete advanced specialization and industry recognition", "Week 16", "+25%"),
            milestone("Launch strategic job search with optimized materials", "Week 20", "+10%"),
            milestone(
                format!("Secure {} role at ${}+ per hour", target_field, format_rate(target_salary)),
                "Week 24",
                "+30%",
            ),
        ];

        let score = analysis.match_score.min(100);

        RoadmapData {
            timeline: timeframe,
            phases: vec![foundation, advanced, positioning],
            milestones,
            estimated_improvement: (100 - score).clamp(15, 45),
            success_probability: (score + 35).min(95),
            time_to_target: format!("{} weeks", timeframe.weeks()),
            key_success_factors: vec![
                format!("Consistent daily practice in {} technologies", target_field),
                "Building a strong professional network and personal brand".to_string(),
                "Focusing on high-impact projects that demonstrate business value".to_string(),
                "Continuous learning and staying updated with industry trends".to_string(),
            ],
        }
    }
}
