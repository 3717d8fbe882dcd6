//! Mock job listings and salary bands used when the listings API is unavailable

use crate::jobs::{JobListing, JobSearchParams, SalaryBand, SalaryData, SalaryRanges};

const LOCATIONS: [&str; 3] = ["Remote", "San Francisco, CA", "New York, NY"];
const POSTED: [&str; 3] = ["2 days ago", "1 week ago", "4 days ago"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobFamily {
    Data,
    Development,
    Product,
    General,
}

impl JobFamily {
    /// First family whose words appear in the field wins
    pub fn classify(field: &str) -> Self {
        let field = field.to_lowercase();
        let any = |words: &[&str]| words.iter().any(|w| field.contains(w));

        if any(&["data", "analyst", "scientist"]) {
            JobFamily::Data
        } else if any(&["developer", "engineer", "software"]) {
            JobFamily::Development
        } else if any(&["product", "manager"]) {
            JobFamily::Product
        } else {
            JobFamily::General
        }
    }

    fn templates(self) -> [Template; 3] {
        match self {
            JobFamily::Data => [
                Template {
                    title: "Senior Data Analyst",
                    company: "DataTech Solutions",
                    description: "We're seeking an experienced Data Analyst to join our analytics team. You'll work with large datasets, build predictive models, and drive data-driven decision making across the organization.",
                    skills: &["Python", "SQL", "Machine Learning", "Pandas", "NumPy", "Tableau", "AWS"],
                    salary_adjustment: 10.0,
                },
                Template {
                    title: "Lead Data Analyst",
                    company: "AI Innovations Inc",
                    description: "Lead our data science initiatives and mentor junior team members. Work on cutting-edge ML projects with real business impact.",
                    skills: &["Python", "TensorFlow", "PyTorch", "SQL", "Docker", "Kubernetes", "GCP"],
                    salary_adjustment: 20.0,
                },
                Template {
                    title: "Data Analyst - Remote",
                    company: "Global Analytics Corp",
                    description: "Remote opportunity to work with international datasets and build scalable analytics solutions.",
                    skills: &["R", "Python", "SQL", "Spark", "Hadoop", "Visualization", "Statistics"],
                    salary_adjustment: 5.0,
                },
            ],
            JobFamily::Development => [
                Template {
                    title: "Senior Software Engineer",
                    company: "TechFlow Systems",
                    description: "Join our engineering team building scalable web applications. Work with modern technologies and contribute to architecture decisions.",
                    skills: &["JavaScript", "React", "Node.js", "TypeScript", "AWS", "Docker", "PostgreSQL"],
                    salary_adjustment: 15.0,
                },
                Template {
                    title: "Full Stack Developer",
                    company: "Innovation Labs",
                    description: "Full-stack development role working on next-generation SaaS products. Great opportunity for growth and learning.",
                    skills: &["React", "Python", "Django", "PostgreSQL", "Redis", "Celery", "AWS"],
                    salary_adjustment: 10.0,
                },
                Template {
                    title: "Lead Software Engineer",
                    company: "Startup Unicorn",
                    description: "Lead engineering initiatives at a fast-growing startup. Equity package and opportunity to shape technical direction.",
                    skills: &["Microservices", "Kubernetes", "Go", "React", "PostgreSQL", "Redis", "GCP"],
                    salary_adjustment: 25.0,
                },
            ],
            JobFamily::Product => [
                Template {
                    title: "Senior Product Manager",
                    company: "Product Excellence Co",
                    description: "Drive product strategy and roadmap for our flagship products. Work closely with engineering and design teams.",
                    skills: &["Product Strategy", "Agile", "Scrum", "Analytics", "User Research", "Roadmapping"],
                    salary_adjustment: 12.0,
                },
                Template {
                    title: "Product Manager - Growth",
                    company: "Scale Ventures",
                    description: "Focus on growth initiatives and user acquisition strategies. Data-driven approach to product development.",
                    skills: &["Growth Hacking", "A/B Testing", "Analytics", "SQL", "Product Marketing", "UX"],
                    salary_adjustment: 8.0,
                },
                Template {
                    title: "Lead Product Manager",
                    company: "Enterprise Solutions",
                    description: "Lead product management for enterprise B2B solutions. Strategic role with high impact and visibility.",
                    skills: &["B2B Products", "Enterprise Sales", "Roadmapping", "Stakeholder Management", "Strategy"],
                    salary_adjustment: 18.0,
                },
            ],
            JobFamily::General => [
                Template {
                    title: "Senior Professional",
                    company: "Professional Services Inc",
                    description: "Exciting opportunity to work with a growing team and excellent benefits.",
                    skills: &["Communication", "Problem Solving", "Leadership", "Project Management"],
                    salary_adjustment: 10.0,
                },
                Template {
                    title: "Industry Specialist",
                    company: "Industry Leaders LLC",
                    description: "Specialized role with opportunities for professional development.",
                    skills: &["Expertise", "Analysis", "Strategy", "Implementation"],
                    salary_adjustment: 5.0,
                },
                Template {
                    title: "Team Lead",
                    company: "Growth Company",
                    description: "Leadership role with opportunity to build and mentor a team.",
                    skills: &["Leadership", "Strategy", "Team Building", "Process Improvement"],
                    salary_adjustment: 15.0,
                },
            ],
        }
    }
}

struct Template {
    title: &'static str,
    company: &'static str,
    description: &'static str,
    skills: &'static [&'static str],
    salary_adjustment: f64,
}

/// Three listings for the field's family, salaries anchored on the requested minimum
pub fn mock_jobs(params: &JobSearchParams) -> Vec<JobListing> {
    let requested = params.salary_min.filter(|s| *s > 0.0).unwrap_or(50.0);
    let base = requested.max(60.0);

    JobFamily::classify(&params.field)
        .templates()
        .into_iter()
        .enumerate()
        .map(|(index, template)| {
            let salary_min = base + template.salary_adjustment;
            JobListing {
                id: Some((index + 1).to_string()),
                title: Some(template.title.to_string()),
                company: Some(template.company.to_string()),
                location: Some(LOCATIONS[index].to_string()),
                salary_min: Some(salary_min),
                salary_max: Some(salary_min + 25.0),
                job_type: Some("Full-time".to_string()),
                description: Some(template.description.to_string()),
                required_skills: Some(template.skills.iter().map(|s| s.to_string()).collect()),
                posted_date: Some(POSTED[index].to_string()),
                apply_url: Some(format!("https://example.com/apply/{}", index + 1)),
                ..Default::default()
            }
        })
        .collect()
}

pub fn mock_salary_data(field: &str, location: &str) -> SalaryData {
    SalaryData {
        field: field.to_string(),
        location: location.to_string(),
        salary_ranges: SalaryRanges {
            entry: SalaryBand { min: 40.0, max: 60.0 },
            mid: SalaryBand { min: 60.0, max: 85.0 },
            senior: SalaryBand { min: 85.0, max: 120.0 },
            lead: SalaryBand { min: 120.0, max: 150.0 },
        },
        market_average: 75.0,
        demand_level: "High".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_classification_order() {
        assert_eq!(JobFamily::classify("Data Engineer"), JobFamily::Data);
        assert_eq!(JobFamily::classify("Backend Developer"), JobFamily::Development);
        assert_eq!(JobFamily::classify("Engineering Manager"), JobFamily::Development);
        assert_eq!(JobFamily::classify("Product Owner"), JobFamily::Product);
        assert_eq!(JobFamily::classify("UX Designer"), JobFamily::General);
    }

    #[test]
    fn test_mock_salaries_use_floor_of_sixty() {
        let jobs = mock_jobs(&JobSearchParams::for_field("Software Engineer").with_salary_min(40.0));
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0].salary_min, Some(75.0));
        assert_eq!(jobs[0].salary_max, Some(100.0));
        assert_eq!(jobs[2].title.as_deref(), Some("Lead Software Engineer"));
    }

    #[test]
    fn test_mock_salaries_follow_requested_minimum() {
        let jobs = mock_jobs(&JobSearchParams::for_field("Data Scientist").with_salary_min(90.0));
        assert_eq!(jobs[1].salary_min, Some(110.0));
        assert_eq!(jobs[1].location.as_deref(), Some("San Francisco, CA"));
        assert_eq!(jobs[1].posted_date.as_deref(), Some("1 week ago"));
    }

    #[test]
    fn test_mock_ids_are_distinct() {
        let jobs = mock_jobs(&JobSearchParams::for_field("Chef"));
        let ids: Vec<_> = jobs.iter().filter_map(|j| j.id.clone()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(jobs[2].apply_url.as_deref(), Some("https://example.com/apply/3"));
    }

    #[test]
    fn test_salary_data_bands() {
        let data = mock_salary_data("Designer", "remote");
        assert_eq!(data.salary_ranges.senior.max, 120.0);
        assert_eq!(data.market_average, 75.0);
        assert_eq!(data.demand_level, "High");
    }
}
