//! Output formatters for the career report

use crate::config::OutputFormat;
use crate::error::{NovaError, Result};
use crate::output::pdf::PdfFormatter;
use crate::output::report::{CareerReport, Verdict};
use crate::processing::data_science::category_label;
use crate::processing::keywords::CategoryBreakdown;
use crate::processing::resume_analyzer::Impact;
use crate::processing::roadmap::format_rate;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Rendered output, either printable text or a binary document
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedReport {
    Text(String),
    Binary(Vec<u8>),
}

impl RenderedReport {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            RenderedReport::Text(text) => text.as_bytes(),
            RenderedReport::Binary(bytes) => bytes,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RenderedReport::Text(text) => Some(text),
            RenderedReport::Binary(_) => None,
        }
    }
}

/// Trait for formatting career reports
pub trait OutputFormatter {
    fn format_report(&self, report: &CareerReport) -> Result<RenderedReport>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// HTML dashboard
pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
    pdf_formatter: PdfFormatter,
}

fn sources_note(report: &CareerReport) -> Option<String> {
    if !report.uses_mock_data() {
        return None;
    }
    Some(format!(
        "Offline data in use (analysis: {}, roadmap: {}, jobs: {})",
        report.analysis_source, report.roadmap_source, report.jobs_source
    ))
}

fn rate(report: &CareerReport) -> String {
    format!("${}/hr", format_rate(report.profile.target_salary))
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Yellow,
            2 => Color::Blue,
            _ => Color::Green,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_verdict_badge(&self, verdict: Verdict) -> String {
        let color = match verdict {
            Verdict::Excellent => Color::Green,
            Verdict::Good => Color::Yellow,
            Verdict::Fair => Color::BrightYellow,
            Verdict::NeedsImprovement => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", verdict.label().color(color).bold())
        } else {
            format!("[{}]", verdict.label())
        }
    }

    fn format_breakdown(&self, output: &mut String, breakdown: &[CategoryBreakdown]) {
        for category in breakdown {
            output.push_str(&format!("  {:<24} {:>2}/10", category_label(&category.name), category.score));
            if !category.missing.is_empty() {
                let missing: Vec<&str> = category.missing.iter().take(3).map(String::as_str).collect();
                output.push_str(&format!("  missing: {}", missing.join(", ")));
            }
            output.push('\n');
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &CareerReport) -> Result<RenderedReport> {
        let mut output = String::new();
        let analysis = &report.analysis;

        output.push_str(&self.format_header("🚀 NOVA CAREER INTELLIGENCE REPORT", 1));
        output.push_str(&format!(
            "{} • {} • {}\n",
            report.profile.name,
            report.profile.target_field,
            rate(report)
        ));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));
        if let Some(note) = sources_note(report) {
            output.push_str(&format!("{}\n", self.colorize(&note, Color::BrightBlack)));
        }

        // Match score
        output.push_str(&self.format_header("Job Match Probability", 2));
        output.push_str(&format!(
            "Match Score: {}% {}\n",
            analysis.match_score,
            self.format_verdict_badge(report.verdict())
        ));
        output.push_str(&format!(
            "Projected after roadmap: {}% (+{}%) | Success probability: {}%\n",
            report.projected_score(),
            report.roadmap.estimated_improvement,
            report.roadmap.success_probability
        ));
        output.push_str(&format!(
            "Experience: {} years | Education: {} | Market position: {}\n",
            analysis.experience_years,
            analysis.education_level,
            self.colorize(&analysis.market_position, Color::Cyan)
        ));

        if !analysis.strengths.is_empty() {
            output.push_str(&self.format_header("✅ Key Strengths", 3));
            for strength in &analysis.strengths {
                output.push_str(&format!("  • {}\n", self.colorize(strength, Color::Green)));
            }
        }

        if !analysis.gaps.is_empty() {
            output.push_str(&self.format_header("🎯 Skill Gaps", 3));
            for gap in &analysis.gaps {
                output.push_str(&format!(
                    "  • {} ({} impact, {})\n",
                    self.colorize(&gap.skill, Color::Yellow),
                    gap.impact,
                    gap.time_to_acquire
                ));
                if self.detailed {
                    if let Some(description) = &gap.description {
                        output.push_str(&format!("    {}\n", description));
                    }
                }
            }
        }

        // Position analysis
        let position = &report.position;
        output.push_str(&self.format_header(&format!("📋 {} Fit", position.position_title), 2));
        output.push_str(&format!(
            "Relevance: {}/10 | Experience: {}/10 | Education: {}/10 | ATS: {}/10\n",
            position.overall_relevance_score,
            position.experience_relevance.experience_score,
            position.education_assessment.education_score,
            position.ats_optimization.score
        ));
        output.push_str(&format!("{}\n", position.job_readiness_assessment));
        if self.detailed {
            self.format_breakdown(&mut output, &position.technical_skills_breakdown);
            for recommendation in &position.improvement_recommendations {
                output.push_str(&format!("  → {}\n", recommendation));
            }
        }

        if let Some(data_science) = &report.data_science {
            output.push_str(&self.format_header("📊 Data Science Readiness", 2));
            output.push_str(&format!(
                "Relevance: {}/10 | Experience: {}/10 | Education: {}/10\n",
                data_science.overall_relevance_score,
                data_science.experience_relevance.experience_score,
                data_science.education_assessment.education_score
            ));
            output.push_str(&format!("{}\n", data_science.job_readiness_assessment));
            self.format_breakdown(&mut output, &data_science.technical_skills_breakdown);
        }

        // Roadmap
        output.push_str(&self.format_header(
            &format!("🛣️  Career Roadmap ({})", report.roadmap.timeline),
            2,
        ));
        for phase in &report.roadmap.phases {
            output.push_str(&format!("{}\n", self.colorize(&phase.phase, Color::Cyan)));
            let goal_limit = if self.detailed { phase.goals.len() } else { 3 };
            for goal in phase.goals.iter().take(goal_limit) {
                output.push_str(&format!("  • {}\n", goal));
            }
            if self.detailed {
                for action in &phase.actions {
                    output.push_str(&format!(
                        "    - {} ({}, {} priority)\n",
                        action.action, action.time_required, action.priority
                    ));
                }
            }
        }

        if !report.roadmap.milestones.is_empty() {
            output.push_str(&self.format_header("🏁 Milestones", 3));
            for milestone in &report.roadmap.milestones {
                output.push_str(&format!(
                    "  {:<10} {} ({})\n",
                    milestone.deadline, milestone.milestone, milestone.score_impact
                ));
            }
        }

        // Jobs
        output.push_str(&self.format_header(&format!("💼 Top Job Matches ({})", report.job_matches.len()), 2));
        if report.job_matches.is_empty() {
            output.push_str("No matching roles found.\n");
        }
        for (i, job) in report.job_matches.iter().enumerate() {
            output.push_str(&format!(
                "{}. {} at {} [{}% match]\n",
                i + 1,
                self.colorize(&job.job_title, Color::White),
                job.company_name,
                job.match_score
            ));
            output.push_str(&format!(
                "   {} | {} | {}\n   {}\n",
                job.salary_range(),
                job.location,
                job.job_type,
                job.match_reason
            ));
            if self.detailed {
                output.push_str(&format!("   Skills: {}\n   Apply: {}\n", job.required_skills.join(", "), job.application_url));
            }
        }

        Ok(RenderedReport::Text(output))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &CareerReport) -> Result<RenderedReport> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(RenderedReport::Text(json))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_breakdown(output: &mut String, breakdown: &[CategoryBreakdown]) {
        output.push_str("| Category | Score | Present | Missing |\n");
        output.push_str("|----------|-------|---------|---------|\n");
        for category in breakdown {
            output.push_str(&format!(
                "| {} | {}/10 | {} | {} |\n",
                category_label(&category.name),
                category.score,
                category.present.join(", "),
                category.missing.join(", ")
            ));
        }
        output.push('\n');
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &CareerReport) -> Result<RenderedReport> {
        let mut output = String::new();
        let analysis = &report.analysis;

        output.push_str("# 🚀 NOVA Career Intelligence Report\n\n");
        output.push_str(&format!(
            "**{}** • {} • {}\n\n",
            report.profile.name,
            report.profile.target_field,
            rate(report)
        ));

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Résumé:** `{}` ({} words)\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.resume.file_name,
                report.resume.word_count
            ));
            if let Some(note) = sources_note(report) {
                output.push_str(&format!("> {}\n\n", note));
            }
        }

        output.push_str("## Job Match Probability\n\n");
        output.push_str(&format!(
            "**Match Score:** {}% ({})\n\n",
            analysis.match_score,
            report.verdict()
        ));
        output.push_str("| Metric | Value |\n|--------|-------|\n");
        output.push_str(&format!("| Projected score | {}% |\n", report.projected_score()));
        output.push_str(&format!("| Success probability | {}% |\n", report.roadmap.success_probability));
        output.push_str(&format!("| Experience | {} years |\n", analysis.experience_years));
        output.push_str(&format!("| Education | {} |\n", analysis.education_level));
        output.push_str(&format!("| Market position | {} |\n\n", analysis.market_position));

        if !analysis.strengths.is_empty() {
            output.push_str("### ✅ Key Strengths\n\n");
            for strength in &analysis.strengths {
                output.push_str(&format!("- {}\n", strength));
            }
            output.push('\n');
        }

        if !analysis.gaps.is_empty() {
            output.push_str("### 🎯 Skill Gaps\n\n");
            for gap in &analysis.gaps {
                output.push_str(&format!(
                    "- **{}** ({} impact, {})",
                    gap.skill, gap.impact, gap.time_to_acquire
                ));
                if let Some(description) = &gap.description {
                    output.push_str(&format!(": {}", description));
                }
                output.push('\n');
            }
            output.push('\n');
        }

        let position = &report.position;
        output.push_str(&format!("## 📋 {} Fit\n\n", position.position_title));
        output.push_str(&format!(
            "**Relevance:** {}/10 | **ATS:** {}/10\n\n{}\n\n",
            position.overall_relevance_score, position.ats_optimization.score, position.job_readiness_assessment
        ));
        Self::markdown_breakdown(&mut output, &position.technical_skills_breakdown);
        if !position.improvement_recommendations.is_empty() {
            output.push_str("**Recommendations:**\n\n");
            for recommendation in &position.improvement_recommendations {
                output.push_str(&format!("- {}\n", recommendation));
            }
            output.push('\n');
        }

        if let Some(data_science) = &report.data_science {
            output.push_str("## 📊 Data Science Readiness\n\n");
            output.push_str(&format!(
                "**Relevance:** {}/10\n\n{}\n\n",
                data_science.overall_relevance_score, data_science.job_readiness_assessment
            ));
            Self::markdown_breakdown(&mut output, &data_science.technical_skills_breakdown);
        }

        output.push_str(&format!("## 🛣️ Career Roadmap ({})\n\n", report.roadmap.timeline));
        for phase in &report.roadmap.phases {
            output.push_str(&format!("### {}\n\n", phase.phase));
            for goal in &phase.goals {
                output.push_str(&format!("- {}\n", goal));
            }
            if !phase.actions.is_empty() {
                output.push_str("\n**Action Items:**\n\n");
                for (i, action) in phase.actions.iter().enumerate() {
                    output.push_str(&format!(
                        "{}. **{}** ({}, {} priority)\n",
                        i + 1,
                        action.action,
                        action.time_required,
                        action.priority
                    ));
                }
            }
            output.push('\n');
        }

        if !report.roadmap.milestones.is_empty() {
            output.push_str("### 🏁 Milestones\n\n| Deadline | Milestone | Impact |\n|----------|-----------|--------|\n");
            for milestone in &report.roadmap.milestones {
                output.push_str(&format!(
                    "| {} | {} | {} |\n",
                    milestone.deadline, milestone.milestone, milestone.score_impact
                ));
            }
            output.push('\n');
        }

        output.push_str("## 💼 Top Job Matches\n\n");
        for job in &report.job_matches {
            output.push_str(&format!(
                "### [{}]({}) at {}\n\n**{}% match** • {} • {} • {}\n\n{}\n\n",
                job.job_title,
                job.application_url,
                job.company_name,
                job.match_score,
                job.salary_range(),
                job.location,
                job.job_type,
                job.match_reason
            ));
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!("*Generated by NOVA v{}*\n", report.metadata.version));
        }

        Ok(RenderedReport::Text(output))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

/// Askama template for the HTML dashboard
#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>NOVA Career Report - {{ name }}</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #0b0b0b; color: #f5f5f5; margin: 0; padding: 24px; }
        .container { max-width: 1000px; margin: 0 auto; }
        .header { background: #FFD700; color: #000; border-radius: 12px; padding: 24px; margin-bottom: 24px; }
        .header h1 { margin: 0; }
        .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 20px; }
        .card { background: #1a1a1a; border: 1px solid #333; border-radius: 12px; padding: 20px; margin-bottom: 20px; }
        .score { font-size: 56px; font-weight: 800; color: #FFD700; }
        .badge { display: inline-block; padding: 4px 12px; border-radius: 999px; font-weight: 700; }
        .badge-excellent { background: #dcfce7; color: #166534; }
        .badge-good { background: #fef9c3; color: #854d0e; }
        .badge-fair { background: #ffedd5; color: #9a3412; }
        .badge-poor { background: #fee2e2; color: #991b1b; }
        .gap { border-left: 4px solid #FFA500; padding-left: 12px; margin-bottom: 12px; }
        .gap-high { border-color: #ef4444; }
        .job { border-bottom: 1px solid #333; padding: 12px 0; }
        .job a { color: #FFD700; }
        .muted { color: #9ca3af; font-size: 14px; }
        .note { background: #262626; padding: 8px 12px; border-radius: 8px; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>NOVA Career Intelligence Report</h1>
            <p><strong>{{ name }}</strong> &bull; {{ target_field }} &bull; {{ target_rate }}</p>
            <p>Generated {{ generated_at }}</p>
        </div>
        {% if has_note %}
        <p class="note">{{ note }}</p>
        {% endif %}

        <div class="grid">
            <div class="card">
                <h2>Job Match Probability</h2>
                <div class="score">{{ match_score }}%</div>
                <span class="badge {{ badge_class }}">{{ verdict }}</span>
                <p>Projected after roadmap: <strong>{{ projected_score }}%</strong> (+{{ estimated_improvement }}%)</p>
                <p class="muted">{{ experience_years }} years experience &bull; {{ education_level }} &bull; {{ market_position }}</p>
            </div>
            <div class="card">
                <h2>Key Strengths</h2>
                <ul>
                    {% for strength in strengths %}
                    <li>{{ strength }}</li>
                    {% endfor %}
                </ul>
            </div>
        </div>

        <div class="card">
            <h2>Skill Gaps</h2>
            {% for gap in gaps %}
            <div class="gap{% if gap.high %} gap-high{% endif %}">
                <strong>{{ gap.skill }}</strong> <span class="muted">{{ gap.impact }} impact &bull; {{ gap.time_to_acquire }}</span>
                <p>{{ gap.description }}</p>
            </div>
            {% endfor %}
        </div>

        <div class="card">
            <h2>{{ position_title }} Fit: {{ position_score }}/10</h2>
            <p>{{ readiness }}</p>
            <table>
                {% for row in position_breakdown %}
                <tr><td>{{ row.label }}</td><td>{{ row.score }}/10</td><td class="muted">{{ row.missing }}</td></tr>
                {% endfor %}
            </table>
        </div>

        {% if has_data_science %}
        <div class="card">
            <h2>Data Science Readiness: {{ data_science_score }}/10</h2>
            <table>
                {% for row in data_science_breakdown %}
                <tr><td>{{ row.label }}</td><td>{{ row.score }}/10</td><td class="muted">{{ row.missing }}</td></tr>
                {% endfor %}
            </table>
        </div>
        {% endif %}

        <div class="card">
            <h2>Career Roadmap ({{ timeline }})</h2>
            {% for phase in phases %}
            <h3>{{ phase.title }}</h3>
            <ul>
                {% for goal in phase.goals %}
                <li>{{ goal }}</li>
                {% endfor %}
            </ul>
            {% endfor %}
        </div>

        <div class="card">
            <h2>Top Job Matches</h2>
            {% for job in jobs %}
            <div class="job">
                <a href="{{ job.url }}">{{ job.title }}</a> at {{ job.company }} <span class="badge badge-good">{{ job.match_score }}% match</span>
                <p class="muted">{{ job.salary }} &bull; {{ job.location }} &bull; {{ job.job_type }}</p>
                <p>{{ job.reason }}</p>
            </div>
            {% endfor %}
        </div>

        <p class="muted">NOVA v{{ version }} &bull; Navigate &bull; Optimize &bull; Validate &bull; Achieve</p>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    name: String,
    target_field: String,
    target_rate: String,
    generated_at: String,
    has_note: bool,
    note: String,
    match_score: u8,
    badge_class: String,
    verdict: String,
    projected_score: u8,
    estimated_improvement: u8,
    experience_years: u32,
    education_level: String,
    market_position: String,
    strengths: Vec<String>,
    gaps: Vec<GapRow>,
    position_title: String,
    position_score: u8,
    readiness: String,
    position_breakdown: Vec<CategoryRow>,
    has_data_science: bool,
    data_science_score: u8,
    data_science_breakdown: Vec<CategoryRow>,
    timeline: String,
    phases: Vec<PhaseRow>,
    jobs: Vec<JobRow>,
    version: String,
}

struct GapRow {
    skill: String,
    impact: String,
    time_to_acquire: String,
    description: String,
    high: bool,
}

struct CategoryRow {
    label: String,
    score: u8,
    missing: String,
}

struct PhaseRow {
    title: String,
    goals: Vec<String>,
}

struct JobRow {
    url: String,
    title: String,
    company: String,
    match_score: u8,
    salary: String,
    location: String,
    job_type: String,
    reason: String,
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn breakdown_rows(breakdown: &[CategoryBreakdown]) -> Vec<CategoryRow> {
        breakdown
            .iter()
            .map(|category| CategoryRow {
                label: category_label(&category.name),
                score: category.score,
                missing: category.missing.join(", "),
            })
            .collect()
    }

    fn create_template_data(&self, report: &CareerReport) -> HtmlTemplate {
        let analysis = &report.analysis;
        let verdict = report.verdict();
        let badge_class = match verdict {
            Verdict::Excellent => "badge-excellent",
            Verdict::Good => "badge-good",
            Verdict::Fair => "badge-fair",
            Verdict::NeedsImprovement => "badge-poor",
        };

        let gaps = analysis
            .gaps
            .iter()
            .map(|gap| GapRow {
                skill: gap.skill.clone(),
                impact: gap.impact.to_string(),
                time_to_acquire: gap.time_to_acquire.clone(),
                description: gap.description.clone().unwrap_or_default(),
                high: gap.impact == Impact::High,
            })
            .collect();

        let phases = report
            .roadmap
            .phases
            .iter()
            .map(|phase| PhaseRow {
                title: phase.phase.clone(),
                goals: phase.goals.iter().take(3).cloned().collect(),
            })
            .collect();

        let jobs = report
            .job_matches
            .iter()
            .map(|job| JobRow {
                url: job.application_url.clone(),
                title: job.job_title.clone(),
                company: job.company_name.clone(),
                match_score: job.match_score,
                salary: job.salary_range(),
                location: job.location.clone(),
                job_type: job.job_type.clone(),
                reason: job.match_reason.clone(),
            })
            .collect();

        let note = sources_note(report);

        HtmlTemplate {
            include_styles: self.include_styles,
            name: report.profile.name.clone(),
            target_field: report.profile.target_field.clone(),
            target_rate: rate(report),
            generated_at: report.metadata.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            has_note: note.is_some(),
            note: note.unwrap_or_default(),
            match_score: analysis.match_score,
            badge_class: badge_class.to_string(),
            verdict: verdict.label().to_string(),
            projected_score: report.projected_score(),
            estimated_improvement: report.roadmap.estimated_improvement,
            experience_years: analysis.experience_years,
            education_level: analysis.education_level.clone(),
            market_position: analysis.market_position.clone(),
            strengths: analysis.strengths.clone(),
            gaps,
            position_title: report.position.position_title.clone(),
            position_score: report.position.overall_relevance_score,
            readiness: report.position.job_readiness_assessment.clone(),
            position_breakdown: Self::breakdown_rows(&report.position.technical_skills_breakdown),
            has_data_science: report.data_science.is_some(),
            data_science_score: report
                .data_science
                .as_ref()
                .map(|ds| ds.overall_relevance_score)
                .unwrap_or(0),
            data_science_breakdown: report
                .data_science
                .as_ref()
                .map(|ds| Self::breakdown_rows(&ds.technical_skills_breakdown))
                .unwrap_or_default(),
            timeline: report.roadmap.timeline.to_string(),
            phases,
            jobs,
            version: report.metadata.version.clone(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &CareerReport) -> Result<RenderedReport> {
        let html = self
            .create_template_data(report)
            .render()
            .map_err(|e| NovaError::OutputFormatting(e.to_string()))?;
        Ok(RenderedReport::Text(html))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
            pdf_formatter: PdfFormatter::new(),
        }
    }

    pub fn generate_report(&self, report: &CareerReport, format: OutputFormat) -> Result<RenderedReport> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
            OutputFormat::Pdf => &self.pdf_formatter,
        };
        debug_assert_eq!(formatter.supports_format(), format);
        formatter.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(rendered: &RenderedReport, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(file_path, rendered.as_bytes())?;
    Ok(())
}

/// `NOVA-Career-Report-<Name>-<YYYY-MM-DD>.<ext>`, whitespace in the name becoming dashes
pub fn suggest_filename(format: OutputFormat, name: &str, date: chrono::NaiveDate) -> String {
    let name = name.split_whitespace().collect::<Vec<_>>().join("-");
    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
        OutputFormat::Pdf => "pdf",
    };
    format!("NOVA-Career-Report-{}-{}.{}", name, date.format("%Y-%m-%d"), extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::tests::sample_report;

    #[test]
    fn test_console_without_colors() {
        let report = sample_report();
        let rendered = ConsoleFormatter::new(false, true).format_report(&report).unwrap();
        let text = rendered.as_text().unwrap();

        assert!(text.contains("NOVA CAREER INTELLIGENCE REPORT"));
        assert!(text.contains("Jane Doe • Backend Developer • $80/hr"));
        assert!(text.contains("Match Score: 72% [Good Match]"));
        assert!(text.contains("Kubernetes (High impact, 2-3 months)"));
        assert!(text.contains("Offline data in use"));
        assert!(!text.contains("\u{1b}["));
    }

    #[test]
    fn test_json_round_trips_through_report() {
        let report = sample_report();
        let rendered = JsonFormatter::new(true).format_report(&report).unwrap();
        let parsed: CareerReport = serde_json::from_str(rendered.as_text().unwrap()).unwrap();
        assert_eq!(parsed.analysis.match_score, 72);
        assert_eq!(parsed.roadmap.phases.len(), report.roadmap.phases.len());
    }

    #[test]
    fn test_markdown_sections() {
        let rendered = MarkdownFormatter::new(true).format_report(&sample_report()).unwrap();
        let text = rendered.as_text().unwrap();

        assert!(text.starts_with("# 🚀 NOVA Career Intelligence Report"));
        assert!(text.contains("**Match Score:** 72% (Good Match)"));
        assert!(text.contains("## 🛣️ Career Roadmap (6-month)"));
        assert!(text.contains("## 💼 Top Job Matches"));
        assert!(text.contains("`jane_doe.txt`"));
    }

    #[test]
    fn test_html_escapes_user_text() {
        let mut report = sample_report();
        report.analysis.strengths = vec!["<script>alert(1)</script>".to_string()];
        report.profile.name = "Jane & Co".to_string();

        let rendered = HtmlFormatter::new(true).format_report(&report).unwrap();
        let html = rendered.as_text().unwrap();

        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("Jane &amp; Co"));
        assert!(html.contains("Kubernetes"));
        assert!(html.contains("gap gap-high"));
        assert!(html.contains("badge-good"));
        assert!(html.contains("<style>"));
    }

    #[test]
    fn test_html_escapes_gap_and_job_fields() {
        let mut report = sample_report();
        report.analysis.gaps[0].skill = "<b>CI & CD</b>".to_string();
        report.job_matches[0].job_title = "Rust <Lead>".to_string();
        report.job_matches[0].company_name = "Smith & Sons".to_string();
        report.roadmap.phases[0].goals = vec!["Ship <iframe>".to_string()];

        let rendered = HtmlFormatter::new(false).format_report(&report).unwrap();
        let html = rendered.as_text().unwrap();

        assert!(html.contains("&lt;b&gt;CI &amp; CD&lt;/b&gt;"));
        assert!(html.contains("Rust &lt;Lead&gt;"));
        assert!(html.contains("Smith &amp; Sons"));
        assert!(html.contains("Ship &lt;iframe&gt;"));
        assert!(!html.contains("<b>CI"));
        assert!(!html.contains("<iframe>"));
        assert!(!html.contains("<style>"));
    }

    #[test]
    fn test_generator_selects_pdf_as_binary() {
        let generator = ReportGenerator::with_options(false, false);
        let report = sample_report();

        let pdf = generator.generate_report(&report, OutputFormat::Pdf).unwrap();
        assert!(matches!(pdf, RenderedReport::Binary(_)));
        assert!(pdf.as_bytes().starts_with(b"%PDF"));

        let json = generator.generate_report(&report, OutputFormat::Json).unwrap();
        assert!(json.as_text().is_some());
    }

    #[test]
    fn test_suggest_filename() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            suggest_filename(OutputFormat::Pdf, "Jane  van Doe", date),
            "NOVA-Career-Report-Jane-van-Doe-2024-03-09.pdf"
        );
        assert_eq!(
            suggest_filename(OutputFormat::Markdown, "Professional", date),
            "NOVA-Career-Report-Professional-2024-03-09.md"
        );
    }

    #[test]
    fn test_save_report_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.md");
        save_report_to_file(&RenderedReport::Text("# hi".to_string()), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# hi");
    }
}
