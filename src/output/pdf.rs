//! PDF export of the career report with printpdf

use crate::config::OutputFormat;
use crate::error::{NovaError, Result};
use crate::output::formatter::{OutputFormatter, RenderedReport};
use crate::output::report::CareerReport;
use crate::processing::roadmap::format_rate;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Point,
    Rect, Rgb,
};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
/// Average Helvetica glyph width as a fraction of the font size
const GLYPH_WIDTH: f32 = 0.5;
const PT_TO_MM: f32 = 0.3528;

const NOVA_YELLOW: (f32, f32, f32) = (1.0, 0.843, 0.0);
const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);
const WHITE: (f32, f32, f32) = (1.0, 1.0, 1.0);
const GREY: (f32, f32, f32) = (0.39, 0.39, 0.39);
const DARK_GREY: (f32, f32, f32) = (0.24, 0.24, 0.24);

const NEXT_STEPS: [&str; 6] = [
    "1. Focus on high-impact skill gaps first to maximize improvement",
    "2. Build a portfolio of projects demonstrating your new capabilities",
    "3. Network with professionals in your target field",
    "4. Consider relevant certifications to validate your skills",
    "5. Practice interviewing and articulating your value proposition",
    "6. Track your progress and update your resume regularly",
];

/// Reduce text to printable ASCII the builtin fonts can draw
pub fn sanitize_pdf_text(text: &str) -> String {
    let mapped: String = text
        .chars()
        .filter_map(|c| match c {
            '•' | '·' | '–' | '—' => Some('-'),
            '‘' | '’' => Some('\''),
            '“' | '”' => Some('"'),
            'é' | 'è' | 'ê' => Some('e'),
            'É' => Some('E'),
            c if c.is_whitespace() => Some(' '),
            c if c.is_ascii_graphic() => Some(c),
            _ => None,
        })
        .collect();

    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Greedy word wrap by estimated glyph width
pub fn wrap_text(text: &str, font_size: f32, max_width_mm: f32) -> Vec<String> {
    let chars_per_line = ((max_width_mm / (font_size * GLYPH_WIDTH * PT_TO_MM)) as usize).max(10);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > chars_per_line {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn text_width(text: &str, font_size: f32) -> f32 {
    text.len() as f32 * font_size * GLYPH_WIDTH * PT_TO_MM
}

fn rgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

/// A page cursor measured in millimetres from the top edge
struct PdfCanvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PdfCanvas {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| NovaError::OutputFormatting(format!("Failed to load PDF font: {:?}", e)))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| NovaError::OutputFormatting(format!("Failed to load PDF font: {:?}", e)))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: MARGIN,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = MARGIN;
    }

    fn ensure_space(&mut self, required: f32) {
        if self.y + required > PAGE_HEIGHT - MARGIN {
            self.new_page();
        }
    }

    fn fill_rect(&self, x: f32, top: f32, width: f32, height: f32, color: (f32, f32, f32)) {
        self.layer.set_fill_color(rgb(color));
        self.layer.add_rect(Rect::new(
            Mm(x),
            Mm(PAGE_HEIGHT - top - height),
            Mm(x + width),
            Mm(PAGE_HEIGHT - top),
        ));
    }

    fn outline_square(&self, center_x: f32, center_top: f32, half: f32) {
        let corner = |dx: f32, dy: f32| {
            (Point::new(Mm(center_x + dx), Mm(PAGE_HEIGHT - center_top + dy)), false)
        };
        self.layer.set_outline_color(rgb(BLACK));
        self.layer.set_outline_thickness(3.0);
        self.layer.add_line(Line {
            points: vec![corner(-half, -half), corner(half, -half), corner(half, half), corner(-half, half)],
            is_closed: true,
        });
    }

    fn text(&self, text: &str, size: f32, x: f32, top: f32, bold: bool, color: (f32, f32, f32)) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.set_fill_color(rgb(color));
        self.layer
            .use_text(sanitize_pdf_text(text), size, Mm(x), Mm(PAGE_HEIGHT - top), font);
    }

    fn centered(&self, text: &str, size: f32, top: f32, bold: bool, color: (f32, f32, f32)) {
        let clean = sanitize_pdf_text(text);
        let x = ((PAGE_WIDTH - text_width(&clean, size)) / 2.0).max(MARGIN / 2.0);
        self.text(&clean, size, x, top, bold, color);
    }

    /// Write wrapped text at the cursor and move the cursor below it
    fn paragraph(&mut self, text: &str, x: f32, size: f32, bold: bool, color: (f32, f32, f32)) {
        let clean = sanitize_pdf_text(text);
        if clean.is_empty() {
            return;
        }
        let line_height = size * 0.4;
        for line in wrap_text(&clean, size, PAGE_WIDTH - MARGIN - x) {
            self.ensure_space(line_height);
            self.text(&line, size, x, self.y, bold, color);
            self.y += line_height;
        }
    }

    fn heading(&mut self, text: &str, size: f32) {
        self.text(text, size, MARGIN, self.y, true, BLACK);
        self.y += size * 0.6;
    }

    fn finish(self) -> Result<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| NovaError::OutputFormatting(format!("Failed to write PDF: {:?}", e)))
    }
}

/// Multi-page career report: cover, analysis, roadmap, milestones, next steps
pub struct PdfFormatter;

impl PdfFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, report: &CareerReport) -> Result<Vec<u8>> {
        let mut canvas = PdfCanvas::new(&format!("NOVA Career Report - {}", report.profile.name))?;

        Self::cover_page(&canvas, report);

        canvas.new_page();
        Self::analysis_page(&mut canvas, report);

        canvas.new_page();
        Self::roadmap_pages(&mut canvas, report);

        if !report.roadmap.milestones.is_empty() {
            canvas.new_page();
            Self::milestones_page(&mut canvas, report);
        }

        canvas.new_page();
        Self::next_steps_page(&mut canvas);

        canvas.finish()
    }

    fn cover_page(canvas: &PdfCanvas, report: &CareerReport) {
        canvas.fill_rect(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT, NOVA_YELLOW);

        canvas.fill_rect(PAGE_WIDTH / 2.0 - 15.0, 40.0, 30.0, 30.0, BLACK);
        canvas.centered("N", 24.0, 60.0, true, NOVA_YELLOW);

        canvas.centered("NOVA", 32.0, 85.0, true, BLACK);
        canvas.centered("Career Intelligence Report", 14.0, 95.0, false, BLACK);

        canvas.centered(&report.profile.name, 20.0, 120.0, true, BLACK);
        let target = format!(
            "{} - ${}/hour",
            report.profile.target_field,
            format_rate(report.profile.target_salary)
        );
        canvas.centered(&target, 14.0, 130.0, false, BLACK);

        canvas.outline_square(PAGE_WIDTH / 2.0, 160.0, 25.0);
        canvas.centered(&format!("{}%", report.analysis.match_score), 24.0, 165.0, true, BLACK);
        canvas.centered("Current Match Score", 10.0, 175.0, true, BLACK);

        let generated = format!("Generated on {}", report.metadata.generated_at.format("%Y-%m-%d"));
        canvas.centered(&generated, 10.0, 220.0, false, DARK_GREY);
    }

    fn analysis_page(canvas: &mut PdfCanvas, report: &CareerReport) {
        canvas.fill_rect(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT, WHITE);
        canvas.heading("Career Analysis Summary", 24.0);
        canvas.y += 5.0;

        if !report.analysis.strengths.is_empty() {
            canvas.ensure_space(40.0);
            canvas.heading("Your Key Strengths", 16.0);
            for strength in &report.analysis.strengths {
                canvas.ensure_space(15.0);
                canvas.fill_rect(MARGIN + 1.5, canvas.y - 3.5, 3.0, 3.0, NOVA_YELLOW);
                canvas.paragraph(strength, MARGIN + 8.0, 10.0, false, BLACK);
                canvas.y += 5.0;
            }
            canvas.y += 10.0;
        }

        if !report.analysis.gaps.is_empty() {
            canvas.ensure_space(40.0);
            canvas.heading("Skill Gaps to Address", 16.0);
            for gap in &report.analysis.gaps {
                canvas.ensure_space(25.0);
                canvas.paragraph(&format!("{} ({} Impact)", gap.skill, gap.impact), MARGIN, 12.0, true, BLACK);
                canvas.paragraph(
                    &format!("Time to acquire: {}", non_empty_or(&gap.time_to_acquire, "TBD")),
                    MARGIN,
                    10.0,
                    false,
                    GREY,
                );
                let description = gap
                    .description
                    .as_deref()
                    .unwrap_or("Important skill to develop for role success");
                canvas.paragraph(description, MARGIN, 10.0, false, GREY);
                canvas.y += 8.0;
            }
        }
    }

    fn roadmap_pages(canvas: &mut PdfCanvas, report: &CareerReport) {
        let roadmap = &report.roadmap;
        canvas.heading("Your Personalized Career Roadmap", 24.0);
        canvas.y += 5.0;

        if roadmap.estimated_improvement > 0 {
            canvas.paragraph(
                &format!("Estimated Score Improvement: +{}%", roadmap.estimated_improvement),
                MARGIN,
                12.0,
                false,
                BLACK,
            );
            if roadmap.success_probability > 0 {
                canvas.paragraph(
                    &format!("Success Probability: {}%", roadmap.success_probability),
                    MARGIN,
                    12.0,
                    false,
                    BLACK,
                );
            }
            canvas.y += 15.0;
        }

        for (index, phase) in roadmap.phases.iter().enumerate() {
            canvas.ensure_space(60.0);

            canvas.fill_rect(MARGIN, canvas.y - 8.0, PAGE_WIDTH - MARGIN * 2.0, 12.0, NOVA_YELLOW);
            let title = if phase.phase.trim().is_empty() {
                format!("Phase {}", index + 1)
            } else {
                phase.phase.clone()
            };
            canvas.text(&title, 14.0, MARGIN + 5.0, canvas.y, true, BLACK);
            canvas.y += 15.0;

            if !phase.goals.is_empty() {
                canvas.heading("Goals:", 12.0);
                for goal in &phase.goals {
                    canvas.ensure_space(10.0);
                    canvas.fill_rect(MARGIN + 2.0, canvas.y - 3.0, 2.0, 2.0, BLACK);
                    canvas.paragraph(goal, MARGIN + 8.0, 10.0, false, BLACK);
                    canvas.y += 3.0;
                }
                canvas.y += 5.0;
            }

            if !phase.actions.is_empty() {
                canvas.ensure_space(30.0);
                canvas.heading("Action Items:", 12.0);
                for action in &phase.actions {
                    canvas.ensure_space(20.0);
                    canvas.paragraph(
                        &format!("- {}", non_empty_or(&action.action, "Action item")),
                        MARGIN,
                        10.0,
                        true,
                        BLACK,
                    );
                    canvas.paragraph(
                        &format!(
                            "Time: {} | Priority: {}",
                            non_empty_or(&action.time_required, "TBD"),
                            non_empty_or(&action.priority, "Medium")
                        ),
                        MARGIN + 3.0,
                        10.0,
                        false,
                        GREY,
                    );
                    if !action.resources.is_empty() {
                        canvas.paragraph(
                            &format!("Resources: {}", action.resources.join(", ")),
                            MARGIN + 3.0,
                            10.0,
                            false,
                            GREY,
                        );
                    }
                    canvas.y += 5.0;
                }
            }
            canvas.y += 10.0;
        }
    }

    fn milestones_page(canvas: &mut PdfCanvas, report: &CareerReport) {
        canvas.heading("Key Milestones & Timeline", 20.0);
        canvas.y += 5.0;

        for (index, milestone) in report.roadmap.milestones.iter().enumerate() {
            canvas.ensure_space(25.0);
            canvas.fill_rect(MARGIN + 2.0, canvas.y - 5.0, 6.0, 6.0, NOVA_YELLOW);

            let title = if milestone.milestone.trim().is_empty() {
                format!("Milestone {}", index + 1)
            } else {
                milestone.milestone.clone()
            };
            canvas.paragraph(&title, MARGIN + 15.0, 12.0, true, BLACK);
            canvas.paragraph(
                &format!(
                    "Deadline: {} | Impact: {}",
                    non_empty_or(&milestone.deadline, "TBD"),
                    non_empty_or(&milestone.score_impact, "+5%")
                ),
                MARGIN + 15.0,
                10.0,
                false,
                GREY,
            );
            canvas.y += 10.0;
        }
    }

    fn next_steps_page(canvas: &mut PdfCanvas) {
        canvas.fill_rect(0.0, 0.0, PAGE_WIDTH, 60.0, NOVA_YELLOW);
        canvas.text("Next Steps & Recommendations", 20.0, MARGIN, 35.0, true, BLACK);

        canvas.y = 80.0;
        for step in NEXT_STEPS {
            canvas.paragraph(step, MARGIN, 12.0, false, BLACK);
            canvas.y += 8.0;
        }

        canvas.fill_rect(0.0, PAGE_HEIGHT - 40.0, PAGE_WIDTH, 40.0, BLACK);
        canvas.centered(
            "NOVA - Navigate - Optimize - Validate - Achieve",
            14.0,
            PAGE_HEIGHT - 20.0,
            true,
            NOVA_YELLOW,
        );
        canvas.centered(
            "Your AI-Powered Career Intelligence Platform",
            10.0,
            PAGE_HEIGHT - 10.0,
            false,
            NOVA_YELLOW,
        );
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

impl Default for PdfFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for PdfFormatter {
    fn format_report(&self, report: &CareerReport) -> Result<RenderedReport> {
        Ok(RenderedReport::Binary(self.render(report)?))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::tests::sample_report;

    #[test]
    fn test_sanitize_keeps_printable_ascii() {
        assert_eq!(sanitize_pdf_text("Data Scientist • $85/hour"), "Data Scientist - $85/hour");
        assert_eq!(sanitize_pdf_text("Résumé\tready\u{7}  now 🚀"), "Resume ready now");
        assert_eq!(sanitize_pdf_text("“quoted” it’s"), "\"quoted\" it's");
    }

    #[test]
    fn test_wrap_respects_estimated_width() {
        let text = "word ".repeat(60);
        let lines = wrap_text(&text, 10.0, 170.0);
        assert!(lines.len() > 1);
        let limit = (170.0 / (10.0 * GLYPH_WIDTH * PT_TO_MM)) as usize;
        assert!(lines.iter().all(|line| line.len() <= limit));
        assert_eq!(lines.join(" ").split_whitespace().count(), 60);
    }

    #[test]
    fn test_wrap_keeps_long_words_whole() {
        let lines = wrap_text("supercalifragilisticexpialidocious", 24.0, 20.0);
        assert_eq!(lines, vec!["supercalifragilisticexpialidocious"]);
    }

    #[test]
    fn test_render_produces_pdf() {
        let bytes = PdfFormatter::new().render(&sample_report()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn test_render_without_milestones_or_gaps() {
        let mut report = sample_report();
        report.roadmap.milestones.clear();
        report.analysis.gaps.clear();
        report.analysis.strengths.clear();
        let rendered = PdfFormatter::new().format_report(&report).unwrap();
        assert!(matches!(rendered, RenderedReport::Binary(_)));
    }
}
