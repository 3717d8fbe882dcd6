//! Input manager for résumé uploads

use crate::error::{NovaError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor, WordDocumentExtractor,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

/// Text pulled out of an uploaded résumé, plus what we know about the file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedResume {
    pub file_name: String,
    pub size_bytes: u64,
    pub text: String,
    pub word_count: usize,
}

impl ExtractedResume {
    pub fn from_text(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            file_name: file_name.into(),
            size_bytes: text.len() as u64,
            word_count: text.unicode_words().count(),
            text,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

pub struct InputManager {
    cache: HashMap<String, ExtractedResume>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract(&mut self, path: &Path) -> Result<ExtractedResume> {
        let path_key = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached) = self.cache.get(&path_key) {
                info!("Using cached extraction for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(NovaError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = self.detect_file_type(path)?;

        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::WordDocument => {
                info!("Word document accepted without parsing: {}", path.display());
                WordDocumentExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(NovaError::UnsupportedFormat(format!(
                    "Please upload a PDF, TXT, Markdown or Word document: {}",
                    path.display()
                )));
            }
        };

        let size_bytes = tokio::fs::metadata(path).await?.len();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path_key.clone());

        let resume = ExtractedResume {
            file_name,
            size_bytes,
            word_count: text.unicode_words().count(),
            text,
        };

        if self.enable_cache {
            self.cache.insert(path_key, resume.clone());
        }

        Ok(resume)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                NovaError::UnsupportedFormat(format!("File has no extension: {}", path.display()))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
