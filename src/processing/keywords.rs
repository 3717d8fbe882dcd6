//! Keyword matching primitives shared by the résumé analyzers

use crate::error::{NovaError, Result};
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};

const ESSENTIAL_WEIGHT: u32 = 3;
const IMPORTANT_WEIGHT: u32 = 2;
const BONUS_WEIGHT: u32 = 1;

/// Lowercased résumé text and its whitespace-separated words
#[derive(Debug, Clone)]
pub struct KeywordText {
    content: String,
    words: Vec<String>,
}

impl KeywordText {
    pub fn new(text: &str) -> Self {
        let content = text.to_lowercase();
        let words = content.split_whitespace().map(str::to_string).collect();
        Self { content, words }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.content.contains(&keyword.to_lowercase())
    }

    /// Number of words that contain `keyword` as a substring
    pub fn words_containing(&self, keyword: &str) -> usize {
        let keyword = keyword.to_lowercase();
        self.words.iter().filter(|w| w.contains(&keyword)).count()
    }

    pub fn any_word_contains(&self, keyword: &str) -> bool {
        self.words_containing(keyword) > 0
    }

    /// Sum of `words_containing` over a keyword table
    pub fn total_word_hits<S: AsRef<str>>(&self, keywords: &[S]) -> usize {
        keywords
            .iter()
            .map(|k| self.words_containing(k.as_ref()))
            .sum()
    }

    /// Entries of `keywords` that occur anywhere in the content, in table order
    pub fn find_present<S: AsRef<str>>(&self, keywords: &[S]) -> Result<Vec<String>> {
        if keywords.is_empty() {
            return Ok(Vec::new());
        }

        let patterns: Vec<&str> = keywords.iter().map(|k| k.as_ref()).collect();
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&patterns)
            .map_err(|e| NovaError::Processing(format!("Failed to build keyword matcher: {}", e)))?;

        let mut seen = vec![false; patterns.len()];
        for found in matcher.find_overlapping_iter(self.content.as_str()) {
            seen[found.pattern().as_usize()] = true;
        }

        Ok(patterns
            .iter()
            .zip(seen)
            .filter(|(_, hit)| *hit)
            .map(|(k, _)| k.to_string())
            .collect())
    }
}

/// Keyword table split by how much each entry matters
#[derive(Debug, Clone, Default)]
pub struct KeywordTiers {
    pub essential: Vec<String>,
    pub important: Vec<String>,
    pub bonus: Vec<String>,
}

impl KeywordTiers {
    pub fn new(essential: &[&str], important: &[&str], bonus: &[&str]) -> Self {
        let owned = |list: &[&str]| list.iter().map(|s| s.to_string()).collect();
        Self {
            essential: owned(essential),
            important: owned(important),
            bonus: owned(bonus),
        }
    }

    fn total_weight(&self) -> u32 {
        self.essential.len() as u32 * ESSENTIAL_WEIGHT
            + self.important.len() as u32 * IMPORTANT_WEIGHT
            + self.bonus.len() as u32 * BONUS_WEIGHT
    }
}

/// Per-category outcome on a 0-10 scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub name: String,
    pub present: Vec<String>,
    pub missing: Vec<String>,
    pub score: u8,
}

/// Weighted tier score. Missing bonus keywords are not reported.
pub fn score_tiers(text: &KeywordText, name: &str, tiers: &KeywordTiers) -> Result<CategoryBreakdown> {
    let essential = text.find_present(&tiers.essential)?;
    let important = text.find_present(&tiers.important)?;
    let bonus = text.find_present(&tiers.bonus)?;

    let hit_weight = essential.len() as u32 * ESSENTIAL_WEIGHT
        + important.len() as u32 * IMPORTANT_WEIGHT
        + bonus.len() as u32 * BONUS_WEIGHT;
    let total_weight = tiers.total_weight();

    let score = if total_weight == 0 {
        0
    } else {
        (hit_weight as f64 / total_weight as f64 * 10.0).round() as u8
    };

    let missing = tiers
        .essential
        .iter()
        .filter(|k| !essential.contains(k))
        .chain(tiers.important.iter().filter(|k| !important.contains(k)))
        .cloned()
        .collect();

    let mut present = essential;
    present.extend(important);
    present.extend(bonus);

    Ok(CategoryBreakdown {
        name: name.to_string(),
        present,
        missing,
        score,
    })
}

/// Uppercase the first character, leave the rest alone
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_hits_count_substrings() {
        let text = KeywordText::new("Senior Data Engineer, data-driven DATABASE work");
        assert_eq!(text.words_containing("data"), 3);
        assert!(text.any_word_contains("engineer"));
        assert_eq!(text.total_word_hits(&["senior", "work", "chef"]), 2);
    }

    #[test]
    fn test_find_present_keeps_table_order_and_overlaps() {
        let text = KeywordText::new("Built ML pipelines. Machine Learning with Python and SQL.");
        let found = text
            .find_present(&["sql", "machine learning", "learning", "python", "tableau"])
            .unwrap();
        assert_eq!(found, vec!["sql", "machine learning", "learning", "python"]);
    }

    #[test]
    fn test_tier_scoring() {
        let text = KeywordText::new("python pandas numpy spark");
        let tiers = KeywordTiers::new(&["python", "sql"], &["pandas", "numpy", "git"], &["spark", "scala"]);
        let result = score_tiers(&text, "programming", &tiers).unwrap();

        // hit 3 + 4 + 1 = 8 of 6 + 6 + 2 = 14
        assert_eq!(result.score, 6);
        assert_eq!(result.present, vec!["python", "pandas", "numpy", "spark"]);
        assert_eq!(result.missing, vec!["sql", "git"]);
    }

    #[test]
    fn test_empty_tiers_score_zero() {
        let text = KeywordText::new("anything");
        let result = score_tiers(&text, "core", &KeywordTiers::default()).unwrap();
        assert_eq!(result.score, 0);
        assert!(result.present.is_empty());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("node"), "Node");
        assert_eq!(capitalize(""), "");
    }
}
