// ABOUTME: Title tokenization, word frequency, and lexicon-based sentiment tallies
// ABOUTME: Fixed stop-word and sentiment lexicons; top 20 words by frequency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Insights

use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Words too common to be informative in activity titles
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "at", "by", "for", "from", "in", "into", "is", "it", "my", "of", "on",
    "or", "our", "out", "run", "running", "the", "their", "this", "to", "up", "was", "we",
    "with", "your",
];

/// Words signalling a positive title
const POSITIVE_WORDS: &[&str] = &[
    "amazing", "awesome", "beautiful", "best", "easy", "epic", "fast", "fresh", "fun", "good",
    "great", "happy", "nice", "perfect", "pr", "smooth", "solid", "strong", "sunny",
];

/// Words signalling a negative title
const NEGATIVE_WORDS: &[&str] = &[
    "awful", "bad", "brutal", "cold", "dead", "exhausted", "hard", "heavy", "hurt", "injured",
    "painful", "rain", "rough", "sick", "slog", "slow", "sore", "tired", "tough", "windy",
];

/// One entry in the word frequency table
#[derive(Debug, Clone, Serialize)]
pub struct WordCount {
    /// Lower-cased token
    pub word: String,
    /// Occurrences across all titles
    pub count: usize,
    /// Percentage of titles containing the word at least once
    pub pct_of_titles: f64,
}

/// Word frequency and sentiment report for a set of activity titles
#[derive(Debug, Clone, Serialize)]
pub struct TitleAnalysis {
    /// Number of titles analyzed
    pub total_titles: usize,
    /// Top 20 words by frequency
    pub top_words: Vec<WordCount>,
    /// Titles with only positive lexicon hits
    pub positive: usize,
    /// Titles with only negative lexicon hits
    pub negative: usize,
    /// Titles with both or neither
    pub neutral: usize,
    /// One-sentence natural-language summary
    pub summary: String,
}

/// Lower-case, strip punctuation, split on whitespace, drop stop words.
fn tokenize(title: &str) -> Vec<String> {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '\'' { c } else { ' ' })
        .collect();
    cleaned
        .split_whitespace()
        .map(|w| w.trim_matches('\'').to_owned())
        .filter(|w| !w.is_empty() && !STOP_WORDS.contains(&w.as_str()))
        .collect()
}

/// Analyze activity titles for word frequency and sentiment.
#[must_use]
pub fn analyze_titles(titles: &[&str]) -> TitleAnalysis {
    let positive_set: HashSet<&str> = POSITIVE_WORDS.iter().copied().collect();
    let negative_set: HashSet<&str> = NEGATIVE_WORDS.iter().copied().collect();

    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut titles_containing: HashMap<String, usize> = HashMap::new();
    let mut positive = 0_usize;
    let mut negative = 0_usize;
    let mut neutral = 0_usize;

    for title in titles {
        let tokens = tokenize(title);
        let unique: HashSet<&String> = tokens.iter().collect();
        for word in &tokens {
            *counts.entry(word.clone()).or_insert(0) += 1;
        }
        for word in unique {
            *titles_containing.entry(word.clone()).or_insert(0) += 1;
        }

        let has_positive = tokens.iter().any(|w| positive_set.contains(w.as_str()));
        let has_negative = tokens.iter().any(|w| negative_set.contains(w.as_str()));
        match (has_positive, has_negative) {
            (true, false) => positive += 1,
            (false, true) => negative += 1,
            _ => neutral += 1,
        }
    }

    let total_titles = titles.len();
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    // Count descending, then alphabetical so equal counts are deterministic
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let top_words: Vec<WordCount> = ranked
        .into_iter()
        .take(20)
        .map(|(word, count)| {
            let containing = titles_containing.get(&word).copied().unwrap_or(0);
            let pct_of_titles = if total_titles == 0 {
                0.0
            } else {
                containing as f64 / total_titles as f64 * 100.0
            };
            WordCount {
                word,
                count,
                pct_of_titles,
            }
        })
        .collect();

    let summary = if total_titles == 0 {
        "No titles to analyze.".to_owned()
    } else {
        format!(
            "{total_titles} titles: {positive} positive, {negative} negative, {neutral} neutral.",
        )
    };

    TitleAnalysis {
        total_titles,
        top_words,
        positive,
        negative,
        neutral,
        summary,
    }
}
