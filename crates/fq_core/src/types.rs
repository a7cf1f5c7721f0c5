use serde::{Deserialize, Serialize};
use std::io::BufRead;

use crate::Result;

/// Title used when the structured data carries no usable `headline`.
pub const UNTITLED: &str = "Untitled";

/// One scraped blog article, written as a single JSONL line.
///
/// Field order is the order the keys appear in the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArticleRecord {
    pub title: String,
    pub url: String,
    pub article_content: String,
}

impl ArticleRecord {
    /// Builds a record, stripping surrounding whitespace from the body.
    pub fn new(title: Option<&str>, url: &str, body: &str) -> Self {
        Self {
            title: title.unwrap_or(UNTITLED).to_string(),
            url: url.to_string(),
            article_content: body.trim().to_string(),
        }
    }
}

/// Parses JSON lines into records. Blank lines are ignored; any other line
/// that is not exactly a record fails the whole read.
pub fn read_jsonl(reader: impl BufRead) -> Result<Vec<ArticleRecord>> {
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(records)
}
