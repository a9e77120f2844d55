//! Subject normalization.
//!
//! Normalization happens exactly once, at ingestion. Everything downstream
//! receives the canonical form and never re-normalizes.

use crate::error::PipelineError;
use std::fmt;

/// A normalized entity name (e.g. a country).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject(String);

impl Subject {
    /// Trim and title-case raw input ("  south  korea " -> "South Korea").
    /// Empty input after trimming is rejected before any network call.
    pub fn parse(raw: &str) -> Result<Self, PipelineError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PipelineError::InvalidSubject);
        }

        let normalized = trimmed
            .split_whitespace()
            .map(title_case_word)
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_title_cases() {
        assert_eq!(Subject::parse("pakistan").unwrap().as_str(), "Pakistan");
        assert_eq!(Subject::parse("SOUTH KOREA").unwrap().as_str(), "South Korea");
        assert_eq!(Subject::parse("  new  zealand  ").unwrap().as_str(), "New Zealand");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(Subject::parse(""), Err(PipelineError::InvalidSubject)));
        assert!(matches!(Subject::parse("   "), Err(PipelineError::InvalidSubject)));
    }

    #[test]
    fn test_parse_is_idempotent_on_canonical_form() {
        let once = Subject::parse("sri lanka").unwrap();
        let twice = Subject::parse(once.as_str()).unwrap();
        assert_eq!(once, twice);
    }
}
