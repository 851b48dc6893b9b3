//! Derivation of slugs and excerpts from article text.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use schoolcms_core::config::ContentConfig;

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("TAG_REGEX: invalid regex pattern"));

/// Used when a title slugifies to nothing (e.g. only punctuation).
const FALLBACK_SLUG: &str = "article";

/// Rules for deriving article fields from the title and body.
#[derive(Debug, Clone)]
pub struct ContentRules {
    excerpt_length: usize,
    excerpt_suffix: String,
}

impl ContentRules {
    /// Build the rules from configuration.
    pub fn new(config: &ContentConfig) -> Self {
        Self {
            excerpt_length: config.excerpt_length,
            excerpt_suffix: config.excerpt_suffix.clone(),
        }
    }

    /// `slugify(title)-<millis>`, using `at` for the suffix.
    pub fn slug(&self, title: &str, at: DateTime<Utc>) -> String {
        let base = slug::slugify(title);
        let base = if base.is_empty() {
            FALLBACK_SLUG
        } else {
            base.as_str()
        };
        format!("{base}-{}", at.timestamp_millis())
    }

    /// First `excerpt_length` characters of the tag-stripped, trimmed
    /// content, followed by the suffix.
    pub fn excerpt(&self, content: &str) -> String {
        let plain = strip_tags(content);
        let head: String = plain.trim().chars().take(self.excerpt_length).collect();
        format!("{head}{}", self.excerpt_suffix)
    }

    /// Keep a supplied excerpt unless it is blank; otherwise derive one.
    pub fn resolve_excerpt(&self, supplied: Option<&str>, content: &str) -> String {
        match supplied.map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => self.excerpt(content),
        }
    }
}

impl Default for ContentRules {
    fn default() -> Self {
        Self::new(&ContentConfig::default())
    }
}

/// Remove every `<...>` tag from `html`.
pub fn strip_tags(html: &str) -> String {
    TAG_REGEX.replace_all(html, "").into_owned()
}
