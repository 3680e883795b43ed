// src/classify.rs
//! Article classifier: ordered, case-insensitive keyword rules.
//!
//! The first matching rule wins, so rule order is part of the behavior:
//! "emergency school closure" is `Emergency`, not `Education`.
//! No match falls back to `CivicServices` / `Medium`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Emergency,
    Health,
    Education,
    Transport,
    Infrastructure,
    Environment,
    Safety,
    Governance,
    Community,
    #[serde(rename = "Civic Services")]
    CivicServices,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Emergency,
        Category::Health,
        Category::Education,
        Category::Transport,
        Category::Infrastructure,
        Category::Environment,
        Category::Safety,
        Category::Governance,
        Category::Community,
        Category::CivicServices,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Emergency => "Emergency",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Transport => "Transport",
            Category::Infrastructure => "Infrastructure",
            Category::Environment => "Environment",
            Category::Safety => "Safety",
            Category::Governance => "Governance",
            Category::Community => "Community",
            Category::CivicServices => "Civic Services",
        }
    }

    /// Exact label match, ignoring ASCII case and surrounding whitespace.
    pub fn from_label(s: &str) -> Option<Category> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct Rule<T> {
    label: T,
    pattern: Regex,
}

fn rule<T>(label: T, pattern: &str) -> Rule<T> {
    Rule {
        label,
        pattern: Regex::new(&format!(r"(?i)\b(?:{pattern})")).expect("valid classifier pattern"),
    }
}

static CATEGORY_RULES: Lazy<Vec<Rule<Category>>> = Lazy::new(|| {
    vec![
        rule(
            Category::Emergency,
            r"emergenc(?:y|ies)\b|evacuat\w*|fires?\b|blaze|floods?\b|flooding|earthquake|gas leak|explosion|collaps\w*|rescue|cyclone|disaster|landslide",
        ),
        rule(
            Category::Health,
            r"hospital|health\w*|disease|vaccin\w*|dengue|malaria|covid|medical|clinic|outbreak|doctors?\b",
        ),
        rule(
            Category::Education,
            r"schools?\b|college|universit\w*|students?\b|exams?\b|education\w*|teachers?\b",
        ),
        rule(
            Category::Transport,
            r"traffic|metro\b|bus(?:es)?\b|railway|trains?\b|airport|transport\w*|commut\w*|flights?\b",
        ),
        rule(
            Category::Infrastructure,
            r"roads?\b|bridge|water supply|electricity|power cut|outage|construction|potholes?\b|sewage|sewer|drainage|infrastructure|pipeline",
        ),
        rule(
            Category::Environment,
            r"pollution|air quality|aqi\b|climate|waste|garbage|recycl\w*|trees?\b|environment\w*|heatwave|smog",
        ),
        rule(
            Category::Safety,
            r"police|crime|theft|safety|arrest\w*|accidents?\b|security|robbery|fraud",
        ),
        rule(
            Category::Governance,
            r"government|minister|municipal\w*|council|elections?\b|polic(?:y|ies)\b|parliament|court|budget|mayor|corporation",
        ),
        rule(
            Category::Community,
            r"community|festival|volunteer\w*|residents?\b|neighbou?rhood|charity|celebrat\w*",
        ),
    ]
});

static PRIORITY_RULES: Lazy<Vec<Rule<Priority>>> = Lazy::new(|| {
    vec![
        rule(
            Priority::Urgent,
            r"emergenc(?:y|ies)\b|urgent|breaking|evacuat\w*|gas leak|explosion|fires?\b|floods?\b|flooding|earthquake|alert|warning|collaps\w*|killed|dead\b|deaths?\b",
        ),
        rule(
            Priority::High,
            r"important|closures?\b|closed|outage|power cut|strike|protest\w*|accidents?\b|shortage|suspend\w*|disrupt\w*|advisory",
        ),
        rule(
            Priority::Low,
            r"festival|celebrat\w*|entertainment|sports?\b|lifestyle|opinion|review|feature",
        ),
    ]
});

fn first_match<T: Copy>(rules: &[Rule<T>], text: &str) -> Option<T> {
    rules
        .iter()
        .find(|r| r.pattern.is_match(text))
        .map(|r| r.label)
}

pub fn classify(text: &str) -> Category {
    first_match(&CATEGORY_RULES, text).unwrap_or(Category::CivicServices)
}

pub fn prioritize(text: &str) -> Priority {
    first_match(&PRIORITY_RULES, text).unwrap_or(Priority::Medium)
}

/// Minutes at 200 wpm, rounded up, never below 1.
pub fn estimate_read_time(text: &str) -> u32 {
    let words = text.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_order_prefers_emergency_over_education() {
        assert_eq!(classify("emergency school closure"), Category::Emergency);
        assert_eq!(classify("school reopens after holidays"), Category::Education);
    }

    #[test]
    fn word_boundaries_avoid_partial_hits() {
        // "fired" is not a fire, "busy" is not a bus
        assert_eq!(classify("Coach fired after busy season"), Category::CivicServices);
    }

    #[test]
    fn read_time_rounds_up_with_floor() {
        assert_eq!(estimate_read_time(""), 1);
        assert_eq!(estimate_read_time(&"w ".repeat(200)), 1);
        assert_eq!(estimate_read_time(&"w ".repeat(201)), 2);
    }

    #[test]
    fn label_lookup_ignores_case_only() {
        assert_eq!(Category::from_label("civic services"), Some(Category::CivicServices));
        assert_eq!(Category::from_label(" HEALTH "), Some(Category::Health));
        assert_eq!(Category::from_label("civic_services"), None);
        assert_eq!(Category::from_label("CivicServices"), None);
        assert_eq!(Category::from_label("sports"), None);
    }

    #[test]
    fn wire_form_matches_display_label() {
        for c in Category::ALL {
            let json = serde_json::to_string(&c).unwrap();
            assert_eq!(json, format!("\"{}\"", c.label()));
            let back: Category = serde_json::from_str(&json).unwrap();
            assert_eq!(back, c);
        }
    }
}
