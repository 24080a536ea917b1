//! Heuristic field extraction from resume plain text.
//!
//! The upload endpoint receives text that has already been pulled out of the
//! document by the file-handling layer; this module only pattern-matches it.
//! Extraction never fails: a resume that matches nothing yields empty
//! insights.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Canonical skill labels and the lowercase needle that detects each one.
const SKILL_KEYWORDS: [(&str, &str); 9] = [
    ("First Aid", "first aid"),
    ("CPR", "cpr"),
    ("Child Protection", "child protection"),
    ("Montessori", "montessori"),
    ("Program Planning", "program planning"),
    ("Behaviour Management", "behaviour management"),
    ("Early Literacy", "literacy"),
    ("Numeracy", "numeracy"),
    ("Teamwork", "teamwork"),
];

const MAX_EXPERIENCE_YEARS: u8 = 50;

fn qualification_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)\b(certificate\s+iii(?:\s+in\s+[a-z][a-z ]*)?|(?:diploma|bachelor)(?:\s+(?:of|in)\s+[a-z][a-z ]*)?)",
        )
        .expect("qualification pattern compiles")
    })
}

fn experience_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(\d{1,2})\s*\+?\s*(?:years?|yrs?)").expect("experience pattern compiles")
    })
}

fn rural_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\b(rural|remote|regional|outback)\b").expect("rural pattern compiles")
    })
}

/// Fields recovered from a resume. All optional; used to fill candidate
/// blanks before rescoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeInsights {
    pub skills: Vec<String>,
    pub certification: Option<String>,
    pub experience_years: Option<u8>,
    pub rural_experience: bool,
}

/// Scan resume text for skills, a qualification, an experience claim, and
/// rural signals.
pub fn extract_insights(text: &str) -> ResumeInsights {
    let lowered = text.to_lowercase();

    let mut found: Vec<(usize, &str)> = SKILL_KEYWORDS
        .iter()
        .filter_map(|(label, needle)| lowered.find(needle).map(|position| (position, *label)))
        .collect();
    // Report skills in the order they appear in the document.
    found.sort_by_key(|(position, _)| *position);
    let skills = found
        .into_iter()
        .map(|(_, label)| label.to_string())
        .collect();

    let certification = qualification_pattern()
        .find(text)
        .map(|found| found.as_str().trim().to_string());

    let experience_years = experience_pattern()
        .captures_iter(text)
        .filter_map(|captures| captures.get(1)?.as_str().parse::<u8>().ok())
        .max()
        .map(|years| years.min(MAX_EXPERIENCE_YEARS));

    let rural_experience = rural_pattern().is_match(text);

    ResumeInsights {
        skills,
        certification,
        experience_years,
        rural_experience,
    }
}
