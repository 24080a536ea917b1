use serde::{Deserialize, Serialize};

use super::super::domain::{CandidateProfile, EnglishLevel};

/// No age data is collected; the constant keeps the historical 0 to 12 range.
const AGE_SCORE: u8 = 3;

const QUALIFICATION_MATCHES: [&str; 3] = ["certificate iii", "diploma", "bachelor"];

const PATHWAY_TOP: &str = "Temporary Skill Shortage visa → Permanent visa";
const PATHWAY_STANDARD: &str = "Temporary Skill Shortage visa";

const REASON_NOT_NEEDED: &str = "No sponsorship required";
const REASON_STRONG: &str = "Strong candidate for visa sponsorship";
const REASON_ELIGIBLE: &str = "Eligible with some requirements to meet";
const REASON_INELIGIBLE: &str = "Does not meet minimum requirements for sponsorship";

/// Sponsorship-specific verdict, stored on the candidate as a snapshot.
///
/// `score` is the internal 0 to 12 sub-score used to pick the pathway bucket;
/// it is not the general fitness score and the two are never interchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SponsorshipVerdict {
    pub eligible: bool,
    pub reason: String,
    pub visa_pathway: Option<String>,
    pub requirements: Vec<String>,
    pub score: u8,
}

/// Evaluate a candidate's visa sponsorship case.
///
/// Candidates who do not need sponsorship short-circuit to an eligible
/// verdict. Everyone else accumulates four sub-scores; requirements are
/// appended in evaluation order: english, then experience, then
/// qualification.
pub fn evaluate_sponsorship(profile: &CandidateProfile) -> SponsorshipVerdict {
    if !profile.sponsorship_needed {
        return SponsorshipVerdict {
            eligible: true,
            reason: REASON_NOT_NEEDED.to_string(),
            visa_pathway: None,
            requirements: Vec::new(),
            score: 10,
        };
    }

    let mut requirements = Vec::new();

    let english_score = match profile.english_level {
        EnglishLevel::Native | EnglishLevel::Fluent => 3,
        EnglishLevel::Good => {
            requirements.push("IELTS test may be required".to_string());
            2
        }
        EnglishLevel::Basic => {
            requirements.push("English proficiency improvement required".to_string());
            0
        }
    };

    let experience_score = if profile.experience_years >= 3 {
        3
    } else if profile.experience_years >= 1 {
        requirements.push("Skills assessment required".to_string());
        2
    } else {
        requirements.push("Minimum 1 year experience required".to_string());
        0
    };

    let qualification_score = match profile
        .certification
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
    {
        Some(certification) => {
            let lowered = certification.to_lowercase();
            if QUALIFICATION_MATCHES
                .iter()
                .any(|needle| lowered.contains(needle))
            {
                3
            } else {
                requirements.push("Australian qualification assessment required".to_string());
                1
            }
        }
        None => {
            requirements.push("Relevant childcare qualification required".to_string());
            0
        }
    };

    let total = AGE_SCORE + english_score + experience_score + qualification_score;

    let (eligible, visa_pathway, reason) = if total >= 9 {
        (true, Some(PATHWAY_TOP.to_string()), REASON_STRONG)
    } else if total >= 6 {
        (true, Some(PATHWAY_STANDARD.to_string()), REASON_ELIGIBLE)
    } else {
        (false, None, REASON_INELIGIBLE)
    };

    SponsorshipVerdict {
        eligible,
        reason: reason.to_string(),
        visa_pathway,
        requirements,
        score: total,
    }
}
