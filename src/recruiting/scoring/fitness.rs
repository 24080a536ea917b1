use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::super::domain::{CandidateProfile, EnglishLevel, RelocationWillingness, VisaStatus};

/// Upper bound of the display score.
pub const MAX_SCORE: f32 = 10.0;

/// Ordered by priority; the first matching substring wins, so a compound
/// qualification string ("Diploma and Bachelor of Education") takes the
/// bachelor bonus and nothing else.
const QUALIFICATION_BONUSES: [(&str, f32); 3] = [
    ("bachelor", 1.5),
    ("diploma", 1.2),
    ("certificate iii", 1.0),
];

const SKILL_BONUS_STEP: f32 = 0.1;
const SKILL_BONUS_CAP: f32 = 0.5;

/// Rubric factor a fitness component is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Experience,
    Visa,
    RuralExperience,
    English,
    Qualification,
    Skills,
    Relocation,
}

/// Discrete contribution to the fitness score, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: f32,
    pub notes: String,
}

/// Fitness output: the component trail plus the clamped total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessBreakdown {
    pub components: Vec<ScoreComponent>,
    pub total: f32,
}

/// Compute the general fitness score for a candidate snapshot.
///
/// Every factor contributes independently; the sum is clamped at
/// [`MAX_SCORE`] because the result is displayed as "x/10".
pub fn score_profile(profile: &CandidateProfile) -> FitnessBreakdown {
    let mut components = Vec::with_capacity(7);

    let (points, notes) = experience_component(profile.experience_years);
    components.push(ScoreComponent {
        factor: ScoreFactor::Experience,
        points,
        notes,
    });

    let (points, notes) = visa_component(profile.sponsorship_needed, profile.visa_status);
    components.push(ScoreComponent {
        factor: ScoreFactor::Visa,
        points,
        notes,
    });

    let (points, notes) = if profile.rural_experience {
        (2.0, "rural or remote service experience".to_string())
    } else {
        (0.0, "no rural experience declared".to_string())
    };
    components.push(ScoreComponent {
        factor: ScoreFactor::RuralExperience,
        points,
        notes,
    });

    let (points, notes) = english_component(profile.english_level);
    components.push(ScoreComponent {
        factor: ScoreFactor::English,
        points,
        notes,
    });

    let (points, notes) = qualification_component(profile.certification.as_deref());
    components.push(ScoreComponent {
        factor: ScoreFactor::Qualification,
        points,
        notes,
    });

    let (points, notes) = skills_component(&profile.skills);
    components.push(ScoreComponent {
        factor: ScoreFactor::Skills,
        points,
        notes,
    });

    let (points, notes) = relocation_component(profile.relocation_willingness);
    components.push(ScoreComponent {
        factor: ScoreFactor::Relocation,
        points,
        notes,
    });

    let total = components
        .iter()
        .map(|component| component.points)
        .sum::<f32>()
        .min(MAX_SCORE);

    FitnessBreakdown { components, total }
}

fn experience_component(years: u8) -> (f32, String) {
    let points = if years >= 5 {
        3.0
    } else if years >= 3 {
        2.5
    } else if years >= 1 {
        1.5
    } else {
        0.0
    };
    (points, format!("{years} year(s) of experience"))
}

fn visa_component(sponsorship_needed: bool, visa_status: VisaStatus) -> (f32, String) {
    if !sponsorship_needed {
        return (3.0, "no sponsorship required".to_string());
    }
    match visa_status {
        VisaStatus::Temporary => (1.5, "temporary visa holder".to_string()),
        VisaStatus::NeedsSponsorship => (0.5, "sponsorship required".to_string()),
        _ => (0.0, "sponsorship required".to_string()),
    }
}

fn english_component(level: EnglishLevel) -> (f32, String) {
    let points = match level {
        EnglishLevel::Native => 1.5,
        EnglishLevel::Fluent => 1.2,
        EnglishLevel::Good => 0.8,
        EnglishLevel::Basic => 0.3,
    };
    (points, format!("english level {level:?}").to_lowercase())
}

fn qualification_component(certification: Option<&str>) -> (f32, String) {
    let Some(certification) = certification.map(str::trim).filter(|text| !text.is_empty()) else {
        return (0.0, "no qualification recorded".to_string());
    };

    let lowered = certification.to_lowercase();
    for (needle, bonus) in QUALIFICATION_BONUSES {
        if lowered.contains(needle) {
            return (bonus, format!("qualification matches '{needle}'"));
        }
    }
    (0.0, "qualification does not match a known level".to_string())
}

fn skills_component(skills: &[String]) -> (f32, String) {
    let distinct: BTreeSet<String> = skills
        .iter()
        .map(|skill| skill.trim().to_lowercase())
        .filter(|skill| !skill.is_empty())
        .collect();

    let points = (distinct.len() as f32 * SKILL_BONUS_STEP).min(SKILL_BONUS_CAP);
    (points, format!("{} distinct skill(s)", distinct.len()))
}

fn relocation_component(willingness: RelocationWillingness) -> (f32, String) {
    match willingness {
        RelocationWillingness::Yes => (0.5, "willing to relocate".to_string()),
        RelocationWillingness::Maybe => (0.2, "may consider relocation".to_string()),
        RelocationWillingness::No => (0.0, "not willing to relocate".to_string()),
    }
}
