use crate::recruiting::resume::{extract_insights, ResumeInsights};

#[test]
fn skills_are_reported_in_document_order() {
    let text = "Trained in CPR and first aid. Montessori classroom lead with a \
                focus on early literacy.";
    let insights = extract_insights(text);
    assert_eq!(
        insights.skills,
        vec![
            "CPR".to_string(),
            "First Aid".to_string(),
            "Montessori".to_string(),
            "Early Literacy".to_string(),
        ]
    );
}

#[test]
fn qualification_phrases_are_captured() {
    let cases = [
        (
            "Holds a Certificate III in Early Childhood Education and Care.",
            "Certificate III in Early Childhood Education and Care",
        ),
        ("Diploma (Early Childhood), 2019.", "Diploma"),
        ("Bachelor of Education, QUT.", "Bachelor of Education"),
    ];
    for (text, expected) in cases {
        let insights = extract_insights(text);
        assert_eq!(
            insights.certification.as_deref(),
            Some(expected),
            "for {text:?}"
        );
    }
}

#[test]
fn experience_takes_the_largest_claim() {
    let text = "2 years as a room assistant, then 7 years as lead educator. \
                Also 3 yrs casual relief work.";
    let insights = extract_insights(text);
    assert_eq!(insights.experience_years, Some(7));
}

#[test]
fn experience_claims_are_bounded() {
    let insights = extract_insights("Over 99 years of combined family experience.");
    assert_eq!(insights.experience_years, Some(50));
}

#[test]
fn rural_keywords_set_the_flag() {
    assert!(extract_insights("Worked at a remote community centre.").rural_experience);
    assert!(extract_insights("Regional Queensland placements.").rural_experience);
    assert!(!extract_insights("Inner-city Brisbane centres only.").rural_experience);
}

#[test]
fn rural_keywords_match_whole_words_only() {
    assert!(!extract_insights("Delivered programs remotely during closures.").rural_experience);
}

#[test]
fn empty_text_yields_default_insights() {
    assert_eq!(extract_insights(""), ResumeInsights::default());
}
