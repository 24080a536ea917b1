//! Integration scenarios for the recruiting pipeline.
//!
//! Scenarios exercise the public service facade and HTTP router end to end:
//! candidate intake with scoring, application progress with notifications,
//! and the careers-site mirror, without reaching into private modules.

mod common {
    use std::sync::{Arc, Mutex};

    use gro_ats::recruiting::domain::{
        CandidateDraft, EnglishLevel, JobDraft, JobLocation, RelocationWillingness, VisaStatus,
    };
    use gro_ats::recruiting::memory::MemoryStore;
    use gro_ats::recruiting::notifications::{EmailMessage, Notifier, NotifyError};
    use gro_ats::recruiting::webhook::{
        CareersPublisher, CareersTransport, SignedDelivery, WebhookError,
    };
    use gro_ats::recruiting::RecruitingService;

    pub(super) const WEBHOOK_SECRET: &str = "integration-secret";

    pub(super) fn job_draft() -> JobDraft {
        JobDraft {
            title: "Lead Educator".to_string(),
            location: JobLocation::Moranbah,
            sponsorship_eligible: true,
            relocation_support: true,
            housing_support: true,
            description: "Lead the toddler room at our Moranbah centre.".to_string(),
            requirements: vec!["Diploma in Early Childhood Education".to_string()],
            salary_range: Some("$65k-$75k".to_string()),
            employment_type: "Full-time".to_string(),
        }
    }

    pub(super) fn local_candidate() -> CandidateDraft {
        CandidateDraft {
            email: "sophie.nguyen@example.com".to_string(),
            phone: "+61 400 555 111".to_string(),
            full_name: "Sophie Nguyen".to_string(),
            location: "Townsville".to_string(),
            visa_status: VisaStatus::Citizen,
            visa_type: None,
            sponsorship_needed: false,
            childcare_cert: Some("Diploma of Early Childhood Education".to_string()),
            experience_years: 6,
            rural_experience: true,
            relocation_willing: RelocationWillingness::Yes,
            housing_needed: false,
            english_level: EnglishLevel::Native,
            skills: vec!["First Aid".to_string(), "CPR".to_string()],
            availability_start: None,
            salary_expectation: Some(70_000),
            notes: String::new(),
        }
    }

    pub(super) fn sponsored_candidate() -> CandidateDraft {
        CandidateDraft {
            email: "amara.okafor@example.com".to_string(),
            phone: "+234 800 123 456".to_string(),
            full_name: "Amara Okafor".to_string(),
            location: "Lagos".to_string(),
            visa_status: VisaStatus::NeedsSponsorship,
            visa_type: None,
            sponsorship_needed: true,
            childcare_cert: Some("Bachelor of Education".to_string()),
            experience_years: 4,
            rural_experience: false,
            relocation_willing: RelocationWillingness::Yes,
            housing_needed: true,
            english_level: EnglishLevel::Fluent,
            skills: vec!["Montessori".to_string()],
            availability_start: None,
            salary_expectation: None,
            notes: String::new(),
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct Mailbox {
        messages: Arc<Mutex<Vec<EmailMessage>>>,
    }

    impl Mailbox {
        pub(super) fn messages(&self) -> Vec<EmailMessage> {
            self.messages.lock().expect("lock").clone()
        }
    }

    impl Notifier for Mailbox {
        fn send(&self, message: EmailMessage) -> Result<(), NotifyError> {
            self.messages.lock().expect("lock").push(message);
            Ok(())
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct CareersHook {
        deliveries: Arc<Mutex<Vec<SignedDelivery>>>,
    }

    impl CareersHook {
        pub(super) fn deliveries(&self) -> Vec<SignedDelivery> {
            self.deliveries.lock().expect("lock").clone()
        }
    }

    impl CareersTransport for CareersHook {
        fn deliver(&self, delivery: SignedDelivery) -> Result<(), WebhookError> {
            self.deliveries.lock().expect("lock").push(delivery);
            Ok(())
        }
    }

    pub(super) fn build_service() -> (
        RecruitingService<MemoryStore, Mailbox, CareersHook>,
        Arc<Mailbox>,
        Arc<CareersHook>,
    ) {
        let store = Arc::new(MemoryStore::default());
        let mailbox = Arc::new(Mailbox::default());
        let hook = Arc::new(CareersHook::default());
        let publisher = CareersPublisher::new(
            Some("https://careers.example.com/api/webhooks/jobs".to_string()),
            WEBHOOK_SECRET.to_string(),
        );
        let service = RecruitingService::new(store, mailbox.clone(), hook.clone(), publisher);
        (service, mailbox, hook)
    }
}

mod scoring {
    use super::common::*;

    #[test]
    fn local_candidate_is_scored_on_intake() {
        let (service, _, _) = build_service();
        let candidate = service
            .create_candidate(local_candidate())
            .expect("candidate created");

        // 3.0 + 3.0 + 2.0 + 1.5 + 1.2 + 0.2 + 0.5 clamps at 10.
        assert!((candidate.score - 10.0).abs() < 1e-5);
        let verdict = candidate.sponsorship.expect("verdict stored");
        assert!(verdict.eligible);
        assert_eq!(verdict.reason, "No sponsorship required");
    }

    #[test]
    fn sponsored_candidate_gets_a_pathway() {
        let (service, _, _) = build_service();
        let candidate = service
            .create_candidate(sponsored_candidate())
            .expect("candidate created");

        let verdict = candidate.sponsorship.expect("verdict stored");
        assert!(verdict.eligible);
        assert_eq!(verdict.score, 12);
        assert_eq!(
            verdict.visa_pathway.as_deref(),
            Some("Temporary Skill Shortage visa → Permanent visa")
        );
        assert!(verdict.requirements.is_empty());
    }
}

mod pipeline {
    use super::common::*;
    use gro_ats::recruiting::domain::{ApplicationDraft, ApplicationStatus, ApplicationUpdate};
    use gro_ats::recruiting::webhook::verify_signature;

    #[test]
    fn intake_to_offer_sends_each_notification() {
        let (service, mailbox, _) = build_service();
        let job = service.create_job(job_draft()).expect("job created");
        let candidate = service
            .create_candidate(local_candidate())
            .expect("candidate created");
        let application = service
            .create_application(ApplicationDraft {
                job_id: job.id,
                candidate_id: candidate.id,
                cover_letter: None,
            })
            .expect("application created");

        for status in [
            ApplicationStatus::Screening,
            ApplicationStatus::Interview,
            ApplicationStatus::Offer,
        ] {
            service
                .update_application(
                    &application.id,
                    ApplicationUpdate {
                        status,
                        notes: None,
                    },
                )
                .expect("status updated");
        }

        let messages = mailbox.messages();
        // Welcome, confirmation, and one mail per status transition.
        assert_eq!(messages.len(), 5);
        assert!(messages[0].subject.contains("Welcome"));
        assert!(messages[1].subject.starts_with("Application Confirmation"));
        assert!(messages[4].html_body.contains("extend an offer"));
    }

    #[test]
    fn job_lifecycle_is_mirrored_with_verifiable_signatures() {
        let (service, _, hook) = build_service();
        let job = service.create_job(job_draft()).expect("job created");
        service.update_job(&job.id, job_draft()).expect("job updated");

        let deliveries = hook.deliveries();
        assert_eq!(deliveries.len(), 2);
        for delivery in &deliveries {
            assert!(verify_signature(
                WEBHOOK_SECRET,
                delivery.body.as_bytes(),
                &delivery.signature,
            ));
        }

        let first: serde_json::Value =
            serde_json::from_str(&deliveries[0].body).expect("payload parses");
        assert_eq!(first["event"], "job.created");
        let second: serde_json::Value =
            serde_json::from_str(&deliveries[1].body).expect("payload parses");
        assert_eq!(second["event"], "job.updated");
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use gro_ats::recruiting::recruiting_router;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn build_router() -> axum::Router {
        let (service, _, _) = build_service();
        recruiting_router(Arc::new(service))
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn candidate_intake_round_trips_over_http() {
        let router = build_router();

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/candidates")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&local_candidate()).expect("serialize draft"),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = read_json(response).await;
        let candidate_id = created["id"].as_str().expect("id present").to_string();
        assert!(created["score"].as_f64().expect("score present") > 9.0);

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/api/candidates/{candidate_id}"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let fetched = read_json(response).await;
        assert_eq!(fetched["full_name"], json!("Sophie Nguyen"));

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/api/candidates/{candidate_id}/sponsorship"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let verdict = read_json(response).await;
        assert_eq!(verdict["eligible"], json!(true));
    }

    #[tokio::test]
    async fn resume_upload_enriches_the_candidate() {
        let router = build_router();

        let mut draft = local_candidate();
        draft.childcare_cert = None;
        draft.experience_years = 1;
        draft.skills = Vec::new();
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/candidates")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&draft).expect("serialize draft"),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        let created = read_json(response).await;
        let candidate_id = created["id"].as_str().expect("id present").to_string();

        let upload = json!({
            "file_name": "sophie-nguyen.txt",
            "content_type": "text/plain",
            "text": "Diploma of Early Childhood Education. 6 years leading \
                     rooms in regional Queensland. First aid and CPR certified.",
        });
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/candidates/{candidate_id}/resume"))
                    .header("content-type", "application/json")
                    .body(Body::from(upload.to_string()))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::CREATED);
        let payload = read_json(response).await;
        assert_eq!(payload["candidate"]["experience_years"], json!(6));
        assert_eq!(
            payload["candidate"]["childcare_cert"],
            json!("Diploma of Early Childhood Education")
        );
        assert_eq!(payload["document"]["insights"]["rural_experience"], json!(true));

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/api/candidates/{candidate_id}/resume"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let documents = read_json(response).await;
        assert_eq!(documents.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn interview_scheduling_follows_the_application() {
        let router = build_router();

        let job = read_json(
            router
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/api/jobs")
                        .header("content-type", "application/json")
                        .body(Body::from(
                            serde_json::to_vec(&job_draft()).expect("serialize draft"),
                        ))
                        .expect("request"),
                )
                .await
                .expect("router dispatch"),
        )
        .await;
        let candidate = read_json(
            router
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/api/candidates")
                        .header("content-type", "application/json")
                        .body(Body::from(
                            serde_json::to_vec(&local_candidate()).expect("serialize draft"),
                        ))
                        .expect("request"),
                )
                .await
                .expect("router dispatch"),
        )
        .await;
        let application = read_json(
            router
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/api/applications")
                        .header("content-type", "application/json")
                        .body(Body::from(
                            json!({
                                "job_id": job["id"],
                                "candidate_id": candidate["id"],
                            })
                            .to_string(),
                        ))
                        .expect("request"),
                )
                .await
                .expect("router dispatch"),
        )
        .await;

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/interviews")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({
                            "application_id": application["id"],
                            "interview_type": "video",
                            "scheduled_at": "2026-09-21T09:00:00Z",
                            "interviewer": "Centre Director",
                        })
                        .to_string(),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::CREATED);
        let interview = read_json(response).await;
        assert_eq!(interview["status"], json!("scheduled"));
        assert_eq!(interview["candidate_id"], candidate["id"]);
        assert_eq!(interview["job_id"], job["id"]);
    }
}
