use std::sync::{Arc, Mutex};

use crate::recruiting::domain::{
    CandidateDraft, CandidateProfile, EnglishLevel, JobDraft, JobLocation, RelocationWillingness,
    VisaStatus,
};
use crate::recruiting::memory::MemoryStore;
use crate::recruiting::notifications::{EmailMessage, Notifier, NotifyError};
use crate::recruiting::router::recruiting_router;
use crate::recruiting::service::RecruitingService;
use crate::recruiting::webhook::{
    CareersPublisher, CareersTransport, SignedDelivery, WebhookError,
};

pub(super) const TEST_WEBHOOK_SECRET: &str = "careers-secret";
pub(super) const TEST_WEBHOOK_ENDPOINT: &str = "https://careers.test/hooks";

/// Baseline profile: three years, temporary visa with sponsorship needed,
/// rural background, fluent english, nothing else. Scores 7.2.
pub(super) fn profile() -> CandidateProfile {
    CandidateProfile {
        experience_years: 3,
        sponsorship_needed: true,
        visa_status: VisaStatus::Temporary,
        rural_experience: true,
        english_level: EnglishLevel::Fluent,
        certification: None,
        skills: Vec::new(),
        relocation_willingness: RelocationWillingness::No,
    }
}

/// Strong local draft whose raw factor sum lands exactly on the cap.
pub(super) fn candidate_draft() -> CandidateDraft {
    CandidateDraft {
        email: "mia.walker@example.com".to_string(),
        phone: "+61 400 111 222".to_string(),
        full_name: "Mia Walker".to_string(),
        location: "Mount Isa".to_string(),
        visa_status: VisaStatus::Citizen,
        visa_type: None,
        sponsorship_needed: false,
        childcare_cert: None,
        experience_years: 5,
        rural_experience: true,
        relocation_willing: RelocationWillingness::Yes,
        housing_needed: false,
        english_level: EnglishLevel::Native,
        skills: Vec::new(),
        availability_start: None,
        salary_expectation: Some(68_000),
        notes: String::new(),
    }
}

pub(super) fn job_draft() -> JobDraft {
    JobDraft {
        title: "Early Childhood Educator".to_string(),
        location: JobLocation::MountIsa,
        sponsorship_eligible: true,
        relocation_support: true,
        housing_support: false,
        description: "Deliver early learning programs at our Mount Isa centre.".to_string(),
        requirements: vec![
            "Diploma in Early Childhood Education".to_string(),
            "Working with Children Check".to_string(),
        ],
        salary_range: Some("$60k-$70k".to_string()),
        employment_type: "Full-time".to_string(),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryMailbox {
    messages: Arc<Mutex<Vec<EmailMessage>>>,
}

impl MemoryMailbox {
    pub(super) fn messages(&self) -> Vec<EmailMessage> {
        self.messages.lock().expect("mailbox mutex poisoned").clone()
    }
}

impl Notifier for MemoryMailbox {
    fn send(&self, message: EmailMessage) -> Result<(), NotifyError> {
        self.messages
            .lock()
            .expect("mailbox mutex poisoned")
            .push(message);
        Ok(())
    }
}

pub(super) struct FailingMailbox;

impl Notifier for FailingMailbox {
    fn send(&self, _message: EmailMessage) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("provider offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryCareersHook {
    deliveries: Arc<Mutex<Vec<SignedDelivery>>>,
}

impl MemoryCareersHook {
    pub(super) fn deliveries(&self) -> Vec<SignedDelivery> {
        self.deliveries.lock().expect("hook mutex poisoned").clone()
    }
}

impl CareersTransport for MemoryCareersHook {
    fn deliver(&self, delivery: SignedDelivery) -> Result<(), WebhookError> {
        self.deliveries
            .lock()
            .expect("hook mutex poisoned")
            .push(delivery);
        Ok(())
    }
}

pub(super) type TestService = RecruitingService<MemoryStore, MemoryMailbox, MemoryCareersHook>;

pub(super) fn build_service() -> (
    TestService,
    Arc<MemoryStore>,
    Arc<MemoryMailbox>,
    Arc<MemoryCareersHook>,
) {
    let store = Arc::new(MemoryStore::default());
    let mailbox = Arc::new(MemoryMailbox::default());
    let hook = Arc::new(MemoryCareersHook::default());
    let publisher = CareersPublisher::new(
        Some(TEST_WEBHOOK_ENDPOINT.to_string()),
        TEST_WEBHOOK_SECRET.to_string(),
    );
    let service = RecruitingService::new(store.clone(), mailbox.clone(), hook.clone(), publisher);
    (service, store, mailbox, hook)
}

pub(super) fn build_service_without_webhook() -> (
    TestService,
    Arc<MemoryMailbox>,
    Arc<MemoryCareersHook>,
) {
    let store = Arc::new(MemoryStore::default());
    let mailbox = Arc::new(MemoryMailbox::default());
    let hook = Arc::new(MemoryCareersHook::default());
    let service = RecruitingService::new(
        store,
        mailbox.clone(),
        hook.clone(),
        CareersPublisher::disabled(),
    );
    (service, mailbox, hook)
}

pub(super) fn build_service_with_failing_mail(
) -> RecruitingService<MemoryStore, FailingMailbox, MemoryCareersHook> {
    RecruitingService::new(
        Arc::new(MemoryStore::default()),
        Arc::new(FailingMailbox),
        Arc::new(MemoryCareersHook::default()),
        CareersPublisher::disabled(),
    )
}

pub(super) fn build_router() -> axum::Router {
    let (service, _, _, _) = build_service();
    recruiting_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json body")
}
