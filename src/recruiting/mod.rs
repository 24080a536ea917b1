//! Applicant tracking: job postings, candidate intake and scoring, resume
//! field extraction, applications and interviews, candidate mail, and the
//! careers-site mirror.

pub mod domain;
pub mod memory;
pub mod notifications;
pub mod repository;
pub mod resume;
pub mod router;
pub mod scoring;
pub mod service;
pub mod webhook;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationDraft, ApplicationId, ApplicationStatus, ApplicationUpdate,
    BulkApplicationUpdate, Candidate, CandidateDraft, CandidateId, CandidateProfile, DocumentId,
    EmailTemplate, EmailTemplateDraft, EnglishLevel, Interview, InterviewDraft, InterviewId,
    InterviewStatus, InterviewType, Job, JobDraft, JobId, JobLocation, RelocationWillingness,
    ResumeDocument, ResumeSummary, TemplateId, VisaStatus,
};
pub use memory::MemoryStore;
pub use notifications::{EmailMessage, Notifier, NotifyError};
pub use repository::{
    ApplicationFilter, CandidateFilter, InterviewFilter, JobFilter, RecruitingStore,
    RepositoryError,
};
pub use resume::{extract_insights, ResumeInsights};
pub use router::recruiting_router;
pub use scoring::{
    evaluate_sponsorship, score_profile, FitnessBreakdown, ScoreComponent, ScoreFactor,
    SponsorshipVerdict, MAX_SCORE,
};
pub use service::{
    DashboardStats, RecruitingService, RecruitingServiceError, ResumeUpload,
};
pub use webhook::{
    verify_signature, CareersPublisher, CareersTransport, JobEvent, SignedDelivery, WebhookError,
};
