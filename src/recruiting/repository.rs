use super::domain::{
    Application, ApplicationId, ApplicationStatus, Candidate, CandidateId, EmailTemplate,
    Interview, InterviewId, InterviewStatus, Job, JobId, ResumeDocument, VisaStatus,
};

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Listing filter for job postings.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub status: Option<String>,
}

/// Listing filter for candidates; mirrors the recruiter search form.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    pub location_contains: Option<String>,
    pub visa_status: Option<VisaStatus>,
    pub sponsorship_needed: Option<bool>,
    pub status: Option<ApplicationStatus>,
}

/// Listing filter for applications.
#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub job_id: Option<JobId>,
    pub candidate_id: Option<CandidateId>,
    pub status: Option<ApplicationStatus>,
}

/// Listing filter for interviews.
#[derive(Debug, Clone, Default)]
pub struct InterviewFilter {
    pub candidate_id: Option<CandidateId>,
    pub job_id: Option<JobId>,
    pub status: Option<InterviewStatus>,
}

/// Storage abstraction so the service module can be exercised in isolation.
///
/// List operations return records in their canonical display order: jobs and
/// applications newest first, candidates by score descending.
pub trait RecruitingStore: Send + Sync {
    fn insert_job(&self, job: Job) -> Result<Job, RepositoryError>;
    fn update_job(&self, job: Job) -> Result<(), RepositoryError>;
    fn fetch_job(&self, id: &JobId) -> Result<Option<Job>, RepositoryError>;
    fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>, RepositoryError>;

    fn insert_candidate(&self, candidate: Candidate) -> Result<Candidate, RepositoryError>;
    fn update_candidate(&self, candidate: Candidate) -> Result<(), RepositoryError>;
    fn fetch_candidate(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError>;
    fn list_candidates(&self, filter: &CandidateFilter) -> Result<Vec<Candidate>, RepositoryError>;

    fn insert_application(&self, application: Application)
        -> Result<Application, RepositoryError>;
    fn update_application(&self, application: Application) -> Result<(), RepositoryError>;
    fn fetch_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, RepositoryError>;
    fn list_applications(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<Vec<Application>, RepositoryError>;

    fn insert_interview(&self, interview: Interview) -> Result<Interview, RepositoryError>;
    fn update_interview(&self, interview: Interview) -> Result<(), RepositoryError>;
    fn fetch_interview(&self, id: &InterviewId) -> Result<Option<Interview>, RepositoryError>;
    fn list_interviews(&self, filter: &InterviewFilter)
        -> Result<Vec<Interview>, RepositoryError>;

    /// Replaces any existing template of the same kind.
    fn upsert_template(&self, template: EmailTemplate) -> Result<EmailTemplate, RepositoryError>;
    fn fetch_template_by_kind(
        &self,
        kind: &str,
    ) -> Result<Option<EmailTemplate>, RepositoryError>;
    fn list_templates(&self) -> Result<Vec<EmailTemplate>, RepositoryError>;

    fn insert_document(&self, document: ResumeDocument) -> Result<ResumeDocument, RepositoryError>;
    fn list_documents(
        &self,
        candidate_id: &CandidateId,
    ) -> Result<Vec<ResumeDocument>, RepositoryError>;
}
