use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::resume::ResumeInsights;
use super::scoring::SponsorshipVerdict;

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Identifier wrapper for candidate records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Identifier wrapper for scheduled interviews.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterviewId(pub String);

/// Identifier wrapper for stored email templates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateId(pub String);

/// Identifier wrapper for ingested resume documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub String);

/// Centres the operator currently hires for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobLocation {
    #[serde(rename = "Mount Isa")]
    MountIsa,
    #[serde(rename = "Moranbah")]
    Moranbah,
    #[serde(rename = "Charters Towers")]
    ChartersTowers,
}

impl JobLocation {
    pub const fn label(self) -> &'static str {
        match self {
            JobLocation::MountIsa => "Mount Isa",
            JobLocation::Moranbah => "Moranbah",
            JobLocation::ChartersTowers => "Charters Towers",
        }
    }
}

/// Work-rights category declared by the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisaStatus {
    Citizen,
    Permanent,
    Temporary,
    NeedsSponsorship,
}

/// Pipeline stage shared by candidates and applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    New,
    Screening,
    Interview,
    Offer,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::New => "new",
            ApplicationStatus::Screening => "screening",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Offer => "offer",
            ApplicationStatus::Hired => "hired",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelocationWillingness {
    Yes,
    No,
    Maybe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnglishLevel {
    Native,
    Fluent,
    Good,
    Basic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewType {
    Phone,
    Video,
    InPerson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl InterviewStatus {
    pub const fn label(self) -> &'static str {
        match self {
            InterviewStatus::Scheduled => "scheduled",
            InterviewStatus::Completed => "completed",
            InterviewStatus::Cancelled => "cancelled",
        }
    }
}

/// A published job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub location: JobLocation,
    pub sponsorship_eligible: bool,
    pub relocation_support: bool,
    pub housing_support: bool,
    pub description: String,
    pub requirements: Vec<String>,
    pub salary_range: Option<String>,
    pub employment_type: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for a job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub location: JobLocation,
    #[serde(default)]
    pub sponsorship_eligible: bool,
    #[serde(default)]
    pub relocation_support: bool,
    #[serde(default)]
    pub housing_support: bool,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default = "default_employment_type")]
    pub employment_type: String,
}

fn default_employment_type() -> String {
    "Full-time".to_string()
}

/// A candidate record with its current scoring snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub email: String,
    pub phone: String,
    pub full_name: String,
    pub location: String,
    pub visa_status: VisaStatus,
    pub visa_type: Option<String>,
    pub sponsorship_needed: bool,
    pub childcare_cert: Option<String>,
    pub experience_years: u8,
    pub rural_experience: bool,
    pub relocation_willing: RelocationWillingness,
    pub housing_needed: bool,
    pub english_level: EnglishLevel,
    pub skills: Vec<String>,
    pub availability_start: Option<DateTime<Utc>>,
    pub salary_expectation: Option<u32>,
    pub source: String,
    pub status: ApplicationStatus,
    pub score: f32,
    pub sponsorship: Option<SponsorshipVerdict>,
    pub notes: String,
    pub resume: Option<ResumeSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Candidate {
    /// Immutable scoring snapshot. Both rubrics read only these fields.
    pub fn profile(&self) -> CandidateProfile {
        CandidateProfile {
            experience_years: self.experience_years,
            sponsorship_needed: self.sponsorship_needed,
            visa_status: self.visa_status,
            rural_experience: self.rural_experience,
            english_level: self.english_level,
            certification: self.childcare_cert.clone(),
            skills: self.skills.clone(),
            relocation_willingness: self.relocation_willing,
        }
    }
}

/// Create/update payload for a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateDraft {
    pub email: String,
    pub phone: String,
    pub full_name: String,
    pub location: String,
    pub visa_status: VisaStatus,
    #[serde(default)]
    pub visa_type: Option<String>,
    pub sponsorship_needed: bool,
    #[serde(default)]
    pub childcare_cert: Option<String>,
    #[serde(default)]
    pub experience_years: u8,
    #[serde(default)]
    pub rural_experience: bool,
    pub relocation_willing: RelocationWillingness,
    #[serde(default)]
    pub housing_needed: bool,
    pub english_level: EnglishLevel,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub availability_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub salary_expectation: Option<u32>,
    #[serde(default)]
    pub notes: String,
}

/// Candidate attributes consumed by the scoring rubrics. Immutable per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub experience_years: u8,
    pub sponsorship_needed: bool,
    pub visa_status: VisaStatus,
    pub rural_experience: bool,
    pub english_level: EnglishLevel,
    pub certification: Option<String>,
    pub skills: Vec<String>,
    pub relocation_willingness: RelocationWillingness,
}

/// An application linking a candidate to a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub candidate_id: CandidateId,
    pub status: ApplicationStatus,
    pub cover_letter: Option<String>,
    pub notes: String,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub job_id: JobId,
    pub candidate_id: CandidateId,
    #[serde(default)]
    pub cover_letter: Option<String>,
}

/// Status transition payload for a single application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationUpdate {
    pub status: ApplicationStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Bulk status transition over a set of applications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkApplicationUpdate {
    pub application_ids: Vec<ApplicationId>,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A scheduled interview for an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    pub id: InterviewId,
    pub application_id: ApplicationId,
    pub candidate_id: CandidateId,
    pub job_id: JobId,
    pub interview_type: InterviewType,
    pub status: InterviewStatus,
    pub scheduled_at: DateTime<Utc>,
    pub interviewer: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewDraft {
    pub application_id: ApplicationId,
    pub interview_type: InterviewType,
    pub scheduled_at: DateTime<Utc>,
    pub interviewer: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewUpdate {
    pub status: InterviewStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Stored email template, keyed by kind for transition notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub id: TemplateId,
    pub name: String,
    pub subject: String,
    pub body: String,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplateDraft {
    pub name: String,
    pub subject: String,
    pub body: String,
    pub kind: String,
}

/// Audit record for an ingested resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub id: DocumentId,
    pub candidate_id: CandidateId,
    pub file_name: String,
    pub content_type: String,
    pub text_length: usize,
    pub insights: ResumeInsights,
    pub uploaded_at: DateTime<Utc>,
}

/// Compact pointer kept on the candidate once a resume is ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeSummary {
    pub document_id: DocumentId,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
}
