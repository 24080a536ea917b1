use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, warn};

use super::domain::{
    Application, ApplicationDraft, ApplicationId, ApplicationStatus, ApplicationUpdate,
    BulkApplicationUpdate, Candidate, CandidateDraft, CandidateId, DocumentId, EmailTemplate,
    EmailTemplateDraft, Interview, InterviewDraft, InterviewId, InterviewStatus, InterviewUpdate,
    Job, JobDraft, JobId, ResumeDocument, ResumeSummary, TemplateId,
};
use super::notifications::{
    self, EmailMessage, Notifier, KIND_APPLICATION_CONFIRMATION, KIND_APPLICATION_RECEIVED,
    KIND_STATUS_UPDATE,
};
use super::repository::{
    ApplicationFilter, CandidateFilter, InterviewFilter, JobFilter, RecruitingStore,
    RepositoryError,
};
use super::resume::{self, ResumeInsights};
use super::scoring::{evaluate_sponsorship, score_profile, SponsorshipVerdict};
use super::webhook::{CareersPublisher, CareersTransport, JobEvent};

static JOB_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static CANDIDATE_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static INTERVIEW_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static TEMPLATE_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static DOCUMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_id(sequence: &AtomicU64, prefix: &str) -> String {
    let id = sequence.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id:06}")
}

/// Resume upload already reduced to plain text by the file-handling layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: String,
    pub text: String,
}

/// Aggregate counters for the recruiting dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_jobs: usize,
    pub total_candidates: usize,
    pub total_applications: usize,
    pub applications_by_status: BTreeMap<String, usize>,
    pub visa_sponsorship: BTreeMap<String, usize>,
    pub jobs_by_location: BTreeMap<String, usize>,
}

/// Error raised by the recruiting service.
#[derive(Debug, thiserror::Error)]
pub enum RecruitingServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("{entity} not found")]
    MissingDependency { entity: &'static str },
    #[error("unsupported resume content type: {0}")]
    UnsupportedResume(String),
}

/// Service composing the store, scoring rubrics, mail hook, and careers
/// mirror. Side-effect failures (mail, webhook) are logged and never fail the
/// triggering request.
pub struct RecruitingService<S, N, W> {
    store: Arc<S>,
    notifier: Arc<N>,
    careers_transport: Arc<W>,
    careers: CareersPublisher,
}

impl<S, N, W> RecruitingService<S, N, W>
where
    S: RecruitingStore + 'static,
    N: Notifier + 'static,
    W: CareersTransport + 'static,
{
    pub fn new(
        store: Arc<S>,
        notifier: Arc<N>,
        careers_transport: Arc<W>,
        careers: CareersPublisher,
    ) -> Self {
        Self {
            store,
            notifier,
            careers_transport,
            careers,
        }
    }

    // Jobs

    pub fn create_job(&self, draft: JobDraft) -> Result<Job, RecruitingServiceError> {
        let now = Utc::now();
        let job = Job {
            id: JobId(next_id(&JOB_SEQUENCE, "job")),
            title: draft.title,
            location: draft.location,
            sponsorship_eligible: draft.sponsorship_eligible,
            relocation_support: draft.relocation_support,
            housing_support: draft.housing_support,
            description: draft.description,
            requirements: draft.requirements,
            salary_range: draft.salary_range,
            employment_type: draft.employment_type,
            status: "active".to_string(),
            created_at: now,
            updated_at: now,
        };

        let stored = self.store.insert_job(job)?;
        self.mirror_job(&stored, JobEvent::Created);
        Ok(stored)
    }

    pub fn update_job(&self, id: &JobId, draft: JobDraft) -> Result<Job, RecruitingServiceError> {
        let mut job = self
            .store
            .fetch_job(id)?
            .ok_or(RepositoryError::NotFound)?;

        job.title = draft.title;
        job.location = draft.location;
        job.sponsorship_eligible = draft.sponsorship_eligible;
        job.relocation_support = draft.relocation_support;
        job.housing_support = draft.housing_support;
        job.description = draft.description;
        job.requirements = draft.requirements;
        job.salary_range = draft.salary_range;
        job.employment_type = draft.employment_type;
        job.updated_at = Utc::now();

        self.store.update_job(job.clone())?;
        self.mirror_job(&job, JobEvent::Updated);
        Ok(job)
    }

    pub fn get_job(&self, id: &JobId) -> Result<Job, RecruitingServiceError> {
        Ok(self
            .store
            .fetch_job(id)?
            .ok_or(RepositoryError::NotFound)?)
    }

    pub fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>, RecruitingServiceError> {
        Ok(self.store.list_jobs(filter)?)
    }

    // Candidates

    pub fn create_candidate(
        &self,
        draft: CandidateDraft,
    ) -> Result<Candidate, RecruitingServiceError> {
        let now = Utc::now();
        let mut candidate = Candidate {
            id: CandidateId(next_id(&CANDIDATE_SEQUENCE, "cand")),
            email: draft.email,
            phone: draft.phone,
            full_name: draft.full_name,
            location: draft.location,
            visa_status: draft.visa_status,
            visa_type: draft.visa_type,
            sponsorship_needed: draft.sponsorship_needed,
            childcare_cert: draft.childcare_cert,
            experience_years: draft.experience_years,
            rural_experience: draft.rural_experience,
            relocation_willing: draft.relocation_willing,
            housing_needed: draft.housing_needed,
            english_level: draft.english_level,
            skills: draft.skills,
            availability_start: draft.availability_start,
            salary_expectation: draft.salary_expectation,
            source: "direct".to_string(),
            status: ApplicationStatus::New,
            score: 0.0,
            sponsorship: None,
            notes: draft.notes,
            resume: None,
            created_at: now,
            updated_at: now,
        };
        self.rescore(&mut candidate);

        let stored = self.store.insert_candidate(candidate)?;
        self.notify(self.welcome_email(&stored));
        Ok(stored)
    }

    pub fn update_candidate(
        &self,
        id: &CandidateId,
        draft: CandidateDraft,
    ) -> Result<Candidate, RecruitingServiceError> {
        let mut candidate = self
            .store
            .fetch_candidate(id)?
            .ok_or(RepositoryError::NotFound)?;

        candidate.email = draft.email;
        candidate.phone = draft.phone;
        candidate.full_name = draft.full_name;
        candidate.location = draft.location;
        candidate.visa_status = draft.visa_status;
        candidate.visa_type = draft.visa_type;
        candidate.sponsorship_needed = draft.sponsorship_needed;
        candidate.childcare_cert = draft.childcare_cert;
        candidate.experience_years = draft.experience_years;
        candidate.rural_experience = draft.rural_experience;
        candidate.relocation_willing = draft.relocation_willing;
        candidate.housing_needed = draft.housing_needed;
        candidate.english_level = draft.english_level;
        candidate.skills = draft.skills;
        candidate.availability_start = draft.availability_start;
        candidate.salary_expectation = draft.salary_expectation;
        candidate.notes = draft.notes;
        candidate.updated_at = Utc::now();
        self.rescore(&mut candidate);

        self.store.update_candidate(candidate.clone())?;
        Ok(candidate)
    }

    pub fn get_candidate(&self, id: &CandidateId) -> Result<Candidate, RecruitingServiceError> {
        Ok(self
            .store
            .fetch_candidate(id)?
            .ok_or(RepositoryError::NotFound)?)
    }

    pub fn list_candidates(
        &self,
        filter: &CandidateFilter,
    ) -> Result<Vec<Candidate>, RecruitingServiceError> {
        Ok(self.store.list_candidates(filter)?)
    }

    /// Fresh sponsorship verdict for a candidate. Pure over the stored
    /// snapshot, so it always matches the persisted one.
    pub fn candidate_sponsorship(
        &self,
        id: &CandidateId,
    ) -> Result<SponsorshipVerdict, RecruitingServiceError> {
        let candidate = self.get_candidate(id)?;
        Ok(evaluate_sponsorship(&candidate.profile()))
    }

    /// Ingest a resume for a candidate: extract insights, fill candidate
    /// blanks, rescore, and keep an audit record of the document.
    ///
    /// The document row is written before the candidate record. If the
    /// candidate update then fails, the audit record stays behind without a
    /// summary pointer; the candidate is the authoritative side and is never
    /// left pointing at a document that was not stored.
    pub fn attach_resume(
        &self,
        id: &CandidateId,
        upload: ResumeUpload,
    ) -> Result<(ResumeDocument, Candidate), RecruitingServiceError> {
        // Parameters such as charset do not affect acceptance.
        let accepted = upload
            .content_type
            .parse::<mime::Mime>()
            .map(|parsed| {
                matches!(
                    parsed.essence_str(),
                    "text/plain" | "application/pdf" | "application/msword"
                )
            })
            .unwrap_or(false);
        if !accepted {
            return Err(RecruitingServiceError::UnsupportedResume(
                upload.content_type,
            ));
        }

        let mut candidate = self
            .store
            .fetch_candidate(id)?
            .ok_or(RepositoryError::NotFound)?;

        let insights = resume::extract_insights(&upload.text);
        merge_insights(&mut candidate, &insights);
        candidate.updated_at = Utc::now();
        self.rescore(&mut candidate);

        let document = ResumeDocument {
            id: DocumentId(next_id(&DOCUMENT_SEQUENCE, "doc")),
            candidate_id: candidate.id.clone(),
            file_name: upload.file_name,
            content_type: upload.content_type,
            text_length: upload.text.len(),
            insights,
            uploaded_at: candidate.updated_at,
        };
        let document = self.store.insert_document(document)?;

        candidate.resume = Some(ResumeSummary {
            document_id: document.id.clone(),
            file_name: document.file_name.clone(),
            uploaded_at: document.uploaded_at,
        });
        self.store.update_candidate(candidate.clone())?;

        Ok((document, candidate))
    }

    pub fn list_resumes(
        &self,
        id: &CandidateId,
    ) -> Result<Vec<ResumeDocument>, RecruitingServiceError> {
        Ok(self.store.list_documents(id)?)
    }

    // Applications

    pub fn create_application(
        &self,
        draft: ApplicationDraft,
    ) -> Result<Application, RecruitingServiceError> {
        let job = self
            .store
            .fetch_job(&draft.job_id)?
            .ok_or(RecruitingServiceError::MissingDependency { entity: "job" })?;
        let candidate = self
            .store
            .fetch_candidate(&draft.candidate_id)?
            .ok_or(RecruitingServiceError::MissingDependency {
                entity: "candidate",
            })?;

        let now = Utc::now();
        let application = Application {
            id: ApplicationId(next_id(&APPLICATION_SEQUENCE, "app")),
            job_id: draft.job_id,
            candidate_id: draft.candidate_id,
            status: ApplicationStatus::New,
            cover_letter: draft.cover_letter,
            notes: String::new(),
            applied_at: now,
            updated_at: now,
        };

        let stored = self.store.insert_application(application)?;
        self.notify(self.confirmation_email(&candidate, &job));
        Ok(stored)
    }

    pub fn list_applications(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<Vec<Application>, RecruitingServiceError> {
        Ok(self.store.list_applications(filter)?)
    }

    pub fn update_application(
        &self,
        id: &ApplicationId,
        update: ApplicationUpdate,
    ) -> Result<Application, RecruitingServiceError> {
        let mut application = self
            .store
            .fetch_application(id)?
            .ok_or(RepositoryError::NotFound)?;

        application.status = update.status;
        if let Some(notes) = update.notes {
            application.notes = notes;
        }
        application.updated_at = Utc::now();
        self.store.update_application(application.clone())?;

        // Status mail needs both ends of the link; a missing record only
        // suppresses the mail, never the update.
        if let Some(line) = notifications::status_message(update.status) {
            match (
                self.store.fetch_candidate(&application.candidate_id),
                self.store.fetch_job(&application.job_id),
            ) {
                (Ok(Some(candidate)), Ok(Some(job))) => {
                    self.notify(self.status_email(&candidate, &job, line));
                }
                _ => debug!(
                    application_id = %application.id.0,
                    "skipping status mail, linked records unavailable"
                ),
            }
        }

        Ok(application)
    }

    /// Bulk status transition. Missing ids are skipped; returns the number of
    /// records updated. Bulk moves send no candidate mail.
    pub fn bulk_update_applications(
        &self,
        update: BulkApplicationUpdate,
    ) -> Result<usize, RecruitingServiceError> {
        let mut updated = 0;
        for id in &update.application_ids {
            let Some(mut application) = self.store.fetch_application(id)? else {
                continue;
            };
            application.status = update.status;
            if let Some(notes) = &update.notes {
                application.notes = notes.clone();
            }
            application.updated_at = Utc::now();
            self.store.update_application(application)?;
            updated += 1;
        }
        Ok(updated)
    }

    // Interviews

    pub fn schedule_interview(
        &self,
        draft: InterviewDraft,
    ) -> Result<Interview, RecruitingServiceError> {
        let application = self
            .store
            .fetch_application(&draft.application_id)?
            .ok_or(RecruitingServiceError::MissingDependency {
                entity: "application",
            })?;

        let interview = Interview {
            id: InterviewId(next_id(&INTERVIEW_SEQUENCE, "int")),
            application_id: application.id,
            candidate_id: application.candidate_id,
            job_id: application.job_id,
            interview_type: draft.interview_type,
            status: InterviewStatus::Scheduled,
            scheduled_at: draft.scheduled_at,
            interviewer: draft.interviewer,
            notes: draft.notes,
        };
        Ok(self.store.insert_interview(interview)?)
    }

    pub fn update_interview(
        &self,
        id: &InterviewId,
        update: InterviewUpdate,
    ) -> Result<Interview, RecruitingServiceError> {
        let mut interview = self
            .store
            .fetch_interview(id)?
            .ok_or(RepositoryError::NotFound)?;
        interview.status = update.status;
        if let Some(notes) = update.notes {
            interview.notes = notes;
        }
        self.store.update_interview(interview.clone())?;
        Ok(interview)
    }

    pub fn list_interviews(
        &self,
        filter: &InterviewFilter,
    ) -> Result<Vec<Interview>, RecruitingServiceError> {
        Ok(self.store.list_interviews(filter)?)
    }

    // Email templates

    pub fn upsert_template(
        &self,
        draft: EmailTemplateDraft,
    ) -> Result<EmailTemplate, RecruitingServiceError> {
        let template = EmailTemplate {
            id: TemplateId(next_id(&TEMPLATE_SEQUENCE, "tpl")),
            name: draft.name,
            subject: draft.subject,
            body: draft.body,
            kind: draft.kind,
            created_at: Utc::now(),
        };
        Ok(self.store.upsert_template(template)?)
    }

    pub fn list_templates(&self) -> Result<Vec<EmailTemplate>, RecruitingServiceError> {
        Ok(self.store.list_templates()?)
    }

    // Dashboard

    pub fn dashboard_stats(&self) -> Result<DashboardStats, RecruitingServiceError> {
        let jobs = self.store.list_jobs(&JobFilter::default())?;
        let candidates = self.store.list_candidates(&CandidateFilter::default())?;
        let applications = self
            .store
            .list_applications(&ApplicationFilter::default())?;

        let mut applications_by_status = BTreeMap::new();
        for application in &applications {
            *applications_by_status
                .entry(application.status.label().to_string())
                .or_insert(0) += 1;
        }

        let mut visa_sponsorship = BTreeMap::new();
        for candidate in &candidates {
            *visa_sponsorship
                .entry(candidate.sponsorship_needed.to_string())
                .or_insert(0) += 1;
        }

        let mut jobs_by_location = BTreeMap::new();
        for job in &jobs {
            *jobs_by_location
                .entry(job.location.label().to_string())
                .or_insert(0) += 1;
        }

        Ok(DashboardStats {
            total_jobs: jobs.iter().filter(|job| job.status == "active").count(),
            total_candidates: candidates.len(),
            total_applications: applications.len(),
            applications_by_status,
            visa_sponsorship,
            jobs_by_location,
        })
    }

    // Internals

    fn rescore(&self, candidate: &mut Candidate) {
        let profile = candidate.profile();
        candidate.score = score_profile(&profile).total;
        candidate.sponsorship = Some(evaluate_sponsorship(&profile));
    }

    fn mirror_job(&self, job: &Job, event: JobEvent) {
        match self
            .careers
            .publish(self.careers_transport.as_ref(), job, event, Utc::now())
        {
            Ok(true) => debug!(job_id = %job.id.0, ?event, "job mirrored to careers site"),
            Ok(false) => debug!(job_id = %job.id.0, "careers mirror disabled"),
            Err(error) => warn!(job_id = %job.id.0, %error, "careers mirror failed"),
        }
    }

    fn notify(&self, message: EmailMessage) {
        if let Err(error) = self.notifier.send(message) {
            warn!(%error, "candidate mail failed");
        }
    }

    fn welcome_email(&self, candidate: &Candidate) -> EmailMessage {
        let mut values = BTreeMap::new();
        values.insert("full_name".to_string(), candidate.full_name.clone());
        self.templated(KIND_APPLICATION_RECEIVED, &candidate.email, &values)
            .unwrap_or_else(|| {
                notifications::welcome_message(&candidate.email, &candidate.full_name)
            })
    }

    fn confirmation_email(&self, candidate: &Candidate, job: &Job) -> EmailMessage {
        let mut values = BTreeMap::new();
        values.insert("full_name".to_string(), candidate.full_name.clone());
        values.insert("job_title".to_string(), job.title.clone());
        values.insert(
            "job_location".to_string(),
            job.location.label().to_string(),
        );
        self.templated(KIND_APPLICATION_CONFIRMATION, &candidate.email, &values)
            .unwrap_or_else(|| {
                notifications::confirmation_message(
                    &candidate.email,
                    &candidate.full_name,
                    &job.title,
                    job.location.label(),
                )
            })
    }

    fn status_email(&self, candidate: &Candidate, job: &Job, line: &str) -> EmailMessage {
        let mut values = BTreeMap::new();
        values.insert("full_name".to_string(), candidate.full_name.clone());
        values.insert("job_title".to_string(), job.title.clone());
        values.insert("status_message".to_string(), line.to_string());
        self.templated(KIND_STATUS_UPDATE, &candidate.email, &values)
            .unwrap_or_else(|| {
                notifications::status_update_message(
                    &candidate.email,
                    &candidate.full_name,
                    &job.title,
                    line,
                )
            })
    }

    /// Render a stored template of the given kind, if one exists. Lookup
    /// failures fall back to the built-in wording.
    fn templated(
        &self,
        kind: &str,
        to: &str,
        values: &BTreeMap<String, String>,
    ) -> Option<EmailMessage> {
        match self.store.fetch_template_by_kind(kind) {
            Ok(Some(template)) => Some(EmailMessage {
                to: to.to_string(),
                subject: notifications::render(&template.subject, values),
                html_body: notifications::render(&template.body, values),
            }),
            Ok(None) => None,
            Err(error) => {
                debug!(%error, kind, "template lookup failed, using default wording");
                None
            }
        }
    }
}

fn merge_insights(candidate: &mut Candidate, insights: &ResumeInsights) {
    if candidate.childcare_cert.is_none() {
        candidate.childcare_cert = insights.certification.clone();
    }
    if let Some(years) = insights.experience_years {
        candidate.experience_years = candidate.experience_years.max(years);
    }
    for skill in &insights.skills {
        let known = candidate
            .skills
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(skill));
        if !known {
            candidate.skills.push(skill.clone());
        }
    }
    candidate.rural_experience = candidate.rural_experience || insights.rural_experience;
}
