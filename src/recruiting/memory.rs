use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;

use super::domain::{
    Application, ApplicationId, Candidate, CandidateId, EmailTemplate, Interview, InterviewId,
    Job, JobId, ResumeDocument, TemplateId,
};
use super::repository::{
    ApplicationFilter, CandidateFilter, InterviewFilter, JobFilter, RecruitingStore,
    RepositoryError,
};

/// In-process store backing the server and the test suites. The production
/// document store is an external collaborator behind [`RecruitingStore`].
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    jobs: HashMap<JobId, Job>,
    candidates: HashMap<CandidateId, Candidate>,
    applications: HashMap<ApplicationId, Application>,
    interviews: HashMap<InterviewId, Interview>,
    templates: HashMap<TemplateId, EmailTemplate>,
    documents: Vec<ResumeDocument>,
}

impl MemoryStore {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, State>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
    }
}

impl RecruitingStore for MemoryStore {
    fn insert_job(&self, job: Job) -> Result<Job, RepositoryError> {
        let mut state = self.lock()?;
        if state.jobs.contains_key(&job.id) {
            return Err(RepositoryError::Conflict);
        }
        state.jobs.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn update_job(&self, job: Job) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        if !state.jobs.contains_key(&job.id) {
            return Err(RepositoryError::NotFound);
        }
        state.jobs.insert(job.id.clone(), job);
        Ok(())
    }

    fn fetch_job(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        Ok(self.lock()?.jobs.get(id).cloned())
    }

    fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>, RepositoryError> {
        let state = self.lock()?;
        let mut jobs: Vec<Job> = state
            .jobs
            .values()
            .filter(|job| {
                filter
                    .status
                    .as_deref()
                    .map(|status| job.status == status)
                    .unwrap_or(true)
            })
            .cloned()
            .collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }

    fn insert_candidate(&self, candidate: Candidate) -> Result<Candidate, RepositoryError> {
        let mut state = self.lock()?;
        if state.candidates.contains_key(&candidate.id) {
            return Err(RepositoryError::Conflict);
        }
        state.candidates.insert(candidate.id.clone(), candidate.clone());
        Ok(candidate)
    }

    fn update_candidate(&self, candidate: Candidate) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        if !state.candidates.contains_key(&candidate.id) {
            return Err(RepositoryError::NotFound);
        }
        state.candidates.insert(candidate.id.clone(), candidate);
        Ok(())
    }

    fn fetch_candidate(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        Ok(self.lock()?.candidates.get(id).cloned())
    }

    fn list_candidates(
        &self,
        filter: &CandidateFilter,
    ) -> Result<Vec<Candidate>, RepositoryError> {
        let state = self.lock()?;
        let needle = filter
            .location_contains
            .as_deref()
            .map(|location| location.to_lowercase());
        let mut candidates: Vec<Candidate> = state
            .candidates
            .values()
            .filter(|candidate| {
                needle
                    .as_deref()
                    .map(|needle| candidate.location.to_lowercase().contains(needle))
                    .unwrap_or(true)
                    && filter
                        .visa_status
                        .map(|status| candidate.visa_status == status)
                        .unwrap_or(true)
                    && filter
                        .sponsorship_needed
                        .map(|needed| candidate.sponsorship_needed == needed)
                        .unwrap_or(true)
                    && filter
                        .status
                        .map(|status| candidate.status == status)
                        .unwrap_or(true)
            })
            .cloned()
            .collect();
        // Best scoring candidates first; ties broken by id for stable output.
        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.0.cmp(&b.id.0))
        });
        Ok(candidates)
    }

    fn insert_application(
        &self,
        application: Application,
    ) -> Result<Application, RepositoryError> {
        let mut state = self.lock()?;
        if state.applications.contains_key(&application.id) {
            return Err(RepositoryError::Conflict);
        }
        state
            .applications
            .insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn update_application(&self, application: Application) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        if !state.applications.contains_key(&application.id) {
            return Err(RepositoryError::NotFound);
        }
        state.applications.insert(application.id.clone(), application);
        Ok(())
    }

    fn fetch_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, RepositoryError> {
        Ok(self.lock()?.applications.get(id).cloned())
    }

    fn list_applications(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<Vec<Application>, RepositoryError> {
        let state = self.lock()?;
        let mut applications: Vec<Application> = state
            .applications
            .values()
            .filter(|application| {
                filter
                    .job_id
                    .as_ref()
                    .map(|job_id| &application.job_id == job_id)
                    .unwrap_or(true)
                    && filter
                        .candidate_id
                        .as_ref()
                        .map(|candidate_id| &application.candidate_id == candidate_id)
                        .unwrap_or(true)
                    && filter
                        .status
                        .map(|status| application.status == status)
                        .unwrap_or(true)
            })
            .cloned()
            .collect();
        applications.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
        Ok(applications)
    }

    fn insert_interview(&self, interview: Interview) -> Result<Interview, RepositoryError> {
        let mut state = self.lock()?;
        if state.interviews.contains_key(&interview.id) {
            return Err(RepositoryError::Conflict);
        }
        state
            .interviews
            .insert(interview.id.clone(), interview.clone());
        Ok(interview)
    }

    fn update_interview(&self, interview: Interview) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        if !state.interviews.contains_key(&interview.id) {
            return Err(RepositoryError::NotFound);
        }
        state.interviews.insert(interview.id.clone(), interview);
        Ok(())
    }

    fn fetch_interview(&self, id: &InterviewId) -> Result<Option<Interview>, RepositoryError> {
        Ok(self.lock()?.interviews.get(id).cloned())
    }

    fn list_interviews(
        &self,
        filter: &InterviewFilter,
    ) -> Result<Vec<Interview>, RepositoryError> {
        let state = self.lock()?;
        let mut interviews: Vec<Interview> = state
            .interviews
            .values()
            .filter(|interview| {
                filter
                    .candidate_id
                    .as_ref()
                    .map(|candidate_id| &interview.candidate_id == candidate_id)
                    .unwrap_or(true)
                    && filter
                        .job_id
                        .as_ref()
                        .map(|job_id| &interview.job_id == job_id)
                        .unwrap_or(true)
                    && filter
                        .status
                        .map(|status| interview.status == status)
                        .unwrap_or(true)
            })
            .cloned()
            .collect();
        interviews.sort_by(|a, b| a.scheduled_at.cmp(&b.scheduled_at));
        Ok(interviews)
    }

    fn upsert_template(&self, template: EmailTemplate) -> Result<EmailTemplate, RepositoryError> {
        let mut state = self.lock()?;
        let existing = state
            .templates
            .values()
            .find(|stored| stored.kind == template.kind)
            .map(|stored| stored.id.clone());
        let mut template = template;
        if let Some(id) = existing {
            template.id = id;
        }
        state
            .templates
            .insert(template.id.clone(), template.clone());
        Ok(template)
    }

    fn fetch_template_by_kind(
        &self,
        kind: &str,
    ) -> Result<Option<EmailTemplate>, RepositoryError> {
        let state = self.lock()?;
        Ok(state
            .templates
            .values()
            .find(|template| template.kind == kind)
            .cloned())
    }

    fn list_templates(&self) -> Result<Vec<EmailTemplate>, RepositoryError> {
        let state = self.lock()?;
        let mut templates: Vec<EmailTemplate> = state.templates.values().cloned().collect();
        templates.sort_by(|a, b| a.kind.cmp(&b.kind));
        Ok(templates)
    }

    fn insert_document(
        &self,
        document: ResumeDocument,
    ) -> Result<ResumeDocument, RepositoryError> {
        let mut state = self.lock()?;
        state.documents.push(document.clone());
        Ok(document)
    }

    fn list_documents(
        &self,
        candidate_id: &CandidateId,
    ) -> Result<Vec<ResumeDocument>, RepositoryError> {
        let state = self.lock()?;
        Ok(state
            .documents
            .iter()
            .filter(|document| &document.candidate_id == candidate_id)
            .cloned()
            .collect())
    }
}
