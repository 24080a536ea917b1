use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{
    ApplicationDraft, ApplicationId, ApplicationStatus, ApplicationUpdate, BulkApplicationUpdate,
    CandidateDraft, CandidateId, EmailTemplateDraft, InterviewDraft, InterviewId, InterviewStatus,
    InterviewUpdate, JobDraft, JobId, VisaStatus,
};
use super::notifications::Notifier;
use super::repository::{
    ApplicationFilter, CandidateFilter, InterviewFilter, JobFilter, RecruitingStore,
    RepositoryError,
};
use super::service::{RecruitingService, RecruitingServiceError, ResumeUpload};
use super::webhook::CareersTransport;

/// Router builder exposing the recruiting HTTP surface under `/api`.
pub fn recruiting_router<S, N, W>(service: Arc<RecruitingService<S, N, W>>) -> Router
where
    S: RecruitingStore + 'static,
    N: Notifier + 'static,
    W: CareersTransport + 'static,
{
    Router::new()
        .route(
            "/api/jobs",
            post(create_job::<S, N, W>).get(list_jobs::<S, N, W>),
        )
        .route(
            "/api/jobs/:job_id",
            get(get_job::<S, N, W>).put(update_job::<S, N, W>),
        )
        .route(
            "/api/candidates",
            post(create_candidate::<S, N, W>).get(list_candidates::<S, N, W>),
        )
        .route(
            "/api/candidates/:candidate_id",
            get(get_candidate::<S, N, W>).put(update_candidate::<S, N, W>),
        )
        .route(
            "/api/candidates/:candidate_id/resume",
            post(upload_resume::<S, N, W>).get(list_resumes::<S, N, W>),
        )
        .route(
            "/api/candidates/:candidate_id/sponsorship",
            get(candidate_sponsorship::<S, N, W>),
        )
        .route(
            "/api/applications",
            post(create_application::<S, N, W>).get(list_applications::<S, N, W>),
        )
        .route(
            "/api/applications/bulk-update",
            post(bulk_update_applications::<S, N, W>),
        )
        .route(
            "/api/applications/:application_id",
            put(update_application::<S, N, W>),
        )
        .route(
            "/api/interviews",
            post(schedule_interview::<S, N, W>).get(list_interviews::<S, N, W>),
        )
        .route(
            "/api/interviews/:interview_id",
            put(update_interview::<S, N, W>),
        )
        .route(
            "/api/email-templates",
            post(upsert_template::<S, N, W>).get(list_templates::<S, N, W>),
        )
        .route("/api/dashboard/stats", get(dashboard_stats::<S, N, W>))
        .with_state(service)
}

fn error_response(error: RecruitingServiceError) -> Response {
    let status = match &error {
        RecruitingServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        RecruitingServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        RecruitingServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        RecruitingServiceError::MissingDependency { .. } => StatusCode::NOT_FOUND,
        RecruitingServiceError::UnsupportedResume(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

fn respond<T: serde::Serialize>(
    result: Result<T, RecruitingServiceError>,
    success: StatusCode,
) -> Response {
    match result {
        Ok(value) => (success, Json(value)).into_response(),
        Err(error) => error_response(error),
    }
}

type Service<S, N, W> = State<Arc<RecruitingService<S, N, W>>>;

// Jobs

#[derive(Debug, Deserialize)]
struct JobsQuery {
    status: Option<String>,
}

async fn create_job<S, N, W>(
    State(service): Service<S, N, W>,
    Json(draft): Json<JobDraft>,
) -> Response
where
    S: RecruitingStore + 'static,
    N: Notifier + 'static,
    W: CareersTransport + 'static,
{
    respond(service.create_job(draft), StatusCode::CREATED)
}

async fn list_jobs<S, N, W>(
    State(service): Service<S, N, W>,
    Query(query): Query<JobsQuery>,
) -> Response
where
    S: RecruitingStore + 'static,
    N: Notifier + 'static,
    W: CareersTransport + 'static,
{
    let filter = JobFilter {
        status: query.status,
    };
    respond(service.list_jobs(&filter), StatusCode::OK)
}

async fn get_job<S, N, W>(
    State(service): Service<S, N, W>,
    Path(job_id): Path<String>,
) -> Response
where
    S: RecruitingStore + 'static,
    N: Notifier + 'static,
    W: CareersTransport + 'static,
{
    respond(service.get_job(&JobId(job_id)), StatusCode::OK)
}

async fn update_job<S, N, W>(
    State(service): Service<S, N, W>,
    Path(job_id): Path<String>,
    Json(draft): Json<JobDraft>,
) -> Response
where
    S: RecruitingStore + 'static,
    N: Notifier + 'static,
    W: CareersTransport + 'static,
{
    respond(service.update_job(&JobId(job_id), draft), StatusCode::OK)
}

// Candidates

#[derive(Debug, Deserialize)]
struct CandidatesQuery {
    location: Option<String>,
    visa_status: Option<VisaStatus>,
    sponsorship_needed: Option<bool>,
    status: Option<ApplicationStatus>,
}

async fn create_candidate<S, N, W>(
    State(service): Service<S, N, W>,
    Json(draft): Json<CandidateDraft>,
) -> Response
where
    S: RecruitingStore + 'static,
    N: Notifier + 'static,
    W: CareersTransport + 'static,
{
    respond(service.create_candidate(draft), StatusCode::CREATED)
}

async fn list_candidates<S, N, W>(
    State(service): Service<S, N, W>,
    Query(query): Query<CandidatesQuery>,
) -> Response
where
    S: RecruitingStore + 'static,
    N: Notifier + 'static,
    W: CareersTransport + 'static,
{
    let filter = CandidateFilter {
        location_contains: query.location,
        visa_status: query.visa_status,
        sponsorship_needed: query.sponsorship_needed,
        status: query.status,
    };
    respond(service.list_candidates(&filter), StatusCode::OK)
}

async fn get_candidate<S, N, W>(
    State(service): Service<S, N, W>,
    Path(candidate_id): Path<String>,
) -> Response
where
    S: RecruitingStore + 'static,
    N: Notifier + 'static,
    W: CareersTransport + 'static,
{
    respond(
        service.get_candidate(&CandidateId(candidate_id)),
        StatusCode::OK,
    )
}

async fn update_candidate<S, N, W>(
    State(service): Service<S, N, W>,
    Path(candidate_id): Path<String>,
    Json(draft): Json<CandidateDraft>,
) -> Response
where
    S: RecruitingStore + 'static,
    N: Notifier + 'static,
    W: CareersTransport + 'static,
{
    respond(
        service.update_candidate(&CandidateId(candidate_id), draft),
        StatusCode::OK,
    )
}

#[derive(Debug, Deserialize)]
struct ResumeUploadRequest {
    file_name: String,
    content_type: String,
    text: String,
}

async fn upload_resume<S, N, W>(
    State(service): Service<S, N, W>,
    Path(candidate_id): Path<String>,
    Json(request): Json<ResumeUploadRequest>,
) -> Response
where
    S: RecruitingStore + 'static,
    N: Notifier + 'static,
    W: CareersTransport + 'static,
{
    let upload = ResumeUpload {
        file_name: request.file_name,
        content_type: request.content_type,
        text: request.text,
    };
    match service.attach_resume(&CandidateId(candidate_id), upload) {
        Ok((document, candidate)) => (
            StatusCode::CREATED,
            Json(json!({ "document": document, "candidate": candidate })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

async fn list_resumes<S, N, W>(
    State(service): Service<S, N, W>,
    Path(candidate_id): Path<String>,
) -> Response
where
    S: RecruitingStore + 'static,
    N: Notifier + 'static,
    W: CareersTransport + 'static,
{
    respond(
        service.list_resumes(&CandidateId(candidate_id)),
        StatusCode::OK,
    )
}

async fn candidate_sponsorship<S, N, W>(
    State(service): Service<S, N, W>,
    Path(candidate_id): Path<String>,
) -> Response
where
    S: RecruitingStore + 'static,
    N: Notifier + 'static,
    W: CareersTransport + 'static,
{
    respond(
        service.candidate_sponsorship(&CandidateId(candidate_id)),
        StatusCode::OK,
    )
}

// Applications

#[derive(Debug, Deserialize)]
struct ApplicationsQuery {
    job_id: Option<String>,
    candidate_id: Option<String>,
    status: Option<ApplicationStatus>,
}

async fn create_application<S, N, W>(
    State(service): Service<S, N, W>,
    Json(draft): Json<ApplicationDraft>,
) -> Response
where
    S: RecruitingStore + 'static,
    N: Notifier + 'static,
    W: CareersTransport + 'static,
{
    respond(service.create_application(draft), StatusCode::CREATED)
}

async fn list_applications<S, N, W>(
    State(service): Service<S, N, W>,
    Query(query): Query<ApplicationsQuery>,
) -> Response
where
    S: RecruitingStore + 'static,
    N: Notifier + 'static,
    W: CareersTransport + 'static,
{
    let filter = ApplicationFilter {
        job_id: query.job_id.map(JobId),
        candidate_id: query.candidate_id.map(CandidateId),
        status: query.status,
    };
    respond(service.list_applications(&filter), StatusCode::OK)
}

async fn update_application<S, N, W>(
    State(service): Service<S, N, W>,
    Path(application_id): Path<String>,
    Json(update): Json<ApplicationUpdate>,
) -> Response
where
    S: RecruitingStore + 'static,
    N: Notifier + 'static,
    W: CareersTransport + 'static,
{
    respond(
        service.update_application(&ApplicationId(application_id), update),
        StatusCode::OK,
    )
}

async fn bulk_update_applications<S, N, W>(
    State(service): Service<S, N, W>,
    Json(update): Json<BulkApplicationUpdate>,
) -> Response
where
    S: RecruitingStore + 'static,
    N: Notifier + 'static,
    W: CareersTransport + 'static,
{
    match service.bulk_update_applications(update) {
        Ok(updated_count) => {
            (StatusCode::OK, Json(json!({ "updated_count": updated_count }))).into_response()
        }
        Err(error) => error_response(error),
    }
}

// Interviews

#[derive(Debug, Deserialize)]
struct InterviewsQuery {
    candidate_id: Option<String>,
    job_id: Option<String>,
    status: Option<InterviewStatus>,
}

async fn schedule_interview<S, N, W>(
    State(service): Service<S, N, W>,
    Json(draft): Json<InterviewDraft>,
) -> Response
where
    S: RecruitingStore + 'static,
    N: Notifier + 'static,
    W: CareersTransport + 'static,
{
    respond(service.schedule_interview(draft), StatusCode::CREATED)
}

async fn list_interviews<S, N, W>(
    State(service): Service<S, N, W>,
    Query(query): Query<InterviewsQuery>,
) -> Response
where
    S: RecruitingStore + 'static,
    N: Notifier + 'static,
    W: CareersTransport + 'static,
{
    let filter = InterviewFilter {
        candidate_id: query.candidate_id.map(CandidateId),
        job_id: query.job_id.map(JobId),
        status: query.status,
    };
    respond(service.list_interviews(&filter), StatusCode::OK)
}

async fn update_interview<S, N, W>(
    State(service): Service<S, N, W>,
    Path(interview_id): Path<String>,
    Json(update): Json<InterviewUpdate>,
) -> Response
where
    S: RecruitingStore + 'static,
    N: Notifier + 'static,
    W: CareersTransport + 'static,
{
    respond(
        service.update_interview(&InterviewId(interview_id), update),
        StatusCode::OK,
    )
}

// Email templates and dashboard

async fn upsert_template<S, N, W>(
    State(service): Service<S, N, W>,
    Json(draft): Json<EmailTemplateDraft>,
) -> Response
where
    S: RecruitingStore + 'static,
    N: Notifier + 'static,
    W: CareersTransport + 'static,
{
    respond(service.upsert_template(draft), StatusCode::CREATED)
}

async fn list_templates<S, N, W>(State(service): Service<S, N, W>) -> Response
where
    S: RecruitingStore + 'static,
    N: Notifier + 'static,
    W: CareersTransport + 'static,
{
    respond(service.list_templates(), StatusCode::OK)
}

async fn dashboard_stats<S, N, W>(State(service): Service<S, N, W>) -> Response
where
    S: RecruitingStore + 'static,
    N: Notifier + 'static,
    W: CareersTransport + 'static,
{
    respond(service.dashboard_stats(), StatusCode::OK)
}
