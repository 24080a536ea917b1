use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::ApplicationStatus;

/// Outbound mail payload handed to the provider adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Mail dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("mail transport unavailable: {0}")]
    Transport(String),
}

/// Trait describing the outbound mail hook; the provider integration lives
/// outside this crate.
pub trait Notifier: Send + Sync {
    fn send(&self, message: EmailMessage) -> Result<(), NotifyError>;
}

/// Substitute `{{key}}` tokens in a template body or subject.
pub fn render(template: &str, values: &BTreeMap<String, String>) -> String {
    let mut rendered = template.to_string();
    for (key, value) in values {
        rendered = rendered.replace(&format!("{{{{{key}}}}}"), value);
    }
    rendered
}

/// Template kind sent when a candidate record is created.
pub const KIND_APPLICATION_RECEIVED: &str = "application_received";
/// Template kind sent when an application is submitted against a job.
pub const KIND_APPLICATION_CONFIRMATION: &str = "application_confirmation";
/// Template kind sent when an application changes status.
pub const KIND_STATUS_UPDATE: &str = "status_update";

pub const SIGNOFF: &str = "Best regards,<br>GRO Early Learning Recruitment Team";

/// Default welcome mail for a newly registered candidate.
pub fn welcome_message(to: &str, full_name: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Welcome to GRO Early Learning - Application Received".to_string(),
        html_body: format!(
            "<p>Dear {full_name},</p><p>Thank you for your interest in GRO Early Learning \
             positions. We have received your application and will review it shortly.</p>\
             <p>{SIGNOFF}</p>"
        ),
    }
}

/// Default confirmation mail once an application is linked to a job.
pub fn confirmation_message(
    to: &str,
    full_name: &str,
    job_title: &str,
    job_location: &str,
) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: format!("Application Confirmation - {job_title}"),
        html_body: format!(
            "<p>Dear {full_name},</p><p>Your application for {job_title} in {job_location} \
             has been submitted successfully.</p><p>We will review your application and get \
             back to you soon.</p><p>{SIGNOFF}</p>"
        ),
    }
}

/// Candidate-facing line for a status transition; `New` has no notification.
pub fn status_message(status: ApplicationStatus) -> Option<&'static str> {
    match status {
        ApplicationStatus::Screening => Some("Your application is being reviewed by our team."),
        ApplicationStatus::Interview => {
            Some("Congratulations! We would like to schedule an interview with you.")
        }
        ApplicationStatus::Offer => Some("Great news! We would like to extend an offer to you."),
        ApplicationStatus::Hired => Some("Welcome to the GRO Early Learning team!"),
        ApplicationStatus::Rejected => Some(
            "Thank you for your interest. Unfortunately, we have decided to proceed with \
             other candidates.",
        ),
        ApplicationStatus::New => None,
    }
}

/// Default status update mail.
pub fn status_update_message(
    to: &str,
    full_name: &str,
    job_title: &str,
    line: &str,
) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: format!("Application Update - {job_title}"),
        html_body: format!("<p>Dear {full_name},</p><p>{line}</p><p>{SIGNOFF}</p>"),
    }
}
