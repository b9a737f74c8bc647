//! Contact form controller.
//!
//! Validates the three required fields and reports problems per field so
//! the client can render them inline next to the offending input.
//! Submission is blocked (422) until every field passes. Nothing is sent
//! anywhere in this demo; a valid submission just queues a success toast.

use axum::{Form, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use smartcart_core::{Email, Theme};

use crate::notify::Severity;
use crate::routes::{ToastView, drain_toasts};
use crate::state::AppState;

/// Contact page view model.
#[derive(Debug, Serialize)]
pub struct ContactPageView {
    pub cart_count: u64,
    pub theme: Theme,
    pub toasts: Vec<ToastView>,
}

/// Display the contact page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    Json(ContactPageView {
        cart_count: state.cart().total_item_count(),
        theme: state.theme().current(),
        toasts: drain_toasts(&state),
    })
}

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Per-field validation messages, rendered inline next to each input.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FieldErrors {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }
}

/// Response for form submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    pub toasts: Vec<ToastView>,
}

/// Validate the contact form fields.
fn validate(form: &ContactForm) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if form.name.trim().is_empty() {
        errors.name = Some("Name is required.".to_owned());
    }

    let email = form.email.trim();
    if email.is_empty() {
        errors.email = Some("Email is required.".to_owned());
    } else if Email::parse(email).is_err() {
        errors.email = Some("Please enter a valid email address.".to_owned());
    }

    if form.message.trim().is_empty() {
        errors.message = Some("Message cannot be empty.".to_owned());
    }

    errors
}

/// Submit the contact form.
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> impl IntoResponse {
    let errors = validate(&form);

    if errors.is_empty() {
        tracing::info!(name = %form.name.trim(), "Contact message accepted");
        state
            .notifier()
            .notify("Message sent successfully!", Severity::Success);
        (
            StatusCode::OK,
            Json(ContactResponse {
                success: true,
                errors: None,
                toasts: drain_toasts(&state),
            }),
        )
    } else {
        state
            .notifier()
            .notify("Please correct the errors in the form.", Severity::Error);
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ContactResponse {
                success: false,
                errors: Some(errors),
                toasts: drain_toasts(&state),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_owned(),
            email: email.to_owned(),
            message: message.to_owned(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let errors = validate(&form("Ada", "ada@example.com", "Hello there"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_missing_fields_report_per_field() {
        let errors = validate(&form("", "", ""));
        assert_eq!(errors.name.as_deref(), Some("Name is required."));
        assert_eq!(errors.email.as_deref(), Some("Email is required."));
        assert_eq!(errors.message.as_deref(), Some("Message cannot be empty."));
    }

    #[test]
    fn test_malformed_email_reports_inline() {
        let errors = validate(&form("Ada", "not-an-email", "Hi"));
        assert_eq!(
            errors.email.as_deref(),
            Some("Please enter a valid email address.")
        );
        assert!(errors.name.is_none());
        assert!(errors.message.is_none());
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let errors = validate(&form("   ", "ada@example.com", "\t\n"));
        assert!(errors.name.is_some());
        assert!(errors.email.is_none());
        assert!(errors.message.is_some());
    }
}
