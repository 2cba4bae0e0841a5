use anyhow::anyhow;
use eventsite_models::email_address::EmailAddress;
use thiserror::Error;
use tracing::{info, warn};

use crate::relay::{ContactSubmissionPayload, RelayApi, RelayError};

pub const SUCCESS_MESSAGE: &str = "Message sent successfully!";
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to send message. Please try again.";

/// State of a single contact form.
///
/// The form is owned by whoever renders it; nothing here is shared between
/// sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    submit_enabled: bool,
    notification: Option<Notification>,
}

/// Transient feedback shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Sending,
    Success(String),
    Error(String),
}

/// A field constraint that blocks submission before any request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormViolation {
    #[error("Please enter your name.")]
    MissingName,
    #[error("Please enter your email address.")]
    MissingEmail,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please enter a message.")]
    MissingMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("A submission is already in progress.")]
    InFlight,
    #[error(transparent)]
    Invalid(#[from] FormViolation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Failed,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            submit_enabled: true,
            notification: None,
        }
    }

    pub fn with_values(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
            ..Self::new()
        }
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Equivalent of the `required` and `type="email"` input constraints.
    pub fn check_validity(&self) -> Result<(), FormViolation> {
        if self.name.is_empty() {
            return Err(FormViolation::MissingName);
        }
        if self.email.is_empty() {
            return Err(FormViolation::MissingEmail);
        }
        if self.email.parse::<EmailAddress>().is_err() {
            return Err(FormViolation::InvalidEmail);
        }
        if self.message.is_empty() {
            return Err(FormViolation::MissingMessage);
        }
        Ok(())
    }

    /// Disable the submit control, show the sending indicator and return the
    /// payload to send. The field values are left untouched.
    pub fn begin_submit(&mut self) -> Result<ContactSubmissionPayload, SubmitError> {
        if !self.submit_enabled {
            return Err(SubmitError::InFlight);
        }
        self.check_validity()?;

        self.submit_enabled = false;
        self.notification = Some(Notification::Sending);

        Ok(ContactSubmissionPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
        })
    }

    /// Apply the result of the request started by [`Self::begin_submit`].
    ///
    /// Always re-enables the submit control. The fields are cleared only if
    /// the relay reported success.
    pub fn finish_submit(&mut self, result: Result<(), RelayError>) -> SubmitOutcome {
        self.submit_enabled = true;

        match result {
            Ok(()) => {
                info!("contact form submitted");
                self.name.clear();
                self.email.clear();
                self.message.clear();
                self.notification = Some(Notification::Success(SUCCESS_MESSAGE.into()));
                SubmitOutcome::Sent
            }
            Err(err) => {
                warn!("contact form submission failed: {err}");
                let message = match err {
                    RelayError::Rejected { error: Some(error) } => error,
                    RelayError::Rejected { error: None } | RelayError::Network(_) => {
                        FALLBACK_ERROR_MESSAGE.into()
                    }
                };
                self.notification = Some(Notification::Error(message));
                SubmitOutcome::Failed
            }
        }
    }

    /// Validate the form, send it through `relay` once and reflect the outcome.
    ///
    /// If the returned future is dropped or the relay panics before the
    /// request completes, the form is still finished as a failed submission.
    pub async fn submit(&mut self, relay: &impl RelayApi) -> Result<SubmitOutcome, SubmitError> {
        let payload = self.begin_submit()?;
        let in_flight = InFlight(self);
        let result = relay.send(payload).await;
        Ok(in_flight.0.finish_submit(result))
    }
}

/// Finishes an interrupted submission when dropped.
struct InFlight<'a>(&'a mut ContactForm);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.0.submit_enabled {
            self.0.finish_submit(Err(RelayError::Network(anyhow!(
                "submission was interrupted"
            ))));
        }
    }
}
