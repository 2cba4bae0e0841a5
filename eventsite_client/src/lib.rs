//! Client side of the contact form pipeline.
//!
//! [`ContactForm`] holds the state of one contact form (per browser session or
//! per CLI invocation) and drives a [`RelayApi`] to deliver its contents.

pub use form::{ContactForm, FormViolation, Notification, SubmitError, SubmitOutcome};
pub use relay::{ContactSubmissionPayload, HttpRelayClient, RelayApi, RelayError};

#[cfg(any(test, feature = "mock"))]
pub use relay::MockRelayApi;

pub mod form;
mod http;
pub mod relay;
