use std::{future::Future, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::http::HttpClient;

const CONTACT_PATH: &str = "api/mail/contact";

/// The mail relay a contact form submits to.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait RelayApi: Send + Sync + 'static {
    /// Submit the contact form contents. Issues exactly one request.
    fn send(
        &self,
        submission: ContactSubmissionPayload,
    ) -> impl Future<Output = Result<(), RelayError>> + Send;
}

/// Request body of the contact endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmissionPayload {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum RelayError {
    /// The relay answered but did not report success.
    #[error("relay rejected the submission: {}", error.as_deref().unwrap_or("no reason given"))]
    Rejected { error: Option<String> },
    /// The relay could not be reached or did not answer in time.
    #[error("failed to reach relay: {0}")]
    Network(#[source] anyhow::Error),
}

#[cfg(any(test, feature = "mock"))]
impl MockRelayApi {
    pub fn with_send(
        mut self,
        submission: ContactSubmissionPayload,
        result: Result<(), RelayError>,
    ) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}

/// [`RelayApi`] implementation talking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRelayClient {
    client: HttpClient,
    endpoint: Url,
}

#[derive(Deserialize)]
struct RelayReply {
    success: bool,
    error: Option<String>,
}

impl HttpRelayClient {
    /// Create a client for the relay served at `base_url`.
    pub fn new(base_url: &Url, timeout: Duration) -> anyhow::Result<Self> {
        let mut base_url = base_url.clone();
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        Ok(Self {
            client: HttpClient::new(timeout)?,
            endpoint: base_url.join(CONTACT_PATH)?,
        })
    }
}

impl RelayApi for HttpRelayClient {
    async fn send(&self, submission: ContactSubmissionPayload) -> Result<(), RelayError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&submission)
            .send()
            .await
            .map_err(|err| RelayError::Network(err.into()))?;

        let status = response.status();
        let reply = response.json::<RelayReply>().await.ok();

        match reply {
            Some(RelayReply { success: true, .. }) if status.is_success() => Ok(()),
            reply => {
                debug!(%status, "relay reported a failure");
                Err(RelayError::Rejected {
                    error: reply.and_then(|reply| reply.error),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint() {
        for (base_url, expected) in [
            ("https://event.example.com", "https://event.example.com/api/mail/contact"),
            ("https://event.example.com/", "https://event.example.com/api/mail/contact"),
            (
                "https://example.com/relay",
                "https://example.com/relay/api/mail/contact",
            ),
        ] {
            let client =
                HttpRelayClient::new(&base_url.parse().unwrap(), Duration::from_secs(1)).unwrap();
            assert_eq!(client.endpoint.as_str(), expected);
        }
    }

    #[test]
    fn payload_shape() {
        let payload = ContactSubmissionPayload {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            message: "Hello".into(),
        };

        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            value,
            serde_json::json!({"name": "Jane", "email": "jane@example.com", "message": "Hello"})
        );
    }
}
