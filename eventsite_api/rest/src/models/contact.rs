use eventsite_models::{
    contact::{
        ContactSubmission, ContactSubmissionMessage, ContactSubmissionMessageError,
        ContactSubmissionName, ContactSubmissionNameError,
    },
    email_address::EmailAddress,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Contact form submission as sent by the browser.
///
/// All fields are optional here so that missing fields are reported with the
/// same error body as every other validation failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiContactSubmission {
    /// Full name of the sender
    pub name: Option<String>,
    /// Email address of the sender
    pub email: Option<String>,
    /// Content of the message
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApiContactResponse {
    pub success: bool,
    pub message: &'static str,
}

impl ApiContactResponse {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: "Message sent successfully",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiContactSubmissionError {
    #[error("Name, email and message are required")]
    MissingFields,
    #[error("Please provide a valid email address")]
    InvalidEmail,
    #[error("Name must not exceed 256 characters")]
    NameTooLong,
    #[error("Message must not exceed 4096 characters")]
    MessageTooLong,
}

impl TryFrom<ApiContactSubmission> for ContactSubmission {
    type Error = ApiContactSubmissionError;

    fn try_from(value: ApiContactSubmission) -> Result<Self, Self::Error> {
        let present = |field: Option<String>| field.filter(|x| !x.trim().is_empty());
        let (Some(name), Some(email), Some(message)) = (
            present(value.name),
            present(value.email),
            present(value.message),
        ) else {
            return Err(ApiContactSubmissionError::MissingFields);
        };

        let email = email
            .trim()
            .parse::<EmailAddress>()
            .map_err(|_| ApiContactSubmissionError::InvalidEmail)?;

        let name = ContactSubmissionName::try_new(name).map_err(|err| match err {
            ContactSubmissionNameError::NotEmptyViolated => {
                ApiContactSubmissionError::MissingFields
            }
            ContactSubmissionNameError::LenCharMaxViolated => {
                ApiContactSubmissionError::NameTooLong
            }
        })?;

        let message = ContactSubmissionMessage::try_new(message).map_err(|err| match err {
            ContactSubmissionMessageError::NotEmptyViolated => {
                ApiContactSubmissionError::MissingFields
            }
            ContactSubmissionMessageError::LenCharMaxViolated => {
                ApiContactSubmissionError::MessageTooLong
            }
        })?;

        Ok(Self {
            name,
            email,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, email: &str, message: &str) -> ApiContactSubmission {
        ApiContactSubmission {
            name: Some(name.into()),
            email: Some(email.into()),
            message: Some(message.into()),
        }
    }

    #[test]
    fn valid() {
        let result = ContactSubmission::try_from(submission(" Jane ", "jane@example.com ", "Hello"));
        let submission = result.unwrap();
        assert_eq!(submission.name.as_str(), "Jane");
        assert_eq!(submission.email.as_str(), "jane@example.com");
        assert_eq!(submission.message.as_str(), "Hello");
    }

    #[test]
    fn missing_fields() {
        for value in [
            ApiContactSubmission {
                name: None,
                ..submission("Jane", "jane@example.com", "Hello")
            },
            ApiContactSubmission {
                email: None,
                ..submission("Jane", "jane@example.com", "Hello")
            },
            ApiContactSubmission {
                message: None,
                ..submission("Jane", "jane@example.com", "Hello")
            },
            submission("   ", "jane@example.com", "Hello"),
            submission("Jane", "jane@example.com", "\n"),
            ApiContactSubmission::default(),
        ] {
            assert_eq!(
                ContactSubmission::try_from(value),
                Err(ApiContactSubmissionError::MissingFields)
            );
        }
    }

    #[test]
    fn invalid_email() {
        assert_eq!(
            ContactSubmission::try_from(submission("Jane", "not-an-email", "Hello")),
            Err(ApiContactSubmissionError::InvalidEmail)
        );
    }

    #[test]
    fn too_long() {
        assert_eq!(
            ContactSubmission::try_from(submission(&"x".repeat(257), "jane@example.com", "Hello")),
            Err(ApiContactSubmissionError::NameTooLong)
        );
        assert_eq!(
            ContactSubmission::try_from(submission("Jane", "jane@example.com", &"x".repeat(4097))),
            Err(ApiContactSubmissionError::MessageTooLong)
        );
    }
}
