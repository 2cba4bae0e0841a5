use std::{sync::Arc, time::Duration};

use eventsite_core_contact_contracts::{ContactSendMessageError, ContactService};
use eventsite_email_contracts::{ContentType, Email, EmailService};
use eventsite_models::{contact::ContactSubmission, email_address::EmailAddressWithName};
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Email> {
    email: Email,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    pub recipient: Arc<EmailAddressWithName>,
    pub dispatch_timeout: Duration,
}

impl<Email> ContactServiceImpl<Email> {
    pub fn new(email: Email, config: ContactServiceConfig) -> Self {
        Self { email, config }
    }
}

impl<EmailS> ContactService for ContactServiceImpl<EmailS>
where
    EmailS: EmailService,
{
    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<(), ContactSendMessageError> {
        let email = Email {
            recipient: (*self.config.recipient).clone(),
            subject: format!("[Contact Form] New message from {}", *submission.name),
            body: format!(
                "Name: {}\nEmail: {}\n\nMessage:\n{}",
                *submission.name, submission.email, *submission.message
            ),
            content_type: ContentType::Text,
            reply_to: Some(submission.email.with_name(submission.name.into_inner())),
        };

        let sent = tokio::time::timeout(self.config.dispatch_timeout, self.email.send(email))
            .await
            .map_err(|_| {
                error!(timeout = ?self.config.dispatch_timeout, "mail dispatch timed out");
                ContactSendMessageError::Timeout
            })??;

        if !sent {
            error!("mail provider refused the contact message");
            return Err(ContactSendMessageError::Send);
        }

        info!("contact message sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use eventsite_email_contracts::MockEmailService;

    use super::*;

    fn make_config() -> ContactServiceConfig {
        ContactServiceConfig {
            recipient: Arc::new("contact@example.com".parse().unwrap()),
            dispatch_timeout: Duration::from_secs(10),
        }
    }

    fn make_submission() -> ContactSubmission {
        ContactSubmission {
            name: "Jane".try_into().unwrap(),
            email: "jane@example.com".parse().unwrap(),
            message: "Hello".try_into().unwrap(),
        }
    }

    fn make_email(config: &ContactServiceConfig) -> Email {
        Email {
            recipient: (*config.recipient).clone(),
            subject: "[Contact Form] New message from Jane".into(),
            body: "Name: Jane\nEmail: jane@example.com\n\nMessage:\nHello".into(),
            content_type: ContentType::Text,
            reply_to: Some(
                "jane@example.com"
                    .parse::<eventsite_models::email_address::EmailAddress>()
                    .unwrap()
                    .with_name("Jane".into()),
            ),
        }
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let config = make_config();
        let email = MockEmailService::new().with_send(make_email(&config), true);
        let sut = ContactServiceImpl::new(email, config);

        // Act
        let result = sut.send_message(make_submission()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn rejected() {
        // Arrange
        let config = make_config();
        let email = MockEmailService::new().with_send(make_email(&config), false);
        let sut = ContactServiceImpl::new(email, config);

        // Act
        let result = sut.send_message(make_submission()).await;

        // Assert
        assert!(matches!(result, Err(ContactSendMessageError::Send)));
    }

    #[tokio::test]
    async fn provider_error() {
        // Arrange
        let config = make_config();
        let email =
            MockEmailService::new().with_send_error(make_email(&config), "connection refused");
        let sut = ContactServiceImpl::new(email, config);

        // Act
        let result = sut.send_message(make_submission()).await;

        // Assert
        let Err(ContactSendMessageError::Other(err)) = result else {
            panic!("unexpected result: {result:?}");
        };
        assert_eq!(err.to_string(), "connection refused");
    }

    #[tokio::test(start_paused = true)]
    async fn timeout() {
        // Arrange
        let config = make_config();
        let mut email = MockEmailService::new();
        email
            .expect_send()
            .once()
            .return_once(|_| Box::pin(std::future::pending::<anyhow::Result<bool>>()));
        let sut = ContactServiceImpl::new(email, config);

        // Act
        let result = sut.send_message(make_submission()).await;

        // Assert
        assert!(matches!(result, Err(ContactSendMessageError::Timeout)));
    }

    #[tokio::test]
    async fn identical_submissions_are_sent_twice() {
        // Arrange
        let config = make_config();
        let mut email = MockEmailService::new();
        email
            .expect_send()
            .times(2)
            .with(mockall::predicate::eq(make_email(&config)))
            .returning(|_| Box::pin(std::future::ready(Ok(true))));
        let sut = ContactServiceImpl::new(email, config);

        // Act
        let first = sut.send_message(make_submission()).await;
        let second = sut.send_message(make_submission()).await;

        // Assert
        first.unwrap();
        second.unwrap();
    }
}
