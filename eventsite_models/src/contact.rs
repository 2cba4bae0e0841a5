use nutype::nutype;

use crate::email_address::EmailAddress;

/// A validated contact form submission.
///
/// Exists only for the duration of a single relay request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactSubmissionName,
    pub email: EmailAddress,
    pub message: ContactSubmissionMessage,
}

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactSubmissionName(String);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 4096),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactSubmissionMessage(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed() {
        let name = ContactSubmissionName::try_new("  Jane  ").unwrap();
        assert_eq!(name.as_str(), "Jane");
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(
            ContactSubmissionName::try_new("   "),
            Err(ContactSubmissionNameError::NotEmptyViolated)
        );
    }

    #[test]
    fn long_message_is_rejected() {
        assert_eq!(
            ContactSubmissionMessage::try_new("x".repeat(4097)),
            Err(ContactSubmissionMessageError::LenCharMaxViolated)
        );
        assert!(ContactSubmissionMessage::try_new("x".repeat(4096)).is_ok());
    }
}
