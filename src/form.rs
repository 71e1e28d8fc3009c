//! Contact form validation and the mailto fallback used to deliver it.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::config::ContactConfig;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Minimum message length after trimming, in UTF-16 units as the browser counts
pub const MIN_MESSAGE_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    /// DOM id of the input
    pub fn id(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }
}

/// Validation failure, displayed verbatim next to the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Please enter your name.")]
    MissingName,
    #[error("Enter a valid email address.")]
    InvalidEmail,
    #[error("Message should be at least 10 characters.")]
    MessageTooShort,
}

impl FieldError {
    pub fn field(&self) -> Field {
        match self {
            FieldError::MissingName => Field::Name,
            FieldError::InvalidEmail => Field::Email,
            FieldError::MessageTooShort => Field::Message,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    /// Check a single field
    pub fn check(&self, field: Field) -> Option<FieldError> {
        match field {
            Field::Name if self.name.trim().is_empty() => Some(FieldError::MissingName),
            Field::Email if !EMAIL_RE.is_match(&self.email) => Some(FieldError::InvalidEmail),
            Field::Message if self.message.trim().encode_utf16().count() < MIN_MESSAGE_CHARS => {
                Some(FieldError::MessageTooShort)
            }
            _ => None,
        }
    }

    /// Check every field, reporting all failures in field order
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let errors: Vec<FieldError> = Field::ALL.iter().filter_map(|f| self.check(*f)).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// `mailto:` link carrying the message, for sites without a form backend
    pub fn mailto_href(&self, contact: &ContactConfig) -> String {
        let body = format!(
            "Name: {}\nEmail: {}\n\n{}",
            self.name, self.email, self.message
        );
        format!(
            "mailto:{}?subject={}&body={}",
            contact.recipient,
            urlencoding::encode(&contact.subject),
            urlencoding::encode(&body)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Hello there, nice site!".into(),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert_eq!(filled().validate(), Ok(()));
    }

    #[test]
    fn reports_every_failing_field() {
        let form = ContactForm {
            name: "   ".into(),
            email: "ada@example".into(),
            message: " short    ".into(),
        };
        assert_eq!(
            form.validate(),
            Err(vec![
                FieldError::MissingName,
                FieldError::InvalidEmail,
                FieldError::MessageTooShort
            ])
        );
    }

    #[test]
    fn email_rejects_whitespace_and_double_at() {
        let mut form = filled();
        for bad in ["a b@example.com", "a@@example.com", "@example.com", "ada@example."] {
            form.email = bad.into();
            assert_eq!(form.check(Field::Email), Some(FieldError::InvalidEmail), "{bad}");
        }
    }

    #[test]
    fn message_length_counts_trimmed_chars() {
        let mut form = filled();
        form.message = "  0123456789  ".into();
        assert_eq!(form.check(Field::Message), None);
        form.message = "012345678".into();
        assert_eq!(form.check(Field::Message), Some(FieldError::MessageTooShort));
    }

    #[test]
    fn message_length_matches_browser_counting() {
        let mut form = filled();
        // The emoji is a surrogate pair, so this is ten units long
        form.message = "12345678😀".into();
        assert_eq!(form.check(Field::Message), None);
        form.message = "1234567😀".into();
        assert_eq!(form.check(Field::Message), Some(FieldError::MessageTooShort));
    }

    #[test]
    fn error_messages_match_ui_copy() {
        assert_eq!(FieldError::MissingName.to_string(), "Please enter your name.");
        assert_eq!(FieldError::InvalidEmail.field(), Field::Email);
    }

    #[test]
    fn mailto_encodes_subject_and_body() {
        let contact = ContactConfig {
            recipient: "me@example.com".into(),
            subject: "Hi & bye".into(),
        };
        let form = ContactForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Line one".into(),
        };
        assert_eq!(
            form.mailto_href(&contact),
            "mailto:me@example.com?subject=Hi%20%26%20bye\
             &body=Name%3A%20Ada%0AEmail%3A%20ada%40example.com%0A%0ALine%20one"
        );
    }
}
