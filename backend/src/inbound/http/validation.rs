//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{
    EmailAddress, Error, LoginValidationError, Password, PasswordValidationError, UserId,
    UserValidationError,
};
use pagination::PageRequestError;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidEmail,
    EmailTooLong,
    PasswordTooShort,
    PasswordTooLong,
    InvalidUuid,
    InvalidPage,
    InvalidLimit,
    PayloadTooLarge,
    MalformedBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::EmailTooLong => "email_too_long",
            ErrorCode::PasswordTooShort => "password_too_short",
            ErrorCode::PasswordTooLong => "password_too_long",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidPage => "invalid_page",
            ErrorCode::InvalidLimit => "invalid_limit",
            ErrorCode::PayloadTooLarge => "payload_too_large",
            ErrorCode::MalformedBody => "malformed_body",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) const EMAIL: FieldName = FieldName::new("email");
pub(crate) const PASSWORD: FieldName = FieldName::new("password");
pub(crate) const ID: FieldName = FieldName::new("id");

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn payload_too_large_error(field: FieldName, limit: usize) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} exceeds the {limit} byte upload limit"))
        .with_code(ErrorCode::PayloadTooLarge)
}

pub(crate) fn malformed_field_error(field: FieldName, reason: impl std::fmt::Display) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} could not be read: {reason}"))
        .with_code(ErrorCode::MalformedBody)
}

/// Validate an email address taken from a request body.
pub(crate) fn parse_email(value: &str, field: FieldName) -> Result<EmailAddress, Error> {
    EmailAddress::new(value).map_err(|err| {
        let code = match err {
            UserValidationError::EmptyEmail => ErrorCode::MissingField,
            UserValidationError::EmailTooLong { .. } => ErrorCode::EmailTooLong,
            _ => ErrorCode::InvalidEmail,
        };
        ValidationError::new(field.as_str(), err.to_string()).with_code(code)
    })
}

/// Validate a plaintext password against the length policy.
pub(crate) fn parse_password(value: &str, field: FieldName) -> Result<Password, Error> {
    Password::new(value).map_err(|err| {
        let code = match err {
            PasswordValidationError::TooShort { .. } => ErrorCode::PasswordTooShort,
            PasswordValidationError::TooLong { .. } => ErrorCode::PasswordTooLong,
        };
        ValidationError::new(field.as_str(), err.to_string()).with_code(code)
    })
}

/// Parse a user id taken from a path segment.
pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    if value.trim().is_empty() {
        return Err(missing_field_error(field));
    }
    UserId::new(value).map_err(|_| {
        let name = field.as_str();
        ValidationError::new(name, format!("{name} must be a valid UUID"))
            .with_value(ErrorCode::InvalidUuid, value)
    })
}

pub(crate) fn map_login_validation_error(err: &LoginValidationError) -> Error {
    let field = match err {
        LoginValidationError::EmptyEmail => EMAIL,
        LoginValidationError::EmptyPassword => PASSWORD,
    };
    ValidationError::new(field.as_str(), err.to_string()).with_code(ErrorCode::MissingField)
}

pub(crate) fn map_page_request_error(err: PageRequestError) -> Error {
    let (field, code) = match err {
        PageRequestError::ZeroPage => ("page", ErrorCode::InvalidPage),
        PageRequestError::ZeroLimit => ("limit", ErrorCode::InvalidLimit),
    };
    ValidationError::new(field, err.to_string()).with_code(code)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode as DomainErrorCode;
    use rstest::rstest;

    fn detail_code(error: &Error) -> Option<&str> {
        error
            .details()
            .and_then(|details| details.get("code"))
            .and_then(serde_json::Value::as_str)
    }

    #[rstest]
    #[case("", "missing_field")]
    #[case("not-an-email", "invalid_email")]
    fn bad_emails_are_rejected(#[case] raw: &str, #[case] code: &str) {
        let error = parse_email(raw, EMAIL).expect_err("invalid email");
        assert_eq!(error.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(detail_code(&error), Some(code));
    }

    #[rstest]
    fn overlong_emails_have_their_own_code() {
        let raw = format!("{}@example.com", "a".repeat(260));
        let error = parse_email(&raw, EMAIL).expect_err("too long");
        assert_eq!(detail_code(&error), Some("email_too_long"));
    }

    #[rstest]
    #[case("short".to_owned(), "password_too_short")]
    #[case("x".repeat(33), "password_too_long")]
    fn password_policy_is_enforced(#[case] raw: String, #[case] code: &str) {
        let error = parse_password(&raw, PASSWORD).expect_err("invalid password");
        assert_eq!(detail_code(&error), Some(code));
    }

    #[rstest]
    #[case("", "missing_field")]
    #[case("   ", "missing_field")]
    #[case("123", "invalid_uuid")]
    fn bad_user_ids_are_rejected(#[case] raw: &str, #[case] code: &str) {
        let error = parse_user_id(raw, ID).expect_err("invalid id");
        assert_eq!(detail_code(&error), Some(code));
        assert_eq!(
            error.details().and_then(|d| d.get("field")),
            Some(&serde_json::json!("id"))
        );
    }

    #[rstest]
    fn valid_user_ids_parse() {
        let id = UserId::random();
        assert_eq!(parse_user_id(&id.to_string(), ID), Ok(id));
    }

    #[rstest]
    #[case(PageRequestError::ZeroPage, "page")]
    #[case(PageRequestError::ZeroLimit, "limit")]
    fn page_errors_name_the_parameter(#[case] err: PageRequestError, #[case] field: &str) {
        let error = map_page_request_error(err);
        assert_eq!(
            error.details().and_then(|d| d.get("field")),
            Some(&serde_json::json!(field))
        );
    }
}
