use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{EmailAddress, MessageText, TypeConstraintError};

/// Message box on the listing detail page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct SendMessageForm {
    #[validate(length(min = 1), email)]
    pub sender_email: String,
    #[validate(length(min = 1))]
    pub message: String,
}

impl SendMessageForm {
    /// Clears the draft after a successful send. Failed sends keep the input
    /// so the buyer can retry without retyping.
    pub fn settle(&mut self, sent: bool) {
        if sent {
            *self = Self::default();
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendMessagePayload {
    pub sender_email: EmailAddress,
    pub message: MessageText,
}

#[derive(Debug, Error)]
pub enum SendMessageFormError {
    #[error("Message form validation failed: {0}")]
    Validation(String),
    #[error("Message form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for SendMessageFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for SendMessageFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<&SendMessageForm> for SendMessagePayload {
    type Error = SendMessageFormError;

    fn try_from(value: &SendMessageForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            sender_email: EmailAddress::new(value.sender_email.as_str())?,
            message: MessageText::new(value.message.as_str())?,
        })
    }
}
