//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, text values and numeric constraints are enforced at the
//! boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::{ValidateEmail, ValidateUrl};

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// A numeric value required to be non-negative was negative or not finite.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// A numeric value could not be parsed from its textual form.
    #[error("{0} must be a number")]
    NotANumber(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// URL validation failed.
    #[error("{0} must be a valid URL")]
    InvalidUrl(&'static str),
    /// Email validation failed.
    #[error("{0} must be a valid email address")]
    InvalidEmail(&'static str),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            /// Like [`Self::new`] but maps blank input to `None`.
            pub fn optional<S: Into<String>>(value: S) -> Option<Self> {
                Self::new(value).ok()
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

/// Generates a validated string newtype. `$check` receives the trimmed value
/// and returns whether it is acceptable; `$err` names the error variant.
macro_rules! validated_string_newtype {
    ($name:ident, $doc:expr, $field:expr, $check:expr, $err:ident) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed value and validates its format.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = trim_and_require_non_empty(value, $field)?;
                let check: fn(&str) -> bool = $check;
                if !check(trimmed.as_str()) {
                    return Err(TypeConstraintError::$err($field));
                }
                Ok(Self(trimmed))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

macro_rules! non_negative_f64_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
        #[serde(transparent)]
        pub struct $name(f64);

        impl $name {
            /// Constructs a finite numeric value that is zero or greater.
            pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
                if value.is_finite() && value >= 0.0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NegativeNumber($field))
                }
            }

            /// Parses a user supplied decimal string such as `"150"` or `" 9.99 "`.
            pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(TypeConstraintError::EmptyString($field));
                }
                let number = trimmed
                    .parse::<f64>()
                    .map_err(|_| TypeConstraintError::NotANumber($field))?;
                Self::new(number)
            }

            /// Returns the raw `f64` value.
            pub const fn get(self) -> f64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<f64> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: f64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for f64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<f64> for $name {
            fn eq(&self, other: &f64) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for f64 {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

non_empty_string_newtype!(
    ListingId,
    "Store-generated identifier of a listing.",
    "listing id"
);
non_empty_string_newtype!(
    ListingTitle,
    "Listing title enforcing non-empty values.",
    "title"
);
non_empty_string_newtype!(
    ListingDescription,
    "Free-form listing description.",
    "description"
);
non_empty_string_newtype!(
    ListingLocation,
    "Human readable pickup location.",
    "location"
);
non_empty_string_newtype!(
    MessageText,
    "Body of a buyer-to-seller message.",
    "message"
);

validated_string_newtype!(
    EmailAddress,
    "Contact email address.",
    "email",
    |value| value.validate_email(),
    InvalidEmail
);
validated_string_newtype!(
    ImageUrl,
    "Publicly resolvable listing image URL.",
    "image url",
    |value| value.validate_url(),
    InvalidUrl
);

non_negative_f64_newtype!(
    ListingPrice,
    "Non-negative price value in standard currency units.",
    "price"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_titles() {
        let value = ListingTitle::new("  Bike  ").unwrap();
        assert_eq!(value.as_str(), "Bike");
    }

    #[test]
    fn blank_optional_values_become_none() {
        assert!(ListingLocation::optional("   ").is_none());
        assert_eq!(
            ListingLocation::optional(" Palo Alto ").unwrap(),
            "Palo Alto"
        );
    }

    #[test]
    fn validates_urls() {
        assert!(ImageUrl::new("https://cdn.example.com/public/1-bike.png").is_ok());
        let err = ImageUrl::new("not-a-url").unwrap_err();
        assert_eq!(err, TypeConstraintError::InvalidUrl("image url"));
    }

    #[test]
    fn validates_emails() {
        assert!(EmailAddress::new(" a@b.com ").is_ok());
        assert_eq!(
            EmailAddress::new("nobody").unwrap_err(),
            TypeConstraintError::InvalidEmail("email")
        );
        assert_eq!(
            EmailAddress::new("  ").unwrap_err(),
            TypeConstraintError::EmptyString("email")
        );
    }

    #[test]
    fn price_parses_decimal_strings() {
        assert_eq!(ListingPrice::parse("150").unwrap().get(), 150.0);
        assert_eq!(ListingPrice::parse(" 9.99 ").unwrap().get(), 9.99);
        assert_eq!(ListingPrice::parse("0").unwrap().get(), 0.0);
    }

    #[test]
    fn price_rejects_non_numeric_input() {
        assert_eq!(
            ListingPrice::parse("abc").unwrap_err(),
            TypeConstraintError::NotANumber("price")
        );
        assert_eq!(
            ListingPrice::parse("").unwrap_err(),
            TypeConstraintError::EmptyString("price")
        );
    }

    #[test]
    fn price_rejects_negative_and_non_finite_numbers() {
        assert_eq!(
            ListingPrice::new(-0.01).unwrap_err(),
            TypeConstraintError::NegativeNumber("price")
        );
        assert!(ListingPrice::parse("inf").is_err());
        assert!(ListingPrice::parse("NaN").is_err());
    }
}
