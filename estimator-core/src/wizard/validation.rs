//! Per-step validation gate.
//!
//! Each step has a pure predicate over [`WizardState`]. The controller runs
//! the current step's predicate before moving forward; submission runs all
//! of them. The first failing rule wins, and its message is what the user
//! sees.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use super::Step;
use crate::calculations::common::parse_decimal_strict;
use crate::models::{UserDetailField, WizardState};

/// Largest carpet area accepted, in sq. ft.
pub const MAX_CARPET_AREA: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a scope of work")]
    MissingScope,

    #[error("Please select a home type")]
    MissingHomeType,

    #[error("Please enter carpet area in sq. ft.")]
    MissingCarpetArea,

    #[error("Carpet area must be a number")]
    CarpetAreaNotNumeric,

    #[error("Carpet area must be greater than zero")]
    CarpetAreaNotPositive,

    #[error("Carpet area cannot exceed 10,00,000 sq. ft.")]
    CarpetAreaTooLarge,

    #[error("Please select at least one room")]
    NoRoomsSelected,

    #[error("Please select a package")]
    MissingPackage,

    #[error("Please enter your {}", detail_prompt(.0))]
    MissingDetail(UserDetailField),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone,
}

impl ValidationError {
    /// The step whose rule produced this error.
    pub fn step(&self) -> Step {
        match self {
            Self::MissingScope => Step::Scope,
            Self::MissingHomeType
            | Self::MissingCarpetArea
            | Self::CarpetAreaNotNumeric
            | Self::CarpetAreaNotPositive
            | Self::CarpetAreaTooLarge => Step::HomeType,
            Self::NoRoomsSelected => Step::RoomSelection,
            Self::MissingPackage => Step::PackageSelection,
            Self::MissingDetail(_) | Self::InvalidEmail | Self::InvalidPhone => Step::UserDetails,
        }
    }
}

fn detail_prompt(field: &UserDetailField) -> &'static str {
    match field {
        UserDetailField::Name => "name",
        UserDetailField::Email => "email",
        UserDetailField::Phone => "phone number",
        UserDetailField::City => "city",
    }
}

/// Runs the rules of a single step.
pub fn validate_step(
    step: Step,
    state: &WizardState,
) -> Result<(), ValidationError> {
    match step {
        Step::Scope => {
            if state.scope.is_none() {
                return Err(ValidationError::MissingScope);
            }
        }
        Step::HomeType => {
            if state.home_type.is_none() {
                return Err(ValidationError::MissingHomeType);
            }
            parse_carpet_area(&state.carpet_area)?;
        }
        Step::RoomSelection => {
            if state.rooms.is_empty() {
                return Err(ValidationError::NoRoomsSelected);
            }
        }
        Step::PackageSelection => {
            if state.package.is_none() {
                return Err(ValidationError::MissingPackage);
            }
        }
        Step::UserDetails => validate_user_details(state)?,
        Step::Summary => {}
    }
    Ok(())
}

/// Runs every step's rules in order and returns the first failure.
pub fn validate_all(state: &WizardState) -> Result<(), ValidationError> {
    Step::ALL
        .into_iter()
        .try_for_each(|step| validate_step(step, state))
}

/// Parses the carpet area input into a positive number of square feet, no
/// more than [`MAX_CARPET_AREA`].
pub fn parse_carpet_area(input: &str) -> Result<Decimal, ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::MissingCarpetArea);
    }
    let area = parse_decimal_strict(input).ok_or(ValidationError::CarpetAreaNotNumeric)?;
    if area <= Decimal::ZERO {
        return Err(ValidationError::CarpetAreaNotPositive);
    }
    if area > MAX_CARPET_AREA {
        return Err(ValidationError::CarpetAreaTooLarge);
    }
    Ok(area)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Digits of a phone number with every other character removed.
pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone_digits(phone).len() == 10
}

fn validate_user_details(state: &WizardState) -> Result<(), ValidationError> {
    let details = &state.user_details;

    if let Some(field) = UserDetailField::ALL
        .into_iter()
        .find(|field| details.get(*field).trim().is_empty())
    {
        return Err(ValidationError::MissingDetail(field));
    }
    if !is_valid_email(&details.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !is_valid_phone(&details.phone) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}
