//! Early-access signup domain.
//!
//! This module defines the payload posted by the early-access form and the
//! client-side validation that runs before the single network call. The
//! actual submission lives in the HTTP crate.

mod form;
mod types;

pub use form::{SignupForm, ValidationError};
pub use types::{AirbnbData, LocationData, ServiceHostData, SignupRequest, UserCategory};

use crate::error::Error;

/// Path of the signup endpoint, relative to the API base URL.
pub const SIGNUP_PATH: &str = "/early-access/signup";

/// Path of the thank-you page shown after a successful signup.
pub fn thank_you_path(category: UserCategory) -> String {
    format!("/thank-you?category={}", category.as_str())
}

/// User-facing message for a failed signup submission.
pub fn signup_failure_message(error: &Error) -> String {
    if let Error::InvalidInput(crate::error::InvalidInputError::Signup(e)) = error {
        return e.to_string();
    }
    if error.status() == Some(409) {
        return "This email is already registered for early access in this category".to_string();
    }
    if let Some(message) = error.server_message() {
        return message.to_string();
    }
    "Failed to sign up. Please check your connection and try again.".to_string()
}
