//! Validated value types.

mod api_url;

pub use api_url::{API_URL_ENV, ApiUrl};
