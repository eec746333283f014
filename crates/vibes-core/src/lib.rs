//! vibes-core - Core types and traits for the VibesBNB early-access client.
//!
//! The HTTP client itself lives in `vibes-http`; this crate holds what it
//! and its consumers share: the error taxonomy, token newtypes, the API base
//! URL, the credential store and navigator collaborators, and the signup
//! domain.

pub mod error;
pub mod memory;
pub mod signup;
pub mod tokens;
pub mod traits;
pub mod types;

pub use error::{Error, ErrorKind};
pub use memory::MemoryCredentialStore;
pub use signup::{SignupForm, SignupRequest, UserCategory};
pub use tokens::{AccessToken, RefreshToken};
pub use traits::{CredentialKey, CredentialStore, Navigator, NoopNavigator};
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
