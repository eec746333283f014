//! Collaborator traits injected into the client.

mod navigator;
mod store;

pub use navigator::{Navigator, NoopNavigator};
pub use store::{CredentialKey, CredentialStore};
