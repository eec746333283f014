//! Session persistence and logout handling for the CLI.

pub mod navigator;
pub mod storage;

pub use navigator::CliNavigator;
pub use storage::FileCredentialStore;
