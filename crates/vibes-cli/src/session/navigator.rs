//! Logout notice for the terminal.

use vibes_core::Navigator;

use crate::output;

/// Tells the user to sign in again once the stored session is gone.
#[derive(Debug, Default)]
pub struct CliNavigator;

impl Navigator for CliNavigator {
    fn redirect_unauthenticated(&self) {
        output::warning("Session expired. Run 'vibes session set' to sign in again.");
    }
}
