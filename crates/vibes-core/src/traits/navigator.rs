//! Navigation collaborator.

/// Receives the "redirect to an unauthenticated entry point" signal.
///
/// The client calls this once per irrecoverable refresh failure, after the
/// persisted credentials were cleared. The surrounding application decides
/// where the user ends up.
pub trait Navigator: Send + Sync {
    fn redirect_unauthenticated(&self);
}

/// A navigator that ignores the signal.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn redirect_unauthenticated(&self) {}
}
