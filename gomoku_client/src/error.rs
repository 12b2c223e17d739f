//! Failures surfaced to the user.

use derive_more::{Display, Error};

/// A failure surfaced by the session controller.
///
/// None of these are fatal: every one leaves the session in its last
/// consistent state with the locks released, so the user can retry or
/// start a new game. There is no automatic retry.
#[derive(Debug, Clone, Display, Error)]
pub enum ClientError {
    /// The game service could not be reached, or a request failed for a
    /// reason other than an explicit refusal.
    #[display("game service unavailable: {message}")]
    ServiceUnavailable {
        /// Transport or service detail.
        message: String,
    },
    /// The service refused a submitted move (wrong turn or occupied cell).
    #[display("move forbidden: {message}")]
    MoveForbidden {
        /// Refusal detail from the service.
        message: String,
    },
    /// An advisory request failed or errored.
    #[display("advice request failed: {message}")]
    AdviceFailure {
        /// Transport or service detail.
        message: String,
    },
}
