//! Status enums for asynchronous storefront operations.

use serde::{Deserialize, Serialize};

/// Catalog load status.
///
/// `Loading` is entered synchronously when a load is issued so a UI can
/// render a placeholder before the request resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// No load has been issued yet.
    #[default]
    Idle,
    /// A load is in flight.
    Loading,
    /// The most recent load succeeded.
    Ready,
    /// The most recent load failed; any previous list is preserved.
    Error,
}

impl LoadStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Checkout submission state.
///
/// Transitions: `Idle -> Submitting -> {Succeeded, Failed}`. Both terminal
/// states return to `Submitting` on the next user-initiated submission, so
/// failed attempts are retryable without rebuilding the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutState {
    /// No submission has been attempted.
    #[default]
    Idle,
    /// An order submission is in flight; further submissions are inert.
    Submitting,
    /// The last submission was confirmed by the Order Service.
    Succeeded,
    /// The last submission was rejected; the cart is preserved for retry.
    Failed,
}

impl CheckoutState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }

    /// Whether the flow has reached a terminal state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl std::fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
