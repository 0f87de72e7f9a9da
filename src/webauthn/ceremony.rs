//! # Ceremony State Machine
//!
//! Both ceremonies advance through the same states:
//!
//! ```text
//! Idle -> AwaitingServerChallenge -> AwaitingLocalAuthenticator
//!      -> AwaitingServerVerification -> Complete
//! ```
//!
//! `Failed` is reachable from every non-terminal state. An abandoned
//! ceremony simply never reaches `Complete`; there is no cancellation or
//! timeout transition.
//!
//! The tracker emits a `tracing` event per transition, which is the
//! observable record of the ceremony's progress.

/// Which ceremony a tracker is driving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CeremonyKind {
    Registration,
    Login,
}

/// Progress of a single ceremony invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CeremonyState {
    /// Not started
    Idle,
    /// Begin request issued, waiting for server options
    AwaitingServerChallenge,
    /// Options decoded, waiting for the local authenticator
    AwaitingLocalAuthenticator,
    /// Finish request issued, waiting for server verification
    AwaitingServerVerification,
    /// Server accepted the finish payload
    Complete,
    /// Terminal failure; the error travels separately as a `CeremonyError`
    Failed,
}

impl CeremonyState {
    /// Whether the ceremony can leave this state
    pub fn is_terminal(self) -> bool {
        matches!(self, CeremonyState::Complete | CeremonyState::Failed)
    }

    /// The transition relation: which successor states are admissible
    pub fn permits(self, next: CeremonyState) -> bool {
        use CeremonyState::*;
        match (self, next) {
            (Idle, AwaitingServerChallenge) => true,
            (AwaitingServerChallenge, AwaitingLocalAuthenticator) => true,
            (AwaitingLocalAuthenticator, AwaitingServerVerification) => true,
            (AwaitingServerVerification, Complete) => true,
            // Failure is admissible from any non-terminal state
            (from, Failed) => !from.is_terminal(),
            _ => false,
        }
    }
}

/// State tracker for one ceremony invocation
///
/// Owned by the flow that created it; never shared across ceremonies.
#[derive(Debug)]
pub struct Ceremony {
    kind: CeremonyKind,
    state: CeremonyState,
}

impl Ceremony {
    pub fn new(kind: CeremonyKind) -> Self {
        Ceremony {
            kind,
            state: CeremonyState::Idle,
        }
    }

    pub fn kind(&self) -> CeremonyKind {
        self.kind
    }

    pub fn state(&self) -> CeremonyState {
        self.state
    }

    /// Advance to the next state
    ///
    /// Callers drive transitions in protocol order; an inadmissible
    /// transition is a programming error.
    pub fn advance(&mut self, next: CeremonyState) {
        debug_assert!(
            self.state.permits(next),
            "inadmissible ceremony transition: {:?} -> {:?}",
            self.state,
            next
        );
        tracing::debug!(kind = ?self.kind, from = ?self.state, to = ?next, "ceremony transition");
        self.state = next;
    }

    /// Mark the ceremony failed
    pub fn fail(&mut self) {
        tracing::debug!(kind = ?self.kind, from = ?self.state, "ceremony failed");
        self.state = CeremonyState::Failed;
    }
}
