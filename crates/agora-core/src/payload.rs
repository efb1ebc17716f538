#![forbid(unsafe_code)]

//! Narrowing of untyped sync-engine payloads.
//!
//! The sync engine emits proposal payloads as `&dyn Any`: its notification
//! plumbing is shared across event families and makes no type guarantee at
//! the call boundary. Narrowing happens exactly once, here, so the rest of
//! the stack only ever sees a [`ProposalPayload`] and never a bare `Any`.

use std::any::Any;

use crate::proposal::Proposal;

/// A sync-engine payload resolved at the callback boundary.
///
/// Malformed payloads are a recoverable condition, not an error: callers
/// substitute the placeholder proposal and carry on.
#[derive(Debug, Clone, PartialEq)]
pub enum ProposalPayload {
    Valid(Proposal),
    Malformed,
}

impl ProposalPayload {
    /// Narrow an untyped payload to a proposal snapshot.
    ///
    /// Anything that is not a [`Proposal`] narrows to `Malformed`. Never
    /// panics, regardless of the concrete type behind the `Any`.
    #[must_use]
    pub fn narrow(payload: &dyn Any) -> Self {
        match payload.downcast_ref::<Proposal>() {
            Some(proposal) => Self::Valid(proposal.clone()),
            None => Self::Malformed,
        }
    }

    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed)
    }

    /// Resolve to a concrete proposal, substituting the placeholder for
    /// malformed payloads. Total; the result is always a usable value.
    #[must_use]
    pub fn into_proposal(self) -> Proposal {
        match self {
            Self::Valid(proposal) => proposal,
            Self::Malformed => Proposal::placeholder(),
        }
    }
}
