#![forbid(unsafe_code)]

//! Lifecycle notices published over the notification bridge.

use serde::{Deserialize, Serialize};

use crate::proposal::Proposal;

/// What happened, as reported by the sync engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    /// A governance sync pass completed; no specific proposal implicated.
    Synced,
    NewProposalFound,
    VoteStarted,
    VoteFinished,
}

/// One lifecycle notification.
///
/// `proposal` is always a concrete value: the implicated proposal for the
/// three proposal-specific kinds, the placeholder for [`NoticeKind::Synced`]
/// (and for payloads that failed to narrow). Consumers never null-check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalNotice {
    pub kind: NoticeKind,
    pub proposal: Proposal,
}

impl ProposalNotice {
    #[must_use]
    pub fn new(kind: NoticeKind, proposal: Proposal) -> Self {
        Self { kind, proposal }
    }

    /// The notice emitted after a completed sync pass.
    #[must_use]
    pub fn synced() -> Self {
        Self::new(NoticeKind::Synced, Proposal::placeholder())
    }
}
