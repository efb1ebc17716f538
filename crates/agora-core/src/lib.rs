#![forbid(unsafe_code)]

//! Governance data model for the Agora notification stack.
//!
//! This crate holds the value types that cross the boundary between the
//! wallet's background sync engine and the UI: proposal snapshots, their
//! vote tallies, and the notices that announce lifecycle changes. It does
//! no I/O and spawns no threads; everything here is plain data.

pub mod notice;
pub mod payload;
pub mod proposal;

pub use notice::{NoticeKind, ProposalNotice};
pub use payload::ProposalPayload;
pub use proposal::{Category, Proposal, Token, TokenError, VoteSummary};
