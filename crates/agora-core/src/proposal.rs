#![forbid(unsafe_code)]

//! Proposal snapshots as delivered by the sync engine.
//!
//! A [`Proposal`] is an immutable snapshot of a governance item at the
//! moment a notification was emitted. It is a refresh hint, not the source
//! of truth: consumers re-query the wallet for authoritative state after
//! every notice.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of a censorship token in bytes.
pub const TOKEN_LEN: usize = 32;

/// Censorship token identifying a proposal on the governance platform.
///
/// Tokens round-trip through lowercase hex. The all-zero token is reserved
/// for the placeholder proposal and never appears on a real item.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Token([u8; TOKEN_LEN]);

impl Token {
    #[must_use]
    pub fn new(bytes: [u8; TOKEN_LEN]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; TOKEN_LEN] {
        &self.0
    }

    /// True for the reserved all-zero token.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; TOKEN_LEN]
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({self})")
    }
}

/// Errors parsing a censorship token from its hex form.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token must be {TOKEN_LEN} bytes, got {0}")]
    BadLength(usize),

    #[error("invalid hex: {0}")]
    BadHex(#[from] hex::FromHexError),
}

impl FromStr for Token {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        let bytes: [u8; TOKEN_LEN] = bytes
            .try_into()
            .map_err(|v: Vec<u8>| TokenError::BadLength(v.len()))?;
        Ok(Self(bytes))
    }
}

/// Lifecycle category of a proposal, distinct from the notice kind that
/// announced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Category {
    /// Submitted but voting has not begun.
    #[default]
    Pre,
    /// Voting is underway.
    Active,
    Approved,
    Rejected,
    Abandoned,
}

/// Running vote tally for a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteSummary {
    pub yes: u64,
    pub no: u64,
    /// Tickets eligible to vote when the vote started.
    pub eligible: u64,
}

impl VoteSummary {
    /// Fraction of cast votes that are yes votes, in `0.0..=1.0`.
    /// Zero when no votes have been cast.
    #[must_use]
    pub fn approval_rate(&self) -> f64 {
        let cast = self.yes + self.no;
        if cast == 0 {
            return 0.0;
        }
        self.yes as f64 / cast as f64
    }

    /// Fraction of eligible tickets that have voted, in `0.0..=1.0`.
    /// Zero when no tickets were eligible.
    #[must_use]
    pub fn turnout(&self) -> f64 {
        if self.eligible == 0 {
            return 0.0;
        }
        (self.yes + self.no) as f64 / self.eligible as f64
    }
}

/// Immutable snapshot of a governance proposal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Proposal {
    pub token: Token,
    pub name: String,
    pub category: Category,
    pub vote_summary: VoteSummary,
    /// Unix seconds of the last update on the governance platform.
    pub timestamp: i64,
}

impl Proposal {
    /// The empty default carried by notices that implicate no specific
    /// proposal, and substituted when a payload fails to narrow.
    ///
    /// Consumers can rely on every notice carrying a concrete proposal
    /// value; this is that value when there is nothing real to carry.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// True when this is the empty placeholder rather than a real item.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.token.is_zero() && self.name.is_empty()
    }
}
