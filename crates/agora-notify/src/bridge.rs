#![forbid(unsafe_code)]

//! The proposal notification bridge.
//!
//! A fixed-capacity channel decoupling the sync engine's worker threads
//! from the UI's poll loop. Producers call the [`ProposalNotifications`]
//! callbacks from any thread; the single consumer drains
//! [`ProposalNotice`] values on its own schedule.
//!
//! # Delivery Rules
//!
//! - Enqueue is `try_send`: O(1), never blocks, never suspends.
//! - Queue full: the **newest** notice is dropped, preserving the older
//!   backlog (an in-progress vote already queued outranks a fresh hint).
//! - Payload of the wrong type: the placeholder proposal is substituted;
//!   the call still succeeds.
//! - Receiver gone: producer calls no-op. A listener handle outliving its
//!   session is safe to keep calling.
//!
//! Notices are refresh hints, not authoritative state (the UI re-queries
//! the wallet on every notice), so a dropped notice costs one repaint,
//! never data.
//!
//! # Example
//!
//! ```
//! use agora_notify::{ProposalNotifications, bridge_default};
//! use agora_core::{NoticeKind, Proposal};
//!
//! let (listener, notices) = bridge_default();
//!
//! let proposal = Proposal { name: "lower-pos-reward".into(), ..Proposal::default() };
//! listener.on_new_proposal(&proposal);
//! listener.on_synced();
//!
//! let first = notices.recv().unwrap();
//! assert_eq!(first.kind, NoticeKind::NewProposalFound);
//! assert_eq!(first.proposal, proposal);
//! ```

use std::any::Any;
use std::sync::mpsc;

use agora_core::{NoticeKind, ProposalNotice, ProposalPayload};

/// Default queue capacity.
///
/// Four slots cover a full sync pass (discovery, vote start, vote finish,
/// sync-complete) landing between two UI polls. Not derived from measured
/// load; pass a different value to [`bridge`] if a session needs more.
pub const DEFAULT_CAPACITY: usize = 4;

/// Callback capability set the sync engine drives.
///
/// Payloads arrive as `&dyn Any` because the engine's notification plumbing
/// is shared across event families; implementations must narrow defensively
/// and must not panic or block on any input.
pub trait ProposalNotifications: Send + Sync {
    /// A governance sync pass completed.
    fn on_synced(&self);
    /// A proposal not seen before was discovered.
    fn on_new_proposal(&self, payload: &dyn Any);
    /// Voting opened on a proposal.
    fn on_vote_started(&self, payload: &dyn Any);
    /// Voting closed on a proposal.
    fn on_vote_finished(&self, payload: &dyn Any);
}

/// Construct a bridge with the given queue capacity.
///
/// Returns the two endpoints: a cloneable producer handle for the sync
/// engine and the single-consumer receiver for the UI loop. Capacity must
/// be at least 1.
#[must_use]
pub fn bridge(capacity: usize) -> (ProposalListener, NoticeReceiver) {
    let (tx, rx) = mpsc::sync_channel(capacity);
    (ProposalListener { tx }, NoticeReceiver { rx })
}

/// [`bridge`] with [`DEFAULT_CAPACITY`].
#[must_use]
pub fn bridge_default() -> (ProposalListener, NoticeReceiver) {
    bridge(DEFAULT_CAPACITY)
}

/// Producer endpoint handed to the sync engine.
///
/// Clone one handle per worker thread; clones share the same queue and
/// need no coordination between each other.
#[derive(Debug, Clone)]
pub struct ProposalListener {
    tx: mpsc::SyncSender<ProposalNotice>,
}

impl ProposalListener {
    fn narrow(kind: NoticeKind, payload: &dyn Any) -> ProposalNotice {
        let payload = ProposalPayload::narrow(payload);
        if payload.is_malformed() {
            tracing::warn!(?kind, "payload is not a proposal, substituting placeholder");
        }
        ProposalNotice::new(kind, payload.into_proposal())
    }

    fn submit(&self, notice: ProposalNotice) {
        match self.tx.try_send(notice) {
            Ok(()) => {}
            Err(mpsc::TrySendError::Full(notice)) => {
                tracing::debug!(kind = ?notice.kind, "notice queue full, dropping newest");
            }
            Err(mpsc::TrySendError::Disconnected(_)) => {
                tracing::trace!("notice receiver dropped, ignoring");
            }
        }
    }
}

impl ProposalNotifications for ProposalListener {
    fn on_synced(&self) {
        self.submit(ProposalNotice::synced());
    }

    fn on_new_proposal(&self, payload: &dyn Any) {
        self.submit(Self::narrow(NoticeKind::NewProposalFound, payload));
    }

    fn on_vote_started(&self, payload: &dyn Any) {
        self.submit(Self::narrow(NoticeKind::VoteStarted, payload));
    }

    fn on_vote_finished(&self, payload: &dyn Any) {
        self.submit(Self::narrow(NoticeKind::VoteFinished, payload));
    }
}

/// Consumer endpoint owned by the UI loop.
///
/// `Send` but not `Sync`: exactly one thread drains it, which is what
/// makes the FIFO guarantee meaningful. Notices come out in arrival order
/// and each is delivered once.
#[derive(Debug)]
pub struct NoticeReceiver {
    rx: mpsc::Receiver<ProposalNotice>,
}

impl NoticeReceiver {
    /// Block until a notice is available.
    ///
    /// Returns `None` once every [`ProposalListener`] clone has been
    /// dropped and the queue is empty, i.e. the session is over.
    #[must_use]
    pub fn recv(&self) -> Option<ProposalNotice> {
        self.rx.recv().ok()
    }

    /// Non-blocking poll for a single notice.
    #[must_use]
    pub fn try_recv(&self) -> Option<ProposalNotice> {
        self.rx.try_recv().ok()
    }

    /// Everything currently queued, without blocking.
    ///
    /// The once-per-frame consumption pattern: the UI calls this each poll
    /// cycle and refreshes once per yielded notice.
    pub fn drain(&self) -> impl Iterator<Item = ProposalNotice> + '_ {
        self.rx.try_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::{Proposal, Token};

    fn proposal(name: &str, fill: u8) -> Proposal {
        Proposal {
            token: Token::new([fill; 32]),
            name: name.into(),
            ..Proposal::default()
        }
    }

    #[test]
    fn example_sequence_drains_in_fifo_order() {
        let (listener, notices) = bridge_default();
        let a = proposal("proposal-a", 1);

        listener.on_new_proposal(&a);
        listener.on_vote_started(&a);
        listener.on_synced();

        let first = notices.recv().expect("first notice");
        assert_eq!(first.kind, NoticeKind::NewProposalFound);
        assert_eq!(first.proposal, a);

        let second = notices.recv().expect("second notice");
        assert_eq!(second.kind, NoticeKind::VoteStarted);
        assert_eq!(second.proposal, a);

        let third = notices.recv().expect("third notice");
        assert_eq!(third.kind, NoticeKind::Synced);
        assert!(third.proposal.is_placeholder());

        assert!(notices.try_recv().is_none());
    }

    #[test]
    fn overflow_drops_the_newest() {
        let (listener, notices) = bridge_default();

        for i in 0..6u8 {
            listener.on_new_proposal(&proposal(&format!("p{i}"), i + 1));
        }

        let observed: Vec<_> = notices.drain().collect();
        assert_eq!(observed.len(), DEFAULT_CAPACITY);
        for (i, notice) in observed.iter().enumerate() {
            // The earliest four survive; p4 and p5 were dropped.
            assert_eq!(notice.proposal.name, format!("p{i}"));
        }
    }

    #[test]
    fn synced_always_carries_placeholder() {
        let (listener, notices) = bridge_default();
        listener.on_synced();

        let notice = notices.recv().expect("notice");
        assert_eq!(notice.kind, NoticeKind::Synced);
        assert!(notice.proposal.is_placeholder());
    }

    #[test]
    fn malformed_payload_defaults_without_panicking() {
        let (listener, notices) = bridge_default();

        listener.on_new_proposal(&"garbage");
        listener.on_vote_started(&1234u32);
        listener.on_vote_finished(&vec![0u8; 8]);

        for expected in [
            NoticeKind::NewProposalFound,
            NoticeKind::VoteStarted,
            NoticeKind::VoteFinished,
        ] {
            let notice = notices.recv().expect("notice");
            assert_eq!(notice.kind, expected);
            assert!(notice.proposal.is_placeholder());
        }
    }

    #[test]
    fn valid_payload_survives_the_trip() {
        let (listener, notices) = bridge_default();
        let p = proposal("round-trip", 7);

        listener.on_new_proposal(&p);

        let notice = notices.recv().expect("notice");
        assert_eq!(notice.kind, NoticeKind::NewProposalFound);
        assert_eq!(notice.proposal, p);
    }

    #[test]
    fn capacity_is_configurable() {
        let (listener, notices) = bridge(2);

        listener.on_synced();
        listener.on_synced();
        listener.on_synced();

        assert_eq!(notices.drain().count(), 2);
    }

    #[test]
    fn producer_calls_after_receiver_drop_are_noops() {
        let (listener, notices) = bridge_default();
        drop(notices);

        // Must not panic or block.
        listener.on_synced();
        listener.on_new_proposal(&proposal("late", 3));
    }

    #[test]
    fn recv_reports_end_of_session() {
        let (listener, notices) = bridge_default();
        listener.on_synced();
        drop(listener);

        assert!(notices.recv().is_some());
        assert!(notices.recv().is_none());
    }

    #[test]
    fn space_freed_by_draining_lets_new_notices_flow() {
        let (listener, notices) = bridge(1);

        listener.on_synced();
        listener.on_new_proposal(&proposal("dropped", 1)); // queue full

        assert_eq!(
            notices.recv().expect("queued notice").kind,
            NoticeKind::Synced
        );

        let p = proposal("flows", 2);
        listener.on_new_proposal(&p);
        assert_eq!(notices.recv().expect("next notice").proposal, p);
    }
}
