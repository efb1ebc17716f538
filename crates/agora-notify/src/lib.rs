#![forbid(unsafe_code)]

//! Bounded notification bridge between wallet sync and the UI loop.
//!
//! The sync engine runs its own worker threads and reports proposal
//! lifecycle changes through callback handles; the UI drains those reports
//! once per poll cycle on a single thread. This crate provides the channel
//! in between, with one hard rule: **the producer side never blocks**,
//! whatever the consumer is doing.

pub mod bridge;
pub mod registry;

pub use bridge::{
    DEFAULT_CAPACITY, NoticeReceiver, ProposalListener, ProposalNotifications, bridge,
    bridge_default,
};
pub use registry::NotificationRegistry;
