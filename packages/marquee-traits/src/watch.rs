//! Change-notification types for explicit watch subscriptions.
//!
//! The sizes this engine derives go stale in two ways: the container's box
//! resizes, or the content under a text node mutates. Instead of implicit
//! host observers, the document hands out a [`WatchId`] per watched target
//! and the host feeds raw [`WatchEvent`]s back through it. Bursts are
//! coalesced by the document before any refitting runs, and notifications
//! carrying a released id are dropped.

/// Identifier for a registered watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatchId(pub u64);

/// A raw change notification from the host.
///
/// Raw means exactly that: hosts may deliver redundant or bursty events
/// (including a resize caused by the fitting itself); deduplication is the
/// receiver's job, not the sender's.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WatchEvent {
    /// The watched container's box width changed.
    BoxResized {
        /// The watch the notification belongs to.
        watch_id: WatchId,
        /// New box width in pixels.
        width_px: f32,
    },
    /// The content under a watched node changed.
    ContentChanged {
        /// The watch the notification belongs to.
        watch_id: WatchId,
    },
}
