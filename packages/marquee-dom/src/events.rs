//! Watch bookkeeping and burst coalescing.

use std::collections::HashMap;

use marquee_traits::watch::{WatchEvent, WatchId};

/// What a registered watch points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WatchTarget {
    /// The block's box size.
    Block,
    /// A node's content subtree.
    Node(usize),
}

/// Hands out watch ids and maps them back to their targets.
///
/// Unsubscribing removes the mapping, so notifications that arrive with a
/// released id simply stop resolving. Ids are never reused.
#[derive(Debug, Default)]
pub(crate) struct WatchRegistry {
    next: u64,
    entries: HashMap<WatchId, WatchTarget>,
}

impl WatchRegistry {
    pub(crate) fn subscribe(&mut self, target: WatchTarget) -> WatchId {
        let id = WatchId(self.next);
        self.next += 1;
        self.entries.insert(id, target);
        id
    }

    /// Teardown. Ignores ids already released so detach stays idempotent.
    pub(crate) fn unsubscribe(&mut self, id: WatchId) {
        self.entries.remove(&id);
    }

    pub(crate) fn target(&self, id: WatchId) -> Option<WatchTarget> {
        self.entries.get(&id).copied()
    }
}

/// Pending notifications, coalesced as they arrive.
///
/// A burst of raw events delivered before the next flush collapses to at
/// most one action per target: the last resize width wins, and repeated
/// content notifications for one watch fold into a single entry.
#[derive(Debug, Default)]
pub(crate) struct EventQueue {
    resize: Option<(WatchId, f32)>,
    content: Vec<WatchId>,
}

impl EventQueue {
    pub(crate) fn push(&mut self, event: WatchEvent) {
        match event {
            WatchEvent::BoxResized { watch_id, width_px } => {
                self.resize = Some((watch_id, width_px));
            }
            WatchEvent::ContentChanged { watch_id } => {
                if !self.content.contains(&watch_id) {
                    self.content.push(watch_id);
                }
            }
        }
    }

    pub(crate) fn take(&mut self) -> (Option<(WatchId, f32)>, Vec<WatchId>) {
        (self.resize.take(), std::mem::take(&mut self.content))
    }
}
