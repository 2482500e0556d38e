//! Scene change notifications
//!
//! The placement core does not render. It edits scene membership and reports
//! each edit here so a renderer can mirror it: a placement is an `addChild`
//! under the world origin, a reset is a `removeAllChildren`.
//!
//! The queue is double-buffered: events pushed during frame N become readable
//! after the `swap()` at the start of frame N+1. Without a consumer the pending
//! buffer holds at most [`EventQueue::MAX_PENDING`] events; older ones are
//! dropped first.
//!
//! # Example
//!
//! ```ignore
//! // Renderer, once per frame
//! let events = session.controller_mut().events_mut();
//! events.swap();
//! for event in events.drain() {
//!     match event {
//!         SceneEvent::EntityPlaced { entity, .. } => upload(entity),
//!         SceneEvent::SceneCleared { .. } => drop_all(),
//!     }
//! }
//! ```

use std::collections::VecDeque;

use hecs::Entity;

use crate::content::ContentId;

/// A change to the set of placed entities
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// An entity was added as a child of `parent`
    EntityPlaced {
        entity: Entity,
        parent: Entity,
        content: ContentId,
    },
    /// Every child of `parent` was removed
    SceneCleared {
        parent: Entity,
        /// Number of entities removed
        removed: usize,
    },
}

/// Double-buffered queue of scene events.
#[derive(Debug)]
pub struct EventQueue {
    /// Events being written this frame
    pending: VecDeque<SceneEvent>,
    /// Events from previous frame, ready for processing
    processing: VecDeque<SceneEvent>,
    /// Events discarded from a full pending buffer since the last swap
    dropped: usize,
}

impl EventQueue {
    const DEFAULT_CAPACITY: usize = 16;

    /// Upper bound on events waiting for the next `swap()`
    pub const MAX_PENDING: usize = 256;

    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(Self::DEFAULT_CAPACITY),
            processing: VecDeque::with_capacity(Self::DEFAULT_CAPACITY),
            dropped: 0,
        }
    }

    /// Push an event to be processed after the next `swap()`.
    ///
    /// When the pending buffer is full the oldest pending event is discarded.
    pub fn push(&mut self, event: SceneEvent) {
        if self.pending.len() >= Self::MAX_PENDING {
            if self.dropped == 0 {
                log::warn!(
                    "Scene event queue is full ({} pending); dropping oldest events until the next swap",
                    Self::MAX_PENDING
                );
            }
            self.pending.pop_front();
            self.dropped += 1;
        }
        self.pending.push_back(event);
    }

    /// Make this frame's events readable and start a fresh pending buffer.
    ///
    /// Unread events from the previous swap are dropped.
    pub fn swap(&mut self) {
        if self.dropped > 0 {
            log::debug!("{} scene events were dropped before this swap", self.dropped);
            self.dropped = 0;
        }
        std::mem::swap(&mut self.pending, &mut self.processing);
        self.pending.clear();
    }

    #[inline]
    pub fn drain(&mut self) -> impl Iterator<Item = SceneEvent> + '_ {
        self.processing.drain(..)
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processing.is_empty()
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.processing.len()
    }

    #[must_use]
    #[inline]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Events discarded from a full pending buffer since the last swap
    #[must_use]
    #[inline]
    pub fn dropped_count(&self) -> usize {
        self.dropped
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
