//! Single-slot latest-value mailbox.
//!
//! A writer publishes whole values; a reader takes the most recent one.
//! Older unread values are overwritten, never queued, which is what a
//! configuration swap wants: the stepping loop only cares about the newest
//! snapshot and must never block on the writer.
//!
//! # RT Safety
//!
//! - Bounded storage allocated once at construction
//! - `publish` and `take` are lock-free
//! - No syscalls

use crossbeam::queue::ArrayQueue;

/// Lock-free latest-value mailbox.
///
/// # Example
///
/// ```rust
/// use openmotion_atomic::Mailbox;
///
/// let mailbox = Mailbox::new();
/// mailbox.publish(1u32);
/// mailbox.publish(2u32);
///
/// assert_eq!(mailbox.take(), Some(2));
/// assert_eq!(mailbox.take(), None);
/// ```
#[derive(Debug)]
pub struct Mailbox<T> {
    slot: ArrayQueue<T>,
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Mailbox<T> {
    /// Create an empty mailbox.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: ArrayQueue::new(1),
        }
    }

    /// Publish a value, replacing any value not yet taken.
    ///
    /// Returns `true` if an unread value was overwritten.
    #[inline]
    pub fn publish(&self, value: T) -> bool {
        self.slot.force_push(value).is_some()
    }

    /// Take the most recent value, if one was published since the last take.
    #[inline]
    pub fn take(&self) -> Option<T> {
        self.slot.pop()
    }

    /// Whether a value is waiting to be taken.
    #[inline]
    pub fn is_pending(&self) -> bool {
        !self.slot.is_empty()
    }
}
