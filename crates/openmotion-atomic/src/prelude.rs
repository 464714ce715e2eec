//! Prelude for openmotion-atomic.
//!
//! ```rust
//! use openmotion_atomic::prelude::*;
//!
//! let counters = FilterCounters::new();
//! counters.inc_config_swap();
//! ```

pub use crate::counters::{CounterSnapshot, FilterCounters};

#[cfg(feature = "mailbox")]
#[cfg_attr(docsrs, doc(cfg(feature = "mailbox")))]
pub use crate::mailbox::Mailbox;
