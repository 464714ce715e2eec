//! # openmotion-atomic
//!
//! Lock-free primitives shared between a tracker's stepping loop and the
//! control path that reconfigures it.
//!
//! ## Safety Guarantees
//!
//! - **No heap allocations** after initialization
//! - **No blocking operations** - all methods are lock-free
//! - **Deterministic execution time** for all operations
//!
//! ## Architecture
//!
//! - [`counters`] - per-tracker filter counters (samples, drops, swaps)
//! - [`mailbox`] - single-slot latest-value mailbox used for copy-on-write
//!   config exchange (requires the `mailbox` feature)
//!
//! ## Usage
//!
//! ```rust
//! use openmotion_atomic::FilterCounters;
//!
//! let counters = FilterCounters::new();
//!
//! // Stepping loop
//! counters.inc_filtered();
//! counters.inc_rejected();
//!
//! // Control / diagnostics path
//! let snapshot = counters.snapshot();
//! assert_eq!(snapshot.samples_filtered, 1);
//! ```

#![no_std]
#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

pub mod counters;

#[cfg(feature = "mailbox")]
#[cfg_attr(docsrs, doc(cfg(feature = "mailbox")))]
pub mod mailbox;

pub mod prelude;

pub use counters::{CounterSnapshot, FilterCounters};

#[cfg(feature = "mailbox")]
pub use mailbox::Mailbox;
