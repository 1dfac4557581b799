//! Built-in audio nodes.
//!
//! All nodes implement [`dasp_graph::Node`] and compose in a petgraph-backed
//! graph (see the [`Graph`](crate::Graph) alias):
//!
//! - [`StringVoice`] ([`source`]) - renders a stiff string, controlled
//!   through a lock-free [`StringHandle`]
//! - [`HardLimiter`] ([`effect`]) - clamps output to the device range
//! - [`Sum`] ([`effect`]) - mixes several voices (re-exported from
//!   `dasp_graph`)
//! - [`CpalMonoSink`] ([`sink`]) - system audio output (requires the
//!   `cpal_sink` feature)

pub mod effect;
pub mod sink;
pub mod source;

pub use effect::{HardLimiter, Sum};
pub use source::{StringHandle, StringMessage, StringVoice};

#[cfg(feature = "cpal_sink")]
pub use sink::CpalMonoSink;
