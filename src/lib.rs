//! saite - a physically modelled stiff string voice.
//!
//! The core is an explicit finite-difference simulation of a stiff, damped
//! string ([`StiffString`]): one simulation step per audio sample, a 5-point
//! interior stencil, clamped boundaries, and O(1) rotation of the three time
//! generations. [`StringVoice`] wraps it as a [`dasp_graph::Node`] so it can
//! run inside an audio graph next to a [`HardLimiter`] and a device sink.
//!
//! Design principles:
//! - Grid size and update coefficients are derived once, at the stability
//!   bound, when a voice is built ([`Scheme`]); changing parameters or
//!   sample rate means building a new voice
//! - Excitation crosses from the control thread over a lock-free rtrb ring
//!   buffer ([`StringHandle`]), no locks or allocation on the audio thread
//! - The hot path never fails: configuration errors surface at construction
//!   as [`DegenerateGridError`], numeric anomalies at read-out are swallowed,
//!   counted, and logged
//!
//! ```no_run
//! use cpal::SampleRate;
//! use saite::{StringParams, StringVoice};
//!
//! let (mut voice, mut handle) = StringVoice::new(&StringParams::default(), SampleRate(44100))
//!     .expect("grid too small for these parameters");
//! handle.pluck(0.5).unwrap();
//! // drive `voice` from an audio graph; see demos/pluck.rs
//! ```

pub mod model;
pub mod nodes;

pub use model::{DegenerateGridError, Scheme, StiffString, StringParams};
pub use nodes::{HardLimiter, StringHandle, StringMessage, StringVoice};

use dasp_graph::{Buffer, Input, Node, NodeData};

/// Graph type the built-in nodes compose in.
pub type Graph = petgraph::graph::Graph<NodeData<NodeVariants>, ()>;
/// Processor for [`Graph`].
pub type Processor = dasp_graph::Processor<Graph>;

/// All built-in node types, for graphs that mix them.
pub enum NodeVariants {
    StringVoice(StringVoice),
    Limiter(HardLimiter),
    Sum(dasp_graph::node::Sum),
    #[cfg(feature = "cpal_sink")]
    CpalMonoSink(nodes::CpalMonoSink),
}

impl Node for NodeVariants {
    fn process(&mut self, inputs: &[Input], output: &mut [Buffer]) {
        match self {
            NodeVariants::StringVoice(n) => n.process(inputs, output),
            NodeVariants::Limiter(n) => n.process(inputs, output),
            NodeVariants::Sum(n) => n.process(inputs, output),
            #[cfg(feature = "cpal_sink")]
            NodeVariants::CpalMonoSink(n) => n.process(inputs, output),
        }
    }
}
