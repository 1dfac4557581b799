//! The physical model: parameters, derived scheme, and the time-stepping
//! engine.
//!
//! [`Scheme::derive`] turns a [`StringParams`] record and a time step into a
//! stable grid plus the five coefficients of the explicit update equation.
//! [`StiffString`] owns the three-generation displacement field and advances
//! it one audio sample per [`step`](StiffString::step).
//!
//! This layer knows nothing about audio buffers or devices. Wrap a
//! [`StiffString`] in a [`StringVoice`](crate::nodes::StringVoice) to run it
//! in a graph.

mod params;
mod scheme;
mod string;

pub use params::StringParams;
pub use scheme::{DegenerateGridError, Scheme, MIN_INTERVALS};
pub use string::StiffString;
