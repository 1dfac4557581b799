#[cfg(feature = "cpal_sink")]
mod cpalmonosink;

#[cfg(feature = "cpal_sink")]
pub use cpalmonosink::*;
