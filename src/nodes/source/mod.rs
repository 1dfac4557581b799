mod string_voice;

pub use string_voice::*;
