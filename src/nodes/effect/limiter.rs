//! Hard clipping before the device.

use dasp_graph::{Buffer, Input, Node};

/// Clamps every sample to [-ceiling, ceiling].
///
/// A freshly plucked string can swing past unity before damping takes hold;
/// this keeps that transient from wrapping or blowing out the device. Pure
/// and stateless; each input channel maps to the corresponding output
/// channel.
pub struct HardLimiter {
    ceiling: f32,
}

impl HardLimiter {
    /// Limiter with the standard [-1, 1] output range.
    pub fn new() -> Self {
        HardLimiter { ceiling: 1.0 }
    }

    /// Use a custom ceiling (absolute value).
    pub fn with_ceiling(mut self, ceiling: f32) -> Self {
        self.ceiling = ceiling.abs();
        self
    }

    #[inline]
    pub fn ceiling(&self) -> f32 {
        self.ceiling
    }
}

impl Default for HardLimiter {
    fn default() -> Self {
        HardLimiter::new()
    }
}

impl Node for HardLimiter {
    fn process(&mut self, inputs: &[Input], output: &mut [Buffer]) {
        let input = match inputs.first() {
            Some(input) => input,
            None => {
                for out_buffer in output.iter_mut() {
                    out_buffer.silence();
                }
                return;
            }
        };
        let in_buffers = input.buffers();
        let ceiling = self.ceiling;

        for (channel, out_buffer) in output.iter_mut().enumerate() {
            // Fall back to the last input channel if the input has fewer
            // channels than the output.
            let in_buffer = match in_buffers.get(channel).or_else(|| in_buffers.last()) {
                Some(buffer) => buffer,
                None => {
                    out_buffer.silence();
                    continue;
                }
            };

            for (o, &i) in out_buffer.iter_mut().zip(in_buffer.iter()) {
                *o = i.max(-ceiling).min(ceiling);
            }
        }
    }
}
