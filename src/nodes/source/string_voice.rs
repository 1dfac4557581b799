//! Stiff-string voice source node.

use dasp_graph::{Buffer, Input, Node};
use rtrb::{Consumer, Producer, RingBuffer};

use crate::model::{DegenerateGridError, StiffString, StringParams};

/// How many control messages can sit unread between two audio blocks.
const MESSAGE_CAPACITY: usize = 8;

/// Messages to control a [`StringVoice`].
#[derive(Clone, Copy, Debug)]
pub enum StringMessage {
    /// Excite the string at a normalized position in [0, 1].
    ///
    /// Consecutive plucks within one block collapse to the last one.
    Pluck { position: f32 },
    /// Move the read-out point along the string.
    SetReadPosition(f32),
}

/// Control-side handle for a [`StringVoice`].
///
/// Lives on the UI/control thread; messages cross to the audio thread over a
/// lock-free SPSC ring buffer and are drained at the start of the next audio
/// block.
pub struct StringHandle {
    sender: Producer<StringMessage>,
}

impl StringHandle {
    /// Send a message to the voice.
    ///
    /// Non-blocking. Returns the message back if the queue is full (the
    /// audio thread has not run for several blocks).
    pub fn send(&mut self, msg: StringMessage) -> Result<(), StringMessage> {
        self.sender.push(msg).map_err(|rtrb::PushError::Full(m)| m)
    }

    /// Excite the string at a normalized position in [0, 1].
    pub fn pluck(&mut self, position: f32) -> Result<(), StringMessage> {
        self.send(StringMessage::Pluck { position })
    }
}

/// A mono source node that renders a [`StiffString`], one simulation step
/// per output sample.
///
/// The same sample is written to every output buffer, so the voice can feed
/// a stereo sink directly. Raw string output can exceed [-1, 1] right after
/// a pluck; put a [`HardLimiter`](crate::nodes::HardLimiter) between the
/// voice and the device.
pub struct StringVoice {
    string: StiffString,
    messages: Consumer<StringMessage>,
    read_position: f64,
}

impl StringVoice {
    /// Default read-out point, 0.8 of the way along the string. Off-center
    /// so it doesn't sit on a node of the lower harmonics.
    pub const DEFAULT_READ_POSITION: f64 = 0.8;

    /// Build a voice for the given parameters at the given sample rate.
    ///
    /// Returns the node together with its control handle, or
    /// [`DegenerateGridError`] if the stability bound leaves too few grid
    /// points for the stencil.
    pub fn new(
        params: &StringParams,
        sample_rate: cpal::SampleRate,
    ) -> Result<(StringVoice, StringHandle), DegenerateGridError> {
        let string = StiffString::new(params, sample_rate.0)?;
        let (sender, messages) = RingBuffer::new(MESSAGE_CAPACITY);

        let voice = StringVoice {
            string,
            messages,
            read_position: Self::DEFAULT_READ_POSITION,
        };
        Ok((voice, StringHandle { sender }))
    }

    /// The engine itself, read-only, e.g. for drawing the string shape via
    /// [`StiffString::displacement`].
    pub fn string(&self) -> &StiffString {
        &self.string
    }
}

impl Node for StringVoice {
    fn process(&mut self, _inputs: &[Input], output: &mut [Buffer]) {
        // Control messages first, so a pluck lands before this block's
        // samples rather than a block late.
        while let Ok(msg) = self.messages.pop() {
            match msg {
                StringMessage::Pluck { position } => self.string.pluck(position as f64),
                StringMessage::SetReadPosition(p) => {
                    self.read_position = p.max(0.0).min(1.0) as f64
                }
            }
        }

        let mut outbuf = Buffer::default();
        for sample in outbuf.iter_mut() {
            self.string.step();
            *sample = self.string.read(self.read_position) as f32;
        }

        for buffer in output.iter_mut() {
            *buffer = outbuf.clone();
        }
    }
}
