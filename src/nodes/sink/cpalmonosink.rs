//! Output to the system audio device via cpal.

use cpal::traits::{DeviceTrait, HostTrait};
use cpal::{SampleFormat, SampleRate, Stream};
use dasp_graph::{Buffer, Input, Node};
use rtrb::Producer;
use tracing::{info, warn};

/// A mono sink feeding the default cpal output device.
///
/// Samples cross from the graph thread to the device callback through an
/// rtrb ring buffer; the callback duplicates each sample across the device's
/// channels. On underrun the device gets silence rather than stale data.
pub struct CpalMonoSink {
    /// Keeps the device stream alive for the lifetime of the sink.
    _stream: Stream,
    sample_rate: SampleRate,
    /// Producer half of the sample queue. Exposed so callers can pace graph
    /// processing off the number of free slots.
    pub buffer: Producer<f32>,
}

impl CpalMonoSink {
    /// Open the default output device with its default configuration.
    ///
    /// Returns `None` (with a logged reason) if there is no usable f32
    /// output device.
    pub fn try_default() -> Option<Self> {
        let host = cpal::default_host();
        let device = match host.default_output_device() {
            Some(device) => device,
            None => {
                warn!("no default audio output device");
                return None;
            }
        };

        let supported = match device.default_output_config() {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "could not query default output config");
                return None;
            }
        };
        if supported.sample_format() != SampleFormat::F32 {
            warn!(format = ?supported.sample_format(), "default output is not f32");
            return None;
        }

        let sample_rate = supported.sample_rate();
        let config = supported.config();
        let channels = config.channels as usize;

        info!(
            device = %device.name().unwrap_or_else(|_| "unknown".into()),
            rate = sample_rate.0,
            channels,
            "opening output stream"
        );

        // Holds ~10ms of audio at 48kHz; enough slack to absorb scheduling
        // jitter between the graph thread and the device callback.
        let (producer, mut consumer) = rtrb::RingBuffer::new(512);

        let stream = device
            .build_output_stream::<f32, _, _>(
                &config,
                move |data, _| {
                    for chunk in data.chunks_mut(channels) {
                        // Underrun policy: silence, never stale samples.
                        let s = consumer.pop().unwrap_or(0.0);
                        for d in chunk.iter_mut() {
                            *d = s;
                        }
                    }
                },
                move |err| {
                    warn!(error = %err, "output stream error");
                },
                None,
            )
            .ok()?;

        Some(CpalMonoSink {
            _stream: stream,
            sample_rate,
            buffer: producer,
        })
    }

    /// Sample rate of the opened device. Build sources to match.
    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }
}

impl Node for CpalMonoSink {
    fn process(&mut self, inputs: &[Input], _output: &mut [Buffer]) {
        let input = match inputs.first() {
            Some(input) => input,
            None => return,
        };
        // A sink takes exactly one input; mix upstream.
        let mono_channel = match input.buffers().first() {
            Some(buffer) => buffer,
            None => return,
        };

        for &sample in mono_channel.iter() {
            if self.buffer.push(sample).is_err() {
                warn!(
                    slots = self.buffer.slots(),
                    "output buffer full, dropping sample"
                );
            }
        }
    }
}
