//! Pluck a steel string and listen.
//!
//! Run with: cargo run --example pluck --features cpal_sink
//!
//! Plucks the string once a second, walking the excitation point along its
//! length.

use std::thread::sleep;
use std::time::Duration;

use dasp_graph::NodeData;
use saite::nodes::CpalMonoSink;
use saite::{Graph, HardLimiter, NodeVariants, Processor, StringParams, StringVoice};

fn main() {
    tracing_subscriber::fmt::init();

    let sink = CpalMonoSink::try_default().expect("no usable f32 output device");
    let sample_rate = sink.sample_rate();

    let (voice, mut handle) = StringVoice::new(&StringParams::default(), sample_rate)
        .expect("string parameters give a degenerate grid");

    println!(
        "string grid: {} intervals at {}Hz",
        voice.string().intervals(),
        sample_rate.0
    );

    let mut g = Graph::with_capacity(8, 8);
    let mut p = Processor::with_capacity(8);

    let i_voice = g.add_node(NodeData::new1(NodeVariants::StringVoice(voice)));
    let i_lim = g.add_node(NodeData::new1(NodeVariants::Limiter(HardLimiter::new())));
    let i_out = g.add_node(NodeData::new1(NodeVariants::CpalMonoSink(sink)));
    g.add_edge(i_voice, i_lim, ());
    g.add_edge(i_lim, i_out, ());

    println!("plucking along the string, ctrl-c to stop");

    let blocks_per_pluck = (sample_rate.0 as u64 / 64).max(1);
    let mut position = 0.2f32;
    let mut blocks: u64 = 0;

    loop {
        if blocks % blocks_per_pluck == 0 {
            let _ = handle.pluck(position);
            position += 0.15;
            if position > 0.85 {
                position = 0.2;
            }
        }

        p.process(&mut g, i_out);
        blocks += 1;

        // Keep the device queue mostly full without busy-spinning.
        let out = match &g[i_out].node {
            NodeVariants::CpalMonoSink(s) => s,
            _ => unreachable!(),
        };
        while out.buffer.slots() < 128 {
            sleep(Duration::from_micros(500));
        }
    }
}
