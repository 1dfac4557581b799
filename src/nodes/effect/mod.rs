mod limiter;

pub use dasp_graph::node::Sum;
pub use limiter::*;
