pub mod sampling_loop;
pub mod sink;
pub mod window;

pub use sampling_loop::SamplingLoop;
pub use sink::{ReportSink, StdoutSink};
pub use window::SampleWindow;
