//! Dual analog temperature sampler
//!
//! Samples an LM35-style linear sensor and an NTC thermistor through raw ADC
//! channels, keeps a rolling window per sensor and reports mean and median
//! at a fixed cadence.

pub mod config;
pub mod models;
pub mod sampling;
pub mod sensor;
pub mod utils;

pub use config::SamplerConfig;
pub use models::{RawSample, ReportMode, SensorFault, Temperature, WindowStats, MAX_ADC};
pub use sampling::{ReportSink, SampleWindow, SamplingLoop, StdoutSink};
pub use sensor::{AdcReference, AnalogReader, Conversion, Sensor, SteinhartHart};
