/// Analog input channels
use log::trace;
use std::fs;
use std::path::PathBuf;

use crate::models::{RawSample, SensorFault};

/// A single analog input returning raw ADC counts on demand
pub trait AnalogReader {
    fn read_raw(&mut self) -> Result<RawSample, SensorFault>;

    /// Human-readable description for startup logging
    fn describe(&self) -> String;
}

/// Linux Industrial I/O channel exposed through sysfs
///
/// Reads files like `/sys/bus/iio/devices/iio:device0/in_voltage3_raw`,
/// which hold the latest conversion as a decimal integer.
#[derive(Debug, Clone)]
pub struct IioChannel {
    path: PathBuf,
}

impl IioChannel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AnalogReader for IioChannel {
    fn read_raw(&mut self) -> Result<RawSample, SensorFault> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            SensorFault::ReadFailed(format!("{}: {}", self.path.display(), e))
        })?;

        let raw = contents.trim().parse::<RawSample>().map_err(|e| {
            SensorFault::ReadFailed(format!(
                "{}: invalid value '{}': {}",
                self.path.display(),
                contents.trim(),
                e
            ))
        })?;

        trace!("{} -> {}", self.path.display(), raw);
        Ok(raw)
    }

    fn describe(&self) -> String {
        format!("iio:{}", self.path.display())
    }
}

/// Channel replaying a fixed list of counts, wrapping around at the end
#[derive(Debug, Clone)]
pub struct SimulatedChannel {
    values: Vec<RawSample>,
    position: usize,
}

impl SimulatedChannel {
    /// An empty list yields `ReadFailed` on every read
    pub fn new(values: Vec<RawSample>) -> Self {
        Self {
            values,
            position: 0,
        }
    }

    pub fn constant(raw: RawSample) -> Self {
        Self::new(vec![raw])
    }
}

impl AnalogReader for SimulatedChannel {
    fn read_raw(&mut self) -> Result<RawSample, SensorFault> {
        if self.values.is_empty() {
            return Err(SensorFault::ReadFailed("no simulated values".to_string()));
        }
        let raw = self.values[self.position];
        self.position = (self.position + 1) % self.values.len();
        Ok(raw)
    }

    fn describe(&self) -> String {
        let values: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        format!("sim:{}", values.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn simulated_channel_wraps_around() {
        let mut channel = SimulatedChannel::new(vec![1, 2, 3]);
        let read: Vec<_> = (0..5).map(|_| channel.read_raw().unwrap()).collect();
        assert_eq!(read, vec![1, 2, 3, 1, 2]);
        assert_eq!(channel.describe(), "sim:1,2,3");
    }

    #[test]
    fn empty_simulated_channel_fails() {
        let mut channel = SimulatedChannel::new(Vec::new());
        assert!(matches!(channel.read_raw(), Err(SensorFault::ReadFailed(_))));
    }

    #[test]
    fn iio_channel_parses_sysfs_value() {
        let path = std::env::temp_dir().join(format!("in_voltage_raw_{}", std::process::id()));
        {
            let mut file = fs::File::create(&path).unwrap();
            writeln!(file, "2048").unwrap();
        }

        let mut channel = IioChannel::new(path.clone());
        assert_eq!(channel.read_raw(), Ok(2048));

        fs::write(&path, "garbage\n").unwrap();
        assert!(matches!(channel.read_raw(), Err(SensorFault::ReadFailed(_))));

        fs::remove_file(&path).unwrap();
        assert!(matches!(channel.read_raw(), Err(SensorFault::ReadFailed(_))));
    }
}
