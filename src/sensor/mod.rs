pub mod conversion;
pub mod reader;

use log::{debug, warn};

use crate::models::{SensorFault, Temperature, WindowStats};
use crate::sampling::window::SampleWindow;
use crate::utils::format_raw_line;

pub use conversion::{AdcReference, Conversion, SteinhartHart};
pub use reader::{AnalogReader, IioChannel, SimulatedChannel};

/// One named input: its channel, its conversion and its sample window
pub struct Sensor {
    name: String,
    channel: Box<dyn AnalogReader + Send>,
    conversion: Conversion,
    window: SampleWindow,
}

impl Sensor {
    pub fn new(
        name: impl Into<String>,
        channel: Box<dyn AnalogReader + Send>,
        conversion: Conversion,
        capacity: usize,
    ) -> Self {
        Self {
            name: name.into(),
            channel,
            conversion,
            window: SampleWindow::new(capacity),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn channel_description(&self) -> String {
        self.channel.describe()
    }

    pub fn window(&self) -> &SampleWindow {
        &self.window
    }

    /// Read, convert and append one sample
    ///
    /// A faulty sample is logged and left out of the window.
    pub fn sample(&mut self, reference: &AdcReference) -> Result<Temperature, SensorFault> {
        let result = self
            .channel
            .read_raw()
            .and_then(|raw| self.conversion.apply(raw, reference));

        match result {
            Ok(temperature) => {
                debug!("{}", format_raw_line(&self.name, temperature));
                self.window.append(temperature);
                Ok(temperature)
            }
            Err(fault) => {
                warn!("{}: sample discarded: {}", self.name, fault);
                Err(fault)
            }
        }
    }

    /// Summarize the window and empty it
    pub fn take_stats(&mut self) -> WindowStats {
        let stats = WindowStats {
            mean: self.window.mean(),
            median: self.window.median(),
            samples: self.window.len(),
        };
        self.window.clear();
        stats
    }
}
