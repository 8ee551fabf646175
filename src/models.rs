use std::fmt;

/// Unconverted ADC count as delivered by an analog channel.
pub type RawSample = u16;

/// Degrees Celsius.
pub type Temperature = f32;

/// Full-scale count of a 12-bit ADC
pub const MAX_ADC: RawSample = 4095;

/// Reasons a single sample could not be turned into a temperature.
///
/// A fault only discards the affected sample; the sampling loop keeps going.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorFault {
    /// The channel could not be read at all
    ReadFailed(String),
    /// The channel returned a count above the ADC full scale
    OutOfRange { raw: RawSample, max: RawSample },
    /// Reading pinned at full scale; the divider equation divides by zero
    Saturated { raw: RawSample },
    /// Reading of zero; the thermistor resistance would be zero and ln(0) is undefined
    ZeroReading,
    /// Conversion produced NaN or infinity
    NonFinite { raw: RawSample },
}

impl fmt::Display for SensorFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorFault::ReadFailed(reason) => write!(f, "lectura fallida ({})", reason),
            SensorFault::OutOfRange { raw, max } => {
                write!(f, "lectura fuera de rango (raw={}, max={})", raw, max)
            }
            SensorFault::Saturated { raw } => write!(f, "lectura saturada (raw={})", raw),
            SensorFault::ZeroReading => write!(f, "lectura nula (raw=0)"),
            SensorFault::NonFinite { raw } => write!(f, "resultado no finito (raw={})", raw),
        }
    }
}

impl std::error::Error for SensorFault {}

/// When a sensor's window is summarized and cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// Report and clear after every sampling cycle
    EveryCycle,
    /// Report and clear a full window when the next reading arrives;
    /// that reading then opens the new window
    WindowFull,
}

impl std::str::FromStr for ReportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "every-cycle" => Ok(ReportMode::EveryCycle),
            "window-full" => Ok(ReportMode::WindowFull),
            other => Err(format!(
                "unknown report mode '{}', expected 'every-cycle' or 'window-full'",
                other
            )),
        }
    }
}

/// Mean and median of one window at report time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub mean: Temperature,
    pub median: Temperature,
    pub samples: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_mode_parses_both_spellings() {
        assert_eq!("every-cycle".parse::<ReportMode>(), Ok(ReportMode::EveryCycle));
        assert_eq!(" Window-Full ".parse::<ReportMode>(), Ok(ReportMode::WindowFull));
        assert!("hourly".parse::<ReportMode>().is_err());
    }

    #[test]
    fn fault_messages_name_the_raw_value() {
        let fault = SensorFault::Saturated { raw: 4095 };
        assert_eq!(fault.to_string(), "lectura saturada (raw=4095)");
    }
}
