use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tokio::time::Duration;

use crate::models::{RawSample, ReportMode, MAX_ADC};
use crate::sensor::{
    AdcReference, AnalogReader, Conversion, IioChannel, Sensor, SimulatedChannel, SteinhartHart,
};

// Defaults for an ESP32-class board with an LM35 and a 10k NTC against 218 ohms
const DEFAULT_V_REF: f32 = 3.3;
const DEFAULT_NUM_SAMPLES: usize = 30;
const DEFAULT_INTERVAL_MS: u64 = 100;
const DEFAULT_LINEAR_SCALE: f32 = 100.0; // 10 mV per °C
const DEFAULT_SERIES_RESISTANCE: f32 = 218.0;
const DEFAULT_LINEAR_SIM: RawSample = 310; // ~25°C
const DEFAULT_THERMISTOR_SIM: RawSample = 4008; // ~25°C

/// Where a channel's raw counts come from
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelSource {
    /// sysfs file holding the latest raw count
    Iio(PathBuf),
    /// `sim:<raw>[,<raw>...]`
    Simulated(Vec<RawSample>),
}

impl ChannelSource {
    pub fn open(&self) -> Box<dyn AnalogReader + Send> {
        match self {
            ChannelSource::Iio(path) => Box::new(IioChannel::new(path.clone())),
            ChannelSource::Simulated(values) => Box::new(SimulatedChannel::new(values.clone())),
        }
    }
}

impl FromStr for ChannelSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(values) = s.strip_prefix("sim:") {
            let values = values
                .split(',')
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(|v| {
                    v.parse::<RawSample>()
                        .map_err(|e| format!("invalid simulated value '{}': {}", v, e))
                })
                .collect::<Result<Vec<_>, _>>()?;
            if values.is_empty() {
                return Err("simulated channel needs at least one value".into());
            }
            Ok(ChannelSource::Simulated(values))
        } else if s.is_empty() {
            Err("empty channel source".into())
        } else {
            Ok(ChannelSource::Iio(PathBuf::from(s)))
        }
    }
}

#[derive(Debug, Clone)]
pub struct LinearSensorConfig {
    pub name: String,
    pub scale: f32,
    pub channel: ChannelSource,
}

#[derive(Debug, Clone)]
pub struct ThermistorSensorConfig {
    pub name: String,
    pub series_resistance: f32,
    pub coefficients: SteinhartHart,
    pub channel: ChannelSource,
}

#[derive(Debug, Clone)]
pub struct SamplerConfig {
    pub v_ref: f32,
    pub max_adc: RawSample,
    pub num_samples: usize,
    pub interval_ms: u64,
    pub report_mode: ReportMode,
    pub linear: LinearSensorConfig,
    pub thermistor: ThermistorSensorConfig,
}

impl SamplerConfig {
    /// Load from the process environment, after reading `.env` if present
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from any key lookup; missing keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let v_ref = parse_or(&lookup, "SAMPLER_V_REF", DEFAULT_V_REF)?;
        let max_adc = parse_or(&lookup, "SAMPLER_MAX_ADC", MAX_ADC)?;
        let num_samples = parse_or(&lookup, "SAMPLER_NUM_SAMPLES", DEFAULT_NUM_SAMPLES)?;
        let interval_ms = parse_or(&lookup, "SAMPLER_INTERVAL_MS", DEFAULT_INTERVAL_MS)?;
        let report_mode = parse_or(&lookup, "SAMPLER_REPORT_MODE", ReportMode::EveryCycle)?;

        let linear = LinearSensorConfig {
            name: lookup("SAMPLER_LINEAR_NAME").unwrap_or_else(|| "LM35".to_string()),
            scale: parse_or(&lookup, "SAMPLER_LINEAR_SCALE", DEFAULT_LINEAR_SCALE)?,
            channel: parse_or(
                &lookup,
                "SAMPLER_LINEAR_CHANNEL",
                ChannelSource::Simulated(vec![DEFAULT_LINEAR_SIM]),
            )?,
        };

        let thermistor = ThermistorSensorConfig {
            name: lookup("SAMPLER_THERMISTOR_NAME").unwrap_or_else(|| "Termistor".to_string()),
            series_resistance: parse_or(
                &lookup,
                "SAMPLER_SERIES_RESISTANCE",
                DEFAULT_SERIES_RESISTANCE,
            )?,
            coefficients: SteinhartHart {
                a: parse_or(&lookup, "SAMPLER_SH_A", SteinhartHart::DEFAULT.a)?,
                b: parse_or(&lookup, "SAMPLER_SH_B", SteinhartHart::DEFAULT.b)?,
                c: parse_or(&lookup, "SAMPLER_SH_C", SteinhartHart::DEFAULT.c)?,
            },
            channel: parse_or(
                &lookup,
                "SAMPLER_THERMISTOR_CHANNEL",
                ChannelSource::Simulated(vec![DEFAULT_THERMISTOR_SIM]),
            )?,
        };

        let config = SamplerConfig {
            v_ref,
            max_adc,
            num_samples,
            interval_ms,
            report_mode,
            linear,
            thermistor,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if !(self.v_ref.is_finite() && self.v_ref > 0.0) {
            return Err(format!("SAMPLER_V_REF must be positive, got {}", self.v_ref));
        }
        if self.max_adc == 0 {
            return Err("SAMPLER_MAX_ADC must be at least 1".into());
        }
        if self.num_samples == 0 {
            return Err("SAMPLER_NUM_SAMPLES must be at least 1".into());
        }
        if self.interval_ms == 0 {
            return Err("SAMPLER_INTERVAL_MS must be at least 1".into());
        }
        if !self.linear.scale.is_finite() {
            return Err(format!(
                "SAMPLER_LINEAR_SCALE must be finite, got {}",
                self.linear.scale
            ));
        }
        let coefficients = &self.thermistor.coefficients;
        for (key, value) in [
            ("SAMPLER_SH_A", coefficients.a),
            ("SAMPLER_SH_B", coefficients.b),
            ("SAMPLER_SH_C", coefficients.c),
        ] {
            if !value.is_finite() {
                return Err(format!("{} must be finite, got {}", key, value));
            }
        }
        if !(self.thermistor.series_resistance.is_finite() && self.thermistor.series_resistance > 0.0)
        {
            return Err(format!(
                "SAMPLER_SERIES_RESISTANCE must be positive, got {}",
                self.thermistor.series_resistance
            ));
        }
        Ok(())
    }

    pub fn reference(&self) -> AdcReference {
        AdcReference {
            v_ref: self.v_ref,
            full_scale: self.max_adc,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn linear_sensor(&self) -> Sensor {
        Sensor::new(
            self.linear.name.clone(),
            self.linear.channel.open(),
            Conversion::Linear {
                scale: self.linear.scale,
            },
            self.num_samples,
        )
    }

    pub fn thermistor_sensor(&self) -> Sensor {
        Sensor::new(
            self.thermistor.name.clone(),
            self.thermistor.channel.open(),
            Conversion::SteinhartHart {
                series_resistance: self.thermistor.series_resistance,
                coefficients: self.thermistor.coefficients,
            },
            self.num_samples,
        )
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|e| format!("{}: invalid value '{}': {}", key, value, e)),
        _ => Ok(default),
    }
}
