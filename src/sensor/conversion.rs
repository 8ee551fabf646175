/// Raw ADC count to temperature conversions
use crate::models::{RawSample, SensorFault, Temperature};

const KELVIN_OFFSET: f32 = 273.15;

/// Reference voltage and full-scale count shared by both channels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdcReference {
    pub v_ref: f32,
    pub full_scale: RawSample,
}

impl AdcReference {
    /// Voltage seen at the pin for a raw count
    pub fn voltage(&self, raw: RawSample) -> f32 {
        raw as f32 * (self.v_ref / self.full_scale as f32)
    }
}

/// Steinhart-Hart calibration constants for a specific thermistor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteinhartHart {
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SteinhartHart {
    /// Coefficients for a common 10k NTC
    pub const DEFAULT: SteinhartHart = SteinhartHart {
        a: 0.001129148,
        b: 0.000234125,
        c: 0.0000000876741,
    };
}

impl Default for SteinhartHart {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// How a sensor's voltage is turned into degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conversion {
    /// Voltage-output sensor, `scale` degrees per volt (LM35: 100)
    Linear { scale: f32 },
    /// Thermistor on the low side of a divider with a series resistor
    SteinhartHart {
        series_resistance: f32,
        coefficients: SteinhartHart,
    },
}

impl Conversion {
    /// Convert one raw count, rejecting counts above full scale
    pub fn apply(
        &self,
        raw: RawSample,
        reference: &AdcReference,
    ) -> Result<Temperature, SensorFault> {
        if raw > reference.full_scale {
            return Err(SensorFault::OutOfRange {
                raw,
                max: reference.full_scale,
            });
        }

        match *self {
            Conversion::Linear { scale } => {
                let celsius = linear_temperature(raw, reference, scale);
                if celsius.is_finite() {
                    Ok(celsius)
                } else {
                    Err(SensorFault::NonFinite { raw })
                }
            }
            Conversion::SteinhartHart {
                series_resistance,
                coefficients,
            } => thermistor_temperature(raw, reference, series_resistance, &coefficients),
        }
    }
}

/// Linear sensor: temperature = voltage × scale
pub fn linear_temperature(raw: RawSample, reference: &AdcReference, scale: f32) -> Temperature {
    reference.voltage(raw) * scale
}

/// Thermistor resistance from the divider, then Steinhart-Hart
///
/// Fails at raw 0 (zero resistance) and at full scale (zero denominator).
pub fn thermistor_temperature(
    raw: RawSample,
    reference: &AdcReference,
    series_resistance: f32,
    coefficients: &SteinhartHart,
) -> Result<Temperature, SensorFault> {
    if raw == 0 {
        return Err(SensorFault::ZeroReading);
    }
    if raw >= reference.full_scale {
        return Err(SensorFault::Saturated { raw });
    }

    let voltage = reference.voltage(raw);
    let headroom = reference.v_ref - voltage;
    if headroom <= 0.0 {
        return Err(SensorFault::Saturated { raw });
    }

    let resistance = (voltage * series_resistance) / headroom;
    let ln_r = resistance.ln();
    let kelvin = 1.0 / (coefficients.a + coefficients.b * ln_r + coefficients.c * ln_r.powi(3));
    let celsius = kelvin - KELVIN_OFFSET;

    if celsius.is_finite() {
        Ok(celsius)
    } else {
        Err(SensorFault::NonFinite { raw })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MAX_ADC;

    const REFERENCE: AdcReference = AdcReference {
        v_ref: 3.3,
        full_scale: MAX_ADC,
    };

    #[test]
    fn linear_is_strictly_monotonic() {
        let mut previous = linear_temperature(0, &REFERENCE, 100.0);
        for raw in 1..=MAX_ADC {
            let current = linear_temperature(raw, &REFERENCE, 100.0);
            assert!(current > previous, "raw {} did not increase", raw);
            previous = current;
        }
    }

    #[test]
    fn linear_full_scale_is_vref_times_scale() {
        let t = linear_temperature(MAX_ADC, &REFERENCE, 100.0);
        assert!((t - 330.0).abs() < 0.01);
        assert_eq!(linear_temperature(0, &REFERENCE, 100.0), 0.0);
    }

    #[test]
    fn thermistor_faults_at_both_ends() {
        let coeffs = SteinhartHart::DEFAULT;
        assert_eq!(
            thermistor_temperature(0, &REFERENCE, 218.0, &coeffs),
            Err(SensorFault::ZeroReading)
        );
        assert_eq!(
            thermistor_temperature(MAX_ADC, &REFERENCE, 218.0, &coeffs),
            Err(SensorFault::Saturated { raw: MAX_ADC })
        );
    }

    #[test]
    fn thermistor_mid_range_is_plausible() {
        let t = thermistor_temperature(2048, &REFERENCE, 218.0, &SteinhartHart::DEFAULT)
            .expect("mid-range reading converts");
        assert!(t.is_finite());
        assert!((-40.0..=150.0).contains(&t), "got {}", t);
    }

    #[test]
    fn thermistor_near_room_temperature() {
        // ~10k thermistor against 218 ohms sits close to full scale at 25°C
        let t = thermistor_temperature(4008, &REFERENCE, 218.0, &SteinhartHart::DEFAULT).unwrap();
        assert!((t - 25.0).abs() < 1.0, "got {}", t);
    }

    #[test]
    fn apply_flags_non_finite_linear_result() {
        let broken = Conversion::Linear { scale: f32::NAN };
        assert_eq!(
            broken.apply(310, &REFERENCE),
            Err(SensorFault::NonFinite { raw: 310 })
        );
        let unbounded = Conversion::Linear {
            scale: f32::INFINITY,
        };
        assert_eq!(
            unbounded.apply(310, &REFERENCE),
            Err(SensorFault::NonFinite { raw: 310 })
        );
    }

    #[test]
    fn apply_rejects_counts_above_full_scale() {
        let linear = Conversion::Linear { scale: 100.0 };
        assert_eq!(
            linear.apply(5000, &REFERENCE),
            Err(SensorFault::OutOfRange {
                raw: 5000,
                max: MAX_ADC
            })
        );
    }
}
