/// Formatting helpers for report lines and log output
use time::macros::format_description;
use time::OffsetDateTime;

use crate::models::{SensorFault, Temperature, WindowStats};

/// Format a timestamp for human-readable logging
///
/// Converts an OffsetDateTime to DD.MM.YYYY - HH:MM:SS format.
/// Falls back to the default string representation if formatting fails.
pub fn format_datetime(dt: &OffsetDateTime) -> String {
    let format = format_description!("[day].[month].[year] - [hour]:[minute]:[second]");
    dt.format(format).unwrap_or_else(|_| dt.to_string())
}

/// Split a temperature into a truncated whole part and two truncated decimals
///
/// The whole part truncates toward zero; the decimals are the absolute value
/// of the truncated hundredths, so -5.678 gives (-5, 67).
pub fn split_temperature(value: Temperature) -> (i32, u32) {
    let whole = value.trunc();
    let hundredths = ((value - whole) * 100.0).abs().trunc() as u32;
    (whole as i32, hundredths.min(99))
}

/// Render a temperature as `<int>.<dd>` with truncation, never rounding
///
/// Values between -1 and 0 have a whole part of 0 and print unsigned ("0.50").
pub fn format_temperature(value: Temperature) -> String {
    let (whole, hundredths) = split_temperature(value);
    format!("{}.{:02}", whole, hundredths)
}

/// `<name> - Promedio: <int>.<dd>°C | Mediana: <int>.<dd>°C`
pub fn format_report_line(name: &str, stats: &WindowStats) -> String {
    format!(
        "{} - Promedio: {}°C | Mediana: {}°C",
        name,
        format_temperature(stats.mean),
        format_temperature(stats.median)
    )
}

/// `<name> - Falla: <description>`
pub fn format_fault_line(name: &str, fault: &SensorFault) -> String {
    format!("{} - Falla: {}", name, fault)
}

/// `<name> - Leido: <int>.<dd>°C`, used for per-sample tracing
pub fn format_raw_line(name: &str, value: Temperature) -> String {
    format!("{} - Leido: {}°C", name, format_temperature(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(mean: Temperature, median: Temperature) -> WindowStats {
        WindowStats {
            mean,
            median,
            samples: 1,
        }
    }

    #[test]
    fn truncates_instead_of_rounding() {
        assert_eq!(split_temperature(23.456), (23, 45));
        assert_eq!(format_temperature(23.456), "23.45");
        assert_eq!(format_temperature(23.999), "23.99");
    }

    #[test]
    fn negative_values_truncate_toward_zero() {
        assert_eq!(split_temperature(-5.678), (-5, 67));
        assert_eq!(format_temperature(-5.678), "-5.67");
    }

    #[test]
    fn small_negative_values_truncate_to_unsigned_zero() {
        assert_eq!(format_temperature(-0.5), "0.50");
        assert_eq!(format_temperature(-0.004), "0.00");
        assert_eq!(format_temperature(0.5), "0.50");
    }

    #[test]
    fn decimals_are_zero_padded() {
        assert_eq!(format_temperature(7.05), "7.05");
        assert_eq!(format_temperature(12.0), "12.00");
        assert_eq!(format_temperature(0.0), "0.00");
    }

    #[test]
    fn report_line_matches_wire_format() {
        assert_eq!(
            format_report_line("LM35", &stats(23.456, 25.0)),
            "LM35 - Promedio: 23.45°C | Mediana: 25.00°C"
        );
    }

    #[test]
    fn fault_and_raw_lines() {
        assert_eq!(
            format_fault_line("Termistor", &SensorFault::ZeroReading),
            "Termistor - Falla: lectura nula (raw=0)"
        );
        assert_eq!(format_raw_line("LM35", 24.5), "LM35 - Leido: 24.50°C");
    }

    #[test]
    fn datetime_uses_day_first_layout() {
        let dt = OffsetDateTime::from_unix_timestamp(0).unwrap();
        assert_eq!(format_datetime(&dt), "01.01.1970 - 00:00:00");
    }
}
