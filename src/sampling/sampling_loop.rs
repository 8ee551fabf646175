/// Periodic read → convert → append → report → clear cycle
use log::{info, trace};
use tokio::sync::oneshot;
use tokio::time::{sleep, Duration};

use crate::models::{ReportMode, WindowStats};
use crate::sampling::sink::ReportSink;
use crate::sensor::{AdcReference, Sensor};
use crate::utils::{format_fault_line, format_report_line};

/// Owns both sensors and drives them at a fixed cadence
pub struct SamplingLoop {
    sensors: [Sensor; 2],
    reference: AdcReference,
    interval: Duration,
    mode: ReportMode,
}

impl SamplingLoop {
    pub fn new(
        linear: Sensor,
        thermistor: Sensor,
        reference: AdcReference,
        interval: Duration,
        mode: ReportMode,
    ) -> Self {
        Self {
            sensors: [linear, thermistor],
            reference,
            interval,
            mode,
        }
    }

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    /// Run one sampling cycle and return the lines it produced
    ///
    /// Every sensor is sampled before any is reported. A sensor whose sample
    /// faults gets a fault line for this cycle. In every-cycle mode each
    /// non-empty window is summarized and cleared after sampling. In
    /// window-full mode a full window is summarized and cleared before the
    /// new sample is appended, so that sample opens the next window.
    pub fn cycle(&mut self) -> Vec<String> {
        let reference = self.reference;
        let mode = self.mode;

        let ready: Vec<Option<WindowStats>> = self
            .sensors
            .iter_mut()
            .map(|sensor| match mode {
                ReportMode::WindowFull if sensor.window().is_full() => Some(sensor.take_stats()),
                _ => None,
            })
            .collect();

        let faults: Vec<_> = self
            .sensors
            .iter_mut()
            .map(|sensor| sensor.sample(&reference).err())
            .collect();

        let mut lines = Vec::with_capacity(self.sensors.len());
        for ((sensor, fault), ready) in self.sensors.iter_mut().zip(faults).zip(ready) {
            if let Some(fault) = fault {
                lines.push(format_fault_line(sensor.name(), &fault));
            }

            let stats = match mode {
                ReportMode::EveryCycle if !sensor.window().is_empty() => Some(sensor.take_stats()),
                ReportMode::EveryCycle => None,
                ReportMode::WindowFull => ready,
            };
            if let Some(stats) = stats {
                trace!("{}: reporting {} samples", sensor.name(), stats.samples);
                lines.push(format_report_line(sensor.name(), &stats));
            }
        }

        lines
    }

    /// Cycle until `stop` fires, sleeping the configured interval between cycles
    ///
    /// Returns the number of completed cycles.
    pub async fn run<S: ReportSink>(
        &mut self,
        sink: &mut S,
        mut stop: oneshot::Receiver<()>,
    ) -> u64 {
        info!(
            "Sampling every {} ms, reporting {:?}",
            self.interval.as_millis(),
            self.mode
        );

        let mut cycles = 0u64;
        loop {
            for line in self.cycle() {
                sink.emit(&line);
            }
            cycles += 1;

            tokio::select! {
                _ = sleep(self.interval) => {}
                _ = &mut stop => {
                    info!("Stop requested after {} cycles", cycles);
                    return cycles;
                }
            }
        }
    }
}
