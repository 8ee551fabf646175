use log::{error, info};
use time::OffsetDateTime;

use adc_temperature_sampler::utils::format_datetime;
use adc_temperature_sampler::{SamplerConfig, SamplingLoop, StdoutSink};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_secs()
        .init();

    // Load configuration
    let config = match SamplerConfig::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    let mut sampler = SamplingLoop::new(
        config.linear_sensor(),
        config.thermistor_sensor(),
        config.reference(),
        config.interval(),
        config.report_mode,
    );

    info!(
        "Starting temperature sampling at: {}",
        format_datetime(&OffsetDateTime::now_utc())
    );
    info!(
        "V_ref={} V, full scale={}, window={} samples",
        config.v_ref, config.max_adc, config.num_samples
    );
    for sensor in sampler.sensors() {
        info!("Sensor {} on {}", sensor.name(), sensor.channel_description());
    }

    // Handle Ctrl+C gracefully
    let (tx, rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            // Dropping tx would stop the loop
            std::future::pending::<()>().await;
        }
        info!("Program terminated by user. Exiting gracefully.");
        let _ = tx.send(());
    });

    let cycles = sampler.run(&mut StdoutSink, rx).await;
    info!("Completed {} sampling cycles", cycles);

    Ok(())
}
