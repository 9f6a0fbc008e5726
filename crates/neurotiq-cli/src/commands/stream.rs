use std::io::Write;

use neurotiq_core::{StreamConfig, StreamDriver};
use tokio::sync::broadcast::error::RecvError;

use super::OutputFormat;

pub fn run(config: StreamConfig, format: &str, ticks: u64, print_window: bool) {
    let format = super::parse_format(format);
    let mut driver = match StreamDriver::new(config) {
        Ok(driver) => driver,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let rt = super::runtime();
    rt.block_on(stream_updates(&mut driver, format, ticks, print_window));
    driver.stop();
}

async fn stream_updates(
    driver: &mut StreamDriver,
    format: OutputFormat,
    ticks: u64,
    print_window: bool,
) {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Some(header) = super::format_header(format)
        && writeln!(out, "{header}").is_err()
    {
        return;
    }
    if print_window {
        for sample in driver.snapshot() {
            if writeln!(out, "{}", super::format_sample(&sample, format)).is_err() {
                return;
            }
        }
    }
    let _ = out.flush();

    let mut updates = driver.subscribe();
    if let Err(e) = driver.start() {
        eprintln!("Error: {e}");
        return;
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut seen = 0u64;

    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Ok(update) => {
                    if writeln!(out, "{}", super::format_sample(&update.sample, format)).is_err() {
                        break; // Broken pipe
                    }
                    let _ = out.flush();
                    seen += 1;
                    if ticks > 0 && seen >= ticks {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("output fell behind, skipped {skipped} samples");
                }
                Err(RecvError::Closed) => break,
            },
            _ = &mut ctrl_c => break,
        }
    }

    driver.stop();
}
