pub mod analyze;
pub mod chat;
pub mod dashboard;
pub mod invite;
pub mod monitor;
pub mod server;
pub mod stream;

use std::time::Duration;

use neurotiq_core::{AnalysisConfig, Band, Sample, StreamConfig};

/// Build a [`StreamConfig`] from the shared stream flags.
pub fn stream_config(
    capacity: usize,
    start: i64,
    interval_ms: u64,
    seed: Option<u64>,
) -> StreamConfig {
    StreamConfig::default()
        .with_capacity(capacity)
        .with_start_time(start)
        .with_tick_interval(Duration::from_millis(interval_ms))
        .with_seed(seed)
}

/// Analysis endpoint from `--api-url`, falling back to the environment.
pub fn analysis_config(api_url: Option<&str>) -> AnalysisConfig {
    match api_url {
        Some(url) => AnalysisConfig::default().with_api_url(url),
        None => AnalysisConfig::from_env(),
    }
}

/// Tokio runtime for commands that need the stream timer.
pub fn runtime() -> tokio::runtime::Runtime {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {e}");
            std::process::exit(1);
        }
    }
}

/// Line format for `neurotiq stream`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

/// Parse an output format string into the enum.
pub fn parse_format(s: &str) -> OutputFormat {
    match s {
        "table" => OutputFormat::Table,
        "csv" => OutputFormat::Csv,
        "json" | "jsonl" => OutputFormat::Json,
        _ => {
            eprintln!("Unknown format '{s}', using table");
            OutputFormat::Table
        }
    }
}

/// Column header for formats that have one.
pub fn format_header(format: OutputFormat) -> Option<String> {
    let bands: Vec<String> = Band::ALL.iter().map(|b| b.to_string()).collect();
    match format {
        OutputFormat::Table => Some(format!(
            "{:>8}  {}",
            "time",
            bands
                .iter()
                .map(|b| format!("{b:>9}"))
                .collect::<Vec<_>>()
                .join("  ")
        )),
        OutputFormat::Csv => Some(format!("time,{}", bands.join(","))),
        OutputFormat::Json => None,
    }
}

/// Render one sample as a single output line.
pub fn format_sample(sample: &Sample, format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => format!(
            "{:>8}  {}",
            sample.time,
            Band::ALL
                .iter()
                .map(|&b| format!("{:>9.3}", sample.get(b)))
                .collect::<Vec<_>>()
                .join("  ")
        ),
        OutputFormat::Csv => format!(
            "{},{}",
            sample.time,
            Band::ALL
                .iter()
                .map(|&b| sample.get(b).to_string())
                .collect::<Vec<_>>()
                .join(",")
        ),
        OutputFormat::Json => serde_json::to_string(sample).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neurotiq_core::baseline;

    // -----------------------------------------------------------------------
    // parse_format tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_known_formats() {
        assert_eq!(parse_format("table"), OutputFormat::Table);
        assert_eq!(parse_format("csv"), OutputFormat::Csv);
        assert_eq!(parse_format("json"), OutputFormat::Json);
        assert_eq!(parse_format("jsonl"), OutputFormat::Json);
    }

    #[test]
    fn test_parse_unknown_defaults_table() {
        assert_eq!(parse_format("xml"), OutputFormat::Table);
        assert_eq!(parse_format("CSV"), OutputFormat::Table); // case-sensitive
    }

    // -----------------------------------------------------------------------
    // Formatting tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_csv_header_and_row_align() {
        let header = format_header(OutputFormat::Csv).unwrap();
        assert_eq!(header, "time,alpha,beta,theta,delta");
        let row = format_sample(&baseline(0), OutputFormat::Csv);
        assert_eq!(row.split(',').count(), 5);
        assert!(row.starts_with("0,"));
    }

    #[test]
    fn test_json_lines_have_no_header() {
        assert!(format_header(OutputFormat::Json).is_none());
        let line = format_sample(&baseline(3), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["time"], 3);
    }

    #[test]
    fn test_table_row_starts_with_time() {
        let row = format_sample(&baseline(42), OutputFormat::Table);
        assert_eq!(row.split_whitespace().next(), Some("42"));
        assert_eq!(row.split_whitespace().count(), 5);
    }

    // -----------------------------------------------------------------------
    // Config helpers
    // -----------------------------------------------------------------------

    #[test]
    fn test_stream_config_from_flags() {
        let config = stream_config(50, 300, 250, Some(7));
        assert_eq!(config.capacity, 50);
        assert_eq!(config.start_time, 300);
        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_analysis_config_flag_wins() {
        let config = analysis_config(Some("http://analysis.test"));
        assert_eq!(config.analyze_url(), "http://analysis.test/analyze");
    }
}
