//! CLI for NeurotiQ: a live four-band brain-wave stream in your terminal.

mod commands;
mod tui;

use clap::{Parser, Subcommand};
use neurotiq_core::{BrainWaveScores, InvitationForm};

#[derive(Parser)]
#[command(name = "neurotiq")]
#[command(about = "NeurotiQ: synthetic brain-wave stream, monitor and analysis")]
#[command(version = neurotiq_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream samples to stdout as they are produced (pipe-friendly)
    Stream {
        /// Output format
        #[arg(long, default_value = "table", value_parser = ["table", "csv", "json"])]
        format: String,

        /// Stop after N ticks (0 = until Ctrl+C)
        #[arg(long, default_value = "0")]
        ticks: u64,

        /// Print the initial window before streaming
        #[arg(long)]
        window: bool,

        /// Window length in samples
        #[arg(long, default_value = "100")]
        capacity: usize,

        /// Logical time of the oldest initial sample
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        start: i64,

        /// Milliseconds between ticks
        #[arg(long, default_value = "1000")]
        interval_ms: u64,

        /// Seed the noise for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Live interactive brain-wave chart (TUI)
    Monitor {
        /// Window length in samples
        #[arg(long, default_value = "100")]
        capacity: usize,

        /// Logical time of the oldest initial sample
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        start: i64,

        /// Milliseconds between ticks
        #[arg(long, default_value = "1000")]
        interval_ms: u64,

        /// Seed the noise for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Send condition scores to the analysis backend and print the report.
    /// Falls back to a fixed report when the backend is unavailable.
    Analyze {
        #[arg(long, default_value = "0")]
        depression: f64,

        #[arg(long, default_value = "0")]
        anxiety: f64,

        #[arg(long, default_value = "0")]
        schizophrenia: f64,

        #[arg(long, default_value = "0")]
        adhd: f64,

        /// Analysis base URL (default: $NEUROTIQ_API_URL or http://localhost:5000)
        #[arg(long)]
        api_url: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Invite a doctor to view your data
    Invite {
        /// Doctor's name
        #[arg(long)]
        name: String,

        /// Doctor's email
        #[arg(long)]
        email: String,

        /// psychiatrist, neurologist, psychologist, therapist or other
        #[arg(long)]
        specialization: Option<String>,

        /// Hospital or clinic name
        #[arg(long)]
        hospital: Option<String>,

        /// Additional notes for the doctor
        #[arg(long)]
        notes: Option<String>,

        /// Print the receipt as JSON
        #[arg(long)]
        json: bool,
    },

    /// Chat with the NeuroAssistant (interactive when no messages are given)
    Chat {
        /// Messages to send, in order
        messages: Vec<String>,

        /// Milliseconds before the assistant answers
        #[arg(long, default_value = "1000")]
        reply_delay_ms: u64,
    },

    /// Show classification scores, wellness content and nearby clinics
    Dashboard {
        /// Which daily question to show (wraps around)
        #[arg(long, default_value = "0")]
        question: usize,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP server
    Server {
        /// Port to listen on
        #[arg(long, default_value = "8042")]
        port: u16,

        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Window length in samples
        #[arg(long, default_value = "100")]
        capacity: usize,

        /// Logical time of the oldest initial sample
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        start: i64,

        /// Milliseconds between ticks
        #[arg(long, default_value = "1000")]
        interval_ms: u64,

        /// Seed the noise for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Analysis base URL (default: $NEUROTIQ_API_URL or http://localhost:5000)
        #[arg(long)]
        api_url: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Commands::Server { .. } => "info",
        _ => "warn",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Stream {
            format,
            ticks,
            window,
            capacity,
            start,
            interval_ms,
            seed,
        } => commands::stream::run(
            commands::stream_config(capacity, start, interval_ms, seed),
            &format,
            ticks,
            window,
        ),
        Commands::Monitor {
            capacity,
            start,
            interval_ms,
            seed,
        } => commands::monitor::run(commands::stream_config(capacity, start, interval_ms, seed)),
        Commands::Analyze {
            depression,
            anxiety,
            schizophrenia,
            adhd,
            api_url,
            json,
        } => commands::analyze::run(
            BrainWaveScores {
                depression,
                anxiety,
                schizophrenia,
                adhd,
            },
            commands::analysis_config(api_url.as_deref()),
            json,
        ),
        Commands::Invite {
            name,
            email,
            specialization,
            hospital,
            notes,
            json,
        } => commands::invite::run(
            InvitationForm::new(name, email)
                .with_specialization(specialization.unwrap_or_default())
                .with_hospital(hospital.unwrap_or_default())
                .with_notes(notes.unwrap_or_default()),
            json,
        ),
        Commands::Chat {
            messages,
            reply_delay_ms,
        } => commands::chat::run(&messages, reply_delay_ms),
        Commands::Dashboard { question, json } => commands::dashboard::run(question, json),
        Commands::Server {
            port,
            host,
            capacity,
            start,
            interval_ms,
            seed,
            api_url,
        } => commands::server::run(
            &host,
            port,
            commands::stream_config(capacity, start, interval_ms, seed),
            commands::analysis_config(api_url.as_deref()),
        ),
    }
}
