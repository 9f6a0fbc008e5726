use neurotiq_core::{AnalysisConfig, StreamConfig};

pub fn run(host: &str, port: u16, config: StreamConfig, analysis: AnalysisConfig) {
    let base = format!("http://{host}:{port}");

    println!("🧠 NeurotiQ Server v{}", neurotiq_core::VERSION);
    println!("   {base}");
    println!(
        "   window {} samples, tick every {} ms",
        config.capacity,
        config.tick_interval.as_millis()
    );
    println!("   analysis backend {}", analysis.analyze_url());
    println!();
    println!("   Endpoints:");
    println!("     GET  /                       API index (try: curl {base})");
    println!("     GET  /health                 Stream health check");
    println!("     GET  /api/v1/stream          Current window, oldest first");
    println!("     GET  /api/v1/stream/latest   Newest sample");
    println!("     POST /api/v1/analyze         Condition scores -> report");
    println!("     POST /api/v1/invitations     Invite a doctor");
    println!("     GET  /api/v1/dashboard       Classification scores and clinics");
    println!();
    println!("   Query params for /api/v1/stream:");
    println!("     band=alpha|beta|theta|delta  One band's (time, value) series");
    println!();
    println!("   Examples:");
    println!("     curl {base}/api/v1/stream?band=alpha");
    println!(
        "     curl -X POST -H 'Content-Type: application/json' \\\n          -d '{{\"depression\":0.2,\"anxiety\":0.6,\"schizophrenia\":0.0,\"adhd\":0.4}}' {base}/api/v1/analyze"
    );
    println!();

    let rt = super::runtime();
    if let Err(e) = rt.block_on(neurotiq_server::run_server(config, analysis, host, port)) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
