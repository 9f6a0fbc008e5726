use neurotiq_core::{AnalysisClient, AnalysisConfig, AnalysisReport, BrainWaveScores};

pub fn run(scores: BrainWaveScores, config: AnalysisConfig, json: bool) {
    let client = AnalysisClient::http(&config);
    log::info!("analyzing via {}", config.analyze_url());
    let report = client.analyze(&scores);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", render(&scores, &report));
    }
}

fn render(scores: &BrainWaveScores, report: &AnalysisReport) -> String {
    let mut out = String::new();
    out.push_str("Scores\n");
    for (name, value) in [
        ("depression", scores.depression),
        ("anxiety", scores.anxiety),
        ("schizophrenia", scores.schizophrenia),
        ("adhd", scores.adhd),
    ] {
        out.push_str(&format!("  {name:<14} {value:.2}\n"));
    }
    out.push_str("\nReport\n");
    out.push_str(&format!("  {}\n", report.report));
    out.push_str("\nRecommendations\n");
    for (i, rec) in report.recommendations.iter().enumerate() {
        out.push_str(&format!("  {}. {rec}\n", i + 1));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_numbers_recommendations() {
        let text = render(&BrainWaveScores::default(), &AnalysisReport::fallback());
        assert!(text.contains("  1. Practice deep breathing exercises for 5 minutes daily"));
        assert!(text.contains("  5. Consider speaking with a mental health professional"));
        assert!(text.contains("  anxiety        0.00"));
    }
}
