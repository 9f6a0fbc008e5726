use std::fmt::Write as _;

use neurotiq_core::catalog::{
    CLASSIFICATION_RESULTS, DAILY_QUESTIONS, NEARBY_CLINICS, RECOMMENDATIONS,
    WELLBEING_INDICATORS, WELLNESS_ACTIVITIES, clinics_by_rating, daily_question, next_question,
};

const BAR_WIDTH: usize = 30;

pub fn run(question: usize, json: bool) {
    if json {
        match serde_json::to_string_pretty(&to_json(question)) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    print!("{}", render(question));
}

fn to_json(question: usize) -> serde_json::Value {
    let index = question % DAILY_QUESTIONS.len();
    serde_json::json!({
        "classifications": CLASSIFICATION_RESULTS,
        "clinics": NEARBY_CLINICS,
        "activities": WELLNESS_ACTIVITIES,
        "indicators": WELLBEING_INDICATORS,
        "recommendations": RECOMMENDATIONS,
        "question": {
            "index": index,
            "text": daily_question(index),
            "next": next_question(index),
        },
    })
}

fn render(question: usize) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Classification results\n");
    for c in &CLASSIFICATION_RESULTS {
        let _ = writeln!(out, "  {:<15} {} {:>3}%", c.label, bar(c.percent), c.percent);
    }

    let _ = writeln!(out, "\nWellbeing\n");
    for i in &WELLBEING_INDICATORS {
        let _ = writeln!(out, "  {:<12} {:<10} {}", i.title, i.value, i.color);
    }

    let _ = writeln!(out, "\nRecommendations\n");
    for r in &RECOMMENDATIONS {
        let _ = writeln!(out, "  [{}] {}", r.priority, r.title);
        let _ = writeln!(out, "    {}", r.description);
    }

    let _ = writeln!(out, "\nWellness activities\n");
    for a in &WELLNESS_ACTIVITIES {
        let _ = writeln!(out, "  {:<20} {:>8}   {}", a.title, a.duration, a.kind);
    }

    let _ = writeln!(
        out,
        "\nQuestion of the day ({}/{})\n\n  {}",
        question % DAILY_QUESTIONS.len() + 1,
        DAILY_QUESTIONS.len(),
        daily_question(question)
    );

    let _ = writeln!(out, "\nNearby clinics\n");
    for clinic in clinics_by_rating() {
        let _ = writeln!(
            out,
            "  {:<24} ★ {:.1}   {}",
            clinic.name, clinic.rating, clinic.distance
        );
        let _ = writeln!(out, "    {}", clinic.address);
        let _ = writeln!(out, "    {}", clinic.specialties.join(", "));
    }

    out
}

fn bar(percent: u8) -> String {
    let filled = (percent.min(100) as usize * BAR_WIDTH) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
