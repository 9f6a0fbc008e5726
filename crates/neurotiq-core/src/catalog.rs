//! Static dashboard content: classification scores, nearby clinics,
//! wellness activities, the daily question, wellbeing indicators and
//! recommendations.

use serde::Serialize;

/// One cognitive-state score on the dashboard, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub name: &'static str,
    pub label: &'static str,
    pub percent: u8,
}

pub const CLASSIFICATION_RESULTS: [Classification; 4] = [
    Classification {
        name: "focus",
        label: "Focus",
        percent: 85,
    },
    Classification {
        name: "meditation",
        label: "Meditation",
        percent: 70,
    },
    Classification {
        name: "stress",
        label: "Stress",
        percent: 45,
    },
    Classification {
        name: "cognitive_load",
        label: "Cognitive load",
        percent: 60,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Clinic {
    pub name: &'static str,
    pub distance: &'static str,
    pub address: &'static str,
    pub specialties: &'static [&'static str],
    pub rating: f64,
}

pub const NEARBY_CLINICS: [Clinic; 3] = [
    Clinic {
        name: "NeuroHealth Center",
        distance: "0.8 miles",
        address: "123 Brain Street, San Francisco, CA",
        specialties: &["Neurology", "Mental Health"],
        rating: 4.8,
    },
    Clinic {
        name: "Mind & Wellness Clinic",
        distance: "1.2 miles",
        address: "456 Cognitive Ave, San Francisco, CA",
        specialties: &["Psychology", "Psychiatry"],
        rating: 4.6,
    },
    Clinic {
        name: "BrainCare Medical",
        distance: "2.1 miles",
        address: "789 Neural Drive, San Francisco, CA",
        specialties: &["Neurofeedback", "Therapy"],
        rating: 4.7,
    },
];

/// A suggested wellness activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WellnessActivity {
    pub title: &'static str,
    pub duration: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

pub const WELLNESS_ACTIVITIES: [WellnessActivity; 6] = [
    WellnessActivity {
        title: "Morning Meditation",
        duration: "10 mins",
        kind: "Mindfulness",
    },
    WellnessActivity {
        title: "Nature Walk",
        duration: "20 mins",
        kind: "Exercise",
    },
    WellnessActivity {
        title: "Gratitude Journal",
        duration: "5 mins",
        kind: "Reflection",
    },
    WellnessActivity {
        title: "Healthy Breakfast",
        duration: "15 mins",
        kind: "Nutrition",
    },
    WellnessActivity {
        title: "Mood Music",
        duration: "10 mins",
        kind: "Relaxation",
    },
    WellnessActivity {
        title: "Sunlight Break",
        duration: "15 mins",
        kind: "Wellness",
    },
];

/// Reflection prompts, shown one at a time.
pub const DAILY_QUESTIONS: [&str; 4] = [
    "What made you smile today?",
    "What are you looking forward to?",
    "What's one thing you're proud of?",
    "Who would you like to thank today?",
];

/// Index of the question after `current`, wrapping to the first.
pub fn next_question(current: usize) -> usize {
    (current + 1) % DAILY_QUESTIONS.len()
}

/// The daily question at `index`, wrapping out-of-range indices.
pub fn daily_question(index: usize) -> &'static str {
    DAILY_QUESTIONS[index % DAILY_QUESTIONS.len()]
}

/// A one-word wellbeing reading with its display colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Indicator {
    pub title: &'static str,
    pub value: &'static str,
    /// `#RRGGBB`.
    pub color: &'static str,
}

pub const WELLBEING_INDICATORS: [Indicator; 4] = [
    Indicator {
        title: "Energy",
        value: "Balanced",
        color: "#4CAF50",
    },
    Indicator {
        title: "Mood",
        value: "Bright",
        color: "#7FE7F3",
    },
    Indicator {
        title: "Mindfulness",
        value: "Present",
        color: "#9C27B0",
    },
    Indicator {
        title: "Wellness",
        value: "Growing",
        color: "#FF9800",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub title: &'static str,
    pub description: &'static str,
    pub priority: Priority,
}

pub const RECOMMENDATIONS: [Recommendation; 3] = [
    Recommendation {
        title: "Mindfulness Practice",
        description: "Incorporate 10-minute mindfulness sessions twice daily to maintain focus levels.",
        priority: Priority::High,
    },
    Recommendation {
        title: "Stress Management",
        description: "Practice deep breathing exercises during high-stress periods.",
        priority: Priority::Medium,
    },
    Recommendation {
        title: "Cognitive Training",
        description: "Engage in problem-solving activities to optimize cognitive load management.",
        priority: Priority::Low,
    },
];

/// Recommendations of exactly `priority`.
pub fn recommendations_with(priority: Priority) -> Vec<&'static Recommendation> {
    RECOMMENDATIONS
        .iter()
        .filter(|r| r.priority == priority)
        .collect()
}

/// Look up a classification score by its machine name.
pub fn classification(name: &str) -> Option<&'static Classification> {
    CLASSIFICATION_RESULTS.iter().find(|c| c.name == name)
}

/// Clinics ordered by rating, best first.
pub fn clinics_by_rating() -> Vec<&'static Clinic> {
    let mut clinics: Vec<&Clinic> = NEARBY_CLINICS.iter().collect();
    clinics.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    clinics
}
