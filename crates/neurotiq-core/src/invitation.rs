//! "Invite your doctor" workflow.
//!
//! Submitting a form validates the required fields and records the request
//! in the log. Nothing is delivered: there is no mail or messaging backend.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message shown when a required field is blank.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

/// Clinician specialty offered by the invitation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Specialization {
    Psychiatrist,
    Neurologist,
    Psychologist,
    Therapist,
    Other,
}

impl Specialization {
    pub const ALL: [Specialization; 5] = [
        Self::Psychiatrist,
        Self::Neurologist,
        Self::Psychologist,
        Self::Therapist,
        Self::Other,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Psychiatrist => "Psychiatrist",
            Self::Neurologist => "Neurologist",
            Self::Psychologist => "Psychologist",
            Self::Therapist => "Therapist",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Specialization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Psychiatrist => write!(f, "psychiatrist"),
            Self::Neurologist => write!(f, "neurologist"),
            Self::Psychologist => write!(f, "psychologist"),
            Self::Therapist => write!(f, "therapist"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for Specialization {
    type Err = InvitationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|sp| sp.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InvitationError::InvalidSpecialization(wanted.to_string()))
    }
}

/// Why an invitation was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvitationError {
    /// Doctor's name or email is blank.
    MissingRequiredFields,
    InvalidSpecialization(String),
}

impl std::fmt::Display for InvitationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequiredFields => write!(f, "{REQUIRED_FIELDS_MESSAGE}"),
            Self::InvalidSpecialization(s) => write!(
                f,
                "unknown specialization '{s}' (expected psychiatrist, neurologist, psychologist, therapist or other)"
            ),
        }
    }
}

impl std::error::Error for InvitationError {}

/// Contents of the invitation dialog. Only name and email are required.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvitationForm {
    pub doctor_name: String,
    pub doctor_email: String,
    /// Empty means "not specified"; otherwise one of [`Specialization`].
    pub specialization: String,
    pub hospital_name: String,
    pub additional_notes: String,
}

impl InvitationForm {
    pub fn new(doctor_name: impl Into<String>, doctor_email: impl Into<String>) -> Self {
        Self {
            doctor_name: doctor_name.into(),
            doctor_email: doctor_email.into(),
            ..Self::default()
        }
    }

    pub fn with_specialization(mut self, specialization: impl Into<String>) -> Self {
        self.specialization = specialization.into();
        self
    }

    pub fn with_hospital(mut self, hospital_name: impl Into<String>) -> Self {
        self.hospital_name = hospital_name.into();
        self
    }

    pub fn with_notes(mut self, additional_notes: impl Into<String>) -> Self {
        self.additional_notes = additional_notes.into();
        self
    }

    /// Check required fields and the specialization value.
    pub fn validate(&self) -> Result<Option<Specialization>, InvitationError> {
        if self.doctor_name.trim().is_empty() || self.doctor_email.trim().is_empty() {
            return Err(InvitationError::MissingRequiredFields);
        }
        if self.specialization.trim().is_empty() {
            Ok(None)
        } else {
            self.specialization.parse().map(Some)
        }
    }

    /// Clear every field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Receipt for an accepted invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invitation {
    pub id: Uuid,
    pub specialization: Option<Specialization>,
    pub form: InvitationForm,
}

/// Validate and record an invitation.
pub fn submit(form: &InvitationForm) -> Result<Invitation, InvitationError> {
    let specialization = form.validate()?;
    let invitation = Invitation {
        id: Uuid::new_v4(),
        specialization,
        form: form.clone(),
    };
    log::info!(
        "Sending invitation {}: {} <{}> specialization={} hospital={:?} notes={:?}",
        invitation.id,
        form.doctor_name.trim(),
        form.doctor_email.trim(),
        specialization.map_or_else(|| "-".to_string(), |s| s.to_string()),
        form.hospital_name,
        form.additional_notes,
    );
    Ok(invitation)
}

/// Submit the form and clear it on success, as the dialog does. A rejected
/// form is left untouched so it can be corrected.
pub fn submit_and_reset(form: &mut InvitationForm) -> Result<Invitation, InvitationError> {
    let invitation = submit(form)?;
    form.reset();
    Ok(invitation)
}
