use serde::Serialize;

use crate::shared::constants::LOCATION_ZOOM;

/// Wizard pages in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    Photo,
    Details,
    Location,
    Review,
}

impl WizardStep {
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Photo => 1,
            WizardStep::Details => 2,
            WizardStep::Location => 3,
            WizardStep::Review => 4,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            WizardStep::Photo => WizardStep::Details,
            WizardStep::Details => WizardStep::Location,
            WizardStep::Location | WizardStep::Review => WizardStep::Review,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            WizardStep::Photo | WizardStep::Details => WizardStep::Photo,
            WizardStep::Location => WizardStep::Details,
            WizardStep::Review => WizardStep::Location,
        }
    }
}

/// Progress indicator state for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    Completed,
    Active,
    Upcoming,
}

pub fn progress(current: WizardStep) -> [(WizardStep, StepState); 4] {
    [
        WizardStep::Photo,
        WizardStep::Details,
        WizardStep::Location,
        WizardStep::Review,
    ]
    .map(|step| {
        let state = match step.cmp(&current) {
            std::cmp::Ordering::Less => StepState::Completed,
            std::cmp::Ordering::Equal => StepState::Active,
            std::cmp::Ordering::Greater => StepState::Upcoming,
        };
        (step, state)
    })
}

/// Chosen map pin and its resolved address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationPin {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
    pub zoom: u8,
}

impl LocationPin {
    pub fn new(lat: f64, lng: f64, address: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            address: address.into(),
            zoom: LOCATION_ZOOM,
        }
    }

    /// `12.971600, 77.594600`
    pub fn coordinates(&self) -> String {
        format!("{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// What the review step shows before submitting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub photo_name: Option<String>,
    pub category_name: Option<String>,
    pub description: String,
    pub audio_name: Option<String>,
    pub address: String,
    pub coordinates: Option<String>,
}
