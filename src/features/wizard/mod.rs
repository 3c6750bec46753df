pub mod flow;
pub mod state;

pub use flow::ComplaintWizard;
pub use state::{LocationPin, ReviewSummary, WizardStep};
