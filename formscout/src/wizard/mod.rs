mod session;
mod state;

pub use session::{apply_relationships, GenerationSession};
pub use state::{reduce, WizardEvent, WizardState};
