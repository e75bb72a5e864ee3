mod draft;
mod wizard;

pub use draft::ResourceDraft;
pub use wizard::{validate_for_submit, StepValidation, SubmissionStep, SubmissionWizard};
