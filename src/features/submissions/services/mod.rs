mod draft_store;
mod submission_service;

pub use draft_store::DraftStore;
pub use submission_service::SubmissionService;
