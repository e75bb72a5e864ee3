//! Multi-step resource intake: per-step validation, server-side drafts, and
//! the geocode-then-insert submission.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/submissions/validate` | No | Check a wizard step and move forward or back |
//! | GET | `/api/submissions/drafts/{draft_id}` | No | Get a saved draft |
//! | PUT | `/api/submissions/drafts/{draft_id}` | No | Save a draft |
//! | DELETE | `/api/submissions/drafts/{draft_id}` | No | Discard a draft |
//! | POST | `/api/submissions/drafts/{draft_id}/submit` | No | Submit a saved draft |
//! | POST | `/api/submissions` | No | Submit a form directly |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use handlers::SubmissionState;
pub use services::{DraftStore, SubmissionService};
