use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::geocoding::Geocoder;
use crate::features::resources::services::{CreatedResource, ResourceService};
use crate::features::submissions::models::{validate_for_submit, ResourceDraft, StepValidation};

/// Final step of the intake wizard: validate, geocode, insert
pub struct SubmissionService {
    geocoder: Arc<dyn Geocoder>,
    resources: Arc<ResourceService>,
}

impl SubmissionService {
    pub fn new(geocoder: Arc<dyn Geocoder>, resources: Arc<ResourceService>) -> Self {
        Self {
            geocoder,
            resources,
        }
    }

    /// Submit a completed draft.
    ///
    /// Nothing is geocoded until the required steps pass, and nothing is
    /// inserted unless geocoding succeeds. The draft is left untouched on
    /// every failure so the caller can retry.
    pub async fn submit(&self, draft: &ResourceDraft) -> Result<CreatedResource> {
        if let StepValidation::Missing { message, .. } = validate_for_submit(draft) {
            return Err(AppError::Validation(message));
        }

        let point = self
            .geocoder
            .resolve(&draft.address)
            .await
            .inspect_err(|e| {
                tracing::warn!("Submission for '{}' failed to geocode: {}", draft.name.trim(), e)
            })?;

        self.resources
            .insert(draft.clone().into_candidate(point))
            .await
    }
}
