use utoipa::{Modify, OpenApi};

use crate::features::geocoding::{
    dtos as geocoding_dtos, handlers as geocoding_handlers, models as geocoding_models,
};
use crate::features::locations::{
    dtos as locations_dtos, handlers as locations_handlers, models as locations_models,
};
use crate::features::resources::{
    dtos as resources_dtos, handlers as resources_handlers, models as resources_models,
};
use crate::features::submissions::{
    dtos as submissions_dtos, handlers as submissions_handlers, models as submissions_models,
};
use crate::shared::types::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Resources (public)
        resources_handlers::list_resources,
        resources_handlers::create_resource,
        // Geocoding (public)
        geocoding_handlers::geocode,
        // Locations (public)
        locations_handlers::search_location,
        // Submissions (public)
        submissions_handlers::validate_step,
        submissions_handlers::get_draft,
        submissions_handlers::save_draft,
        submissions_handlers::discard_draft,
        submissions_handlers::submit_draft,
        submissions_handlers::submit,
    ),
    components(
        schemas(
            ErrorResponse,
            // Resources
            resources_models::ResourceType,
            resources_models::Resource,
            resources_dtos::CreateResourceDto,
            resources_dtos::CreatedResourceDto,
            // Geocoding
            geocoding_dtos::GeocodeRequestDto,
            geocoding_models::GeocodeResult,
            // Locations
            locations_models::SearchLocation,
            locations_dtos::LocationSearchDto,
            locations_dtos::LocationSearchResponseDto,
            // Submissions
            submissions_models::ResourceDraft,
            submissions_models::SubmissionStep,
            submissions_models::StepValidation,
            submissions_dtos::WizardAction,
            submissions_dtos::ValidateStepDto,
            submissions_dtos::StepValidationResponseDto,
        )
    ),
    tags(
        (name = "resources", description = "Community aid resources (public)"),
        (name = "geocoding", description = "Address to coordinates resolution"),
        (name = "locations", description = "Location search with stored and nearby demo resources"),
        (name = "submissions", description = "Multi-step resource intake and drafts"),
    ),
    info(
        title = "HelpMap API",
        version = "0.1.0",
        description = "API documentation for HelpMap",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
