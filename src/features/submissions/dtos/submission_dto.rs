use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::submissions::models::{ResourceDraft, StepValidation, SubmissionStep};

/// Direction of a wizard move
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WizardAction {
    #[default]
    Advance,
    Back,
}

/// Request DTO for checking (and moving from) one wizard step
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ValidateStepDto {
    #[serde(default)]
    pub step: SubmissionStep,
    #[serde(default)]
    pub action: WizardAction,
    #[serde(default)]
    pub draft: ResourceDraft,
}

/// Response DTO for a wizard move
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StepValidationResponseDto {
    /// Result of checking the step the move started from
    pub validation: StepValidation,
    /// Step the contributor should see next
    pub step: SubmissionStep,
    /// True when every required step passes and the form can be submitted
    pub ready_to_submit: bool,
}
