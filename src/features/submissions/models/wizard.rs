use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::resources::models::ResourceType;
use crate::features::submissions::models::ResourceDraft;

const MISSING_BASIC_INFO: &str = "Please fill in all required fields: Name, Type, and Address";
const MISSING_CONTACT: &str = "Please provide at least one contact method (phone or email)";

/// Wizard page, in the order the contributor walks through them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStep {
    #[default]
    BasicInfo,
    ContactDetails,
    AdditionalInfo,
}

impl SubmissionStep {
    pub const ALL: [SubmissionStep; 3] = [
        SubmissionStep::BasicInfo,
        SubmissionStep::ContactDetails,
        SubmissionStep::AdditionalInfo,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    /// Check the fields this step requires
    pub fn validate(self, draft: &ResourceDraft) -> StepValidation {
        match self {
            SubmissionStep::BasicInfo => {
                let mut fields = Vec::new();
                if draft.name.trim().is_empty() {
                    fields.push("name");
                }
                if draft.resource_type.trim().parse::<ResourceType>().is_err() {
                    fields.push("type");
                }
                if draft.address.trim().is_empty() {
                    fields.push("address");
                }
                StepValidation::missing(fields, MISSING_BASIC_INFO)
            }
            SubmissionStep::ContactDetails => {
                if draft.contact.trim().is_empty() && draft.email.trim().is_empty() {
                    StepValidation::missing(vec!["contact", "email"], MISSING_CONTACT)
                } else {
                    StepValidation::Valid
                }
            }
            SubmissionStep::AdditionalInfo => StepValidation::Valid,
        }
    }
}

/// Outcome of checking one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepValidation {
    Valid,
    Missing {
        fields: Vec<String>,
        message: String,
    },
}

impl StepValidation {
    fn missing(fields: Vec<&str>, message: &str) -> Self {
        if fields.is_empty() {
            return StepValidation::Valid;
        }
        StepValidation::Missing {
            fields: fields.into_iter().map(str::to_string).collect(),
            message: message.to_string(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, StepValidation::Valid)
    }
}

/// Linear three-step intake form. Forward moves are gated on the current
/// step's validation; moving back is always allowed.
#[derive(Debug, Clone)]
pub struct SubmissionWizard {
    step: SubmissionStep,
    draft: ResourceDraft,
}

impl SubmissionWizard {
    pub fn at(step: SubmissionStep, draft: ResourceDraft) -> Self {
        Self { step, draft }
    }

    pub fn step(&self) -> SubmissionStep {
        self.step
    }

    pub fn validate_current(&self) -> StepValidation {
        self.step.validate(&self.draft)
    }

    /// Move to the next step when the current one is complete. The last step
    /// stays put.
    pub fn advance(&mut self) -> StepValidation {
        let validation = self.validate_current();
        if validation.is_valid() {
            if let Some(next) = self.step.next() {
                self.step = next;
            }
        }
        validation
    }

    pub fn back(&mut self) {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
    }

    /// Final check before submitting: the first failing required step, if any
    pub fn validate_for_submit(&self) -> StepValidation {
        validate_for_submit(&self.draft)
    }
}

/// Re-run the required steps in order and report the first failure
pub fn validate_for_submit(draft: &ResourceDraft) -> StepValidation {
    [SubmissionStep::BasicInfo, SubmissionStep::ContactDetails]
        .into_iter()
        .map(|step| step.validate(draft))
        .find(|v| !v.is_valid())
        .unwrap_or(StepValidation::Valid)
}
