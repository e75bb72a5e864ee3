use std::io::ErrorKind;
use std::path::PathBuf;
use uuid::Uuid;

use crate::core::config::DraftConfig;
use crate::core::error::{AppError, Result};
use crate::features::submissions::models::ResourceDraft;
use crate::shared::validation::DRAFT_ID_REGEX;

/// Drafts kept as `<dir>/<id>.json`
pub struct DraftStore {
    dir: PathBuf,
}

impl DraftStore {
    pub fn new(config: &DraftConfig) -> Self {
        Self {
            dir: config.dir.clone(),
        }
    }

    fn path(&self, draft_id: &str) -> Result<PathBuf> {
        if !DRAFT_ID_REGEX.is_match(draft_id) {
            return Err(AppError::Validation(format!(
                "Invalid draft id: {}",
                draft_id
            )));
        }
        Ok(self.dir.join(format!("{}.json", draft_id)))
    }

    pub async fn load(&self, draft_id: &str) -> Result<ResourceDraft> {
        let path = self.path(draft_id)?;

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(AppError::NotFound(format!("Draft {} not found", draft_id)));
            }
            Err(e) => {
                return Err(AppError::Internal(format!(
                    "Failed to read draft {}: {}",
                    draft_id, e
                )));
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::Internal(format!("Draft {} is corrupted: {}", draft_id, e))
        })
    }

    /// Write the draft, replacing any previous version
    pub async fn save(&self, draft_id: &str, draft: &ResourceDraft) -> Result<()> {
        let path = self.path(draft_id)?;

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            AppError::Internal(format!("Failed to create draft directory: {}", e))
        })?;

        let bytes = serde_json::to_vec_pretty(draft)
            .map_err(|e| AppError::Internal(format!("Failed to encode draft: {}", e)))?;

        // Replace through a per-write temp file so readers never see a partial
        // write and overlapping saves never rename each other's file away
        let tmp = path.with_extension(format!("json.{}.tmp", Uuid::now_v7()));
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write draft {}: {}", draft_id, e)))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write draft {}: {}", draft_id, e)))?;

        tracing::debug!("Saved draft {}", draft_id);
        Ok(())
    }

    /// Remove a draft. Returns false when there was nothing to remove.
    pub async fn clear(&self, draft_id: &str) -> Result<bool> {
        let path = self.path(draft_id)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!("Cleared draft {}", draft_id);
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::Internal(format!(
                "Failed to clear draft {}: {}",
                draft_id, e
            ))),
        }
    }
}
