//! Main-CV invariant: at most one aggregate carries `main_cv = true`.
//!
//! Creation never steals the flag — a second main-flagged create is rejected
//! with Conflict so the caller updates the existing main CV deliberately.
//! Updates that promote an aggregate demote every other main CV first; both
//! steps run inside one store transaction (`EntityStore::promote_cv`), and
//! the schema's partial unique index backstops racing writers.

use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::cv::{CvChanges, CvRecord};
use crate::store::EntityStore;

/// Rejects a main-flagged create while another main CV exists.
pub async fn ensure_main_slot_free(store: &dyn EntityStore) -> Result<(), AppError> {
    if store.find_main_cv().await?.is_some() {
        return Err(AppError::Conflict(
            "Main CV already exists. Please update it instead.".to_string(),
        ));
    }
    Ok(())
}

/// Applies a partial update, routing through the promote path when the
/// request flags `main_cv = true`. A request with `main_cv` false or absent
/// never touches any other aggregate.
pub async fn apply_update(
    store: &dyn EntityStore,
    id: Uuid,
    changes: CvChanges,
) -> Result<CvRecord, AppError> {
    let promote = changes.main_cv == Some(true);
    let updated = if promote {
        store.promote_cv(id, changes).await?
    } else {
        store.update_cv(id, changes).await?
    };
    let record = updated.ok_or_else(|| AppError::NotFound(format!("CV {id} not found")))?;
    if promote {
        info!("CV {id} promoted to main");
    }
    Ok(record)
}
