//! CV assembly — loads an aggregate and dereferences every relation into a
//! `ComposedCv`.
//!
//! Read-only: nothing here mutates the store. Each relation list is resolved
//! with one batch lookup and then reordered to the aggregate's id order, so
//! assembly output for unchanged data is deterministic regardless of how the
//! store returns batches. References that no longer resolve are dropped.

use std::collections::HashMap;

use uuid::Uuid;

use crate::errors::AppError;
use crate::models::cv::{ComposedCv, CvRecord};
use crate::store::EntityStore;

/// How to pick the aggregate to compose.
#[derive(Debug, Clone, Copy)]
pub enum CvSelector {
    ById(Uuid),
    /// The unique aggregate flagged `main_cv = true`.
    Main,
}

/// Loads the selected aggregate and resolves it. `NotFound` when the id does
/// not exist or no aggregate is flagged main.
pub async fn compose(
    store: &dyn EntityStore,
    selector: CvSelector,
) -> Result<ComposedCv, AppError> {
    let record = match selector {
        CvSelector::ById(id) => store
            .cv_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("CV {id} not found")))?,
        CvSelector::Main => store
            .find_main_cv()
            .await?
            .ok_or_else(|| AppError::NotFound("Main CV not found".to_string()))?,
    };
    resolve(store, record).await
}

/// Resolves an already-loaded aggregate into its composed view.
pub async fn resolve(store: &dyn EntityStore, record: CvRecord) -> Result<ComposedCv, AppError> {
    let header = store
        .header_by_id(record.header_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Header profile not found".to_string()))?;

    let skills = in_input_order(store.skills_by_ids(&record.skill_ids).await?, &record.skill_ids, |s| s.id);
    let experience = in_input_order(
        store.experiences_by_ids(&record.experience_ids).await?,
        &record.experience_ids,
        |e| e.id,
    );
    let projects = in_input_order(
        store.projects_by_ids(&record.project_ids).await?,
        &record.project_ids,
        |p| p.id,
    );
    let education = in_input_order(
        store.education_by_ids(&record.education_ids).await?,
        &record.education_ids,
        |e| e.id,
    );
    let certifications = in_input_order(
        store.certifications_by_ids(&record.certification_ids).await?,
        &record.certification_ids,
        |c| c.id,
    );

    Ok(ComposedCv {
        id: record.id,
        professional_summary: record.professional_summary,
        role: record.role,
        main_cv: record.main_cv,
        header,
        skills,
        experience,
        projects,
        education,
        certifications,
        languages: record.languages,
        interests: record.interests,
        created_at: record.created_at,
    })
}

/// Reorders batch-lookup results to the aggregate's id order; ids that
/// resolved to nothing are simply absent from the output.
fn in_input_order<T>(items: Vec<T>, ids: &[Uuid], id_of: impl Fn(&T) -> Uuid) -> Vec<T> {
    let mut by_id: HashMap<Uuid, T> = items.into_iter().map(|item| (id_of(&item), item)).collect();
    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}
