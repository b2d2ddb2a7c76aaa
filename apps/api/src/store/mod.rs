//! Entity Store boundary.
//!
//! The store is the only cross-request shared state. It is a trait so the
//! assembly and invariant logic stay testable without a database: production
//! uses `PgEntityStore`, tests use the in-memory store. Entity CRUD itself
//! is managed elsewhere; this service only reads entities and owns the CV
//! aggregate records.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::cv::{CvChanges, CvRecord};
use crate::models::entities::{Certification, Education, Experience, Project, Skill};
use crate::models::header::Header;

pub use postgres::PgEntityStore;

#[async_trait]
pub trait EntityStore: Send + Sync {
    /// The canonical profile header, when one exists.
    async fn find_canonical_header(&self) -> Result<Option<Header>, AppError>;

    async fn header_by_id(&self, id: Uuid) -> Result<Option<Header>, AppError>;

    /// Batch lookups for referenced entities. Implementations may return
    /// results in any order and silently skip ids that no longer resolve;
    /// the assembler restores the caller's order.
    async fn skills_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Skill>, AppError>;
    async fn experiences_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Experience>, AppError>;
    async fn projects_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Project>, AppError>;
    async fn education_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Education>, AppError>;
    async fn certifications_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Certification>, AppError>;

    async fn insert_cv(&self, record: &CvRecord) -> Result<(), AppError>;

    async fn cv_by_id(&self, id: Uuid) -> Result<Option<CvRecord>, AppError>;

    /// The unique aggregate flagged `main_cv = true`, when one exists.
    async fn find_main_cv(&self) -> Result<Option<CvRecord>, AppError>;

    /// All aggregates, most-recently-created first.
    async fn list_cvs(&self) -> Result<Vec<CvRecord>, AppError>;

    /// Applies `changes` without touching any other aggregate. Returns the
    /// updated record, or `None` when the id does not exist.
    async fn update_cv(&self, id: Uuid, changes: CvChanges) -> Result<Option<CvRecord>, AppError>;

    /// Promotes `id` to main: demotes every other main-flagged aggregate and
    /// applies `changes` with `main_cv = true`, atomically. Returns `None`
    /// when the id does not exist (and demotes nothing in that case).
    async fn promote_cv(&self, id: Uuid, changes: CvChanges) -> Result<Option<CvRecord>, AppError>;

    /// Removes the aggregate record only, never the referenced entities.
    /// Returns whether a record was deleted.
    async fn delete_cv(&self, id: Uuid) -> Result<bool, AppError>;
}
