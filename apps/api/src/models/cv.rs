use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::entities::{Certification, Education, Experience, Project, Skill};
use crate::models::header::Header;

/// The persisted CV aggregate: scalars plus relation id lists. Relation
/// lists reference entities, they never own them — deleting a CV leaves
/// every referenced entity in place.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CvRecord {
    pub id: Uuid,
    pub header_id: Uuid,
    pub professional_summary: String,
    pub role: Option<String>,
    pub main_cv: bool,
    pub skill_ids: Vec<Uuid>,
    pub experience_ids: Vec<Uuid>,
    pub project_ids: Vec<Uuid>,
    pub education_ids: Vec<Uuid>,
    pub certification_ids: Vec<Uuid>,
    pub languages: Vec<String>,
    pub interests: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update to a CV aggregate. `None` means "leave untouched".
/// `main_cv: Some(true)` routes through the promote path (demote others,
/// then set) in the store.
#[derive(Debug, Clone, Default)]
pub struct CvChanges {
    pub professional_summary: Option<String>,
    pub role: Option<String>,
    pub main_cv: Option<bool>,
    pub skill_ids: Option<Vec<Uuid>>,
    pub experience_ids: Option<Vec<Uuid>>,
    pub project_ids: Option<Vec<Uuid>>,
    pub education_ids: Option<Vec<Uuid>>,
    pub certification_ids: Option<Vec<Uuid>>,
    pub languages: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
}

/// The fully dereferenced view of a CV aggregate. Built fresh per request by
/// the assembler, handed to the template engine, then dropped — never
/// persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ComposedCv {
    pub id: Uuid,
    pub professional_summary: String,
    pub role: Option<String>,
    pub main_cv: bool,
    pub header: Header,
    pub skills: Vec<Skill>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub education: Vec<Education>,
    pub certifications: Vec<Certification>,
    pub languages: Vec<String>,
    pub interests: Vec<String>,
    pub created_at: DateTime<Utc>,
}
