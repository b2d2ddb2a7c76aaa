//! In-memory Entity Store used by tests. One mutex guards all state, so
//! every operation (including promote) is serialized the way the Postgres
//! transaction serializes demote-then-set.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::cv::{CvChanges, CvRecord};
use crate::models::entities::{Certification, Education, Experience, Project, Skill};
use crate::models::header::Header;
use crate::store::EntityStore;

#[derive(Default)]
struct Inner {
    headers: Vec<Header>,
    skills: HashMap<Uuid, Skill>,
    experiences: HashMap<Uuid, Experience>,
    projects: HashMap<Uuid, Project>,
    education: HashMap<Uuid, Education>,
    certifications: HashMap<Uuid, Certification>,
    cvs: Vec<CvRecord>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_header(&self, header: Header) {
        self.inner.lock().unwrap().headers.push(header);
    }

    pub fn add_skill(&self, skill: Skill) {
        self.inner.lock().unwrap().skills.insert(skill.id, skill);
    }

    pub fn add_experience(&self, exp: Experience) {
        self.inner.lock().unwrap().experiences.insert(exp.id, exp);
    }

    pub fn add_project(&self, project: Project) {
        self.inner.lock().unwrap().projects.insert(project.id, project);
    }

    pub fn add_education(&self, edu: Education) {
        self.inner.lock().unwrap().education.insert(edu.id, edu);
    }

    pub fn add_certification(&self, cert: Certification) {
        self.inner
            .lock()
            .unwrap()
            .certifications
            .insert(cert.id, cert);
    }

    /// Number of aggregates currently flagged main; tests assert this is
    /// never above one after a sequential operation completes.
    pub fn main_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap()
            .cvs
            .iter()
            .filter(|cv| cv.main_cv)
            .count()
    }

    pub fn cv_count(&self) -> usize {
        self.inner.lock().unwrap().cvs.len()
    }
}

fn apply(record: &mut CvRecord, changes: &CvChanges) {
    if let Some(summary) = &changes.professional_summary {
        record.professional_summary = summary.clone();
    }
    if let Some(role) = &changes.role {
        record.role = Some(role.clone());
    }
    if let Some(main_cv) = changes.main_cv {
        record.main_cv = main_cv;
    }
    if let Some(ids) = &changes.skill_ids {
        record.skill_ids = ids.clone();
    }
    if let Some(ids) = &changes.experience_ids {
        record.experience_ids = ids.clone();
    }
    if let Some(ids) = &changes.project_ids {
        record.project_ids = ids.clone();
    }
    if let Some(ids) = &changes.education_ids {
        record.education_ids = ids.clone();
    }
    if let Some(ids) = &changes.certification_ids {
        record.certification_ids = ids.clone();
    }
    if let Some(languages) = &changes.languages {
        record.languages = languages.clone();
    }
    if let Some(interests) = &changes.interests {
        record.interests = interests.clone();
    }
    record.updated_at = Utc::now();
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn find_canonical_header(&self) -> Result<Option<Header>, AppError> {
        Ok(self.inner.lock().unwrap().headers.first().cloned())
    }

    async fn header_by_id(&self, id: Uuid) -> Result<Option<Header>, AppError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .headers
            .iter()
            .find(|h| h.id == id)
            .cloned())
    }

    async fn skills_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Skill>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(ids.iter().filter_map(|id| inner.skills.get(id).cloned()).collect())
    }

    async fn experiences_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Experience>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| inner.experiences.get(id).cloned())
            .collect())
    }

    async fn projects_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Project>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| inner.projects.get(id).cloned())
            .collect())
    }

    async fn education_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Education>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| inner.education.get(id).cloned())
            .collect())
    }

    async fn certifications_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Certification>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| inner.certifications.get(id).cloned())
            .collect())
    }

    async fn insert_cv(&self, record: &CvRecord) -> Result<(), AppError> {
        self.inner.lock().unwrap().cvs.push(record.clone());
        Ok(())
    }

    async fn cv_by_id(&self, id: Uuid) -> Result<Option<CvRecord>, AppError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .cvs
            .iter()
            .find(|cv| cv.id == id)
            .cloned())
    }

    async fn find_main_cv(&self) -> Result<Option<CvRecord>, AppError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .cvs
            .iter()
            .find(|cv| cv.main_cv)
            .cloned())
    }

    async fn list_cvs(&self) -> Result<Vec<CvRecord>, AppError> {
        let mut cvs = self.inner.lock().unwrap().cvs.clone();
        cvs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(cvs)
    }

    async fn update_cv(&self, id: Uuid, changes: CvChanges) -> Result<Option<CvRecord>, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(record) = inner.cvs.iter_mut().find(|cv| cv.id == id) else {
            return Ok(None);
        };
        apply(record, &changes);
        Ok(Some(record.clone()))
    }

    async fn promote_cv(&self, id: Uuid, changes: CvChanges) -> Result<Option<CvRecord>, AppError> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.cvs.iter().any(|cv| cv.id == id) {
            return Ok(None);
        }
        for cv in inner.cvs.iter_mut() {
            if cv.id != id && cv.main_cv {
                cv.main_cv = false;
                cv.updated_at = Utc::now();
            }
        }
        let record = inner.cvs.iter_mut().find(|cv| cv.id == id).unwrap();
        apply(record, &changes);
        record.main_cv = true;
        Ok(Some(record.clone()))
    }

    async fn delete_cv(&self, id: Uuid) -> Result<bool, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.cvs.len();
        inner.cvs.retain(|cv| cv.id != id);
        Ok(inner.cvs.len() < before)
    }
}
