//! PostgreSQL implementation of the Entity Store.
//!
//! CV aggregates live in `cvs` with relation id lists as uuid arrays;
//! nested entity structures (location, social links, sub-skills,
//! technologies) are jsonb. A partial unique index on `cvs (main_cv) WHERE
//! main_cv` backstops the main-CV invariant at the schema level, and
//! `promote_cv` runs demote-then-set inside one transaction so a reader can
//! never observe two main CVs.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::cv::{CvChanges, CvRecord};
use crate::models::entities::{
    Certification, Education, Experience, Project, Skill, SubSkill, Technology,
};
use crate::models::header::{Header, Location, SocialLink};
use crate::store::EntityStore;

pub struct PgEntityStore {
    pool: PgPool,
}

impl PgEntityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct HeaderRow {
    id: Uuid,
    full_name: String,
    phone: String,
    email: String,
    job_title: String,
    location: Option<Json<Location>>,
    social_links: Json<Vec<SocialLink>>,
}

impl From<HeaderRow> for Header {
    fn from(row: HeaderRow) -> Self {
        Header {
            id: row.id,
            full_name: row.full_name,
            phone: row.phone,
            email: row.email,
            job_title: row.job_title,
            location: row.location.map(|l| l.0),
            social_links: row.social_links.0,
        }
    }
}

#[derive(FromRow)]
struct SkillRow {
    id: Uuid,
    name: String,
    years_of_experience: Option<String>,
    sub_skills: Json<Vec<SubSkill>>,
}

impl From<SkillRow> for Skill {
    fn from(row: SkillRow) -> Self {
        Skill {
            id: row.id,
            name: row.name,
            years_of_experience: row.years_of_experience,
            sub_skills: row.sub_skills.0,
        }
    }
}

#[derive(FromRow)]
struct ProjectRow {
    id: Uuid,
    name: String,
    description: String,
    url: Option<String>,
    technologies: Json<Vec<Technology>>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            name: row.name,
            description: row.description,
            url: row.url,
            technologies: row.technologies.0,
        }
    }
}

const UPDATE_CV_SQL: &str = r#"
    UPDATE cvs SET
        professional_summary = COALESCE($2, professional_summary),
        role                 = COALESCE($3, role),
        main_cv              = COALESCE($4, main_cv),
        skill_ids            = COALESCE($5, skill_ids),
        experience_ids       = COALESCE($6, experience_ids),
        project_ids          = COALESCE($7, project_ids),
        education_ids        = COALESCE($8, education_ids),
        certification_ids    = COALESCE($9, certification_ids),
        languages            = COALESCE($10, languages),
        interests            = COALESCE($11, interests),
        updated_at           = now()
    WHERE id = $1
    RETURNING *
"#;

fn bind_changes<'q>(
    query: sqlx::query::QueryAs<'q, sqlx::Postgres, CvRecord, sqlx::postgres::PgArguments>,
    id: Uuid,
    main_cv: Option<bool>,
    changes: &'q CvChanges,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, CvRecord, sqlx::postgres::PgArguments> {
    query
        .bind(id)
        .bind(changes.professional_summary.as_deref())
        .bind(changes.role.as_deref())
        .bind(main_cv)
        .bind(changes.skill_ids.as_deref())
        .bind(changes.experience_ids.as_deref())
        .bind(changes.project_ids.as_deref())
        .bind(changes.education_ids.as_deref())
        .bind(changes.certification_ids.as_deref())
        .bind(changes.languages.as_deref())
        .bind(changes.interests.as_deref())
}

#[async_trait]
impl EntityStore for PgEntityStore {
    async fn find_canonical_header(&self) -> Result<Option<Header>, AppError> {
        let row = sqlx::query_as::<_, HeaderRow>(
            "SELECT id, full_name, phone, email, job_title, location, social_links
             FROM headers ORDER BY created_at ASC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Header::from))
    }

    async fn header_by_id(&self, id: Uuid) -> Result<Option<Header>, AppError> {
        let row = sqlx::query_as::<_, HeaderRow>(
            "SELECT id, full_name, phone, email, job_title, location, social_links
             FROM headers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Header::from))
    }

    async fn skills_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Skill>, AppError> {
        let rows = sqlx::query_as::<_, SkillRow>(
            "SELECT id, name, years_of_experience, sub_skills
             FROM skills WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Skill::from).collect())
    }

    async fn experiences_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Experience>, AppError> {
        Ok(sqlx::query_as::<_, Experience>(
            "SELECT id, job_title, company_name, company_url, location, employment_kind,
                    start_date, end_date, responsibilities, achievements
             FROM experiences WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn projects_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Project>, AppError> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            "SELECT id, name, description, url, technologies
             FROM projects WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn education_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Education>, AppError> {
        Ok(sqlx::query_as::<_, Education>(
            "SELECT id, institution, degree, duration, grade, coursework
             FROM education WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn certifications_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Certification>, AppError> {
        Ok(sqlx::query_as::<_, Certification>(
            "SELECT id, name, institution, issued_on, description
             FROM certifications WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn insert_cv(&self, record: &CvRecord) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO cvs
                (id, header_id, professional_summary, role, main_cv,
                 skill_ids, experience_ids, project_ids, education_ids,
                 certification_ids, languages, interests, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(record.id)
        .bind(record.header_id)
        .bind(&record.professional_summary)
        .bind(record.role.as_deref())
        .bind(record.main_cv)
        .bind(&record.skill_ids)
        .bind(&record.experience_ids)
        .bind(&record.project_ids)
        .bind(&record.education_ids)
        .bind(&record.certification_ids)
        .bind(&record.languages)
        .bind(&record.interests)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn cv_by_id(&self, id: Uuid) -> Result<Option<CvRecord>, AppError> {
        Ok(sqlx::query_as::<_, CvRecord>("SELECT * FROM cvs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_main_cv(&self) -> Result<Option<CvRecord>, AppError> {
        Ok(
            sqlx::query_as::<_, CvRecord>("SELECT * FROM cvs WHERE main_cv LIMIT 1")
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list_cvs(&self) -> Result<Vec<CvRecord>, AppError> {
        Ok(
            sqlx::query_as::<_, CvRecord>("SELECT * FROM cvs ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn update_cv(&self, id: Uuid, changes: CvChanges) -> Result<Option<CvRecord>, AppError> {
        let query = sqlx::query_as::<_, CvRecord>(UPDATE_CV_SQL);
        Ok(bind_changes(query, id, changes.main_cv, &changes)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn promote_cv(&self, id: Uuid, changes: CvChanges) -> Result<Option<CvRecord>, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE cvs SET main_cv = FALSE, updated_at = now() WHERE main_cv AND id <> $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let query = sqlx::query_as::<_, CvRecord>(UPDATE_CV_SQL);
        let updated = bind_changes(query, id, Some(true), &changes)
            .fetch_optional(&mut *tx)
            .await?;

        match updated {
            Some(record) => {
                tx.commit().await?;
                Ok(Some(record))
            }
            None => {
                // Unknown target: leave the existing main CV untouched.
                tx.rollback().await?;
                Ok(None)
            }
        }
    }

    async fn delete_cv(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM cvs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
