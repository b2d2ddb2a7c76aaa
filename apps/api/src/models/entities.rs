//! Referenced CV entities. Their CRUD lives outside this service; here they
//! are read-only payloads resolved during assembly.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubSkill {
    pub name: String,
    pub percentage: i16,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// A main skill with its sub-skills. The CV view renders only the main name
/// and the comma-joined sub-skill names; percentages and categories belong
/// to other views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub years_of_experience: Option<String>,
    #[serde(default)]
    pub sub_skills: Vec<SubSkill>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Experience {
    pub id: Uuid,
    pub job_title: String,
    pub company_name: String,
    pub company_url: Option<String>,
    pub location: String,
    /// Employment kind: "Remote" | "WFH" | "Client Location" | "WFO".
    pub employment_kind: String,
    pub start_date: String,
    pub end_date: String,
    /// Newline-separated; the template splits this into bullets.
    pub responsibilities: String,
    pub achievements: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technology {
    pub name: String,
    pub used_for: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub url: Option<String>,
    #[serde(default)]
    pub technologies: Vec<Technology>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Education {
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub duration: String,
    pub grade: Option<String>,
    pub coursework: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Certification {
    pub id: Uuid,
    pub name: String,
    pub institution: String,
    pub issued_on: Option<String>,
    pub description: Option<String>,
}
