use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Optional location block on the profile header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub city: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

/// One social-media entry as stored: a free-text name ("GitHub", "x", ...)
/// plus a URL. Name matching is normalized at render time via
/// `template::SocialKind`, never re-matched ad hoc.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

/// The profile header. Exactly one header is treated as canonical; CV
/// creation resolves it read-only and fails with NotFound when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub job_title: String,
    pub location: Option<Location>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}
