//! CV template engine — a pure, deterministic `ComposedCv -> HTML` function.
//!
//! No I/O and no external calls: identical inputs produce byte-identical
//! markup, which keeps repeated renders of unchanged data reproducible.
//! Section order is fixed (header, summary, experience, projects, skills,
//! education, certifications, languages) and every section heading is
//! emitted only when its backing data is non-empty. All user-supplied text
//! is HTML-escaped here; nothing downstream re-sanitizes.

use std::fmt::Write;

use crate::models::cv::ComposedCv;
use crate::models::header::SocialLink;

const LINK_COLOR: &str = "#3b82f6";

/// Recognized social-link slots. `x` and `twitter` alias the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialKind {
    GitHub,
    LinkedIn,
    Website,
    X,
}

impl SocialKind {
    /// Case-insensitive match on the stored link name; unrecognized names
    /// map to `None` and are not rendered.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "github" => Some(SocialKind::GitHub),
            "linkedin" => Some(SocialKind::LinkedIn),
            "website" => Some(SocialKind::Website),
            "x" | "twitter" => Some(SocialKind::X),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            SocialKind::GitHub => "GitHub",
            SocialKind::LinkedIn => "LinkedIn",
            SocialKind::Website => "Portfolio",
            SocialKind::X => "X",
        }
    }
}

/// Social links normalized once into fixed slots; the first match in list
/// order wins per slot.
#[derive(Debug, Default)]
pub struct SocialLinks {
    github: Option<String>,
    linkedin: Option<String>,
    website: Option<String>,
    x: Option<String>,
}

impl SocialLinks {
    pub fn from_entries(entries: &[SocialLink]) -> Self {
        let mut links = SocialLinks::default();
        for entry in entries {
            let Some(kind) = SocialKind::from_name(&entry.name) else {
                continue;
            };
            let slot = match kind {
                SocialKind::GitHub => &mut links.github,
                SocialKind::LinkedIn => &mut links.linkedin,
                SocialKind::Website => &mut links.website,
                SocialKind::X => &mut links.x,
            };
            if slot.is_none() {
                *slot = Some(entry.url.clone());
            }
        }
        links
    }

    fn get(&self, kind: SocialKind) -> Option<&str> {
        match kind {
            SocialKind::GitHub => self.github.as_deref(),
            SocialKind::LinkedIn => self.linkedin.as_deref(),
            SocialKind::Website => self.website.as_deref(),
            SocialKind::X => self.x.as_deref(),
        }
    }
}

/// Escapes free text for embedding in element bodies and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn anchor(url: &str, text: &str) -> String {
    format!(r#"<a href="{}">{}</a>"#, escape_html(url), escape_html(text))
}

/// Renders the composed CV into the fixed single-page-flow HTML layout.
pub fn render_markup(cv: &ComposedCv) -> String {
    let mut html = String::with_capacity(8 * 1024);

    push_prelude(&mut html, &cv.header.full_name);
    push_header(&mut html, cv);
    push_summary(&mut html, &cv.professional_summary);
    push_experience(&mut html, cv);
    push_projects(&mut html, cv);
    push_skills(&mut html, cv);
    push_education(&mut html, cv);
    push_certifications(&mut html, cv);
    push_languages(&mut html, &cv.languages);

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn push_prelude(html: &mut String, full_name: &str) {
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8" />
<title>{} Resume</title>
<style>
  * {{ box-sizing: border-box; }}
  body {{
    font-family: Arial, Helvetica, sans-serif;
    font-size: 11px;
    line-height: 1.55;
    color: #1f2937;
    margin: 0;
    background: #ffffff;
  }}
  .container {{ width: 100%; }}
  a {{ color: {LINK_COLOR}; text-decoration: none; }}
  a:hover {{ text-decoration: underline; }}
  .header {{
    margin-bottom: 14px;
    border-bottom: 2px solid #e5e7eb;
    padding-bottom: 6px;
  }}
  .name {{ font-size: 26px; font-weight: 700; margin: 0; }}
  .title {{
    font-size: 13px;
    color: {LINK_COLOR};
    font-weight: 600;
    margin: 4px 0 6px;
  }}
  .contact {{ font-size: 10.5px; color: #374151; }}
  .contact span {{ margin-right: 10px; }}
  .section {{ margin-top: 12px; }}
  .section-title {{
    font-size: 12px;
    font-weight: 700;
    text-transform: uppercase;
    border-bottom: 1px solid #e5e7eb;
    margin-bottom: 6px;
    padding-bottom: 2px;
  }}
  .row {{ display: flex; justify-content: space-between; gap: 10px; }}
  .left {{ width: 75%; }}
  .right {{
    width: 25%;
    text-align: right;
    font-size: 10.5px;
    color: #374151;
    white-space: nowrap;
  }}
  ul {{ margin: 4px 0 6px 16px; padding: 0; }}
  li {{ margin-bottom: 3px; }}
  .sub {{ color: #4b5563; font-size: 10.6px; }}
</style>
</head>
<body>
<div class="container">
"#,
        escape_html(full_name)
    );
}

fn push_header(html: &mut String, cv: &ComposedCv) {
    let header = &cv.header;
    let _ = write!(
        html,
        r#"<div class="header">
  <div class="name">{}</div>
  <div class="title">{}</div>
  <div class="contact">
    <div style="display:flex; flex-wrap:wrap; gap:14px;">
"#,
        escape_html(&header.full_name),
        escape_html(&header.job_title)
    );
    if !header.email.is_empty() {
        let _ = writeln!(
            html,
            "      <span><strong>Email:</strong> {}</span>",
            escape_html(&header.email)
        );
    }
    if !header.phone.is_empty() {
        let _ = writeln!(
            html,
            "      <span><strong>Phone:</strong> {}</span>",
            escape_html(&header.phone)
        );
    }
    html.push_str("    </div>\n");
    html.push_str("    <div style=\"display:flex; flex-wrap:wrap; gap:14px; margin-top:4px;\">\n");

    let socials = SocialLinks::from_entries(&header.social_links);
    for kind in [
        SocialKind::GitHub,
        SocialKind::LinkedIn,
        SocialKind::Website,
        SocialKind::X,
    ] {
        if let Some(url) = socials.get(kind) {
            let _ = writeln!(
                html,
                "      <span><strong>{}:</strong> {}</span>",
                kind.label(),
                anchor(url, url)
            );
        }
    }
    html.push_str("    </div>\n  </div>\n</div>\n");
}

fn push_summary(html: &mut String, summary: &str) {
    if summary.is_empty() {
        return;
    }
    let _ = write!(
        html,
        r#"<div class="section">
  <div class="section-title">Professional Summary</div>
  <p>{}</p>
</div>
"#,
        escape_html(summary)
    );
}

fn push_experience(html: &mut String, cv: &ComposedCv) {
    if cv.experience.is_empty() {
        return;
    }
    html.push_str("<div class=\"section\">\n  <div class=\"section-title\">Experience</div>\n");
    for exp in &cv.experience {
        let company = match &exp.company_url {
            Some(url) => anchor(url, &exp.company_name),
            None => escape_html(&exp.company_name),
        };
        let _ = write!(
            html,
            r#"  <div class="row">
    <div class="left">
      <strong>{}</strong> — {}
      <div class="sub">{} | {}</div>
    </div>
    <div class="right">{} – {}</div>
  </div>
  <ul>
"#,
            escape_html(&exp.job_title),
            company,
            escape_html(&exp.location),
            escape_html(&exp.employment_kind),
            escape_html(&exp.start_date),
            escape_html(&exp.end_date)
        );
        for line in exp.responsibilities.lines().filter(|l| !l.trim().is_empty()) {
            let _ = writeln!(html, "    <li>{}</li>", escape_html(line));
        }
        html.push_str("  </ul>\n");
    }
    html.push_str("</div>\n");
}

fn push_projects(html: &mut String, cv: &ComposedCv) {
    if cv.projects.is_empty() {
        return;
    }
    html.push_str("<div class=\"section\">\n  <div class=\"section-title\">Projects</div>\n");
    for project in &cv.projects {
        let name = match &project.url {
            Some(url) => anchor(url, &project.name),
            None => escape_html(&project.name),
        };
        let tech = project
            .technologies
            .iter()
            .map(|t| escape_html(&t.name))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(html, "  <p><strong>{name}</strong>");
        if !tech.is_empty() {
            let _ = write!(html, " | {tech}");
        }
        let _ = write!(
            html,
            "</p>\n  <ul>\n    <li>{}</li>\n  </ul>\n",
            escape_html(&project.description)
        );
    }
    html.push_str("</div>\n");
}

fn push_skills(html: &mut String, cv: &ComposedCv) {
    if cv.skills.is_empty() {
        return;
    }
    html.push_str(
        "<div class=\"section\">\n  <div class=\"section-title\">Technical Skills</div>\n",
    );
    for skill in &cv.skills {
        // Only sub-skill names here; percentages and categories stay out of
        // the CV view.
        let subs = skill
            .sub_skills
            .iter()
            .map(|s| escape_html(&s.name))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            html,
            "  <p><strong>{}:</strong> {}</p>",
            escape_html(&skill.name),
            subs
        );
    }
    html.push_str("</div>\n");
}

fn push_education(html: &mut String, cv: &ComposedCv) {
    if cv.education.is_empty() {
        return;
    }
    html.push_str("<div class=\"section\">\n  <div class=\"section-title\">Education</div>\n");
    for edu in &cv.education {
        let _ = write!(
            html,
            r#"  <div class="row">
    <div class="left">
      <strong>{}</strong>
      <div class="sub">{}</div>
    </div>
    <div class="right">{}</div>
  </div>
"#,
            escape_html(&edu.institution),
            escape_html(&edu.degree),
            escape_html(&edu.duration)
        );
    }
    html.push_str("</div>\n");
}

fn push_certifications(html: &mut String, cv: &ComposedCv) {
    if cv.certifications.is_empty() {
        return;
    }
    html.push_str(
        "<div class=\"section\">\n  <div class=\"section-title\">Certifications</div>\n  <ul>\n",
    );
    for cert in &cv.certifications {
        let _ = writeln!(html, "    <li>{}</li>", escape_html(&cert.name));
    }
    html.push_str("  </ul>\n</div>\n");
}

fn push_languages(html: &mut String, languages: &[String]) {
    if languages.is_empty() {
        return;
    }
    let joined = languages
        .iter()
        .map(|l| escape_html(l))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = write!(
        html,
        r#"<div class="section">
  <div class="section-title">Languages</div>
  <p>{joined}</p>
</div>
"#
    );
}
