//! External parsed-resume schema and its mapping into `CvDocument`.
//!
//! Skill bucketing uses three independent substring predicates over curated
//! keyword lists. The buckets are deliberately not mutually exclusive: a
//! single skill string can land in more than one bucket. Whether that
//! overlap was intended by the original heuristic is ambiguous, so it is
//! preserved rather than forced exclusive — see the multi-bucket test.

use serde::{Deserialize, Serialize};

use crate::models::cv::{CvDocument, EducationEntry, ExperienceEntry, ProjectEntry};

// ────────────────────────────────────────────────────────────────────────────
// External schema (as returned by the parsing collaborator)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedExperience {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedEducation {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub graduation_date: String,
    #[serde(default)]
    pub gpa: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedResume {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub work_experience: Vec<ParsedExperience>,
    #[serde(default)]
    pub education: Vec<ParsedEducation>,
    #[serde(default)]
    pub skills: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Skill bucket predicates
// ────────────────────────────────────────────────────────────────────────────

const TECHNICAL_KEYWORDS: &[&str] = &[
    "python", "java", "javascript", "typescript", "rust", "c++", "c#", "golang", "sql", "react",
    "angular", "vue", "node", "django", "flask", "spring", "aws", "azure", "gcp", "docker",
    "kubernetes", "terraform", "git", "linux", "api", "html", "css", "data", "cloud", "devops",
    "machine learning", "tensorflow", "pytorch", "mongo", "postgres", "redis", "kafka",
];

const SOFT_KEYWORDS: &[&str] = &[
    "communication",
    "leadership",
    "teamwork",
    "management",
    "collaboration",
    "problem solving",
    "adaptability",
    "organization",
    "critical thinking",
    "time management",
    "mentoring",
    "negotiation",
    "presentation",
];

const LANGUAGE_KEYWORDS: &[&str] = &[
    "english",
    "spanish",
    "french",
    "german",
    "hindi",
    "mandarin",
    "chinese",
    "japanese",
    "portuguese",
    "arabic",
    "russian",
    "italian",
    "korean",
];

fn matches_any(skill: &str, keywords: &[&str]) -> bool {
    let lower = skill.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

pub fn is_technical_skill(skill: &str) -> bool {
    matches_any(skill, TECHNICAL_KEYWORDS)
}

pub fn is_soft_skill(skill: &str) -> bool {
    matches_any(skill, SOFT_KEYWORDS)
}

pub fn is_language_skill(skill: &str) -> bool {
    matches_any(skill, LANGUAGE_KEYWORDS)
}

fn bucket(skills: &[String], predicate: fn(&str) -> bool) -> String {
    skills
        .iter()
        .filter(|s| predicate(s))
        .map(|s| s.trim())
        .collect::<Vec<_>>()
        .join(", ")
}

// ────────────────────────────────────────────────────────────────────────────
// Mapping
// ────────────────────────────────────────────────────────────────────────────

/// Maps the external parsed schema into a fresh `CvDocument`. List entries
/// get 1-based sequential ids; skills are routed through the three bucket
/// predicates independently. Sections the parser returned nothing for are
/// seeded with one blank entry, same as a fresh document — the wizard
/// always shows at least one editable row per list.
pub fn map_parsed_resume(parsed: &ParsedResume) -> CvDocument {
    let mut doc = CvDocument::default();
    doc.personal.full_name = parsed.name.clone();
    doc.personal.summary = parsed.summary.clone();

    doc.experience = parsed
        .work_experience
        .iter()
        .enumerate()
        .map(|(i, e)| ExperienceEntry {
            id: i as i64 + 1,
            title: e.title.clone(),
            company: e.company.clone(),
            location: e.location.clone(),
            start_date: e.start_date.clone(),
            end_date: e.end_date.clone(),
            current: e.current,
            description: e.description.clone(),
        })
        .collect();

    doc.education = parsed
        .education
        .iter()
        .enumerate()
        .map(|(i, e)| EducationEntry {
            id: i as i64 + 1,
            degree: e.degree.clone(),
            institution: e.institution.clone(),
            location: e.location.clone(),
            graduation_date: e.graduation_date.clone(),
            gpa: e.gpa.clone(),
        })
        .collect();

    doc.skills.technical = bucket(&parsed.skills, is_technical_skill);
    doc.skills.soft = bucket(&parsed.skills, is_soft_skill);
    doc.skills.languages = bucket(&parsed.skills, is_language_skill);

    if doc.experience.is_empty() {
        doc.experience.push(ExperienceEntry {
            id: 1,
            ..Default::default()
        });
    }
    if doc.education.is_empty() {
        doc.education.push(EducationEntry {
            id: 1,
            ..Default::default()
        });
    }
    // The parser never returns projects; the section still gets its row.
    if doc.projects.is_empty() {
        doc.projects.push(ProjectEntry {
            id: 1,
            ..Default::default()
        });
    }

    doc
}
