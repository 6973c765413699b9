//! The canonical CV aggregate edited by the wizard.
//!
//! A `CvDocument` is exclusively owned by one wizard session. All mutation
//! goes through the wizard controller, the prefill merger, or the ingestion
//! mapper — handlers never touch fields directly.

use serde::{Deserialize, Serialize};

/// CV assembly mode. Selects which optional step appears and which
/// validation applies at the target step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    General,
    Role,
    Job,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub github: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub id: i64,
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
pub struct EducationEntry {
    #[serde(default)]
    pub id: i64,
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
pub struct ProjectEntry {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub link: String,
}

/// Free-text, comma-separated skill strings — intentionally not structured
/// lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default)]
    pub technical: String,
    #[serde(default)]
    pub soft: String,
    #[serde(default)]
    pub languages: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CvDocument {
    #[serde(default)]
    pub strategy: Strategy,
    /// Required for progression only when `strategy` is `Role`. Never
    /// cleared on strategy switches; stale values may persist.
    #[serde(default)]
    pub target_role: String,
    /// Required for progression only when `strategy` is `Job`.
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub personal: PersonalInfo,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
}

impl CvDocument {
    /// A fresh document with one blank entry per list section. The wizard
    /// always shows at least one editable row; blank entries are treated as
    /// absent by the synthesizer.
    pub fn new() -> Self {
        CvDocument {
            experience: vec![ExperienceEntry {
                id: 1,
                ..Default::default()
            }],
            education: vec![EducationEntry {
                id: 1,
                ..Default::default()
            }],
            projects: vec![ProjectEntry {
                id: 1,
                ..Default::default()
            }],
            ..Default::default()
        }
    }
}

/// A list entry with a locally-unique positive id.
pub trait SectionEntry {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

impl SectionEntry for ExperienceEntry {
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl SectionEntry for EducationEntry {
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl SectionEntry for ProjectEntry {
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

/// Assigns ids to entries that carry none (id <= 0) and re-ids duplicates.
/// New ids come from `high_water`, the highest id ever used in this section
/// of the session. The watermark only climbs, so an id freed by deleting
/// its entry is never handed out again within the same session. Ids are
/// unique within their own list; they are not globally unique.
pub fn assign_ids<T: SectionEntry>(entries: &mut [T], high_water: &mut i64) {
    let mut seen: Vec<i64> = Vec::with_capacity(entries.len());
    for entry in entries.iter_mut() {
        let id = entry.id();
        if id <= 0 || seen.contains(&id) {
            *high_water += 1;
            entry.set_id(*high_water);
        } else {
            *high_water = (*high_water).max(id);
        }
        seen.push(entry.id());
    }
}

/// Highest id present in a section, 0 when empty.
pub fn max_id<T: SectionEntry>(entries: &[T]) -> i64 {
    entries.iter().map(|e| e.id()).max().unwrap_or(0)
}

/// Blank-after-trim check used by progression gates, the prefill merger,
/// and the synthesizer.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_seeds_one_blank_entry_per_list() {
        let doc = CvDocument::new();
        assert_eq!(doc.experience.len(), 1);
        assert_eq!(doc.education.len(), 1);
        assert_eq!(doc.projects.len(), 1);
        assert_eq!(doc.experience[0].id, 1);
        assert!(is_blank(&doc.experience[0].title));
    }

    fn exp(id: i64) -> ExperienceEntry {
        ExperienceEntry {
            id,
            ..Default::default()
        }
    }

    #[test]
    fn test_assign_ids_continues_from_watermark() {
        let mut high_water = 3;
        let mut entries = vec![exp(3), exp(0), exp(0)];
        assign_ids(&mut entries, &mut high_water);
        assert_eq!(entries[1].id, 4);
        assert_eq!(entries[2].id, 5);
        assert_eq!(high_water, 5);
    }

    #[test]
    fn test_assign_ids_never_reuses_a_deleted_id() {
        // Ids 1 and 2 were assigned earlier in the session; the id-2 entry
        // was deleted before this call. The newcomer must get 3, not 2.
        let mut high_water = 2;
        let mut entries = vec![exp(1), exp(0)];
        assign_ids(&mut entries, &mut high_water);
        assert_eq!(entries[1].id, 3);
        assert_eq!(high_water, 3);
    }

    #[test]
    fn test_assign_ids_reassigns_client_supplied_duplicates() {
        let mut high_water = 0;
        let mut entries = vec![exp(5), exp(5)];
        assign_ids(&mut entries, &mut high_water);
        assert_eq!(entries[0].id, 5);
        assert_eq!(entries[1].id, 6);
    }

    #[test]
    fn test_assign_ids_on_empty_list_is_noop() {
        let mut high_water = 4;
        let mut entries: Vec<ProjectEntry> = vec![];
        assign_ids(&mut entries, &mut high_water);
        assert!(entries.is_empty());
        assert_eq!(high_water, 4);
    }

    #[test]
    fn test_assign_ids_keeps_existing_ids_and_raises_watermark() {
        let mut high_water = 0;
        let mut entries = vec![
            EducationEntry {
                id: 1,
                ..Default::default()
            },
            EducationEntry {
                id: 7,
                ..Default::default()
            },
        ];
        assign_ids(&mut entries, &mut high_water);
        assert_eq!(entries[0].id, 1);
        assert_eq!(entries[1].id, 7);
        assert_eq!(high_water, 7);
    }

    #[test]
    fn test_max_id_is_zero_for_empty_section() {
        assert_eq!(max_id::<ProjectEntry>(&[]), 0);
        assert_eq!(max_id(&[exp(2), exp(9), exp(4)]), 9);
    }

    #[test]
    fn test_is_blank_treats_whitespace_as_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   \t\n"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn test_strategy_serde_snake_case() {
        assert_eq!(serde_json::to_string(&Strategy::General).unwrap(), "\"general\"");
        let s: Strategy = serde_json::from_str("\"job\"").unwrap();
        assert_eq!(s, Strategy::Job);
    }
}
