//! One-shot prefill merge: backfills blank document fields from the
//! authenticated identity and the extended profile without ever clobbering
//! a user-entered value.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::cv::{is_blank, CvDocument};
use crate::models::profile::{ExtendedProfile, Identity};
use crate::state::AppState;
use crate::wizard::session::PrefillState;

/// Minimum proficiency (1–5 scale) for a profile skill to be pulled into
/// the technical skills string.
pub const MIN_SKILL_LEVEL: u8 = 3;

/// Assigns `src` into `dst` only when `dst` is blank after trimming and
/// `src` is not. Returns whether the field changed.
fn fill(dst: &mut String, src: &str) -> bool {
    if is_blank(dst) && !is_blank(src) {
        *dst = src.to_string();
        true
    } else {
        false
    }
}

fn fill_opt(dst: &mut String, src: Option<&str>) -> bool {
    src.map(|s| fill(dst, s)).unwrap_or(false)
}

/// Merges the primary identity source. Non-empty wins: fields the user has
/// already typed into are never touched.
pub fn merge_identity(doc: &mut CvDocument, identity: &Identity) {
    fill(&mut doc.personal.full_name, &identity.full_name);
    fill(&mut doc.personal.email, &identity.email);
}

/// Merges the extended profile. Covers the simple contact fields plus two
/// specialized merges: technical skills (proficiency-filtered, comma
/// joined) and the first education entry's degree.
pub fn merge_profile(doc: &mut CvDocument, profile: &ExtendedProfile) {
    fill_opt(&mut doc.personal.full_name, profile.full_name.as_deref());
    fill_opt(&mut doc.personal.email, profile.email.as_deref());
    fill_opt(&mut doc.personal.phone, profile.phone.as_deref());
    fill_opt(&mut doc.personal.location, profile.location.as_deref());
    fill_opt(&mut doc.personal.linkedin, profile.linkedin.as_deref());
    fill_opt(&mut doc.personal.github, profile.github.as_deref());
    fill_opt(&mut doc.personal.summary, profile.summary.as_deref());

    if is_blank(&doc.skills.technical) {
        let technical: Vec<&str> = profile
            .skills
            .iter()
            .filter(|s| s.level >= MIN_SKILL_LEVEL)
            .map(|s| s.name.as_str())
            .collect();
        if !technical.is_empty() {
            doc.skills.technical = technical.join(", ");
        }
    }

    // Highest-education backfill: degree only. Institution, location, and
    // date stay blank for the user to complete.
    if let Some(first) = doc.education.first_mut() {
        fill_opt(&mut first.degree, profile.education.as_deref());
    }
}

/// Runs the prefill merge for a session, at most once per session lifetime.
///
/// Repeat triggers (re-renders, double clicks) are no-ops once the guard
/// has left `NotAttempted`. The extended-profile fetch is best-effort: a
/// failure is logged and the merge completes with whatever the identity
/// source supplied — partial success is the expected outcome.
pub async fn run(state: &AppState, session_id: Uuid) -> Result<(), AppError> {
    let (identity, profile_id) = {
        let mut sessions = state.sessions.write().await;
        let session = sessions
            .get_mut(&session_id)
            .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;
        if session.prefill != PrefillState::NotAttempted {
            debug!("prefill already attempted for session {session_id}, skipping");
            return Ok(());
        }
        session.prefill = PrefillState::InProgress;
        (session.identity.clone(), session.profile_id.clone())
    };

    let profile = match profile_id.as_deref() {
        Some(id) => match state.profile.fetch(id).await {
            Ok(p) => Some(p),
            Err(e) => {
                warn!("extended profile fetch failed for session {session_id}: {e}");
                None
            }
        },
        None => None,
    };

    let mut sessions = state.sessions.write().await;
    if let Some(session) = sessions.get_mut(&session_id) {
        merge_identity(&mut session.doc, &identity);
        if let Some(profile) = &profile {
            merge_profile(&mut session.doc, profile);
        }
        session.prefill = PrefillState::Done;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::ProfileSkill;

    fn skill(name: &str, level: u8) -> ProfileSkill {
        ProfileSkill {
            name: name.to_string(),
            level,
        }
    }

    #[test]
    fn test_non_empty_field_wins_over_profile_value() {
        let mut doc = CvDocument::new();
        doc.personal.email = "a@b.com".to_string();

        let identity = Identity {
            full_name: "Jane Doe".to_string(),
            email: "x@y.com".to_string(),
        };
        merge_identity(&mut doc, &identity);

        assert_eq!(doc.personal.email, "a@b.com");
        assert_eq!(doc.personal.full_name, "Jane Doe");
    }

    #[test]
    fn test_whitespace_only_value_counts_as_blank() {
        let mut doc = CvDocument::new();
        doc.personal.phone = "   ".to_string();

        let profile = ExtendedProfile {
            phone: Some("+49 30 1234".to_string()),
            ..Default::default()
        };
        merge_profile(&mut doc, &profile);
        assert_eq!(doc.personal.phone, "+49 30 1234");
    }

    #[test]
    fn test_profile_never_overwrites_existing_contact_fields() {
        let mut doc = CvDocument::new();
        doc.personal.linkedin = "linkedin.com/in/me".to_string();
        doc.personal.summary = "Hand-written summary".to_string();

        let profile = ExtendedProfile {
            linkedin: Some("linkedin.com/in/other".to_string()),
            summary: Some("Generated summary".to_string()),
            github: Some("github.com/me".to_string()),
            ..Default::default()
        };
        merge_profile(&mut doc, &profile);

        assert_eq!(doc.personal.linkedin, "linkedin.com/in/me");
        assert_eq!(doc.personal.summary, "Hand-written summary");
        assert_eq!(doc.personal.github, "github.com/me");
    }

    #[test]
    fn test_technical_skills_filtered_by_proficiency_and_joined() {
        let mut doc = CvDocument::new();
        let profile = ExtendedProfile {
            skills: vec![
                skill("Rust", 5),
                skill("Excel", 2),
                skill("Postgres", 3),
                skill("Figma", 1),
            ],
            ..Default::default()
        };
        merge_profile(&mut doc, &profile);
        assert_eq!(doc.skills.technical, "Rust, Postgres");
    }

    #[test]
    fn test_technical_skills_untouched_when_already_set() {
        let mut doc = CvDocument::new();
        doc.skills.technical = "Go".to_string();
        let profile = ExtendedProfile {
            skills: vec![skill("Rust", 5)],
            ..Default::default()
        };
        merge_profile(&mut doc, &profile);
        assert_eq!(doc.skills.technical, "Go");
    }

    #[test]
    fn test_all_low_proficiency_skills_leave_field_blank() {
        let mut doc = CvDocument::new();
        let profile = ExtendedProfile {
            skills: vec![skill("Excel", 1), skill("Word", 2)],
            ..Default::default()
        };
        merge_profile(&mut doc, &profile);
        assert!(doc.skills.technical.is_empty());
    }

    #[test]
    fn test_education_degree_backfilled_only_when_blank() {
        let mut doc = CvDocument::new();
        let profile = ExtendedProfile {
            education: Some("B.Sc. Computer Science".to_string()),
            ..Default::default()
        };
        merge_profile(&mut doc, &profile);
        assert_eq!(doc.education[0].degree, "B.Sc. Computer Science");
        assert!(doc.education[0].institution.is_empty());
        assert!(doc.education[0].graduation_date.is_empty());

        // Second merge must not overwrite.
        let other = ExtendedProfile {
            education: Some("M.Sc. Data Science".to_string()),
            ..Default::default()
        };
        merge_profile(&mut doc, &other);
        assert_eq!(doc.education[0].degree, "B.Sc. Computer Science");
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut doc = CvDocument::new();
        let profile = ExtendedProfile {
            phone: Some("+1 555 0100".to_string()),
            location: Some("Remote".to_string()),
            skills: vec![skill("Rust", 4)],
            ..Default::default()
        };
        merge_profile(&mut doc, &profile);
        let first = doc.clone();
        merge_profile(&mut doc, &profile);
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&doc).unwrap()
        );
    }
}
