//! Navigation controller: per-step validation gates, forward/backward moves,
//! strategy switches, and the document patch funnel.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::cv::{
    assign_ids, is_blank, CvDocument, EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry,
    Skills, Strategy,
};
use crate::wizard::session::WizardSession;
use crate::wizard::steps::{visible_steps, StepKey};

/// Result of a gated forward move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceOutcome {
    /// Moved one step forward.
    Moved,
    /// Already on the last step — the wizard cannot advance past it; the
    /// caller treats this as the submit trigger (save/export).
    Complete,
}

/// Whether the step at the session's active index is satisfied.
///
/// Only three steps gate progression: `Type` (always satisfied once a
/// default strategy exists), `Target` (strategy-dependent field required),
/// and `Personal` (four required fields). Everything else is optional.
pub fn can_advance(session: &WizardSession) -> bool {
    step_satisfied(session.current_step(), &session.doc)
}

fn step_satisfied(step: StepKey, doc: &CvDocument) -> bool {
    match step {
        StepKey::Type => true,
        StepKey::Target => match doc.strategy {
            Strategy::Role => !is_blank(&doc.target_role),
            Strategy::Job => !is_blank(&doc.job_description),
            Strategy::General => true,
        },
        StepKey::Personal => {
            !is_blank(&doc.personal.full_name)
                && !is_blank(&doc.personal.email)
                && !is_blank(&doc.personal.phone)
                && !is_blank(&doc.personal.location)
        }
        _ => true,
    }
}

/// Moves forward one step if the gate passes. Navigation simply does not
/// occur on a validation failure — no state changes.
pub fn advance(session: &mut WizardSession) -> Result<AdvanceOutcome, AppError> {
    if !can_advance(session) {
        return Err(AppError::Validation(validation_message(
            session.current_step(),
            session.strategy(),
        )));
    }
    if session.active_step_index + 1 < session.visible_steps.len() {
        session.active_step_index += 1;
        Ok(AdvanceOutcome::Moved)
    } else {
        Ok(AdvanceOutcome::Complete)
    }
}

/// Moves backward one step, floored at the first. Never gated.
pub fn retreat(session: &mut WizardSession) -> StepKey {
    session.active_step_index = session.active_step_index.saturating_sub(1);
    session.current_step()
}

/// Switches strategy, recomputes the visible step list, and re-clamps the
/// active index. Stale `target_role`/`job_description` values are kept so
/// switching back restores them.
pub fn on_strategy_change(session: &mut WizardSession, new_strategy: Strategy) {
    session.doc.strategy = new_strategy;
    session.visible_steps = visible_steps(new_strategy);
    session.clamp_index();
}

fn validation_message(step: StepKey, strategy: Strategy) -> String {
    match step {
        StepKey::Target => match strategy {
            Strategy::Role => "Target role is required".to_string(),
            Strategy::Job => "Job description is required".to_string(),
            Strategy::General => unreachable!("target step is always satisfied for general"),
        },
        StepKey::Personal => "Full name, email, phone, and location are required".to_string(),
        other => format!("Step {other:?} is incomplete"),
    }
}

/// Partial document update. Absent fields are left untouched; list sections
/// are replaced wholesale with fresh ids assigned to new entries.
#[derive(Debug, Default, Deserialize)]
pub struct DocumentPatch {
    pub target_role: Option<String>,
    pub job_description: Option<String>,
    pub personal: Option<PersonalInfo>,
    pub experience: Option<Vec<ExperienceEntry>>,
    pub education: Option<Vec<EducationEntry>>,
    pub skills: Option<Skills>,
    pub projects: Option<Vec<ProjectEntry>>,
}

/// Applies user edits to the session's document. This is the single entry
/// point for edit traffic; strategy changes go through
/// [`on_strategy_change`] because they also reshape the step list.
pub fn apply_patch(session: &mut WizardSession, patch: DocumentPatch) {
    if let Some(v) = patch.target_role {
        session.doc.target_role = v;
    }
    if let Some(v) = patch.job_description {
        session.doc.job_description = v;
    }
    if let Some(v) = patch.personal {
        session.doc.personal = v;
    }
    if let Some(mut entries) = patch.experience {
        assign_ids(&mut entries, &mut session.watermarks.experience);
        session.doc.experience = entries;
    }
    if let Some(mut entries) = patch.education {
        assign_ids(&mut entries, &mut session.watermarks.education);
        session.doc.education = entries;
    }
    if let Some(v) = patch.skills {
        session.doc.skills = v;
    }
    if let Some(mut entries) = patch.projects {
        assign_ids(&mut entries, &mut session.watermarks.projects);
        session.doc.projects = entries;
    }
}
