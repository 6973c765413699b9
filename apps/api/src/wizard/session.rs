use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::cv::{max_id, CvDocument, Strategy};
use crate::models::profile::Identity;
use crate::wizard::steps::{visible_steps, StepKey};

/// One-shot prefill guard. Kept as an explicit enum so the guard state is
/// inspectable in session views and unit tests rather than buried in a
/// captured flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefillState {
    NotAttempted,
    InProgress,
    Done,
}

/// Highest id ever assigned per list section. Watermarks only climb, so an
/// id freed by deleting its entry is never handed out again within the
/// session, even when the deleted entry held the current maximum.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdWatermarks {
    pub experience: i64,
    pub education: i64,
    pub projects: i64,
}

impl IdWatermarks {
    pub fn from_doc(doc: &CvDocument) -> Self {
        IdWatermarks {
            experience: max_id(&doc.experience),
            education: max_id(&doc.education),
            projects: max_id(&doc.projects),
        }
    }

    /// Raises each watermark to cover the ids now present in `doc`. Never
    /// lowers one — used after a document replacement (ingestion mapping)
    /// whose ids restart at 1.
    pub fn absorb(&mut self, doc: &CvDocument) {
        self.experience = self.experience.max(max_id(&doc.experience));
        self.education = self.education.max(max_id(&doc.education));
        self.projects = self.projects.max(max_id(&doc.projects));
    }
}

/// Runtime state for one editing session. Owns the `CvDocument` for its
/// lifetime; sessions live in memory only and die when the wizard exits.
/// Only the rendered document is persisted, via explicit save.
#[derive(Debug, Clone)]
pub struct WizardSession {
    pub id: Uuid,
    pub active_step_index: usize,
    pub visible_steps: Vec<StepKey>,
    pub prefill: PrefillState,
    pub identity: Identity,
    pub profile_id: Option<String>,
    pub doc: CvDocument,
    pub watermarks: IdWatermarks,
    pub created_at: DateTime<Utc>,
}

impl WizardSession {
    pub fn new(id: Uuid, identity: Identity, profile_id: Option<String>) -> Self {
        let doc = CvDocument::new();
        WizardSession {
            id,
            active_step_index: 0,
            visible_steps: visible_steps(doc.strategy),
            prefill: PrefillState::NotAttempted,
            identity,
            profile_id,
            watermarks: IdWatermarks::from_doc(&doc),
            doc,
            created_at: Utc::now(),
        }
    }

    /// The step the user is currently on. `active_step_index` is always
    /// clamped into range, so indexing cannot fail.
    pub fn current_step(&self) -> StepKey {
        self.visible_steps[self.active_step_index]
    }

    pub fn strategy(&self) -> Strategy {
        self.doc.strategy
    }

    /// Re-clamps the active index after `visible_steps` shrinks. When the
    /// index falls off the end it lands on the new last step, which can be a
    /// different logical step than the user was on — accepted quirk.
    pub fn clamp_index(&mut self) {
        if self.active_step_index >= self.visible_steps.len() {
            self.active_step_index = self.visible_steps.len() - 1;
        }
    }
}

/// In-memory session store shared through `AppState`.
pub type SessionStore = Arc<RwLock<HashMap<Uuid, WizardSession>>>;

pub fn new_session_store() -> SessionStore {
    Arc::new(RwLock::new(HashMap::new()))
}
