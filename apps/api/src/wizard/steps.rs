//! Static step catalog and the strategy → visible-steps function.

use serde::{Deserialize, Serialize};

use crate::models::cv::Strategy;

/// Every step the wizard can show, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKey {
    Type,
    Target,
    Personal,
    Experience,
    Education,
    Skills,
    Projects,
    Summary,
    Preview,
}

/// Computes the ordered list of steps visible for a strategy.
///
/// `Target` appears only for `Role` and `Job`; its presence shifts the index
/// of every later step, so callers must recompute (never cache) this list
/// whenever the strategy changes.
pub fn visible_steps(strategy: Strategy) -> Vec<StepKey> {
    let mut steps = vec![StepKey::Type];
    if strategy != Strategy::General {
        steps.push(StepKey::Target);
    }
    steps.extend([
        StepKey::Personal,
        StepKey::Experience,
        StepKey::Education,
        StepKey::Skills,
        StepKey::Projects,
        StepKey::Summary,
        StepKey::Preview,
    ]);
    steps
}
