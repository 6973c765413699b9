//! Scoring payload returned by the analysis collaborator. Read-only once
//! produced — nothing in this service mutates an `AnalysisResult`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: u32,
    #[serde(default)]
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisCategories {
    pub formatting: CategoryScore,
    pub content: CategoryScore,
    pub keywords: CategoryScore,
    pub experience: CategoryScore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Overall score, 0–100.
    pub score: u32,
    /// ATS compatibility score, 0–100.
    pub ats_score: u32,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    pub categories: AnalysisCategories,
}
