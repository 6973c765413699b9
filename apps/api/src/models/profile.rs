use serde::{Deserialize, Serialize};

/// Minimal identity supplied by the authenticated session at wizard start.
/// This is the primary prefill source; the extended profile below is the
/// best-effort secondary one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
}

/// A named skill with a 1–5 proficiency level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSkill {
    pub name: String,
    pub level: u8,
}

/// Extended profile returned by the profile collaborator. Every field is
/// optional — the merger takes whatever is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtendedProfile {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Vec<ProfileSkill>,
    /// Single free-text "highest education" line, e.g. "B.Tech in CSE".
    pub education: Option<String>,
}
