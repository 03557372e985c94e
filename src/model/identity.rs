use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for exhibitors (e.g. `tech-innovations`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityId(pub String);

impl From<&str> for IdentityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for IdentityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The exhibitor whose orders are being tracked.
///
/// Only `id` and `display_name` matter to synchronization: the remote endpoint is
/// keyed by display name. The remaining fields are presentation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: IdentityId,
    pub display_name: String,
    pub booth: String,
    pub company: String,
    pub avatar: String,
}

impl Identity {
    pub fn new(id: impl Into<IdentityId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            booth: String::new(),
            company: String::new(),
            avatar: String::new(),
        }
    }

    pub fn with_booth(mut self, booth: impl Into<String>) -> Self {
        self.booth = booth.into();
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }
}

/// The roster of exhibitors that may be selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityDirectory {
    entries: Vec<Identity>,
}

impl IdentityDirectory {
    pub fn new(entries: Vec<Identity>) -> Self {
        Self { entries }
    }

    pub fn find(&self, id: &IdentityId) -> Option<&Identity> {
        self.entries.iter().find(|identity| &identity.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Identity> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for IdentityDirectory {
    /// The show's registered exhibitors.
    fn default() -> Self {
        Self::new(vec![
            Identity::new("tech-innovations", "TechFlow Innovations")
                .with_booth("A-245")
                .with_company("Leading AI Solutions")
                .with_avatar("🚀"),
            Identity::new("green-energy", "GreenWave Energy")
                .with_booth("B-156")
                .with_company("Sustainable Power Systems")
                .with_avatar("⚡"),
            Identity::new("smart-health", "SmartHealth Corp")
                .with_booth("C-089")
                .with_company("Digital Healthcare")
                .with_avatar("🏥"),
            Identity::new("nano-systems", "NanoSys Industries")
                .with_booth("D-312")
                .with_company("Nanotechnology Solutions")
                .with_avatar("🔬"),
        ])
    }
}
