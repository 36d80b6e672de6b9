//! Result Filter: platform/arch predicates applied after the store lookup
use crate::data_model::CatalogEntry;
use serde::{Deserialize, Serialize};

/// Optional secondary constraints on platform and arch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultFilter {
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub arch: Option<String>,
}

impl ResultFilter {
    /// Filter that passes everything through.
    pub fn none() -> Self {
        Self::default()
    }

    /// Build from raw query-string values. Empty values count as absent.
    pub fn from_query(platform: Option<&str>, arch: Option<&str>) -> Self {
        let present = |v: Option<&str>| v.filter(|s| !s.is_empty()).map(str::to_string);
        Self {
            platform: present(platform),
            arch: present(arch),
        }
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn with_arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = Some(arch.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.platform.is_none() && self.arch.is_none()
    }

    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        if let Some(platform) = &self.platform {
            if entry.platform != *platform {
                return false;
            }
        }
        if let Some(arch) = &self.arch {
            if entry.arch != *arch {
                return false;
            }
        }
        true
    }

    /// Keep only matching candidates.
    pub fn apply(&self, mut candidates: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
        if self.is_empty() {
            return candidates;
        }
        candidates.retain(|entry| self.matches(entry));
        candidates
    }
}
