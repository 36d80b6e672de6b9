//! Data Model: CatalogEntry, CatalogDocument, QuerySpec, Resolution
use serde::{Deserialize, Serialize};

/// Public record shape of one build artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Language name (ex: "node")
    pub name: String,
    /// Dotted numeric version (ex: "20.11.1")
    pub version: String,
    /// Target platform (ex: "linux")
    pub platform: String,
    /// Target CPU architecture (ex: "x64")
    pub arch: String,
    /// Download location
    pub url: String,
}

impl CatalogEntry {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        platform: impl Into<String>,
        arch: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            platform: platform.into(),
            arch: arch.into(),
            url: url.into(),
        }
    }
}

/// A catalog entry as the store holds it, with its internal identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub entry: CatalogEntry,
}

impl CatalogDocument {
    /// Drop the storage identifier, keeping only the public record.
    pub fn into_entry(self) -> CatalogEntry {
        self.entry
    }
}

/// Partial key over {name, version, platform, arch}.
///
/// `None` leaves a field unbound. `Some(value)` requires an exact match,
/// including `Some("")`, which matches nothing in a well-formed catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
}

impl QuerySpec {
    /// Build a spec from whichever parameters the caller supplied.
    pub fn from_params(
        name: Option<&str>,
        version: Option<&str>,
        platform: Option<&str>,
        arch: Option<&str>,
    ) -> Self {
        Self {
            name: name.map(str::to_string),
            version: version.map(str::to_string),
            platform: platform.map(str::to_string),
            arch: arch.map(str::to_string),
        }
    }

    /// Spec that enumerates the whole catalog.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn with_arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = Some(arch.into());
        self
    }

    /// Number of bound fields.
    pub fn bound_count(&self) -> usize {
        [&self.name, &self.version, &self.platform, &self.arch]
            .iter()
            .filter(|f| f.is_some())
            .count()
    }

    pub fn is_unbound(&self) -> bool {
        self.bound_count() == 0
    }

    /// All four fields bound: the caller wants exactly one record.
    pub fn is_fully_bound(&self) -> bool {
        self.bound_count() == 4
    }

    /// Equality match on bound fields only.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        fn field_ok(bound: &Option<String>, value: &str) -> bool {
            bound.as_deref().map_or(true, |b| b == value)
        }

        field_ok(&self.name, &entry.name)
            && field_ok(&self.version, &entry.version)
            && field_ok(&self.platform, &entry.platform)
            && field_ok(&self.arch, &entry.arch)
    }
}

/// Response shape of a resolved query.
///
/// Serializes as a JSON object, a JSON array, or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Resolution {
    One(CatalogEntry),
    Many(Vec<CatalogEntry>),
    Absent,
}

impl Resolution {
    /// Entries carried by this resolution, in order.
    pub fn entries(&self) -> &[CatalogEntry] {
        match self {
            Self::One(entry) => std::slice::from_ref(entry),
            Self::Many(entries) => entries,
            Self::Absent => &[],
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(version: &str, platform: &str, arch: &str) -> CatalogEntry {
        CatalogEntry::new("node", version, platform, arch, "https://example.invalid/node")
    }

    #[test]
    fn test_unbound_fields_match_anything() {
        let spec = QuerySpec::all().with_name("node");
        assert!(spec.matches(&node("1.0.0", "linux", "x64")));
        assert!(spec.matches(&node("2.0.0", "darwin", "arm64")));
        assert!(!spec.matches(&CatalogEntry::new("go", "1.0.0", "linux", "x64", "u")));
    }

    #[test]
    fn test_empty_value_stays_bound() {
        let spec = QuerySpec::from_params(Some(""), None, None, None);
        assert_eq!(spec.bound_count(), 1);
        assert!(!spec.matches(&node("1.0.0", "linux", "x64")));
    }

    #[test]
    fn test_fully_bound() {
        let spec = QuerySpec::from_params(Some("node"), Some("1.0.0"), Some("linux"), Some("x64"));
        assert!(spec.is_fully_bound());
        assert!(!QuerySpec::all().with_name("node").is_fully_bound());
        assert!(QuerySpec::all().is_unbound());
    }

    #[test]
    fn test_document_id_is_stripped() {
        let doc: CatalogDocument = serde_json::from_str(
            r#"{"_id":"abc","name":"node","version":"1.0.0","platform":"linux","arch":"x64","url":"u"}"#,
        )
        .unwrap();
        assert_eq!(doc.id, "abc");

        let json = serde_json::to_value(doc.into_entry()).unwrap();
        assert!(json.get("_id").is_none());
        assert_eq!(json["name"], "node");
    }

    #[test]
    fn test_resolution_serialization() {
        let one = Resolution::One(node("1.0.0", "linux", "x64"));
        assert!(serde_json::to_value(&one).unwrap().is_object());

        let many = Resolution::Many(vec![]);
        assert_eq!(serde_json::to_string(&many).unwrap(), "[]");

        assert_eq!(serde_json::to_string(&Resolution::Absent).unwrap(), "null");
    }
}
