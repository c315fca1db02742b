//! Volume paths and table namespaces.
//!
//! A volume file lives at `<root>/<catalog>/<schema>/<volume>/<file_name>`;
//! the tables flattened from it are written into `<catalog>.<schema>`.
//! Both are immutable values handed to each operation.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Default root directory under which volumes live.
pub const DEFAULT_VOLUME_ROOT: &str = "/Volumes";

/// A file inside a catalog/schema/volume hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumePath {
    pub root: String,
    pub catalog: String,
    pub schema: String,
    pub volume: String,
    pub file_name: String,
}

/// The `catalog.schema` namespace tables are written into.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableNamespace {
    pub catalog: String,
    pub schema: String,
}

impl VolumePath {
    /// Parse `<root>/<catalog>/<schema>/<volume>/<file_name>`.
    ///
    /// Exactly four segments must follow `root`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPath`] if the path is outside `root` or has
    /// a different number of segments.
    pub fn parse(root: &str, path: &str) -> Result<Self, CoreError> {
        let root = normalize_root(root);
        let invalid = |reason: String| CoreError::InvalidPath {
            path: path.to_string(),
            root: root.to_string(),
            reason,
        };

        let rest = path
            .strip_prefix(root)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| invalid(format!("path is not under '{root}'")))?;

        let segments: Vec<&str> = rest.split('/').collect();
        let [catalog, schema, volume, file_name] = segments.as_slice() else {
            return Err(invalid(format!(
                "expected 4 segments after the root, found {}",
                segments.len()
            )));
        };

        for segment in &segments {
            validate_segment(segment).map_err(invalid)?;
        }

        Ok(Self {
            root: root.to_string(),
            catalog: (*catalog).to_string(),
            schema: (*schema).to_string(),
            volume: (*volume).to_string(),
            file_name: (*file_name).to_string(),
        })
    }

    /// Build a path from individual components, all of which are required.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingComponents`] naming every absent component,
    /// or [`CoreError::InvalidPath`] if a component is not a single segment.
    pub fn from_parts(
        root: &str,
        catalog: Option<&str>,
        schema: Option<&str>,
        volume: Option<&str>,
        file_name: Option<&str>,
    ) -> Result<Self, CoreError> {
        let parts = [
            ("catalog", catalog),
            ("schema", schema),
            ("volume", volume),
            ("file_name", file_name),
        ];
        let missing: Vec<&'static str> = parts
            .iter()
            .filter(|(_, value)| value.is_none_or(str::is_empty))
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(CoreError::MissingComponents { missing });
        }

        let [catalog, schema, volume, file_name] = parts.map(|(_, v)| v.unwrap_or_default());
        let path = Self {
            root: normalize_root(root).to_string(),
            catalog: catalog.to_string(),
            schema: schema.to_string(),
            volume: volume.to_string(),
            file_name: file_name.to_string(),
        };

        for segment in [catalog, schema, volume, file_name] {
            validate_segment(segment).map_err(|reason| CoreError::InvalidPath {
                path: path.to_string(),
                root: path.root.clone(),
                reason,
            })?;
        }
        Ok(path)
    }

    /// Directory of the volume (`<root>/<catalog>/<schema>/<volume>`).
    #[must_use]
    pub fn volume_dir(&self) -> PathBuf {
        let root = if self.root.is_empty() { "/" } else { self.root.as_str() };
        PathBuf::from(root)
            .join(&self.catalog)
            .join(&self.schema)
            .join(&self.volume)
    }

    /// Full filesystem path of the file.
    #[must_use]
    pub fn to_path_buf(&self) -> PathBuf {
        self.volume_dir().join(&self.file_name)
    }

    /// Namespace the flattened tables are written into.
    #[must_use]
    pub fn namespace(&self) -> TableNamespace {
        TableNamespace {
            catalog: self.catalog.clone(),
            schema: self.schema.clone(),
        }
    }
}

impl fmt::Display for VolumePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}",
            self.root, self.catalog, self.schema, self.volume, self.file_name
        )
    }
}

impl TableNamespace {
    #[must_use]
    pub fn new(catalog: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            catalog: catalog.into(),
            schema: schema.into(),
        }
    }

    /// Fully qualified table name: `catalog.schema.table`.
    #[must_use]
    pub fn qualified(&self, table: &str) -> String {
        format!("{}.{}.{table}", self.catalog, self.schema)
    }
}

impl fmt::Display for TableNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.catalog, self.schema)
    }
}

/// Strip trailing slashes. A bare `/` becomes the empty string.
fn normalize_root(root: &str) -> &str {
    root.trim_end_matches('/')
}

fn validate_segment(segment: &str) -> Result<(), String> {
    if segment.is_empty() {
        return Err("empty path segment".to_string());
    }
    if segment == "." || segment == ".." || segment.contains('/') || segment.contains('\\') {
        return Err(format!("'{segment}' is not a valid path segment"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn parses_four_segment_path() {
        let path = VolumePath::parse(DEFAULT_VOLUME_ROOT, "/Volumes/main/logistics/raw/ocel.json")
            .expect("valid path");
        assert_eq!(path.catalog, "main");
        assert_eq!(path.schema, "logistics");
        assert_eq!(path.volume, "raw");
        assert_eq!(path.file_name, "ocel.json");
        assert_eq!(path.to_string(), "/Volumes/main/logistics/raw/ocel.json");
    }

    #[rstest]
    #[case("/Volumes/main/logistics/ocel.json")]
    #[case("/Volumes/main/logistics/raw/nested/ocel.json")]
    #[case("/Volumes")]
    #[case("/Volumes/")]
    #[case("/Other/main/logistics/raw/ocel.json")]
    #[case("/Volumes/main//raw/ocel.json")]
    #[case("/Volumes/main/logistics/raw/")]
    #[case("/Volumesx/main/logistics/raw/ocel.json")]
    fn rejects_malformed_paths(#[case] input: &str) {
        let err = VolumePath::parse(DEFAULT_VOLUME_ROOT, input).unwrap_err();
        assert!(matches!(err, CoreError::InvalidPath { .. }), "{input}: {err}");
    }

    #[test]
    fn parse_accepts_custom_root_with_trailing_slash() {
        let path = VolumePath::parse("/tmp/volumes/", "/tmp/volumes/c/s/v/f.json").unwrap();
        assert_eq!(path.root, "/tmp/volumes");
        assert_eq!(
            path.to_path_buf(),
            PathBuf::from("/tmp/volumes/c/s/v/f.json")
        );
    }

    #[test]
    fn filesystem_root_stays_absolute() {
        let path = VolumePath::parse("/", "/c/s/v/f.json").unwrap();
        assert_eq!(path.to_path_buf(), PathBuf::from("/c/s/v/f.json"));
        assert_eq!(path.to_string(), "/c/s/v/f.json");
    }

    #[test]
    fn from_parts_builds_path() {
        let path = VolumePath::from_parts(
            DEFAULT_VOLUME_ROOT,
            Some("main"),
            Some("logistics"),
            Some("raw"),
            Some("ocel.json"),
        )
        .unwrap();
        assert_eq!(
            path,
            VolumePath::parse(DEFAULT_VOLUME_ROOT, "/Volumes/main/logistics/raw/ocel.json").unwrap()
        );
        assert_eq!(path.volume_dir(), PathBuf::from("/Volumes/main/logistics/raw"));
    }

    #[test]
    fn from_parts_reports_all_missing_components() {
        let err = VolumePath::from_parts(DEFAULT_VOLUME_ROOT, Some("main"), None, Some(""), None)
            .unwrap_err();
        match err {
            CoreError::MissingComponents { missing } => {
                assert_eq!(missing, vec!["schema", "volume", "file_name"]);
            }
            other => panic!("expected missing components, got {other:?}"),
        }
    }

    #[test]
    fn from_parts_rejects_nested_component() {
        let err = VolumePath::from_parts(
            DEFAULT_VOLUME_ROOT,
            Some("main"),
            Some("a/b"),
            Some("raw"),
            Some("ocel.json"),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidPath { .. }));
    }

    #[test]
    fn namespace_qualifies_tables() {
        let path = VolumePath::parse(DEFAULT_VOLUME_ROOT, "/Volumes/main/logistics/raw/ocel.json")
            .unwrap();
        let ns = path.namespace();
        assert_eq!(ns.to_string(), "main.logistics");
        assert_eq!(ns.qualified("events"), "main.logistics.events");
    }
}
