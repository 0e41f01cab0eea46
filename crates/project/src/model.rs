use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One file of a project snapshot, as the project store reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Base name of the file.
    #[serde(default)]
    pub name: String,
    /// Store-defined file type marker (usually `"file"`).
    #[serde(rename = "type", default)]
    pub file_type: String,
    #[serde(default)]
    pub contents: String,
    /// Path relative to the project root, `/`-separated.
    pub full_path: String,
    /// Last modification time in unix milliseconds.
    #[serde(default)]
    pub last_modified: u64,
}

/// Immutable view of a project at fetch time.
///
/// `app_files` is keyed by the store's internal file key. Callers should only rely on
/// [`FileRecord::full_path`]; the key ordering only fixes enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub preset: String,
    #[serde(default)]
    pub visibility: String,
    #[serde(default)]
    pub app_files: BTreeMap<String, FileRecord>,
}

impl ProjectSnapshot {
    /// Files in stored order.
    pub fn files(&self) -> impl Iterator<Item = &FileRecord> {
        self.app_files.values()
    }

    pub fn file_count(&self) -> usize {
        self.app_files.len()
    }

    /// All full paths, sorted.
    pub fn file_list(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.files().map(|f| f.full_path.clone()).collect();
        paths.sort();
        paths
    }

    /// Sorted full paths equal to `prefix` or located below it.
    ///
    /// A trailing `/` on `prefix` is accepted. An empty prefix selects every file.
    pub fn file_list_under(&self, prefix: &str) -> Vec<String> {
        let trimmed = prefix.trim_end_matches('/');
        if trimmed.is_empty() {
            return self.file_list();
        }
        let dir_prefix = format!("{trimmed}/");
        self.file_list()
            .into_iter()
            .filter(|path| path == trimmed || path.starts_with(&dir_prefix))
            .collect()
    }

    /// Looks a file up by its full path. `None` is the not-found result.
    pub fn file(&self, path: &str) -> Option<&FileRecord> {
        if let Some(record) = self.app_files.get(path) {
            if record.full_path == path {
                return Some(record);
            }
        }
        self.files().find(|f| f.full_path == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snapshot() -> ProjectSnapshot {
        serde_json::from_value(serde_json::json!({
            "id": 42,
            "title": "Starter",
            "description": null,
            "slug": "starter",
            "preset": "node",
            "visibility": "public",
            "appFiles": {
                "src/index.ts": {
                    "name": "index.ts",
                    "type": "file",
                    "contents": "export {}\n",
                    "fullPath": "src/index.ts",
                    "lastModified": 1700000000000u64
                },
                "k1": {
                    "name": "package.json",
                    "type": "file",
                    "contents": "{}",
                    "fullPath": "package.json",
                    "lastModified": 1
                },
                "k2": {
                    "name": "utils.ts",
                    "type": "file",
                    "contents": "",
                    "fullPath": "src/lib/utils.ts"
                }
            }
        }))
        .expect("snapshot json")
    }

    #[test]
    fn decodes_wire_shape() {
        let snap = snapshot();
        assert_eq!(snap.id, 42);
        assert_eq!(snap.description, None);
        assert_eq!(snap.file_count(), 3);
        let index = snap.file("src/index.ts").expect("index.ts");
        assert_eq!(index.file_type, "file");
        assert_eq!(index.last_modified, 1_700_000_000_000);
    }

    #[test]
    fn file_list_is_sorted_full_paths() {
        assert_eq!(
            snapshot().file_list(),
            vec!["package.json", "src/index.ts", "src/lib/utils.ts"]
        );
    }

    #[test]
    fn file_lookup_uses_full_path_not_key() {
        let snap = snapshot();
        assert_eq!(snap.file("package.json").map(|f| f.contents.as_str()), Some("{}"));
        assert!(snap.file("k1").is_none());
        assert!(snap.file("missing.ts").is_none());
    }

    #[test]
    fn file_list_under_matches_directory_prefix() {
        let snap = snapshot();
        assert_eq!(
            snap.file_list_under("src/"),
            vec!["src/index.ts", "src/lib/utils.ts"]
        );
        assert_eq!(snap.file_list_under("src/lib"), vec!["src/lib/utils.ts"]);
        assert_eq!(snap.file_list_under("package.json"), vec!["package.json"]);
        assert!(snap.file_list_under("sr").is_empty());
        assert_eq!(snap.file_list_under("").len(), 3);
    }
}
