use std::path::{Path, PathBuf};

use crate::{Error, Plan, Result};

/// A plan file with both raw content and parsed plan.
pub struct PlanFile {
    path: PathBuf,
    content: String,
    plan: Plan,
}

impl PlanFile {
    /// Open and parse a plan file (JSON when the extension is `.json`).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let plan = if crate::is_json_path(&path) {
            Plan::from_json_str_with_filename(&content, &filename)?
        } else {
            Plan::from_str_with_filename(&content, &filename)?
        };

        Ok(Self {
            path,
            content,
            plan,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn into_plan(self) -> Plan {
        self.plan
    }

    /// Default output path: the plan path with a `.py` extension.
    pub fn default_output(&self) -> PathBuf {
        self.path.with_extension("py")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_open_toml_plan() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("module.toml");
        fs::write(&path, "imports = [\"os\"]\n").unwrap();

        let file = PlanFile::open(&path).unwrap();
        assert_eq!(file.path(), path);
        assert_eq!(file.content(), "imports = [\"os\"]\n");
        assert_eq!(file.plan().imports, vec!["os"]);
        assert_eq!(file.default_output(), temp.path().join("module.py"));
    }

    #[test]
    fn test_open_json_plan() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("module.json");
        fs::write(&path, r#"{"imports": ["sys"]}"#).unwrap();

        let file = PlanFile::open(&path).unwrap();
        assert_eq!(file.plan().imports, vec!["sys"]);
    }

    #[test]
    fn test_open_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.toml");

        let Err(err) = PlanFile::open(&path) else {
            panic!("expected an error");
        };
        match *err {
            Error::Io { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_error_names_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.toml");
        fs::write(&path, "imports = [\n").unwrap();

        let Err(err) = PlanFile::open(&path) else {
            panic!("expected an error");
        };
        assert!(matches!(*err, Error::Parse { .. }));
    }
}
