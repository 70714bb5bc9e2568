use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use serde::Deserialize;

/// Open the destination for a generated file according to its rules.
///
/// Parent directories are created as needed. Returns `Ok(None)` when the
/// rules say the existing file must be left alone.
pub fn open_destination(path: &Path, rules: &FileRules) -> io::Result<Option<BufWriter<File>>> {
    if rules.overwrite == Overwrite::IfMissing && path.exists() {
        return Ok(None);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    Ok(Some(BufWriter::new(file)))
}

/// Write finished content to `path` according to its rules.
///
/// The destination is only opened (and truncated) once the content exists,
/// so a generation step that fails beforehand leaves the file untouched.
pub fn write_destination(path: &Path, rules: &FileRules, content: &[u8]) -> io::Result<WriteResult> {
    let Some(mut writer) = open_destination(path, rules)? else {
        return Ok(WriteResult::Skipped);
    };
    writer.write_all(content)?;
    writer.flush()?;
    Ok(WriteResult::Written)
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// Nothing was written (file kept, or output already written)
    Skipped,
}

/// Rules that determine how a file should be written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileRules {
    pub overwrite: Overwrite,
    /// Comment line placed at the very top of the file.
    pub header: Option<String>,
}

impl FileRules {
    /// Rules that never replace an existing file.
    pub fn if_missing() -> Self {
        Self {
            overwrite: Overwrite::IfMissing,
            header: None,
        }
    }

    /// Set the header comment.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Overwrite {
    /// Always overwrite (generated code)
    #[default]
    Always,
    /// Only create if file doesn't exist
    IfMissing,
}
