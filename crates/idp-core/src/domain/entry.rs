//! Per-step traversal records and the run summary.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use super::classify::FileClass;

/// What kind of node a template entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File(FileClass),
}

/// A node discovered while walking the template tree.
///
/// Lives for one traversal step. `content` is populated only for files whose
/// content had to be read to classify them; binary files detected by
/// extension are never read.
#[derive(Debug, Clone)]
pub struct TemplateEntry {
    /// Path relative to the template root.
    pub relative: PathBuf,
    pub kind: EntryKind,
    pub content: Option<Vec<u8>>,
}

/// What the generator does with one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    CreateDir,
    RenderText,
    CopyBinary,
    /// A relocated file, always rendered as text.
    Relocate,
}

impl Operation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreateDir => "create-dir",
            Self::RenderText => "render-text",
            Self::CopyBinary => "copy-binary",
            Self::Relocate => "relocate",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One operation of a generation run, in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedEntry {
    pub operation: Operation,
    /// Template-relative source path.
    pub source: PathBuf,
    /// Target-relative destination path.
    pub destination: PathBuf,
}

/// Summary of a finished generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Absolute path of the generated service.
    pub target: PathBuf,
    pub directories: usize,
    pub text_files: usize,
    pub binary_files: usize,
    pub relocated: usize,
    /// Entries left out: excluded directories, reserved root entries, and
    /// nodes that are neither files nor directories.
    pub skipped: usize,
}

impl GenerationReport {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    /// Files written, including relocated ones.
    pub fn files_written(&self) -> usize {
        self.text_files + self.binary_files + self.relocated
    }

    pub(crate) fn record(&mut self, operation: Operation) {
        match operation {
            Operation::CreateDir => self.directories += 1,
            Operation::RenderText => self.text_files += 1,
            Operation::CopyBinary => self.binary_files += 1,
            Operation::Relocate => self.relocated += 1,
        }
    }
}
