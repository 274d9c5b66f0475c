//! Service Generator - main application orchestrator.
//!
//! This service coordinates one generation run:
//! 1. Validate the service name
//! 2. Resolve and prepare the target directory
//! 3. Walk the template tree, rendering text and copying binaries
//! 4. Apply relocation rules (the CI workflow file)
//!
//! Every step goes through the [`Filesystem`] port; the service holds no
//! state between runs.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, NodeType, PathState},
    },
    domain::{
        EntryKind, FileClass, GenerationReport, Operation, PlaceholderSet, PlannedEntry,
        RelocationRule, ServiceName, TemplateEntry, TemplateLayout, classify,
    },
    error::IdpResult,
};

/// How an already existing target directory is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TargetPolicy {
    /// Reuse the directory if it is empty.
    #[default]
    AllowEmpty,
    /// Fail with `TargetExists` if anything is at the path.
    RequireAbsent,
}

/// Input to [`ServiceGenerator::generate`] and [`ServiceGenerator::plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub service_name: String,
    /// Defaults to `./<service_name>`.
    pub out_dir: Option<PathBuf>,
    /// Defaults to the current time.
    pub generated_at: Option<DateTime<Utc>>,
    pub target_policy: TargetPolicy,
}

impl GenerateRequest {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            out_dir: None,
            generated_at: None,
            target_policy: TargetPolicy::default(),
        }
    }

    pub fn out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(out_dir.into());
        self
    }

    pub fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    pub fn target_policy(mut self, policy: TargetPolicy) -> Self {
        self.target_policy = policy;
        self
    }
}

/// Materializes the service template into a target directory.
pub struct ServiceGenerator {
    filesystem: Box<dyn Filesystem>,
    template_root: PathBuf,
    layout: TemplateLayout,
}

impl ServiceGenerator {
    /// Create a generator reading templates from `template_root`.
    ///
    /// Uses [`TemplateLayout::service`] until overridden with
    /// [`with_layout`](Self::with_layout).
    pub fn new(filesystem: Box<dyn Filesystem>, template_root: impl Into<PathBuf>) -> Self {
        Self {
            filesystem,
            template_root: template_root.into(),
            layout: TemplateLayout::service(),
        }
    }

    pub fn with_layout(mut self, layout: TemplateLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    /// Generate a service and return a summary including the absolute target.
    ///
    /// The target must be missing or an empty directory. The check and the
    /// creation are two separate filesystem calls: a concurrent writer
    /// touching the same path in between is not detected. Callers running
    /// several generations at once must give each a distinct target.
    ///
    /// A failure after the target was prepared leaves whatever was already
    /// written in place.
    #[instrument(
        skip_all,
        fields(
            service = %request.service_name,
            template_root = %self.template_root.display()
        )
    )]
    pub fn generate(&self, request: &GenerateRequest) -> IdpResult<GenerationReport> {
        // 1. Validate name before any filesystem access
        let name = ServiceName::parse(&request.service_name)?;

        // 2. Resolve target and check template root
        let target = self.resolve_target(&name, request.out_dir.as_deref())?;
        self.ensure_template_root(&target)?;

        // 3. Prepare target
        self.prepare_target(&target, request.target_policy, true)?;
        info!(target = %target.display(), "Target prepared");

        // 4. Placeholders
        let generated_at = request.generated_at.unwrap_or_else(Utc::now);
        let placeholders = PlaceholderSet::derive(&name, generated_at);

        // 5. Recursive copy
        let mut report = GenerationReport::new(&target);
        let mut walker = Walker::new(&*self.filesystem, &self.layout, &self.template_root);
        walker.walk(Path::new(""), 0, &mut |entry| {
            let operation = self.materialize(entry, &target, &placeholders)?;
            report.record(operation);
            Ok(())
        })?;
        report.skipped = walker.skipped;

        // 6. Relocated files
        for rule in self.layout.relocations() {
            self.relocate(rule, &target, &placeholders)?;
            report.record(Operation::Relocate);
        }

        info!(
            target = %target.display(),
            directories = report.directories,
            files = report.files_written(),
            skipped = report.skipped,
            "Service generated"
        );

        // 7. Done
        Ok(report)
    }

    /// Describe what [`generate`](Self::generate) would do, without writing.
    ///
    /// Runs the same validation and target checks (read-only) and walks the
    /// template with the same rules.
    #[instrument(skip_all, fields(service = %request.service_name))]
    pub fn plan(&self, request: &GenerateRequest) -> IdpResult<(PathBuf, Vec<PlannedEntry>)> {
        let name = ServiceName::parse(&request.service_name)?;
        let target = self.resolve_target(&name, request.out_dir.as_deref())?;
        self.ensure_template_root(&target)?;
        self.prepare_target(&target, request.target_policy, false)?;

        let mut planned = Vec::new();
        let mut walker = Walker::new(&*self.filesystem, &self.layout, &self.template_root);
        walker.walk(Path::new(""), 0, &mut |entry| {
            let operation = match entry.kind {
                EntryKind::Directory => Operation::CreateDir,
                EntryKind::File(FileClass::Text) => Operation::RenderText,
                EntryKind::File(FileClass::Binary) => Operation::CopyBinary,
            };
            planned.push(PlannedEntry {
                operation,
                destination: entry.relative.clone(),
                source: entry.relative,
            });
            Ok(())
        })?;

        for rule in self.layout.relocations() {
            let source = self.template_root.join(rule.source());
            if self.filesystem.probe(&source)? != PathState::File {
                return Err(ApplicationError::FilesystemError {
                    path: source,
                    reason: "relocation source is not a file".into(),
                }
                .into());
            }
            planned.push(PlannedEntry {
                operation: Operation::Relocate,
                source: rule.source().as_path().to_path_buf(),
                destination: rule.destination().as_path().to_path_buf(),
            });
        }

        debug!(entries = planned.len(), "Plan built");
        Ok((target, planned))
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn resolve_target(&self, name: &ServiceName, out_dir: Option<&Path>) -> IdpResult<PathBuf> {
        let requested = out_dir.unwrap_or_else(|| Path::new(name.as_str()));
        self.filesystem.absolute(requested)
    }

    /// The template root must be a directory that does not contain `target`;
    /// generating into the template would walk its own output.
    fn ensure_template_root(&self, target: &Path) -> IdpResult<()> {
        match self.filesystem.probe(&self.template_root)? {
            PathState::Directory { .. } => {}
            PathState::Missing => {
                return Err(ApplicationError::FilesystemError {
                    path: self.template_root.clone(),
                    reason: "template root does not exist".into(),
                }
                .into());
            }
            PathState::File => {
                return Err(ApplicationError::FilesystemError {
                    path: self.template_root.clone(),
                    reason: "template root is not a directory".into(),
                }
                .into());
            }
        }

        let root = self.filesystem.absolute(&self.template_root)?;
        if target.starts_with(&root) {
            return Err(ApplicationError::FilesystemError {
                path: target.to_path_buf(),
                reason: format!("target lies inside the template root {}", root.display()),
            }
            .into());
        }
        Ok(())
    }

    /// Check the target precondition and, if `create`, create a missing target.
    fn prepare_target(&self, target: &Path, policy: TargetPolicy, create: bool) -> IdpResult<()> {
        match self.filesystem.probe(target)? {
            PathState::Missing => {
                if create {
                    self.filesystem.create_dir_all(target)?;
                }
                Ok(())
            }
            PathState::File => Err(ApplicationError::TargetNotDirectory {
                path: target.to_path_buf(),
            }
            .into()),
            PathState::Directory { empty: false } => Err(ApplicationError::TargetNotEmpty {
                path: target.to_path_buf(),
            }
            .into()),
            PathState::Directory { empty: true } => match policy {
                TargetPolicy::AllowEmpty => Ok(()),
                TargetPolicy::RequireAbsent => Err(ApplicationError::TargetExists {
                    path: target.to_path_buf(),
                }
                .into()),
            },
        }
    }

    fn materialize(
        &self,
        entry: TemplateEntry,
        target: &Path,
        placeholders: &PlaceholderSet,
    ) -> IdpResult<Operation> {
        let destination = target.join(&entry.relative);

        match (entry.kind, entry.content) {
            (EntryKind::Directory, _) => {
                self.filesystem.create_dir_all(&destination)?;
                Ok(Operation::CreateDir)
            }
            (EntryKind::File(FileClass::Binary), Some(bytes)) => {
                self.filesystem.write(&destination, &bytes)?;
                Ok(Operation::CopyBinary)
            }
            (EntryKind::File(FileClass::Binary), None) => {
                let source = self.template_root.join(&entry.relative);
                self.filesystem.copy_file(&source, &destination)?;
                Ok(Operation::CopyBinary)
            }
            (EntryKind::File(FileClass::Text), content) => {
                let raw = match content {
                    Some(raw) => raw,
                    None => self
                        .filesystem
                        .read(&self.template_root.join(&entry.relative))?,
                };
                let rendered = placeholders.render_text(&raw);
                self.filesystem.write(&destination, rendered.as_bytes())?;
                Ok(Operation::RenderText)
            }
        }
    }

    fn relocate(
        &self,
        rule: &RelocationRule,
        target: &Path,
        placeholders: &PlaceholderSet,
    ) -> IdpResult<()> {
        let source = self.template_root.join(rule.source());
        let destination = target.join(rule.destination());

        let raw = self.filesystem.read(&source)?;
        let rendered = placeholders.render_text(&raw);

        if let Some(parent) = destination.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write(&destination, rendered.as_bytes())?;

        debug!(
            source = %rule.source(),
            destination = %rule.destination(),
            "Relocated file written"
        );
        Ok(())
    }
}

/// Depth-first, name-ordered traversal of a template tree.
struct Walker<'a> {
    filesystem: &'a dyn Filesystem,
    layout: &'a TemplateLayout,
    root: &'a Path,
    skipped: usize,
}

impl<'a> Walker<'a> {
    fn new(filesystem: &'a dyn Filesystem, layout: &'a TemplateLayout, root: &'a Path) -> Self {
        Self {
            filesystem,
            layout,
            root,
            skipped: 0,
        }
    }

    /// Visit every entry below `relative`; directories are visited before
    /// their children.
    fn walk(
        &mut self,
        relative: &Path,
        depth: usize,
        visit: &mut dyn FnMut(TemplateEntry) -> IdpResult<()>,
    ) -> IdpResult<()> {
        let entries = self.filesystem.list_dir(&self.root.join(relative))?;

        for entry in entries {
            let child = relative.join(&entry.name);

            if depth == 0 && self.layout.is_reserved_root_entry(&entry.name) {
                debug!(entry = %entry.name, "Reserved by a relocation rule");
                self.skipped += 1;
                continue;
            }

            match entry.node_type {
                NodeType::Directory if self.layout.is_excluded_dir(&entry.name) => {
                    debug!(path = %child.display(), "Excluded directory");
                    self.skipped += 1;
                }
                NodeType::Directory => {
                    visit(TemplateEntry {
                        relative: child.clone(),
                        kind: EntryKind::Directory,
                        content: None,
                    })?;
                    self.walk(&child, depth + 1, visit)?;
                }
                NodeType::File => {
                    let file = self.classify_file(child)?;
                    debug!(path = %file.relative.display(), kind = ?file.kind, "Template file");
                    visit(file)?;
                }
                NodeType::Other => {
                    warn!(path = %child.display(), "Skipping entry that is neither file nor directory");
                    self.skipped += 1;
                }
            }
        }

        Ok(())
    }

    fn classify_file(&self, relative: PathBuf) -> IdpResult<TemplateEntry> {
        if crate::domain::has_binary_extension(&relative) {
            return Ok(TemplateEntry {
                relative,
                kind: EntryKind::File(FileClass::Binary),
                content: None,
            });
        }

        let content = self.filesystem.read(&self.root.join(&relative))?;
        let class = classify(&relative, &content);
        Ok(TemplateEntry {
            relative,
            kind: EntryKind::File(class),
            content: Some(content),
        })
    }
}
