//! Discovery of the built-in service template.
//!
//! # Resolution order
//!
//! 1. **Explicit override**: `--template-dir` or `templates.root` in the
//!    config. Used as-is, even if it does not exist, so the generator can
//!    report the missing root.
//! 2. **`<executable-dir>/templates/service`**: the layout of a packaged
//!    release where the payload sits next to the `idp-lite` binary.
//! 3. **`<crate-dir>/templates/service`**: the payload in this crate's
//!    source tree, baked in at compile time. Covers `cargo run` and tests.
//!
//! If neither discovered candidate exists the compile-time path is returned
//! anyway and the generator fails with an I/O error naming it.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

/// Directory (relative to a templates dir) holding the service payload.
pub const SERVICE_TEMPLATE_DIR: &str = "service";

/// Payload location inside this crate's source tree.
pub fn bundled_template_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("templates")
        .join(SERVICE_TEMPLATE_DIR)
}

/// Pick the template root to generate from.
#[instrument(level = "debug")]
pub fn resolve_template_root(override_root: Option<&Path>) -> PathBuf {
    if let Some(root) = override_root {
        debug!(path = %root.display(), "using template root override");
        return root.to_path_buf();
    }

    for candidate in candidate_paths() {
        if candidate.is_dir() {
            debug!(path = %candidate.display(), "found template root");
            return candidate;
        }
        debug!(path = %candidate.display(), "template root candidate missing, skipping");
    }

    bundled_template_root()
}

/// Discovery candidates in priority order, override excluded.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(2);

    if let Some(exe_sibling) = exe_sibling_templates() {
        paths.push(exe_sibling);
    }
    paths.push(bundled_template_root());

    paths
}

/// `<directory of current executable>/templates/service`, or `None` if the
/// executable path cannot be determined.
fn exe_sibling_templates() -> Option<PathBuf> {
    std::env::current_exe().ok().and_then(|exe| {
        exe.parent()
            .map(|dir| dir.join("templates").join(SERVICE_TEMPLATE_DIR))
    })
}
