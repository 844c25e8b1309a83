use crate::package::PackageRename;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of one directory relocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelocateOutcome {
    /// The old package directory was moved to its new location.
    Moved { from: PathBuf, to: PathBuf },
    /// No directory exists at the old package path under this root.
    SourceMissing(PathBuf),
}

/// Move the directory for the old package's path segments to the directory
/// for the new package's path segments.
///
/// This is a destructive overwrite, not a merge: anything already at the
/// destination is removed first. A missing source is a skip, not an error.
/// There is no rollback; a move failing partway leaves the tree partially
/// moved.
pub fn relocate_tree(root: &Path, rename: &PackageRename) -> Result<RelocateOutcome> {
    let from = root.join(rename.old_fragment());
    let to = root.join(rename.new_fragment());

    if !from.exists() {
        return Ok(RelocateOutcome::SourceMissing(from));
    }

    if to.starts_with(&from) {
        bail!(
            "destination {} is nested inside source {}",
            to.display(),
            from.display()
        );
    }

    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    if to.exists() {
        fs::remove_dir_all(&to)
            .with_context(|| format!("Failed to remove existing {}", to.display()))?;
    }

    move_dir(&from, &to)?;

    Ok(RelocateOutcome::Moved { from, to })
}

/// Move a directory, falling back to copy-and-delete when a plain rename
/// is not possible (source and destination on different filesystems).
fn move_dir(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }

    copy_dir_recursive(from, to)?;
    fs::remove_dir_all(from)
        .with_context(|| format!("Failed to remove {} after copying", from.display()))?;
    Ok(())
}

fn copy_dir_recursive(from: &Path, to: &Path) -> Result<()> {
    fs::create_dir_all(to).with_context(|| format!("Failed to create {}", to.display()))?;

    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let source = entry.path();
        let target = to.join(entry.file_name());

        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&source, &target)?;
        } else {
            fs::copy(&source, &target)
                .with_context(|| format!("Failed to copy {}", source.display()))?;
        }
    }

    Ok(())
}
