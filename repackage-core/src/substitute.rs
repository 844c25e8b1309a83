use crate::encoding;
use crate::package::PackageRename;
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use memmap2::Mmap;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Files above this size are streamed instead of memory-mapped.
const MMAP_THRESHOLD: u64 = 50 * 1024 * 1024;

/// Options for a substitution pass over one source root.
#[derive(Debug, Clone)]
pub struct SubstituteOptions {
    /// File-name glob patterns selecting the files to rewrite.
    pub file_patterns: Vec<String>,
}

impl Default for SubstituteOptions {
    fn default() -> Self {
        Self {
            file_patterns: vec!["*.java".to_string()],
        }
    }
}

/// Outcome of a substitution pass: which files changed and which could not
/// be decoded with any attempted encoding.
#[derive(Debug, Default)]
pub struct SubstituteReport {
    pub modified: Vec<PathBuf>,
    pub unreadable: Vec<PathBuf>,
    pub files_scanned: usize,
}

impl SubstituteReport {
    pub fn files_modified(&self) -> usize {
        self.modified.len()
    }
}

enum FileOutcome {
    Modified,
    Unchanged,
    Unreadable,
}

/// Walk `root` and replace every literal occurrence of the old package
/// identifier with the new one, rewriting matching files in place.
///
/// Files are rewritten only when their content actually changed, which
/// makes the pass idempotent. An undecodable file is recorded and skipped;
/// it never aborts the walk.
pub fn substitute_tree(
    root: &Path,
    rename: &PackageRename,
    options: &SubstituteOptions,
) -> Result<SubstituteReport> {
    let matcher = build_globset(&options.file_patterns)?;
    let mut report = SubstituteReport::default();

    let walker = configure_walker(root).build();
    for entry in walker {
        let Ok(entry) = entry else {
            continue;
        };

        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let path = entry.path();
        let Some(name) = path.file_name() else {
            continue;
        };
        if !matcher.is_match(name) {
            continue;
        }

        report.files_scanned += 1;
        match substitute_file(path, rename)? {
            FileOutcome::Modified => report.modified.push(path.to_path_buf()),
            FileOutcome::Unreadable => report.unreadable.push(path.to_path_buf()),
            FileOutcome::Unchanged => {},
        }
    }

    Ok(report)
}

/// A rename must reach every source file, so the walk respects no ignore
/// files and includes hidden entries.
fn configure_walker(root: &Path) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);
    builder
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .ignore(false)
        .parents(false)
        .hidden(false);
    builder
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

fn substitute_file(path: &Path, rename: &PackageRename) -> Result<FileOutcome> {
    let bytes = read_file_content(path)?;
    let Some((content, _)) = encoding::decode(&bytes) else {
        return Ok(FileOutcome::Unreadable);
    };

    let replaced = content.replace(rename.old_identifier(), rename.new_identifier());
    if replaced == content {
        return Ok(FileOutcome::Unchanged);
    }

    // Write-back is always in the primary encoding, even when the read
    // needed the fallback.
    write_file_content(path, replaced.as_bytes())?;
    Ok(FileOutcome::Modified)
}

fn read_file_content(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let metadata = file.metadata()?;

    if metadata.len() == 0 {
        // mmap rejects zero-length files
        return Ok(Vec::new());
    }

    if metadata.len() > MMAP_THRESHOLD {
        let mut content = Vec::new();
        File::open(path)?.read_to_end(&mut content)?;
        Ok(content)
    } else {
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(mmap.to_vec())
    }
}

/// Replace `path` atomically: write a temp file in the same directory,
/// carry over the original permissions, then rename it into place.
fn write_file_content(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = path.with_extension(format!("{}.repackage.tmp", std::process::id()));

    let original_permissions = fs::metadata(path)?.permissions();

    {
        let mut temp_file = File::create(&temp_path)?;
        temp_file.write_all(bytes)?;
        temp_file.sync_all()?; // fsync
    }

    fs::set_permissions(&temp_path, original_permissions)?;

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to atomically replace {}", path.display()))?;

    // Sync parent directory on Unix
    #[cfg(unix)]
    {
        if let Some(parent) = path.parent() {
            let dir = File::open(parent)?;
            dir.sync_all()?;
        }
    }

    Ok(())
}
