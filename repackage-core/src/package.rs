use anyhow::{bail, Result};
use std::path::PathBuf;

/// A package rename: a dot-separated identifier and its replacement.
///
/// Both identifiers must be well-formed (`a.b` form, each segment a Java
/// identifier) and must differ from each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRename {
    old: String,
    new: String,
}

impl PackageRename {
    pub fn new(old: &str, new: &str) -> Result<Self> {
        validate_identifier(old)?;
        validate_identifier(new)?;
        if old == new {
            bail!("old and new package identifiers are both {:?}", old);
        }
        Ok(Self {
            old: old.to_string(),
            new: new.to_string(),
        })
    }

    pub fn old_identifier(&self) -> &str {
        &self.old
    }

    pub fn new_identifier(&self) -> &str {
        &self.new
    }

    /// The old identifier as a relative path (`com.fxstore` -> `com/fxstore`).
    pub fn old_fragment(&self) -> PathBuf {
        fragment(&self.old)
    }

    /// The new identifier as a relative path.
    pub fn new_fragment(&self) -> PathBuf {
        fragment(&self.new)
    }
}

fn fragment(identifier: &str) -> PathBuf {
    identifier.split('.').collect()
}

fn validate_identifier(identifier: &str) -> Result<()> {
    if identifier.is_empty() {
        bail!("package identifier is empty");
    }
    for segment in identifier.split('.') {
        if segment.is_empty() {
            bail!(
                "package identifier {:?} contains an empty segment",
                identifier
            );
        }
        let valid = segment.chars().enumerate().all(|(i, c)| {
            if i == 0 {
                c.is_ascii_alphabetic() || c == '_' || c == '$'
            } else {
                c.is_ascii_alphanumeric() || c == '_' || c == '$'
            }
        });
        if !valid {
            bail!(
                "package identifier {:?} contains an invalid segment {:?}",
                identifier,
                segment
            );
        }
    }
    Ok(())
}
