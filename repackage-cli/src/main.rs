use anyhow::{Context, Result};
use repackage_core::{
    relocate_tree, substitute_tree, PackageRename, RelocateOutcome, SubstituteOptions,
};
use std::env;
use std::path::PathBuf;
use std::process;

/// The one rename this tool performs.
const OLD_PACKAGE: &str = "com.fxstore";
const NEW_PACKAGE: &str = "com.snoworca.fxstore";

/// Source roots holding the package directories, relative to the project
/// root the tool is run from.
const SOURCE_ROOTS: [&[&str]; 2] = [&["src", "main", "java"], &["src", "test", "java"]];

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let base_dir = env::current_dir().context("Failed to resolve working directory")?;
    let rename = PackageRename::new(OLD_PACKAGE, NEW_PACKAGE)?;
    let options = SubstituteOptions::default();

    let roots: Vec<PathBuf> = SOURCE_ROOTS
        .iter()
        .map(|components| base_dir.join(components.iter().collect::<PathBuf>()))
        .collect();

    print_banner(&format!(
        "Package Rename: {} -> {}",
        rename.old_identifier(),
        rename.new_identifier()
    ));

    // Substitution must finish over every root before any relocation:
    // moving the package directories changes the paths the walker visits.
    println!("\n[Step 1] Replacing package references in Java files...");

    let mut total_modified = 0;
    for root in &roots {
        if !root.exists() {
            continue;
        }
        println!("\nProcessing: {}", root.display());
        let report = substitute_tree(root, &rename, &options)?;
        for path in &report.modified {
            println!("  [MODIFIED] {}", path.display());
        }
        for path in &report.unreadable {
            println!("  [ERROR] Cannot read: {}", path.display());
        }
        total_modified += report.files_modified();
    }

    println!("\nTotal files modified: {total_modified}");

    println!("\n[Step 2] Moving directory structure...");

    for root in &roots {
        if !root.exists() {
            continue;
        }
        match relocate_tree(root, &rename)? {
            RelocateOutcome::Moved { from, to } => {
                println!("  [MOVED] {} -> {}", from.display(), to.display());
            },
            RelocateOutcome::SourceMissing(path) => {
                println!("  [SKIP] Directory not found: {}", path.display());
            },
        }
    }

    println!();
    print_banner("Package rename completed!");
    Ok(())
}

fn print_banner(message: &str) {
    println!("{}", "=".repeat(60));
    println!("{message}");
    println!("{}", "=".repeat(60));
}
