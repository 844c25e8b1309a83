#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::uninlined_format_args)]

pub mod encoding;
pub mod package;
pub mod relocate;
pub mod substitute;

pub use package::PackageRename;
pub use relocate::{relocate_tree, RelocateOutcome};
pub use substitute::{substitute_tree, SubstituteOptions, SubstituteReport};
