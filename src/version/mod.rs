//! Version arithmetic and release-type resolution

pub mod increment;
pub mod resolver;

pub use increment::{increment, Increment};
pub use resolver::{resolve_version, ReleaseContext, ReleaseType};
