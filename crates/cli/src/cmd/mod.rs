mod build;
mod msi;
mod rpm;
mod targets;

pub use build::cmd_build;
pub use msi::cmd_msi;
pub use rpm::{cmd_rpm_patch, cmd_rpm_rename};
pub use targets::cmd_targets;
