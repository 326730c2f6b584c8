use anyhow::{Context, Result};
use std::path::Path;

use frost_core::{removal_rules, write_remove_file_table};
use frost_platform::Os;

use crate::output::{print_success, print_warning};

pub fn cmd_msi(output: &Path) -> Result<()> {
    if !Os::current().is_windows() {
        print_warning("installer removal rules only apply to Windows packaging; nothing to do");
        return Ok(());
    }

    write_remove_file_table(&removal_rules(), output)
        .with_context(|| format!("writing {}", output.display()))?;
    print_success(&format!("wrote removal rules to {}", output.display()));
    Ok(())
}
