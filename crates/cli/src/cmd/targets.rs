use anyhow::Result;

use frost_core::default_targets;
use frost_platform::Os;

use crate::output::{OutputFormat, print_json, print_stat};

pub fn cmd_targets(format: OutputFormat) -> Result<()> {
    let root = std::env::current_dir()?;
    let targets = default_targets(Os::current(), &root);

    if format.is_json() {
        return print_json(&targets);
    }

    for target in &targets {
        let sources: Vec<String> = target
            .sources
            .iter()
            .map(|s| s.display().to_string())
            .collect();
        print_stat(
            &format!("{} ({:?})", target.name, target.kind),
            &sources.join(", "),
        );
    }
    Ok(())
}
