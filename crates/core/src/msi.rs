//! MSI installer post-processing.
//!
//! The Windows installer drops `frost*.bat` helper scripts outside the
//! package manifest, so its uninstall path needs an explicit removal rule.
//! The rule is emitted as a `RemoveFile` table fragment in the text `.idt`
//! format the installer-database import tool consumes.

use std::fs;
use std::io;
use std::path::Path;

pub const REMOVE_FILE_TABLE: &str = "RemoveFile";

/// Install mode 2: remove on uninstall
const ON_UNINSTALL: u8 = 2;

/// One row of the installer's file-removal table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalRule {
    pub file_key: String,
    pub component: String,
    /// Glob naming the files to remove
    pub file_name: String,
    /// Directory property the glob is resolved against
    pub dir_property: String,
    pub install_mode: u8,
}

/// Removal rules for the generated helper scripts
pub fn removal_rules() -> Vec<RemovalRule> {
    vec![RemovalRule {
        file_key: "frostBatch".to_string(),
        component: "frost".to_string(),
        file_name: "frost*.bat".to_string(),
        dir_property: "Scripts".to_string(),
        install_mode: ON_UNINSTALL,
    }]
}

/// Render rules as an importable `RemoveFile` table fragment: a column
/// header line, a column type line, a table key line, then one
/// tab-separated line per rule.
pub fn remove_file_table(rules: &[RemovalRule]) -> String {
    let mut out = String::new();
    out.push_str("FileKey\tComponent_\tFileName\tDirProperty\tInstallMode\r\n");
    out.push_str("s72\ts72\tL255\ts72\ti2\r\n");
    out.push_str(&format!("{REMOVE_FILE_TABLE}\tFileKey\r\n"));
    for rule in rules {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\r\n",
            rule.file_key, rule.component, rule.file_name, rule.dir_property, rule.install_mode
        ));
    }
    out
}

pub fn write_remove_file_table(rules: &[RemovalRule], path: &Path) -> io::Result<()> {
    fs::write(path, remove_file_table(rules))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helper_script_rule() {
        let rules = removal_rules();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].file_name, "frost*.bat");
        assert_eq!(rules[0].dir_property, "Scripts");
        assert_eq!(rules[0].install_mode, 2);
    }

    #[test]
    fn test_table_fragment_layout() {
        let fragment = remove_file_table(&removal_rules());
        let lines: Vec<&str> = fragment.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "FileKey\tComponent_\tFileName\tDirProperty\tInstallMode");
        assert_eq!(lines[1], "s72\ts72\tL255\ts72\ti2");
        assert_eq!(lines[2], "RemoveFile\tFileKey");
        assert_eq!(lines[3], "frostBatch\tfrost\tfrost*.bat\tScripts\t2");
    }

    #[test]
    fn test_written_fragment_round_trips() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("RemoveFile.idt");

        write_remove_file_table(&removal_rules(), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), remove_file_table(&removal_rules()));
    }
}
