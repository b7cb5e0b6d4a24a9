//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const CONFIG_FILE: &str = "depcheck.toml";

const DEFAULT_CONFIG: &str = r#"# depcheck configuration
#
# Both sides of a rule are regular expressions, matched anywhere in the text
# unless anchored with ^ or $.
#   from: the Go file's path relative to the project root, e.g. "domain/user/user.go"
#   to:   the import path, e.g. "example.com/app/domain/order"

[analyzer]
# Root directory to analyze, relative to the checked path
# root = "."

# Glob patterns (over relative paths) to exclude from analysis
exclude = [
    "**/vendor/**",
]

# Respect .gitignore files
respect_gitignore = true

# Allow rules: a file matching `from` may ONLY import paths matching `to`.
# Every applicable allow rule must be satisfied; the first one that is not
# gets reported.
[[allow]]
from = "^domain/"
to = "^(errors|fmt|strings|time)$|/domain/"
message = "domain packages may only import the standard library and other domain packages"

# Deny rules: a file matching `from` must NOT import paths matching `to`.
# The first matching deny rule gets reported.
[[deny]]
from = ".*"
to = "/internal/legacy/"
# message = "..."   # default: "import <path> is not allowed"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_template(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to describe your package boundaries");
    println!("  2. Run: depcheck list-rules");
    println!("  3. Run: depcheck check");

    Ok(())
}

fn write_template(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(path, DEFAULT_CONFIG)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use depcheck_core::{load_setting, Config};

    #[test]
    fn template_is_a_valid_config() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        let setting = load_setting(config.rules()).unwrap();
        assert_eq!(setting.allow().len(), 1);
        assert_eq!(setting.deny().len(), 1);
        assert_eq!(config.analyzer.exclude, vec!["**/vendor/**".to_string()]);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "# mine\n").unwrap();

        assert!(write_template(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        write_template(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
