//! Subcommands and the file plumbing they share

pub mod normalize;
pub mod ok;

use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Read a JSON document from `path`, or from stdin when `path` is `-`
pub fn read_json(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?
    };
    let value = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid JSON in {}: {}", path.display(), e))?;
    Ok(value)
}

/// Write `body` to `output`, or stdout when no path is given
pub fn write_json(body: &Value, output: Option<&PathBuf>, pretty: bool) -> CommandResult {
    let mut rendered = if pretty {
        serde_json::to_string_pretty(body)?
    } else {
        serde_json::to_string(body)?
    };
    rendered.push('\n');

    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            eprintln!("✓ Wrote {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
