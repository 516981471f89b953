//! Claude Desktop integration helper
//!
//! Prints the `mcpServers` entry that launches this binary, and where the
//! desktop app keeps its config on this platform.

use crate::config::{API_KEY_ENV, API_KEY_SIGNUP_URL};
use serde_json::{json, Value};
use std::fmt::Write;
use std::path::{Path, PathBuf};

const DESKTOP_CONFIG_FILE: &str = "claude_desktop_config.json";
const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY_HERE";

/// Server entry for the desktop app's config file
pub fn server_entry(command: &Path) -> Value {
    json!({
        "mcpServers": {
            "nutrition": {
                "command": command.display().to_string(),
                "args": [],
                "env": { API_KEY_ENV: API_KEY_PLACEHOLDER }
            }
        }
    })
}

/// Desktop config location. Only macOS and Windows have a known path.
pub fn config_path() -> Option<PathBuf> {
    if cfg!(any(target_os = "macos", target_os = "windows")) {
        dirs::config_dir().map(|dir| dir.join("Claude").join(DESKTOP_CONFIG_FILE))
    } else {
        None
    }
}

/// Human-readable setup instructions
pub fn render(command: &Path, config_path: Option<&Path>) -> String {
    let entry = serde_json::to_string_pretty(&server_entry(command)).unwrap_or_default();
    let rule = "=".repeat(50);

    let mut output = String::from("Configuration to add to Claude Desktop:\n");
    let _ = writeln!(output, "{}\n{}\n{}", rule, entry, rule);

    match config_path {
        Some(path) => {
            let _ = writeln!(output, "\nConfig file location:\nfile://{}", path.display());
            if path.exists() {
                output.push_str("Config file exists. You'll need to merge this configuration.\n");
            } else {
                output.push_str("Config file doesn't exist. Create it with the above content.\n");
            }
        }
        None => output.push_str("\nUnsupported platform for auto-detection. Manual config required.\n"),
    }

    output.push_str("\nRemember to:\n");
    let _ = writeln!(
        output,
        "1. Replace '{}' with your actual USDA API key",
        API_KEY_PLACEHOLDER
    );
    let _ = writeln!(output, "2. Get a free key at: {}", API_KEY_SIGNUP_URL);
    output.push_str("3. Restart Claude Desktop after saving config\n");

    output
}
