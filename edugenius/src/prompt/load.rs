//! Load per-flow prompt overrides from a directory of YAML files.
//!
//! Compiled-in templates are the canonical prompt text; a deployment can
//! override the text for any flow by placing `<flow_name>.yaml` with a
//! `prompt:` key in the prompts directory (`PROMPTS_DIR` env, default
//! `./prompts`). Missing files keep the compiled-in defaults; only a present
//! but unreadable or invalid file is an error.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

/// Error when loading prompt overrides (missing dir, invalid YAML).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("prompts directory not found or not readable: {0}")]
    DirNotFound(String),
    #[error("failed to read prompts file {path}: {message}")]
    ReadFile { path: String, message: String },
    #[error("failed to parse YAML in {path}: {message}")]
    ParseYaml { path: String, message: String },
}

/// Shape of one override file: `prompt: |` with the replacement template.
#[derive(Debug, Default, Deserialize)]
struct PromptFile {
    prompt: Option<String>,
}

/// Flow-name → replacement prompt text. Empty by default.
#[derive(Debug, Default, Clone)]
pub struct PromptOverrides {
    map: HashMap<String, String>,
}

impl PromptOverrides {
    pub fn get(&self, flow: &str) -> Option<&str> {
        self.map.get(flow).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Default directory name when `PROMPTS_DIR` is not set.
const DEFAULT_PROMPTS_DIR: &str = "prompts";

/// Returns the directory to load from: `dir` if `Some`, else `PROMPTS_DIR`
/// env, else `./prompts`.
fn prompts_dir(dir: Option<&Path>) -> std::path::PathBuf {
    dir.map(std::path::PathBuf::from).unwrap_or_else(|| {
        std::env::var("PROMPTS_DIR")
            .ok()
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|| std::path::PathBuf::from(DEFAULT_PROMPTS_DIR))
    })
}

/// Loads overrides from a directory: every `*.yaml`/`*.yml` file whose stem is
/// a flow name and whose `prompt:` key is set replaces that flow's template.
pub fn load(dir: Option<&Path>) -> Result<PromptOverrides, LoadError> {
    let base = prompts_dir(dir);
    if !base.exists() || !base.is_dir() {
        return Err(LoadError::DirNotFound(base.display().to_string()));
    }
    let entries = std::fs::read_dir(&base)
        .map_err(|_| LoadError::DirNotFound(base.display().to_string()))?;

    let mut map = HashMap::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        if !is_yaml {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let content = std::fs::read_to_string(&path).map_err(|e| LoadError::ReadFile {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let file: PromptFile =
            serde_yaml::from_str(&content).map_err(|e| LoadError::ParseYaml {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        if let Some(prompt) = file.prompt {
            map.insert(stem.to_string(), prompt);
        }
    }
    Ok(PromptOverrides { map })
}

/// Loads overrides if the directory exists; otherwise returns the empty set so
/// every flow keeps its compiled-in template.
pub fn load_or_default(dir: Option<&Path>) -> PromptOverrides {
    load(dir).unwrap_or_default()
}
