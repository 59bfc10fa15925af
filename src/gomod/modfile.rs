//! Line-oriented go.mod reader and editor.
//!
//! Only the subset the patcher needs is understood: the `module` line and
//! `replace` directives in both single-line and block form. Everything else
//! passes through untouched.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors around the consumer's build manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("go.mod not found in {} or any parent directory", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

/// Locate go.mod by searching `start` and its ancestors.
pub fn find_go_mod(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(d) = dir {
        let candidate = d.join("go.mod");
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = d.parent();
    }
    None
}

/// An editable go.mod file.
pub struct GoMod {
    path: PathBuf,
    lines: Vec<String>,
}

impl GoMod {
    pub fn open(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let gomod = Self {
            path: path.to_path_buf(),
            lines: text.lines().map(String::from).collect(),
        };
        if gomod.module_path().is_none() {
            return Err(ManifestError::Parse {
                path: path.to_path_buf(),
                message: "missing module directive".to_string(),
            });
        }
        Ok(gomod)
    }

    pub fn module_path(&self) -> Option<String> {
        crate::project::parse_module_line(&self.lines.join("\n"))
    }

    /// All `old => new` pairs currently present.
    pub fn replaces(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        let mut in_block = false;
        for line in &self.lines {
            let trimmed = line.trim();
            if in_block {
                if trimmed == ")" {
                    in_block = false;
                } else if let Some(pair) = parse_replace_pair(trimmed) {
                    out.push(pair);
                }
            } else if trimmed.starts_with("replace") {
                let rest = trimmed["replace".len()..].trim_start();
                if rest.starts_with('(') {
                    in_block = true;
                } else if let Some(pair) = parse_replace_pair(rest) {
                    out.push(pair);
                }
            }
        }
        out
    }

    /// Clean slate: remove every replace directive, single-line and block.
    pub fn drop_all_replaces(&mut self) {
        let mut kept = Vec::with_capacity(self.lines.len());
        let mut in_block = false;
        for line in self.lines.drain(..) {
            let trimmed = line.trim();
            if in_block {
                if trimmed == ")" {
                    in_block = false;
                }
                continue;
            }
            if trimmed.starts_with("replace") {
                let rest = trimmed["replace".len()..].trim_start();
                if rest.starts_with('(') {
                    in_block = true;
                    continue;
                }
                if parse_replace_pair(rest).is_some() {
                    continue;
                }
            }
            kept.push(line);
        }
        // Collapse any doubled blank lines the removal left behind.
        let mut prev_blank = false;
        kept.retain(|line| {
            let blank = line.trim().is_empty();
            let drop = blank && prev_blank;
            prev_blank = blank;
            !drop
        });
        self.lines = kept;
    }

    pub fn add_replace(&mut self, module_path: &str, local_path: &str) {
        if self.lines.last().is_some_and(|l| !l.trim().is_empty()) {
            self.lines.push(String::new());
        }
        self.lines.push(format!("replace {module_path} => {local_path}"));
    }

    pub fn save(&self) -> Result<(), ManifestError> {
        let mut text = self.lines.join("\n");
        text.push('\n');
        std::fs::write(&self.path, text).map_err(|source| ManifestError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Parse `old [version] => new [version]` into (old path, new path).
fn parse_replace_pair(text: &str) -> Option<(String, String)> {
    let (old, new) = text.split_once("=>")?;
    let old_path = old.split_whitespace().next()?.to_string();
    let new_path = new.split_whitespace().next()?.to_string();
    Some((old_path, new_path))
}
