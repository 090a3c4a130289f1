//! `tsconfig.json` loading.
//!
//! Only the options that change how receivers and nullish operands are
//! checked are read; everything else in the file is ignored. Comments,
//! trailing commas and `extends` chains are accepted as `tsc` accepts them.

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thisctx_checker::CheckerOptions;
use tracing::debug;

/// Accepts `"strict": true` as well as `"strict": "true"`.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub compiler_options: Option<CompilerOptions>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub strict: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub strict_null_checks: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub no_implicit_this: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub no_implicit_any: Option<bool>,
}

impl CompilerOptions {
    /// `strict` sets the defaults; an explicit individual flag overrides it.
    pub fn to_checker_options(&self) -> CheckerOptions {
        let mut options = CheckerOptions {
            strict: self.strict.unwrap_or(false),
            ..Default::default()
        }
        .apply_strict_defaults();

        if let Some(value) = self.strict_null_checks {
            options.strict_null_checks = value;
        }
        if let Some(value) = self.no_implicit_this {
            options.no_implicit_this = value;
        }
        if let Some(value) = self.no_implicit_any {
            options.no_implicit_any = value;
        }
        options
    }

    fn merge(base: CompilerOptions, child: CompilerOptions) -> CompilerOptions {
        CompilerOptions {
            strict: child.strict.or(base.strict),
            strict_null_checks: child.strict_null_checks.or(base.strict_null_checks),
            no_implicit_this: child.no_implicit_this.or(base.no_implicit_this),
            no_implicit_any: child.no_implicit_any.or(base.no_implicit_any),
        }
    }
}

impl TsConfig {
    pub fn checker_options(&self) -> CheckerOptions {
        self.compiler_options
            .as_ref()
            .map(CompilerOptions::to_checker_options)
            .unwrap_or_default()
    }
}

pub fn parse_tsconfig(source: &str) -> Result<TsConfig> {
    let stripped = strip_jsonc(source);
    let normalized = remove_trailing_commas(&stripped);
    serde_json::from_str(&normalized).context("failed to parse tsconfig JSON")
}

/// Read `path`, following `extends` (relative to the extending file).
pub fn load_tsconfig(path: &Path) -> Result<TsConfig> {
    let mut visited = HashSet::new();
    load_tsconfig_inner(path, &mut visited)
}

/// Shorthand for `load_tsconfig(path)?.checker_options()`.
pub fn load_checker_options(path: &Path) -> Result<CheckerOptions> {
    let config = load_tsconfig(path)?;
    let options = config.checker_options();
    debug!(path = %path.display(), ?options, "loaded checker options");
    Ok(options)
}

fn load_tsconfig_inner(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<TsConfig> {
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical.clone()) {
        bail!("tsconfig extends cycle detected at {}", canonical.display());
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read tsconfig: {}", path.display()))?;
    let mut config = parse_tsconfig(&source)
        .with_context(|| format!("failed to parse tsconfig: {}", path.display()))?;

    if let Some(extends) = config.extends.take() {
        let base_path = resolve_extends_path(path, &extends)?;
        let base = load_tsconfig_inner(&base_path, visited)?;
        config.compiler_options = match (base.compiler_options, config.compiler_options) {
            (Some(base), Some(child)) => Some(CompilerOptions::merge(base, child)),
            (base, child) => child.or(base),
        };
    }

    visited.remove(&canonical);
    Ok(config)
}

fn resolve_extends_path(current_path: &Path, extends: &str) -> Result<PathBuf> {
    let base_dir = current_path
        .parent()
        .ok_or_else(|| anyhow!("tsconfig has no parent directory"))?;
    let mut candidate = PathBuf::from(extends);
    if candidate.extension().is_none() {
        candidate.set_extension("json");
    }
    if candidate.is_absolute() {
        Ok(candidate)
    } else {
        Ok(base_dir.join(candidate))
    }
}

/// Drop `//` and `/* */` comments outside strings, keeping line breaks.
fn strip_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape = false;
    let mut in_line_comment = false;
    let mut in_block_comment = false;

    while let Some(ch) = chars.next() {
        if in_line_comment {
            if ch == '\n' {
                in_line_comment = false;
                out.push(ch);
            }
            continue;
        }
        if in_block_comment {
            if ch == '*' && chars.peek() == Some(&'/') {
                chars.next();
                in_block_comment = false;
            } else if ch == '\n' {
                out.push(ch);
            }
            continue;
        }
        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match (ch, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(ch);
            }
            ('/', Some('/')) => {
                chars.next();
                in_line_comment = true;
            }
            ('/', Some('*')) => {
                chars.next();
                in_block_comment = true;
            }
            _ => out.push(ch),
        }
    }

    out
}

fn remove_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        if ch == '"' {
            in_string = true;
        } else if ch == ',' {
            let next = chars.clone().find(|c| !c.is_whitespace());
            if matches!(next, Some('}' | ']')) {
                continue;
            }
        }
        out.push(ch);
    }

    out
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
