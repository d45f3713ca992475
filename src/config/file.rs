//! Optional TOML file read by the build script, and the precedence rules
//! that turn it plus the build environment into the baked-in greeting.
//!
//! Like `template.rs`, this file is shared with `build.rs`. Its only
//! crate-local import is the sibling `template` module, which `build.rs`
//! includes next to it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env::VarError;
use std::path::Path;
use thiserror::Error;

use super::template;

/// Accepted values for `fixture.write_policy`.
pub const WRITE_POLICIES: &[&str] = &["strict", "silent"];

pub const DEFAULT_WRITE_POLICY: &str = "strict";

/// Names the TOML file to read at build time.
pub const CONFIG_ENV: &str = "PAUSE_GREETER_CONFIG";

/// Overrides the write policy at build time.
pub const WRITE_POLICY_ENV: &str = "PAUSE_GREETER_WRITE_POLICY";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureFile {
    #[serde(default)]
    pub fixture: FixtureSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureSection {
    pub template: Option<String>,
    pub write_policy: Option<String>,
}

#[derive(Error, Debug)]
pub enum FileError {
    #[error("cannot read fixture config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid fixture config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown write policy '{0}', expected one of: {expected}", expected = WRITE_POLICIES.join(", "))]
    UnknownWritePolicy(String),

    #[error("environment variable {0} is not valid UTF-8")]
    NotUnicode(String),
}

/// Greeting and policy as they get baked into the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub template: String,
    pub message: String,
    pub write_policy: String,
}

impl FixtureFile {
    /// Reads `path` when given, otherwise falls back to an empty file.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self, FileError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FileError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, FileError> {
        let file: FixtureFile = toml::from_str(content)?;
        if let Some(policy) = &file.fixture.write_policy {
            check_write_policy(policy)?;
        }
        Ok(file)
    }
}

pub fn check_write_policy(policy: &str) -> Result<(), FileError> {
    if WRITE_POLICIES.contains(&policy) {
        Ok(())
    } else {
        Err(FileError::UnknownWritePolicy(policy.to_string()))
    }
}

/// Adapts `std::env::var` output: unset is `None`, non-UTF-8 is an error.
pub fn lookup_var(name: &str, value: Result<String, VarError>) -> Result<Option<String>, FileError> {
    match value {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(FileError::NotUnicode(name.to_string())),
    }
}

/// Applies the build-time precedence:
/// template from the file, else `$MESSAGE`, rendered against `env`;
/// policy from `PAUSE_GREETER_WRITE_POLICY`, else the file, else `strict`.
pub fn resolve<F>(file: FixtureFile, mut env: F) -> Result<Resolved, FileError>
where
    F: FnMut(&str) -> Result<Option<String>, FileError>,
{
    let template = file
        .fixture
        .template
        .unwrap_or_else(|| template::DEFAULT_TEMPLATE.to_string());

    let mut values = HashMap::new();
    for name in template::placeholders(&template) {
        if let Some(value) = env(&name)? {
            values.insert(name, value);
        }
    }
    let message = template::render(&template, |name| values.get(name).cloned());

    let write_policy = match env(WRITE_POLICY_ENV)? {
        Some(policy) => policy,
        None => file
            .fixture
            .write_policy
            .unwrap_or_else(|| DEFAULT_WRITE_POLICY.to_string()),
    };
    check_write_policy(&write_policy)?;

    Ok(Resolved {
        template,
        message,
        write_policy,
    })
}
