//! Configuration management for `sanitizers-core`.
//!
//! A sanitizer config file declares chains by naming rules from a
//! [`RuleCatalog`] together with their weights, and optionally overrides the
//! error message templates. Configs are YAML:
//!
//! ```yaml
//! chains:
//!   username:
//!     - rule: trim
//!     - rule: lowercase
//!       weight: 10
//! messages:
//!   unknown_sanitizer: "Sanitiseur inconnu « {name} »."
//! ```
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::SanitizeError;
use crate::messages::{MessageCatalog, MessageKey};
use crate::registry::Registry;
use crate::rule::RuleRef;
use crate::rules::trim_rule;

/// File name looked up by [`SanitizerConfig::candidate_paths`].
pub const CONFIG_FILE_NAME: &str = "sanitizers.yaml";

/// One rule reference inside a configured chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChainStep {
    /// Name of the rule in the [`RuleCatalog`].
    pub rule: String,
    /// Ordering key; lower runs first.
    #[serde(default)]
    pub weight: i64,
}

/// The top-level sanitizer configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Chain name to the rules it runs.
    pub chains: BTreeMap<String, Vec<ChainStep>>,
    /// Message key (e.g. `unknown_sanitizer`) to replacement template.
    pub messages: HashMap<String, String>,
}

impl SanitizerConfig {
    /// Loads a config from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading sanitizer config from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: SanitizerConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        info!(
            "Loaded {} chain(s) from file {}.",
            config.chains.len(),
            path.display()
        );
        Ok(config)
    }

    /// Loads the built-in chain definitions from the embedded configuration.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default sanitizer chains from embedded string...");
        let default_yaml = include_str!("../config/default_sanitizers.yaml");
        let config: SanitizerConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default sanitizer chains")?;

        debug!("Loaded {} default chain(s).", config.chains.len());
        Ok(config)
    }

    /// Locations searched by [`Self::load_first_available`], in order: the
    /// user config directory, then the working directory.
    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("sanitizers").join(CONFIG_FILE_NAME));
        }
        paths.push(PathBuf::from(CONFIG_FILE_NAME));
        paths
    }

    /// Loads the first config file that exists among [`Self::candidate_paths`],
    /// or the built-in default when none does.
    pub fn load_first_available() -> Result<Self> {
        Self::load_first_available_from(&Self::candidate_paths())
    }

    pub fn load_first_available_from(paths: &[PathBuf]) -> Result<Self> {
        for path in paths {
            if path.is_file() {
                return Self::load_from_file(path);
            }
            debug!("No sanitizer config at {}.", path.display());
        }
        Self::load_default()
    }

    /// Checks that every step names a rule in `catalog`.
    ///
    /// Unknown message keys are reported as warnings and otherwise ignored.
    pub fn validate(&self, catalog: &RuleCatalog) -> Result<(), SanitizeError> {
        let mut problems = Vec::new();
        for (chain, steps) in &self.chains {
            if chain.is_empty() {
                problems.push("chain name cannot be empty".to_string());
            }
            for step in steps {
                if catalog.get(&step.rule).is_none() {
                    problems.push(format!(
                        "chain '{}' references unknown rule '{}'",
                        chain, step.rule
                    ));
                }
            }
        }

        for key in self.messages.keys() {
            if MessageKey::from_name(key).is_none() {
                warn!("Message override '{}' does not match any known message.", key);
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(SanitizeError::Config(problems.join("; ")))
        }
    }

    /// Builds a message catalog from the built-in templates plus this
    /// config's overrides.
    pub fn message_catalog(&self) -> MessageCatalog {
        let mut catalog = MessageCatalog::default();
        for (name, template) in &self.messages {
            match MessageKey::from_name(name) {
                Some(key) => catalog.set_template(key, template.clone()),
                None => debug!("Skipping unknown message override '{}'.", name),
            }
        }
        catalog
    }
}

/// Rules that config files may refer to by name.
#[derive(Clone, Default)]
pub struct RuleCatalog {
    rules: HashMap<String, RuleRef>,
}

impl fmt::Debug for RuleCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("RuleCatalog").field("rules", &names).finish()
    }
}

impl RuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog containing the built-in rules (`trim`).
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        catalog.insert("trim", trim_rule());
        catalog
    }

    /// Adds or replaces the rule known as `name`.
    pub fn insert(&mut self, name: impl Into<String>, rule: RuleRef) -> &mut Self {
        self.rules.insert(name.into(), rule);
        self
    }

    pub fn get(&self, name: &str) -> Option<&RuleRef> {
        self.rules.get(name)
    }
}

impl Registry {
    /// Builds a registry holding exactly the chains declared in `config`.
    ///
    /// # Errors
    /// [`SanitizeError::Config`] if a step names a rule missing from `catalog`.
    pub fn from_config(
        config: &SanitizerConfig,
        catalog: &RuleCatalog,
    ) -> Result<Self, SanitizeError> {
        let mut registry = Registry::new();
        registry.apply_config(config, catalog)?;
        Ok(registry)
    }

    /// Registers every chain step in `config` on top of the current state.
    ///
    /// Nothing is registered if validation fails.
    pub fn apply_config(
        &mut self,
        config: &SanitizerConfig,
        catalog: &RuleCatalog,
    ) -> Result<&mut Self, SanitizeError> {
        config.validate(catalog)?;
        for (chain, steps) in &config.chains {
            for step in steps {
                if let Some(rule) = catalog.get(&step.rule) {
                    self.register_with_weight(chain.as_str(), rule.clone(), step.weight);
                }
            }
        }
        Ok(self)
    }
}
