//! Agent configuration, parsed from space-separated `key=value` tokens.

use std::{collections::BTreeMap, str::FromStr};

use thiserror::Error;

use crate::{IterationBudget, Side};

/// Characters forbidden in an agent name.
pub const FORBIDDEN_NAME_CHARS: &[char] = &['[', ']', '(', ')', ':', ';', ' '];

/// Errors raised while building or querying an agent configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    #[error("invalid iteration count: {0}")]
    InvalidIterations(String),

    #[error("unknown property: {0}")]
    UnknownProperty(String),

    #[error("property {key} cannot be read from {value:?}")]
    InvalidProperty { key: String, value: String },
}

/// How the agent chooses its moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// First legal cell of a random permutation.
    #[default]
    Random,
    /// Monte Carlo Tree Search.
    Mcts,
}

/// Validated agent configuration.
///
/// Settings that drive the agent are read once, when the configuration is
/// parsed. Every token, recognised or not, is also kept verbatim as a
/// property that [`AgentConfig::property`] can return and
/// [`AgentConfig::notify`] can overwrite; overwriting a property does not
/// change the parsed settings.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentConfig {
    pub name: String,
    pub role: Side,
    pub seed: Option<u64>,
    pub search: SearchMode,
    pub budget: IterationBudget,
    properties: BTreeMap<String, String>,
}

/// Splits a `key=value` token. A token without `=` is both key and value.
fn split_pair(token: &str) -> (&str, &str){
    token.split_once('=').unwrap_or((token, token))
}

impl AgentConfig {
    /// Properties every configuration starts from.
    const DEFAULTS: &'static str = "name=random role=unknown";

    /// Returns the stored value of `key`.
    pub fn property(&self, key: &str) -> Result<&str, ConfigError>{
        self.properties
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::UnknownProperty(key.to_string()))
    }

    /// Returns the stored value of `key` converted to `T`.
    ///
    /// # Examples
    /// ```rust
    /// use nogo_mcts::AgentConfig;
    /// let config: AgentConfig = "role=black seed=12".parse().unwrap();
    /// assert_eq!(config.property_as::<u64>("seed"), Ok(12));
    /// ```
    pub fn property_as<T: FromStr>(&self, key: &str) -> Result<T, ConfigError>{
        let value = self.property(key)?;

        value.parse().map_err(|_| ConfigError::InvalidProperty {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    /// Overwrites the property named by a `key=value` message.
    pub fn notify(&mut self, message: &str){
        let (key, value) = split_pair(message);
        self.properties.insert(key.to_string(), value.to_string());
    }
}

impl FromStr for AgentConfig {
    type Err = ConfigError;

    fn from_str(args: &str) -> Result<Self, Self::Err>{
        let mut properties = BTreeMap::new();

        for token in Self::DEFAULTS.split_whitespace().chain(args.split_whitespace()) {
            let (key, value) = split_pair(token);
            properties.insert(key.to_string(), value.to_string());
        }

        let name = properties.get("name").cloned().unwrap_or_default();
        if name.contains(FORBIDDEN_NAME_CHARS) {
            return Err(ConfigError::InvalidName(name));
        }

        let role = properties.get("role").map(String::as_str).unwrap_or_default();
        let role = role.parse::<Side>().map_err(ConfigError::InvalidRole)?;

        let seed = match properties.get("seed") {
            Some(seed) => Some(seed.parse::<u64>().map_err(|_| ConfigError::InvalidSeed(seed.clone()))?),
            None => None,
        };

        let search = match properties.get("search").map(String::as_str) {
            Some("MCTS") => SearchMode::Mcts,
            _ => SearchMode::Random,
        };

        let budget = match properties.get("iterations") {
            Some(n) => match n.parse::<usize>() {
                Ok(count) if count > 0 => IterationBudget::Fixed(count),
                _ => return Err(ConfigError::InvalidIterations(n.clone()))
            },
            None => IterationBudget::StepTable,
        };

        Ok(AgentConfig {
            name,
            role,
            seed,
            search,
            budget,
            properties,
        })
    }
}
