use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::types::RunMode;

/// Layered configuration source: `config.toml` + `config.<env>.toml` +
/// `APP_*` environment variables.
pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_"));

        Ok(Self { figment })
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }
}

/// Effective arguments of one experiment run.
///
/// The field list is explicit and enumerable: `fields()` returns every
/// field in declaration order, which is also the order the argument
/// reporter prints them in. `train_data` only matters for finetune runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub log_dir: PathBuf,
    pub model: String,
    pub gpu: usize,
    pub train_data: Option<String>,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            model: "bert-base".to_string(),
            gpu: 0,
            train_data: None,
            batch_size: 32,
            learning_rate: 2e-5,
            seed: 42,
        }
    }
}

impl RunConfig {
    /// Read the `run.*` section of the layered config, falling back to the
    /// defaults field by field.
    pub fn from_config(config: &Config) -> Self {
        let defaults = Self::default();
        Self {
            log_dir: config
                .get::<String>("run.log_dir")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            model: config.get("run.model").unwrap_or(defaults.model),
            gpu: config.get("run.gpu").unwrap_or(defaults.gpu),
            train_data: config.get("run.train_data").ok(),
            batch_size: config.get("run.batch_size").unwrap_or(defaults.batch_size),
            learning_rate: config
                .get("run.learning_rate")
                .unwrap_or(defaults.learning_rate),
            seed: config.get("run.seed").unwrap_or(defaults.seed),
        }
    }

    /// `(name, rendered value)` pairs in declaration order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("log_dir", self.log_dir.display().to_string()),
            ("model", self.model.clone()),
            ("gpu", self.gpu.to_string()),
            (
                "train_data",
                self.train_data.clone().unwrap_or_else(|| "none".to_string()),
            ),
            ("batch_size", self.batch_size.to_string()),
            ("learning_rate", self.learning_rate.to_string()),
            ("seed", self.seed.to_string()),
        ]
    }

    /// Mode-conditional requirements: finetune runs must name a training
    /// dataset; every run must name a model.
    pub fn validate(&self, mode: &RunMode) -> Result<()> {
        if self.model.is_empty() {
            return Err(Error::InvalidConfig("model must not be empty".to_string()));
        }
        if mode.is_finetune() && self.train_data.is_none() {
            return Err(Error::InvalidConfig(
                "train_data is required for finetune runs".to_string(),
            ));
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
