//! # Configuração — TOML + Variáveis de Ambiente
//!
//! Lida de `$PREPROC_CONFIG` ou `./config.toml`. Arquivo ausente não é
//! erro: valem os padrões. Precedência: **env > arquivo > padrões**.
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:8181"
//!
//! [lemmatizer]
//! mode = "hybrid"            # ou "dictionary"
//! learned_path = "data/learned_verbs.json"
//! batch_size = 10
//! memo_capacity = 2000
//! # rules_path = "data/morphology.toml"
//!
//! [cache]
//! capacity = 1000
//! ttl_secs = 3600
//! normalizer_capacity = 500
//!
//! [payload]
//! default_model = "gpt-4o"
//! default_temperature = 1.0
//! history_turns = 3
//!
//! [logging]
//! level = "info"
//! format = "pretty"          # ou "json"
//! ```
//!
//! ## Variáveis de Ambiente
//!
//! | Variável | Campo |
//! |----------|-------|
//! | `PREPROC_BIND` | `server.bind` |
//! | `PREPROC_LEMMATIZER_MODE` | `lemmatizer.mode` |
//! | `PREPROC_LEARNED_PATH` | `lemmatizer.learned_path` |
//! | `PREPROC_BATCH_SIZE` | `lemmatizer.batch_size` |
//! | `PREPROC_CACHE_TTL_SECS` | `cache.ttl_secs` |
//! | `PREPROC_CACHE_CAPACITY` | `cache.capacity` |
//! | `PREPROC_LOG_LEVEL` | `logging.level` |
//! | `PREPROC_LOG_FORMAT` | `logging.format` |
//!
//! Valores inválidos são ignorados com `warn`.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use crate::nlu::lemmatizer::{LemmatizerMode, LemmatizerSettings, DEFAULT_MEMO_CAPACITY};
use crate::persistence::{DEFAULT_BATCH_SIZE, DEFAULT_LEARNED_PATH};

/// Configuração carregada mas inconsistente.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("endereço de bind inválido '{0}'")]
    InvalidBind(String),

    #[error("{field} deve ser maior que zero")]
    Zero { field: &'static str },

    #[error("temperatura padrão fora de [0, 2]: {0}")]
    Temperature(f64),
}

// ─── Configuração raiz ────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub lemmatizer: LemmatizerConfig,
    pub cache: CacheConfig,
    pub payload: PayloadConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Carrega arquivo + overrides de ambiente e valida.
    pub fn load() -> Result<Self> {
        let env = |key: &str| std::env::var(key).ok();
        let path = Self::config_path_with(env);
        let mut config = Self::load_from(&path)?;
        config.apply_overrides(env);
        config.validate()?;
        Ok(config)
    }

    fn load_from(path: &std::path::Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                tracing::info!(path = %path.display(), "carregando configuração");
                Self::from_toml(&contents)
                    .with_context(|| format!("configuração inválida em {}", path.display()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "arquivo de configuração ausente, usando padrões");
                Ok(Self::default())
            }
            Err(e) => Err(e).with_context(|| format!("falha ao ler {}", path.display())),
        }
    }

    fn config_path_with(env: impl Fn(&str) -> Option<String>) -> PathBuf {
        env("PREPROC_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("falha ao interpretar TOML de configuração")
    }

    /// Aplica overrides (env > arquivo). Recebe o resolvedor para testes.
    pub fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env("PREPROC_BIND") {
            self.server.bind = v;
        }
        if let Some(v) = env("PREPROC_LEMMATIZER_MODE") {
            match v.parse::<LemmatizerMode>() {
                Ok(mode) => self.lemmatizer.mode = mode,
                Err(_) => warn_invalid("PREPROC_LEMMATIZER_MODE", &v),
            }
        }
        if let Some(v) = env("PREPROC_LEARNED_PATH") {
            self.lemmatizer.learned_path = PathBuf::from(v);
        }
        if let Some(v) = env("PREPROC_BATCH_SIZE") {
            match v.parse() {
                Ok(n) => self.lemmatizer.batch_size = n,
                Err(_) => warn_invalid("PREPROC_BATCH_SIZE", &v),
            }
        }
        if let Some(v) = env("PREPROC_CACHE_TTL_SECS") {
            match v.parse() {
                Ok(n) => self.cache.ttl_secs = n,
                Err(_) => warn_invalid("PREPROC_CACHE_TTL_SECS", &v),
            }
        }
        if let Some(v) = env("PREPROC_CACHE_CAPACITY") {
            match v.parse() {
                Ok(n) => self.cache.capacity = n,
                Err(_) => warn_invalid("PREPROC_CACHE_CAPACITY", &v),
            }
        }
        if let Some(v) = env("PREPROC_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = env("PREPROC_LOG_FORMAT") {
            match v.parse::<LogFormat>() {
                Ok(format) => self.logging.format = format,
                Err(_) => warn_invalid("PREPROC_LOG_FORMAT", &v),
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.socket_addr()?;
        if self.lemmatizer.batch_size == 0 {
            return Err(ConfigError::Zero { field: "lemmatizer.batch_size" });
        }
        if self.cache.capacity == 0 {
            return Err(ConfigError::Zero { field: "cache.capacity" });
        }
        let t = self.payload.default_temperature;
        if !(0.0..=2.0).contains(&t) {
            return Err(ConfigError::Temperature(t));
        }
        Ok(())
    }
}

fn warn_invalid(var: &'static str, value: &str) {
    tracing::warn!(var, value = %value, "ignorando override de ambiente inválido");
}

// ─── Seções ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: "0.0.0.0:8181".to_string() }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .parse()
            .map_err(|_| ConfigError::InvalidBind(self.bind.clone()))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LemmatizerConfig {
    pub mode: LemmatizerMode,
    pub learned_path: PathBuf,
    pub batch_size: usize,
    pub memo_capacity: usize,
    /// Regras morfológicas extras (TOML), só no modo `hybrid`.
    pub rules_path: Option<PathBuf>,
}

impl Default for LemmatizerConfig {
    fn default() -> Self {
        Self {
            mode: LemmatizerMode::Hybrid,
            learned_path: PathBuf::from(DEFAULT_LEARNED_PATH),
            batch_size: DEFAULT_BATCH_SIZE,
            memo_capacity: DEFAULT_MEMO_CAPACITY,
            rules_path: None,
        }
    }
}

impl From<&LemmatizerConfig> for LemmatizerSettings {
    fn from(c: &LemmatizerConfig) -> Self {
        Self {
            mode: c.mode,
            learned_path: c.learned_path.clone(),
            batch_size: c.batch_size,
            memo_capacity: c.memo_capacity,
            rules_path: c.rules_path.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub capacity: usize,
    pub ttl_secs: u64,
    pub normalizer_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: crate::cache::DEFAULT_CAPACITY,
            ttl_secs: crate::cache::DEFAULT_TTL.as_secs(),
            normalizer_capacity: crate::nlu::normalizer::DEFAULT_CAPACITY,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PayloadConfig {
    pub default_model: String,
    pub default_temperature: f64,
    pub history_turns: usize,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            default_model: "gpt-4o".to_string(),
            default_temperature: 1.0,
            history_turns: 3,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("formato de log desconhecido: {other}")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.server.bind, "0.0.0.0:8181");
        assert_eq!(c.lemmatizer.mode, LemmatizerMode::Hybrid);
        assert_eq!(c.lemmatizer.batch_size, 10);
        assert_eq!(c.cache.capacity, 1000);
        assert_eq!(c.cache.ttl(), Duration::from_secs(3600));
        assert_eq!(c.payload.history_turns, 3);
        assert_eq!(c.logging.format, LogFormat::Pretty);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let c = Config::from_toml("[lemmatizer]\nmode = \"dictionary\"\n[cache]\nttl_secs = 60\n").unwrap();
        assert_eq!(c.lemmatizer.mode, LemmatizerMode::Dictionary);
        assert_eq!(c.lemmatizer.batch_size, 10);
        assert_eq!(c.cache.ttl_secs, 60);
        assert_eq!(c.cache.capacity, 1000);
    }

    #[test]
    fn env_overrides_file() {
        let mut c = Config::from_toml("[cache]\ncapacity = 5\n").unwrap();
        c.apply_overrides(env(&[
            ("PREPROC_CACHE_CAPACITY", "42"),
            ("PREPROC_LEMMATIZER_MODE", "dictionary"),
            ("PREPROC_LOG_FORMAT", "json"),
            ("PREPROC_BIND", "127.0.0.1:9000"),
        ]));
        assert_eq!(c.cache.capacity, 42);
        assert_eq!(c.lemmatizer.mode, LemmatizerMode::Dictionary);
        assert_eq!(c.logging.format, LogFormat::Json);
        assert_eq!(c.server.socket_addr().unwrap().port(), 9000);
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let mut c = Config::default();
        c.apply_overrides(env(&[("PREPROC_BATCH_SIZE", "muitos"), ("PREPROC_LEMMATIZER_MODE", "neural")]));
        assert_eq!(c.lemmatizer.batch_size, 10);
        assert_eq!(c.lemmatizer.mode, LemmatizerMode::Hybrid);
    }

    #[test]
    fn validation_errors() {
        let mut c = Config::default();
        c.server.bind = "nao-e-endereco".into();
        assert!(matches!(c.validate(), Err(ConfigError::InvalidBind(_))));

        let mut c = Config::default();
        c.lemmatizer.batch_size = 0;
        assert!(matches!(c.validate(), Err(ConfigError::Zero { .. })));
    }

    #[test]
    fn config_path_and_missing_file() {
        assert_eq!(Config::config_path_with(env(&[])), PathBuf::from("config.toml"));
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config.toml");
        let c = Config::load_from(&missing).unwrap();
        assert_eq!(c.server.bind, "0.0.0.0:8181");

        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[server\nbind=").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
