//! Конфигурация фронтенда.
//!
//! Адрес сервиса генерации фиксируется на этапе сборки: дефолтный TOML
//! встроен в бинарник, а переменная окружения `DOCGEN_API_URL` во время
//! `trunk build` подменяет URL.

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// POST-эндпоинт генерации документа (API Gateway)
    pub generate_url: String,
}

/// Эндпоинт по умолчанию; тот же URL, что в `DEFAULT_CONFIG`
const DEFAULT_GENERATE_URL: &str =
    "https://s9yurg9hj8.execute-api.us-east-1.amazonaws.com/generate";

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[api]
generate_url = "https://s9yurg9hj8.execute-api.us-east-1.amazonaws.com/generate"
"#;

/// Значение переменной на момент компиляции
const BUILD_TIME_URL: Option<&str> = option_env!("DOCGEN_API_URL");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid embedded config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load configuration: embedded defaults, then the build-time override
pub fn load_config() -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(apply_override(config, BUILD_TIME_URL))
}

fn apply_override(mut config: Config, url: Option<&str>) -> Config {
    if let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) {
        config.api.generate_url = url.to_string();
    }
    config
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                generate_url: DEFAULT_GENERATE_URL.to_string(),
            },
        }
    }
}

/// Загрузить конфигурацию один раз при старте; при ошибке разбора —
/// встроенный URL по умолчанию (с учётом `DOCGEN_API_URL`)
pub fn load_config_or_default() -> Config {
    resolve(load_config(), BUILD_TIME_URL)
}

fn resolve(loaded: Result<Config, ConfigError>, url: Option<&str>) -> Config {
    loaded.unwrap_or_else(|e| {
        log::warn!("{}; falling back to the default endpoint", e);
        apply_override(Config::default(), url)
    })
}
