use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::elegibilidade::{EligibilityConfig, FaixaMinimos};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub provider: ProviderConfig,
    pub rules: RulesConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            provider: ProviderConfig::load()?,
            rules: RulesConfig::from_env(),
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Which client-data provider backs the eligibility lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Mock,
    Upstream,
}

/// Selection of the client-data provider, from `DATA_PROVIDER`
/// (`mock`, the default, or `upstream` plus `UPSTREAM_BASE_URL`).
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub upstream_base_url: Option<String>,
}

impl ProviderConfig {
    fn load() -> Result<Self, ConfigError> {
        let kind = match env::var("DATA_PROVIDER")
            .unwrap_or_else(|_| "mock".to_string())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "upstream" => ProviderKind::Upstream,
            _ => ProviderKind::Mock,
        };

        let upstream_base_url = env::var("UPSTREAM_BASE_URL")
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        if kind == ProviderKind::Upstream && upstream_base_url.is_none() {
            return Err(ConfigError::UpstreamBaseUrlAusente);
        }

        Ok(Self {
            kind,
            upstream_base_url,
        })
    }
}

/// Numeric thresholds for the two rule engines, environment-supplied with
/// the production defaults as fallback. Unparseable values fall back
/// silently instead of failing startup.
#[derive(Debug, Clone)]
pub struct RulesConfig {
    pub tolerancia: f64,
    pub elegibilidade: EligibilityConfig,
}

impl RulesConfig {
    pub fn from_env() -> Self {
        let padrao = EligibilityConfig::default();

        Self {
            tolerancia: env_numero("VALIDATION_TOLERANCE_PERCENT", 15.0),
            elegibilidade: EligibilityConfig {
                percentual_min: env_numero("ELIGIBILITY_PERCENTUAL_MIN", padrao.percentual_min),
                upgrade_high: env_numero("ELIGIBILITY_UPGRADE_HIGH", padrao.upgrade_high),
                upgrade_medium: env_numero("ELIGIBILITY_UPGRADE_MEDIUM", padrao.upgrade_medium),
                faixa_p: FaixaMinimos {
                    score: env_inteiro("ELIGIBILITY_FAIXA_P_SCORE_MIN", padrao.faixa_p.score),
                    faturamento: env_inteiro(
                        "ELIGIBILITY_FAIXA_P_FATURAMENTO_MIN",
                        padrao.faixa_p.faturamento,
                    ),
                },
                faixa_m: FaixaMinimos {
                    score: env_inteiro("ELIGIBILITY_FAIXA_M_SCORE_MIN", padrao.faixa_m.score),
                    faturamento: env_inteiro(
                        "ELIGIBILITY_FAIXA_M_FATURAMENTO_MIN",
                        padrao.faixa_m.faturamento,
                    ),
                },
                faixa_g: FaixaMinimos {
                    score: env_inteiro("ELIGIBILITY_FAIXA_G_SCORE_MIN", padrao.faixa_g.score),
                    faturamento: env_inteiro(
                        "ELIGIBILITY_FAIXA_G_FATURAMENTO_MIN",
                        padrao.faixa_g.faturamento,
                    ),
                },
            },
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            tolerancia: 15.0,
            elegibilidade: EligibilityConfig::default(),
        }
    }
}

fn env_numero(key: &str, fallback: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(fallback)
}

fn env_inteiro<T: std::str::FromStr>(key: &str, fallback: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
        .unwrap_or(fallback)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    UpstreamBaseUrlAusente,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::UpstreamBaseUrlAusente => {
                write!(f, "DATA_PROVIDER=upstream requires UPSTREAM_BASE_URL")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::UpstreamBaseUrlAusente => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "DATA_PROVIDER",
            "UPSTREAM_BASE_URL",
            "VALIDATION_TOLERANCE_PERCENT",
            "ELIGIBILITY_PERCENTUAL_MIN",
            "ELIGIBILITY_FAIXA_G_SCORE_MIN",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.provider.kind, ProviderKind::Mock);
        assert_eq!(config.rules.tolerancia, 15.0);
        assert_eq!(config.rules.elegibilidade.faixa_g.score, 800);
    }

    #[test]
    fn valores_invalidos_caem_no_padrao() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("VALIDATION_TOLERANCE_PERCENT", "abc");
        env::set_var("ELIGIBILITY_FAIXA_G_SCORE_MIN", "850");
        let rules = RulesConfig::from_env();
        assert_eq!(rules.tolerancia, 15.0);
        assert_eq!(rules.elegibilidade.faixa_g.score, 850);
        reset_env();
    }

    #[test]
    fn upstream_sem_base_url_e_erro_de_configuracao() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("DATA_PROVIDER", "upstream");
        let erro = ProviderConfig::load().expect_err("deve falhar");
        assert!(matches!(erro, ConfigError::UpstreamBaseUrlAusente));

        env::set_var("UPSTREAM_BASE_URL", "https://bureau.example");
        let config = ProviderConfig::load().expect("config valida");
        assert_eq!(config.kind, ProviderKind::Upstream);
        reset_env();
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }
}
