//! Configuration for Gift API

use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};

pub use core_config::Environment;

const DEFAULT_SEED_CATEGORIES: &str = "Birthday,Thanks,Congratulations";

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Category names registered at startup, in id order
    pub seed_categories: Vec<String>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;

        let seed_categories = env_or_default("SEED_CATEGORIES", DEFAULT_SEED_CATEGORIES)
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            seed_categories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        temp_env::with_vars_unset(["SEED_CATEGORIES", "PORT", "APP_ENV"], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.app.name, "gift-api");
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.environment, Environment::Development);
            assert_eq!(
                config.seed_categories,
                vec!["Birthday", "Thanks", "Congratulations"]
            );
        });
    }

    #[test]
    fn test_seed_categories_from_env() {
        temp_env::with_var("SEED_CATEGORIES", Some(" Wedding , ,Baby "), || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.seed_categories, vec!["Wedding", "Baby"]);
        });
    }

    #[test]
    fn test_invalid_port_is_reported() {
        temp_env::with_var("PORT", Some("eighty"), || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("PORT"));
        });
    }
}
