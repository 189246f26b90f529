//! Configuration management for the wine discovery server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with SOMMELIER_ prefix

use config::{ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{
    defaults, validate_price_range, ComparedField, FlavorVocabulary, MatchingConfig, PriceRange,
    ReconcileConfig,
};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Match scoring constants
    pub matching: MatchingSettings,

    /// Quiz settings
    pub quiz: QuizSettings,

    /// Menu reconciliation settings
    pub menu: MenuSettings,

    /// Approved flavor vocabulary
    pub flavors: FlavorSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MatchingSettings {
    /// Minimum score a wine needs to be returned
    pub acceptance_threshold: f64,

    /// Maximum number of matches returned
    pub result_cap: usize,

    /// Score for a categorical near-miss
    pub partial_credit: f64,

    /// Largest catalog accepted in one request
    pub max_catalog_size: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct QuizSettings {
    /// Price band saved with quiz-derived preferences
    pub default_price_min: i64,
    pub default_price_max: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MenuSettings {
    /// Fields compared when reconciling menus (year, region, price, type)
    pub compared_fields: Vec<String>,

    /// Largest wine list accepted in one request
    pub max_wines: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FlavorSettings {
    /// Flavor terms wine records may carry
    pub approved: Vec<String>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("SOMMELIER_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let compared_fields: Vec<&str> =
            defaults::COMPARED_FIELDS.iter().map(|f| f.as_str()).collect();
        let (price_min, price_max) = defaults::QUIZ_PRICE_RANGE;

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("matching.acceptance_threshold", defaults::ACCEPTANCE_THRESHOLD)?
            .set_default("matching.result_cap", defaults::RESULT_CAP as u64)?
            .set_default("matching.partial_credit", defaults::PARTIAL_CREDIT)?
            .set_default("matching.max_catalog_size", 2000)?
            .set_default("quiz.default_price_min", price_min)?
            .set_default("quiz.default_price_max", price_max)?
            .set_default("menu.compared_fields", compared_fields)?
            .set_default("menu.max_wines", 2000)?
            .set_default("flavors.approved", defaults::APPROVED_FLAVORS.to_vec())?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (SOMMELIER_ prefix)
            .add_source(
                Environment::with_prefix("SOMMELIER")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("menu.compared_fields")
                    .with_list_parse_key("flavors.approved")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints the deserializer cannot express
    fn validate(&self) -> Result<(), ConfigError> {
        self.matching_config()
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;
        self.reconcile_config()?;
        validate_price_range(&self.quiz_price_range())
            .map_err(|msg| ConfigError::Message(format!("quiz default price band: {}", msg)))?;
        Ok(())
    }

    pub fn matching_config(&self) -> MatchingConfig {
        MatchingConfig {
            acceptance_threshold: self.matching.acceptance_threshold,
            result_cap: self.matching.result_cap,
            partial_credit: self.matching.partial_credit,
        }
    }

    pub fn reconcile_config(&self) -> Result<ReconcileConfig, ConfigError> {
        let compared_fields = self
            .menu
            .compared_fields
            .iter()
            .map(|f| f.trim().parse::<ComparedField>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(ConfigError::Message)?;
        Ok(ReconcileConfig { compared_fields })
    }

    pub fn quiz_price_range(&self) -> PriceRange {
        PriceRange::new(
            Decimal::from(self.quiz.default_price_min),
            Decimal::from(self.quiz.default_price_max),
        )
    }

    pub fn flavor_vocabulary(&self) -> FlavorVocabulary {
        FlavorVocabulary::new(self.flavors.approved.iter().cloned())
    }
}

impl Default for Config {
    fn default() -> Self {
        let (price_min, price_max) = defaults::QUIZ_PRICE_RANGE;
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            matching: MatchingSettings {
                acceptance_threshold: defaults::ACCEPTANCE_THRESHOLD,
                result_cap: defaults::RESULT_CAP,
                partial_credit: defaults::PARTIAL_CREDIT,
                max_catalog_size: 2000,
            },
            quiz: QuizSettings {
                default_price_min: price_min,
                default_price_max: price_max,
            },
            menu: MenuSettings {
                compared_fields: defaults::COMPARED_FIELDS
                    .iter()
                    .map(|f| f.as_str().to_string())
                    .collect(),
                max_wines: 2000,
            },
            flavors: FlavorSettings {
                approved: defaults::approved_flavors(),
            },
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
