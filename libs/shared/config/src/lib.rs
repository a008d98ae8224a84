use std::env;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_CSV_PATH: &str = "All_docs.csv";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_FUZZY_THRESHOLD: u8 = 60;
pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub doctors_csv_path: String,
    pub host: String,
    pub port: u16,
    pub fuzzy_threshold: u8,
    pub default_page_size: usize,
    pub max_page_size: usize,
    pub required_practice_mode: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            doctors_csv_path: DEFAULT_CSV_PATH.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            required_practice_mode: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut config = Self {
            doctors_csv_path: env::var("DOCTORS_CSV_PATH")
                .unwrap_or_else(|_| {
                    warn!("DOCTORS_CSV_PATH not set, using default '{}'", DEFAULT_CSV_PATH);
                    DEFAULT_CSV_PATH.to_string()
                }),
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: parse_var("PORT", DEFAULT_PORT),
            fuzzy_threshold: parse_var("FUZZY_THRESHOLD", DEFAULT_FUZZY_THRESHOLD),
            default_page_size: parse_var("DEFAULT_PAGE_SIZE", DEFAULT_PAGE_SIZE),
            max_page_size: parse_var("MAX_PAGE_SIZE", DEFAULT_MAX_PAGE_SIZE),
            required_practice_mode: env::var("REQUIRED_PRACTICE_MODE")
                .ok()
                .map(|mode| mode.trim().to_string())
                .filter(|mode| !mode.is_empty()),
        };

        config.sanitize();
        config
    }

    /// Pulls out-of-range tunables back to usable values.
    pub fn sanitize(&mut self) {
        if self.fuzzy_threshold > 100 {
            warn!("FUZZY_THRESHOLD {} exceeds 100, clamping", self.fuzzy_threshold);
            self.fuzzy_threshold = 100;
        }
        if self.max_page_size == 0 {
            warn!("MAX_PAGE_SIZE must be positive, using default");
            self.max_page_size = DEFAULT_MAX_PAGE_SIZE;
        }
        if self.default_page_size == 0 {
            warn!("DEFAULT_PAGE_SIZE must be positive, using default");
            self.default_page_size = DEFAULT_PAGE_SIZE;
        }
        if self.default_page_size > self.max_page_size {
            warn!(
                "DEFAULT_PAGE_SIZE {} exceeds MAX_PAGE_SIZE {}, clamping",
                self.default_page_size, self.max_page_size
            );
            self.default_page_size = self.max_page_size;
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr + std::fmt::Display + Copy>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using default {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}
