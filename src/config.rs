//! Runtime configuration read from environment variables.
//!
//! Every value has a default so the binary runs with an empty environment.
//! Command line flags override whatever is loaded here.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, Result};

pub const DEFAULT_COUNTRIES_URL: &str =
    "https://restcountries.com/v3.1/all?fields=name,capital,region,population";
pub const DEFAULT_COUNTRIES_LIMIT: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAP_FILE: &str = "ruta_colombia.html";
pub const DEFAULT_DISCS: u32 = 3;
pub const MAX_DISCS: u32 = 10;

/// Values given on the command line. A set field wins over its environment
/// variable, which is then not read at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub countries_limit: Option<usize>,
    pub map_file: Option<PathBuf>,
    pub hanoi_discs: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Full URL of the countries endpoint, query string included
    pub countries_url: String,
    /// How many countries to print
    pub countries_limit: usize,
    pub http_timeout: Duration,
    /// Where the route map is written
    pub map_file: PathBuf,
    pub hanoi_discs: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            countries_url: DEFAULT_COUNTRIES_URL.to_string(),
            countries_limit: DEFAULT_COUNTRIES_LIMIT,
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            map_file: PathBuf::from(DEFAULT_MAP_FILE),
            hanoi_discs: DEFAULT_DISCS,
        }
    }
}

impl AppConfig {
    /// Read `COUNTRIES_API_URL`, `COUNTRIES_LIMIT`, `HTTP_TIMEOUT_SECS`,
    /// `ROUTE_MAP_FILE` and `HANOI_DISCS` through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("COUNTRIES_API_URL").filter(|v| !v.trim().is_empty()) {
            config.countries_url = url.trim().to_string();
        }
        if let Some(raw) = lookup("COUNTRIES_LIMIT") {
            config.countries_limit = parse_number("COUNTRIES_LIMIT", &raw)?;
        }
        if let Some(raw) = lookup("HTTP_TIMEOUT_SECS") {
            config.http_timeout = Duration::from_secs(parse_number("HTTP_TIMEOUT_SECS", &raw)?);
        }
        if let Some(path) = lookup("ROUTE_MAP_FILE").filter(|v| !v.trim().is_empty()) {
            config.map_file = PathBuf::from(path.trim());
        }
        if let Some(raw) = lookup("HANOI_DISCS") {
            config.hanoi_discs = parse_number("HANOI_DISCS", &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load from the environment, letting command line values replace
    /// their variables. A malformed variable is only fatal when no flag
    /// overrides it.
    pub fn load(overrides: &Overrides) -> Result<Self> {
        Self::load_from(|key| std::env::var(key).ok(), overrides)
    }

    /// Same as [`AppConfig::load`] with a custom variable source.
    pub fn load_from<F>(lookup: F, overrides: &Overrides) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let shadowed = |key: &str| match key {
            "COUNTRIES_LIMIT" => overrides.countries_limit.is_some(),
            "ROUTE_MAP_FILE" => overrides.map_file.is_some(),
            "HANOI_DISCS" => overrides.hanoi_discs.is_some(),
            _ => false,
        };
        let mut config = Self::from_lookup(|key| if shadowed(key) { None } else { lookup(key) })?;

        if let Some(limit) = overrides.countries_limit {
            config.countries_limit = limit;
        }
        if let Some(path) = &overrides.map_file {
            config.map_file = path.clone();
        }
        if let Some(discs) = overrides.hanoi_discs {
            config.hanoi_discs = discs;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.hanoi_discs == 0 || self.hanoi_discs > MAX_DISCS {
            return Err(AppError::config(format!(
                "HANOI_DISCS must be between 1 and {MAX_DISCS}, got {}",
                self.hanoi_discs
            )));
        }
        if self.http_timeout.is_zero() {
            return Err(AppError::config("HTTP_TIMEOUT_SECS must be greater than 0"));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::config(format!("{key} must be a number, got '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.map_file, PathBuf::from("ruta_colombia.html"));
        assert_eq!(config.countries_limit, 10);
    }

    #[test]
    fn values_are_read_from_the_environment() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("COUNTRIES_API_URL", "http://localhost:9000/all"),
            ("COUNTRIES_LIMIT", "5"),
            ("HTTP_TIMEOUT_SECS", " 2 "),
            ("ROUTE_MAP_FILE", "out/map.html"),
            ("HANOI_DISCS", "4"),
        ]))
        .unwrap();

        assert_eq!(config.countries_url, "http://localhost:9000/all");
        assert_eq!(config.countries_limit, 5);
        assert_eq!(config.http_timeout, Duration::from_secs(2));
        assert_eq!(config.map_file, PathBuf::from("out/map.html"));
        assert_eq!(config.hanoi_discs, 4);
    }

    #[test]
    fn non_numeric_values_are_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("HANOI_DISCS", "three")])).unwrap_err();
        assert!(err.to_string().contains("HANOI_DISCS"));
    }

    #[test]
    fn flag_replaces_malformed_variable() {
        let overrides = Overrides {
            hanoi_discs: Some(3),
            ..Overrides::default()
        };
        let config =
            AppConfig::load_from(lookup_from(&[("HANOI_DISCS", "many")]), &overrides).unwrap();
        assert_eq!(config.hanoi_discs, 3);
    }

    #[test]
    fn flags_win_over_valid_variables() {
        let overrides = Overrides {
            countries_limit: Some(2),
            map_file: Some(PathBuf::from("flag.html")),
            hanoi_discs: None,
        };
        let config = AppConfig::load_from(
            lookup_from(&[
                ("COUNTRIES_LIMIT", "7"),
                ("ROUTE_MAP_FILE", "env.html"),
                ("HANOI_DISCS", "5"),
            ]),
            &overrides,
        )
        .unwrap();
        assert_eq!(config.countries_limit, 2);
        assert_eq!(config.map_file, PathBuf::from("flag.html"));
        assert_eq!(config.hanoi_discs, 5);
    }

    #[test]
    fn malformed_variable_without_flag_still_fails() {
        let err = AppConfig::load_from(
            lookup_from(&[("HANOI_DISCS", "many")]),
            &Overrides::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("HANOI_DISCS"));
    }

    #[test]
    fn out_of_range_flag_is_rejected() {
        let overrides = Overrides {
            hanoi_discs: Some(64),
            ..Overrides::default()
        };
        assert!(AppConfig::load_from(|_| None, &overrides).is_err());
    }

    #[test]
    fn disc_count_out_of_range_is_rejected() {
        assert!(AppConfig::from_lookup(lookup_from(&[("HANOI_DISCS", "0")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("HANOI_DISCS", "11")])).is_err());
    }
}
