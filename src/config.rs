//! Runtime settings.
//!
//! Every value has a default so the binaries run with no flags; `.env` and the
//! process environment can override them.

use std::path::{Path, PathBuf};

use crate::error::{AppError, ErrorKind};

pub const DEFAULT_TARIFF_URL: &str = "https://en.wikipedia.org/wiki/List_of_countries_by_tariff_rate";
pub const DEFAULT_GDP_URL: &str =
    "https://en.wikipedia.org/wiki/List_of_countries_by_GDP_(PPP)_per_capita";

pub const TARIFF_CSV: &str = "tariff_rates.csv";
pub const GDP_CSV: &str = "gdp_ppp_per_capita.csv";
pub const CHART_PNG: &str = "gdp_vs_tariff.png";

const DEFAULT_SKETCH_SEED: u64 = 42;

#[derive(Debug, Clone)]
pub struct Settings {
    pub tariff_url: String,
    pub gdp_url: String,
    pub out_dir: PathBuf,
    pub user_agent: String,
    /// Explicit font for chart text; when unset, well-known system paths are searched.
    pub font_path: Option<PathBuf>,
    pub sketch_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tariff_url: DEFAULT_TARIFF_URL.to_string(),
            gdp_url: DEFAULT_GDP_URL.to_string(),
            out_dir: PathBuf::from("."),
            user_agent: format!("tariff-gdp/{}", env!("CARGO_PKG_VERSION")),
            font_path: None,
            sketch_seed: DEFAULT_SKETCH_SEED,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut settings = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = get("TGDP_TARIFF_URL") {
            settings.tariff_url = url;
        }
        if let Some(url) = get("TGDP_GDP_URL") {
            settings.gdp_url = url;
        }
        if let Some(dir) = get("TGDP_OUT_DIR") {
            settings.out_dir = PathBuf::from(dir);
        }
        if let Some(agent) = get("TGDP_USER_AGENT") {
            settings.user_agent = agent;
        }
        settings.font_path = get("TGDP_FONT_PATH").map(PathBuf::from);
        if let Some(seed) = get("TGDP_SKETCH_SEED") {
            settings.sketch_seed = seed.parse().map_err(|e| {
                AppError::new(ErrorKind::Config, format!("TGDP_SKETCH_SEED '{seed}' is not a u64: {e}"))
            })?;
        }

        Ok(settings)
    }

    pub fn with_out_dir(mut self, dir: &Path) -> Self {
        self.out_dir = dir.to_path_buf();
        self
    }

    pub fn tariff_csv(&self) -> PathBuf {
        self.out_dir.join(TARIFF_CSV)
    }

    pub fn gdp_csv(&self) -> PathBuf {
        self.out_dir.join(GDP_CSV)
    }

    pub fn chart_png(&self) -> PathBuf {
        self.out_dir.join(CHART_PNG)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let settings = Settings::from_lookup(|_| None).unwrap();
        assert_eq!(settings.tariff_url, DEFAULT_TARIFF_URL);
        assert_eq!(settings.tariff_csv(), PathBuf::from(".").join(TARIFF_CSV));
        assert_eq!(settings.sketch_seed, 42);
        assert!(settings.font_path.is_none());
    }

    #[test]
    fn overrides_and_blank_values() {
        let vars: HashMap<&str, &str> = [
            ("TGDP_OUT_DIR", "out"),
            ("TGDP_GDP_URL", "   "),
            ("TGDP_SKETCH_SEED", "7"),
        ]
        .into_iter()
        .collect();
        let settings = Settings::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(settings.chart_png(), PathBuf::from("out").join(CHART_PNG));
        assert_eq!(settings.gdp_url, DEFAULT_GDP_URL);
        assert_eq!(settings.sketch_seed, 7);
    }

    #[test]
    fn bad_seed_is_a_config_error() {
        let err = Settings::from_lookup(|k| (k == "TGDP_SKETCH_SEED").then(|| "abc".to_string()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
