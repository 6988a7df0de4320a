use std::time::Duration;

use anyhow::{Context, Result};

use crate::generation::ats_scoring::KeywordSet;
use crate::generation::pipeline::PipelineOptions;
use crate::layout::font_metrics::FontFamily;
use crate::layout::page_setup::{Margins, PageSize, Rgb};
use crate::layout::{BulletGlyphs, LineClassifier, PageLayout};
use crate::llm_client::{GeminiSettings, DEFAULT_API_BASE, DEFAULT_MODEL};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MARGIN_PT: f32 = 40.0;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_api_base: String,
    pub gemini_model: String,
    pub gemini_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
    pub page_size: PageSize,
    pub margins: Margins,
    pub font_family: FontFamily,
    pub heading_color: Rgb,
    pub keywords: KeywordSet,
    pub bullets: BulletGlyphs,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            get(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let gemini_timeout = match get("GEMINI_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .context("GEMINI_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let port = match get("PORT") {
            Some(v) => v
                .trim()
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => DEFAULT_PORT,
        };

        let page_size = match get("PAGE_SIZE") {
            Some(v) => PageSize::parse(&v).context("Invalid PAGE_SIZE")?,
            None => PageSize::LETTER,
        };

        let margins = match get("PAGE_MARGINS") {
            Some(v) => Margins::parse(&v).context("Invalid PAGE_MARGINS")?,
            None => Margins::uniform(DEFAULT_MARGIN_PT),
        };

        let font_family = match get("FONT_FAMILY") {
            Some(v) => FontFamily::from_name(&v).with_context(|| {
                format!("Invalid FONT_FAMILY '{v}' (expected helvetica, times or courier)")
            })?,
            None => FontFamily::Helvetica,
        };

        let heading_color = match get("HEADING_COLOR") {
            Some(v) => Rgb::from_hex(&v).context("Invalid HEADING_COLOR")?,
            None => Rgb::BLACK,
        };

        let keywords = match get("ATS_KEYWORDS") {
            Some(v) => KeywordSet::from_csv(&v),
            None => KeywordSet::default(),
        };
        if keywords.is_empty() {
            anyhow::bail!("ATS_KEYWORDS must name at least one keyword");
        }

        let bullets = get("BULLET_MARKERS")
            .map(|v| BulletGlyphs::from_markers(&v))
            .unwrap_or_default();

        let config = Config {
            gemini_api_key: require("GEMINI_API_KEY")?,
            gemini_api_base: get("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_timeout: Duration::from_secs(gemini_timeout),
            port,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            page_size,
            margins,
            font_family,
            heading_color,
            keywords,
            bullets,
        };

        config
            .page_layout()
            .validate()
            .context("PAGE_MARGINS leave no room on the page")?;

        Ok(config)
    }

    pub fn gemini_settings(&self) -> GeminiSettings {
        GeminiSettings {
            api_key: self.gemini_api_key.clone(),
            api_base: self.gemini_api_base.clone(),
            model: self.gemini_model.clone(),
            timeout: self.gemini_timeout,
        }
    }

    pub fn page_layout(&self) -> PageLayout {
        PageLayout::new(self.page_size, self.margins, self.font_family, self.heading_color)
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            classifier: LineClassifier::new(self.bullets.clone()),
            layout: self.page_layout(),
            keywords: self.keywords.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("GEMINI_API_KEY", "k")]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.gemini_model, DEFAULT_MODEL);
        assert_eq!(config.gemini_api_base, DEFAULT_API_BASE);
        assert_eq!(config.gemini_timeout, Duration::from_secs(120));
        assert_eq!(config.page_size, PageSize::LETTER);
        assert_eq!(config.margins, Margins::uniform(40.0));
        assert_eq!(config.font_family, FontFamily::Helvetica);
        assert_eq!(config.keywords, KeywordSet::default());
        assert_eq!(config.bullets, BulletGlyphs::default());
    }

    #[test]
    fn test_missing_api_key_fails() {
        let err = config_from(&[]).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));

        // Blank counts as unset.
        assert!(config_from(&[("GEMINI_API_KEY", "  ")]).is_err());
    }

    #[test]
    fn test_page_overrides() {
        let config = config_from(&[
            ("GEMINI_API_KEY", "k"),
            ("PAGE_SIZE", "a4"),
            ("PAGE_MARGINS", "1in,20mm,1in,20mm"),
            ("FONT_FAMILY", "Times"),
            ("HEADING_COLOR", "#1F4E79"),
        ])
        .unwrap();

        assert_eq!(config.page_size, PageSize::A4);
        assert!((config.margins.top - 72.0).abs() < 1e-3);
        assert!((config.margins.right - 56.693).abs() < 1e-2);

        let layout = config.page_layout();
        assert_eq!(layout.heading_style.face.family, FontFamily::Times);
        assert!((layout.heading_style.color.r - 0x1F as f32 / 255.0).abs() < 1e-4);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(config_from(&[("GEMINI_API_KEY", "k"), ("PORT", "http")]).is_err());
        assert!(config_from(&[("GEMINI_API_KEY", "k"), ("PAGE_SIZE", "tabloid")]).is_err());
        assert!(config_from(&[("GEMINI_API_KEY", "k"), ("FONT_FAMILY", "comic")]).is_err());
        assert!(config_from(&[("GEMINI_API_KEY", "k"), ("HEADING_COLOR", "navy")]).is_err());
        assert!(config_from(&[("GEMINI_API_KEY", "k"), ("PAGE_MARGINS", "400")]).is_err());
        assert!(config_from(&[("GEMINI_API_KEY", "k"), ("ATS_KEYWORDS", " , ")]).is_err());
    }

    #[test]
    fn test_keyword_and_bullet_overrides() {
        let config = config_from(&[
            ("GEMINI_API_KEY", "k"),
            ("ATS_KEYWORDS", "Rust, Tokio, rust"),
            ("BULLET_MARKERS", "- \u{25C6}"),
        ])
        .unwrap();

        assert_eq!(config.keywords.iter().collect::<Vec<_>>(), vec!["rust", "tokio"]);
        let classifier = config.pipeline_options().classifier;
        assert_eq!(
            classifier.classify("\u{25C6} Axum"),
            crate::layout::ClassifiedLine::Bullet("\u{2022} Axum".into())
        );
        // '*' is not in the overridden set
        assert_eq!(
            classifier.classify("* Axum"),
            crate::layout::ClassifiedLine::Body("* Axum".into())
        );
    }
}
