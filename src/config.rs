use crate::canvas::PdfSettings;
use crate::error::{Error, Result};
use crate::fonts::{FontRegistry, DEFAULT_FONT, DEVANAGARI_FONT};
use crate::layout::PageGeometry;
use crate::pagesize;
use crate::speech::GOOGLE_TTS_URL;
use crate::translate::GOOGLE_TRANSLATE_URL;
use crate::units::Pt;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory relative font file names are resolved against
    pub font_dir: PathBuf,
    /// `code=file` entries, `*` for the fallback
    pub fonts: String,
    pub pdf: PdfSettings,
    pub translate_url: String,
    pub tts_url: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            font_dir: PathBuf::from("assets"),
            fonts: format!("hi={DEVANAGARI_FONT},*={DEFAULT_FONT}"),
            pdf: PdfSettings::default(),
            translate_url: GOOGLE_TRANSLATE_URL.to_string(),
            tts_url: GOOGLE_TTS_URL.to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Read the configuration from the environment, after loading a `.env`
    /// file if there is one. Unset keys keep their defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let geometry = defaults.pdf.geometry;

        let page_size = match lookup("POLYVOX_PAGE_SIZE") {
            Some(name) => pagesize::by_name(&name)?,
            None => (geometry.page_width, geometry.page_height),
        };
        let margin = parse_or(&lookup, "POLYVOX_MARGIN", geometry.top_margin.0)?;
        let line_height = parse_or(&lookup, "POLYVOX_LINE_HEIGHT", geometry.line_height.0)?;
        let wrap_width = parse_or(&lookup, "POLYVOX_WRAP_WIDTH", geometry.wrap_width)?;
        let font_size = parse_or(&lookup, "POLYVOX_FONT_SIZE", defaults.pdf.font_size.0)?;

        let geometry = PageGeometry::new(page_size, Pt(margin), Pt(line_height), wrap_width);
        geometry.validate()?;

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::to_lowercase).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Config {
            font_dir: lookup("POLYVOX_FONT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.font_dir),
            fonts: lookup("POLYVOX_FONTS").unwrap_or(defaults.fonts),
            pdf: PdfSettings {
                geometry,
                font_size: Pt(font_size),
            },
            translate_url: lookup("POLYVOX_TRANSLATE_URL").unwrap_or(defaults.translate_url),
            tts_url: lookup("POLYVOX_TTS_URL").unwrap_or(defaults.tts_url),
            log_format,
        })
    }

    /// The font registry described by this configuration
    pub fn font_registry(&self) -> Result<FontRegistry> {
        FontRegistry::parse(&self.fonts, &self.font_dir)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|e: T::Err| Error::InvalidConfig {
            key: key.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LanguageCode;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_reproduce_the_letter_layout() {
        let config = config(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.pdf.geometry, PageGeometry::default());
        assert_eq!(config.pdf.font_size, Pt(12.0));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("POLYVOX_PAGE_SIZE", "a4"),
            ("POLYVOX_WRAP_WIDTH", "80"),
            ("POLYVOX_LINE_HEIGHT", "14.5"),
            ("POLYVOX_FONT_DIR", "/usr/share/fonts"),
            ("POLYVOX_FONTS", "*=Noto.ttf"),
            ("LOG_FORMAT", "JSON"),
        ])
        .unwrap();
        assert_eq!(config.pdf.geometry.page_height, pagesize::A4.1);
        assert_eq!(config.pdf.geometry.wrap_width, 80);
        assert_eq!(config.pdf.geometry.line_height, Pt(14.5));
        assert_eq!(config.log_format, LogFormat::Json);
        let fonts = config.font_registry().unwrap();
        assert_eq!(
            fonts.resolve(LanguageCode::Hindi).unwrap(),
            std::path::Path::new("/usr/share/fonts/Noto.ttf")
        );
    }

    #[test]
    fn rejects_unparseable_values() {
        let err = config(&[("POLYVOX_WRAP_WIDTH", "wide")]).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { ref key, .. } if key == "POLYVOX_WRAP_WIDTH"));
    }

    #[test]
    fn rejects_impossible_geometry() {
        let err = config(&[("POLYVOX_WRAP_WIDTH", "0")]).unwrap_err();
        assert!(matches!(err, Error::InvalidGeometry(_)));
    }
}
