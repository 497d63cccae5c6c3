use crate::error::{Error, Result};
use crate::font::Font;
use crate::language::LanguageCode;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Font used for Devanagari-script languages unless configured otherwise
pub const DEVANAGARI_FONT: &str = "NotoSansDevanagari-Regular.ttf";
/// Font used for every other language unless configured otherwise
pub const DEFAULT_FONT: &str = "DejaVuSans.ttf";

/// Which font file renders which target language.
///
/// A language without its own entry uses the fallback font, if there is one.
/// Call [FontRegistry::validate_for] at startup for the language a PDF will
/// be typeset in, so a missing file is reported before any translation work
/// is done.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontRegistry {
    fonts: BTreeMap<LanguageCode, PathBuf>,
    fallback: Option<PathBuf>,
}

impl FontRegistry {
    /// An empty registry: every lookup fails until fonts are registered
    pub fn new() -> FontRegistry {
        FontRegistry::default()
    }

    /// Hindi in Noto Sans Devanagari, everything else in DejaVu Sans, both
    /// looked up in `dir`
    pub fn with_defaults<P: AsRef<Path>>(dir: P) -> FontRegistry {
        let dir = dir.as_ref();
        let mut registry = FontRegistry::new();
        registry
            .register(LanguageCode::Hindi, dir.join(DEVANAGARI_FONT))
            .set_fallback(dir.join(DEFAULT_FONT));
        registry
    }

    /// Parse a comma separated list of `code=file` entries, where the code `*`
    /// sets the fallback. Relative file names are resolved against `dir`.
    ///
    /// ```
    /// use polyvox::{FontRegistry, LanguageCode};
    ///
    /// let registry = FontRegistry::parse("hi=Noto.ttf, *=DejaVuSans.ttf", "fonts").unwrap();
    /// assert!(registry.resolve(LanguageCode::Hindi).unwrap().ends_with("Noto.ttf"));
    /// assert!(registry.resolve(LanguageCode::Korean).unwrap().ends_with("DejaVuSans.ttf"));
    /// ```
    pub fn parse<P: AsRef<Path>>(entries: &str, dir: P) -> Result<FontRegistry> {
        let dir = dir.as_ref();
        let mut registry = FontRegistry::new();
        for entry in entries.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (code, file) = entry.split_once('=').ok_or_else(|| Error::InvalidConfig {
                key: "fonts".into(),
                reason: format!("expected `code=file`, got `{entry}`"),
            })?;
            let path = dir.join(file.trim());
            match code.trim() {
                "*" => {
                    registry.set_fallback(path);
                }
                code => {
                    registry.register(code.parse()?, path);
                }
            }
        }
        Ok(registry)
    }

    pub fn register<P: Into<PathBuf>>(&mut self, language: LanguageCode, path: P) -> &mut Self {
        self.fonts.insert(language, path.into());
        self
    }

    pub fn set_fallback<P: Into<PathBuf>>(&mut self, path: P) -> &mut Self {
        self.fallback = Some(path.into());
        self
    }

    /// Check that every registered font file exists
    pub fn validate(&self) -> Result<()> {
        for (language, path) in &self.fonts {
            if !path.is_file() {
                tracing::error!(%language, path = %path.display(), "font file not found");
                return Err(Error::MissingFontResource {
                    language: language.to_string(),
                });
            }
        }
        if let Some(path) = &self.fallback {
            if !path.is_file() {
                tracing::error!(path = %path.display(), "fallback font file not found");
                return Err(Error::MissingFontResource {
                    language: "*".into(),
                });
            }
        }
        Ok(())
    }

    /// Check that the font file `language` would be rendered with exists
    pub fn validate_for(&self, language: LanguageCode) -> Result<()> {
        let path = self.resolve(language)?;
        if !path.is_file() {
            tracing::error!(%language, path = %path.display(), "font file not found");
            return Err(Error::MissingFontResource {
                language: language.to_string(),
            });
        }
        Ok(())
    }

    /// The font file registered for `language`
    pub fn resolve(&self, language: LanguageCode) -> Result<&Path> {
        self.fonts
            .get(&language)
            .or(self.fallback.as_ref())
            .map(PathBuf::as_path)
            .ok_or_else(|| Error::MissingFontResource {
                language: language.to_string(),
            })
    }

    /// Read and parse the font registered for `language`
    pub fn load(&self, language: LanguageCode) -> Result<Font> {
        let path = self.resolve(language)?;
        tracing::debug!(%language, path = %path.display(), "loading font");
        Font::from_file(path).map_err(|err| match err {
            Error::Io(_) => Error::MissingFontResource {
                language: language.to_string(),
            },
            other => other,
        })
    }
}
