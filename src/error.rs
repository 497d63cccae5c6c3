use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid page geometry: {0}")]
    /// The page geometry cannot hold a single line of text
    InvalidGeometry(String),

    #[error("no font registered for language `{language}`")]
    /// A language was requested that has no font file registered, or the
    /// registered file does not exist
    MissingFontResource { language: String },

    #[error("unsupported language `{0}`")]
    /// The language is not one of the supported target languages
    UnsupportedLanguage(String),

    #[error("please provide some text or upload a PDF")]
    /// Nothing to convert
    EmptyInput,

    #[error("text extraction failed: {0}")]
    /// The uploaded PDF could not be read
    ExtractionFailed(String),

    #[error("translation failed: {0}")]
    /// The translation service failed or answered with something we don't understand
    TranslationFailed(String),

    #[error("speech synthesis failed: {0}")]
    /// The text-to-speech service failed
    SynthesisFailed(String),

    #[error("invalid configuration for `{key}`: {reason}")]
    /// A configuration value could not be parsed
    InvalidConfig { key: String, reason: String },

    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),
}

/// Shorthand for results carrying the crate [Error]
pub type Result<T, E = Error> = std::result::Result<T, E>;
