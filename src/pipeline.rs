use crate::canvas::{render_pdf, PdfSettings};
use crate::error::{Error, Result};
use crate::extract::{normalize_whitespace, TextExtractor};
use crate::fonts::FontRegistry;
use crate::info::Info;
use crate::language::LanguageCode;
use crate::speech::SpeechSynthesizer;
use crate::translate::Translator;
use std::sync::Arc;

/// Number of characters of the translation shown as a preview
pub const PREVIEW_CHARS: usize = 300;

/// What the user handed in
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Text typed in directly
    Text(String),
    /// Raw bytes of an uploaded PDF
    Pdf(Vec<u8>),
}

/// A single conversion: one input, one target language
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub input: Input,
    pub target: LanguageCode,
    /// Also typeset the translation as a PDF. Set for PDF input by default.
    pub render_pdf: bool,
}

impl ConversionRequest {
    pub fn new(input: Input, target: LanguageCode) -> Self {
        let render_pdf = matches!(input, Input::Pdf(_));
        Self {
            input,
            target,
            render_pdf,
        }
    }

    pub fn with_pdf(mut self, render_pdf: bool) -> Self {
        self.render_pdf = render_pdf;
        self
    }
}

/// A produced file, ready to be saved or downloaded
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Everything a conversion produced. Nothing is kept between conversions.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOutput {
    pub target: LanguageCode,
    pub translated_text: String,
    pub audio: Artifact,
    pub pdf: Option<Artifact>,
}

impl ConversionOutput {
    /// The start of the translation, with "..." when it was cut short
    pub fn preview(&self) -> String {
        let mut preview: String = self.translated_text.chars().take(PREVIEW_CHARS).collect();
        if self.translated_text.chars().nth(PREVIEW_CHARS).is_some() {
            preview.push_str("...");
        }
        preview
    }
}

/// Runs a conversion: translate, then synthesize speech, then (optionally)
/// typeset the translation as a PDF
pub struct Converter {
    extractor: Arc<dyn TextExtractor>,
    translator: Arc<dyn Translator>,
    speech: Arc<dyn SpeechSynthesizer>,
    fonts: FontRegistry,
    pdf_settings: PdfSettings,
}

impl Converter {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        translator: Arc<dyn Translator>,
        speech: Arc<dyn SpeechSynthesizer>,
        fonts: FontRegistry,
        pdf_settings: PdfSettings,
    ) -> Self {
        Self {
            extractor,
            translator,
            speech,
            fonts,
            pdf_settings,
        }
    }

    /// The text to translate: typed text as is, or the whitespace-normalized
    /// text of every page of an uploaded PDF
    pub fn source_text(&self, input: &Input) -> Result<String> {
        match input {
            Input::Text(text) => Ok(text.clone()),
            Input::Pdf(bytes) => {
                let text = self.extractor.extract(bytes)?;
                Ok(normalize_whitespace(&text))
            }
        }
    }

    /// Run the whole conversion. Any failure aborts it and nothing is returned.
    pub async fn convert(&self, request: ConversionRequest) -> Result<ConversionOutput> {
        let target = request.target;
        let text = self.source_text(&request.input)?;
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        tracing::info!(
            %target,
            text_length = text.chars().count(),
            render_pdf = request.render_pdf,
            "starting conversion"
        );

        let translated_text = self.translator.translate(&text, target).await?;
        let audio = self.speech.synthesize(&translated_text, target).await?;

        let pdf = if request.render_pdf {
            Some(self.typeset(&translated_text, target)?)
        } else {
            None
        };

        tracing::info!(
            %target,
            audio_size_bytes = audio.len(),
            pdf_size_bytes = pdf.as_ref().map(|pdf| pdf.bytes.len()),
            "conversion completed"
        );

        Ok(ConversionOutput {
            target,
            translated_text,
            audio: Artifact {
                file_name: format!("output_{target}.mp3"),
                mime_type: "audio/mpeg",
                bytes: audio,
            },
            pdf,
        })
    }

    fn typeset(&self, text: &str, target: LanguageCode) -> Result<Artifact> {
        let font = self.fonts.load(target)?;
        let mut info = Info::new();
        info.title(format!("Translation ({})", target.display_name()));
        let bytes = render_pdf(text, font, &self.pdf_settings, info, Some(target.as_str()))?;
        Ok(Artifact {
            file_name: format!("translated_{target}.pdf"),
            mime_type: "application/pdf",
            bytes,
        })
    }
}
