use clap::Parser;
use polyvox::{
    Config, ConversionRequest, Converter, GoogleSpeech, GoogleTranslator, Input, LanguageCode,
    LogFormat, PdfTextExtractor,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "polyvox", version)]
#[command(about = "Translate text or a PDF, then read it aloud and typeset the translation")]
struct App {
    /// Text to translate
    #[arg(short, long, conflicts_with = "pdf", required_unless_present_any = ["pdf", "list_languages"])]
    text: Option<String>,

    /// PDF file whose text should be translated
    #[arg(short, long)]
    pdf: Option<PathBuf>,

    /// Target language, as a code (`hi`) or a name (`Hindi`)
    #[arg(short, long, env = "POLYVOX_LANG", default_value = "en")]
    lang: LanguageCode,

    /// Directory the audio and PDF are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Also typeset the translation of typed text as a PDF
    #[arg(long)]
    pdf_out: bool,

    /// Print the supported languages and exit
    #[arg(long)]
    list_languages: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = App::parse();

    if app.list_languages {
        for language in LanguageCode::ALL {
            println!("{:<6} {}", language.as_str(), language.display_name());
        }
        return Ok(());
    }

    let config = Config::from_env()?;
    init_logging(&config);

    let input = match (&app.text, &app.pdf) {
        (Some(text), _) => Input::Text(text.clone()),
        (None, Some(path)) => Input::Pdf(std::fs::read(path)?),
        (None, None) => return Err(polyvox::Error::EmptyInput.into()),
    };
    let request = ConversionRequest::new(input, app.lang);
    let request = if app.pdf_out {
        request.with_pdf(true)
    } else {
        request
    };

    let fonts = config.font_registry()?;
    if request.render_pdf {
        fonts.validate_for(request.target)?;
    }
    if let Err(e) = fonts.validate() {
        tracing::warn!(error = %e, "font configuration is incomplete");
    }

    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let converter = Converter::new(
        Arc::new(PdfTextExtractor),
        Arc::new(GoogleTranslator::new(client.clone(), config.translate_url.clone())),
        Arc::new(GoogleSpeech::new(client, config.tts_url.clone())),
        fonts,
        config.pdf,
    );

    let output = match converter.convert(request).await {
        Ok(output) => output,
        Err(e) => {
            tracing::error!(error = %e, "conversion failed");
            return Err(e.into());
        }
    };

    std::fs::create_dir_all(&app.out_dir)?;
    for artifact in std::iter::once(&output.audio).chain(output.pdf.as_ref()) {
        let path = app.out_dir.join(&artifact.file_name);
        std::fs::write(&path, &artifact.bytes)?;
        tracing::info!(path = %path.display(), mime_type = artifact.mime_type, "artifact written");
    }

    println!("{} ({})", output.target.display_name(), output.target);
    println!("{}", output.preview());
    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "polyvox=info".into());
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
