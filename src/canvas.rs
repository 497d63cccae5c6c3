use crate::document::Document;
use crate::error::Result;
use crate::font::Font;
use crate::info::Info;
use crate::layout::{paginate, render_into, PageGeometry, RenderSink};
use crate::page::{Page, SpanFont, SpanLayout};
use crate::pagesize::PageSize;
use crate::units::Pt;

/// How translated text is typeset into a PDF
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PdfSettings {
    pub geometry: PageGeometry,
    pub font_size: Pt,
}

impl Default for PdfSettings {
    fn default() -> Self {
        PdfSettings {
            geometry: PageGeometry::default(),
            font_size: Pt(12.0),
        }
    }
}

/// A PDF [RenderSink]: every line is drawn in a single font at a fixed size,
/// and every page break starts a new page of the same size.
pub struct Canvas {
    document: Document,
    font: SpanFont,
    page_size: PageSize,
    current: Page,
}

impl Canvas {
    pub fn new(font: Font, font_size: Pt, page_size: PageSize) -> Canvas {
        let mut document = Document::default();
        let id = document.add_font(font);
        Canvas {
            document,
            font: SpanFont {
                id,
                size: font_size,
            },
            page_size,
            current: Page::new(page_size),
        }
    }

    pub fn set_info(&mut self, info: Info) {
        self.document.set_info(info);
    }

    /// Tag the document with the language of its text
    pub fn set_language<S: ToString>(&mut self, language: S) {
        self.document.language = Some(language.to_string());
    }

    /// Number of pages so far, including the one being drawn on
    pub fn page_count(&self) -> usize {
        self.document.pages.len() + 1
    }

    /// Close the current page and serialise the whole document
    pub fn finish(mut self) -> Result<Vec<u8>> {
        self.document.add_page(self.current);
        let mut out = Vec::new();
        self.document.write(&mut out)?;
        Ok(out)
    }
}

impl RenderSink for Canvas {
    fn draw_text(&mut self, segment: &str, x: Pt, y: Pt) {
        // blank lines only take up vertical space
        if segment.is_empty() {
            return;
        }
        self.current.add_span(SpanLayout {
            text: segment.to_string(),
            font: self.font,
            coords: (x, y),
        });
    }

    fn new_page(&mut self) {
        let finished = std::mem::replace(&mut self.current, Page::new(self.page_size));
        self.document.add_page(finished);
    }
}

/// Paginate `text` and typeset it with `font`, returning the PDF bytes. The
/// geometry is checked before any page is created.
pub fn render_pdf(
    text: &str,
    font: Font,
    settings: &PdfSettings,
    info: Info,
    language: Option<&str>,
) -> Result<Vec<u8>> {
    let placements = paginate(text, &settings.geometry)?;
    let page_size = (settings.geometry.page_width, settings.geometry.page_height);

    let mut canvas = Canvas::new(font, settings.font_size, page_size);
    canvas.set_info(info);
    if let Some(language) = language {
        canvas.set_language(language);
    }
    let pages = render_into(placements, &mut canvas);

    tracing::debug!(
        pages,
        characters = text.chars().count(),
        "translated text laid out"
    );
    canvas.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dejavu() -> Font {
        Font::load(include_bytes!("../assets/DejaVuSans.ttf").to_vec()).expect("can load font")
    }

    fn as_text(pdf: &[u8]) -> String {
        String::from_utf8_lossy(pdf).into_owned()
    }

    #[test]
    fn new_page_closes_the_current_one() {
        let mut canvas = Canvas::new(dejavu(), Pt(12.0), crate::pagesize::LETTER);
        canvas.draw_text("first", Pt(40.0), Pt(752.0));
        assert_eq!(canvas.page_count(), 1);
        canvas.new_page();
        canvas.draw_text("second", Pt(40.0), Pt(752.0));
        assert_eq!(canvas.page_count(), 2);
        assert_eq!(canvas.document.pages[0].spans.len(), 1);
        assert_eq!(canvas.current.spans[0].text, "second");
    }

    #[test]
    fn blank_segments_are_not_drawn() {
        let mut canvas = Canvas::new(dejavu(), Pt(12.0), crate::pagesize::LETTER);
        canvas.draw_text("", Pt(40.0), Pt(752.0));
        assert!(canvas.current.is_empty());
    }

    #[test]
    fn renders_one_pdf_page_per_layout_page() {
        let settings = PdfSettings {
            geometry: PageGeometry::new((Pt(200.0), Pt(100.0)), Pt(10.0), Pt(50.0), 5),
            font_size: Pt(12.0),
        };
        // 5 chunks, 2 per page
        let pdf = render_pdf("aaaaabbbbbcccccdddddeeeee", dejavu(), &settings, Info::new(), Some("fr"))
            .unwrap();
        let pdf = as_text(&pdf);
        assert!(pdf.contains("/Count 3"));
        assert!(pdf.contains("/MediaBox [0 0 200 100]"));
        assert!(pdf.contains("/Identity-H"));
        assert!(pdf.contains("/Lang (fr)"));
    }

    #[test]
    fn invalid_geometry_fails_before_rendering() {
        let settings = PdfSettings {
            geometry: PageGeometry {
                wrap_width: 0,
                ..PageGeometry::default()
            },
            font_size: Pt(12.0),
        };
        let err = render_pdf("text", dejavu(), &settings, Info::new(), None).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidGeometry(_)));
    }
}
