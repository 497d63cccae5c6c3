use crate::font::Font;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Name, Pdf, Ref};
use std::io::Write;

/// Which font, and at what size, a span is drawn with
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A run of text placed with its baseline starting at `coords`
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub coords: (Pt, Pt),
}

/// A single page of the document and the text laid out on it
#[derive(Debug, Clone)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// The laid out text
    pub spans: Vec<SpanLayout>,
}

impl Page {
    pub fn new(size: PageSize) -> Page {
        Page {
            media_box: Rect::from_size(size.0, size.1),
            spans: Vec::new(),
        }
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.spans.push(span);
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Render the spans into a PDF content stream. Characters the font has no
    /// glyph for are drawn with its fallback glyph.
    #[allow(clippy::write_with_newline)]
    pub(crate) fn render(&self, fonts: &Arena<Font>) -> Result<Vec<u8>, std::io::Error> {
        let mut content: Vec<u8> = Vec::new();

        for span in self.spans.iter().filter(|span| !span.text.is_empty()) {
            let Some(font) = fonts.get(span.font.id) else {
                continue;
            };
            write!(content, "BT\n")?;
            write!(
                content,
                "/F{} {} Tf\n",
                span.font.id.index(),
                span.font.size.0
            )?;
            write!(content, "{} {} Td\n", span.coords.0 .0, span.coords.1 .0)?;
            write!(content, "<")?;
            for ch in span.text.chars() {
                write!(content, "{:04x}", font.glyph_or_fallback(ch))?;
            }
            write!(content, "> Tj\n")?;
            write!(content, "ET\n")?;
        }

        Ok(content)
    }

    pub(crate) fn write(
        &self,
        id: Ref,
        contents_id: Ref,
        parent: Ref,
        fonts: &Arena<Font>,
        font_refs: &[(Id<Font>, Ref)],
        pdf: &mut Pdf,
    ) -> Result<(), std::io::Error> {
        let mut page = pdf.page(id);
        page.media_box(self.media_box.into());
        page.parent(parent);
        page.contents(contents_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, font_ref) in font_refs {
            let name = resource_name(*font_id);
            resource_fonts.pair(Name(name.as_bytes()), *font_ref);
        }
        resource_fonts.finish();
        resources.finish();
        page.finish();

        let rendered = self.render(fonts)?;
        pdf.stream(contents_id, rendered.as_slice());
        Ok(())
    }
}

/// Name a font is registered under in page resources and content streams
pub(crate) fn resource_name(id: Id<Font>) -> String {
    format!("F{}", id.index())
}
