use crate::{font::Font, info::Info, page::Page, page::resource_name, refs::RefAllocator, Error};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref, TextStr};
use std::io::Write;

#[derive(Default)]
/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Vec<Page>,
    pub fonts: Arena<Font>,
    /// Natural language of the text, written to the catalog (e.g. `hi`)
    pub language: Option<String>,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its 0-based index
    pub fn add_page(&mut self, page: Page) -> usize {
        self.pages.push(page);
        self.pages.len() - 1
    }

    /// Add a font to the document. Fonts are stored "globally" within the
    /// document, and any page can refer to them by the returned id.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Write the entire document to the writer. The document is rendered in
    /// memory first, then written out in one go.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), Error> {
        let Document {
            info,
            pages,
            fonts,
            language,
        } = self;

        let mut refs = RefAllocator::new();
        let catalog_id = refs.next();
        let page_tree_id = refs.next();

        let mut pdf = Pdf::new();
        if let Some(info) = info {
            info.write(refs.next(), &mut pdf);
        }

        let page_ids = refs.take(pages.len());
        pdf.pages(page_tree_id)
            .count(page_ids.len() as i32)
            .kids(page_ids.iter().copied());

        let font_refs: Vec<(Id<Font>, Ref)> = fonts
            .iter()
            .map(|(id, font)| {
                let name = resource_name(id);
                (id, font.write(&mut refs, &name, &mut pdf))
            })
            .collect();

        for (page, id) in pages.iter().zip(page_ids) {
            let contents_id = refs.next();
            page.write(id, contents_id, page_tree_id, &fonts, &font_refs, &mut pdf)?;
        }

        let mut catalog = pdf.catalog(catalog_id);
        catalog.pages(page_tree_id);
        if let Some(language) = &language {
            catalog.lang(TextStr(language));
        }
        catalog.finish();

        w.write_all(pdf.finish().as_slice()).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize;

    fn render(doc: Document) -> String {
        let mut out = Vec::new();
        doc.write(&mut out).expect("document can be written");
        String::from_utf8_lossy(&out).into_owned()
    }

    #[test]
    fn writes_one_page_object_per_page() {
        let mut doc = Document::default();
        doc.add_page(Page::new(pagesize::LETTER));
        doc.add_page(Page::new(pagesize::LETTER));
        let pdf = render(doc);

        assert!(pdf.starts_with("%PDF-"));
        assert!(pdf.contains("/Count 2"));
        assert_eq!(pdf.matches("/Type /Page\n").count(), 2);
        assert!(pdf.contains("/MediaBox [0 0 612 792]"));
        assert!(pdf.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn info_is_optional() {
        let mut doc = Document::default();
        doc.add_page(Page::new(pagesize::A4));
        assert!(!render(doc).contains("/Creator"));

        let mut doc = Document::default();
        doc.add_page(Page::new(pagesize::A4));
        let mut info = Info::new();
        info.title("Translated");
        doc.set_info(info);
        let pdf = render(doc);
        assert!(pdf.contains("/Title (Translated)"));
        assert!(pdf.contains("/Creator"));
    }

    #[test]
    fn language_lands_in_the_catalog() {
        let mut doc = Document::default();
        doc.add_page(Page::new(pagesize::LETTER));
        doc.language = Some("hi".into());
        assert!(render(doc).contains("/Lang (hi)"));
    }
}
