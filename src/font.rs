use crate::error::Result;
use crate::refs::RefAllocator;
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;
use std::path::Path;

/// A parsed TrueType / OpenType font. The whole font file is embedded in the
/// generated PDF as a CID-keyed font, so any script the font covers
/// (Devanagari, CJK, Arabic, ...) can be drawn with it.
pub struct Font {
    pub face: OwnedFace,
    /// glyph id -> character, for every unicode mapping the font declares
    glyphs: BTreeMap<u16, char>,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.name())
            .field("glyphs", &self.glyphs.len())
            .finish()
    }
}

impl Font {
    /// Load a font from raw bytes, returning an error if the font could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        let glyphs = unicode_glyphs(face.as_face_ref());
        Ok(Font { face, glyphs })
    }

    /// Read and parse a font file from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Font> {
        let bytes = std::fs::read(path.as_ref())?;
        Font::load(bytes)
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    /// The full name of the font, or "Embedded" when the font doesn't carry one
    pub fn name(&self) -> String {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
            .unwrap_or_else(|| "Embedded".to_string())
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|gid| gid.0)
    }

    /// Glyph used to draw `ch`: the character itself, else the replacement
    /// character, else '?', else `.notdef`
    pub fn glyph_or_fallback(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// Number of glyph-to-unicode mappings in the font
    #[cfg(test)]
    fn mapped_glyphs(&self) -> usize {
        self.glyphs.len()
    }

    /// Scale factor from font units to the 1000-unit glyph space PDF expects
    fn to_glyph_space(&self) -> f32 {
        1000.0 / self.face().units_per_em() as f32
    }

    /// Write every object the font needs and return the reference of the
    /// top-level (Type0) font dictionary
    pub(crate) fn write(&self, refs: &mut RefAllocator, base_name: &str, pdf: &mut Pdf) -> Ref {
        let font_ref = refs.next();
        let cid_font_ref = self.write_cid_font(refs, base_name, pdf);
        let to_unicode_ref = self.write_to_unicode(refs, pdf);

        let mut font = pdf.type0_font(font_ref);
        font.base_font(Name(base_name.as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_ref);
        font.to_unicode(to_unicode_ref);

        font_ref
    }

    fn write_cid_font(&self, refs: &mut RefAllocator, base_name: &str, pdf: &mut Pdf) -> Ref {
        let descriptor_ref = self.write_descriptor(refs, base_name, pdf);
        let id = refs.next();
        let scaling = self.to_glyph_space();

        let mut cid_font = pdf.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(base_name.as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_ref);
        cid_font.default_width(1000.0);

        // runs of consecutive glyph ids share one widths entry
        let mut widths = cid_font.widths();
        for (start, run) in advance_runs(&self.glyph_advances()) {
            widths.consecutive(start, run.into_iter().map(|w| w as f32 * scaling));
        }
        widths.finish();

        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        id
    }

    fn glyph_advances(&self) -> BTreeMap<u16, u16> {
        self.glyphs
            .keys()
            .filter_map(|&gid| {
                self.face()
                    .glyph_hor_advance(GlyphId(gid))
                    .map(|advance| (gid, advance))
            })
            .collect()
    }

    fn write_descriptor(&self, refs: &mut RefAllocator, base_name: &str, pdf: &mut Pdf) -> Ref {
        let data_ref = refs.next();
        let data = self.face.as_slice();
        pdf.stream(data_ref, data)
            .pair(Name(b"Length1"), data.len() as i32);

        let face = self.face();
        let scaling = self.to_glyph_space();
        let bbox = face.global_bounding_box();

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }

        let id = refs.next();
        let mut descriptor = pdf.font_descriptor(id);
        descriptor.name(Name(base_name.as_bytes()));
        descriptor.flags(flags);
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(0.0);
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(face.ascender() as f32 * scaling),
        );
        descriptor.stem_v(80.0);
        descriptor.font_file2(data_ref);
        id
    }

    fn write_to_unicode(&self, refs: &mut RefAllocator, pdf: &mut Pdf) -> Ref {
        let id = refs.next();
        let cmap = to_unicode_cmap(&self.glyphs);
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            cmap.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        pdf.stream(id, compressed.as_slice())
            .filter(Filter::FlateDecode);
        id
    }
}

fn unicode_glyphs(face: &Face<'_>) -> BTreeMap<u16, char> {
    let mut glyphs = BTreeMap::new();
    let Some(cmap) = face.tables().cmap else {
        return glyphs;
    };
    for subtable in cmap.subtables.into_iter().filter(|t| t.is_unicode()) {
        subtable.codepoints(|codepoint| {
            let Ok(ch) = char::try_from(codepoint) else {
                return;
            };
            if let Some(gid) = subtable.glyph_index(codepoint).filter(|gid| gid.0 > 0) {
                glyphs.entry(gid.0).or_insert(ch);
            }
        });
    }
    glyphs
}

/// Group glyph advances into runs of consecutive glyph ids
fn advance_runs(advances: &BTreeMap<u16, u16>) -> Vec<(u16, Vec<u16>)> {
    let mut runs: Vec<(u16, Vec<u16>)> = Vec::new();
    for (&gid, &advance) in advances {
        match runs.last_mut() {
            Some((start, run)) if *start as usize + run.len() == gid as usize => run.push(advance),
            _ => runs.push((gid, vec![advance])),
        }
    }
    runs
}

/// Build the ToUnicode CMap so text in the PDF can be searched and copied.
/// bfchar blocks hold at most 100 entries.
fn to_unicode_cmap(glyphs: &BTreeMap<u16, char>) -> String {
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    let entries: Vec<(&u16, &char)> = glyphs.iter().collect();
    for block in entries.chunks(100) {
        cmap.push_str(&format!("{} beginbfchar\n", block.len()));
        for (gid, ch) in block {
            let mut units = [0u16; 2];
            let hex: String = ch
                .encode_utf16(&mut units)
                .iter()
                .map(|unit| format!("{unit:04x}"))
                .collect();
            cmap.push_str(&format!("<{gid:04x}> <{hex}>\n"));
        }
        cmap.push_str("endbfchar\n");
    }

    cmap.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");
    cmap
}
