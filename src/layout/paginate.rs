use super::geometry::PageGeometry;
use crate::error::Result;
use crate::units::Pt;
use std::str::Split;

/// A single instruction for a rendering sink, emitted in drawing order
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Placement<'t> {
    /// Draw `text` with its baseline starting at `(x, y)` on page `page`
    DrawLine {
        text: &'t str,
        x: Pt,
        y: Pt,
        page: usize,
    },
    /// Start page `page`; the cursor is back at the top of the page
    PageBreak { page: usize },
}

/// Flows `text` onto pages described by `geometry`.
///
/// The text is split on `'\n'` into logical lines, and every logical line is
/// cut into chunks of exactly `wrap_width` characters (the last one may be
/// shorter). An empty logical line still yields one empty chunk, so blank
/// lines keep their vertical slot. Each chunk becomes a
/// [Placement::DrawLine] at the current cursor; the cursor then moves down by
/// `line_height`, and as soon as it falls below `top_margin` a
/// [Placement::PageBreak] is emitted and the cursor returns to the top.
///
/// The geometry is validated before anything is produced. The returned
/// iterator is lazy and can be cloned to replay the same placements.
///
/// ```
/// use polyvox::layout::{paginate, PageGeometry, Placement};
/// use polyvox::Pt;
///
/// let placements: Vec<Placement> = paginate("", &PageGeometry::default())
///     .expect("default geometry is valid")
///     .collect();
/// assert_eq!(
///     placements,
///     vec![Placement::DrawLine { text: "", x: Pt(40.0), y: Pt(752.0), page: 0 }]
/// );
/// ```
pub fn paginate<'t>(text: &'t str, geometry: &PageGeometry) -> Result<Pagination<'t>> {
    geometry.validate()?;
    Ok(Pagination {
        geometry: *geometry,
        lines: text.split('\n'),
        rest_of_line: None,
        page: 0,
        row: 0,
        page_full: false,
    })
}

/// Lazy sequence of [Placement]s produced by [paginate]
#[derive(Debug, Clone)]
pub struct Pagination<'t> {
    geometry: PageGeometry,
    lines: Split<'t, char>,
    /// characters of the current logical line that did not fit in the previous chunk
    rest_of_line: Option<&'t str>,
    page: usize,
    /// line index on the current page
    row: usize,
    page_full: bool,
}

impl<'t> Iterator for Pagination<'t> {
    type Item = Placement<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.page_full {
            self.page_full = false;
            self.page += 1;
            self.row = 0;
            return Some(Placement::PageBreak { page: self.page });
        }

        let line = match self.rest_of_line.take() {
            Some(rest) => rest,
            None => self.lines.next()?,
        };
        let (chunk, rest) = split_at_char(line, self.geometry.wrap_width);
        if !rest.is_empty() {
            self.rest_of_line = Some(rest);
        }

        let placement = Placement::DrawLine {
            text: chunk,
            x: self.geometry.left_margin,
            y: self.geometry.row_y(self.row),
            page: self.page,
        };

        self.row += 1;
        if !self.geometry.row_fits(self.row) {
            self.page_full = true;
        }

        Some(placement)
    }
}

/// Split after `count` characters (not bytes); the tail is empty when the
/// string is short enough
fn split_at_char(s: &str, count: usize) -> (&str, &str) {
    match s.char_indices().nth(count) {
        Some((index, _)) => s.split_at(index),
        None => (s, ""),
    }
}
