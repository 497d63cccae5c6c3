use crate::error::{Error, Result};
use crate::pagesize::{self, PageSize};
use crate::units::Pt;

/// The fixed attributes of a page that text is flowed onto.
///
/// Text starts at `page_height - top_margin` and each line moves the cursor
/// down by `line_height`. Once the cursor drops below `top_margin` the page is
/// considered full. Lines are wrapped at a hard character count
/// (`wrap_width`) rather than at a measured text width.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PageGeometry {
    /// Width of the page; only used when the page is rendered
    pub page_width: Pt,
    /// Height of the page
    pub page_height: Pt,
    /// Distance between the top edge and the first baseline, also used as the
    /// bottom limit of the cursor
    pub top_margin: Pt,
    /// x coordinate of every line
    pub left_margin: Pt,
    /// Vertical distance between two consecutive lines
    pub line_height: Pt,
    /// Maximum number of characters on a rendered line
    pub wrap_width: usize,
}

impl Default for PageGeometry {
    /// US Letter, 40pt margins, 15pt lines wrapped at 100 characters
    fn default() -> Self {
        PageGeometry::new(pagesize::LETTER, Pt(40.0), Pt(15.0), 100)
    }
}

impl PageGeometry {
    /// Geometry with the same margin on the top and on the left
    pub fn new(size: PageSize, margin: Pt, line_height: Pt, wrap_width: usize) -> PageGeometry {
        PageGeometry {
            page_width: size.0,
            page_height: size.1,
            top_margin: margin,
            left_margin: margin,
            line_height,
            wrap_width,
        }
    }

    /// The cursor position of the first line on every page
    pub fn start_y(&self) -> Pt {
        self.page_height - self.top_margin
    }

    /// Vertical room between the first baseline and the bottom limit
    pub fn available_height(&self) -> Pt {
        self.start_y() - self.top_margin
    }

    /// Check that text can be laid out with this geometry at all
    pub fn validate(&self) -> Result<()> {
        if self.wrap_width == 0 {
            return Err(Error::InvalidGeometry(
                "wrap width must be at least one character".into(),
            ));
        }
        if !self.line_height.is_positive() {
            return Err(Error::InvalidGeometry(format!(
                "line height must be positive, got {}",
                self.line_height
            )));
        }
        if !self.top_margin.is_positive() || !self.left_margin.is_positive() {
            return Err(Error::InvalidGeometry(format!(
                "margins must be positive, got top {} and left {}",
                self.top_margin, self.left_margin
            )));
        }
        if !self.page_height.is_positive() || self.page_height <= self.top_margin {
            return Err(Error::InvalidGeometry(format!(
                "page height {} must exceed the top margin {}",
                self.page_height, self.top_margin
            )));
        }
        if self.line_height > self.available_height() {
            return Err(Error::InvalidGeometry(format!(
                "line height {} does not fit in the {} available on a page",
                self.line_height,
                self.available_height()
            )));
        }
        Ok(())
    }

    /// Baseline of the `row`-th line of a page, counted from 0
    pub fn row_y(&self, row: usize) -> Pt {
        self.start_y() - self.line_height * (row as f32)
    }

    /// Whether the `row`-th line still lands on the page
    pub fn row_fits(&self, row: usize) -> bool {
        self.row_y(row) >= self.top_margin
    }

    /// How many lines are drawn on a page before a page break. Only
    /// meaningful for a geometry that passes [PageGeometry::validate].
    pub fn lines_per_page(&self) -> usize {
        let room = self.available_height().0 / self.line_height.0;
        // the estimate can be off by one when the division rounds
        let mut lines = room.floor() as usize + 1;
        while lines > 1 && !self.row_fits(lines - 1) {
            lines -= 1;
        }
        while self.row_fits(lines) {
            lines += 1;
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(height: f32, margin: f32, line_height: f32, wrap_width: usize) -> PageGeometry {
        PageGeometry::new(
            (Pt(612.0), Pt(height)),
            Pt(margin),
            Pt(line_height),
            wrap_width,
        )
    }

    #[test]
    fn default_is_letter() {
        let g = PageGeometry::default();
        assert_eq!(g.page_height, Pt(792.0));
        assert_eq!(g.start_y(), Pt(752.0));
        assert_eq!(g.wrap_width, 100);
        assert!(g.validate().is_ok());
        assert_eq!(g.lines_per_page(), 48);
    }

    #[test]
    fn rejects_zero_wrap_width() {
        let err = geometry(792.0, 40.0, 15.0, 0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidGeometry(_)));
    }

    #[test]
    fn rejects_non_positive_line_height() {
        for lh in [0.0, -15.0, f32::NAN] {
            let err = geometry(792.0, 40.0, lh, 100).validate().unwrap_err();
            assert!(matches!(err, Error::InvalidGeometry(_)), "line height {lh}");
        }
    }

    #[test]
    fn rejects_page_not_taller_than_margin() {
        assert!(geometry(40.0, 40.0, 15.0, 100).validate().is_err());
        assert!(geometry(30.0, 40.0, 15.0, 100).validate().is_err());
    }

    #[test]
    fn rejects_line_taller_than_available_space() {
        // 100 - 2 * 40 leaves 20pt of room
        assert!(geometry(100.0, 40.0, 20.0, 10).validate().is_ok());
        assert!(geometry(100.0, 40.0, 21.0, 10).validate().is_err());
    }

    #[test]
    fn rows_are_placed_without_accumulated_drift() {
        let g = geometry(792.0, 40.0, 0.1, 100);
        assert_eq!(g.row_y(0), Pt(752.0));
        assert_eq!(g.row_y(1000), Pt(752.0 - 0.1_f32 * 1000.0));
        let lines = g.lines_per_page();
        assert!(g.row_fits(lines - 1));
        assert!(!g.row_fits(lines));
    }

    #[test]
    fn lines_per_page_counts_the_first_line() {
        assert_eq!(geometry(100.0, 10.0, 50.0, 10).lines_per_page(), 2);
        assert_eq!(geometry(100.0, 10.0, 80.0, 10).lines_per_page(), 2);
        assert_eq!(geometry(100.0, 10.0, 79.0, 10).lines_per_page(), 2);
        assert_eq!(geometry(100.0, 10.0, 40.0, 10).lines_per_page(), 3);
    }
}
