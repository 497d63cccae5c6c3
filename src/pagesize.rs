//! Pre-defined page sizes for the paper formats a translated document can be
//! printed on. All sizes are portrait (width, height) in points.

use crate::error::{Error, Result};
use crate::units::Pt;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(14.0 * 72.0));

// iso a-series (converted from mm to points)
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));

/// Look a page size up by its common name, ignoring case
pub fn by_name(name: &str) -> Result<PageSize> {
    match name.trim().to_ascii_lowercase().as_str() {
        "letter" => Ok(LETTER),
        "legal" => Ok(LEGAL),
        "a4" => Ok(A4),
        "a5" => Ok(A5),
        other => Err(Error::InvalidConfig {
            key: "page size".into(),
            reason: format!("unknown page size `{other}`, expected letter, legal, a4 or a5"),
        }),
    }
}
