//! Flowing plain text onto fixed-size pages.
//!
//! Text is wrapped at a hard character count and stacked top to bottom in a
//! single left-aligned column. [paginate] turns a string into a lazy stream of
//! [Placement]s, and [render_into] replays that stream into any [RenderSink],
//! such as the PDF [Canvas](crate::Canvas).
//!
//! # Example
//!
//! ```
//! use polyvox::layout::{paginate, PageGeometry, Placement};
//! use polyvox::Pt;
//!
//! // room for exactly two lines per page
//! let geometry = PageGeometry::new((Pt(200.0), Pt(100.0)), Pt(10.0), Pt(50.0), 4);
//! let breaks = paginate("abcdefghijklmnopqrst", &geometry)
//!     .expect("valid geometry")
//!     .filter(|p| matches!(p, Placement::PageBreak { .. }))
//!     .count();
//! assert_eq!(breaks, 2);
//! ```

mod geometry;
mod paginate;
mod sink;

pub use geometry::*;
pub use paginate::*;
pub use sink::*;
