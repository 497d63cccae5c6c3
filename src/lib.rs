mod canvas;
pub use canvas::*;

mod chunk;
pub use chunk::*;

mod config;
pub use config::*;

mod document;
pub use document::*;

mod extract;
pub use extract::*;

mod font;
pub use font::*;

mod fonts;
pub use fonts::*;

mod info;
pub use info::*;

mod language;
pub use language::*;

/// Splitting text into fixed-width lines and pages
pub mod layout;

mod page;
pub use page::*;

/// Standard page sizes
pub mod pagesize;

mod pipeline;
pub use pipeline::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod speech;
pub use speech::*;

mod translate;
pub use translate::*;

mod units;
pub use units::*;

mod error;
pub use error::*;
