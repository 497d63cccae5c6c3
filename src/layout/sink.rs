use super::paginate::Placement;
use crate::units::Pt;

/// Something that can draw lines of text on consecutive pages, such as a PDF
/// canvas. The sink starts on its first page.
pub trait RenderSink {
    /// Draw a single line of text at the given page coordinates on the current page
    fn draw_text(&mut self, segment: &str, x: Pt, y: Pt);

    /// Finish the current page and move on to a fresh one
    fn new_page(&mut self);
}

/// Feed every placement into `sink`, in order. Returns the number of pages the
/// sink ended up with.
pub fn render_into<'t, I, S>(placements: I, sink: &mut S) -> usize
where
    I: IntoIterator<Item = Placement<'t>>,
    S: RenderSink + ?Sized,
{
    let mut pages = 1;
    for placement in placements {
        match placement {
            Placement::DrawLine { text, x, y, .. } => sink.draw_text(text, x, y),
            Placement::PageBreak { .. } => {
                sink.new_page();
                pages += 1;
            }
        }
    }
    pages
}
