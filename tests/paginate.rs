use polyvox::layout::{paginate, render_into, PageGeometry, Placement, RenderSink};
use polyvox::{pagesize, Pt};

fn placements<'t>(text: &'t str, geometry: &PageGeometry) -> Vec<Placement<'t>> {
    paginate(text, geometry).expect("valid geometry").collect()
}

fn segments<'t>(placements: &[Placement<'t>]) -> Vec<&'t str> {
    placements
        .iter()
        .filter_map(|placement| match placement {
            Placement::DrawLine { text, .. } => Some(*text),
            Placement::PageBreak { .. } => None,
        })
        .collect()
}

fn two_lines_per_page(wrap_width: usize) -> PageGeometry {
    PageGeometry::new((Pt(200.0), Pt(100.0)), Pt(10.0), Pt(50.0), wrap_width)
}

#[test]
fn segments_of_a_single_line_concatenate_back_to_it() {
    let long = "xyz".repeat(97);
    let texts = ["", "a", "hello world", "ünïcödé wörds", "नमस्ते दुनिया", long.as_str()];
    for wrap_width in [1, 2, 3, 7, 100] {
        let geometry = PageGeometry {
            wrap_width,
            ..PageGeometry::default()
        };
        for text in texts {
            let drawn = segments(&placements(text, &geometry));
            assert_eq!(drawn.concat(), text, "wrap width {wrap_width}");

            let (last, full) = drawn.split_last().expect("at least one segment");
            assert!(full.iter().all(|s| s.chars().count() == wrap_width));
            assert!(last.chars().count() <= wrap_width);
        }
    }
}

#[test]
fn consecutive_newlines_become_blank_lines() {
    let geometry = PageGeometry::default();
    for k in 1..=5 {
        let text = format!("top{}bottom", "\n".repeat(k));
        let drawn = segments(&placements(&text, &geometry));
        // k newlines separate k + 1 logical lines, k - 1 of them blank
        assert_eq!(drawn.len(), k + 1);
        assert_eq!(drawn.iter().filter(|s| s.is_empty()).count(), k - 1);

        let trailing = format!("line{}", "\n".repeat(k));
        let drawn = segments(&placements(&trailing, &geometry));
        assert_eq!(drawn, [vec!["line"], vec![""; k]].concat());
    }
}

#[test]
fn pagination_is_idempotent() {
    let geometry = two_lines_per_page(3);
    let text = "the quick brown\n\nfox jumps over\nthe lazy dog";
    assert_eq!(placements(text, &geometry), placements(text, &geometry));

    let pagination = paginate(text, &geometry).unwrap();
    let replay = pagination.clone();
    assert_eq!(pagination.collect::<Vec<_>>(), replay.collect::<Vec<_>>());
}

#[test]
fn a_page_break_precedes_every_line_past_the_page_capacity() {
    for geometry in [
        PageGeometry::default(),
        two_lines_per_page(4),
        PageGeometry::new(pagesize::A5, Pt(30.0), Pt(40.0), 10),
    ] {
        let per_page = geometry.lines_per_page();
        let text = "x".repeat(geometry.wrap_width * per_page * 3 + 1);
        let placements = placements(&text, &geometry);

        let mut on_page = 0;
        let mut previous_was_break = false;
        for placement in &placements {
            match placement {
                Placement::PageBreak { .. } => {
                    assert!(!previous_was_break, "two page breaks in a row");
                    assert_eq!(on_page, per_page);
                    on_page = 0;
                    previous_was_break = true;
                }
                Placement::DrawLine { .. } => {
                    assert!(on_page < per_page);
                    on_page += 1;
                    previous_was_break = false;
                }
            }
        }
        let breaks = placements
            .iter()
            .filter(|p| matches!(p, Placement::PageBreak { .. }))
            .count();
        assert_eq!(breaks, 3);
    }
}

#[test]
fn empty_text_draws_one_blank_line() {
    let geometry = PageGeometry::new(pagesize::LETTER, Pt(40.0), Pt(15.0), 100);
    assert_eq!(
        placements("", &geometry),
        vec![Placement::DrawLine {
            text: "",
            x: Pt(40.0),
            y: Pt(752.0),
            page: 0
        }]
    );
}

#[test]
fn long_line_wraps_on_one_page() {
    let text = "A".repeat(250);
    let placements = placements(&text, &PageGeometry::default());
    let lengths: Vec<(usize, usize)> = placements
        .iter()
        .map(|p| match p {
            Placement::DrawLine { text, page, .. } => (text.len(), *page),
            Placement::PageBreak { .. } => panic!("unexpected page break"),
        })
        .collect();
    assert_eq!(lengths, vec![(100, 0), (100, 0), (50, 0)]);
}

#[derive(Default)]
struct PageCounter {
    lines_per_page: Vec<usize>,
}

impl RenderSink for PageCounter {
    fn draw_text(&mut self, _segment: &str, _x: Pt, _y: Pt) {
        if self.lines_per_page.is_empty() {
            self.lines_per_page.push(0);
        }
        if let Some(lines) = self.lines_per_page.last_mut() {
            *lines += 1;
        }
    }

    fn new_page(&mut self) {
        if self.lines_per_page.is_empty() {
            self.lines_per_page.push(0);
        }
        self.lines_per_page.push(0);
    }
}

#[test]
fn five_chunks_at_two_lines_per_page_fill_three_pages() {
    let geometry = two_lines_per_page(1);
    assert_eq!(geometry.lines_per_page(), 2);

    let placements = placements("abcde", &geometry);
    let breaks = placements
        .iter()
        .filter(|p| matches!(p, Placement::PageBreak { .. }))
        .count();
    assert_eq!(breaks, 2);

    let mut counter = PageCounter::default();
    let pages = render_into(placements.into_iter(), &mut counter);
    assert_eq!(pages, 3);
    assert_eq!(counter.lines_per_page, vec![2, 2, 1]);
}
