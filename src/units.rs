use derive_more::{Add, AddAssign, Div, From, Into, Mul, Sub, SubAssign};

/// A length in PDF points (1/72 of an inch). All page coordinates and
/// distances in this crate are expressed in points, with the origin at the
/// bottom-left corner of the page.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Mul,
    Div,
    From,
    Into,
)]
pub struct Pt(pub f32);

impl Pt {
    /// True when the length is a finite number strictly greater than zero
    pub fn is_positive(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl std::fmt::Display for Pt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}pt", self.0)
    }
}
