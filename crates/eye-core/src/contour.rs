//! Lid contours in the canonical eye coordinate space.
//!
//! A contour is a fixed-length polyline sampled from one lid edge in one state
//! (open or closed). Upper lids run left to right and lower lids right to left,
//! so an upper and a lower contour can be chained into one closed outline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{EyeError, EyeResult};

/// A point in eye space. Y grows downwards, matching the render surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }
}

impl From<[f32; 2]> for Point {
    fn from(p: [f32; 2]) -> Self {
        Self::new(p[0], p[1])
    }
}

impl From<Point> for [f32; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contour {
    points: Vec<Point>,
}

impl Contour {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.points.iter().map(|p| p.offset(dx, dy)).collect())
    }

    /// Reflect about the vertical axis through the origin.
    ///
    /// Point order is reversed as well: negating X flips the stroke direction,
    /// and reversing puts it back so index `i` of a mirrored open contour still
    /// pairs with index `i` of the mirrored closed contour along the same
    /// left-to-right (or right-to-left) stroke.
    pub fn mirrored(&self) -> Self {
        Self::new(
            self.points
                .iter()
                .rev()
                .map(|p| Point::new(-p.x, p.y))
                .collect(),
        )
    }

    pub fn min_x(&self) -> Option<f32> {
        self.points.iter().map(|p| p.x).reduce(f32::min)
    }

    pub fn max_x(&self) -> Option<f32> {
        self.points.iter().map(|p| p.x).reduce(f32::max)
    }

    pub fn min_y(&self) -> Option<f32> {
        self.points.iter().map(|p| p.y).reduce(f32::min)
    }

    pub fn max_y(&self) -> Option<f32> {
        self.points.iter().map(|p| p.y).reduce(f32::max)
    }
}

impl From<&[[f32; 2]]> for Contour {
    fn from(points: &[[f32; 2]]) -> Self {
        Self::new(points.iter().copied().map(Point::from).collect())
    }
}

/// Which lid a contour pair belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lid {
    Upper,
    Lower,
}

impl Lid {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::Lower => "lower",
        }
    }
}

/// The four canonical lid contours for one eye, centered on the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct ContourTable {
    pub upper_open: Contour,
    pub upper_closed: Contour,
    pub lower_open: Contour,
    pub lower_closed: Contour,
}

impl ContourTable {
    pub const UPPER_OPEN: &'static str = "upperLidOpen";
    pub const UPPER_CLOSED: &'static str = "upperLidClosed";
    pub const LOWER_OPEN: &'static str = "lowerLidOpen";
    pub const LOWER_CLOSED: &'static str = "lowerLidClosed";

    /// Build a table and check that open/closed pairs line up index by index.
    pub fn new(
        upper_open: Contour,
        upper_closed: Contour,
        lower_open: Contour,
        lower_closed: Contour,
    ) -> EyeResult<Self> {
        let table = Self {
            upper_open,
            upper_closed,
            lower_open,
            lower_closed,
        };
        table.validate()?;
        Ok(table)
    }

    /// Build a table from point lists keyed by the extractor's path names.
    pub fn from_named(named: &BTreeMap<String, Vec<[f32; 2]>>) -> EyeResult<Self> {
        let take = |name: &str| -> EyeResult<Contour> {
            named
                .get(name)
                .map(|pts| Contour::from(pts.as_slice()))
                .ok_or_else(|| EyeError::MissingContour(name.to_string()))
        };
        Self::new(
            take(Self::UPPER_OPEN)?,
            take(Self::UPPER_CLOSED)?,
            take(Self::LOWER_OPEN)?,
            take(Self::LOWER_CLOSED)?,
        )
    }

    pub fn to_named(&self) -> BTreeMap<String, Vec<[f32; 2]>> {
        let list = |c: &Contour| -> Vec<[f32; 2]> { c.points().iter().map(|&p| p.into()).collect() };
        BTreeMap::from([
            (Self::UPPER_OPEN.to_string(), list(&self.upper_open)),
            (Self::UPPER_CLOSED.to_string(), list(&self.upper_closed)),
            (Self::LOWER_OPEN.to_string(), list(&self.lower_open)),
            (Self::LOWER_CLOSED.to_string(), list(&self.lower_closed)),
        ])
    }

    pub fn validate(&self) -> EyeResult<()> {
        for (name, contour) in [
            (Self::UPPER_OPEN, &self.upper_open),
            (Self::UPPER_CLOSED, &self.upper_closed),
            (Self::LOWER_OPEN, &self.lower_open),
            (Self::LOWER_CLOSED, &self.lower_closed),
        ] {
            if contour.is_empty() {
                return Err(EyeError::EmptyContour(name.to_string()));
            }
        }
        check_pair(Lid::Upper, &self.upper_open, &self.upper_closed)?;
        check_pair(Lid::Lower, &self.lower_open, &self.lower_closed)
    }

    pub fn lid(&self, lid: Lid) -> (&Contour, &Contour) {
        match lid {
            Lid::Upper => (&self.upper_open, &self.upper_closed),
            Lid::Lower => (&self.lower_open, &self.lower_closed),
        }
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            upper_open: self.upper_open.translated(dx, dy),
            upper_closed: self.upper_closed.translated(dx, dy),
            lower_open: self.lower_open.translated(dx, dy),
            lower_closed: self.lower_closed.translated(dx, dy),
        }
    }

    pub fn mirrored(&self) -> Self {
        Self {
            upper_open: self.upper_open.mirrored(),
            upper_closed: self.upper_closed.mirrored(),
            lower_open: self.lower_open.mirrored(),
            lower_closed: self.lower_closed.mirrored(),
        }
    }
}

pub(crate) fn check_pair(lid: Lid, open: &Contour, closed: &Contour) -> EyeResult<()> {
    if open.len() != closed.len() {
        return Err(EyeError::ContourLengthMismatch {
            lid: lid.as_str(),
            open: open.len(),
            closed: closed.len(),
        });
    }
    Ok(())
}

impl Default for ContourTable {
    /// Lids traced from the classic snake-eye artwork, 32 samples per path,
    /// scaled to a radius of ~48.
    fn default() -> Self {
        Self {
            upper_open: Contour::from(UPPER_OPEN.as_slice()),
            upper_closed: Contour::from(UPPER_CLOSED.as_slice()),
            lower_open: Contour::from(LOWER_OPEN.as_slice()),
            lower_closed: Contour::from(LOWER_CLOSED.as_slice()),
        }
    }
}

const UPPER_CLOSED: [[f32; 2]; 32] = [
    [-50.0, 13.0], [-48.0, 15.0], [-44.0, 14.0], [-42.0, 14.0],
    [-40.0, 14.0], [-37.0, 14.0], [-35.0, 15.0], [-31.0, 15.0],
    [-27.0, 16.0], [-22.0, 17.0], [-15.0, 19.0], [-10.0, 20.0],
    [-6.0, 21.0], [-2.0, 22.0], [2.0, 22.0], [6.0, 23.0],
    [10.0, 23.0], [13.0, 23.0], [17.0, 23.0], [20.0, 22.0],
    [23.0, 22.0], [26.0, 21.0], [29.0, 20.0], [32.0, 19.0],
    [36.0, 17.0], [39.0, 14.0], [42.0, 12.0], [44.0, 9.0],
    [46.0, 6.0], [47.0, 3.0], [48.0, 0.0], [48.0, -5.0],
];

const UPPER_OPEN: [[f32; 2]; 32] = [
    [-50.0, 13.0], [-50.0, 6.0], [-49.0, 1.0], [-49.0, -3.0],
    [-47.0, -7.0], [-44.0, -10.0], [-42.0, -14.0], [-40.0, -18.0],
    [-38.0, -21.0], [-36.0, -25.0], [-33.0, -28.0], [-29.0, -32.0],
    [-24.0, -36.0], [-18.0, -40.0], [-13.0, -43.0], [-8.0, -45.0],
    [-2.0, -46.0], [3.0, -46.0], [8.0, -46.0], [13.0, -45.0],
    [17.0, -44.0], [21.0, -43.0], [25.0, -41.0], [28.0, -39.0],
    [31.0, -37.0], [34.0, -34.0], [37.0, -30.0], [40.0, -26.0],
    [43.0, -21.0], [45.0, -16.0], [47.0, -11.0], [48.0, -5.0],
];

const LOWER_CLOSED: [[f32; 2]; 32] = [
    [48.0, -5.0], [48.0, -3.0], [48.0, 0.0], [47.0, 4.0],
    [45.0, 7.0], [43.0, 10.0], [40.0, 13.0], [36.0, 15.0],
    [32.0, 17.0], [29.0, 18.0], [26.0, 19.0], [22.0, 20.0],
    [18.0, 20.0], [15.0, 21.0], [11.0, 21.0], [7.0, 21.0],
    [3.0, 20.0], [-1.0, 20.0], [-4.0, 19.0], [-8.0, 19.0],
    [-12.0, 18.0], [-15.0, 17.0], [-20.0, 16.0], [-25.0, 14.0],
    [-30.0, 13.0], [-33.0, 12.0], [-36.0, 11.0], [-38.0, 11.0],
    [-41.0, 11.0], [-44.0, 12.0], [-49.0, 14.0], [-50.0, 13.0],
];

const LOWER_OPEN: [[f32; 2]; 32] = [
    [48.0, -5.0], [48.0, 2.0], [48.0, 7.0], [47.0, 11.0],
    [46.0, 16.0], [45.0, 20.0], [43.0, 24.0], [40.0, 28.0],
    [38.0, 31.0], [35.0, 34.0], [32.0, 37.0], [27.0, 40.0],
    [23.0, 42.0], [18.0, 44.0], [14.0, 45.0], [9.0, 46.0],
    [5.0, 46.0], [0.0, 45.0], [-4.0, 45.0], [-8.0, 44.0],
    [-11.0, 43.0], [-17.0, 40.0], [-25.0, 37.0], [-30.0, 34.0],
    [-35.0, 30.0], [-38.0, 27.0], [-40.0, 25.0], [-42.0, 22.0],
    [-43.0, 21.0], [-45.0, 20.0], [-48.0, 19.0], [-50.0, 13.0],
];

#[cfg(test)]
mod tests {
    use super::*;

    fn contour(points: &[(f32, f32)]) -> Contour {
        Contour::new(points.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    #[test]
    fn canonical_table_is_consistent() {
        let table = ContourTable::default();
        table.validate().unwrap();
        assert_eq!(table.upper_open.len(), 32);
        assert_eq!(table.lower_closed.len(), 32);
    }

    #[test]
    fn canonical_lids_share_their_corners() {
        let t = ContourTable::default();
        let first = |c: &Contour| c.points()[0];
        let last = |c: &Contour| c.points()[c.len() - 1];
        // upper ends where lower starts, lower ends where upper starts
        assert_eq!(last(&t.upper_open), first(&t.lower_open));
        assert_eq!(last(&t.lower_open), first(&t.upper_open));
        assert_eq!(last(&t.upper_closed), first(&t.lower_closed));
    }

    #[test]
    fn mirror_reverses_and_negates_x() {
        let c = contour(&[(1.0, 2.0), (3.0, 4.0), (5.0, 6.0)]);
        assert_eq!(
            c.mirrored(),
            contour(&[(-5.0, 6.0), (-3.0, 4.0), (-1.0, 2.0)])
        );
    }

    #[test]
    fn mirror_twice_is_identity() {
        let t = ContourTable::default();
        assert_eq!(t.mirrored().mirrored(), t);
    }

    #[test]
    fn mirrored_upper_lid_still_runs_left_to_right() {
        let m = ContourTable::default().mirrored();
        let pts = m.upper_open.points();
        assert!(pts[0].x < pts[pts.len() - 1].x);
    }

    #[test]
    fn extrema() {
        let c = contour(&[(-2.0, 5.0), (4.0, -1.0), (0.0, 3.0)]);
        assert_eq!(c.min_x(), Some(-2.0));
        assert_eq!(c.max_x(), Some(4.0));
        assert_eq!(c.min_y(), Some(-1.0));
        assert_eq!(c.max_y(), Some(5.0));
        assert_eq!(Contour::default().min_x(), None);
    }

    #[test]
    fn mismatched_pair_is_rejected() {
        let err = ContourTable::new(
            contour(&[(0.0, 0.0), (1.0, 0.0)]),
            contour(&[(0.0, 1.0)]),
            contour(&[(0.0, 0.0)]),
            contour(&[(0.0, 0.0)]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EyeError::ContourLengthMismatch {
                lid: "upper",
                open: 2,
                closed: 1
            }
        ));
    }

    #[test]
    fn empty_contour_is_rejected() {
        let err = ContourTable::new(
            Contour::default(),
            Contour::default(),
            contour(&[(0.0, 0.0)]),
            contour(&[(0.0, 0.0)]),
        )
        .unwrap_err();
        assert!(matches!(err, EyeError::EmptyContour(ref n) if n == "upperLidOpen"));
    }

    #[test]
    fn named_round_trip_and_missing_name() {
        let t = ContourTable::default();
        let mut named = t.to_named();
        assert_eq!(ContourTable::from_named(&named).unwrap(), t);

        named.remove(ContourTable::LOWER_CLOSED);
        let err = ContourTable::from_named(&named).unwrap_err();
        assert!(matches!(err, EyeError::MissingContour(ref n) if n == "lowerLidClosed"));
    }
}
