//! Per-eye geometry, built once at startup from the canonical contour table.

use std::fmt;

use log::info;

use crate::contour::{Contour, ContourTable, Lid, Point};
use crate::error::{EyeError, EyeResult};

/// Axis-aligned rectangle in surface coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_extents(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_extents(
            self.left().min(other.left()),
            self.top().min(other.top()),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let r = Rect::from_extents(
            self.left().max(other.left()),
            self.top().max(other.top()),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        );
        (!r.is_degenerate()).then_some(r)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }
}

/// Which of the two eyes. `Left` is the character's left eye, which sits on
/// the viewer's right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EyeSide {
    Left,
    Right,
}

impl EyeSide {
    pub const BOTH: [EyeSide; 2] = [EyeSide::Left, EyeSide::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for EyeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Socket rectangle spanned by the open lids: X extent and top from the upper
/// lid, bottom from the lower lid.
pub fn socket_bounds(upper_open: &Contour, lower_open: &Contour) -> Option<Rect> {
    Some(Rect::from_extents(
        upper_open.min_x()?,
        upper_open.min_y()?,
        upper_open.max_x()?,
        lower_open.max_y()?,
    ))
}

/// Immutable lid contours and socket for one eye, in surface coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct EyeGeometry {
    side: EyeSide,
    center: Point,
    contours: ContourTable,
    socket: Rect,
}

impl EyeGeometry {
    /// Place the canonical contours for `side` at `center`.
    ///
    /// The right eye uses the mirror image of the canonical (left) contours.
    pub fn new(table: &ContourTable, side: EyeSide, center: Point) -> EyeResult<Self> {
        table.validate()?;
        let local = match side {
            EyeSide::Left => table.clone(),
            EyeSide::Right => table.mirrored(),
        };
        let contours = local.translated(center.x, center.y);

        let socket = socket_bounds(&contours.upper_open, &contours.lower_open)
            .ok_or_else(|| EyeError::EmptyContour(ContourTable::UPPER_OPEN.to_string()))?;
        if socket.is_degenerate() {
            return Err(EyeError::DegenerateSocket {
                side,
                width: socket.width,
                height: socket.height,
            });
        }

        Ok(Self {
            side,
            center,
            contours,
            socket,
        })
    }

    pub fn side(&self) -> EyeSide {
        self.side
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn socket(&self) -> Rect {
        self.socket
    }

    pub fn contours(&self) -> &ContourTable {
        &self.contours
    }

    /// The (open, closed) contour pair for one lid.
    pub fn lid(&self, lid: Lid) -> (&Contour, &Contour) {
        self.contours.lid(lid)
    }
}

/// Both eyes. Read-only after construction and cheap to share by reference.
#[derive(Clone, Debug, PartialEq)]
pub struct EyePair {
    pub left: EyeGeometry,
    pub right: EyeGeometry,
}

impl EyePair {
    pub fn new(table: &ContourTable, left_center: Point, right_center: Point) -> EyeResult<Self> {
        let left = EyeGeometry::new(table, EyeSide::Left, left_center)?;
        let right = EyeGeometry::new(table, EyeSide::Right, right_center)?;
        info!(
            "eye geometry ready: left socket {:?}, right socket {:?}",
            left.socket, right.socket
        );
        Ok(Self { left, right })
    }

    pub fn eye(&self, side: EyeSide) -> &EyeGeometry {
        match side {
            EyeSide::Left => &self.left,
            EyeSide::Right => &self.right,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &EyeGeometry> {
        [&self.left, &self.right].into_iter()
    }

    /// Smallest rectangle covering both sockets.
    pub fn region(&self) -> Rect {
        self.left.socket.union(&self.right.socket)
    }
}
