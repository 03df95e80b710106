//! Eyelid deformation: blend each lid between its open and closed contour and
//! close the result against the socket so it can be filled as a mask.

use crate::contour::{check_pair, Contour, Lid, Point};
use crate::error::{EyeError, EyeResult};
use crate::geometry::EyeGeometry;

/// Blend `open` towards `closed` by `fraction` (0 = open, 1 = closed).
///
/// The fraction is clamped into [0, 1]. Endpoints are reproduced exactly.
pub fn deform(open: &Contour, closed: &Contour, fraction: f32) -> EyeResult<Contour> {
    aligned(open, closed)?;
    let f = fraction.clamp(0.0, 1.0);
    Ok(Contour::new(
        open.points()
            .iter()
            .zip(closed.points())
            .map(|(o, c)| Point::new(o.x * (1.0 - f) + c.x * f, o.y * (1.0 - f) + c.y * f))
            .collect(),
    ))
}

/// Like [`deform`], but the per-point displacement is rounded to whole pixels
/// so integer-valued contours stay on the pixel grid.
pub fn deform_snapped(open: &Contour, closed: &Contour, fraction: f32) -> EyeResult<Contour> {
    aligned(open, closed)?;
    let f = fraction.clamp(0.0, 1.0);
    Ok(Contour::new(
        open.points()
            .iter()
            .zip(closed.points())
            .map(|(o, c)| {
                Point::new(
                    o.x + ((c.x - o.x) * f).round(),
                    o.y + ((c.y - o.y) * f).round(),
                )
            })
            .collect(),
    ))
}

fn aligned(open: &Contour, closed: &Contour) -> EyeResult<()> {
    if open.len() != closed.len() {
        return Err(EyeError::ContourLengthMismatch {
            lid: "contour pair",
            open: open.len(),
            closed: closed.len(),
        });
    }
    Ok(())
}

/// Build the filled polygon for one lid at `fraction`.
///
/// The deformed lid edge is followed by the two socket corners on the lid's
/// outer side (top-right, top-left for the upper lid; bottom-left,
/// bottom-right for the lower lid), which closes the polygon against the
/// socket boundary.
pub fn lid_mask(eye: &EyeGeometry, lid: Lid, fraction: f32, snap: bool) -> EyeResult<Vec<Point>> {
    let (open, closed) = eye.lid(lid);
    check_pair(lid, open, closed)?;
    let edge = if snap {
        deform_snapped(open, closed, fraction)?
    } else {
        deform(open, closed, fraction)?
    };

    let socket = eye.socket();
    let corners = match lid {
        Lid::Upper => [
            Point::new(socket.right(), socket.top()),
            Point::new(socket.left(), socket.top()),
        ],
        Lid::Lower => [
            Point::new(socket.left(), socket.bottom()),
            Point::new(socket.right(), socket.bottom()),
        ],
    };

    let mut polygon = Vec::with_capacity(edge.len() + corners.len());
    polygon.extend_from_slice(edge.points());
    polygon.extend_from_slice(&corners);
    Ok(polygon)
}
