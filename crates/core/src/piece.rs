//! Pieces module - immutable polyomino geometry
//!
//! A piece is a set of body cells plus three quantities derived once at construction:
//! width, height and the skirt (lowest body row per column). Bodies are normalized so the
//! bounding box touches the origin.
//!
//! Rotation is a pure three-step transform (swap x/y, mirror horizontally, shift to
//! origin) producing the next 90° counter-clockwise orientation.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::types::Coord;

/// Skirt value for a column holding no body cell (only possible for disconnected shapes)
pub const EMPTY_SKIRT: i32 = i32::MAX;

/// Largest bounding-box side, in cells, a piece may have
pub const MAX_PIECE_EXTENT: i64 = 1 << 12;

/// Failure to parse the textual piece form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PieceParseError {
    #[error("piece body is empty")]
    Empty,
    #[error("odd number of coordinate tokens ({count}); expected x,y pairs")]
    OddTokenCount { count: usize },
    #[error("invalid coordinate token {token:?}")]
    InvalidToken { token: String },
    #[error("body spans {span} cells along {axis}, at most {} allowed", MAX_PIECE_EXTENT)]
    CoordinateOutOfRange { axis: char, span: i64 },
}

/// An immutable piece in one orientation
#[derive(Debug, Clone)]
pub struct Piece {
    body: Vec<Coord>,
    skirt: Vec<i32>,
    width: i32,
    height: i32,
}

impl Piece {
    /// Build a piece from its body cells.
    ///
    /// Duplicate cells are dropped (first occurrence kept) and the body is translated so
    /// the minimum x and minimum y are both 0. Cell order is otherwise preserved.
    ///
    /// # Panics
    ///
    /// Panics if the body spans more than [`MAX_PIECE_EXTENT`] cells along either axis;
    /// use [`Piece::try_new`] for untrusted input.
    pub fn new(points: impl IntoIterator<Item = Coord>) -> Self {
        Self::try_new(points).unwrap_or_else(|e| panic!("invalid piece body: {e}"))
    }

    /// Like [`Piece::new`], but reports an oversized body instead of panicking.
    pub fn try_new(points: impl IntoIterator<Item = Coord>) -> Result<Self, PieceParseError> {
        let mut body: Vec<Coord> = Vec::new();
        for p in points {
            if !body.contains(&p) {
                body.push(p);
            }
        }
        check_extent('x', body.iter().map(|p| p.x))?;
        check_extent('y', body.iter().map(|p| p.y))?;
        shift_to_origin(&mut body);

        let width = body.iter().map(|p| p.x + 1).max().unwrap_or(0);
        let height = body.iter().map(|p| p.y + 1).max().unwrap_or(0);

        let mut skirt = vec![EMPTY_SKIRT; width as usize];
        for p in &body {
            let low = &mut skirt[p.x as usize];
            *low = (*low).min(p.y);
        }

        Ok(Self {
            body,
            skirt,
            width,
            height,
        })
    }

    /// Width of the bounding box in cells
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the bounding box in cells
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Body cells, relative to the lower-left corner of the bounding box
    pub fn body(&self) -> &[Coord] {
        &self.body
    }

    /// For each column `0..width`, the lowest y in the body
    pub fn skirt(&self) -> &[i32] {
        &self.skirt
    }

    /// True when both bodies hold the same cells, in any order
    pub fn geometric_eq(&self, other: &Piece) -> bool {
        self.body.len() == other.body.len() && self.body.iter().all(|p| other.body.contains(p))
    }

    /// Compute the next 90° counter-clockwise rotation.
    ///
    /// The mirror step maps `x` to `2 * axis - x` with `axis = sum of x / max x`
    /// (integer division, `sum of x` when the max is 0). The shift to origin afterwards
    /// makes the result independent of the axis.
    pub fn rotate_ccw(&self) -> Piece {
        let mut points = self.body.clone();
        swap_xy(&mut points);
        mirror_horizontal(&mut points);
        shift_to_origin(&mut points);
        Piece::new(points)
    }
}

impl FromStr for Piece {
    type Err = PieceParseError;

    /// Parse whitespace separated `x y` pairs, e.g. `"0 0  1 0  1 1  2 0"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(PieceParseError::Empty);
        }
        if tokens.len() % 2 != 0 {
            return Err(PieceParseError::OddTokenCount {
                count: tokens.len(),
            });
        }

        let mut points = Vec::with_capacity(tokens.len() / 2);
        for pair in tokens.chunks_exact(2) {
            let x = parse_token(pair[0])?;
            let y = parse_token(pair[1])?;
            points.push(Coord::new(x, y));
        }
        Piece::try_new(points)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.body {
            write!(f, "{}", p)?;
        }
        Ok(())
    }
}

fn parse_token(token: &str) -> Result<i32, PieceParseError> {
    token.parse().map_err(|_| PieceParseError::InvalidToken {
        token: token.to_string(),
    })
}

fn swap_xy(points: &mut [Coord]) {
    for p in points.iter_mut() {
        *p = Coord::new(p.y, p.x);
    }
}

/// Reflect every x around `sum of x / max x`, then move the leftmost cell back to x = 0.
fn mirror_horizontal(points: &mut [Coord]) {
    let Some(max_x) = points.iter().map(|p| p.x as i64).max() else {
        return;
    };
    let sum_x: i64 = points.iter().map(|p| p.x as i64).sum();

    // A max of 0 means the shape is a single column: no scaling.
    let axis = if max_x != 0 { sum_x / max_x } else { sum_x };
    let mirrored = |x: i32| 2 * axis - x as i64;
    let min_x = points.iter().map(|p| mirrored(p.x)).min().unwrap_or(0);
    for p in points.iter_mut() {
        // Within the original x span, which fits in i32.
        p.x = (mirrored(p.x) - min_x) as i32;
    }
}

fn check_extent(axis: char, values: impl Iterator<Item = i32>) -> Result<(), PieceParseError> {
    let (mut lo, mut hi) = (i64::MAX, i64::MIN);
    for v in values {
        lo = lo.min(v as i64);
        hi = hi.max(v as i64);
    }
    if lo > hi {
        return Ok(());
    }
    let span = hi - lo + 1;
    if span > MAX_PIECE_EXTENT {
        return Err(PieceParseError::CoordinateOutOfRange { axis, span });
    }
    Ok(())
}

fn shift_to_origin(points: &mut [Coord]) {
    let min_x = points.iter().map(|p| p.x).min().unwrap_or(0);
    let min_y = points.iter().map(|p| p.y).min().unwrap_or(0);
    for p in points.iter_mut() {
        p.x -= min_x;
        p.y -= min_y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PYRAMID_STR, S1_STR, STICK_STR};

    fn piece(s: &str) -> Piece {
        s.parse().expect("valid piece string")
    }

    #[test]
    fn test_pyramid_dimensions_and_skirt() {
        let pyr = piece(PYRAMID_STR);
        assert_eq!(pyr.width(), 3);
        assert_eq!(pyr.height(), 2);
        assert_eq!(pyr.skirt(), &[0, 0, 0]);
    }

    #[test]
    fn test_rotated_pyramid() {
        let pyr2 = piece(PYRAMID_STR).rotate_ccw();
        assert_eq!(pyr2.width(), 2);
        assert_eq!(pyr2.height(), 3);
        assert_eq!(pyr2.skirt(), &[1, 0]);
    }

    #[test]
    fn test_s_rotation_skirt() {
        let s = piece(S1_STR);
        assert_eq!(s.skirt(), &[0, 0, 1]);
        let rotated = s.rotate_ccw();
        assert_eq!(rotated.skirt(), &[1, 0]);
        assert!(rotated.geometric_eq(&piece("0 1  0 2  1 0  1 1")));
    }

    #[test]
    fn test_stick_rotation_becomes_horizontal() {
        let stick = piece(STICK_STR);
        let flat = stick.rotate_ccw();
        assert_eq!(flat.width(), 4);
        assert_eq!(flat.height(), 1);
        assert!(flat.rotate_ccw().geometric_eq(&stick));
    }

    #[test]
    fn test_geometric_eq_ignores_order() {
        let a = piece("0 0  1 0  1 1  2 0");
        let b = piece("1 1  2 0  0 0  1 0");
        assert!(a.geometric_eq(&b));
        assert!(!a.geometric_eq(&piece("0 0  1 0  2 0")));
    }

    #[test]
    fn test_new_normalizes_and_dedups() {
        let p = Piece::new([
            Coord::new(3, 5),
            Coord::new(4, 5),
            Coord::new(3, 5),
            Coord::new(3, 6),
        ]);
        assert_eq!(p.body(), &[Coord::new(0, 0), Coord::new(1, 0), Coord::new(0, 1)]);
        assert_eq!(p.width(), 2);
        assert_eq!(p.height(), 2);
    }

    #[test]
    fn test_disconnected_column_skirt() {
        let p = piece("0 0  2 1");
        assert_eq!(p.skirt(), &[0, EMPTY_SKIRT, 1]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Piece>().unwrap_err(), PieceParseError::Empty);
        assert_eq!(
            "0 0 1".parse::<Piece>().unwrap_err(),
            PieceParseError::OddTokenCount { count: 3 }
        );
        assert_eq!(
            "0 0 1 x".parse::<Piece>().unwrap_err(),
            PieceParseError::InvalidToken {
                token: "x".to_string()
            }
        );
    }

    #[test]
    fn test_parse_rejects_oversized_body() {
        assert_eq!(
            "-2147483648 0  2147483647 0".parse::<Piece>().unwrap_err(),
            PieceParseError::CoordinateOutOfRange {
                axis: 'x',
                span: 1 << 32
            }
        );
        assert!(matches!(
            "0 0  0 2000000000".parse::<Piece>(),
            Err(PieceParseError::CoordinateOutOfRange { axis: 'y', .. })
        ));

        let widest = format!("0 0  {} 0", MAX_PIECE_EXTENT - 1);
        assert_eq!(piece(&widest).width() as i64, MAX_PIECE_EXTENT);
    }

    #[test]
    fn test_negative_coordinates_normalize() {
        let p = piece("-3 -7  -2 -7  -3 -6");
        assert_eq!(p.body(), &[Coord::new(0, 0), Coord::new(1, 0), Coord::new(0, 1)]);
        assert!(p.rotate_ccw().geometric_eq(&piece("0 0  1 0  1 1")));
    }

    #[test]
    #[should_panic(expected = "invalid piece body")]
    fn test_new_panics_on_oversized_body() {
        Piece::new([Coord::new(i32::MIN, 0), Coord::new(i32::MAX, 0)]);
    }

    #[test]
    fn test_display_lists_body() {
        assert_eq!(piece("0 0  1 0").to_string(), "(0,0)(1,0)");
    }
}
