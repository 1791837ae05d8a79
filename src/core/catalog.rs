//! Shape catalog - immutable piece templates and the occupancy-matrix type
//!
//! Templates keep the original castle theme: a 2x2 wall block, a 1x4 tower,
//! and the shield/sword outlines. Matrices may be ragged; the bounding box is
//! the widest row by the row count.

use arrayvec::ArrayVec;

use crate::core::rng::SimpleRng;
use crate::types::{PieceFamily, MAX_SHAPE_DIM};

/// An occupancy matrix with a bounding box of at most 4x4 cells.
///
/// Rows are stored top to bottom. Row lengths may differ; cells past a row's
/// end count as empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    rows: ArrayVec<ArrayVec<bool, MAX_SHAPE_DIM>, MAX_SHAPE_DIM>,
}

impl Shape {
    /// Build a shape from template rows (non-zero = occupied)
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let mut out = ArrayVec::new();
        for row in rows {
            let mut cells = ArrayVec::new();
            for &v in row.iter() {
                cells.push(v != 0);
            }
            out.push(cells);
        }
        Self { rows: out }
    }

    /// Bounding-box height (number of rows)
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Bounding-box width (longest row)
    pub fn width(&self) -> usize {
        self.rows.iter().map(|row| row.len()).max().unwrap_or(0)
    }

    /// Whether the cell at (row, col) is occupied; ragged-safe
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// Iterate occupied cells as (row, col) pairs
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, &filled)| filled)
                .map(move |(c, _)| (r, c))
        })
    }

    /// Pure clockwise 90-degree rotation around the bounding-box center.
    ///
    /// `new[r][c] = old[h-1-c][r]` (transpose, then reverse rows). The result
    /// has the transposed bounding box; the original is untouched.
    pub fn rotated(&self) -> Self {
        let h = self.height();
        let w = self.width();

        let mut rows = ArrayVec::new();
        for r in 0..w {
            let mut cells = ArrayVec::new();
            for c in 0..h {
                cells.push(self.is_filled(h - 1 - c, r));
            }
            rows.push(cells);
        }
        Self { rows }
    }
}

/// An immutable piece template: occupancy rows plus a family tag
#[derive(Debug, Clone, Copy)]
pub struct Template {
    rows: &'static [&'static [u8]],
    family: PieceFamily,
}

impl Template {
    pub fn family(&self) -> PieceFamily {
        self.family
    }

    /// Independent copy of the template's occupancy matrix
    pub fn shape(&self) -> Shape {
        Shape::from_rows(self.rows)
    }
}

/// The seven fixed templates, process-wide constant data
pub static TEMPLATES: [Template; 7] = [
    Template {
        rows: &[&[1, 1], &[1, 1]],
        family: PieceFamily::Wall,
    },
    Template {
        rows: &[&[1, 1, 1, 1]],
        family: PieceFamily::Tower,
    },
    Template {
        rows: &[&[1, 1, 1], &[0, 1, 0]],
        family: PieceFamily::Shield,
    },
    Template {
        rows: &[&[1, 1, 0], &[0, 1, 1]],
        family: PieceFamily::Sword,
    },
    Template {
        rows: &[&[0, 1, 1], &[1, 1, 0]],
        family: PieceFamily::Sword,
    },
    Template {
        rows: &[&[1, 1, 1], &[1, 0, 0]],
        family: PieceFamily::Shield,
    },
    Template {
        rows: &[&[1, 1, 1], &[0, 0, 1]],
        family: PieceFamily::Shield,
    },
];

/// Pick one template uniformly at random
pub fn pick_template(rng: &mut SimpleRng) -> &'static Template {
    let idx = rng.next_range(TEMPLATES.len() as u32) as usize;
    &TEMPLATES[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_dimensions() {
        for template in &TEMPLATES {
            let shape = template.shape();
            assert!(shape.height() >= 1 && shape.height() <= MAX_SHAPE_DIM);
            assert!(shape.width() >= 1 && shape.width() <= MAX_SHAPE_DIM);
            assert!(shape.filled_cells().count() == 4);
        }
    }

    #[test]
    fn test_template_copies_are_independent() {
        let template = &TEMPLATES[0];
        let rotated = template.shape().rotated();
        // Mutating a derived shape must not leak back into the catalog.
        assert_eq!(template.shape(), Shape::from_rows(&[&[1, 1], &[1, 1]]));
        assert_eq!(rotated, template.shape()); // 2x2 square is rotation-invariant
    }

    #[test]
    fn test_rotation_bar() {
        let bar = Shape::from_rows(&[&[1, 1, 1, 1]]);
        let upright = bar.rotated();

        assert_eq!(upright.height(), 4);
        assert_eq!(upright.width(), 1);
        for r in 0..4 {
            assert!(upright.is_filled(r, 0));
        }
    }

    #[test]
    fn test_rotation_shield() {
        // [1 1 1]        [0 1]
        // [0 1 0]  ->    [1 1]
        //                [0 1]
        let shield = Shape::from_rows(&[&[1, 1, 1], &[0, 1, 0]]);
        let rotated = shield.rotated();

        assert_eq!(rotated.height(), 3);
        assert_eq!(rotated.width(), 2);
        assert!(!rotated.is_filled(0, 0));
        assert!(rotated.is_filled(0, 1));
        assert!(rotated.is_filled(1, 0));
        assert!(rotated.is_filled(1, 1));
        assert!(!rotated.is_filled(2, 0));
        assert!(rotated.is_filled(2, 1));
    }

    #[test]
    fn test_four_rotations_identity_for_square_box() {
        let square = Shape::from_rows(&[&[1, 1], &[1, 1]]);
        let back = square.rotated().rotated().rotated().rotated();
        assert_eq!(back, square);
    }

    #[test]
    fn test_ragged_rows_count_as_empty() {
        let ragged = Shape::from_rows(&[&[1, 1, 1], &[1]]);
        assert_eq!(ragged.width(), 3);
        assert!(ragged.is_filled(1, 0));
        assert!(!ragged.is_filled(1, 1));
        assert!(!ragged.is_filled(1, 2));
        assert!(!ragged.is_filled(5, 5));
    }

    #[test]
    fn test_pick_template_uniform_coverage() {
        let mut rng = SimpleRng::new(42);
        let mut seen = [false; TEMPLATES.len()];

        for _ in 0..1000 {
            let template = pick_template(&mut rng);
            let idx = TEMPLATES
                .iter()
                .position(|t| std::ptr::eq(t, template))
                .unwrap();
            seen[idx] = true;
        }

        assert!(seen.iter().all(|&s| s), "all templates should be drawn");
    }
}
