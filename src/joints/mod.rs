//! Canonical joint assignment.
//!
//! One deterministic rule covers every internal boundary: the piece on the
//! left/top side of the boundary owns the Tab (external joint) on its
//! Right/Bottom side, and its neighbor owns the complementary Blank on the
//! facing side. Perimeter sides carry no joint at all. This yields exactly
//! 2 joints per corner piece, 3 per non-corner edge piece, and 4 per center
//! piece, and guarantees every shared boundary has one Tab and one Blank.

use crate::geom::Side;
use crate::piece::{Joint, Piece, Stage};

/// Joints for the piece at `(row, col)` on a `rows`×`cols` grid, in fixed
/// Top, Right, Bottom, Left order.
pub fn joints_for(row: u32, col: u32, rows: u32, cols: u32) -> Vec<Joint> {
    let mut joints = Vec::with_capacity(4);
    if row > 0 {
        joints.push(Joint {
            side: Side::Top,
            external: false,
        });
    }
    if col + 1 < cols {
        joints.push(Joint {
            side: Side::Right,
            external: true,
        });
    }
    if row + 1 < rows {
        joints.push(Joint {
            side: Side::Bottom,
            external: true,
        });
    }
    if col > 0 {
        joints.push(Joint {
            side: Side::Left,
            external: false,
        });
    }
    joints
}

/// Assign joints to every piece of a fully partitioned, classified grid.
pub fn assign(pieces: &mut [Piece], rows: u32, cols: u32) {
    for piece in pieces {
        piece.joints = joints_for(piece.row, piece.col, rows, cols);
        piece.advance(Stage::JointsAssigned);
    }
}

#[cfg(test)]
mod tests {
    use super::{assign, joints_for};
    use crate::board::Board;
    use crate::geom::Side;
    use crate::piece::{Role, Stage, classify};

    fn classified_pieces(count: u32) -> (Board, Vec<crate::piece::Piece>) {
        let board = Board::new(400, 400, count).unwrap();
        let mut pieces = board.partition();
        for p in &mut pieces {
            p.role = Some(classify(p.rect, board.grid));
            p.advance(Stage::Classified);
        }
        (board, pieces)
    }

    #[test]
    fn joint_order_is_top_right_bottom_left() {
        let joints = joints_for(1, 1, 3, 3);
        let sides: Vec<Side> = joints.iter().map(|j| j.side).collect();
        assert_eq!(sides, vec![Side::Top, Side::Right, Side::Bottom, Side::Left]);
    }

    #[test]
    fn joint_counts_match_roles() {
        for count in [9, 16, 25] {
            let (board, mut pieces) = classified_pieces(count);
            assign(&mut pieces, board.rows, board.cols);
            for piece in &pieces {
                let expected = match piece.role.unwrap() {
                    Role::Corner => 2,
                    Role::Edge => 3,
                    Role::Center => 4,
                };
                assert_eq!(
                    piece.joints.len(),
                    expected,
                    "piece {} ({:?})",
                    piece.index,
                    piece.role
                );
            }
        }
    }

    #[test]
    fn role_census_for_3x3_and_4x4() {
        for (count, corners, edges, centers) in [(9, 4, 4, 1), (16, 4, 8, 4)] {
            let (_, pieces) = classified_pieces(count);
            let tally = |role| pieces.iter().filter(|p| p.role == Some(role)).count();
            assert_eq!(tally(Role::Corner), corners);
            assert_eq!(tally(Role::Edge), edges);
            assert_eq!(tally(Role::Center), centers);
        }
    }

    #[test]
    fn shared_boundaries_are_complementary() {
        let (board, mut pieces) = classified_pieces(16);
        assign(&mut pieces, board.rows, board.cols);
        let cols = board.cols as usize;
        let at = |row: usize, col: usize| &pieces[row * cols + col];

        for row in 0..board.rows as usize {
            for col in 0..board.cols as usize {
                let piece = at(row, col);
                if col + 1 < cols {
                    let right = at(row, col + 1);
                    let a = piece.joint(Side::Right).expect("missing right joint");
                    let b = right.joint(Side::Left).expect("missing left joint");
                    assert_ne!(a.external, b.external, "boundary ({row},{col})-right");
                }
                if row + 1 < board.rows as usize {
                    let below = at(row + 1, col);
                    let a = piece.joint(Side::Bottom).expect("missing bottom joint");
                    let b = below.joint(Side::Top).expect("missing top joint");
                    assert_ne!(a.external, b.external, "boundary ({row},{col})-below");
                }
            }
        }
    }

    #[test]
    fn perimeter_sides_carry_no_joint() {
        let (board, mut pieces) = classified_pieces(9);
        assign(&mut pieces, board.rows, board.cols);
        let top_left = &pieces[0];
        assert!(top_left.joint(Side::Top).is_none());
        assert!(top_left.joint(Side::Left).is_none());
        let bottom_right = &pieces[8];
        assert!(bottom_right.joint(Side::Bottom).is_none());
        assert!(bottom_right.joint(Side::Right).is_none());
    }
}
