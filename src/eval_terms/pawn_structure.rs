//! Pawn structure evaluation.
//!
//! Doubled, isolated and passed pawns, from file and rank geometry only.

use shakmaty::{Color, Role, Square};

use super::helpers::{file_of, rank_of, sign, PieceMap};
use super::tables::{DOUBLED_PAWN_PENALTY, ISOLATED_PAWN_PENALTY, PASSED_PAWN_BONUS};

/// Returns a score from white's perspective.
pub fn eval_pawn_structure(pieces: &PieceMap) -> i32 {
    let white: Vec<Square> = pieces.squares_of(Color::White, Role::Pawn).collect();
    let black: Vec<Square> = pieces.squares_of(Color::Black, Role::Pawn).collect();

    side_score(Color::White, &white, &black) - side_score(Color::Black, &black, &white)
}

fn side_score(color: Color, own: &[Square], enemy: &[Square]) -> i32 {
    let mut per_file = [0i32; 8];
    for &square in own {
        per_file[file_of(square) as usize] += 1;
    }

    let doubled: i32 = per_file.iter().map(|&n| (n - 1).max(0)).sum();

    let isolated = own
        .iter()
        .filter(|&&square| {
            let file = file_of(square);
            let left = file > 0 && per_file[(file - 1) as usize] > 0;
            let right = file < 7 && per_file[(file + 1) as usize] > 0;
            !left && !right
        })
        .count() as i32;

    let passed = own
        .iter()
        .filter(|&&square| is_passed(color, square, enemy))
        .count() as i32;

    passed * PASSED_PAWN_BONUS - doubled * DOUBLED_PAWN_PENALTY - isolated * ISOLATED_PAWN_PENALTY
}

/// No enemy pawn ahead of this one on its own or an adjacent file.
fn is_passed(color: Color, square: Square, enemy: &[Square]) -> bool {
    let (file, rank) = (file_of(square), rank_of(square));
    let forward = sign(color);
    !enemy.iter().any(|&other| {
        (file_of(other) - file).abs() <= 1 && (rank_of(other) - rank) * forward > 0
    })
}
