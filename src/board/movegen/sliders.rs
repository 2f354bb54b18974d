use super::super::attacks::{BISHOP_DIRECTIONS, ROOK_DIRECTIONS};
use super::super::{Board, Color, MoveList, Piece, Square};

impl Board {
    pub(super) fn generate_slider_moves(
        &self,
        from: Square,
        color: Color,
        piece: Piece,
        captures_only: bool,
        moves: &mut MoveList,
    ) {
        let straight = matches!(piece, Piece::Rook | Piece::Queen);
        let diagonal = matches!(piece, Piece::Bishop | Piece::Queen);
        let dirs = ROOK_DIRECTIONS
            .iter()
            .filter(|_| straight)
            .chain(BISHOP_DIRECTIONS.iter().filter(|_| diagonal));

        for &(dr, df) in dirs {
            let mut cur = from;
            while let Some(to) = cur.offset(dr, df) {
                self.push_if_reachable(from, to, color, piece, captures_only, moves);
                if !self.is_empty_square(to) {
                    break;
                }
                cur = to;
            }
        }
    }
}
