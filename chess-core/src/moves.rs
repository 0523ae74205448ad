//! 走法生成和合法性验证

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardState};
use crate::piece::{Color, Piece, PieceKind, Square};

/// 马的 8 个固定偏移
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// 象/后的斜线方向
const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// 车/后的直线方向
const ROOK_DIRS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// 王车易位方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastleSide {
    /// 王翼（短易位）
    King,
    /// 后翼（长易位）
    Queen,
}

/// 走法
///
/// 由生成器创建，由执行器消费；不做长期存储。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始格
    pub from: Square,
    /// 目标格
    pub to: Square,
    /// 走动的棋子
    pub piece: Piece,
    /// 被吃的棋子（如果有）
    pub captured: Option<Piece>,
    /// 升变的目标类型（如果有）
    pub promotion: Option<PieceKind>,
    /// 是否为兵的双步推进
    pub double_push: bool,
    /// 是否为过路吃兵
    pub en_passant: bool,
    /// 王车易位方向（如果是易位）
    pub castle: Option<CastleSide>,
}

impl Move {
    /// 创建新走法
    pub fn new(from: Square, to: Square, piece: Piece) -> Self {
        Self {
            from,
            to,
            piece,
            captured: None,
            promotion: None,
            double_push: false,
            en_passant: false,
            castle: None,
        }
    }

    /// 创建带吃子的走法
    pub fn with_capture(from: Square, to: Square, piece: Piece, captured: Piece) -> Self {
        Self {
            captured: Some(captured),
            ..Self::new(from, to, piece)
        }
    }

    /// 坐标记法（如 "e2e4"，升变追加小写类型字符 "e7e8q"）
    pub fn coordinate(&self) -> String {
        match self.promotion {
            Some(kind) => format!("{}{}{}", self.from, self.to, kind.to_fen_char(Color::Black)),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成当前走子方的所有伪合法走法（不考虑被将军）
    pub fn generate_pseudo_legal(state: &BoardState) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);

        for (sq, piece) in state.board.pieces(state.side_to_move) {
            Self::generate_piece_moves(state, sq, piece, &mut moves);
        }

        moves
    }

    /// 生成当前走子方的所有合法走法（过滤掉会让己方王被攻击的走法）
    ///
    /// 易位走法与其他走法使用同一套过滤逻辑。
    pub fn generate_legal(state: &BoardState) -> Vec<Move> {
        let mover = state.side_to_move;

        Self::generate_pseudo_legal(state)
            .into_iter()
            .filter(|mv| {
                // 在克隆局面上模拟走法
                let mut test_state = state.clone();
                test_state.apply_move(mv);
                !Self::is_in_check(&test_state.board, mover)
            })
            .collect()
    }

    /// 按棋子类型分派生成
    fn generate_piece_moves(state: &BoardState, sq: Square, piece: Piece, moves: &mut Vec<Move>) {
        match piece.kind {
            PieceKind::Pawn => Self::generate_pawn_moves(state, sq, piece.color, moves),
            PieceKind::Knight => Self::generate_knight_moves(&state.board, sq, piece, moves),
            PieceKind::Bishop => {
                Self::generate_sliding_moves(&state.board, sq, piece, &BISHOP_DIRS, moves)
            }
            PieceKind::Rook => {
                Self::generate_sliding_moves(&state.board, sq, piece, &ROOK_DIRS, moves)
            }
            PieceKind::Queen => {
                Self::generate_sliding_moves(&state.board, sq, piece, &BISHOP_DIRS, moves);
                Self::generate_sliding_moves(&state.board, sq, piece, &ROOK_DIRS, moves);
            }
            PieceKind::King => Self::generate_king_moves(state, sq, piece.color, moves),
        }
    }

    /// 生成兵的走法（推进、双步、斜吃、过路吃、升变）
    fn generate_pawn_moves(state: &BoardState, from: Square, color: Color, moves: &mut Vec<Move>) {
        let board = &state.board;
        let piece = Piece::new(PieceKind::Pawn, color);
        let (dir, start_rank, promo_rank): (i8, u8, u8) = match color {
            Color::White => (1, 1, 7),
            Color::Black => (-1, 6, 0),
        };

        // 前进一格
        if let Some(to) = from.offset(0, dir) {
            if board.get(to).is_none() {
                Self::push_pawn_move(Move::new(from, to, piece), promo_rank, moves);

                // 起始行可双步推进，途经格与目标格都必须为空
                if from.rank == start_rank {
                    if let Some(to2) = from.offset(0, dir * 2) {
                        if board.get(to2).is_none() {
                            let mut mv = Move::new(from, to2, piece);
                            mv.double_push = true;
                            moves.push(mv);
                        }
                    }
                }
            }
        }

        // 斜吃与过路吃
        for df in [-1i8, 1] {
            if let Some(to) = from.offset(df, dir) {
                if let Some(target) = board.get(to) {
                    if target.color != color {
                        Self::push_pawn_move(
                            Move::with_capture(from, to, piece, target),
                            promo_rank,
                            moves,
                        );
                    }
                } else if state.en_passant == Some(to) {
                    // 过路吃兵：被吃的兵在起始行的相邻格上
                    let victim_sq = Square::new_unchecked(to.file, from.rank);
                    if let Some(victim) = board.get(victim_sq) {
                        let mut mv = Move::with_capture(from, to, piece, victim);
                        mv.en_passant = true;
                        moves.push(mv);
                    }
                }
            }
        }
    }

    /// 添加兵走法，到达底线时展开为四种升变
    fn push_pawn_move(mv: Move, promo_rank: u8, moves: &mut Vec<Move>) {
        if mv.to.rank == promo_rank {
            for kind in [
                PieceKind::Queen,
                PieceKind::Rook,
                PieceKind::Bishop,
                PieceKind::Knight,
            ] {
                let mut promo = mv;
                promo.promotion = Some(kind);
                moves.push(promo);
            }
        } else {
            moves.push(mv);
        }
    }

    /// 生成马的走法
    fn generate_knight_moves(board: &Board, from: Square, piece: Piece, moves: &mut Vec<Move>) {
        for (df, dr) in KNIGHT_OFFSETS {
            if let Some(to) = from.offset(df, dr) {
                Self::try_add_move(board, from, to, piece, moves);
            }
        }
    }

    /// 生成滑动棋子（象/车/后）沿方向集的走法
    fn generate_sliding_moves(
        board: &Board,
        from: Square,
        piece: Piece,
        dirs: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &(df, dr) in dirs {
            let mut current = from;
            while let Some(to) = current.offset(df, dr) {
                if let Some(target) = board.get(to) {
                    // 遇到棋子：敌方可吃，射线终止
                    if target.color != piece.color {
                        moves.push(Move::with_capture(from, to, piece, target));
                    }
                    break;
                }
                moves.push(Move::new(from, to, piece));
                current = to;
            }
        }
    }

    /// 生成王的走法（8 个相邻格加易位）
    fn generate_king_moves(state: &BoardState, from: Square, color: Color, moves: &mut Vec<Move>) {
        let piece = Piece::new(PieceKind::King, color);

        for df in -1i8..=1 {
            for dr in -1i8..=1 {
                if df == 0 && dr == 0 {
                    continue;
                }
                if let Some(to) = from.offset(df, dr) {
                    Self::try_add_move(&state.board, from, to, piece, moves);
                }
            }
        }

        Self::generate_castling_moves(state, from, color, moves);
    }

    /// 生成王车易位走法
    ///
    /// 条件：保留权利、车在初始格、中间格为空、
    /// 王的起点/途经格/终点均未被对方攻击。
    fn generate_castling_moves(state: &BoardState, from: Square, color: Color, moves: &mut Vec<Move>) {
        let board = &state.board;
        let rank = match color {
            Color::White => 0,
            Color::Black => 7,
        };

        if from != Square::new_unchecked(4, rank) {
            return;
        }

        let opponent = color.opponent();
        let (kingside, queenside) = match color {
            Color::White => (state.castling.white_kingside, state.castling.white_queenside),
            Color::Black => (state.castling.black_kingside, state.castling.black_queenside),
        };
        let piece = Piece::new(PieceKind::King, color);
        let rook = Piece::new(PieceKind::Rook, color);

        if kingside
            && board.get(Square::new_unchecked(7, rank)) == Some(rook)
            && board.get(Square::new_unchecked(5, rank)).is_none()
            && board.get(Square::new_unchecked(6, rank)).is_none()
            && !Self::is_attacked(board, Square::new_unchecked(4, rank), opponent)
            && !Self::is_attacked(board, Square::new_unchecked(5, rank), opponent)
            && !Self::is_attacked(board, Square::new_unchecked(6, rank), opponent)
        {
            let mut mv = Move::new(from, Square::new_unchecked(6, rank), piece);
            mv.castle = Some(CastleSide::King);
            moves.push(mv);
        }

        if queenside
            && board.get(Square::new_unchecked(0, rank)) == Some(rook)
            && board.get(Square::new_unchecked(1, rank)).is_none()
            && board.get(Square::new_unchecked(2, rank)).is_none()
            && board.get(Square::new_unchecked(3, rank)).is_none()
            && !Self::is_attacked(board, Square::new_unchecked(4, rank), opponent)
            && !Self::is_attacked(board, Square::new_unchecked(3, rank), opponent)
            && !Self::is_attacked(board, Square::new_unchecked(2, rank), opponent)
        {
            let mut mv = Move::new(from, Square::new_unchecked(2, rank), piece);
            mv.castle = Some(CastleSide::Queen);
            moves.push(mv);
        }
    }

    /// 尝试添加走法（目标格为空或为敌方棋子）
    fn try_add_move(board: &Board, from: Square, to: Square, piece: Piece, moves: &mut Vec<Move>) {
        if let Some(target) = board.get(to) {
            if target.color != piece.color {
                moves.push(Move::with_capture(from, to, piece, target));
            }
        } else {
            moves.push(Move::new(from, to, piece));
        }
    }

    /// 检查指定格子是否被指定阵营攻击
    ///
    /// 按棋子类别独立检查，被合法性过滤、易位前置条件
    /// 和将军/将死检测共用。
    pub fn is_attacked(board: &Board, target: Square, by: Color) -> bool {
        // 兵：攻击方向取决于攻击方颜色
        let dir: i8 = match by {
            Color::White => 1,
            Color::Black => -1,
        };
        for df in [-1i8, 1] {
            if let Some(from) = target.offset(df, -dir) {
                if board.get(from) == Some(Piece::new(PieceKind::Pawn, by)) {
                    return true;
                }
            }
        }

        // 马
        for (df, dr) in KNIGHT_OFFSETS {
            if let Some(from) = target.offset(df, dr) {
                if board.get(from) == Some(Piece::new(PieceKind::Knight, by)) {
                    return true;
                }
            }
        }

        // 斜线：象或后
        if Self::ray_attack(board, target, &BISHOP_DIRS, by, PieceKind::Bishop) {
            return true;
        }

        // 直线：车或后
        if Self::ray_attack(board, target, &ROOK_DIRS, by, PieceKind::Rook) {
            return true;
        }

        // 王
        for df in -1i8..=1 {
            for dr in -1i8..=1 {
                if df == 0 && dr == 0 {
                    continue;
                }
                if let Some(from) = target.offset(df, dr) {
                    if board.get(from) == Some(Piece::new(PieceKind::King, by)) {
                        return true;
                    }
                }
            }
        }

        false
    }

    /// 沿方向集探测第一个棋子，命中指定类型或后即为攻击
    fn ray_attack(
        board: &Board,
        target: Square,
        dirs: &[(i8, i8)],
        by: Color,
        kind: PieceKind,
    ) -> bool {
        for &(df, dr) in dirs {
            let mut current = target;
            while let Some(next) = current.offset(df, dr) {
                if let Some(piece) = board.get(next) {
                    if piece.color == by && (piece.kind == kind || piece.kind == PieceKind::Queen) {
                        return true;
                    }
                    break;
                }
                current = next;
            }
        }
        false
    }

    /// 检查指定阵营是否被将军
    pub fn is_in_check(board: &Board, color: Color) -> bool {
        match board.find_king(color) {
            Some(king_sq) => Self::is_attacked(board, king_sq, color.opponent()),
            None => false, // 没有王，视为不被将军
        }
    }

    /// 检查当前走子方是否被将死
    pub fn is_checkmate(state: &BoardState) -> bool {
        if !Self::is_in_check(&state.board, state.side_to_move) {
            return false;
        }
        Self::generate_legal(state).is_empty()
    }

    /// 检查是否逼和（无子可动但未被将军）
    pub fn is_stalemate(state: &BoardState) -> bool {
        if Self::is_in_check(&state.board, state.side_to_move) {
            return false;
        }
        Self::generate_legal(state).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    fn perft(state: &BoardState, depth: u8) -> u64 {
        if depth == 0 {
            return 1;
        }
        MoveGenerator::generate_legal(state)
            .iter()
            .map(|mv| {
                let mut next = state.clone();
                next.apply_move(mv);
                perft(&next, depth - 1)
            })
            .sum()
    }

    #[test]
    fn test_perft_initial() {
        let state = BoardState::initial();
        assert_eq!(perft(&state, 1), 20);
        assert_eq!(perft(&state, 2), 400);
    }

    #[test]
    fn test_legal_moves_never_leave_king_attacked() {
        let fens = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3",
            "4k3/8/8/8/8/8/4r3/4K3 w - - 0 1",
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        ];

        for fen in fens {
            let state = Fen::parse(fen).unwrap();
            for mv in MoveGenerator::generate_legal(&state) {
                let mut next = state.clone();
                next.apply_move(&mv);
                assert!(
                    !MoveGenerator::is_in_check(&next.board, state.side_to_move),
                    "move {} leaves own king attacked in {}",
                    mv,
                    fen
                );
            }
        }
    }

    #[test]
    fn test_knight_moves_center() {
        let fen = "4k3/8/8/8/3N4/8/8/4K3 w - - 0 1";
        let state = Fen::parse(fen).unwrap();

        let knight_moves: Vec<_> = MoveGenerator::generate_legal(&state)
            .into_iter()
            .filter(|mv| mv.piece.kind == PieceKind::Knight)
            .collect();
        assert_eq!(knight_moves.len(), 8);
    }

    #[test]
    fn test_knight_moves_corner() {
        let fen = "4k3/8/8/8/8/8/8/N3K3 w - - 0 1";
        let state = Fen::parse(fen).unwrap();

        let knight_moves: Vec<_> = MoveGenerator::generate_legal(&state)
            .into_iter()
            .filter(|mv| mv.piece.kind == PieceKind::Knight)
            .collect();
        assert_eq!(knight_moves.len(), 2);
    }

    #[test]
    fn test_rook_ray_blocked_by_friendly() {
        // 车在 d4，己方兵在 d6：向上只能走一格
        let fen = "4k3/8/3P4/8/3R4/8/8/4K3 w - - 0 1";
        let state = Fen::parse(fen).unwrap();

        let rook_targets: Vec<_> = MoveGenerator::generate_legal(&state)
            .into_iter()
            .filter(|mv| mv.piece.kind == PieceKind::Rook)
            .map(|mv| mv.to)
            .collect();

        assert!(rook_targets.contains(&Square::from_algebraic("d5").unwrap()));
        assert!(!rook_targets.contains(&Square::from_algebraic("d6").unwrap()));
        assert!(!rook_targets.contains(&Square::from_algebraic("d7").unwrap()));
    }

    #[test]
    fn test_capture_ends_ray() {
        let fen = "4k3/3r4/8/8/3R4/8/8/4K3 w - - 0 1";
        let state = Fen::parse(fen).unwrap();

        let captures: Vec<_> = MoveGenerator::generate_legal(&state)
            .into_iter()
            .filter(|mv| mv.captured.is_some())
            .collect();
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].to, Square::from_algebraic("d7").unwrap());

        // 吃子后射线终止，不能越过目标
        let all_targets: Vec<_> = MoveGenerator::generate_legal(&state)
            .into_iter()
            .map(|mv| mv.to)
            .collect();
        assert!(!all_targets.contains(&Square::from_algebraic("d8").unwrap()));
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        // d2 白象被 d7 黑车钉在王前
        let fen = "3rk3/8/8/8/8/8/3B4/3K4 w - - 0 1";
        let state = Fen::parse(fen).unwrap();

        let bishop_moves: Vec<_> = MoveGenerator::generate_legal(&state)
            .into_iter()
            .filter(|mv| mv.piece.kind == PieceKind::Bishop)
            .collect();
        assert!(bishop_moves.is_empty(), "pinned bishop must not move");
    }

    #[test]
    fn test_double_push_blocked() {
        // e3 被占时 e2 兵既不能单步也不能双步
        let fen = "4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1";
        let state = Fen::parse(fen).unwrap();

        let pawn_moves: Vec<_> = MoveGenerator::generate_legal(&state)
            .into_iter()
            .filter(|mv| mv.piece.kind == PieceKind::Pawn && mv.captured.is_none())
            .collect();
        assert!(pawn_moves.is_empty());

        // e4 被占时允许单步、禁止双步
        let fen = "4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1";
        let state = Fen::parse(fen).unwrap();

        let pawn_pushes: Vec<_> = MoveGenerator::generate_legal(&state)
            .into_iter()
            .filter(|mv| mv.piece.kind == PieceKind::Pawn && mv.captured.is_none())
            .collect();
        assert_eq!(pawn_pushes.len(), 1);
        assert_eq!(pawn_pushes[0].to, Square::from_algebraic("e3").unwrap());
    }

    #[test]
    fn test_promotion_generates_four_kinds() {
        let fen = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1";
        let state = Fen::parse(fen).unwrap();

        let promotions: Vec<_> = MoveGenerator::generate_legal(&state)
            .into_iter()
            .filter(|mv| mv.promotion.is_some())
            .collect();
        assert_eq!(promotions.len(), 4);

        let kinds: Vec<_> = promotions.iter().map(|mv| mv.promotion.unwrap()).collect();
        assert!(kinds.contains(&PieceKind::Queen));
        assert!(kinds.contains(&PieceKind::Rook));
        assert!(kinds.contains(&PieceKind::Bishop));
        assert!(kinds.contains(&PieceKind::Knight));
    }

    #[test]
    fn test_castling_preconditions() {
        // f1、g1 为空且未被攻击，王翼易位合法
        let fen = "4k3/8/8/8/8/8/8/4K2R w K - 0 1";
        let state = Fen::parse(fen).unwrap();
        let castle = MoveGenerator::generate_legal(&state)
            .into_iter()
            .find(|mv| mv.castle == Some(CastleSide::King));
        assert!(castle.is_some());

        // 无权利时不生成
        let fen = "4k3/8/8/8/8/8/8/4K2R w - - 0 1";
        let state = Fen::parse(fen).unwrap();
        let castle = MoveGenerator::generate_legal(&state)
            .into_iter()
            .find(|mv| mv.castle.is_some());
        assert!(castle.is_none());

        // 中间格被占时不生成
        let fen = "4k3/8/8/8/8/8/8/4KN1R w K - 0 1";
        let state = Fen::parse(fen).unwrap();
        let castle = MoveGenerator::generate_legal(&state)
            .into_iter()
            .find(|mv| mv.castle.is_some());
        assert!(castle.is_none());
    }

    #[test]
    fn test_castling_through_attacked_square_forbidden() {
        // 黑车控制 f 列，王不能经过 f1
        let fen = "4kr2/8/8/8/8/8/8/4K2R w K - 0 1";
        let state = Fen::parse(fen).unwrap();
        let castle = MoveGenerator::generate_legal(&state)
            .into_iter()
            .find(|mv| mv.castle.is_some());
        assert!(castle.is_none());
    }

    #[test]
    fn test_castling_while_in_check_forbidden() {
        let fen = "4k3/8/8/8/8/8/4r3/4K2R w K - 0 1";
        let state = Fen::parse(fen).unwrap();
        assert!(MoveGenerator::is_in_check(&state.board, Color::White));

        let castle = MoveGenerator::generate_legal(&state)
            .into_iter()
            .find(|mv| mv.castle.is_some());
        assert!(castle.is_none());
    }

    #[test]
    fn test_attack_oracle_pawn_direction() {
        // 白兵向高行攻击，黑兵向低行攻击
        let fen = "4k3/8/8/8/3p4/8/3P4/4K3 w - - 0 1";
        let state = Fen::parse(fen).unwrap();

        assert!(MoveGenerator::is_attacked(
            &state.board,
            Square::from_algebraic("c3").unwrap(),
            Color::White
        ));
        assert!(MoveGenerator::is_attacked(
            &state.board,
            Square::from_algebraic("e3").unwrap(),
            Color::White
        ));
        assert!(!MoveGenerator::is_attacked(
            &state.board,
            Square::from_algebraic("d3").unwrap(),
            Color::White
        ));

        assert!(MoveGenerator::is_attacked(
            &state.board,
            Square::from_algebraic("c3").unwrap(),
            Color::Black
        ));
        assert!(MoveGenerator::is_attacked(
            &state.board,
            Square::from_algebraic("e3").unwrap(),
            Color::Black
        ));
    }

    #[test]
    fn test_attack_oracle_sliding_blocked() {
        // 车的攻击被中间棋子阻断
        let fen = "4k3/8/8/8/8/3P4/8/3R2K1 w - - 0 1";
        let state = Fen::parse(fen).unwrap();

        assert!(MoveGenerator::is_attacked(
            &state.board,
            Square::from_algebraic("d2").unwrap(),
            Color::White
        ));
        assert!(!MoveGenerator::is_attacked(
            &state.board,
            Square::from_algebraic("d5").unwrap(),
            Color::White
        ));
    }

    #[test]
    fn test_queen_attacks_both_ray_sets() {
        let fen = "4k3/8/8/8/3Q4/8/8/4K3 w - - 0 1";
        let state = Fen::parse(fen).unwrap();

        assert!(MoveGenerator::is_attacked(
            &state.board,
            Square::from_algebraic("d8").unwrap(),
            Color::White
        ));
        assert!(MoveGenerator::is_attacked(
            &state.board,
            Square::from_algebraic("g7").unwrap(),
            Color::White
        ));
    }

    #[test]
    fn test_check_detection() {
        let fen = "4k3/8/8/8/8/8/4r3/4K3 w - - 0 1";
        let state = Fen::parse(fen).unwrap();

        assert!(MoveGenerator::is_in_check(&state.board, Color::White));
        assert!(!MoveGenerator::is_in_check(&state.board, Color::Black));
    }

    #[test]
    fn test_checkmate_back_rank() {
        let fen = "R5k1/5ppp/8/8/8/8/8/4K3 b - - 0 1";
        let state = Fen::parse(fen).unwrap();
        assert!(MoveGenerator::is_checkmate(&state));
    }

    #[test]
    fn test_check_but_not_checkmate() {
        let fen = "4k3/8/8/8/8/8/4r3/4K3 w - - 0 1";
        let state = Fen::parse(fen).unwrap();
        assert!(MoveGenerator::is_in_check(&state.board, Color::White));
        assert!(!MoveGenerator::is_checkmate(&state));
    }

    #[test]
    fn test_stalemate() {
        // 经典逼和：黑王 h8 无路可走但未被将军
        let fen = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1";
        let state = Fen::parse(fen).unwrap();

        assert!(!MoveGenerator::is_in_check(&state.board, Color::Black));
        assert!(MoveGenerator::is_stalemate(&state));
        assert!(!MoveGenerator::is_checkmate(&state));
    }

    #[test]
    fn test_move_coordinate_notation() {
        let state = BoardState::initial();
        let mv = MoveGenerator::generate_legal(&state)
            .into_iter()
            .find(|mv| {
                mv.from == Square::from_algebraic("e2").unwrap()
                    && mv.to == Square::from_algebraic("e4").unwrap()
            })
            .unwrap();
        assert_eq!(mv.coordinate(), "e2e4");
        assert_eq!(mv.to_string(), "e2 -> e4");

        let fen = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1";
        let state = Fen::parse(fen).unwrap();
        let promo = MoveGenerator::generate_legal(&state)
            .into_iter()
            .find(|mv| mv.promotion == Some(PieceKind::Queen))
            .unwrap();
        assert_eq!(promo.coordinate(), "a7a8q");
    }
}
