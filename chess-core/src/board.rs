//! 棋盘与局面状态

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, FIFTY_MOVE_HALFMOVES, REPETITION_LIMIT, SQUARE_COUNT};
use crate::moves::{CastleSide, Move, MoveGenerator};
use crate::piece::{Color, Piece, PieceKind, Square};
use crate::zobrist::ZobristTable;

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// 8x8 棋盘，索引为 rank * 8 + file，使用 Vec 以支持 serde
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: vec![None; SQUARE_COUNT],
        }
    }

    /// 创建初始棋盘
    pub fn initial() -> Self {
        let mut board = Self::empty();

        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for (file, kind) in back_rank.into_iter().enumerate() {
            let file = file as u8;
            board.set(Square::new_unchecked(file, 0), Some(Piece::new(kind, Color::White)));
            board.set(Square::new_unchecked(file, 7), Some(Piece::new(kind, Color::Black)));
        }

        for file in 0..BOARD_SIZE as u8 {
            board.set(
                Square::new_unchecked(file, 1),
                Some(Piece::new(PieceKind::Pawn, Color::White)),
            );
            board.set(
                Square::new_unchecked(file, 6),
                Some(Piece::new(PieceKind::Pawn, Color::Black)),
            );
        }

        board
    }

    /// 获取指定格子的棋子
    pub fn get(&self, sq: Square) -> Option<Piece> {
        if sq.is_valid() {
            self.squares[sq.to_index()]
        } else {
            None
        }
    }

    /// 设置指定格子的棋子
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        if sq.is_valid() {
            self.squares[sq.to_index()] = piece;
        }
    }

    /// 移动棋子（不检查规则）
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        let piece = self.get(from);
        let captured = self.get(to);
        self.set(from, None);
        self.set(to, piece);
        captured
    }

    /// 查找指定阵营的王的位置
    pub fn find_king(&self, color: Color) -> Option<Square> {
        for index in 0..SQUARE_COUNT {
            if let Some(piece) = self.squares[index] {
                if piece.kind == PieceKind::King && piece.color == color {
                    return Square::from_index(index);
                }
            }
        }
        None
    }

    /// 获取指定阵营的所有棋子位置
    pub fn pieces(&self, color: Color) -> Vec<(Square, Piece)> {
        let mut result = Vec::new();
        for index in 0..SQUARE_COUNT {
            if let Some(piece) = self.squares[index] {
                if piece.color == color {
                    if let Some(sq) = Square::from_index(index) {
                        result.push((sq, piece));
                    }
                }
            }
        }
        result
    }

    /// 获取所有棋子
    pub fn all_pieces(&self) -> Vec<(Square, Piece)> {
        let mut result = Vec::new();
        for index in 0..SQUARE_COUNT {
            if let Some(piece) = self.squares[index] {
                if let Some(sq) = Square::from_index(index) {
                    result.push((sq, piece));
                }
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

/// 王车易位权利（四个独立布尔值）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    /// 双方均保留全部权利
    pub fn all() -> Self {
        Self {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    /// 双方均无权利
    pub fn none() -> Self {
        Self {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }

    /// 清除指定阵营的全部权利（王移动后不可恢复）
    pub fn clear_side(&mut self, color: Color) {
        match color {
            Color::White => {
                self.white_kingside = false;
                self.white_queenside = false;
            }
            Color::Black => {
                self.black_kingside = false;
                self.black_queenside = false;
            }
        }
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::all()
    }
}

/// 完整的局面状态（棋盘、走子方、易位权利、过路兵、计数器）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// 棋盘
    pub board: Board,
    /// 当前走子方
    pub side_to_move: Color,
    /// 王车易位权利
    pub castling: CastlingRights,
    /// 过路兵目标格（仅在双步推进后的一回合内有效）
    pub en_passant: Option<Square>,
    /// 半回合计数（用于五十回合规则）
    pub halfmove_clock: u32,
    /// 完整回合数（黑方走完后 +1）
    pub fullmove_number: u32,
    /// 局面历史（Zobrist 哈希，用于判断重复局面，仅由会话提交时追加）
    pub position_history: Vec<u64>,
}

impl BoardState {
    /// 创建初始状态
    pub fn initial() -> Self {
        Self {
            board: Board::initial(),
            side_to_move: Color::White,
            castling: CastlingRights::all(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            position_history: Vec::new(),
        }
    }

    /// 执行走法，原地更新所有派生状态
    ///
    /// 前置条件：走法必须由走法生成器针对当前局面生成，
    /// 本方法不做任何独立的合法性检查。
    pub fn apply_move(&mut self, mv: &Move) {
        let mover = self.side_to_move;

        // 清空起点
        self.board.set(mv.from, None);

        if mv.en_passant {
            // 过路吃兵：被吃的兵在被经过的格子上，而不是目标格
            let victim_sq = Square::new_unchecked(mv.to.file, mv.from.rank);
            self.board.set(victim_sq, None);
            self.board.set(mv.to, Some(mv.piece));
        } else if let Some(side) = mv.castle {
            // 王车易位：同时移动王和车
            self.board.set(mv.to, Some(mv.piece));
            let rank = mv.from.rank;
            match side {
                CastleSide::King => {
                    let rook = self.board.get(Square::new_unchecked(7, rank));
                    self.board.set(Square::new_unchecked(7, rank), None);
                    self.board.set(Square::new_unchecked(5, rank), rook);
                }
                CastleSide::Queen => {
                    let rook = self.board.get(Square::new_unchecked(0, rank));
                    self.board.set(Square::new_unchecked(0, rank), None);
                    self.board.set(Square::new_unchecked(3, rank), rook);
                }
            }
        } else {
            // 普通走法：放置原棋子或升变后的棋子
            let placed = match mv.promotion {
                Some(kind) => Piece::new(kind, mover),
                None => mv.piece,
            };
            self.board.set(mv.to, Some(placed));
        }

        self.update_castling_rights(mv);

        // 双步推进后设置过路兵目标，其余走法一律清除
        self.en_passant = if mv.double_push {
            let dir: i8 = match mover {
                Color::White => 1,
                Color::Black => -1,
            };
            Some(Square::new_unchecked(
                mv.from.file,
                (mv.from.rank as i8 + dir) as u8,
            ))
        } else {
            None
        };

        // 兵走动或吃子重置半回合计数
        if mv.piece.kind == PieceKind::Pawn || mv.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if mover == Color::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = mover.opponent();
    }

    /// 根据走法更新易位权利
    ///
    /// 王移动清除本方双侧权利；车离开或被吃于初始格清除对应单侧权利。
    fn update_castling_rights(&mut self, mv: &Move) {
        if mv.piece.kind == PieceKind::King {
            self.castling.clear_side(mv.piece.color);
        }

        for sq in [mv.from, mv.to] {
            match (sq.file, sq.rank) {
                (0, 0) => self.castling.white_queenside = false,
                (7, 0) => self.castling.white_kingside = false,
                (0, 7) => self.castling.black_queenside = false,
                (7, 7) => self.castling.black_kingside = false,
                _ => {}
            }
        }
    }

    /// 计算当前局面的规范哈希键
    ///
    /// 覆盖棋子布局、走子方、易位权利、过路兵列；计数器不参与。
    pub fn position_key(&self) -> u64 {
        ZobristTable::global().hash(self)
    }

    /// 将当前局面键追加到历史（仅在提交走法时调用，搜索分支不得调用）
    pub fn record_position(&mut self) {
        let key = self.position_key();
        self.position_history.push(key);
    }

    /// 五十回合规则判和
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_HALFMOVES
    }

    /// 三次重复局面判和
    pub fn is_threefold_repetition(&self) -> bool {
        let key = self.position_key();
        self.position_history.iter().filter(|&&k| k == key).count() >= REPETITION_LIMIT
    }

    /// 子力不足判和
    ///
    /// 无兵/车/后且轻子不超过一个；恰好两马；恰好两个同色格象。
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors: Vec<(PieceKind, u8)> = Vec::new();

        for (sq, piece) in self.board.all_pieces() {
            match piece.kind {
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
                PieceKind::Knight | PieceKind::Bishop => {
                    minors.push((piece.kind, (sq.file + sq.rank) % 2));
                }
                PieceKind::King => {}
            }
        }

        match minors.len() {
            0 | 1 => true,
            2 => {
                let both_knights = minors.iter().all(|(kind, _)| *kind == PieceKind::Knight);
                let same_color_bishops = minors.iter().all(|(kind, _)| *kind == PieceKind::Bishop)
                    && minors[0].1 == minors[1].1;
                both_knights || same_color_bishops
            }
            _ => false,
        }
    }

    /// 对局是否结束（将死、逼和或任一和棋条件）
    pub fn is_game_over(&self) -> bool {
        MoveGenerator::generate_legal(self).is_empty()
            || self.is_fifty_move_draw()
            || self.is_threefold_repetition()
            || self.is_insufficient_material()
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::initial()
    }
}
