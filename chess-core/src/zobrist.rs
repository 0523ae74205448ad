//! Zobrist 哈希
//!
//! 用于计算局面的规范哈希键，支持重复局面判定。
//! 键覆盖棋子布局、走子方、易位权利和过路兵列；计数器不参与，
//! 因此只差计数器的两个局面视为同一局面。

use once_cell::sync::Lazy;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::board::BoardState;
use crate::constants::SQUARE_COUNT;
use crate::piece::{Color, PieceKind, Square};

/// 进程级共享表，固定种子保证跨会话确定性
static TABLE: Lazy<ZobristTable> = Lazy::new(ZobristTable::new);

/// Zobrist 哈希表
///
/// 使用随机数为每个格子的每种棋子生成唯一的哈希值
pub struct ZobristTable {
    /// 棋子哈希值 [color][kind][square]
    pieces: [[[u64; SQUARE_COUNT]; 6]; 2],
    /// 走子方哈希值（黑方走子时异或）
    side_to_move: u64,
    /// 四项易位权利哈希值 [白王翼, 白后翼, 黑王翼, 黑后翼]
    castling: [u64; 4],
    /// 过路兵目标列哈希值
    en_passant_file: [u64; 8],
}

impl ZobristTable {
    /// 创建新的 Zobrist 表（使用固定种子保证确定性）
    pub fn new() -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(0xC0DE_FACE_2024_0817);

        let mut pieces = [[[0u64; SQUARE_COUNT]; 6]; 2];
        for color in 0..2 {
            for kind in 0..6 {
                for sq in 0..SQUARE_COUNT {
                    pieces[color][kind][sq] = rng.gen();
                }
            }
        }

        let side_to_move = rng.gen();

        let mut castling = [0u64; 4];
        for slot in castling.iter_mut() {
            *slot = rng.gen();
        }

        let mut en_passant_file = [0u64; 8];
        for slot in en_passant_file.iter_mut() {
            *slot = rng.gen();
        }

        Self {
            pieces,
            side_to_move,
            castling,
            en_passant_file,
        }
    }

    /// 获取进程级共享表
    pub fn global() -> &'static ZobristTable {
        &TABLE
    }

    /// 计算局面的完整哈希键
    pub fn hash(&self, state: &BoardState) -> u64 {
        let mut hash = 0u64;

        for (sq, piece) in state.board.all_pieces() {
            hash ^= self.piece_hash(piece.color, piece.kind, sq);
        }

        if state.side_to_move == Color::Black {
            hash ^= self.side_to_move;
        }

        if state.castling.white_kingside {
            hash ^= self.castling[0];
        }
        if state.castling.white_queenside {
            hash ^= self.castling[1];
        }
        if state.castling.black_kingside {
            hash ^= self.castling[2];
        }
        if state.castling.black_queenside {
            hash ^= self.castling[3];
        }

        if let Some(ep) = state.en_passant {
            hash ^= self.en_passant_file[ep.file as usize];
        }

        hash
    }

    /// 获取棋子的哈希值
    #[inline]
    pub fn piece_hash(&self, color: Color, kind: PieceKind, sq: Square) -> u64 {
        let color_idx = match color {
            Color::White => 0,
            Color::Black => 1,
        };
        self.pieces[color_idx][kind_to_index(kind)][sq.to_index()]
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}

/// 将棋子类型转换为索引
#[inline]
fn kind_to_index(kind: PieceKind) -> usize {
    match kind {
        PieceKind::Pawn => 0,
        PieceKind::Knight => 1,
        PieceKind::Bishop => 2,
        PieceKind::Rook => 3,
        PieceKind::Queen => 4,
        PieceKind::King => 5,
    }
}
