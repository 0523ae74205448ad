//! 国际象棋规则库
//!
//! 包含:
//! - 棋子、格子、棋盘等核心数据结构
//! - 走法生成和合法性验证
//! - 走法执行与派生状态更新
//! - FEN 编解码
//! - 局面哈希与和棋判定

mod board;
mod constants;
mod error;
mod fen;
mod moves;
mod piece;
mod zobrist;

pub use board::{Board, BoardState, CastlingRights};
pub use constants::*;
pub use error::{ChessError, Result};
pub use fen::{Fen, START_FEN};
pub use moves::{CastleSide, Move, MoveGenerator};
pub use piece::{Color, Piece, PieceKind, Square};
pub use zobrist::ZobristTable;
