//! 错误类型定义

use thiserror::Error;

use crate::piece::Square;

/// 国际象棋规则错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChessError {
    /// 无效的 FEN 字符串
    #[error("Invalid FEN string: {reason}")]
    InvalidFen { reason: String },

    /// 走法不在当前合法走法集合中
    #[error("Illegal move: {from} -> {to}")]
    IllegalMove { from: Square, to: Square },

    /// 无效的格子坐标
    #[error("Invalid square: {text}")]
    InvalidSquare { text: String },
}

/// 规则库结果类型
pub type Result<T> = std::result::Result<T, ChessError>;
