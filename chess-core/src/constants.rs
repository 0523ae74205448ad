//! 规则常量定义

/// 棋盘边长（行数与列数相同）
pub const BOARD_SIZE: usize = 8;

/// 棋盘总格数
pub const SQUARE_COUNT: usize = 64;

/// 五十回合规则的半回合阈值
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// 重复局面判和所需的出现次数
pub const REPETITION_LIMIT: usize = 3;
