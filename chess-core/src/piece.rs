//! 棋子定义

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, SQUARE_COUNT};

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// 兵
    Pawn,
    /// 马
    Knight,
    /// 象
    Bishop,
    /// 车
    Rook,
    /// 后
    Queen,
    /// 王
    King,
}

impl PieceKind {
    /// 获取棋子的基础分值（厘兵单位，用于 AI 评估）
    pub fn value(&self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }

    /// 获取 FEN 字符（白方大写，黑方小写）
    pub fn to_fen_char(&self, color: Color) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<(PieceKind, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, color))
    }
}

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// 白方（先手）
    White,
    /// 黑方（后手）
    Black,
}

impl Color {
    /// 获取对方阵营
    pub fn opponent(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }
}

/// 棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    /// 创建新棋子
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        self.kind.to_fen_char(self.color)
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Piece> {
        PieceKind::from_fen_char(c).map(|(kind, color)| Piece { kind, color })
    }

    /// 获取棋子分值
    pub fn value(&self) -> i32 {
        self.kind.value()
    }
}

/// 棋盘格子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    /// 列 (0-7，对应 a-h)
    pub file: u8,
    /// 行 (0-7，对应 1-8)
    pub rank: u8,
}

impl Square {
    /// 创建新格子
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if (file as usize) < BOARD_SIZE && (rank as usize) < BOARD_SIZE {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    /// 创建新格子（不检查边界，内部使用）
    pub const fn new_unchecked(file: u8, rank: u8) -> Self {
        Self { file, rank }
    }

    /// 检查格子是否在棋盘内
    pub fn is_valid(&self) -> bool {
        (self.file as usize) < BOARD_SIZE && (self.rank as usize) < BOARD_SIZE
    }

    /// 获取偏移后的格子
    pub fn offset(&self, df: i8, dr: i8) -> Option<Square> {
        let new_file = self.file as i8 + df;
        let new_rank = self.rank as i8 + dr;
        if new_file >= 0
            && (new_file as usize) < BOARD_SIZE
            && new_rank >= 0
            && (new_rank as usize) < BOARD_SIZE
        {
            Some(Square {
                file: new_file as u8,
                rank: new_rank as u8,
            })
        } else {
            None
        }
    }

    /// 转换为数组索引
    pub fn to_index(&self) -> usize {
        self.rank as usize * BOARD_SIZE + self.file as usize
    }

    /// 从数组索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < SQUARE_COUNT {
            Some(Square {
                file: (index % BOARD_SIZE) as u8,
                rank: (index / BOARD_SIZE) as u8,
            })
        } else {
            None
        }
    }

    /// 从代数坐标解析（如 "e4"）
    pub fn from_algebraic(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Square::new(file, rank)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file) as char,
            (b'1' + self.rank) as char
        )
    }
}
