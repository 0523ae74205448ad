//! FEN 格式解析和生成
//!
//! 标准六字段 FEN：
//! `<棋盘> <走子方> <易位权利> <过路兵目标> <半回合计数> <回合数>`
//!
//! 示例：
//! `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1`

use crate::board::{Board, BoardState, CastlingRights};
use crate::constants::BOARD_SIZE;
use crate::error::ChessError;
use crate::piece::{Color, Piece, Square};

/// 初始局面 FEN
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// FEN 格式处理
pub struct Fen;

impl Fen {
    /// 解析 FEN 字符串为局面状态
    pub fn parse(fen: &str) -> Result<BoardState, ChessError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(ChessError::InvalidFen {
                reason: format!("Expected 6 fields, got {}", parts.len()),
            });
        }

        let board = Self::parse_board(parts[0])?;

        let side_to_move = match Color::from_fen_char(parts[1].chars().next().unwrap_or(' ')) {
            Some(color) if parts[1].len() == 1 => color,
            _ => {
                return Err(ChessError::InvalidFen {
                    reason: format!("Invalid active color: {}", parts[1]),
                })
            }
        };

        let castling = Self::parse_castling(parts[2]);
        let en_passant = Self::parse_en_passant(parts[3])?;

        // 半回合与回合数无法解析时回退到默认值，不报错
        let halfmove_clock = parts[4].parse().unwrap_or(0);
        let fullmove_number = parts[5].parse().unwrap_or(1);

        Ok(BoardState {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            position_history: Vec::new(),
        })
    }

    /// 解析棋盘部分
    fn parse_board(board_str: &str) -> Result<Board, ChessError> {
        let mut board = Board::empty();
        let rows: Vec<&str> = board_str.split('/').collect();

        if rows.len() != BOARD_SIZE {
            return Err(ChessError::InvalidFen {
                reason: format!("Expected 8 ranks, got {}", rows.len()),
            });
        }

        // FEN 从上到下是 rank=7 到 rank=0
        for (row_idx, row) in rows.iter().enumerate() {
            let rank = (BOARD_SIZE - 1 - row_idx) as u8;
            let mut file = 0u8;

            for c in row.chars() {
                if file >= BOARD_SIZE as u8 {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Rank {} has too many squares", row_idx),
                    });
                }

                if c.is_ascii_digit() {
                    // 连续空格数量
                    let empty_count = c.to_digit(10).unwrap() as u8;
                    file += empty_count;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    board.set(Square::new_unchecked(file, rank), Some(piece));
                    file += 1;
                } else {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Invalid piece character: {}", c),
                    });
                }
            }

            if file != BOARD_SIZE as u8 {
                return Err(ChessError::InvalidFen {
                    reason: format!("Rank {} has {} squares, expected 8", row_idx, file),
                });
            }
        }

        Ok(board)
    }

    /// 解析易位权利字段（"-" 或 "KQkq" 的任意子集）
    fn parse_castling(text: &str) -> CastlingRights {
        let mut rights = CastlingRights::none();
        for c in text.chars() {
            match c {
                'K' => rights.white_kingside = true,
                'Q' => rights.white_queenside = true,
                'k' => rights.black_kingside = true,
                'q' => rights.black_queenside = true,
                _ => {}
            }
        }
        rights
    }

    /// 解析过路兵目标字段
    fn parse_en_passant(text: &str) -> Result<Option<Square>, ChessError> {
        if text == "-" {
            return Ok(None);
        }
        match Square::from_algebraic(text) {
            Some(sq) => Ok(Some(sq)),
            None => Err(ChessError::InvalidFen {
                reason: format!("Invalid en passant square: {}", text),
            }),
        }
    }

    /// 将局面状态转换为 FEN 字符串
    pub fn to_string(state: &BoardState) -> String {
        format!(
            "{} {} {} {} {} {}",
            Self::board_to_string(&state.board),
            state.side_to_move.to_fen_char(),
            Self::castling_to_string(state.castling),
            match state.en_passant {
                Some(sq) => sq.to_string(),
                None => "-".to_string(),
            },
            state.halfmove_clock,
            state.fullmove_number
        )
    }

    /// 将棋盘转换为 FEN 棋盘部分
    pub fn board_to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(BOARD_SIZE);

        // 从 rank=7 到 rank=0
        for rank in (0..BOARD_SIZE as u8).rev() {
            let mut row = String::new();
            let mut empty_count = 0;

            for file in 0..BOARD_SIZE as u8 {
                if let Some(piece) = board.get(Square::new_unchecked(file, rank)) {
                    if empty_count > 0 {
                        row.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    row.push(piece.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                row.push_str(&empty_count.to_string());
            }

            rows.push(row);
        }

        rows.join("/")
    }

    /// 易位权利字段
    fn castling_to_string(rights: CastlingRights) -> String {
        let mut text = String::new();
        if rights.white_kingside {
            text.push('K');
        }
        if rights.white_queenside {
            text.push('Q');
        }
        if rights.black_kingside {
            text.push('k');
        }
        if rights.black_queenside {
            text.push('q');
        }
        if text.is_empty() {
            text.push('-');
        }
        text
    }

    /// 解析初始局面
    pub fn initial() -> BoardState {
        Self::parse(START_FEN).expect("Initial FEN should be valid")
    }
}
