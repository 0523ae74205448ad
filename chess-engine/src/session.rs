//! 对局会话
//!
//! 一个会话拥有唯一的活动局面及其历史，是引擎对外的公共接口。
//! 多个会话彼此完全隔离，可各自放在独立的执行单元中并发运行；
//! 会话自身不做任何同步，并发修改同一会话需要调用方自行加锁。

use chess_core::{BoardState, ChessError, Fen, Move, MoveGenerator, PieceKind, Result, Square};
use tracing::info;

use crate::evaluate::{Evaluation, Evaluator, Genome};
use crate::search::SearchEngine;

/// 对局会话
pub struct GameSession {
    state: BoardState,
    engine: SearchEngine,
}

impl GameSession {
    /// 从标准初始局面创建会话
    pub fn new() -> Self {
        let mut state = Fen::initial();
        state.record_position();
        Self {
            state,
            engine: SearchEngine::default(),
        }
    }

    /// 从 FEN 创建会话
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut state = Fen::parse(fen)?;
        state.record_position();
        Ok(Self {
            state,
            engine: SearchEngine::default(),
        })
    }

    /// 替换评估权重集合
    pub fn with_genome(mut self, genome: Genome) -> Self {
        self.engine = SearchEngine::new(Evaluator::new(genome));
        self
    }

    /// 获取当前局面状态
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// 当前局面的 FEN 编码
    pub fn fen(&self) -> String {
        Fen::to_string(&self.state)
    }

    /// 当前走子方的所有合法走法
    pub fn legal_moves(&self) -> Vec<Move> {
        MoveGenerator::generate_legal(&self.state)
    }

    /// 提交走法并追加局面历史
    ///
    /// 防御性校验：走法必须出自当前合法走法集合，
    /// 否则返回 `ChessError::IllegalMove`，局面保持不变。
    pub fn make_move(&mut self, mv: Move) -> Result<Move> {
        if !self.legal_moves().contains(&mv) {
            return Err(ChessError::IllegalMove {
                from: mv.from,
                to: mv.to,
            });
        }

        self.state.apply_move(&mv);
        self.state.record_position();
        info!("走法提交: {}", mv);
        Ok(mv)
    }

    /// 按坐标记法提交走法（如 "e2e4"，升变追加类型字符 "a7a8q"）
    pub fn make_coordinate_move(&mut self, text: &str) -> Result<Move> {
        if !text.is_ascii() || text.len() < 4 || text.len() > 5 {
            return Err(ChessError::InvalidSquare {
                text: text.to_string(),
            });
        }

        let from = Self::parse_square(&text[0..2])?;
        let to = Self::parse_square(&text[2..4])?;
        let promotion = match text.chars().nth(4) {
            None => None,
            Some(c) => match PieceKind::from_fen_char(c) {
                Some((kind, _)) => Some(kind),
                None => return Err(ChessError::IllegalMove { from, to }),
            },
        };

        let mv = self
            .legal_moves()
            .into_iter()
            .find(|mv| mv.from == from && mv.to == to && mv.promotion == promotion)
            .ok_or(ChessError::IllegalMove { from, to })?;
        self.make_move(mv)
    }

    fn parse_square(text: &str) -> Result<Square> {
        Square::from_algebraic(text).ok_or_else(|| ChessError::InvalidSquare {
            text: text.to_string(),
        })
    }

    /// 搜索最佳走法（depth 为正的搜索层数）
    pub fn find_best_move(&mut self, depth: u8) -> Option<Move> {
        self.engine.find_best_move(&self.state, depth)
    }

    /// 评估当前局面，返回结构化明细
    pub fn evaluate(&self) -> Evaluation {
        self.engine.evaluator().evaluate(&self.state)
    }

    /// 五十回合规则判和
    pub fn is_fifty_move_draw(&self) -> bool {
        self.state.is_fifty_move_draw()
    }

    /// 三次重复局面判和
    pub fn is_threefold_repetition(&self) -> bool {
        self.state.is_threefold_repetition()
    }

    /// 子力不足判和
    pub fn is_insufficient_material(&self) -> bool {
        self.state.is_insufficient_material()
    }

    /// 当前走子方是否被将死
    pub fn is_checkmate(&self) -> bool {
        MoveGenerator::is_checkmate(&self.state)
    }

    /// 是否逼和
    pub fn is_stalemate(&self) -> bool {
        MoveGenerator::is_stalemate(&self.state)
    }

    /// 对局是否结束
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
