//! 搜索引擎
//!
//! 实现 Minimax + Alpha-Beta 剪枝与主变跟踪

use chess_core::{BoardState, Color, Move, MoveGenerator};
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::evaluate::{Evaluator, MATE_SCORE};

/// 搜索引擎
///
/// 同步、深度优先、递归；一次搜索阻塞调用方直到完成。
/// 搜索只在克隆局面上展开，绝不触碰调用方的活动局面。
pub struct SearchEngine {
    evaluator: Evaluator,
    nodes_searched: u64,
}

impl SearchEngine {
    /// 创建新的搜索引擎
    pub fn new(evaluator: Evaluator) -> Self {
        Self {
            evaluator,
            nodes_searched: 0,
        }
    }

    /// 使用默认权重创建
    pub fn with_default_evaluator() -> Self {
        Self::new(Evaluator::default())
    }

    /// 获取评估器
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// 获取上次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// 搜索最佳走法
    ///
    /// 先做一层杀棋扫描：若某个根走法让对方被将军且无应着，立即返回，
    /// 不再深入搜索。否则对每个根走法做 depth-1 的 minimax，
    /// 按根走子方视角取极值（白方取最大，黑方取最小）。
    pub fn find_best_move(&mut self, state: &BoardState, depth: u8) -> Option<Move> {
        self.nodes_searched = 0;

        let moves = MoveGenerator::generate_legal(state);
        if moves.is_empty() {
            return None;
        }

        // 一步杀扫描
        for mv in &moves {
            let mut next = state.clone();
            next.apply_move(mv);
            if MoveGenerator::is_checkmate(&next) {
                debug!("发现一步杀: {}", mv);
                return Some(*mv);
            }
        }

        let maximizing = state.side_to_move == Color::White;
        let mut best: Option<(i32, Move)> = None;

        for mv in &moves {
            let mut next = state.clone();
            next.apply_move(mv);

            let (score, _) = self.minimax(
                &next,
                depth.saturating_sub(1),
                i32::MIN + 1,
                i32::MAX - 1,
                !maximizing,
            );

            let better = match best {
                None => true,
                Some((best_score, _)) => {
                    if maximizing {
                        score > best_score
                    } else {
                        score < best_score
                    }
                }
            };
            if better {
                best = Some((score, *mv));
            }
        }

        debug!(
            "搜索完成: depth={}, nodes={}",
            depth, self.nodes_searched
        );

        match best {
            Some((_, mv)) => Some(mv),
            None => {
                // 防御性回退：存在合法走法时首个走法必然入选，正常不可达
                warn!("未能选出最佳走法，回退为随机合法走法");
                moves.choose(&mut rand::thread_rng()).copied()
            }
        }
    }

    /// Minimax + Alpha-Beta 搜索，返回 (分值, 主变)
    ///
    /// 深度为 0 时返回静态评估。无合法走法时：被将军返回对被将死方
    /// 不利的决定性分值（剩余深度越大越极端，偏好更快的杀棋），
    /// 否则为逼和返回 0。
    pub fn minimax(
        &mut self,
        state: &BoardState,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> (i32, Vec<Move>) {
        self.nodes_searched += 1;

        if depth == 0 {
            return (self.evaluator.evaluate(state).total, Vec::new());
        }

        let moves = MoveGenerator::generate_legal(state);
        if moves.is_empty() {
            if MoveGenerator::is_in_check(&state.board, state.side_to_move) {
                let magnitude = MATE_SCORE + depth as i32;
                let score = match state.side_to_move {
                    Color::White => -magnitude,
                    Color::Black => magnitude,
                };
                return (score, Vec::new());
            }
            return (0, Vec::new());
        }

        let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
        let mut best_line = Vec::new();

        for mv in moves {
            let mut next = state.clone();
            next.apply_move(&mv);

            let (score, continuation) = self.minimax(&next, depth - 1, alpha, beta, !maximizing);

            let better = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if better {
                best_score = score;
                best_line = Vec::with_capacity(continuation.len() + 1);
                best_line.push(mv);
                best_line.extend(continuation);
            }

            if maximizing {
                alpha = alpha.max(best_score);
            } else {
                beta = beta.min(best_score);
            }
            if alpha >= beta {
                break; // 剪枝
            }
        }

        (best_score, best_line)
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::with_default_evaluator()
    }
}
