//! 棋局评估函数

use std::collections::HashMap;

use chess_core::{BoardState, Color, MoveGenerator, PieceKind};
use serde::{Deserialize, Serialize};

/// 决定性分值（将死/缺王）
///
/// 评估器、搜索叶节点和一步杀扫描共用同一常量，
/// 搜索中按剩余深度微调以偏好更快的杀棋。
pub const MATE_SCORE: i32 = 100_000;

/// 子力特征名
pub const FEATURE_MATERIAL: &str = "material";
/// 局面特征名
pub const FEATURE_POSITIONAL: &str = "positional";

/// 兵每前进一行的加成（厘兵）
const PAWN_ADVANCE_BONUS: i32 = 10;

/// 评估权重集合
///
/// 特征名到系数的显式映射。评估器只遍历固定已知的特征集合，
/// 配置中出现的未知名称不会被引用；未配置的特征系数默认为 1.0。
/// 新增评分特征时只需登记特征名并在评估器中补一项计算，
/// 评估接口保持不变。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genome {
    weights: HashMap<String, f64>,
}

impl Genome {
    /// 创建空权重集（所有特征使用默认系数 1.0）
    pub fn new() -> Self {
        Self {
            weights: HashMap::new(),
        }
    }

    /// 从 JSON 文本加载（如 `{"material": 1.0, "positional": 2.5}`）
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// 设置特征系数
    pub fn set(&mut self, name: &str, coefficient: f64) {
        self.weights.insert(name.to_string(), coefficient);
    }

    /// 获取特征系数
    pub fn weight(&self, name: &str) -> f64 {
        self.weights.get(name).copied().unwrap_or(1.0)
    }
}

impl Default for Genome {
    fn default() -> Self {
        Self::new()
    }
}

/// 评估明细（厘兵单位，正值对白方有利）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// 子力小计
    pub material: i32,
    /// 局面小计
    pub positional: i32,
    /// 加权总分
    pub total: i32,
}

/// 评估器
pub struct Evaluator {
    genome: Genome,
}

impl Evaluator {
    /// 创建新评估器
    pub fn new(genome: Genome) -> Self {
        Self { genome }
    }

    /// 获取权重集合
    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    /// 评估局面（白方视角）
    ///
    /// 终局判定优先：缺王、将死、逼和直接短路返回。
    pub fn evaluate(&self, state: &BoardState) -> Evaluation {
        if let Some(total) = Self::terminal_score(state) {
            return Evaluation {
                material: 0,
                positional: 0,
                total,
            };
        }

        let material = Self::material(state);
        let positional = Self::positional(state);
        let total = (material as f64 * self.genome.weight(FEATURE_MATERIAL)
            + positional as f64 * self.genome.weight(FEATURE_POSITIONAL))
            as i32;

        Evaluation {
            material,
            positional,
            total,
        }
    }

    /// 终局短路分值
    fn terminal_score(state: &BoardState) -> Option<i32> {
        if state.board.find_king(Color::White).is_none() {
            return Some(-MATE_SCORE);
        }
        if state.board.find_king(Color::Black).is_none() {
            return Some(MATE_SCORE);
        }

        if MoveGenerator::generate_legal(state).is_empty() {
            if MoveGenerator::is_in_check(&state.board, state.side_to_move) {
                // 走子方被将死
                return Some(match state.side_to_move {
                    Color::White => -MATE_SCORE,
                    Color::Black => MATE_SCORE,
                });
            }
            // 逼和
            return Some(0);
        }

        None
    }

    /// 子力小计：带符号的棋子分值之和
    fn material(state: &BoardState) -> i32 {
        let mut score = 0;
        for (_, piece) in state.board.all_pieces() {
            match piece.color {
                Color::White => score += piece.value(),
                Color::Black => score -= piece.value(),
            }
        }
        score
    }

    /// 局面小计：兵的推进加成
    ///
    /// 每个兵按离开起始行的行数获得加成，按颜色取符号。
    fn positional(state: &BoardState) -> i32 {
        let mut score = 0;
        for (sq, piece) in state.board.all_pieces() {
            if piece.kind != PieceKind::Pawn {
                continue;
            }
            match piece.color {
                Color::White => {
                    score += (sq.rank as i32 - 1) * PAWN_ADVANCE_BONUS;
                }
                Color::Black => {
                    score -= (6 - sq.rank as i32) * PAWN_ADVANCE_BONUS;
                }
            }
        }
        score
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(Genome::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Fen;

    #[test]
    fn test_initial_evaluation_balanced() {
        let state = BoardState::initial();
        let eval = Evaluator::default().evaluate(&state);

        assert_eq!(eval.material, 0);
        assert_eq!(eval.positional, 0);
        assert_eq!(eval.total, 0);
    }

    #[test]
    fn test_material_advantage() {
        // 黑方缺一个车
        let fen = "1nbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQk - 0 1";
        let state = Fen::parse(fen).unwrap();
        let eval = Evaluator::default().evaluate(&state);

        assert_eq!(eval.material, 500);
        assert!(eval.total >= 500);
    }

    #[test]
    fn test_pawn_advance_bonus() {
        // e4 兵推进了两行
        let fen = "4k3/8/8/8/4P3/8/8/4K3 w - - 0 1";
        let state = Fen::parse(fen).unwrap();
        let eval = Evaluator::default().evaluate(&state);
        assert_eq!(eval.positional, 20);

        // 黑兵 e5 推进一行，符号相反
        let fen = "4k3/8/8/4p3/4P3/8/8/4K3 w - - 0 1";
        let state = Fen::parse(fen).unwrap();
        let eval = Evaluator::default().evaluate(&state);
        assert_eq!(eval.positional, 20 - 10);
    }

    #[test]
    fn test_checkmate_short_circuit() {
        // 黑方被后翼搭档将死
        let fen = "R5k1/5ppp/8/8/8/8/8/4K3 b - - 0 1";
        let state = Fen::parse(fen).unwrap();
        let eval = Evaluator::default().evaluate(&state);
        assert_eq!(eval.total, MATE_SCORE);

        // 白方被将死时符号相反
        let fen = "4k3/8/8/8/8/8/5PPP/r5K1 w - - 0 1";
        let state = Fen::parse(fen).unwrap();
        assert!(MoveGenerator::is_checkmate(&state));
        let eval = Evaluator::default().evaluate(&state);
        assert_eq!(eval.total, -MATE_SCORE);
    }

    #[test]
    fn test_stalemate_short_circuit() {
        let fen = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1";
        let state = Fen::parse(fen).unwrap();
        let eval = Evaluator::default().evaluate(&state);
        assert_eq!(eval.total, 0);
    }

    #[test]
    fn test_missing_king_short_circuit() {
        let fen = "8/8/8/8/8/8/8/4K3 w - - 0 1";
        let state = Fen::parse(fen).unwrap();
        let eval = Evaluator::default().evaluate(&state);
        assert_eq!(eval.total, MATE_SCORE);
    }

    #[test]
    fn test_genome_weight_scaling() {
        let fen = "4k3/8/8/8/4P3/8/8/4K3 w - - 0 1";
        let state = Fen::parse(fen).unwrap();

        let mut genome = Genome::new();
        genome.set(FEATURE_POSITIONAL, 3.0);
        genome.set(FEATURE_MATERIAL, 0.0);
        let eval = Evaluator::new(genome).evaluate(&state);

        assert_eq!(eval.material, 100);
        assert_eq!(eval.positional, 20);
        assert_eq!(eval.total, 60);
    }

    #[test]
    fn test_genome_unknown_feature_ignored() {
        let mut genome = Genome::new();
        genome.set("king_safety", 42.0);

        let state = BoardState::initial();
        let eval = Evaluator::new(genome).evaluate(&state);
        assert_eq!(eval.total, 0);
    }

    #[test]
    fn test_genome_from_json() {
        let genome = Genome::from_json(r#"{"material": 2.0, "positional": 0.5}"#).unwrap();
        assert_eq!(genome.weight(FEATURE_MATERIAL), 2.0);
        assert_eq!(genome.weight(FEATURE_POSITIONAL), 0.5);
        assert_eq!(genome.weight("unknown"), 1.0);

        assert!(Genome::from_json("not json").is_err());
    }
}
