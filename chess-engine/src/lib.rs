//! 国际象棋 AI 引擎
//!
//! 包含:
//! - 棋局评估函数（可配置的命名权重）
//! - Minimax + Alpha-Beta 搜索与主变跟踪
//! - 对局会话（引擎对外的公共接口）

mod evaluate;
mod search;
mod session;

pub use evaluate::{
    Evaluation, Evaluator, Genome, FEATURE_MATERIAL, FEATURE_POSITIONAL, MATE_SCORE,
};
pub use search::SearchEngine;
pub use session::GameSession;
