//! 问卷引擎（流程层）
//!
//! - `QuizState` - 题目索引 + 各分类得分，纯函数状态转移
//! - `QuizEngine` - 持有状态并把结果渲染到问卷容器

pub mod engine;
pub mod state;

pub use engine::{QuizEngine, QuizPhase};
pub use state::{QuizEvent, QuizState, Scores, Step};
