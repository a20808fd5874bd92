//! # Landing Quiz
//!
//! 营销落地页的线索筛选问卷和内容路由
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有页面状态，只暴露能力
//! - `Page` - 命名区域的显示/隐藏/内容写入
//! - `FragmentSource` - 按键获取片段（HTTP / 本地文件）
//!
//! ### ② 模型与视图（Models / View）
//! - `models/` - 分类、题目、题库（内置或 TOML 加载）
//! - `view/` - 结构化视图，输出时才转成转义后的标记
//!
//! ### ③ 流程层（Quiz）
//! - `QuizState` - 题目索引 + 分类得分，纯函数状态转移
//! - `QuizEngine` - 开始 / 作答 / 返回 / 结果 / 重置
//!
//! ### ④ 路由与编排（Router / App）
//! - `PathRouter` - 路径片段和部门详情的异步加载
//! - `App` - 终端交互循环
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod quiz;
pub mod router;
pub mod utils;
pub mod view;

// 重新导出常用类型
pub use app::{App, Command};
pub use config::{Config, StalePolicy};
pub use error::{AppError, AppResult, FragmentError, QuizError};
pub use infrastructure::{FragmentSource, Page, Region};
pub use models::{Category, Question, QuestionBank, QuizOption};
pub use quiz::{QuizEngine, QuizPhase, QuizState};
pub use router::{PathRouter, RouterSettings};
pub use view::View;
