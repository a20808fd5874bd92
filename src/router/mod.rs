//! 路径路由
//!
//! 依赖问卷结果（或用户直接选择的分类），把对应片段加载到页面区域。

pub mod path_router;

pub use path_router::{PathRouter, RouterSettings, PATH_LOADING_MESSAGE};
