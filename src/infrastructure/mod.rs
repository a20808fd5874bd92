//! 基础设施层
//!
//! - `Page` - 唯一的页面状态持有者，提供区域显示/隐藏/写入能力
//! - `FragmentSource` - 按键取回片段的能力（HTTP / 本地文件）

pub mod fragment_source;
pub mod page;

pub use fragment_source::{
    FileFragmentSource, FragmentKey, FragmentKind, FragmentSource, HttpFragmentSource,
};
pub use page::{Page, Region};
