//! 页面模型 - 基础设施层
//!
//! 持有页面上所有命名区域的可见性和内容，只暴露"显示/隐藏/写入"能力。
//! 锁只在同步方法内部持有，不会跨越 `.await`。

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::view::{LoadingView, View};

/// 页面上的命名区域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// 路径列表
    Paths,
    /// 问卷外层
    Quiz,
    /// 问卷内容容器
    QuizContainer,
    /// 动态内容区
    DynamicContent,
    /// 部门详情弹窗（内容即 `.modal-content` 插槽）
    DepartmentModal,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Paths,
        Region::Quiz,
        Region::QuizContainer,
        Region::DynamicContent,
        Region::DepartmentModal,
    ];

    /// 页面元素 id
    pub fn id(self) -> &'static str {
        match self {
            Region::Paths => "paths",
            Region::Quiz => "quiz",
            Region::QuizContainer => "quiz-container",
            Region::DynamicContent => "dynamic-content",
            Region::DepartmentModal => "department-modal",
        }
    }
}

#[derive(Debug, Clone, Default)]
struct RegionState {
    hidden: bool,
    fade_in: bool,
    view: View,
    /// 每次发起加载时递增
    generation: u64,
}

#[derive(Debug)]
struct PageInner {
    regions: HashMap<Region, RegionState>,
    scroll_target: Option<Region>,
}

impl Default for PageInner {
    fn default() -> Self {
        let regions = Region::ALL
            .into_iter()
            .map(|region| {
                let state = match region {
                    Region::Quiz | Region::DynamicContent => RegionState {
                        hidden: true,
                        ..Default::default()
                    },
                    Region::DepartmentModal => RegionState {
                        hidden: true,
                        view: View::Loading(LoadingView::new("Loading...")),
                        ..Default::default()
                    },
                    Region::Paths | Region::QuizContainer => RegionState::default(),
                };
                (region, state)
            })
            .collect();

        Self {
            regions,
            scroll_target: None,
        }
    }
}

impl PageInner {
    fn region(&mut self, region: Region) -> &mut RegionState {
        self.regions.entry(region).or_default()
    }
}

/// 无头页面
///
/// 克隆后共享同一份状态，问卷引擎和路由各持一份。
#[derive(Debug, Clone, Default)]
pub struct Page {
    inner: Arc<Mutex<PageInner>>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, PageInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn show(&self, region: Region) {
        self.lock().region(region).hidden = false;
    }

    pub fn hide(&self, region: Region) {
        self.lock().region(region).hidden = true;
    }

    pub fn is_hidden(&self, region: Region) -> bool {
        self.lock().region(region).hidden
    }

    /// 替换区域的全部内容
    pub fn set_view(&self, region: Region, view: View) {
        self.lock().region(region).view = view;
    }

    pub fn view(&self, region: Region) -> View {
        self.lock().region(region).view.clone()
    }

    pub fn is_fade_in(&self, region: Region) -> bool {
        self.lock().region(region).fade_in
    }

    pub fn scroll_into_view(&self, region: Region) {
        debug!("滚动到区域: #{}", region.id());
        self.lock().scroll_target = Some(region);
    }

    /// 最近一次滚动请求的目标区域
    pub fn scroll_target(&self) -> Option<Region> {
        self.lock().scroll_target
    }

    /// 为区域发起一次新的加载，返回本次加载的令牌
    ///
    /// 之前发出的令牌随之失效。
    pub fn begin_load(&self, region: Region) -> u64 {
        let mut inner = self.lock();
        let state = inner.region(region);
        state.generation += 1;
        state.generation
    }

    /// 写入加载结果
    ///
    /// `token` 为 `Some` 时仅在令牌仍有效时写入；返回是否写入。
    /// `fade_in` 只会打开淡入标记，不会清除已有标记。
    pub fn commit(&self, region: Region, token: Option<u64>, view: View, fade_in: bool) -> bool {
        let mut inner = self.lock();
        let state = inner.region(region);
        if let Some(token) = token {
            if state.generation != token {
                return false;
            }
        }
        state.view = view;
        if fade_in {
            state.fade_in = true;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Fragment;

    #[test]
    fn test_initial_visibility() {
        let page = Page::new();
        assert!(!page.is_hidden(Region::Paths));
        assert!(page.is_hidden(Region::Quiz));
        assert!(page.is_hidden(Region::DynamicContent));
        assert!(page.is_hidden(Region::DepartmentModal));
        assert_eq!(page.view(Region::QuizContainer), View::Empty);
    }

    #[test]
    fn test_clones_share_state() {
        let page = Page::new();
        let other = page.clone();
        other.show(Region::Quiz);
        assert!(!page.is_hidden(Region::Quiz));
    }

    #[test]
    fn test_stale_token_is_rejected() {
        let page = Page::new();
        let first = page.begin_load(Region::DynamicContent);
        let second = page.begin_load(Region::DynamicContent);

        let stale = View::Fragment(Fragment::new("old"));
        assert!(!page.commit(Region::DynamicContent, Some(first), stale, true));
        assert!(!page.is_fade_in(Region::DynamicContent));

        let fresh = View::Fragment(Fragment::new("new"));
        assert!(page.commit(Region::DynamicContent, Some(second), fresh.clone(), true));
        assert_eq!(page.view(Region::DynamicContent), fresh);
        assert!(page.is_fade_in(Region::DynamicContent));
    }

    #[test]
    fn test_untracked_commit_always_writes() {
        let page = Page::new();
        let first = page.begin_load(Region::DynamicContent);
        page.begin_load(Region::DynamicContent);
        assert!(page.commit(Region::DynamicContent, None, View::Empty, false));
        assert!(!page.commit(Region::DynamicContent, Some(first), View::Empty, false));
    }
}
