//! 路径路由 - 业务能力层
//!
//! 负责把片段加载到动态内容区和部门弹窗里：
//! 1. 同步写入加载占位
//! 2. 获取片段（唯一的网络挂起点）
//! 3. 淡入延迟后注入片段，或展示错误面板
//!
//! 错误只写入日志，不向调用方返回。

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::config::{Config, StalePolicy};
use crate::error::FragmentError;
use crate::infrastructure::{FragmentKey, FragmentSource, Page, Region};
use crate::models::Category;
use crate::utils::logging::truncate_text;
use crate::view::{ErrorView, Fragment, LoadingView, View};

/// 加载路径时的占位文字
pub const PATH_LOADING_MESSAGE: &str = "Loading your path...";

/// 路由设置
#[derive(Debug, Clone)]
pub struct RouterSettings {
    pub fade_delay: Duration,
    pub contact_email: String,
    pub stale_policy: StalePolicy,
    pub department_error_view: bool,
}

impl RouterSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            fade_delay: config.fade_delay(),
            contact_email: config.contact_email.clone(),
            stale_policy: config.stale_policy,
            department_error_view: config.department_error_view,
        }
    }
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// 路径路由
///
/// 克隆开销很小（内部都是共享句柄），可以随任务一起移动。
#[derive(Clone)]
pub struct PathRouter {
    page: Page,
    source: Arc<dyn FragmentSource>,
    settings: RouterSettings,
}

impl PathRouter {
    pub fn new(page: Page, source: Arc<dyn FragmentSource>, settings: RouterSettings) -> Self {
        Self {
            page,
            source,
            settings,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 选择路径：隐藏问卷，显示并滚动到动态内容区，然后加载片段
    pub async fn select_path(&self, category: Category) {
        info!("🧭 选择路径: {}", category.display_name());

        self.page.hide(Region::Quiz);
        self.page.show(Region::DynamicContent);
        self.page.scroll_into_view(Region::DynamicContent);

        self.load_path_fragment(category).await;
    }

    /// 在后台执行 `select_path`
    pub fn spawn_select_path(&self, category: Category) -> JoinHandle<()> {
        let router = self.clone();
        tokio::spawn(async move { router.select_path(category).await })
    }

    /// 加载路径片段到动态内容区
    pub async fn load_path_fragment(&self, category: Category) {
        let region = Region::DynamicContent;
        let token = self.page.begin_load(region);

        self.page
            .set_view(region, View::Loading(LoadingView::new(PATH_LOADING_MESSAGE)));

        let key = FragmentKey::path(category);
        match self.source.fetch(&key).await {
            Ok(markup) => {
                debug!(
                    "片段已获取 ({}): {}",
                    key.resource(),
                    truncate_text(&markup, 60)
                );
                if !self.settings.fade_delay.is_zero() {
                    sleep(self.settings.fade_delay).await;
                }
                if self.commit(region, token, View::Fragment(Fragment::new(markup)), true) {
                    info!("✓ 路径片段已加载: {}", key.resource());
                }
            }
            Err(e) => {
                error!("❌ 加载路径片段失败: {}", e);
                self.commit(region, token, self.error_view(), false);
            }
        }
    }

    /// 打开部门详情弹窗
    pub async fn explore_department(&self, name: &str) {
        info!("🏢 查看部门: {}", name);
        self.page.show(Region::DepartmentModal);
        self.load_department_detail(name).await;
    }

    /// 加载部门详情到弹窗的内容插槽
    ///
    /// 失败时默认只记录日志，弹窗保持原有内容。
    pub async fn load_department_detail(&self, name: &str) {
        let region = Region::DepartmentModal;
        let token = self.page.begin_load(region);

        let key = match FragmentKey::department(name) {
            Ok(key) => key,
            Err(e) => {
                self.department_failed(token, e);
                return;
            }
        };

        match self.source.fetch(&key).await {
            Ok(markup) => {
                if self.commit(region, token, View::Fragment(Fragment::new(markup)), false) {
                    info!("✓ 部门详情已加载: {}", key.resource());
                }
            }
            Err(e) => self.department_failed(token, e),
        }
    }

    fn department_failed(&self, token: u64, err: FragmentError) {
        error!("❌ 加载部门详情失败: {}", err);
        if self.settings.department_error_view {
            self.commit(Region::DepartmentModal, token, self.error_view(), false);
        }
    }

    fn error_view(&self) -> View {
        View::Error(ErrorView::contact(self.settings.contact_email.clone()))
    }

    /// 按策略写入区域，返回是否写入
    fn commit(&self, region: Region, token: u64, view: View, fade_in: bool) -> bool {
        let guard = match self.settings.stale_policy {
            StalePolicy::LatestRequest => Some(token),
            StalePolicy::LastResolved => None,
        };
        let written = self.page.commit(region, guard, view, fade_in);
        if !written {
            debug!("丢弃过期的加载结果: #{} (令牌 {})", region.id(), token);
        }
        written
    }
}
