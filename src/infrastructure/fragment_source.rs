//! 片段来源 - 基础设施层
//!
//! 只负责"按键取回一段标记"，不关心取回后写到哪里。

use std::path::PathBuf;
use std::sync::LazyLock;

use futures::future::BoxFuture;
use regex::Regex;
use tracing::debug;

use crate::error::FragmentError;
use crate::models::Category;

/// 部门名称只允许小写字母、数字和连字符
static DEPARTMENT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("部门名称正则"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Path,
    Department,
}

impl FragmentKind {
    fn prefix(self) -> &'static str {
        match self {
            FragmentKind::Path => "path",
            FragmentKind::Department => "dept",
        }
    }
}

/// 片段键，决定资源路径 `modules/<prefix>-<name>.html`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentKey {
    kind: FragmentKind,
    name: String,
}

impl FragmentKey {
    pub fn path(category: Category) -> Self {
        Self {
            kind: FragmentKind::Path,
            name: category.key().to_string(),
        }
    }

    pub fn department(name: &str) -> Result<Self, FragmentError> {
        if !DEPARTMENT_NAME.is_match(name) {
            return Err(FragmentError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(Self {
            kind: FragmentKind::Department,
            name: name.to_string(),
        })
    }

    /// 相对资源路径
    pub fn resource(&self) -> String {
        format!("modules/{}-{}.html", self.kind.prefix(), self.name)
    }
}

/// 片段来源
pub trait FragmentSource: Send + Sync {
    fn fetch<'a>(&'a self, key: &'a FragmentKey) -> BoxFuture<'a, Result<String, FragmentError>>;
}

/// 通过 HTTP GET 获取片段
#[derive(Debug, Clone)]
pub struct HttpFragmentSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFragmentSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn url_for(&self, key: &FragmentKey) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key.resource())
    }

    async fn get(&self, key: &FragmentKey) -> Result<String, FragmentError> {
        let url = self.url_for(key);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FragmentError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FragmentError::Status { url, status });
        }

        response
            .text()
            .await
            .map_err(|source| FragmentError::Body { url, source })
    }
}

impl FragmentSource for HttpFragmentSource {
    fn fetch<'a>(&'a self, key: &'a FragmentKey) -> BoxFuture<'a, Result<String, FragmentError>> {
        Box::pin(self.get(key))
    }
}

/// 从本地目录读取片段（`<root>/modules/...`）
#[derive(Debug, Clone)]
pub struct FileFragmentSource {
    root: PathBuf,
}

impl FileFragmentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn read(&self, key: &FragmentKey) -> Result<String, FragmentError> {
        let path = self.root.join(key.resource());
        debug!("读取片段文件: {}", path.display());

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| FragmentError::Io {
                path: path.display().to_string(),
                source,
            })
    }
}

impl FragmentSource for FileFragmentSource {
    fn fetch<'a>(&'a self, key: &'a FragmentKey) -> BoxFuture<'a, Result<String, FragmentError>> {
        Box::pin(self.read(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_paths() {
        assert_eq!(
            FragmentKey::path(Category::Market).resource(),
            "modules/path-market.html"
        );
        assert_eq!(
            FragmentKey::department("sales-ops").unwrap().resource(),
            "modules/dept-sales-ops.html"
        );
    }

    #[test]
    fn test_department_name_validation() {
        for bad in ["", "../secret", "Sales", "a/b", "-lead", "hr.html"] {
            assert!(FragmentKey::department(bad).is_err(), "{bad:?} 应该被拒绝");
        }
        assert!(FragmentKey::department("hr").is_ok());
    }

    #[test]
    fn test_http_url_joins_base() {
        let source = HttpFragmentSource::new("http://localhost:8000/");
        assert_eq!(
            source.url_for(&FragmentKey::path(Category::Prediction)),
            "http://localhost:8000/modules/path-prediction.html"
        );
    }

    #[tokio::test]
    async fn test_file_source_reads_and_reports_missing() {
        let root = std::env::temp_dir().join(format!("landing_quiz_fragments_{}", std::process::id()));
        tokio::fs::create_dir_all(root.join("modules")).await.unwrap();
        tokio::fs::write(root.join("modules/path-market.html"), "<p>market</p>")
            .await
            .unwrap();

        let source = FileFragmentSource::new(root.clone());
        let found = source.fetch(&FragmentKey::path(Category::Market)).await;
        let missing = source.fetch(&FragmentKey::path(Category::Competitors)).await;
        let _ = tokio::fs::remove_dir_all(&root).await;

        assert_eq!(found.unwrap(), "<p>market</p>");
        assert!(matches!(missing, Err(FragmentError::Io { .. })));
    }

    #[tokio::test]
    #[ignore] // 依赖本机网络环境，需要手动运行：cargo test -- --ignored
    async fn test_http_source_connection_refused() {
        let source = HttpFragmentSource::new("http://127.0.0.1:9");
        let result = source.fetch(&FragmentKey::path(Category::Market)).await;
        assert!(matches!(result, Err(FragmentError::Request { .. })));
    }
}
