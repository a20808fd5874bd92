use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::error::ConfigError;

/// 同一区域内多个加载请求并发时的写入策略
///
/// 默认是 `LatestRequest`：先选 market 再选 competitors 时，即使 market 的响应
/// 最后才返回，最终显示的也是 competitors。需要"最后返回的响应获胜"时
/// 设置 `LANDING_STALE_POLICY=last-resolved`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// 只有最新发起的请求可以写入区域，过期的响应被丢弃
    #[default]
    LatestRequest,
    /// 谁最后返回谁写入（不做任何过期判断）
    LastResolved,
}

impl FromStr for StalePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest" | "latest-request" => Ok(StalePolicy::LatestRequest),
            "last-resolved" | "race" => Ok(StalePolicy::LastResolved),
            other => Err(ConfigError::EnvVarParseFailed {
                var_name: "LANDING_STALE_POLICY".to_string(),
                value: other.to_string(),
                expected_type: "latest | last-resolved".to_string(),
            }),
        }
    }
}

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 片段服务的根地址
    pub base_url: String,
    /// 本地片段目录（设置后不再走 HTTP）
    pub fragment_root: Option<String>,
    /// 自定义题库 TOML 文件
    pub quiz_file: Option<String>,
    /// 片段注入前的淡入延迟（毫秒）
    pub fade_delay_ms: u64,
    /// 出错时展示的联系邮箱
    pub contact_email: String,
    pub stale_policy: StalePolicy,
    /// 部门详情加载失败时是否在弹窗中展示错误面板
    pub department_error_view: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            fragment_root: None,
            quiz_file: None,
            fade_delay_ms: 300,
            contact_email: "hello@rouze.com".to_string(),
            stale_policy: StalePolicy::LatestRequest,
            department_error_view: false,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            base_url: std::env::var("LANDING_BASE_URL").unwrap_or(default.base_url),
            fragment_root: std::env::var("LANDING_FRAGMENT_ROOT").ok().or(default.fragment_root),
            quiz_file: std::env::var("LANDING_QUIZ_FILE").ok().or(default.quiz_file),
            fade_delay_ms: std::env::var("LANDING_FADE_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.fade_delay_ms),
            contact_email: std::env::var("LANDING_CONTACT_EMAIL").unwrap_or(default.contact_email),
            stale_policy: stale_policy_or_default(std::env::var("LANDING_STALE_POLICY").ok()),
            department_error_view: std::env::var("LANDING_DEPARTMENT_ERROR_VIEW").ok().and_then(|v| v.parse().ok()).unwrap_or(default.department_error_view),
            verbose_logging: Self::verbose_from_env(),
        }
    }

    pub fn verbose_from_env() -> bool {
        std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(false)
    }

    pub fn fade_delay(&self) -> Duration {
        Duration::from_millis(self.fade_delay_ms)
    }
}

/// 解析写入策略，无法识别的值记录警告后回退到默认
fn stale_policy_or_default(value: Option<String>) -> StalePolicy {
    match value.map(|v| v.parse::<StalePolicy>()) {
        Some(Ok(policy)) => policy,
        Some(Err(e)) => {
            warn!("⚠️ {}，使用默认策略", e);
            StalePolicy::default()
        }
        None => StalePolicy::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_policy_parse() {
        assert_eq!("latest".parse::<StalePolicy>().unwrap(), StalePolicy::LatestRequest);
        assert_eq!(" Last-Resolved ".parse::<StalePolicy>().unwrap(), StalePolicy::LastResolved);
        assert!("newest".parse::<StalePolicy>().is_err());
    }

    #[test]
    fn test_bad_stale_policy_falls_back_to_default() {
        assert_eq!(stale_policy_or_default(None), StalePolicy::LatestRequest);
        assert_eq!(
            stale_policy_or_default(Some("race".to_string())),
            StalePolicy::LastResolved
        );
        assert_eq!(
            stale_policy_or_default(Some("newest".to_string())),
            StalePolicy::LatestRequest
        );
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.fade_delay(), Duration::from_millis(300));
        assert_eq!(config.stale_policy, StalePolicy::LatestRequest);
        assert!(!config.department_error_view);
        assert!(config.fragment_root.is_none());
    }
}
