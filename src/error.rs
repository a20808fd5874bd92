use std::fmt;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 问卷流程错误
    Quiz(QuizError),
    /// 片段加载错误
    Fragment(FragmentError),
    /// 文件操作错误
    File(FileError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Quiz(e) => write!(f, "问卷错误: {}", e),
            AppError::Fragment(e) => write!(f, "片段错误: {}", e),
            AppError::File(e) => write!(f, "文件错误: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Quiz(e) => Some(e),
            AppError::Fragment(e) => Some(e),
            AppError::File(e) => Some(e),
        }
    }
}

/// 问卷流程错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// 选项索引超出当前题目的范围
    OptionOutOfRange {
        question: usize,
        index: usize,
        option_count: usize,
    },
    /// 当前不处于答题阶段
    NoActiveQuestion,
    /// 题库为空
    EmptyBank,
    /// 题目没有任何选项
    EmptyQuestion {
        id: u32,
    },
    /// 无法识别的分类键
    UnknownCategory {
        key: String,
    },
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::OptionOutOfRange {
                question,
                index,
                option_count,
            } => write!(
                f,
                "第 {} 题的选项索引 {} 超出范围 [0, {})",
                question + 1,
                index,
                option_count
            ),
            QuizError::NoActiveQuestion => write!(f, "当前没有正在作答的题目"),
            QuizError::EmptyBank => write!(f, "题库不能为空"),
            QuizError::EmptyQuestion { id } => write!(f, "题目 {} 没有任何选项", id),
            QuizError::UnknownCategory { key } => write!(f, "未知的分类: {}", key),
        }
    }
}

impl std::error::Error for QuizError {}

/// 片段加载错误
///
/// 对用户而言只有一种结果："片段加载失败"。细分的变体只用于日志。
#[derive(Debug, Error)]
pub enum FragmentError {
    #[error("片段请求失败 ({url}): {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("片段返回错误状态 ({url}): {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("片段内容读取失败 ({url}): {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("读取片段文件失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("非法的片段名称: {name:?}")]
    InvalidName { name: String },
}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 文件不存在
    NotFound {
        path: String,
    },
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotFound { path } => write!(f, "文件不存在: {}", path),
            FileError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
            FileError::TomlParseFailed { path, source } => {
                write!(f, "TOML解析失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. } | FileError::TomlParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            FileError::NotFound { .. } => None,
        }
    }
}

/// 配置错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// 环境变量解析失败
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EnvVarParseFailed {
                var_name,
                value,
                expected_type,
            } => {
                write!(
                    f,
                    "环境变量 {} 解析失败: 值 '{}' 无法转换为 {}",
                    var_name, value, expected_type
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ========== 从常见错误类型转换 ==========

impl From<QuizError> for AppError {
    fn from(err: QuizError) -> Self {
        AppError::Quiz(err)
    }
}

impl From<FragmentError> for AppError {
    fn from(err: FragmentError) -> Self {
        AppError::Fragment(err)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: String::new(), // TOML错误通常不包含路径信息
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
