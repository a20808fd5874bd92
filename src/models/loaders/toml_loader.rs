use crate::error::{AppError, AppResult, FileError};
use crate::models::question::{Question, QuestionBank};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// TOML 题库文件结构
///
/// ```toml
/// [[questions]]
/// id = 1
/// prompt = "What's your biggest challenge right now?"
///
/// [[questions.options]]
/// text = "We don't understand what customers actually want"
/// category = "market"
/// weight = 3
/// ```
#[derive(Debug, Deserialize)]
struct QuestionBankFile {
    questions: Vec<Question>,
}

/// 从 TOML 文本解析题库
pub fn parse_question_bank(content: &str) -> AppResult<QuestionBank> {
    let file: QuestionBankFile = toml::from_str(content)?;
    let bank = QuestionBank::new(file.questions)?;
    Ok(bank)
}

/// 从 TOML 文件加载题库
pub async fn load_question_bank(toml_file_path: &Path) -> AppResult<QuestionBank> {
    let path_str = toml_file_path.display().to_string();

    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AppError::File(FileError::NotFound {
                path: path_str.clone(),
            }),
            _ => AppError::file_read_failed(path_str.clone(), e),
        })?;

    // 补上 TOML 错误缺失的文件路径
    let bank = parse_question_bank(&content).map_err(|e| match e {
        AppError::File(FileError::TomlParseFailed { source, .. }) => {
            AppError::File(FileError::TomlParseFailed {
                path: path_str.clone(),
                source,
            })
        }
        other => other,
    })?;

    tracing::info!(
        "成功从 {} 加载 {} 道题",
        toml_file_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy(),
        bank.len()
    );

    Ok(bank)
}
