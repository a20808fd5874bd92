//! 视图层
//!
//! 页面区域里放的是结构化的 `View`，而不是拼好的 HTML 字符串。
//! 只有在最终输出时才通过 `markup::render` 转成转义后的标记。

pub mod markup;

use serde::Serialize;

use crate::models::{Category, Question};

pub use markup::{escape_html, render};

/// 区域内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum View {
    #[default]
    Empty,
    Question(QuestionView),
    Result(ResultView),
    Loading(LoadingView),
    Fragment(Fragment),
    Error(ErrorView),
}

/// 答题进度，`current` 从 1 开始
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Question {} of {}", self.current, self.total)
    }
}

/// 可选择的选项控件，`index` 即选项在题目中的序号
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionControl {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub progress: Progress,
    pub prompt: String,
    pub options: Vec<OptionControl>,
    /// 只有不是第一题时才显示返回按钮
    pub show_back: bool,
}

impl QuestionView {
    pub fn new(question: &Question, index: usize, total: usize) -> Self {
        Self {
            progress: Progress {
                current: index + 1,
                total,
            },
            prompt: question.prompt.clone(),
            options: question
                .options
                .iter()
                .enumerate()
                .map(|(i, o)| OptionControl {
                    index: i,
                    text: o.text.clone(),
                })
                .collect(),
            show_back: index > 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub category: Category,
    pub display_name: String,
}

impl ResultView {
    pub const HEADING: &'static str = "Based on your answers...";
    pub const SUMMARY: &'static str = "is the best starting point for your challenge.";
    pub const PROCEED_LABEL: &'static str = "Show me this path →";
    pub const RESTART_LABEL: &'static str = "Restart quiz";

    pub fn new(category: Category) -> Self {
        Self {
            category,
            display_name: category.display_name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadingView {
    pub message: String,
}

impl LoadingView {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 预先编写好的标记片段，原样注入
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    pub markup: String,
}

impl Fragment {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }
}

/// 片段加载失败时的静态错误面板
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorView {
    pub title: String,
    pub contact_email: String,
}

impl ErrorView {
    pub fn contact(email: impl Into<String>) -> Self {
        Self {
            title: "Something went wrong".to_string(),
            contact_email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionBank;

    #[test]
    fn test_question_view_progress_and_back() {
        let bank = QuestionBank::default();
        let first = QuestionView::new(bank.get(0).unwrap(), 0, bank.len());
        assert_eq!(first.progress.to_string(), "Question 1 of 3");
        assert!(!first.show_back);
        assert_eq!(first.options.len(), 3);
        assert_eq!(first.options[2].index, 2);

        let last = QuestionView::new(bank.get(2).unwrap(), 2, bank.len());
        assert_eq!(last.progress.to_string(), "Question 3 of 3");
        assert!(last.show_back);
    }

    #[test]
    fn test_view_serializes_with_kind_tag() {
        let view = View::Result(ResultView::new(Category::Prediction));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["kind"], "result");
        assert_eq!(json["category"], "prediction");
        assert_eq!(json["display_name"], "Trend Prediction");
    }
}
