use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::models::category::Category;

/// 题目选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub text: String,
    pub category: Category,
    pub weight: u32,
}

impl QuizOption {
    pub fn new(text: impl Into<String>, category: Category, weight: u32) -> Self {
        Self {
            text: text.into(),
            category,
            weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub prompt: String,
    pub options: Vec<QuizOption>,
}

/// 题库
///
/// 构造时校验：至少一道题，每道题至少一个选项。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyBank);
        }
        if let Some(q) = questions.iter().find(|q| q.options.is_empty()) {
            return Err(QuizError::EmptyQuestion { id: q.id });
        }
        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// 通过 `new` 构造的题库恒为非空
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

impl Default for QuestionBank {
    /// 落地页内置的三道题
    fn default() -> Self {
        use Category::*;

        let questions = vec![
            Question {
                id: 1,
                prompt: "What's your biggest challenge right now?".to_string(),
                options: vec![
                    QuizOption::new("We don't understand what customers actually want", Market, 3),
                    QuizOption::new("Competitors are winning and we don't know why", Competitors, 3),
                    QuizOption::new("We're unsure where the market is heading", Prediction, 3),
                ],
            },
            Question {
                id: 2,
                prompt: "What timeline are you working with?".to_string(),
                options: vec![
                    QuizOption::new("Need insights within 1-2 weeks (urgent decision)", Market, 2),
                    QuizOption::new("Planning 1-3 months ahead", Competitors, 2),
                    QuizOption::new("Strategic planning 6-12 months out", Prediction, 2),
                ],
            },
            Question {
                id: 3,
                prompt: "What kind of data interests you most?".to_string(),
                options: vec![
                    QuizOption::new("Customer complaints and feature requests", Market, 1),
                    QuizOption::new("Competitor weaknesses and gaps", Competitors, 1),
                    QuizOption::new("Early trend signals and forecasts", Prediction, 1),
                ],
            },
        ];

        Self { questions }
    }
}
