//! 问卷状态与纯函数状态转移

use serde::Serialize;

use crate::error::QuizError;
use crate::models::{Category, QuestionBank};

/// 各分类的累计得分，每个已知分类初始为 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scores([u32; Category::ALL.len()]);

impl Scores {
    pub fn get(&self, category: Category) -> u32 {
        self.0[category.ordinal()]
    }

    pub fn add(&mut self, category: Category, weight: u32) {
        let slot = &mut self.0[category.ordinal()];
        *slot = slot.saturating_add(weight);
    }

    /// 按声明顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// 得分最高的分类
    ///
    /// 从左到右归约，平分时保留左侧（即声明更早的分类）。
    pub fn leader(&self) -> Category {
        Category::ALL[1..]
            .iter()
            .copied()
            .fold(Category::ALL[0], |best, c| {
                if self.get(c) > self.get(best) {
                    c
                } else {
                    best
                }
            })
    }
}

impl Serialize for Scores {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(Category::ALL.len()))?;
        for (category, score) in self.iter() {
            map.serialize_entry(category.key(), &score)?;
        }
        map.end()
    }
}

/// 问卷事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizEvent {
    /// 选择当前题目的第 n 个选项
    Select(usize),
    /// 返回上一题
    Back,
}

/// 状态转移后的下一步
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// 显示第 n 题
    Question(usize),
    /// 所有题目已作答
    Finished(Category),
    /// 状态没有变化
    Unchanged,
}

/// 问卷状态
///
/// 不变量：`current_question` 始终在 `[0, 题目数)` 内。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct QuizState {
    current_question: usize,
    scores: Scores,
}

impl QuizState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_question(&self) -> usize {
        self.current_question
    }

    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    /// 计算下一个状态，不修改自身
    ///
    /// 返回上一题时不会撤销该题已累加的权重，重新作答会重复计分。
    pub fn next(&self, bank: &QuestionBank, event: QuizEvent) -> Result<(QuizState, Step), QuizError> {
        match event {
            QuizEvent::Select(index) => {
                let question = bank
                    .get(self.current_question)
                    .ok_or(QuizError::NoActiveQuestion)?;
                let option = question
                    .options
                    .get(index)
                    .ok_or(QuizError::OptionOutOfRange {
                        question: self.current_question,
                        index,
                        option_count: question.options.len(),
                    })?;

                let mut next = self.clone();
                next.scores.add(option.category, option.weight);

                if next.current_question + 1 < bank.len() {
                    next.current_question += 1;
                    let step = Step::Question(next.current_question);
                    Ok((next, step))
                } else {
                    let winner = next.scores.leader();
                    Ok((next, Step::Finished(winner)))
                }
            }
            QuizEvent::Back => {
                if self.current_question == 0 {
                    return Ok((self.clone(), Step::Unchanged));
                }
                let mut next = self.clone();
                next.current_question -= 1;
                let step = Step::Question(next.current_question);
                Ok((next, step))
            }
        }
    }
}
