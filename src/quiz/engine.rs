//! 问卷引擎
//!
//! 持有题库、问卷状态和页面句柄，把 `QuizState::next` 的结果渲染到问卷容器。
//!
//! 状态机：`Idle → Question(0) → … → Question(N-1) → Result → {Idle | 路由}`，
//! `Question(i)` 可以通过返回回到 `Question(i-1)`。

use tracing::{debug, info, warn};

use crate::error::QuizError;
use crate::infrastructure::{Page, Region};
use crate::models::{Category, QuestionBank};
use crate::quiz::state::{QuizEvent, QuizState, Step};
use crate::view::{QuestionView, ResultView, View};

/// 问卷所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// 显示路径列表
    Idle,
    /// 正在作答第 n 题
    Question(usize),
    /// 显示结果
    Result(Category),
}

pub struct QuizEngine {
    bank: QuestionBank,
    state: QuizState,
    phase: QuizPhase,
    page: Page,
}

impl QuizEngine {
    pub fn new(bank: QuestionBank, page: Page) -> Self {
        Self {
            bank,
            state: QuizState::new(),
            phase: QuizPhase::Idle,
            page,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    /// 结果阶段的获胜分类
    pub fn result(&self) -> Option<Category> {
        match self.phase {
            QuizPhase::Result(category) => Some(category),
            _ => None,
        }
    }

    /// 开始（或重新开始）问卷
    ///
    /// 无论之前处于什么状态，索引和所有分数都会归零。
    pub fn start(&mut self) -> QuestionView {
        info!("📝 开始问卷，共 {} 题", self.bank.len());

        self.page.hide(Region::Paths);
        self.page.show(Region::Quiz);

        self.state = QuizState::new();
        self.phase = QuizPhase::Question(0);

        self.render_current_question()
    }

    /// 渲染当前题目，替换问卷容器的全部内容
    pub fn render_current_question(&self) -> QuestionView {
        let index = self.state.current_question();
        // 索引不变量由 QuizState 保证
        let question = &self.bank.questions()[index];
        let view = QuestionView::new(question, index, self.bank.len());

        debug!("渲染题目: {}", view.progress);
        self.page
            .set_view(Region::QuizContainer, View::Question(view.clone()));

        view
    }

    /// 选择当前题目的一个选项
    ///
    /// 还有题目时前进到下一题，否则计算并展示结果。
    /// 非答题阶段或索引越界时返回错误，状态不变。
    pub fn select_option(&mut self, index: usize) -> Result<QuizPhase, QuizError> {
        if !matches!(self.phase, QuizPhase::Question(_)) {
            warn!("当前不在答题阶段，忽略选项 {}", index);
            return Err(QuizError::NoActiveQuestion);
        }

        let (next, step) = self.state.next(&self.bank, QuizEvent::Select(index))?;
        self.state = next;
        debug!("选择选项 {}，当前得分: {:?}", index, self.state.scores());

        match step {
            Step::Question(i) => {
                self.phase = QuizPhase::Question(i);
                self.render_current_question();
            }
            Step::Finished(_) => {
                self.compute_result();
            }
            Step::Unchanged => {}
        }

        Ok(self.phase)
    }

    /// 返回上一题；已经在第一题时什么也不做
    pub fn go_to_previous_question(&mut self) {
        if !matches!(self.phase, QuizPhase::Question(_)) {
            return;
        }

        match self.state.next(&self.bank, QuizEvent::Back) {
            Ok((next, Step::Question(i))) => {
                self.state = next;
                self.phase = QuizPhase::Question(i);
                self.render_current_question();
            }
            Ok(_) => debug!("已经是第一题，忽略返回"),
            Err(e) => warn!("返回上一题失败: {}", e),
        }
    }

    /// 计算获胜分类并渲染结果视图
    pub fn compute_result(&mut self) -> Category {
        let winner = self.state.scores().leader();
        info!(
            "✓ 问卷完成，推荐路径: {} (得分: {:?})",
            winner.display_name(),
            self.state.scores()
        );

        self.phase = QuizPhase::Result(winner);
        self.page
            .set_view(Region::QuizContainer, View::Result(ResultView::new(winner)));

        winner
    }

    /// 隐藏问卷，显示路径列表；不清空内存中的状态
    pub fn reset(&mut self) {
        self.page.hide(Region::Quiz);
        self.page.show(Region::Paths);
        self.phase = QuizPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> (QuizEngine, Page) {
        let page = Page::new();
        (QuizEngine::new(QuestionBank::default(), page.clone()), page)
    }

    fn scores(engine: &QuizEngine) -> Vec<u32> {
        engine.state().scores().iter().map(|(_, s)| s).collect()
    }

    #[test]
    fn test_start_shows_quiz_and_first_question() {
        let (mut engine, page) = engine();
        let view = engine.start();

        assert!(page.is_hidden(Region::Paths));
        assert!(!page.is_hidden(Region::Quiz));
        assert_eq!(engine.phase(), QuizPhase::Question(0));
        assert_eq!(view.progress.current, 1);
        assert_eq!(page.view(Region::QuizContainer), View::Question(view));
    }

    #[test]
    fn test_start_is_idempotent() {
        let (mut engine, _page) = engine();
        engine.start();
        engine.select_option(0).unwrap();
        engine.select_option(0).unwrap();

        engine.start();
        assert_eq!(engine.state().current_question(), 0);
        assert_eq!(scores(&engine), vec![0, 0, 0]);

        engine.start();
        assert_eq!(engine.state(), &QuizState::new());
    }

    #[test]
    fn test_full_run_renders_result() {
        let (mut engine, page) = engine();
        engine.start();
        assert_eq!(engine.select_option(0).unwrap(), QuizPhase::Question(1));
        assert_eq!(engine.select_option(1).unwrap(), QuizPhase::Question(2));
        assert_eq!(
            engine.select_option(0).unwrap(),
            QuizPhase::Result(Category::Market)
        );

        assert_eq!(scores(&engine), vec![4, 2, 0]);
        assert_eq!(engine.result(), Some(Category::Market));
        match page.view(Region::QuizContainer) {
            View::Result(r) => assert_eq!(r.display_name, "Market Understanding"),
            other => panic!("期望结果视图，实际: {:?}", other),
        }
    }

    #[test]
    fn test_previous_question_at_start_is_noop() {
        let (mut engine, _page) = engine();
        engine.start();
        engine.go_to_previous_question();
        assert_eq!(engine.state().current_question(), 0);
        assert_eq!(scores(&engine), vec![0, 0, 0]);
    }

    #[test]
    fn test_previous_question_keeps_scores() {
        let (mut engine, page) = engine();
        engine.start();
        engine.select_option(1).unwrap();
        engine.go_to_previous_question();

        assert_eq!(engine.phase(), QuizPhase::Question(0));
        assert_eq!(scores(&engine), vec![0, 3, 0]);
        match page.view(Region::QuizContainer) {
            View::Question(q) => assert!(!q.show_back),
            other => panic!("期望题目视图，实际: {:?}", other),
        }
    }

    #[test]
    fn test_select_outside_question_phase() {
        let (mut engine, _page) = engine();
        assert_eq!(engine.select_option(0), Err(QuizError::NoActiveQuestion));

        engine.start();
        for _ in 0..3 {
            engine.select_option(2).unwrap();
        }
        assert_eq!(engine.select_option(0), Err(QuizError::NoActiveQuestion));
        assert_eq!(scores(&engine), vec![0, 0, 6]);
    }

    #[test]
    fn test_invalid_option_keeps_question() {
        let (mut engine, _page) = engine();
        engine.start();
        assert!(engine.select_option(9).is_err());
        assert_eq!(engine.phase(), QuizPhase::Question(0));
        assert_eq!(scores(&engine), vec![0, 0, 0]);
    }

    #[test]
    fn test_reset_keeps_state_in_memory() {
        let (mut engine, page) = engine();
        engine.start();
        engine.select_option(2).unwrap();
        engine.reset();

        assert!(page.is_hidden(Region::Quiz));
        assert!(!page.is_hidden(Region::Paths));
        assert_eq!(engine.phase(), QuizPhase::Idle);
        assert_eq!(scores(&engine), vec![0, 0, 3]);
    }
}
