//! 终端应用 - 编排层
//!
//! 在终端里驱动问卷引擎和路径路由，页面区域的内容以文本形式输出。

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::config::Config;
use crate::infrastructure::{FileFragmentSource, FragmentSource, HttpFragmentSource, Page, Region};
use crate::models::{load_question_bank, Category, QuestionBank};
use crate::quiz::{QuizEngine, QuizPhase};
use crate::router::{PathRouter, RouterSettings};
use crate::utils::logging;
use crate::view::{render, ResultView, View};

/// 用户输入的命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 开始问卷
    Start,
    /// 选择第 n 个选项（从 0 开始）
    Select(usize),
    Back,
    /// 进入问卷推荐的路径
    Proceed,
    /// 重新开始问卷
    Restart,
    /// 关闭问卷，回到路径列表
    Reset,
    /// 直接选择一条路径
    Path(Category),
    Department(String),
    /// 输出当前状态的 JSON 快照
    Dump,
    Help,
    Quit,
}

impl Command {
    /// 解析一行输入；数字按 1 开始计数
    pub fn parse(input: &str) -> Option<Command> {
        let input = input.trim();
        if let Some(category) = Category::from_key(input) {
            return Some(Command::Path(category));
        }
        if let Ok(n) = input.parse::<usize>() {
            return n.checked_sub(1).map(Command::Select);
        }

        let mut parts = input.splitn(2, char::is_whitespace);
        let head = parts.next().unwrap_or_default().to_ascii_lowercase();
        let rest = parts.next().map(str::trim).unwrap_or_default();

        match head.as_str() {
            "s" | "start" => Some(Command::Start),
            "b" | "back" => Some(Command::Back),
            "p" | "proceed" => Some(Command::Proceed),
            "r" | "restart" => Some(Command::Restart),
            "x" | "reset" => Some(Command::Reset),
            "d" | "dept" if !rest.is_empty() => Some(Command::Department(rest.to_string())),
            "j" | "json" => Some(Command::Dump),
            "h" | "help" | "?" => Some(Command::Help),
            "q" | "quit" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// 应用主结构
pub struct App {
    page: Page,
    engine: QuizEngine,
    router: PathRouter,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config);

        let bank = match &config.quiz_file {
            Some(path) => load_question_bank(Path::new(path)).await?,
            None => QuestionBank::default(),
        };

        let source: Arc<dyn FragmentSource> = match &config.fragment_root {
            Some(root) => Arc::new(FileFragmentSource::new(root.clone())),
            None => Arc::new(HttpFragmentSource::new(config.base_url.clone())),
        };

        Ok(Self::with_source(config, bank, source))
    }

    /// 使用指定的题库和片段来源构建应用
    pub fn with_source(config: Config, bank: QuestionBank, source: Arc<dyn FragmentSource>) -> Self {
        let page = Page::new();
        let engine = QuizEngine::new(bank, page.clone());
        let router = PathRouter::new(page.clone(), source, RouterSettings::from_config(&config));

        Self {
            page,
            engine,
            router,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn engine(&self) -> &QuizEngine {
        &self.engine
    }

    /// 处理一条命令，返回需要输出的文本；`None` 表示退出
    pub async fn handle(&mut self, command: Command) -> Option<String> {
        let output = match command {
            Command::Start | Command::Restart => {
                self.engine.start();
                describe(&self.page.view(Region::QuizContainer))
            }
            Command::Select(index) => match self.engine.select_option(index) {
                Ok(_) => describe(&self.page.view(Region::QuizContainer)),
                Err(e) => {
                    warn!("⚠️ {}", e);
                    format!("无效的选择: {}", e)
                }
            },
            Command::Back => {
                self.engine.go_to_previous_question();
                describe(&self.page.view(Region::QuizContainer))
            }
            Command::Proceed => match self.engine.result() {
                Some(category) => {
                    self.router.select_path(category).await;
                    describe(&self.page.view(Region::DynamicContent))
                }
                None => "请先完成问卷".to_string(),
            },
            Command::Path(category) => {
                self.router.select_path(category).await;
                describe(&self.page.view(Region::DynamicContent))
            }
            Command::Department(name) => {
                self.router.explore_department(&name).await;
                describe(&self.page.view(Region::DepartmentModal))
            }
            Command::Reset => {
                self.engine.reset();
                paths_menu()
            }
            Command::Dump => self.snapshot().to_string(),
            Command::Help => help_text(),
            Command::Quit => return None,
        };
        Some(output)
    }

    /// 当前状态的 JSON 快照
    pub fn snapshot(&self) -> serde_json::Value {
        let phase = match self.engine.phase() {
            QuizPhase::Idle => json!({ "phase": "idle" }),
            QuizPhase::Question(i) => json!({ "phase": "question", "index": i }),
            QuizPhase::Result(c) => json!({ "phase": "result", "category": c }),
        };
        let quiz_container = self.page.view(Region::QuizContainer);
        json!({
            "phase": phase,
            "state": self.engine.state(),
            "quiz_container_html": render(&quiz_container),
            "quiz_container": quiz_container,
            "dynamic_content": self.page.view(Region::DynamicContent),
        })
    }

    /// 运行交互循环，直到输入结束或用户退出
    pub async fn run(mut self) -> Result<()> {
        println!("{}", paths_menu());

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let Some(command) = Command::parse(&line) else {
                println!("无法识别的命令: {} (输入 h 查看帮助)", line.trim());
                continue;
            };
            match self.handle(command).await {
                Some(output) => println!("{}", output),
                None => break,
            }
        }

        info!("👋 退出");
        Ok(())
    }
}

/// 把视图转成终端文本
pub fn describe(view: &View) -> String {
    match view {
        View::Empty => String::new(),
        View::Question(q) => {
            let mut lines = vec![q.progress.to_string(), q.prompt.clone()];
            for option in &q.options {
                lines.push(format!("  {}) {}", option.index + 1, option.text));
            }
            if q.show_back {
                lines.push("  b) ← Back".to_string());
            }
            lines.join("\n")
        }
        View::Result(r) => format!(
            "{}\n{}\n{}\n  p) {}\n  r) {}",
            ResultView::HEADING,
            r.display_name,
            ResultView::SUMMARY,
            ResultView::PROCEED_LABEL,
            ResultView::RESTART_LABEL
        ),
        View::Loading(l) => l.message.clone(),
        View::Fragment(f) => f.markup.clone(),
        View::Error(e) => format!("{}\nPlease contact us directly: {}", e.title, e.contact_email),
    }
}

fn paths_menu() -> String {
    let mut lines = vec!["Choose your path:".to_string()];
    for category in Category::ALL {
        lines.push(format!("  {}) {}", category.key(), category.display_name()));
    }
    lines.push("  s) Not sure? Take the 3-question quiz".to_string());
    lines.join("\n")
}

fn help_text() -> String {
    [
        "s            开始问卷",
        "1..n         选择选项",
        "b            返回上一题",
        "p            进入推荐路径",
        "r            重新开始问卷",
        "x            回到路径列表",
        "<路径>       直接选择路径 (market / competitors / prediction)",
        "d <部门>     查看部门详情",
        "j            输出 JSON 快照",
        "q            退出",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("1"), Some(Command::Select(0)));
        assert_eq!(Command::parse(" 3 "), Some(Command::Select(2)));
        assert_eq!(Command::parse("0"), None);
        assert_eq!(Command::parse("b"), Some(Command::Back));
        assert_eq!(
            Command::parse("market"),
            Some(Command::Path(Category::Market))
        );
        assert_eq!(
            Command::parse("d sales-ops"),
            Some(Command::Department("sales-ops".to_string()))
        );
        assert_eq!(Command::parse("d"), None);
        assert_eq!(Command::parse("Q"), Some(Command::Quit));
        assert_eq!(Command::parse("launch"), None);
    }

    #[test]
    fn test_paths_menu_lists_every_category() {
        let menu = paths_menu();
        for category in Category::ALL {
            assert!(menu.contains(category.display_name()));
        }
    }
}
