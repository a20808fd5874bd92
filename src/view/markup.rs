//! 视图 → HTML 标记
//!
//! 所有来自数据的文本都经过转义；只有 `Fragment` 原样输出。
//! 按钮通过 `data-action` 绑定行为，不生成内联脚本。

use std::fmt::Write;

use super::{ErrorView, LoadingView, QuestionView, ResultView, View};

/// 转义 HTML 特殊字符
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// 渲染视图
pub fn render(view: &View) -> String {
    match view {
        View::Empty => String::new(),
        View::Question(q) => render_question(q),
        View::Result(r) => render_result(r),
        View::Loading(l) => render_loading(l),
        View::Fragment(f) => f.markup.clone(),
        View::Error(e) => render_error(e),
    }
}

fn render_question(view: &QuestionView) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"quiz-card\">");
    let _ = write!(html, "<div class=\"quiz-progress\">{}</div>", view.progress);
    let _ = write!(
        html,
        "<h2 class=\"quiz-question\">{}</h2>",
        escape_html(&view.prompt)
    );
    html.push_str("<div class=\"quiz-options\">");
    for option in &view.options {
        let _ = write!(
            html,
            "<button class=\"quiz-option\" data-action=\"select-option\" data-index=\"{}\">{}</button>",
            option.index,
            escape_html(&option.text)
        );
    }
    html.push_str("</div>");
    if view.show_back {
        html.push_str(
            "<button class=\"btn btn-secondary quiz-back\" data-action=\"previous-question\">← Back</button>",
        );
    }
    html.push_str("</div>");
    html
}

fn render_result(view: &ResultView) -> String {
    format!(
        "<div class=\"quiz-result\">\
         <h2>{heading}</h2>\
         <h3 class=\"result-path\">{name}</h3>\
         <p>{summary}</p>\
         <button class=\"btn btn-primary\" data-action=\"select-path\" data-path=\"{key}\">{proceed}</button>\
         <button class=\"btn btn-secondary\" data-action=\"start-quiz\">{restart}</button>\
         </div>",
        heading = ResultView::HEADING,
        name = escape_html(&view.display_name),
        summary = ResultView::SUMMARY,
        key = view.category.key(),
        proceed = ResultView::PROCEED_LABEL,
        restart = ResultView::RESTART_LABEL,
    )
}

fn render_loading(view: &LoadingView) -> String {
    format!("<div class=\"loading\">{}</div>", escape_html(&view.message))
}

fn render_error(view: &ErrorView) -> String {
    let email = escape_html(&view.contact_email);
    format!(
        "<div class=\"error-state\">\
         <h3>{}</h3>\
         <p>Please <a href=\"mailto:{}\">contact us directly</a></p>\
         </div>",
        escape_html(&view.title),
        email
    )
}
