use std::io::Write;

use super::Renderer;
use crate::error::{AppError, AppResult};
use crate::models::question::choice_label;
use crate::models::{AnswerKey, AnswerState, Question, Selection, Verdict};
use crate::runtime::QuizView;

/// 纯文本渲染器
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, view: &QuizView<'_>) -> AppResult<()> {
        let text = render_to_string(view);
        self.out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(AppError::Render)
    }

    fn notice(&mut self, message: &str) -> AppResult<()> {
        writeln!(self.out, "» {}", message)
            .and_then(|_| self.out.flush())
            .map_err(AppError::Render)
    }
}

/// 把视图渲染为文本
pub fn render_to_string(view: &QuizView<'_>) -> String {
    let mut lines = vec!["─".repeat(60)];

    if view.is_empty() {
        lines.push("No questions available.".to_string());
    } else if view.completed {
        lines.push(format!(
            "Exam complete. Score {}/{} ({:.0}%)",
            view.score,
            view.total,
            view.score as f64 * 100.0 / view.total as f64
        ));
    } else if let Some(question) = view.question {
        lines.push(format!(
            "Question {}/{} | Score {}/{}",
            view.position(),
            view.total,
            view.score,
            view.total
        ));
        lines.push(format!(
            "{}. [{}] {}",
            question.id(),
            question.kind(),
            question.prompt()
        ));
        lines.extend(answer_lines(question, view.answer_state));
        if let Some(state) = view.answer_state.filter(|s| s.revealed) {
            lines.extend(reveal_lines(question, state));
        }
    }

    lines.push(String::new());
    lines.join("\n")
}

fn answer_lines(question: &Question, state: Option<&AnswerState>) -> Vec<String> {
    let selection = state.and_then(|s| s.selection.as_ref());
    match question.answer() {
        AnswerKey::Mcq { choices, .. } => choices
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                let mark = if selection == Some(&Selection::Choice(i)) { "x" } else { " " };
                format!("  ({}) {}. {}", mark, choice_label(i), choice)
            })
            .collect(),
        AnswerKey::TrueFalse { .. } => {
            let mark = |value: bool| {
                if selection == Some(&Selection::Bool(value)) { "x" } else { " " }
            };
            vec![format!("  ({}) True   ({}) False", mark(true), mark(false))]
        }
        AnswerKey::ShortAnswer { .. } => match selection {
            Some(Selection::Text(input)) => vec![format!("  Your answer: {}", input)],
            _ => vec!["  Your answer: (none)".to_string()],
        },
    }
}

fn reveal_lines(question: &Question, state: &AnswerState) -> Vec<String> {
    let verdict = match state.verdict {
        Some(Verdict::Correct) => "Correct",
        Some(Verdict::Incorrect) => "Incorrect",
        Some(Verdict::Unanswered) | None => "Not answered",
    };
    let mut lines = vec![
        format!("  {}", verdict),
        format!("  Answer: {}", question.answer_display()),
    ];
    if question.is_unresolved() {
        lines.push("  (answer key could not be matched to a choice)".to_string());
    }
    if let Some(explanation) = question.explanation() {
        lines.push(format!("  Why: {}", explanation));
    }
    if !question.citations().is_empty() {
        lines.push(format!("  Cites: {}", question.citations().join("; ")));
    }
    lines
}
