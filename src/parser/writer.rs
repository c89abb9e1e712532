//! 考试文本写出
//!
//! 把题目写回 `## Exam Output` 格式，写出的文本可以被 [`parse_exam`](super::parse_exam) 原样解析回来。

use std::fmt::Write;

use crate::models::question::{choice_label, MAX_CHOICES};
use crate::models::{AnswerKey, Question};

/// 考试文本标题行
pub const EXAM_HEADER: &str = "## Exam Output";

/// 把题目列表写成考试文本
pub fn format_exam(questions: &[Question]) -> String {
    let blocks: Vec<String> = questions.iter().map(format_question).collect();
    format!("{}\n{}", EXAM_HEADER, blocks.join("\n"))
}

/// 写出单道题目
pub fn format_question(question: &Question) -> String {
    let mut out = String::new();
    // 写入 String 不会失败
    let _ = writeln!(
        out,
        "{}. {}: {}",
        question.id(),
        question.kind().label(),
        single_line(question.prompt())
    );

    match question.answer() {
        AnswerKey::Mcq {
            choices,
            correct_index,
            unresolved,
        } => {
            // 解析器只认 A-D，多出的选项不写出
            for (i, choice) in choices.iter().take(MAX_CHOICES).enumerate() {
                let _ = writeln!(out, "{}. {}", choice_label(i), single_line(choice));
            }
            if *unresolved || *correct_index >= MAX_CHOICES {
                let _ = writeln!(out, "Answer:");
            } else {
                let _ = writeln!(out, "Answer: {}", choice_label(*correct_index));
            }
        }
        AnswerKey::TrueFalse { correct } => {
            let _ = writeln!(out, "Answer: {}", if *correct { "True" } else { "False" });
        }
        AnswerKey::ShortAnswer { correct_text } => {
            let _ = writeln!(out, "Answer: {}", single_line(correct_text));
        }
    }

    if let Some(explanation) = question.explanation() {
        let _ = writeln!(out, "Why: {}", single_line(explanation));
    }
    if !question.citations().is_empty() {
        let _ = writeln!(out, "Cites: {}", question.citations().join("; "));
    }
    out
}

/// 换行会被当作新的行，写出前压成一行
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_exam;

    #[test]
    fn test_format_question_layout() {
        let q = Question::mcq(
            3,
            "Pick the\nmembrane",
            vec!["EPDM".into(), "TPO".into()],
            1,
        )
        .with_explanation("Thermoplastic")
        .with_citations(vec!["RRC Guide".into(), "p. 4".into()]);

        assert_eq!(
            format_question(&q),
            "3. MCQ: Pick the membrane\nA. EPDM\nB. TPO\nAnswer: B\nWhy: Thermoplastic\nCites: RRC Guide; p. 4\n"
        );
    }

    #[test]
    fn test_format_exam_parses_back() {
        let questions = vec![
            Question::mcq_unresolved(1, "Which?", vec!["x".into(), "y".into()]),
            Question::true_false(2, "Is it?", true),
            Question::short_answer(3, "Name it", "ASTM D226"),
        ];
        let text = format_exam(&questions);
        assert!(text.starts_with(EXAM_HEADER));
        assert_eq!(parse_exam(&text), questions);
    }

    #[test]
    fn test_choices_past_d_are_not_written() {
        let choices: Vec<String> = ["a", "b", "c", "d", "e"].map(String::from).to_vec();
        let q = Question::mcq(1, "Pick", choices, 4);
        let text = format_question(&q);
        assert!(!text.contains("E. e"));
        assert!(text.ends_with("D. d\nAnswer:\n"));
        assert!(parse_exam(&text)[0].is_unresolved());
    }
}
