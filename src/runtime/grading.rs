//! 判分规则
//!
//! 单选题比较下标，判断题比较布尔值，简答题比较规范化后的文本。

use crate::models::{AnswerKey, Question, Selection, Verdict};
use crate::parser::matches_normalized;

/// 作答内容是否正确
///
/// 作答类型与题型不符时视为错误。
pub fn is_correct(question: &Question, selection: &Selection) -> bool {
    match (question.answer(), selection) {
        (AnswerKey::Mcq { correct_index, .. }, Selection::Choice(index)) => index == correct_index,
        (AnswerKey::TrueFalse { correct }, Selection::Bool(value)) => value == correct,
        (AnswerKey::ShortAnswer { correct_text }, Selection::Text(input)) => {
            matches_normalized(correct_text, input)
        }
        _ => false,
    }
}

/// 作答内容是否适用于该题
pub fn fits(question: &Question, selection: &Selection) -> bool {
    match (question.answer(), selection) {
        (AnswerKey::Mcq { choices, .. }, Selection::Choice(index)) => *index < choices.len(),
        (AnswerKey::TrueFalse { .. }, Selection::Bool(_)) => true,
        (AnswerKey::ShortAnswer { .. }, Selection::Text(_)) => true,
        _ => false,
    }
}

/// 计算判定结果
pub fn verdict(question: &Question, selection: Option<&Selection>) -> Verdict {
    match selection {
        None => Verdict::Unanswered,
        Some(s) if is_correct(question, s) => Verdict::Correct,
        Some(_) => Verdict::Incorrect,
    }
}
