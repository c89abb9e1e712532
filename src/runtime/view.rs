use serde::Serialize;

use crate::models::{AnswerState, Question};

/// 运行时的只读视图
///
/// 渲染层只读这个结构，不直接接触运行时内部状态。
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuizView<'a> {
    pub current_index: usize,
    pub total: usize,
    pub score: usize,
    pub completed: bool,
    /// 当前题目，考试为空时为 `None`
    pub question: Option<&'a Question>,
    /// 当前题目的作答状态，未作答时为 `None`
    pub answer_state: Option<&'a AnswerState>,
}

impl QuizView<'_> {
    /// 是否没有任何题目
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// 当前位置（从 1 开始）
    pub fn position(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.current_index + 1
        }
    }
}
