use serde::{Deserialize, Serialize};

/// 用户的作答内容，按题型区分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Selection {
    /// 单选题选中的选项下标
    Choice(usize),
    /// 判断题
    Bool(bool),
    /// 简答题输入
    Text(String),
}

/// 揭晓答案时的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// 未作答就揭晓
    Unanswered,
}

/// 单题状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerStatus {
    Unanswered,
    Answered,
    Revealed,
}

/// 单题作答状态
///
/// 通过 `question_id` 关联题目，不持有题目本身。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerState {
    pub question_id: u32,
    pub selection: Option<Selection>,
    pub revealed: bool,
    /// 揭晓时计算
    pub verdict: Option<Verdict>,
}

impl AnswerState {
    pub fn new(question_id: u32) -> Self {
        Self {
            question_id,
            selection: None,
            revealed: false,
            verdict: None,
        }
    }

    pub fn status(&self) -> AnswerStatus {
        if self.revealed {
            AnswerStatus::Revealed
        } else if self.selection.is_some() {
            AnswerStatus::Answered
        } else {
            AnswerStatus::Unanswered
        }
    }
}
