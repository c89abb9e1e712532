use serde::{Deserialize, Serialize};

use super::kind::QuestionKind;

/// 题目的标准答案，按题型区分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum AnswerKey {
    /// 单选题
    #[serde(rename = "MCQ")]
    Mcq {
        /// 选项文本（不含 `A.` 前缀，前缀由位置决定）
        choices: Vec<String>,
        /// 正确选项下标（从 0 开始）
        correct_index: usize,
        /// 原文答案无法匹配到任何选项时为 true，此时 `correct_index` 固定为 0
        #[serde(default)]
        unresolved: bool,
    },
    /// 判断题
    TrueFalse { correct: bool },
    /// 简答题
    ShortAnswer { correct_text: String },
}

/// 一道考试题目
///
/// 构造完成后不可变，作答状态全部由运行时保存。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: u32,
    prompt: String,
    #[serde(flatten)]
    answer: AnswerKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    explanation: Option<String>,
    #[serde(default)]
    citations: Vec<String>,
}

impl Question {
    /// 创建单选题
    ///
    /// `correct_index` 超出选项范围时按无法解析处理（下标 0，`unresolved = true`）。
    pub fn mcq(id: u32, prompt: impl Into<String>, choices: Vec<String>, correct_index: usize) -> Self {
        let unresolved = correct_index >= choices.len();
        Self::new(
            id,
            prompt,
            AnswerKey::Mcq {
                correct_index: if unresolved { 0 } else { correct_index },
                choices,
                unresolved,
            },
        )
    }

    /// 创建答案无法解析的单选题
    pub fn mcq_unresolved(id: u32, prompt: impl Into<String>, choices: Vec<String>) -> Self {
        Self::new(
            id,
            prompt,
            AnswerKey::Mcq {
                choices,
                correct_index: 0,
                unresolved: true,
            },
        )
    }

    /// 创建判断题
    pub fn true_false(id: u32, prompt: impl Into<String>, correct: bool) -> Self {
        Self::new(id, prompt, AnswerKey::TrueFalse { correct })
    }

    /// 创建简答题
    pub fn short_answer(id: u32, prompt: impl Into<String>, correct_text: impl Into<String>) -> Self {
        Self::new(
            id,
            prompt,
            AnswerKey::ShortAnswer {
                correct_text: correct_text.into(),
            },
        )
    }

    fn new(id: u32, prompt: impl Into<String>, answer: AnswerKey) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            answer,
            explanation: None,
            citations: Vec::new(),
        }
    }

    /// 设置解析
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        let explanation = explanation.into();
        self.explanation = (!explanation.trim().is_empty()).then_some(explanation);
        self
    }

    /// 设置出处
    pub fn with_citations(mut self, citations: Vec<String>) -> Self {
        self.citations = citations;
        self
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn kind(&self) -> QuestionKind {
        match self.answer {
            AnswerKey::Mcq { .. } => QuestionKind::Mcq,
            AnswerKey::TrueFalse { .. } => QuestionKind::TrueFalse,
            AnswerKey::ShortAnswer { .. } => QuestionKind::ShortAnswer,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn answer(&self) -> &AnswerKey {
        &self.answer
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    pub fn citations(&self) -> &[String] {
        &self.citations
    }

    /// 单选题选项，其他题型为空
    pub fn choices(&self) -> &[String] {
        match &self.answer {
            AnswerKey::Mcq { choices, .. } => choices,
            _ => &[],
        }
    }

    /// 单选题答案是否为解析器的兜底猜测
    pub fn is_unresolved(&self) -> bool {
        matches!(self.answer, AnswerKey::Mcq { unresolved: true, .. })
    }

    /// 标准答案的展示文本
    pub fn answer_display(&self) -> String {
        match &self.answer {
            AnswerKey::Mcq {
                choices,
                correct_index,
                ..
            } => match choices.get(*correct_index) {
                Some(text) => format!("{}. {}", choice_label(*correct_index), text),
                None => choice_label(*correct_index).to_string(),
            },
            AnswerKey::TrueFalse { correct } => (if *correct { "True" } else { "False" }).to_string(),
            AnswerKey::ShortAnswer { correct_text } => correct_text.clone(),
        }
    }

    /// 修正反序列化得到的题目中越界的正确选项下标
    pub(crate) fn sanitized(mut self) -> Self {
        if let AnswerKey::Mcq {
            choices,
            correct_index,
            unresolved,
        } = &mut self.answer
        {
            if *correct_index >= choices.len() {
                *correct_index = 0;
                *unresolved = true;
            }
        }
        self
    }
}

/// 考试文本能表示的选项数量（`A.` ~ `D.`）
pub const MAX_CHOICES: usize = 4;

/// 选项下标对应的字母标签（0 -> 'A'）
pub fn choice_label(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| char::from(b'A' + i))
        .unwrap_or('?')
}

/// 选项字母标签对应的下标（'b' -> 1），只接受 A-D
pub fn choice_index(label: char) -> Option<usize> {
    match label.to_ascii_uppercase() {
        c @ 'A'..='D' => Some(c as usize - 'A' as usize),
        _ => None,
    }
}
