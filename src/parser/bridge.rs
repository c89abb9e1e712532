//! 上游题目数据桥接
//!
//! 出题接口返回的是已经结构化的题目项：
//! `{ id, question, options: [{id, text}], answer, explanation?, cite? }`。
//! 这里把它直接转换为 [`Question`]，或者先转换再写回考试文本格式。

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::exam_text::{resolve_choice, split_citations};
use super::writer::format_exam;
use crate::models::question::MAX_CHOICES;
use crate::models::{Question, QuestionKind};

/// 上游题目项
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionItem {
    /// 题号，可以是数字或字符串；缺失或无法解析时使用所在位置
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<u32>,
    pub question: String,
    #[serde(default)]
    pub options: Vec<OptionItem>,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub cite: Option<CiteField>,
    /// 显式题型标签（`MCQ`、`T/F`、`Short Answer` 等）
    #[serde(default, alias = "type")]
    pub kind: Option<String>,
}

/// 上游选项
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    #[serde(default)]
    pub id: String,
    pub text: String,
}

/// 出处字段，既可能是单个字符串也可能是列表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CiteField {
    One(String),
    Many(Vec<String>),
}

impl CiteField {
    fn into_citations(self) -> Vec<String> {
        match self {
            CiteField::One(raw) => split_citations(&raw),
            CiteField::Many(list) => list.iter().flat_map(|raw| split_citations(raw)).collect(),
        }
    }
}

impl QuestionItem {
    /// 推断题型
    ///
    /// 优先使用显式标签；否则有选项为单选题，答案为 true/false 为判断题，其余为简答题。
    pub fn infer_kind(&self) -> QuestionKind {
        if let Some(kind) = self.kind.as_deref().and_then(QuestionKind::from_label) {
            return kind;
        }
        let answer = self.answer.trim();
        if !self.options.is_empty() {
            QuestionKind::Mcq
        } else if answer.eq_ignore_ascii_case("true") || answer.eq_ignore_ascii_case("false") {
            QuestionKind::TrueFalse
        } else {
            QuestionKind::ShortAnswer
        }
    }

    /// 转换为题目
    ///
    /// # 参数
    /// - `position`: 题目项在列表中的位置（从 1 开始），题号缺失时使用
    ///
    /// 单选题只保留前 4 个选项，答案落在被截掉的选项上时按无法解析处理。
    pub fn into_question(mut self, position: u32) -> Question {
        let id = self.id.unwrap_or(position);
        let kind = self.infer_kind();
        if kind == QuestionKind::Mcq && self.options.len() > MAX_CHOICES {
            warn!(
                "题目项 {} 有 {} 个选项，只保留前 {} 个",
                id,
                self.options.len(),
                MAX_CHOICES
            );
            self.options.truncate(MAX_CHOICES);
        }
        let answer = self.answer.trim();

        let question = match kind {
            QuestionKind::Mcq => {
                let index = self
                    .options
                    .iter()
                    .position(|opt| !opt.id.trim().is_empty() && opt.id.trim().eq_ignore_ascii_case(answer))
                    .or_else(|| {
                        let texts: Vec<String> =
                            self.options.iter().map(|opt| opt.text.clone()).collect();
                        resolve_choice(answer, &texts)
                    });
                let choices = self
                    .options
                    .iter()
                    .map(|opt| opt.text.trim().to_string())
                    .collect();
                match index {
                    Some(index) => Question::mcq(id, self.question.trim(), choices, index),
                    None => {
                        warn!(
                            "题目项 {} 的答案 '{}' 无法匹配任何选项，默认选择第一个选项",
                            id, answer
                        );
                        Question::mcq_unresolved(id, self.question.trim(), choices)
                    }
                }
            }
            QuestionKind::TrueFalse => {
                Question::true_false(id, self.question.trim(), answer.eq_ignore_ascii_case("true"))
            }
            QuestionKind::ShortAnswer => Question::short_answer(id, self.question.trim(), answer),
        };

        question
            .with_explanation(self.explanation.unwrap_or_default())
            .with_citations(self.cite.map(CiteField::into_citations).unwrap_or_default())
    }
}

/// 批量转换题目项，按 id 排序并去重
pub fn items_to_questions(items: Vec<QuestionItem>) -> Vec<Question> {
    let mut questions: Vec<Question> = items
        .into_iter()
        .zip(1u32..)
        .filter(|(item, _)| !item.question.trim().is_empty())
        .map(|(item, position)| item.into_question(position))
        .collect();

    let converted = questions.len();
    questions.sort_by_key(Question::id);
    questions.dedup_by_key(|q| q.id());
    if questions.len() < converted {
        warn!(
            "题目项中存在重复题号，已丢弃 {} 道重复题目",
            converted - questions.len()
        );
    }
    questions
}

/// 把题目项写成考试文本
pub fn items_to_exam_text(items: Vec<QuestionItem>) -> String {
    format_exam(&items_to_questions(items))
}

/// 反序列化题号：接受整数或数字字符串
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = Option<u32>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            let digits: String = value.chars().filter(char::is_ascii_digit).collect();
            Ok(digits.parse().ok())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(u32::try_from(value).ok())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(u32::try_from(value).ok())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(IdVisitor)
}
