use serde::Deserialize;

use super::bridge::{items_to_questions, QuestionItem};
use super::exam_text::parse_exam;
use crate::models::Question;

/// 考试来源
///
/// 三种上游形态最终都归一到同一份题目列表。
#[derive(Debug, Clone)]
pub enum ExamSource {
    /// `## Exam Output` 原始文本
    Text(String),
    /// 已经构造好的题目
    Questions(Vec<Question>),
    /// 上游接口返回的结构化题目项
    Items(Vec<QuestionItem>),
}

/// JSON 考试文件内容，可以是题目列表或题目项列表
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum JsonExam {
    Questions(Vec<Question>),
    Items(Vec<QuestionItem>),
}

impl From<JsonExam> for ExamSource {
    fn from(exam: JsonExam) -> Self {
        match exam {
            JsonExam::Questions(questions) => ExamSource::Questions(questions),
            JsonExam::Items(items) => ExamSource::Items(items),
        }
    }
}

impl ExamSource {
    /// 转换为题目列表
    ///
    /// 文本走解析器，题目项走桥接，预构造题目原样返回（排序去重由运行时负责）。
    pub fn into_questions(self) -> Vec<Question> {
        match self {
            ExamSource::Text(text) => parse_exam(&text),
            ExamSource::Questions(questions) => questions,
            ExamSource::Items(items) => items_to_questions(items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionKind;

    #[test]
    fn test_json_exam_detects_questions() {
        let json = r#"[{"id": 1, "prompt": "p", "kind": "TrueFalse", "correct": true}]"#;
        let exam: JsonExam = serde_json::from_str(json).unwrap();
        assert!(matches!(exam, JsonExam::Questions(_)));
    }

    #[test]
    fn test_json_exam_detects_items() {
        let json = r#"[{"id": 1, "question": "p", "options": [{"id": "A", "text": "x"}], "answer": "A"}]"#;
        let exam: JsonExam = serde_json::from_str(json).unwrap();
        let questions = ExamSource::from(exam).into_questions();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].kind(), QuestionKind::Mcq);
    }
}
