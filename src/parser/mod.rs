//! 解析层
//!
//! - `exam_text` - 考试文本 → 题目列表
//! - `bridge` - 上游结构化题目项 → 题目列表 / 考试文本
//! - `writer` - 题目列表 → 考试文本
//! - `normalize` - 匹配与判分共用的文本规范化
//! - `source` - 三种上游形态的统一入口

pub mod bridge;
pub mod exam_text;
pub mod normalize;
pub mod source;
pub mod writer;

pub use bridge::{items_to_exam_text, items_to_questions, CiteField, OptionItem, QuestionItem};
pub use exam_text::{parse_exam, resolve_choice, split_citations};
pub use normalize::{matches_normalized, normalize};
pub use source::{ExamSource, JsonExam};
pub use writer::{format_exam, format_question, EXAM_HEADER};
