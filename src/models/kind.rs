//! 题型定义
//!
//! 题型标签来自 LLM 生成的文本，写法并不统一（`T/F`、`True / False`、`Short  Answer` 等），
//! 这里用一张静态别名表把它们收敛成三种题型。

use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 题型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    /// 单选题
    Mcq,
    /// 判断题
    TrueFalse,
    /// 简答题
    ShortAnswer,
}

/// 题型别名表（键为规范化后的标签）
static KIND_ALIASES: phf::Map<&'static str, QuestionKind> = phf_map! {
    "mcq" => QuestionKind::Mcq,
    "t/f" => QuestionKind::TrueFalse,
    "tf" => QuestionKind::TrueFalse,
    "true/false" => QuestionKind::TrueFalse,
    "short answer" => QuestionKind::ShortAnswer,
    "shortanswer" => QuestionKind::ShortAnswer,
};

impl QuestionKind {
    /// 从题型标签解析题型
    ///
    /// 大小写不敏感，`/` 两侧的空白会被去掉，其余连续空白折叠为一个空格。
    /// 无法识别时返回 `None`。
    pub fn from_label(label: &str) -> Option<Self> {
        let collapsed = label
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
            .replace(" / ", "/")
            .replace(" /", "/")
            .replace("/ ", "/");
        KIND_ALIASES.get(collapsed.as_str()).copied()
    }

    /// 题型在考试文本中的标准标签
    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::Mcq => "MCQ",
            QuestionKind::TrueFalse => "T/F",
            QuestionKind::ShortAnswer => "Short Answer",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_aliases() {
        assert_eq!(QuestionKind::from_label("MCQ"), Some(QuestionKind::Mcq));
        assert_eq!(QuestionKind::from_label("mcq"), Some(QuestionKind::Mcq));
        assert_eq!(QuestionKind::from_label("T/F"), Some(QuestionKind::TrueFalse));
        assert_eq!(QuestionKind::from_label("tf"), Some(QuestionKind::TrueFalse));
        assert_eq!(
            QuestionKind::from_label("True / False"),
            Some(QuestionKind::TrueFalse)
        );
        assert_eq!(
            QuestionKind::from_label("Short   Answer"),
            Some(QuestionKind::ShortAnswer)
        );
        assert_eq!(
            QuestionKind::from_label("ShortAnswer"),
            Some(QuestionKind::ShortAnswer)
        );
    }

    #[test]
    fn test_from_label_unknown() {
        assert_eq!(QuestionKind::from_label("Essay"), None);
        assert_eq!(QuestionKind::from_label(""), None);
    }

    #[test]
    fn test_label_round_trips_through_alias_table() {
        for kind in [
            QuestionKind::Mcq,
            QuestionKind::TrueFalse,
            QuestionKind::ShortAnswer,
        ] {
            assert_eq!(QuestionKind::from_label(kind.label()), Some(kind));
        }
    }
}
