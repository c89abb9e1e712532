//! 文本规范化
//!
//! 单选题文本答案匹配和简答题判分共用同一套规则：
//! 转小写，每段连续的非字母数字字符替换为一个空格，去掉首尾空白。

use regex::Regex;
use std::sync::LazyLock;

static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("静态正则表达式无效"));

/// 规范化文本
pub fn normalize(text: &str) -> String {
    NON_ALNUM
        .replace_all(&text.to_lowercase(), " ")
        .trim()
        .to_string()
}

/// 两段文本规范化后是否相等
///
/// 任意一方规范化后为空时视为不相等。
pub fn matches_normalized(a: &str, b: &str) -> bool {
    let a = normalize(a);
    !a.is_empty() && a == normalize(b)
}
