//! 考试文本解析
//!
//! 把 `## Exam Output` 格式的半结构化文本解析为按 id 排序的题目列表。
//!
//! 文本来自 LLM 或静态资源，格式并不可靠，所以解析过程只降级、不报错：
//! 无法识别的题目块直接丢弃，完全无法解析的输入得到空列表。

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

use super::normalize::matches_normalized;
use crate::models::question::choice_index;
use crate::models::{Question, QuestionKind};

/// 题目块起始行：`<整数>. `
static BLOCK_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\.\s").expect("静态正则表达式无效"));

/// 题目块首行：`<整数>. <题型>: <题干>`
static BLOCK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\.\s*([^:]+?)\s*:\s*(.*)$").expect("静态正则表达式无效")
});

/// 选项行：`A. <文本>` ~ `D. <文本>`
static CHOICE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*([a-d])\.\s*(.*)$").expect("静态正则表达式无效"));

/// 字段行：`Answer:` / `Why:` / `Cites:`
static FIELD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(answer|why|cites?)\s*:\s*(.*)$").expect("静态正则表达式无效")
});

/// 单字母答案：`B`、`b.`、`C)`
static LETTER_ANSWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([a-d])\s*[.)]?$").expect("静态正则表达式无效"));

/// 解析考试文本
///
/// # 参数
/// - `text`: 原始考试文本，可带 `## Exam Output` 标题行
///
/// # 返回
/// 按 id 升序排列的题目列表，可能为空。重复 id 只保留第一道。
pub fn parse_exam(text: &str) -> Vec<Question> {
    let lines: Vec<&str> = text.lines().collect();
    let body = &lines[header_end(&lines)..];

    let mut questions: Vec<Question> = split_blocks(body)
        .into_iter()
        .filter_map(parse_block)
        .collect();

    let parsed = questions.len();
    questions.sort_by_key(Question::id);
    questions.dedup_by_key(|q| q.id());
    if questions.len() < parsed {
        warn!(
            "考试文本中存在重复题号，已丢弃 {} 道重复题目",
            parsed - questions.len()
        );
    }

    debug!("考试文本解析完成，共 {} 道题目", questions.len());
    questions
}

/// 拆分出处字段，分隔符为 `,` `;` `|`
pub fn split_citations(raw: &str) -> Vec<String> {
    raw.split([',', ';', '|'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// 解析单选题答案
///
/// 先按单字母（A-D）解析，再按规范化文本匹配选项。都失败时返回 `None`。
pub fn resolve_choice(answer: &str, choices: &[String]) -> Option<usize> {
    let answer = answer.trim();

    if let Some(caps) = LETTER_ANSWER.captures(answer) {
        let index = caps[1].chars().next().and_then(choice_index);
        if let Some(index) = index.filter(|i| *i < choices.len()) {
            return Some(index);
        }
    }

    choices
        .iter()
        .position(|choice| matches_normalized(answer, choice))
}

/// 标题行之后正文开始的行号
fn header_end(lines: &[&str]) -> usize {
    match lines.iter().position(|line| !line.trim().is_empty()) {
        Some(first) if lines[first].trim_start().starts_with('#') => first + 1,
        _ => 0,
    }
}

/// 按题目块起始行切分
///
/// 题干中夹带的编号列表也会被当作新题目块，这是已知的局限。
fn split_blocks<'a>(lines: &'a [&'a str]) -> Vec<&'a [&'a str]> {
    let mut blocks = Vec::new();
    let mut start: Option<usize> = None;

    for (i, line) in lines.iter().enumerate() {
        if BLOCK_START.is_match(line) {
            if let Some(s) = start {
                blocks.push(&lines[s..i]);
            }
            start = Some(i);
        }
    }
    if let Some(s) = start {
        blocks.push(&lines[s..]);
    }

    blocks
}

/// 题目块中识别出的字段
#[derive(Debug, Default)]
struct BlockFields {
    choices: Vec<String>,
    answer: Option<String>,
    why: Option<String>,
    cites: Option<String>,
}

impl BlockFields {
    fn collect(lines: &[&str]) -> Self {
        let mut fields = Self::default();
        for line in lines {
            if let Some(caps) = FIELD_LINE.captures(line) {
                let value = caps[2].trim().to_string();
                let slot = match caps[1].to_lowercase().as_str() {
                    "answer" => &mut fields.answer,
                    "why" => &mut fields.why,
                    _ => &mut fields.cites,
                };
                if slot.is_none() {
                    *slot = Some(value);
                }
            } else if let Some(caps) = CHOICE_LINE.captures(line) {
                fields.choices.push(caps[2].trim().to_string());
            }
        }
        fields
    }
}

fn parse_block(lines: &[&str]) -> Option<Question> {
    let (first, rest) = lines.split_first()?;

    let Some(caps) = BLOCK_HEADER.captures(first) else {
        debug!("跳过无法识别的题目块: {}", first.trim());
        return None;
    };
    let id: u32 = caps[1].parse().ok()?;
    let Some(kind) = QuestionKind::from_label(&caps[2]) else {
        debug!("题目 {} 的题型 '{}' 无法识别，跳过", id, &caps[2]);
        return None;
    };
    let prompt = caps[3].trim();
    if prompt.is_empty() {
        debug!("题目 {} 题干为空，跳过", id);
        return None;
    }

    let fields = BlockFields::collect(rest);
    let answer = fields.answer.as_deref().unwrap_or("");

    let question = match kind {
        QuestionKind::Mcq => match resolve_choice(answer, &fields.choices) {
            Some(index) => Question::mcq(id, prompt, fields.choices, index),
            None => {
                warn!(
                    "题目 {} 的答案 '{}' 无法匹配任何选项，默认选择第一个选项",
                    id, answer
                );
                Question::mcq_unresolved(id, prompt, fields.choices)
            }
        },
        QuestionKind::TrueFalse => {
            Question::true_false(id, prompt, answer.eq_ignore_ascii_case("true"))
        }
        QuestionKind::ShortAnswer => Question::short_answer(id, prompt, answer),
    };

    Some(
        question
            .with_explanation(fields.why.unwrap_or_default())
            .with_citations(fields.cites.as_deref().map(split_citations).unwrap_or_default()),
    )
}
