//! 终端命令解析

use std::str::FromStr;

use crate::models::question::choice_index;

/// 终端命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 选择单选题选项（下标从 0 开始）
    Choose(usize),
    /// 判断题作答
    Judge(bool),
    /// 简答题输入
    Type(String),
    Reveal,
    Clear,
    Reset,
    Next,
    Prev,
    /// 跳转到指定下标（从 0 开始）
    GoTo(usize),
    Show,
    Help,
    Quit,
}

/// 帮助文本
pub const HELP: &str = "commands: a-d (choose) | t/f (true/false) | type <text> | check | reveal | clear | reset | next | prev | goto <n> | show | help | quit";

impl FromStr for Command {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let (head, rest) = match input.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (input, ""),
        };

        let command = match head.to_lowercase().as_str() {
            "t" | "true" => Command::Judge(true),
            "f" | "false" => Command::Judge(false),
            "type" | "answer" if !rest.is_empty() => Command::Type(rest.to_string()),
            "check" | "reveal" | "r" => Command::Reveal,
            "clear" | "x" => Command::Clear,
            "reset" => Command::Reset,
            "next" | "n" => Command::Next,
            "prev" | "p" | "back" => Command::Prev,
            "goto" | "g" => match rest.parse::<usize>() {
                Ok(n) if n > 0 => Command::GoTo(n - 1),
                _ => return Err(format!("invalid question number: '{}'", rest)),
            },
            "show" | "s" => Command::Show,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            letter if letter.chars().count() == 1 => {
                match letter.chars().next().and_then(choice_index) {
                    Some(index) => Command::Choose(index),
                    None => return Err(format!("unknown command: '{}'", input)),
                }
            }
            _ => return Err(format!("unknown command: '{}'", input)),
        };
        Ok(command)
    }
}
