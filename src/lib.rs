//! # RoofVault Exam
//!
//! RoofVault 屋面与防水学习工具的交互式考试引擎
//!
//! ## 架构设计
//!
//! ### ① 模型层（Models）
//! - `models/` - `Question`（按题型区分的不可变题目）与 `AnswerState`（作答状态）
//! - `models/loaders` - 从文件加载考试文本或 JSON 题目
//!
//! ### ② 解析层（Parser）
//! - `parser/` - 考试文本 → 题目列表，只降级、不报错
//! - `bridge` - 上游结构化题目项 → 题目列表
//!
//! ### ③ 运行时层（Runtime）
//! - `ExamSession` - 纯内存状态机：作答、揭晓、清除、重置、导航、计分
//! - `ExamController` - 每次状态转换后驱动渲染器重绘
//!
//! ### ④ 渲染层与程序入口（Render / App）
//! - `render/` - 可替换的渲染器，`TextRenderer` 输出纯文本
//! - `app/` - 终端考试程序
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod render;
pub mod runtime;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{AnswerKey, AnswerState, AnswerStatus, Question, QuestionKind, Selection, Verdict};
pub use parser::{parse_exam, ExamSource, QuestionItem};
pub use render::{Renderer, TextRenderer};
pub use runtime::{ExamController, ExamReport, ExamSession, QuizView, SelectionPolicy};
