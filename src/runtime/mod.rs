//! 运行时层
//!
//! ## 模块划分
//!
//! - `session` - 考试会话状态机（作答、揭晓、清除、导航、计分）
//! - `grading` - 判分规则
//! - `view` - 提供给渲染层的只读视图
//! - `controller` - 会话 + 渲染器，每次状态转换后重绘
//! - `report` - 成绩报告
//!
//! ## 层次关系
//!
//! ```text
//! controller (会话 + 渲染器)
//!     ↓
//! session (状态机，纯内存)
//!     ↓
//! grading (判分) / parser (加载)
//!     ↓
//! models (Question / AnswerState)
//! ```

pub mod controller;
pub mod grading;
pub mod report;
pub mod session;
pub mod view;

pub use controller::ExamController;
pub use report::{ExamReport, QuestionOutcome};
pub use session::{ExamSession, SelectionPolicy};
pub use view::QuizView;
