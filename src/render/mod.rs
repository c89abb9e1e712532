//! 视图渲染层
//!
//! 渲染器只负责把 [`QuizView`] 画出来，每次都整体重绘，不保留任何状态判断逻辑。

pub mod text;

pub use text::TextRenderer;

use crate::error::AppResult;
use crate::runtime::QuizView;

/// 渲染器
pub trait Renderer {
    /// 整体重绘当前视图
    fn render(&mut self, view: &QuizView<'_>) -> AppResult<()>;

    /// 输出一条提示（帮助、无效命令等），默认忽略
    fn notice(&mut self, _message: &str) -> AppResult<()> {
        Ok(())
    }
}
