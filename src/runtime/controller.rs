//! 会话控制器
//!
//! 把会话和渲染器绑在一起：每次状态转换之后整体重绘一次。
//! 会话本身不知道渲染器的存在，可以脱离任何界面单独使用。

use super::session::ExamSession;
use crate::error::AppResult;
use crate::models::Selection;
use crate::parser::ExamSource;
use crate::render::Renderer;

/// 会话控制器
pub struct ExamController<R: Renderer> {
    session: ExamSession,
    renderer: R,
}

impl<R: Renderer> ExamController<R> {
    pub fn new(session: ExamSession, renderer: R) -> Self {
        Self { session, renderer }
    }

    pub fn session(&self) -> &ExamSession {
        &self.session
    }

    pub fn into_parts(self) -> (ExamSession, R) {
        (self.session, self.renderer)
    }

    /// 重绘当前视图
    pub fn render(&mut self) -> AppResult<()> {
        self.renderer.render(&self.session.view())
    }

    /// 输出提示，不改变状态
    pub fn notice(&mut self, message: &str) -> AppResult<()> {
        self.renderer.notice(message)
    }

    pub fn load(&mut self, source: ExamSource) -> AppResult<()> {
        self.session.load(source);
        self.render()
    }

    pub fn select(&mut self, question_id: u32, selection: Selection) -> AppResult<bool> {
        let changed = self.session.select(question_id, selection);
        self.render()?;
        Ok(changed)
    }

    pub fn reveal(&mut self, question_id: u32) -> AppResult<bool> {
        let changed = self.session.reveal(question_id);
        self.render()?;
        Ok(changed)
    }

    pub fn clear(&mut self, question_id: u32) -> AppResult<bool> {
        let changed = self.session.clear(question_id);
        self.render()?;
        Ok(changed)
    }

    pub fn reset_all(&mut self) -> AppResult<()> {
        self.session.reset_all();
        self.render()
    }

    pub fn advance(&mut self) -> AppResult<bool> {
        let changed = self.session.advance();
        self.render()?;
        Ok(changed)
    }

    pub fn retreat(&mut self) -> AppResult<bool> {
        let changed = self.session.retreat();
        self.render()?;
        Ok(changed)
    }

    pub fn go_to(&mut self, index: usize) -> AppResult<bool> {
        let changed = self.session.go_to(index);
        self.render()?;
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{QuizView, SelectionPolicy};

    /// 记录每次渲染时的 (下标, 得分, 是否完成)
    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<(usize, usize, bool)>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, view: &QuizView<'_>) -> AppResult<()> {
            self.frames.push((view.current_index, view.score, view.completed));
            Ok(())
        }
    }

    #[test]
    fn test_every_transition_renders() {
        let mut controller = ExamController::new(
            ExamSession::new(SelectionPolicy::LockOnFirstPick),
            RecordingRenderer::default(),
        );
        controller
            .load(ExamSource::Text(
                "1. MCQ: p\nA. x\nB. y\nAnswer: B\n2. TF: q\nAnswer: true\n".into(),
            ))
            .unwrap();
        assert!(controller.select(1, Selection::Choice(1)).unwrap());
        assert!(controller.reveal(1).unwrap());
        assert!(controller.advance().unwrap());
        assert!(controller.advance().unwrap());
        assert!(!controller.select(42, Selection::Bool(true)).unwrap());
        controller.reset_all().unwrap();

        let (session, renderer) = controller.into_parts();
        assert_eq!(session.score(), 0);
        assert_eq!(
            renderer.frames,
            vec![
                (0, 0, false),
                (0, 1, false),
                (0, 1, false),
                (1, 1, false),
                (1, 1, true),
                (1, 1, true),
                (0, 0, false),
            ]
        );
    }
}
