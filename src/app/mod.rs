//! 终端考试程序
//!
//! 加载考试文件，从输入逐行读取命令驱动会话，结束后输出统计、成绩报告和警告文件。

pub mod command;

pub use command::{Command, HELP};

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{load_exam_file, Question, Selection};
use crate::render::{Renderer, TextRenderer};
use crate::runtime::{ExamController, ExamReport, ExamSession};
use crate::services::WarnWriter;
use crate::utils::logging::{
    append_final_stats, init_log_file, log_exam_loaded, log_startup, print_final_stats,
};

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 从标准输入读取命令，渲染到标准输出
    pub async fn run(&self) -> Result<ExamReport> {
        self.run_with(BufReader::new(tokio::io::stdin()), std::io::stdout())
            .await
    }

    /// 使用指定的输入输出运行一场考试
    ///
    /// # 参数
    /// - `input`: 命令输入，每行一条命令，读到结尾或 `quit` 时结束
    /// - `out`: 渲染输出
    ///
    /// # 返回
    /// 返回本场考试的成绩报告
    pub async fn run_with<I, W>(&self, input: I, out: W) -> Result<ExamReport>
    where
        I: AsyncBufRead + Unpin,
        W: Write,
    {
        log_startup(&self.config);
        if let Some(log_file) = &self.config.output_log_file {
            init_log_file(log_file, &self.config.exam_path)?;
        }

        let source = load_exam_file(Path::new(&self.config.exam_path))
            .await
            .with_context(|| format!("无法加载考试: {}", self.config.exam_path))?;
        let session = ExamSession::from_source(source, self.config.selection_policy);
        log_exam_loaded(
            session.total(),
            session.questions().iter().filter(|q| q.is_unresolved()).count(),
            session.questions().first().map(Question::prompt),
        );

        let mut controller = ExamController::new(session, TextRenderer::new(out));
        controller.notice(HELP)?;
        controller.render()?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => {
                    debug!("执行命令: {:?}", command);
                    apply(&mut controller, command)?;
                }
                Err(message) => controller.notice(&message)?,
            }
        }

        let (session, _) = controller.into_parts();
        let report = session.report();
        self.finish(&session, &report).await?;
        Ok(report)
    }

    /// 输出报告、警告文件和统计信息
    async fn finish(&self, session: &ExamSession, report: &ExamReport) -> Result<()> {
        if let Some(report_path) = &self.config.report_path {
            report.write_to(Path::new(report_path)).await?;
        }

        let exam_name = Path::new(&self.config.exam_path)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.config.exam_path.clone());
        let written = WarnWriter::with_path(&self.config.warn_file_path)
            .write_unresolved(&exam_name, session.questions())
            .await?;
        if written > 0 {
            info!(
                "⚠️ {} 道答案无法解析的题目已写入 {}",
                written, self.config.warn_file_path
            );
        }

        print_final_stats(report);
        if let Some(log_file) = &self.config.output_log_file {
            append_final_stats(log_file, report)?;
        }
        Ok(())
    }
}

/// 把命令作用到当前题目上
fn apply<R: Renderer>(controller: &mut ExamController<R>, command: Command) -> AppResult<()> {
    let current = controller.session().view().question.map(Question::id);

    match command {
        Command::Choose(index) => select(controller, current, Selection::Choice(index)),
        Command::Judge(value) => select(controller, current, Selection::Bool(value)),
        Command::Type(text) => select(controller, current, Selection::Text(text)),
        Command::Reveal => match current {
            Some(id) => controller.reveal(id).map(drop),
            None => controller.notice("no current question"),
        },
        Command::Clear => match current {
            Some(id) => controller.clear(id).map(drop),
            None => controller.notice("no current question"),
        },
        Command::Reset => controller.reset_all(),
        Command::Next => controller.advance().map(drop),
        Command::Prev => controller.retreat().map(drop),
        Command::GoTo(index) => controller.go_to(index).map(drop),
        Command::Show => controller.render(),
        Command::Help => controller.notice(HELP),
        Command::Quit => Ok(()),
    }
}

fn select<R: Renderer>(
    controller: &mut ExamController<R>,
    current: Option<u32>,
    selection: Selection,
) -> AppResult<()> {
    let Some(id) = current else {
        return controller.notice("no current question");
    };
    if !controller.select(id, selection)? {
        controller.notice("selection ignored")?;
    }
    Ok(())
}
