//! 警告写入服务
//!
//! 只负责把答案无法解析的单选题追加写入 warn.txt，方便人工核对出题结果

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::Question;
use crate::utils::logging::truncate_text;

/// 警告写入服务
pub struct WarnWriter {
    warn_file_path: String,
}

impl WarnWriter {
    /// 使用指定文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            warn_file_path: path.into(),
        }
    }

    /// 写入答案无法解析的题目
    ///
    /// # 参数
    /// - `exam_name`: 考试文件名
    /// - `questions`: 考试的全部题目，只有无法解析的会被写入
    ///
    /// # 返回
    /// 返回写入的题目数量，为 0 时不会创建文件
    pub async fn write_unresolved(&self, exam_name: &str, questions: &[Question]) -> AppResult<usize> {
        let unresolved: Vec<&Question> = questions.iter().filter(|q| q.is_unresolved()).collect();
        if unresolved.is_empty() {
            return Ok(0);
        }

        let mut warn_msg = String::new();
        for question in &unresolved {
            debug!(
                "写入警告: 考试 {} | 题目 {} | 题干: {}",
                exam_name,
                question.id(),
                truncate_text(question.prompt(), 40)
            );
            warn_msg.push_str(&format!(
                "考试 {} | 题目 {} | 答案无法匹配选项 | 题干: {}\n",
                exam_name,
                question.id(),
                question.prompt()
            ));
        }

        let write_failed = |e| AppError::file_write_failed(self.warn_file_path.clone(), e);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.warn_file_path)
            .await
            .map_err(write_failed)?;
        file.write_all(warn_msg.as_bytes())
            .await
            .map_err(write_failed)?;
        file.flush().await.map_err(write_failed)?;

        Ok(unresolved.len())
    }
}
