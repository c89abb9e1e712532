use crate::error::{AppError, AppResult};
use crate::parser::{ExamSource, JsonExam};
use std::path::Path;
use tokio::fs;

/// 从文件加载考试
///
/// `.json` 文件按题目列表或上游题目项列表解析，其余文件按考试文本处理。
pub async fn load_exam_file(path: &Path) -> AppResult<ExamSource> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let is_json = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let source = if is_json {
        let exam: JsonExam = serde_json::from_str(&content)?;
        ExamSource::from(exam)
    } else {
        ExamSource::Text(content)
    };

    tracing::info!(
        "正在加载考试: {}",
        path.file_name().unwrap_or_default().to_string_lossy()
    );

    Ok(source)
}
