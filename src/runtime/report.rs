//! 成绩报告

use serde::Serialize;
use std::path::Path;
use tokio::fs;
use tracing::info;

use super::grading::is_correct;
use super::session::ExamSession;
use crate::error::{AppError, AppResult};
use crate::models::{AnswerStatus, QuestionKind, Selection};

/// 单题结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionOutcome {
    pub id: u32,
    pub kind: QuestionKind,
    pub status: AnswerStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<Selection>,
    pub correct: bool,
    /// 标准答案为解析器兜底猜测，判分不可靠
    pub unresolved: bool,
}

/// 整场考试的成绩报告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamReport {
    pub generated_at: String,
    pub total: usize,
    pub answered: usize,
    pub revealed: usize,
    pub score: usize,
    pub percentage: f64,
    pub outcomes: Vec<QuestionOutcome>,
}

impl ExamReport {
    pub fn from_session(session: &ExamSession) -> Self {
        let outcomes: Vec<QuestionOutcome> = session
            .questions()
            .iter()
            .map(|q| {
                let selection = session
                    .answer_state(q.id())
                    .and_then(|state| state.selection.clone());
                QuestionOutcome {
                    id: q.id(),
                    kind: q.kind(),
                    status: session.status(q.id()),
                    correct: selection.as_ref().is_some_and(|s| is_correct(q, s)),
                    selection,
                    unresolved: q.is_unresolved(),
                }
            })
            .collect();

        let total = outcomes.len();
        let score = outcomes.iter().filter(|o| o.correct).count();
        let percentage = if total == 0 {
            0.0
        } else {
            score as f64 * 100.0 / total as f64
        };

        Self {
            generated_at: chrono::Local::now().to_rfc3339(),
            total,
            answered: outcomes.iter().filter(|o| o.selection.is_some()).count(),
            revealed: outcomes
                .iter()
                .filter(|o| o.status == AnswerStatus::Revealed)
                .count(),
            score,
            percentage,
            outcomes,
        }
    }

    /// 答案无法解析的题号
    pub fn unresolved_ids(&self) -> Vec<u32> {
        self.outcomes
            .iter()
            .filter(|o| o.unresolved)
            .map(|o| o.id)
            .collect()
    }

    pub fn to_json_pretty(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 写入 JSON 报告文件
    pub async fn write_to(&self, path: &Path) -> AppResult<()> {
        let json = self.to_json_pretty()?;
        fs::write(path, json)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;
        info!("✓ 成绩报告已保存至: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Question;
    use crate::runtime::SelectionPolicy;

    fn session() -> ExamSession {
        let mut s = ExamSession::new(SelectionPolicy::LockOnFirstPick);
        s.load_questions(vec![
            Question::mcq(1, "p", vec!["a".into(), "b".into()], 1),
            Question::mcq_unresolved(2, "q", vec!["x".into()]),
            Question::true_false(3, "r", true),
            Question::short_answer(4, "s", "EPDM"),
        ]);
        s
    }

    #[test]
    fn test_report_counts() {
        let mut s = session();
        s.select(1, Selection::Choice(1));
        s.select(3, Selection::Bool(false));
        s.reveal(3);
        s.reveal(4);

        let report = s.report();
        assert_eq!(report.total, 4);
        assert_eq!(report.answered, 2);
        assert_eq!(report.revealed, 2);
        assert_eq!(report.score, 1);
        assert_eq!(report.percentage, 25.0);
        assert_eq!(report.unresolved_ids(), vec![2]);
        assert_eq!(report.score, s.score());
    }

    #[test]
    fn test_empty_report() {
        let s = ExamSession::new(SelectionPolicy::default());
        let report = s.report();
        assert_eq!(report.total, 0);
        assert_eq!(report.percentage, 0.0);
    }

    #[test]
    fn test_report_json() {
        let mut s = session();
        s.select(4, Selection::Text("epdm".into()));
        let json: serde_json::Value =
            serde_json::from_str(&s.report().to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["score"], 1);
        assert_eq!(json["outcomes"][3]["selection"]["type"], "Text");
        assert_eq!(json["outcomes"][3]["status"], "Answered");
        assert!(json["outcomes"][0].get("selection").is_none());
    }

    #[test]
    fn test_write_report() {
        let path = std::env::temp_dir().join(format!("roofvault-report-{}.json", std::process::id()));
        tokio_test::block_on(session().report().write_to(&path)).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"total\": 4"));
        std::fs::remove_file(path).unwrap();
    }
}
