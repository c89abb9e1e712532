//! 考试会话 - 运行时状态机
//!
//! 每道题的状态：`Unanswered → Answered(selection) → Revealed`；
//! 全局状态：当前题目下标，以及越过最后一题后进入的 `Completed`。
//!
//! 所有操作都是全函数：题号不存在、下标越界、作答类型不符都只是空操作，
//! 返回 `false` 表示状态没有变化。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::{debug, info};

use super::grading::{fits, is_correct, verdict};
use super::report::ExamReport;
use super::view::QuizView;
use crate::models::{AnswerState, AnswerStatus, Question, QuestionKind, Selection};
use crate::parser::{parse_exam, ExamSource};

/// 单选题和判断题的作答策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// 第一次选择后锁定
    #[default]
    LockOnFirstPick,
    /// 揭晓前可以改选
    AllowChange,
}

impl FromStr for SelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "lock_on_first_pick" | "lock" => Ok(SelectionPolicy::LockOnFirstPick),
            "allow_change" | "allow" => Ok(SelectionPolicy::AllowChange),
            other => Err(format!("未知的作答策略: {}", other)),
        }
    }
}

/// 考试会话
///
/// 持有题目列表、每题的作答状态和导航位置。每次加载考试都会丢弃之前的全部状态。
#[derive(Debug, Clone, Default)]
pub struct ExamSession {
    questions: Vec<Question>,
    states: HashMap<u32, AnswerState>,
    current_index: usize,
    completed: bool,
    policy: SelectionPolicy,
}

impl ExamSession {
    /// 创建空会话
    pub fn new(policy: SelectionPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// 从考试来源创建会话
    pub fn from_source(source: ExamSource, policy: SelectionPolicy) -> Self {
        let mut session = Self::new(policy);
        session.load(source);
        session
    }

    // ========== 加载 ==========

    /// 加载考试
    pub fn load(&mut self, source: ExamSource) {
        self.load_questions(source.into_questions());
    }

    /// 加载考试文本
    pub fn load_text(&mut self, text: &str) {
        self.load_questions(parse_exam(text));
    }

    /// 直接加载题目列表
    ///
    /// 题干为空的题目会被丢弃。题目按 id 排序，重复 id 只保留第一道，越界的正确选项下标按无法解析处理。
    pub fn load_questions(&mut self, questions: Vec<Question>) {
        let mut questions: Vec<Question> = questions
            .into_iter()
            .filter(|q| {
                let keep = !q.prompt().trim().is_empty();
                if !keep {
                    debug!("题目 {} 题干为空，跳过", q.id());
                }
                keep
            })
            .map(Question::sanitized)
            .collect();
        questions.sort_by_key(Question::id);
        questions.dedup_by_key(|q| q.id());

        let unresolved = questions.iter().filter(|q| q.is_unresolved()).count();
        info!(
            "✓ 考试加载完成: {} 道题目, {} 道答案无法解析",
            questions.len(),
            unresolved
        );

        self.questions = questions;
        self.states.clear();
        self.current_index = 0;
        self.completed = false;
    }

    // ========== 查询 ==========

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// 按题号查找题目
    pub fn question(&self, question_id: u32) -> Option<&Question> {
        self.questions
            .binary_search_by_key(&question_id, Question::id)
            .ok()
            .map(|index| &self.questions[index])
    }

    pub fn answer_state(&self, question_id: u32) -> Option<&AnswerState> {
        self.states.get(&question_id)
    }

    pub fn status(&self, question_id: u32) -> AnswerStatus {
        self.states
            .get(&question_id)
            .map_or(AnswerStatus::Unanswered, AnswerState::status)
    }

    /// 当前得分：作答正确的题目数量，与是否揭晓无关
    pub fn score(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| {
                self.states
                    .get(&q.id())
                    .and_then(|state| state.selection.as_ref())
                    .is_some_and(|selection| is_correct(q, selection))
            })
            .count()
    }

    /// 只读视图
    pub fn view(&self) -> QuizView<'_> {
        let question = if self.completed {
            None
        } else {
            self.current_question()
        };
        QuizView {
            current_index: self.current_index,
            total: self.total(),
            score: self.score(),
            completed: self.completed,
            question,
            answer_state: question.and_then(|q| self.states.get(&q.id())),
        }
    }

    /// 生成成绩报告
    pub fn report(&self) -> ExamReport {
        ExamReport::from_session(self)
    }

    // ========== 作答 ==========

    /// 作答
    ///
    /// 以下情况为空操作：题号不存在、作答类型与题型不符、选项越界、已揭晓、
    /// 以及 `LockOnFirstPick` 策略下单选题/判断题的第二次选择。简答题在揭晓前总是可以改写。
    pub fn select(&mut self, question_id: u32, selection: Selection) -> bool {
        let Some(question) = self.question(question_id) else {
            debug!("作答被忽略: 题目 {} 不存在", question_id);
            return false;
        };
        if !fits(question, &selection) {
            debug!("作答被忽略: {:?} 不适用于题目 {}", selection, question_id);
            return false;
        }
        let locks = self.policy == SelectionPolicy::LockOnFirstPick
            && question.kind() != QuestionKind::ShortAnswer;

        if let Some(state) = self.states.get(&question_id) {
            if state.revealed
                || (locks && state.selection.is_some())
                || state.selection.as_ref() == Some(&selection)
            {
                return false;
            }
        }

        self.states
            .entry(question_id)
            .or_insert_with(|| AnswerState::new(question_id))
            .selection = Some(selection);
        true
    }

    /// 揭晓答案并计算判定结果，重复调用不改变状态
    pub fn reveal(&mut self, question_id: u32) -> bool {
        let Some(question) = self.question(question_id) else {
            debug!("揭晓被忽略: 题目 {} 不存在", question_id);
            return false;
        };
        let selection = self
            .states
            .get(&question_id)
            .and_then(|state| state.selection.as_ref());
        if self.status(question_id) == AnswerStatus::Revealed {
            return false;
        }
        let result = verdict(question, selection);

        let state = self
            .states
            .entry(question_id)
            .or_insert_with(|| AnswerState::new(question_id));
        state.revealed = true;
        state.verdict = Some(result);
        true
    }

    /// 检查答案，与揭晓相同
    pub fn check(&mut self, question_id: u32) -> bool {
        self.reveal(question_id)
    }

    /// 清除单题状态
    pub fn clear(&mut self, question_id: u32) -> bool {
        self.states.remove(&question_id).is_some()
    }

    /// 清除全部状态并回到第一题
    pub fn reset_all(&mut self) {
        self.states.clear();
        self.current_index = 0;
        self.completed = false;
    }

    // ========== 导航 ==========

    /// 下一题，越过最后一题进入完成状态
    pub fn advance(&mut self) -> bool {
        if self.questions.is_empty() || self.completed {
            return false;
        }
        if self.current_index + 1 >= self.questions.len() {
            self.completed = true;
        } else {
            self.current_index += 1;
        }
        true
    }

    /// 上一题，在完成状态下回到最后一题
    pub fn retreat(&mut self) -> bool {
        if self.questions.is_empty() {
            return false;
        }
        if self.completed {
            self.completed = false;
            return true;
        }
        if self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        true
    }

    /// 跳转到指定下标（从 0 开始），越界时停在最后一题
    pub fn go_to(&mut self, index: usize) -> bool {
        if self.questions.is_empty() {
            return false;
        }
        let target = index.min(self.questions.len() - 1);
        let changed = target != self.current_index || self.completed;
        self.current_index = target;
        self.completed = false;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Verdict;

    const SAMPLE: &str = "## Exam Output
1. MCQ: Pick B.
A. A
B. B
C. C
D. D
Answer: B
Why: test
Cites: Source

2. T/F: This is True.
Answer: True
Why: test
";

    fn session() -> ExamSession {
        ExamSession::from_source(ExamSource::Text(SAMPLE.into()), SelectionPolicy::LockOnFirstPick)
    }

    fn three_kinds(policy: SelectionPolicy) -> ExamSession {
        let mut s = ExamSession::new(policy);
        s.load_questions(vec![
            Question::short_answer(3, "Standard?", "ASTM C1167"),
            Question::mcq(1, "Pick", vec!["a".into(), "b".into(), "c".into()], 2),
            Question::true_false(2, "Really?", false),
        ]);
        s
    }

    #[test]
    fn test_sample_scenario() {
        let mut s = session();
        assert_eq!(s.total(), 2);
        assert!(s.select(1, Selection::Choice(1)));
        assert!(s.reveal(1));
        assert_eq!(s.score(), 1);
        assert_eq!(s.answer_state(1).unwrap().verdict, Some(Verdict::Correct));
    }

    #[test]
    fn test_load_sorts_pre_built_questions() {
        let s = three_kinds(SelectionPolicy::LockOnFirstPick);
        let ids: Vec<u32> = s.questions().iter().map(Question::id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(s.question(3).unwrap().kind(), QuestionKind::ShortAnswer);
        assert!(s.question(9).is_none());
    }

    #[test]
    fn test_load_drops_blank_prompts() {
        let mut s = ExamSession::new(SelectionPolicy::default());
        s.load(ExamSource::Questions(vec![
            Question::true_false(1, "", true),
            Question::short_answer(2, "   ", "TPO"),
            Question::true_false(3, "Is it?", false),
        ]));
        assert_eq!(s.total(), 1);
        assert_eq!(s.questions()[0].id(), 3);
    }

    #[test]
    fn test_lock_on_first_pick() {
        let mut s = three_kinds(SelectionPolicy::LockOnFirstPick);
        assert!(s.select(1, Selection::Choice(0)));
        assert!(!s.select(1, Selection::Choice(2)));
        assert_eq!(s.answer_state(1).unwrap().selection, Some(Selection::Choice(0)));
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_allow_change_policy() {
        let mut s = three_kinds(SelectionPolicy::AllowChange);
        assert!(s.select(1, Selection::Choice(0)));
        assert!(s.select(1, Selection::Choice(2)));
        assert!(!s.select(1, Selection::Choice(2)));
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn test_short_answer_retype_until_revealed() {
        let mut s = three_kinds(SelectionPolicy::LockOnFirstPick);
        assert!(s.select(3, Selection::Text("astm".into())));
        assert!(s.select(3, Selection::Text(" astm c1167 ".into())));
        assert_eq!(s.score(), 1);
        assert!(s.check(3));
        assert!(!s.select(3, Selection::Text("other".into())));
        assert_eq!(s.status(3), AnswerStatus::Revealed);
    }

    #[test]
    fn test_invalid_selections_are_ignored() {
        let mut s = three_kinds(SelectionPolicy::AllowChange);
        assert!(!s.select(42, Selection::Choice(0)));
        assert!(!s.select(1, Selection::Choice(3)));
        assert!(!s.select(2, Selection::Choice(0)));
        assert!(s.answer_state(1).is_none());
        assert!(s.answer_state(2).is_none());
    }

    #[test]
    fn test_reveal_is_idempotent() {
        let mut s = three_kinds(SelectionPolicy::LockOnFirstPick);
        s.select(2, Selection::Bool(true));
        assert!(s.reveal(2));
        let once = s.answer_state(2).cloned();
        assert!(!s.reveal(2));
        assert_eq!(s.answer_state(2).cloned(), once);
        assert_eq!(once.unwrap().verdict, Some(Verdict::Incorrect));
    }

    #[test]
    fn test_reveal_unanswered() {
        let mut s = three_kinds(SelectionPolicy::LockOnFirstPick);
        assert!(s.reveal(1));
        let state = s.answer_state(1).unwrap();
        assert_eq!(state.selection, None);
        assert_eq!(state.verdict, Some(Verdict::Unanswered));
        assert!(!s.select(1, Selection::Choice(2)));
        assert!(!s.reveal(99));
    }

    #[test]
    fn test_score_ignores_reveal() {
        let mut s = three_kinds(SelectionPolicy::LockOnFirstPick);
        s.select(1, Selection::Choice(2));
        s.select(2, Selection::Bool(false));
        assert_eq!(s.score(), 2);
        s.reveal(1);
        assert_eq!(s.score(), 2);
    }

    #[test]
    fn test_clear_single_question() {
        let mut s = three_kinds(SelectionPolicy::LockOnFirstPick);
        s.select(1, Selection::Choice(2));
        s.reveal(1);
        assert!(s.clear(1));
        assert_eq!(s.status(1), AnswerStatus::Unanswered);
        assert!(s.select(1, Selection::Choice(1)));
        assert!(!s.clear(42));
    }

    #[test]
    fn test_reset_all() {
        let mut s = three_kinds(SelectionPolicy::LockOnFirstPick);
        s.select(1, Selection::Choice(2));
        s.select(2, Selection::Bool(false));
        s.advance();
        s.advance();
        s.advance();
        assert!(s.is_completed());

        s.reset_all();
        assert_eq!(s.score(), 0);
        assert_eq!(s.current_index(), 0);
        assert!(!s.is_completed());
        assert_eq!(s.status(1), AnswerStatus::Unanswered);
    }

    #[test]
    fn test_navigation_clamping() {
        let mut s = three_kinds(SelectionPolicy::LockOnFirstPick);
        assert!(!s.retreat());
        assert_eq!(s.current_index(), 0);

        assert!(s.advance());
        assert!(s.advance());
        assert_eq!(s.current_index(), 2);
        assert!(s.advance());
        assert!(s.is_completed());
        assert_eq!(s.current_index(), 2);
        assert!(!s.advance());
        assert!(s.view().question.is_none());

        assert!(s.retreat());
        assert!(!s.is_completed());
        assert_eq!(s.current_index(), 2);
    }

    #[test]
    fn test_go_to() {
        let mut s = three_kinds(SelectionPolicy::LockOnFirstPick);
        assert!(s.go_to(1));
        assert_eq!(s.current_question().unwrap().id(), 2);
        assert!(!s.go_to(1));
        assert!(s.go_to(100));
        assert_eq!(s.current_index(), 2);
    }

    #[test]
    fn test_empty_exam_is_total() {
        let mut s = ExamSession::new(SelectionPolicy::default());
        s.load_text("no questions here");
        assert_eq!(s.total(), 0);
        assert!(!s.advance());
        assert!(!s.retreat());
        assert!(!s.go_to(3));
        assert!(!s.select(1, Selection::Bool(true)));
        assert!(!s.reveal(1));
        let view = s.view();
        assert!(view.is_empty());
        assert_eq!(view.score, 0);
        assert!(view.question.is_none());
    }

    #[test]
    fn test_loading_discards_state() {
        let mut s = session();
        s.select(1, Selection::Choice(1));
        s.advance();
        s.load_text(SAMPLE);
        assert_eq!(s.score(), 0);
        assert_eq!(s.current_index(), 0);
        assert!(s.answer_state(1).is_none());
    }

    #[test]
    fn test_selection_policy_from_str() {
        assert_eq!(
            "allow-change".parse::<SelectionPolicy>(),
            Ok(SelectionPolicy::AllowChange)
        );
        assert_eq!(
            "LOCK".parse::<SelectionPolicy>(),
            Ok(SelectionPolicy::LockOnFirstPick)
        );
        assert!("sometimes".parse::<SelectionPolicy>().is_err());
    }
}
