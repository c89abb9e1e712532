pub mod answer;
pub mod kind;
pub mod loaders;
pub mod question;

pub use answer::{AnswerState, AnswerStatus, Selection, Verdict};
pub use kind::QuestionKind;
pub use loaders::load_exam_file;
pub use question::{AnswerKey, Question};
