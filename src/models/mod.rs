pub mod answer;
pub mod exam;
pub mod loaders;
pub mod question;
pub mod result;

pub use answer::{AnswerRecord, AnswerValue};
pub use exam::{AllowedActions, ExamDefinition, ExamInstance, InstanceStatus, InstanceStatusSummary};
pub use loaders::{load_answer_sheet, AnswerSheet, SheetEntry};
pub use question::{ChoiceOption, Question, QuestionKind};
pub use result::{ExamResult, GradingDetail};
