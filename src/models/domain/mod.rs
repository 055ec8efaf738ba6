pub mod answer;
pub mod grade_report;
pub mod question;
pub mod quiz;
pub mod quiz_result;
pub mod user;
pub use answer::AnswerEntry;
pub use grade_report::{GradeReport, GradingDetail};
pub use question::{Question, QuestionType};
pub use quiz::{Quiz, QuizDefinition};
pub use quiz_result::QuizResult;
pub use user::UserRole;
