pub mod category;
pub mod loaders;
pub mod question;

pub use category::Category;
pub use loaders::{load_question_bank, parse_question_bank};
pub use question::{Question, QuestionBank, QuizOption};
