mod generate;
mod mark;
mod translate;

pub use generate::GenerateSpec;
pub use mark::Mark;
pub use translate::AnswerToInput;
