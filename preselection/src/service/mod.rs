pub mod issue;
pub mod submission;
