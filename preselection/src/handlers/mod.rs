pub mod issue;
pub mod ping;
pub mod submission;
