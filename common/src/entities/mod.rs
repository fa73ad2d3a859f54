pub mod issue;
pub mod publication;
pub mod role;
pub mod stage_assignment;
pub mod submission;
pub mod user;
pub mod user_group;
