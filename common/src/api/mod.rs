pub mod form;
pub mod hook;
pub mod schema;
