pub mod api;
pub mod entities;
pub mod error;
pub mod repository;

pub fn default_timestamp() -> i64 {
    chrono::Utc::now().timestamp_micros()
}
