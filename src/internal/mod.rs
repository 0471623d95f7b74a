pub mod dispatch;
pub mod download;
pub mod states;
