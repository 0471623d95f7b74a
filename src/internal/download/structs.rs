pub mod download_error;
pub mod download_outcome;
pub mod download_request;
pub mod download_task;
pub mod listener_adapters;
pub mod sign;

// 重导出公共类型
pub use download_error::DownloadError;
pub use download_outcome::DownloadOutcome;
pub use download_request::DownloadRequest;
pub use download_task::DownloadTask;
pub use listener_adapters::{FnListener, listener_fn};
pub use sign::Sign;
