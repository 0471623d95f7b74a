pub mod downloader;
pub mod listener;

pub use downloader::Downloader;
pub use listener::DownloadListener;
