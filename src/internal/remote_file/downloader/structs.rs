pub mod download_hooks_container;
pub mod download_mode;
pub mod download_progress;
pub mod download_result;
mod hook_adapters;
pub mod remote_downloader;
mod single_download;

// 重导出公共类型
pub use download_mode::DownloadMode;
pub use download_progress::DownloadProgress;
pub use download_result::DownloadResult;
pub use remote_downloader::RemoteDownloader;
