//! 下载钩子：在「开始前 / 每块数据 / 进度 / 完成后」插入自定义逻辑。

use async_trait::async_trait;

use crate::internal::remote_file::downloader::structs::download_progress::DownloadProgress;

/// 钩子执行时请求中止下载时使用的错误。
#[derive(Debug, Clone)]
pub struct HookAbort;

impl std::fmt::Display for HookAbort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("下载被钩子中止")
    }
}

impl std::error::Error for HookAbort {}

/// 下载流程钩子
///
/// 使用方式二选一（可混用）：
/// - **单阶段**：用 `with_before_start_hook` / `with_on_progress_hook` 传入闭包；
/// - **完整钩子**：实现本 trait，通过下载器的 `with_hook` 注册。
#[async_trait]
pub trait DownloadHook: Send + Sync {
    /// 发出请求前调用（如：校验路径、申请配额）。返回 `Err` 则中止本次下载。
    async fn before_start(&mut self) -> Result<(), HookAbort> {
        Ok(())
    }

    /// 每收到一段数据时调用。`chunk` 为本段字节。
    fn on_chunk(&mut self, _chunk: &[u8]) {}

    /// 进度更新，每写入一段数据后调用一次。
    fn on_progress(&mut self, _progress: &DownloadProgress) {}

    /// 下载成功结束后调用；失败时不会调用。
    async fn after_complete(&mut self) {}
}
