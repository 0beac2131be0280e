use std::future::Future;
use std::path::Path;

use crate::error::WebDavError;
use crate::internal::webdav::remote_path::RemotePath;
use crate::internal::webdav::transport::Transport;

use super::download_hooks_container::DownloadHooksContainer;
use super::download_mode::DownloadMode;
use super::download_progress::DownloadProgress;
use super::download_result::DownloadResult;
use super::hook_adapters::{BeforeStartHookAdapter, OnProgressHookAdapter};
use super::single_download::run_single_download;
use crate::internal::remote_file::downloader::traits::download::{DownloadHook, HookAbort};

/// 远程文件下载器
///
/// 用法：`client.download("a/b.txt")?.save_to("b.txt").with_hook(hook).send().await`
///
/// 不实现Clone，`send` 会消耗下载器，一个下载器只下载一次。
pub struct RemoteDownloader {
    transport: Transport,
    path: RemotePath,
    mode: DownloadMode,
    hooks: DownloadHooksContainer,
}

impl std::fmt::Debug for RemoteDownloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteDownloader")
            .field("path", &self.path.as_normalized())
            .field("mode", &self.mode)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl RemoteDownloader {
    pub(crate) fn new(transport: Transport, path: RemotePath) -> Self {
        Self {
            transport,
            path,
            mode: DownloadMode::OutputBytes,
            hooks: DownloadHooksContainer::default(),
        }
    }

    /// 设置保存路径，内容流式写入，不会整体读进内存
    pub fn save_to(mut self, save_path: impl AsRef<Path>) -> Self {
        self.mode = DownloadMode::SaveFile(save_path.as_ref().to_path_buf());
        self
    }

    /// 设置输出到内存（默认）
    pub fn output_bytes(mut self) -> Self {
        self.mode = DownloadMode::OutputBytes;
        self
    }

    /// 注册完整钩子，可多次调用
    pub fn with_hook(mut self, hook: impl DownloadHook + 'static) -> Self {
        self.hooks.add(hook);
        self
    }

    pub fn with_before_start_hook<F, Fut>(mut self, f: F) -> Self
    where
        F: FnMut() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HookAbort>> + Send + 'static,
    {
        self.hooks.add(BeforeStartHookAdapter(f));
        self
    }

    pub fn with_on_progress_hook<F>(mut self, f: F) -> Self
    where
        F: FnMut(DownloadProgress) + Send + Sync + 'static,
    {
        self.hooks.add(OnProgressHookAdapter(f));
        self
    }

    pub fn mode(&self) -> &DownloadMode {
        &self.mode
    }

    pub async fn send(self) -> Result<DownloadResult, WebDavError> {
        let Self { transport, path, mode, hooks } = self;
        run_single_download(&transport, &path, mode, hooks).await
    }
}
