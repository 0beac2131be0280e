//! 单阶段钩子适配器：将闭包包装成 [`DownloadHook`]。

use std::future::Future;

use async_trait::async_trait;

use crate::internal::remote_file::downloader::structs::download_progress::DownloadProgress;
use crate::internal::remote_file::downloader::traits::download::{DownloadHook, HookAbort};

pub(crate) struct BeforeStartHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F, Fut> DownloadHook for BeforeStartHookAdapter<F>
where
    F: FnMut() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HookAbort>> + Send + 'static,
{
    async fn before_start(&mut self) -> Result<(), HookAbort> {
        (self.0)().await
    }
}

pub(crate) struct OnProgressHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F> DownloadHook for OnProgressHookAdapter<F>
where
    F: FnMut(DownloadProgress) + Send + Sync + 'static,
{
    fn on_progress(&mut self, progress: &DownloadProgress) {
        (self.0)(*progress);
    }
}
