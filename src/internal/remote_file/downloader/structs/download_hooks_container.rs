use crate::internal::remote_file::downloader::structs::download_progress::DownloadProgress;
use crate::internal::remote_file::downloader::traits::download::{DownloadHook, HookAbort};

/// 钩子容器：按注册顺序依次执行。
#[derive(Default)]
pub struct DownloadHooksContainer {
    hooks: Vec<Box<dyn DownloadHook>>,
}

impl DownloadHooksContainer {
    pub fn add(&mut self, hook: impl DownloadHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub async fn run_before_start(&mut self) -> Result<(), HookAbort> {
        for h in self.hooks.iter_mut() {
            h.before_start().await?;
        }
        Ok(())
    }

    pub fn run_on_chunk(&mut self, chunk: &[u8]) {
        for h in self.hooks.iter_mut() {
            h.on_chunk(chunk);
        }
    }

    pub fn run_on_progress(&mut self, progress: &DownloadProgress) {
        for h in self.hooks.iter_mut() {
            h.on_progress(progress);
        }
    }

    pub async fn run_after_complete(&mut self) {
        for h in self.hooks.iter_mut() {
            h.after_complete().await;
        }
    }
}
