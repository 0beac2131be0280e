//! 单线程整文件下载。

use std::path::{Path, PathBuf};

use bytes::BytesMut;
use futures_util::StreamExt;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::error::WebDavError;
use crate::internal::webdav::functions::get::get;
use crate::internal::webdav::remote_path::RemotePath;
use crate::internal::webdav::transport::Transport;

use super::download_hooks_container::DownloadHooksContainer;
use super::download_mode::DownloadMode;
use super::download_progress::DownloadProgress;
use super::download_result::DownloadResult;

/// 下载到内存时按 Content-Length 预分配的上限：8 MiB
const MAX_PREALLOC_BYTES: u64 = 8 * 1024 * 1024;

/// 整文件 GET，流式写入并更新进度。
///
/// 保存到本地时先写 `<文件名>.part`，成功后再改名；任何一步失败都会删掉临时文件。
pub(super) async fn run_single_download(
    transport: &Transport,
    path: &RemotePath,
    mode: DownloadMode,
    mut hooks: DownloadHooksContainer,
) -> Result<DownloadResult, WebDavError> {
    hooks.run_before_start().await?;

    let result = match mode {
        DownloadMode::OutputBytes => {
            download_bytes(transport, path, &mut hooks).await
        }
        DownloadMode::SaveFile(save_path) => {
            download_file(transport, path, &save_path, &mut hooks).await
        }
    }?;

    hooks.run_after_complete().await;

    Ok(result)
}

async fn download_bytes(
    transport: &Transport,
    path: &RemotePath,
    hooks: &mut DownloadHooksContainer,
) -> Result<DownloadResult, WebDavError> {
    let resp = get(transport, path).await?;
    let total = resp.content_length();

    // Content-Length 来自服务端，只作参考，预分配不超过上限
    let capacity = total.unwrap_or_default().min(MAX_PREALLOC_BYTES);
    let mut out_bytes = BytesMut::with_capacity(capacity as usize);
    let mut progress = DownloadProgress { bytes_done: 0, total };
    let mut stream = Box::pin(resp.bytes_stream());

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result?;
        progress.bytes_done += chunk.len() as u64;
        out_bytes.extend_from_slice(&chunk);

        hooks.run_on_chunk(&chunk);
        hooks.run_on_progress(&progress);
    }

    debug!(path = %path.as_normalized(), bytes = progress.bytes_done, "下载到内存完成");

    Ok(DownloadResult::Bytes(out_bytes.freeze()))
}

async fn download_file(
    transport: &Transport,
    path: &RemotePath,
    save_path: &Path,
    hooks: &mut DownloadHooksContainer,
) -> Result<DownloadResult, WebDavError> {
    let resp = get(transport, path).await?;
    let total = resp.content_length();

    let part_path = part_path(save_path);

    let written =
        match stream_to_file(resp, &part_path, total, hooks).await {
            Ok(written) => written,
            Err(e) => {
                if let Err(remove_err) = fs::remove_file(&part_path).await {
                    warn!(path = %part_path.display(), error = %remove_err, "删除临时文件失败");
                }
                return Err(e);
            }
        };

    fs::rename(&part_path, save_path).await?;

    debug!(
        path = %path.as_normalized(),
        save_path = %save_path.display(),
        bytes = written,
        "下载到本地完成"
    );

    Ok(DownloadResult::Saved(written))
}

async fn stream_to_file(
    resp: crate::internal::webdav::transport::TransportResponse,
    part_path: &Path,
    total: Option<u64>,
    hooks: &mut DownloadHooksContainer,
) -> Result<u64, WebDavError> {
    let mut file = File::create(part_path).await?;
    let mut progress = DownloadProgress { bytes_done: 0, total };
    let mut stream = Box::pin(resp.bytes_stream());

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result?;
        file.write_all(&chunk).await?;
        progress.bytes_done += chunk.len() as u64;

        hooks.run_on_chunk(&chunk);
        hooks.run_on_progress(&progress);
    }

    file.flush().await?;
    file.sync_all().await?;

    Ok(progress.bytes_done)
}

fn part_path(save_path: &Path) -> PathBuf {
    let mut name = save_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    save_path.with_file_name(name)
}
