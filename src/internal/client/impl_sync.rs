//! 目录级同步：pull 把远程目录拉到本地，push 把本地目录推到远程。
//!
//! 只做单向增量传输（缺失、大小不同或对侧更新才传），不删除任何一侧多出来的文件。

use std::collections::HashMap;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::WebDavError;
use crate::internal::webdav::remote_path::RemotePath;
use crate::remote_file::Resource;

use super::structs::{Client, SyncReport};

/// 本地文件的修改时间
fn local_modified(metadata: &Metadata) -> Option<DateTime<Utc>> {
    metadata.modified().ok().map(DateTime::<Utc>::from)
}

/// 远程文件是否需要拉到本地
fn needs_download(remote: &Resource, local: Option<&Metadata>) -> bool {
    let Some(local) = local else {
        return true;
    };

    if remote.size.is_some_and(|size| size != local.len()) {
        return true;
    }

    match (remote.last_modified, local_modified(local)) {
        (Some(remote_time), Some(local_time)) => {
            remote_time.with_timezone(&Utc) > local_time
        }
        _ => false,
    }
}

/// 本地文件是否需要推到远程
fn needs_upload(local: &Metadata, remote: Option<&Resource>) -> bool {
    let Some(remote) = remote else {
        return true;
    };

    if remote.size.is_some_and(|size| size != local.len()) {
        return true;
    }

    match (local_modified(local), remote.last_modified) {
        (Some(local_time), Some(remote_time)) => {
            local_time > remote_time.with_timezone(&Utc)
        }
        _ => false,
    }
}

/// 读取本地目录项的元数据。指向文件的符号链接按目标处理，
/// 指向目录或已失效的符号链接返回 None，避免链接成环时无限递归
async fn local_entry_metadata(
    entry: &tokio::fs::DirEntry,
) -> Result<Option<Metadata>, WebDavError> {
    if !entry.file_type().await?.is_symlink() {
        return Ok(Some(entry.metadata().await?));
    }

    match tokio::fs::metadata(entry.path()).await {
        Ok(target) if target.is_dir() => {
            warn!(path = %entry.path().display(), "跳过指向目录的符号链接");
            Ok(None)
        }
        Ok(target) => Ok(Some(target)),
        Err(e) => {
            warn!(path = %entry.path().display(), error = %e, "符号链接已失效，跳过");
            Ok(None)
        }
    }
}

fn resource_name(resource: &Resource) -> Result<String, WebDavError> {
    Ok(RemotePath::parse(&resource.path)?.name().to_string())
}

impl Client {
    /// 把远程目录递归下载到本地目录
    pub async fn pull(
        &self,
        remote_dir: &str,
        local_dir: impl AsRef<Path>,
    ) -> Result<SyncReport, WebDavError> {
        let mut report = SyncReport::default();
        let mut stack: Vec<(RemotePath, PathBuf)> =
            vec![(RemotePath::parse(remote_dir)?, local_dir.as_ref().to_path_buf())];

        while let Some((remote, local)) = stack.pop() {
            if !tokio::fs::try_exists(&local).await? {
                tokio::fs::create_dir_all(&local).await?;
                report.created_dirs.push(remote.as_normalized());
            }

            for item in self.list(&remote.as_normalized()).await? {
                let name = resource_name(&item)?;
                let local_child = local.join(&name);

                if item.is_dir() {
                    stack.push((RemotePath::parse(&item.path)?, local_child));
                    continue;
                }

                let local_metadata =
                    tokio::fs::metadata(&local_child).await.ok();
                if local_metadata.as_ref().is_some_and(|m| m.is_dir()) {
                    warn!(path = %item.path, local = %local_child.display(), "本地同名目录已存在，跳过");
                    report.skipped.push(item.path);
                    continue;
                }

                if needs_download(&item, local_metadata.as_ref()) {
                    self.download_file(&item.path, &local_child).await?;
                    report.transferred.push(item.path);
                } else {
                    report.skipped.push(item.path);
                }
            }
        }

        info!(
            remote_dir,
            transferred = report.transferred.len(),
            skipped = report.skipped.len(),
            "pull 完成"
        );

        Ok(report)
    }

    /// 把本地目录递归上传到远程目录，远程目录不存在时逐级创建
    pub async fn push(
        &self,
        local_dir: impl AsRef<Path>,
        remote_dir: &str,
    ) -> Result<SyncReport, WebDavError> {
        let local_dir = local_dir.as_ref();
        let is_dir = tokio::fs::metadata(local_dir)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(WebDavError::LocalNotFound {
                path: local_dir.display().to_string(),
            });
        }

        let mut report = SyncReport::default();
        report.created_dirs.extend(self.mkdir_all(remote_dir).await?);

        let mut stack: Vec<(PathBuf, RemotePath)> =
            vec![(local_dir.to_path_buf(), RemotePath::parse(remote_dir)?)];

        while let Some((local, remote)) = stack.pop() {
            let mut remote_items = HashMap::new();
            for item in self.list(&remote.as_normalized()).await? {
                remote_items.insert(resource_name(&item)?, item);
            }

            let mut entries = tokio::fs::read_dir(&local).await?;
            while let Some(entry) = entries.next_entry().await? {
                let Some(name) = entry.file_name().to_str().map(str::to_string)
                else {
                    warn!(path = %entry.path().display(), "文件名不是合法 UTF-8，跳过");
                    continue;
                };

                let remote_child = remote.join(&name)?;
                let Some(metadata) = local_entry_metadata(&entry).await? else {
                    report.skipped.push(remote_child.as_normalized());
                    continue;
                };
                let remote_item = remote_items.get(&name);

                if metadata.is_dir() {
                    if !remote_item.is_some_and(|r| r.is_dir()) {
                        self.mkdir(&remote_child.as_normalized()).await?;
                        report.created_dirs.push(remote_child.as_normalized());
                    }
                    stack.push((entry.path(), remote_child));
                    continue;
                }

                if remote_item.is_some_and(|r| r.is_dir()) {
                    warn!(path = %remote_child.as_normalized(), "远程同名目录已存在，跳过");
                    report.skipped.push(remote_child.as_normalized());
                    continue;
                }

                if needs_upload(&metadata, remote_item) {
                    self.upload_file(&remote_child.as_normalized(), entry.path())
                        .await?;
                    report.transferred.push(remote_child.as_normalized());
                } else {
                    report.skipped.push(remote_child.as_normalized());
                }
            }
        }

        info!(
            remote_dir,
            transferred = report.transferred.len(),
            skipped = report.skipped.len(),
            "push 完成"
        );

        Ok(report)
    }
}
