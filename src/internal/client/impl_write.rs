use std::path::Path;

use bytes::Bytes;
use reqwest::Body;
use tokio::fs::File;
use tracing::debug;

use crate::error::WebDavError;
use crate::internal::webdav::enums::WebDavMethod;
use crate::internal::webdav::functions::copy_move::copy_or_move;
use crate::internal::webdav::functions::delete::delete;
use crate::internal::webdav::functions::mkcol::mkcol;
use crate::internal::webdav::functions::proppatch::proppatch;
use crate::internal::webdav::functions::put::put;
use crate::internal::webdav::raw_xml::request_body::Property;
use crate::internal::webdav::remote_path::RemotePath;

use super::structs::Client;

impl Client {
    /// 创建目录，目录已存在时直接返回
    ///
    /// 父目录不存在时返回 [`WebDavError::ParentNotFound`]，需要逐级创建请用 [`Client::mkdir_all`]
    pub async fn mkdir(&self, path: &str) -> Result<(), WebDavError> {
        let path = RemotePath::parse(path)?;
        if path.is_root() {
            return Ok(());
        }
        mkcol(&self.transport, &path).await.map(|_| ())
    }

    /// 逐级创建目录，返回本次新建的目录
    pub async fn mkdir_all(
        &self,
        path: &str,
    ) -> Result<Vec<String>, WebDavError> {
        let path = RemotePath::parse(path)?;

        let mut ancestors = Vec::new();
        let mut current = Some(path);
        while let Some(p) = current {
            if p.is_root() {
                break;
            }
            current = p.parent();
            ancestors.push(p);
        }

        let mut created = Vec::new();
        for dir in ancestors.into_iter().rev() {
            if mkcol(&self.transport, &dir).await? {
                created.push(dir.as_normalized());
            }
        }

        Ok(created)
    }

    /// 上传内存中的内容
    pub async fn upload_from(
        &self,
        path: &str,
        data: impl Into<Bytes>,
    ) -> Result<(), WebDavError> {
        let path = RemotePath::parse(path)?;
        let data: Bytes = data.into();
        let size = data.len() as u64;

        put(&self.transport, &path, Body::from(data), Some(size), None).await
    }

    /// 从本地文件流式上传，文件内容不会整体读进内存
    pub async fn upload_file(
        &self,
        path: &str,
        local_path: impl AsRef<Path>,
    ) -> Result<(), WebDavError> {
        let path = RemotePath::parse(path)?;
        let local_path = local_path.as_ref();

        let metadata = match tokio::fs::metadata(local_path).await {
            Ok(m) if m.is_file() => m,
            _ => {
                return Err(WebDavError::LocalNotFound {
                    path: local_path.display().to_string(),
                });
            }
        };

        let file = File::open(local_path).await?;

        debug!(
            path = %path.as_normalized(),
            local_path = %local_path.display(),
            size = metadata.len(),
            "开始上传本地文件"
        );

        put(
            &self.transport,
            &path,
            Body::from(file),
            Some(metadata.len()),
            None,
        )
        .await
    }

    /// 删除文件或目录，资源不存在时返回 [`WebDavError::NotFound`]
    pub async fn delete(&self, path: &str) -> Result<(), WebDavError> {
        let path = RemotePath::parse(path)?;
        if path.is_root() {
            return Err(WebDavError::InvalidPath(
                "不能删除根目录".to_string(),
            ));
        }
        delete(&self.transport, &path).await
    }

    /// 复制资源，目录会连同内容一起复制
    pub async fn copy(
        &self,
        from: &str,
        to: &str,
        overwrite: bool,
    ) -> Result<(), WebDavError> {
        let from = RemotePath::parse(from)?;
        let to = RemotePath::parse(to)?;
        copy_or_move(&self.transport, WebDavMethod::COPY, &from, &to, overwrite)
            .await
    }

    /// 移动（重命名）资源
    pub async fn move_resource(
        &self,
        from: &str,
        to: &str,
        overwrite: bool,
    ) -> Result<(), WebDavError> {
        let from = RemotePath::parse(from)?;
        let to = RemotePath::parse(to)?;
        copy_or_move(&self.transport, WebDavMethod::MOVE, &from, &to, overwrite)
            .await
    }

    /// 设置任意属性的文本值
    pub async fn set_property(
        &self,
        path: &str,
        property: &Property,
        value: &str,
    ) -> Result<(), WebDavError> {
        let path = RemotePath::parse(path)?;
        proppatch(&self.transport, &path, property, value).await
    }
}
