use std::sync::Arc;

use bytes::Bytes;

use crate::client::Client;
use crate::error::WebDavError;
use crate::internal::webdav::raw_xml::request_body::Property;
use crate::internal::webdav::remote_path::RemotePath;
use crate::remote_file::{RemoteDownloader, Resource};

/// 远程资源句柄：一次查询得到的资源快照 + 发起后续操作的客户端
///
/// 快照不会自动刷新，需要最新属性时调用 [`RemoteFile::refresh`]
#[derive(Debug, Clone)]
pub struct RemoteFile {
    pub data: Arc<Resource>, // 使用 Arc 以支持多线程共享
    pub client: Client,
}

impl RemoteFile {
    pub fn new(data: Resource, client: Client) -> Self {
        Self { data: Arc::new(data), client }
    }

    pub fn path(&self) -> &str {
        &self.data.path
    }

    pub fn is_dir(&self) -> bool {
        self.data.is_dir()
    }

    /// 重新查询属性，返回新的句柄
    pub async fn refresh(&self) -> Result<Self, WebDavError> {
        Ok(Self::new(self.info().await?, self.client.clone()))
    }

    /// 服务端当前的属性，不修改本句柄
    pub async fn info(&self) -> Result<Resource, WebDavError> {
        self.client.info(self.path()).await
    }

    pub async fn check(&self) -> Result<bool, WebDavError> {
        self.client.check(self.path()).await
    }

    /// 目录的直接下级
    pub async fn list(&self) -> Result<Vec<Self>, WebDavError> {
        if !self.is_dir() {
            return Err(WebDavError::InvalidPath(format!(
                "不是目录: {}",
                self.path()
            )));
        }

        Ok(self
            .client
            .list(self.path())
            .await?
            .into_iter()
            .map(|data| Self::new(data, self.client.clone()))
            .collect())
    }

    pub async fn read(&self) -> Result<Bytes, WebDavError> {
        self.client.download_to(self.path()).await
    }

    pub async fn write(&self, data: impl Into<Bytes>) -> Result<(), WebDavError> {
        self.client.upload_from(self.path(), data).await
    }

    pub async fn delete(&self) -> Result<(), WebDavError> {
        self.client.delete(self.path()).await
    }

    pub async fn copy_to(
        &self,
        to: &str,
        overwrite: bool,
    ) -> Result<(), WebDavError> {
        self.client.copy(self.path(), to, overwrite).await
    }

    pub async fn move_to(
        &self,
        to: &str,
        overwrite: bool,
    ) -> Result<(), WebDavError> {
        self.client.move_resource(self.path(), to, overwrite).await
    }

    /// 同目录下改名，返回新路径，不覆盖已有资源
    pub async fn rename(&self, new_name: &str) -> Result<String, WebDavError> {
        if new_name.is_empty() || new_name.contains('/') {
            return Err(WebDavError::InvalidPath(format!(
                "新名称不能为空或包含 /: {new_name}"
            )));
        }

        let parent = RemotePath::parse(self.path())?
            .parent()
            .unwrap_or_else(RemotePath::root);
        let target = parent.join(new_name)?.as_normalized();

        self.client.move_resource(self.path(), &target, false).await?;
        Ok(target)
    }

    pub async fn get_property(
        &self,
        property: &Property,
    ) -> Result<Option<String>, WebDavError> {
        self.client.get_property(self.path(), property).await
    }

    pub async fn set_property(
        &self,
        property: &Property,
        value: &str,
    ) -> Result<(), WebDavError> {
        self.client.set_property(self.path(), property, value).await
    }

    /// 构建一个下载器，目录不能下载
    pub fn build_downloader(&self) -> Result<RemoteDownloader, WebDavError> {
        if self.is_dir() {
            return Err(WebDavError::InvalidPath(format!(
                "只能下载文件，当前为目录: {}",
                self.path()
            )));
        }
        self.client.download(self.path())
    }
}
