use std::path::Path;

use bytes::Bytes;

use crate::error::WebDavError;
use crate::internal::webdav::enums::Depth;
use crate::internal::webdav::functions::propfind::{
    get_folders_raw_data, get_properties_raw_data, propfind,
};
use crate::internal::webdav::raw_xml::impl_multi_status::{
    ToResources, exclude_self, take_ok_property_propstat,
};
use crate::internal::webdav::raw_xml::request_body::{
    Property, propfind_props_body,
};
use crate::internal::webdav::remote_path::RemotePath;
use crate::remote_file::{DownloadResult, RemoteDownloader, RemoteFile, Resource};

use super::structs::Client;

impl Client {
    /// 检查服务器是否可达、凭据是否有效，以及路径是否存在
    ///
    /// - 存在返回 `Ok(true)`，404 返回 `Ok(false)`
    /// - 凭据无效返回 [`WebDavError::Authentication`]，网络不通返回 [`WebDavError::Connection`]
    pub async fn check(&self, path: &str) -> Result<bool, WebDavError> {
        let path = RemotePath::parse(path)?;

        // 只关心状态码，不解析响应体
        let body = propfind_props_body(&[Property::dav("resourcetype")])?;

        match propfind(&self.transport, &path, &Depth::Zero, body).await {
            Ok(_) => Ok(true),
            Err(WebDavError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// 读取单个资源的属性
    pub async fn info(&self, path: &str) -> Result<Resource, WebDavError> {
        let path = RemotePath::parse(path)?;

        let multi_status =
            get_folders_raw_data(&self.transport, &path, &Depth::Zero)
                .await?;

        let requested = path.as_normalized();
        let mut resources =
            multi_status.to_resources(&self.transport.base_url);

        // Depth 0 正常只有一条；有多条时优先取路径一致的那条
        let index = resources
            .iter()
            .position(|r| r.path == requested)
            .unwrap_or(0);

        if resources.is_empty() {
            return Err(WebDavError::NotFound { path: requested });
        }

        Ok(resources.swap_remove(index))
    }

    /// 查询资源并包装成可继续操作的句柄
    pub async fn resource(&self, path: &str) -> Result<RemoteFile, WebDavError> {
        let data = self.info(path).await?;
        Ok(RemoteFile::new(data, self.clone()))
    }

    pub async fn is_dir(&self, path: &str) -> Result<bool, WebDavError> {
        Ok(self.info(path).await?.is_dir())
    }

    /// 列出目录的直接下级，不包含目录本身，不递归
    pub async fn list(
        &self,
        path: &str,
    ) -> Result<Vec<Resource>, WebDavError> {
        let path = RemotePath::parse(path)?.as_dir();

        let multi_status =
            get_folders_raw_data(&self.transport, &path, &Depth::One)
                .await?;

        let resources = multi_status.to_resources(&self.transport.base_url);

        Ok(exclude_self(resources, &path))
    }

    /// 剩余可用空间（字节），服务端不支持配额属性时返回 `None`
    pub async fn free(&self) -> Result<Option<u64>, WebDavError> {
        let value = self
            .get_property("/", &Property::dav("quota-available-bytes"))
            .await?;

        Ok(value.and_then(|v| v.trim().parse::<u64>().ok()))
    }

    /// 读取任意属性的文本值，服务端报告属性不存在时返回 `None`
    pub async fn get_property(
        &self,
        path: &str,
        property: &Property,
    ) -> Result<Option<String>, WebDavError> {
        let path = RemotePath::parse(path)?;

        let multi_status = get_properties_raw_data(
            &self.transport,
            &path,
            std::slice::from_ref(property),
        )
        .await?;

        let value = multi_status
            .responses
            .into_iter()
            .next()
            .and_then(|r| take_ok_property_propstat(r.propstats))
            .and_then(|mut ps| ps.prop.remove(&property.name))
            .map(|v| v.trim().to_string());

        Ok(value)
    }

    /// 创建下载器，可设置保存位置和钩子后再 `send`
    pub fn download(
        &self,
        path: &str,
    ) -> Result<RemoteDownloader, WebDavError> {
        let path = RemotePath::parse(path)?;
        Ok(RemoteDownloader::new(self.transport.clone(), path))
    }

    /// 下载到内存
    pub async fn download_to(&self, path: &str) -> Result<Bytes, WebDavError> {
        match self.download(path)?.output_bytes().send().await? {
            DownloadResult::Bytes(bytes) => Ok(bytes),
            DownloadResult::Saved(_) => Err(WebDavError::MalformedResponse(
                "下载模式与结果不一致".to_string(),
            )),
        }
    }

    /// 流式下载到本地文件，返回写入的字节数
    pub async fn download_file(
        &self,
        path: &str,
        local_path: impl AsRef<Path>,
    ) -> Result<u64, WebDavError> {
        match self.download(path)?.save_to(local_path).send().await? {
            DownloadResult::Saved(written) => Ok(written),
            DownloadResult::Bytes(_) => Err(WebDavError::MalformedResponse(
                "下载模式与结果不一致".to_string(),
            )),
        }
    }
}
