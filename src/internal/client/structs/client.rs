use std::collections::HashMap;
use std::sync::Arc;

use url::Url;

use crate::config::ConnectionOptions;
use crate::error::WebDavError;
use crate::internal::webdav::remote_path::RemotePath;
use crate::internal::webdav::transport::Transport;

/// WebDav客户端
///
/// - 一个客户端对应一台服务器上的一个账号
/// - 除了凭据之外没有状态，不缓存任何目录信息
/// - Clone 很便宜，所有克隆共享连接池和在途请求限流
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) options: Arc<ConnectionOptions>,
    pub(crate) transport: Transport,
}

impl Client {
    pub fn new(options: ConnectionOptions) -> Result<Self, WebDavError> {
        let transport = Transport::new(&options)?;
        Ok(Self { options: Arc::new(options), transport })
    }

    /// 从键值对创建，键名见 [`ConnectionOptions::from_map`]
    pub fn from_map(
        map: &HashMap<String, String>,
    ) -> Result<Self, WebDavError> {
        Self::new(ConnectionOptions::from_map(map)?)
    }

    pub fn options(&self) -> &ConnectionOptions {
        &self.options
    }

    /// 所有远程路径都相对这个地址解析，以 `/` 结尾
    pub fn base_url(&self) -> &Url {
        &self.transport.base_url
    }

    /// 两个客户端是否使用同一服务器和同一凭据
    pub fn same_account(&self, other: &Self) -> bool {
        self.transport.base_url == other.transport.base_url
            && self.transport.auth == other.transport.auth
    }

    /// 远程路径对应的完整 URL，不发请求
    pub fn url_of(&self, path: &str) -> Result<Url, WebDavError> {
        self.transport.url(&RemotePath::parse(path)?)
    }
}
