use core::fmt;
use std::sync::Arc;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use reqwest::header::{AUTHORIZATION, HeaderMap};
use reqwest::{Body, Client, RequestBuilder, Response, StatusCode};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::debug;
use url::Url;

use crate::auth::WebdavAuth;
use crate::config::ConnectionOptions;
use crate::error::WebDavError;
use crate::internal::webdav::enums::WebDavMethod;
use crate::internal::webdav::remote_path::RemotePath;

/// 底层传输：带默认认证头的 http 客户端 + 根 URL + 在途请求限流
///
/// Clone 只复制引用计数，同一个 Client 的所有克隆共享连接池和限流
#[derive(Clone)]
pub struct Transport {
    pub client: Client, // 内部是Arc，不需要特殊处理
    pub base_url: Arc<Url>,
    pub auth: WebdavAuth,
    limiter: Arc<Semaphore>,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url.as_str())
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

/// 请求的响应，随身携带限流许可；响应被消费或丢弃时许可自动归还
pub struct TransportResponse {
    pub response: Response,
    _permit: OwnedSemaphorePermit,
}

impl TransportResponse {
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    pub fn content_length(&self) -> Option<u64> {
        self.response.content_length()
    }

    pub async fn text(self) -> Result<String, WebDavError> {
        Ok(self.response.text().await?)
    }

    /// 流式读取响应体，许可直到流结束才释放
    pub fn bytes_stream(
        self,
    ) -> impl Stream<Item = Result<Bytes, WebDavError>> {
        let permit = self._permit;
        self.response.bytes_stream().map(move |chunk| {
            let _held = &permit;
            chunk.map_err(WebDavError::from)
        })
    }
}

impl Transport {
    pub fn new(options: &ConnectionOptions) -> Result<Self, WebDavError> {
        options.validate()?;

        let auth = WebdavAuth::new(options)?;

        let mut headers = HeaderMap::new();
        if let Some(value) = &auth.header {
            headers.insert(AUTHORIZATION, value.clone());
        }

        let mut builder = Client::builder()
            .http1_only()
            .default_headers(headers)
            .connect_timeout(options.connect_timeout)
            .danger_accept_invalid_certs(options.accept_invalid_certs);

        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build()?;
        let base_url = options.base_url()?;

        debug!(base_url = %base_url, "webdav transport created");

        Ok(Self {
            client,
            base_url: Arc::new(base_url),
            auth,
            limiter: Arc::new(Semaphore::new(options.max_in_flight)),
        })
    }

    /// 远程路径 -> 完整 URL
    pub fn url(&self, path: &RemotePath) -> Result<Url, WebDavError> {
        path.to_url(&self.base_url)
    }

    pub fn request(
        &self,
        method: WebDavMethod,
        url: &Url,
    ) -> Result<RequestBuilder, WebDavError> {
        Ok(self.client.request(method.to_head_method()?, url.clone()))
    }

    /// 发送请求。先拿到限流许可，再发请求，许可和响应绑定在一起
    pub async fn send(
        &self,
        method: WebDavMethod,
        url: &Url,
        request: RequestBuilder,
    ) -> Result<TransportResponse, WebDavError> {
        let permit =
            self.limiter.clone().acquire_owned().await.map_err(|_| {
                WebDavError::MalformedResponse(
                    "请求限流器已关闭".to_string(),
                )
            })?;

        debug!(method = method.as_str(), url = %url, "webdav request");

        let response = request.send().await?;

        debug!(
            method = method.as_str(),
            url = %url,
            status = response.status().as_u16(),
            "webdav response"
        );

        Ok(TransportResponse { response, _permit: permit })
    }

    /// 空请求体的便捷方法
    pub async fn send_empty(
        &self,
        method: WebDavMethod,
        url: &Url,
    ) -> Result<TransportResponse, WebDavError> {
        let mut request = self.request(method, url)?;
        // 部分服务器（nginx dav）要求 MKCOL/DELETE 带 Content-Length
        if method != WebDavMethod::GET {
            request = request.body(Body::from(""));
        }
        self.send(method, url, request).await
    }

    /// 在途请求的上限
    pub fn available_permits(&self) -> usize {
        self.limiter.available_permits()
    }
}
