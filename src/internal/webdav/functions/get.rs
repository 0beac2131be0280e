use reqwest::StatusCode;

use crate::error::WebDavError;
use crate::internal::error::webdav_error::map_status;
use crate::internal::webdav::enums::WebDavMethod;
use crate::internal::webdav::remote_path::RemotePath;
use crate::internal::webdav::transport::{Transport, TransportResponse};

/// 发起 GET，状态码正常时返回未读取的响应，由调用方决定整块读取还是流式读取
pub(crate) async fn get(
    transport: &Transport,
    path: &RemotePath,
) -> Result<TransportResponse, WebDavError> {
    if path.is_root() || path.has_trailing_slash() {
        return Err(WebDavError::InvalidPath(format!(
            "只能下载文件，当前为目录: {}",
            path.as_normalized()
        )));
    }

    let url = transport.url(path)?;
    let res = transport.send_empty(WebDavMethod::GET, &url).await?;

    match res.status() {
        StatusCode::OK => Ok(res),
        status => {
            let body = res.text().await.unwrap_or_default();
            Err(map_status(status, &path.as_normalized(), &body))
        }
    }
}
