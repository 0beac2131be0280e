use reqwest::Body;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderValue};

use crate::error::WebDavError;
use crate::internal::error::webdav_error::map_status;
use crate::internal::webdav::enums::WebDavMethod;
use crate::internal::webdav::remote_path::RemotePath;
use crate::internal::webdav::transport::Transport;

/// 上传文件内容
///
/// `size` 已知时写入 Content-Length，流式请求体也不会退化成 chunked
pub(crate) async fn put(
    transport: &Transport,
    path: &RemotePath,
    body: Body,
    size: Option<u64>,
    content_type: Option<&str>,
) -> Result<(), WebDavError> {
    if path.is_root() || path.has_trailing_slash() {
        return Err(WebDavError::InvalidPath(format!(
            "上传目标不能是目录: {}",
            path.as_normalized()
        )));
    }

    let url = transport.url(path)?;
    let mut request = transport.request(WebDavMethod::PUT, &url)?;

    if let Some(size) = size {
        request = request.header(CONTENT_LENGTH, size);
    }

    let mime = content_type.unwrap_or("application/octet-stream");
    let mime = HeaderValue::from_str(mime)
        .map_err(|e| WebDavError::InvalidOption(e.to_string()))?;
    request = request.header(CONTENT_TYPE, mime).body(body);

    let res = transport.send(WebDavMethod::PUT, &url, request).await?;

    match res.status() {
        StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT => Ok(()),
        status => {
            let body = res.text().await.unwrap_or_default();
            Err(map_status(status, &path.as_normalized(), &body))
        }
    }
}
