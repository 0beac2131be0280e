use reqwest::StatusCode;

use crate::error::WebDavError;
use crate::internal::error::webdav_error::map_status;
use crate::internal::webdav::enums::WebDavMethod;
use crate::internal::webdav::remote_path::RemotePath;
use crate::internal::webdav::transport::Transport;

/// 创建目录
///
/// 返回 true 表示本次新建，false 表示目录已存在
/// 参考：[RFC4918: 9.3.1. MKCOL Status Codes](https://datatracker.ietf.org/doc/html/rfc4918#section-9.3.1)
pub(crate) async fn mkcol(
    transport: &Transport,
    path: &RemotePath,
) -> Result<bool, WebDavError> {
    let url = transport.url(&path.as_dir())?;
    let res = transport.send_empty(WebDavMethod::MKCOL, &url).await?;

    match res.status() {
        // 201 (Created) - 目录已创建
        StatusCode::CREATED | StatusCode::OK | StatusCode::NO_CONTENT => {
            Ok(true)
        }
        // 405 (Method Not Allowed) - MKCOL 只能作用于不存在的 URL，说明目录已存在
        StatusCode::METHOD_NOT_ALLOWED => Ok(false),
        status => {
            let body = res.text().await.unwrap_or_default();
            Err(map_status(status, &path.as_normalized(), &body))
        }
    }
}
