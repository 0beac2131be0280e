use reqwest::StatusCode;

use crate::error::WebDavError;
use crate::internal::error::webdav_error::map_status;
use crate::internal::webdav::enums::WebDavMethod;
use crate::internal::webdav::remote_path::RemotePath;
use crate::internal::webdav::transport::Transport;

/// 删除文件或目录（目录会连同内容一起删除）
pub(crate) async fn delete(
    transport: &Transport,
    path: &RemotePath,
) -> Result<(), WebDavError> {
    let url = transport.url(path)?;
    let res = transport.send_empty(WebDavMethod::DELETE, &url).await?;

    match res.status() {
        StatusCode::OK | StatusCode::NO_CONTENT | StatusCode::ACCEPTED => {
            Ok(())
        }
        // 207 表示目录里有部分成员删除失败
        StatusCode::MULTI_STATUS => {
            let body = res.text().await.unwrap_or_default();
            Err(WebDavError::ServerResponse {
                status: StatusCode::MULTI_STATUS.as_u16(),
                message: body,
            })
        }
        status => {
            let body = res.text().await.unwrap_or_default();
            Err(map_status(status, &path.as_normalized(), &body))
        }
    }
}
