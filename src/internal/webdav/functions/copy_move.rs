use reqwest::StatusCode;
use reqwest::header::HeaderValue;

use crate::error::WebDavError;
use crate::internal::error::webdav_error::map_status;
use crate::internal::webdav::enums::WebDavMethod;
use crate::internal::webdav::remote_path::RemotePath;
use crate::internal::webdav::transport::Transport;

/// COPY/MOVE 的目标地址
///
/// 参考：[RFC4918: 10.3. Destination Header](https://datatracker.ietf.org/doc/html/rfc4918#section-10.3)
const HEADER_DESTINATION: &str = "Destination";

/// 目标已存在时是否覆盖，取值 `T` / `F`
///
/// 参考：[RFC4918: 10.6. Overwrite Header](https://datatracker.ietf.org/doc/html/rfc4918#section-10.6)
const HEADER_OVERWRITE: &str = "Overwrite";

/// 复制或移动资源，method 只能是 COPY 或 MOVE
pub(crate) async fn copy_or_move(
    transport: &Transport,
    method: WebDavMethod,
    from: &RemotePath,
    to: &RemotePath,
    overwrite: bool,
) -> Result<(), WebDavError> {
    if !matches!(method, WebDavMethod::COPY | WebDavMethod::MOVE) {
        return Err(WebDavError::InvalidOption(format!(
            "{} 不是复制或移动方法",
            method.as_str()
        )));
    }

    if from.is_root() || to.is_root() {
        return Err(WebDavError::InvalidPath(
            "不能复制或移动根目录".to_string(),
        ));
    }

    let source = transport.url(from)?;
    let target = transport.url(to)?;

    let destination = HeaderValue::from_str(target.as_str())
        .map_err(|e| WebDavError::InvalidPath(e.to_string()))?;
    let overwrite = HeaderValue::from_static(if overwrite { "T" } else { "F" });

    let request = transport
        .request(method, &source)?
        .header(HEADER_DESTINATION, destination)
        .header(HEADER_OVERWRITE, overwrite)
        .body("");

    let res = transport.send(method, &source, request).await?;

    match res.status() {
        // 201 新建目标，204 覆盖了已有目标
        StatusCode::CREATED | StatusCode::NO_CONTENT | StatusCode::OK => {
            Ok(())
        }
        StatusCode::MULTI_STATUS => {
            let body = res.text().await.unwrap_or_default();
            Err(WebDavError::ServerResponse {
                status: StatusCode::MULTI_STATUS.as_u16(),
                message: body,
            })
        }
        // 409/412/507 说的是目标，其余（如 404）说的是源
        status @ (StatusCode::CONFLICT
        | StatusCode::PRECONDITION_FAILED
        | StatusCode::INSUFFICIENT_STORAGE) => {
            let body = res.text().await.unwrap_or_default();
            Err(map_status(status, &to.as_normalized(), &body))
        }
        status => {
            let body = res.text().await.unwrap_or_default();
            Err(map_status(status, &from.as_normalized(), &body))
        }
    }
}
