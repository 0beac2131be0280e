use quick_xml::de::from_str;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderValue};

use crate::error::WebDavError;
use crate::internal::error::webdav_error::map_status;
use crate::internal::webdav::enums::WebDavMethod;
use crate::internal::webdav::raw_xml::impl_multi_status::{
    is_success_status, status_code,
};
use crate::internal::webdav::raw_xml::request_body::{
    Property, proppatch_set_body,
};
use crate::internal::webdav::remote_path::RemotePath;
use crate::internal::webdav::transport::Transport;
use crate::webdav::structs::PropertyMultiStatus;

/// 设置单个属性
///
/// PROPPATCH 是原子的：207 里只要有一个属性集不是 2xx，整次修改都没有生效
pub(crate) async fn proppatch(
    transport: &Transport,
    path: &RemotePath,
    property: &Property,
    value: &str,
) -> Result<(), WebDavError> {
    let body = proppatch_set_body(property, value)?;

    let url = transport.url(path)?;
    let request = transport
        .request(WebDavMethod::PROPPATCH, &url)?
        .header(
            CONTENT_TYPE,
            HeaderValue::from_static("application/xml; charset=utf-8"),
        )
        .body(body);

    let res = transport.send(WebDavMethod::PROPPATCH, &url, request).await?;

    let status = res.status();
    let xml_text = res.text().await?;

    if status == StatusCode::MULTI_STATUS {
        let multi_status: PropertyMultiStatus = from_str(&xml_text)
            .map_err(|e| WebDavError::MalformedResponse(e.to_string()))?;

        let failed = multi_status
            .responses
            .iter()
            .flat_map(|r| r.propstats.iter())
            .find(|ps| !is_success_status(&ps.status));

        return match failed {
            Some(ps) => Err(WebDavError::ServerResponse {
                status: status_code(&ps.status).unwrap_or(0),
                message: format!(
                    "属性 {} 修改失败: {}",
                    property.name, ps.status
                ),
            }),
            None => Ok(()),
        };
    }

    if status.is_success() {
        return Ok(());
    }

    Err(map_status(status, &path.as_normalized(), &xml_text))
}
