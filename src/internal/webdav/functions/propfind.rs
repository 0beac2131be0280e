use quick_xml::de::from_str;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::error::WebDavError;
use crate::internal::error::webdav_error::map_status;
use crate::internal::webdav::enums::{Depth, WebDavMethod};
use crate::internal::webdav::raw_xml::request_body::{
    PROPFIND_ALLPROP_BODY, Property, propfind_props_body,
};
use crate::internal::webdav::remote_path::RemotePath;
use crate::internal::webdav::transport::Transport;
use crate::webdav::structs::{MultiStatus, PropertyMultiStatus};

/// 发送 PROPFIND，返回多状态响应的原始文本
pub(crate) async fn propfind(
    transport: &Transport,
    path: &RemotePath,
    depth: &Depth,
    body: String,
) -> Result<String, WebDavError> {
    // 组装请求头
    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/xml; charset=utf-8"),
    );
    headers.insert("Depth", HeaderValue::from_static(depth.as_str()));
    headers.insert(ACCEPT, HeaderValue::from_static("application/xml"));

    let url = transport.url(path)?;
    let request = transport
        .request(WebDavMethod::PROPFIND, &url)?
        .headers(headers)
        .body(body);

    let res = transport.send(WebDavMethod::PROPFIND, &url, request).await?;

    let status = res.status();
    let xml_text = res.text().await?;

    if status != StatusCode::MULTI_STATUS && !status.is_success() {
        return Err(map_status(status, &path.as_normalized(), &xml_text));
    }

    if xml_text.trim().is_empty() {
        return Err(WebDavError::MalformedResponse(format!(
            "PROPFIND 响应为空 {status}"
        )));
    }

    Ok(xml_text)
}

/// 获取原始webdav文件夹数据（全部属性）
pub(crate) async fn get_folders_raw_data(
    transport: &Transport,
    path: &RemotePath,
    depth: &Depth,
) -> Result<MultiStatus, WebDavError> {
    let xml_text =
        propfind(transport, path, depth, PROPFIND_ALLPROP_BODY.to_string())
            .await?;

    from_str(&xml_text)
        .map_err(|e| WebDavError::MalformedResponse(e.to_string()))
}

/// 获取指定属性的原始数据，只查询资源本身
pub(crate) async fn get_properties_raw_data(
    transport: &Transport,
    path: &RemotePath,
    properties: &[Property],
) -> Result<PropertyMultiStatus, WebDavError> {
    let body = propfind_props_body(properties)?;
    let xml_text = propfind(transport, path, &Depth::Zero, body).await?;

    from_str(&xml_text)
        .map_err(|e| WebDavError::MalformedResponse(e.to_string()))
}
