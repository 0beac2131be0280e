use tracing::warn;
use url::Url;

use crate::internal::webdav::remote_path::RemotePath;
use crate::remote_file::{Resource, ResourceKind};
use crate::webdav::structs::{MultiStatus, PropStat, PropertyPropStat, Prop, Response};

pub trait ToResources {
    /// 转换成资源列表，href 不在根目录下或没有 2xx 属性集的条目会被丢弃
    fn to_resources(self, base_url: &Url) -> Vec<Resource>;
}

/// 从状态行里取出 HTTP 状态码，如 "HTTP/1.1 200 OK" -> 200
pub(crate) fn status_code(status: &str) -> Option<u16> {
    status.split_whitespace().find_map(|t| t.parse::<u16>().ok())
}

pub(crate) fn is_success_status(status: &str) -> bool {
    status_code(status)
        .map(|code| (200..=299).contains(&code))
        .unwrap_or(false)
}

fn take_ok_propstat(propstats: Vec<PropStat>) -> Option<PropStat> {
    // 从 propstats 中拿到第一个 HTTP 状态是 2xx 的 PropStat（直接 move 出来）
    propstats.into_iter().find(|ps| is_success_status(&ps.status))
}

/// 属性查询用：第一个 2xx 属性集
pub(crate) fn take_ok_property_propstat(
    propstats: Vec<PropertyPropStat>,
) -> Option<PropertyPropStat> {
    propstats.into_iter().find(|ps| is_success_status(&ps.status))
}

fn decode_name(display_name: Option<String>, path: &RemotePath) -> String {
    // 如果服务端给了非空 display_name 就直接用，否则用路径最后一段（已解码）
    display_name
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| path.name().to_string())
}

fn clean_etag(raw: Option<String>) -> Option<String> {
    // 去掉 ETag 的首尾引号以及多余空格
    raw.map(|s| s.trim().trim_matches('"').to_string())
        .filter(|s| !s.is_empty())
}

fn clean_text(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// 单个 response 转换成资源
pub(crate) fn response_to_resource(
    response: Response,
    base_url: &Url,
) -> Option<Resource> {
    let Response { href, propstats, .. } = response;

    let path = match RemotePath::from_href(&href, base_url) {
        Some(path) => path,
        None => {
            warn!(href = %href, base_url = %base_url, "href 不在根目录之下，已跳过");
            return None;
        }
    };

    // 挑选出第一个 2xx PropStat（消耗 propstats 避免 clone）
    let PropStat { prop, .. } = take_ok_propstat(propstats)?;

    let Prop {
        resource_type,
        content_length,
        last_modified,
        content_type,
        creation_date,
        etag,
        display_name,
    } = prop;

    let kind = if resource_type
        .as_ref()
        .and_then(|rt| rt.is_collection.as_ref())
        .is_some()
    {
        ResourceKind::Collection
    } else {
        ResourceKind::File
    };

    let size = content_length.and_then(|s| s.trim().parse::<u64>().ok());

    Some(Resource {
        name: decode_name(display_name, &path),
        path: path.as_normalized(),
        href, // move
        kind,
        size,
        last_modified, // move
        created: clean_text(creation_date),
        content_type: clean_text(content_type),
        etag: clean_etag(etag),
    })
}

impl ToResources for MultiStatus {
    fn to_resources(self, base_url: &Url) -> Vec<Resource> {
        self.responses
            .into_iter()
            .filter_map(|response| response_to_resource(response, base_url))
            .collect()
    }
}

/// 列目录时去掉请求路径本身
///
/// 只保留请求路径的下级条目；如果一个下级都对不上（服务端改写了路径），
/// 就按惯例丢掉第一项，第一项一般是请求的路径本身
pub(crate) fn exclude_self(
    resources: Vec<Resource>,
    requested: &RemotePath,
) -> Vec<Resource> {
    let requested = requested.as_normalized();
    let prefix = if requested == "/" {
        "/".to_string()
    } else {
        format!("{requested}/")
    };
    let is_child = |r: &Resource| r.path != requested && r.path.starts_with(&prefix);

    if resources.iter().any(|r| r.path == requested || is_child(r)) {
        return resources.into_iter().filter(|r| is_child(r)).collect();
    }

    resources.into_iter().skip(1).collect()
}
