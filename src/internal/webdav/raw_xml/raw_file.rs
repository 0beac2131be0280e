use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// 对应 WebDAV 响应 XML 顶层的 `<D:multistatus>` 节点
///
/// quick-xml 按本地名匹配元素，`D:`、`d:`、`lp1:` 或默认命名空间都能解析
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct MultiStatus {
    /// 每个 `<response>` 对应一个资源
    #[serde(rename = "response", default)]
    pub responses: Vec<Response>,
}

/// 对应单个 `<D:response>` 节点
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Response {
    /// 绝对 URL、绝对路径或相对路径都可能出现，转换时统一交给 RemotePath::from_href
    pub href: String,
    #[serde(rename = "propstat", default)]
    pub propstats: Vec<PropStat>,
    /// 整个资源的状态，部分服务端对不存在的成员直接给出 404
    pub status: Option<String>,
}

/// 对应 `<D:propstat>` 节点：一个属性集 + 对应的 HTTP 状态
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct PropStat {
    pub prop: Prop,
    /// 状态行，如 "HTTP/1.1 200 OK"
    pub status: String,
}

/// 对应 `<D:prop>` 节点，列出资源的所有属性
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Prop {
    /// 含 `<collection/>` 即为目录
    #[serde(rename = "resourcetype")]
    pub resource_type: Option<ResourceType>,

    /// 先按文本收下，个别服务端会给目录返回空串
    #[serde(rename = "getcontentlength")]
    pub content_length: Option<String>,

    #[serde(
        rename = "getlastmodified",
        deserialize_with = "de_http_date",
        default
    )]
    pub last_modified: Option<DateTime<FixedOffset>>,

    #[serde(rename = "getcontenttype")]
    pub content_type: Option<String>,

    /// 原样保留，不同服务端格式不一
    #[serde(rename = "creationdate")]
    pub creation_date: Option<String>,

    #[serde(rename = "getetag")]
    pub etag: Option<String>,

    #[serde(rename = "displayname")]
    pub display_name: Option<String>,
}

/// 将 HTTP-date 格式的时间解析为 `DateTime<FixedOffset>`
///
/// 服务端给出的时间格式五花八门，解析失败时当作没有该字段，不让整个列表失败
fn de_http_date<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.and_then(|s| parse_http_date(s.trim())))
}

/// RFC 7231 里仍需接受的两种旧格式，均为 GMT
const OBSOLETE_HTTP_DATE_FORMATS: [&str; 2] = [
    // RFC 850: Sunday, 06-Nov-94 08:49:37 GMT
    "%A, %d-%b-%y %H:%M:%S GMT",
    // asctime: Sun Nov  6 08:49:37 1994
    "%a %b %e %H:%M:%S %Y",
];

fn parse_http_date(s: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(date) = DateTime::parse_from_rfc2822(s)
        .or_else(|_| DateTime::parse_from_rfc3339(s))
    {
        return Some(date);
    }

    OBSOLETE_HTTP_DATE_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(s, format)
            .ok()
            .map(|naive| naive.and_utc().fixed_offset())
    })
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct ResourceType {
    #[serde(rename = "collection")]
    pub is_collection: Option<EmptyElement>,
}

/// 空元素的占位结构，例如 `<collection/>`
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EmptyElement {}

/// 查询单个（或少量）任意属性时使用的多状态结构
///
/// 属性名和命名空间事先未知，`<prop>` 按「本地名 -> 文本」解析
#[derive(Debug, Deserialize, Clone)]
pub struct PropertyMultiStatus {
    #[serde(rename = "response", default)]
    pub responses: Vec<PropertyResponse>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PropertyResponse {
    pub href: String,
    #[serde(rename = "propstat", default)]
    pub propstats: Vec<PropertyPropStat>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PropertyPropStat {
    #[serde(default)]
    pub prop: HashMap<String, String>,
    pub status: String,
}
