//! 远程路径：规范化、拒绝越级、按段编码、拼接到根 URL 上。

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use url::Url;

use crate::error::WebDavError;

/// 单个路径段需要编码的字符。`:` 也要编码，否则 `a:b` 会被 Url::join 当成协议。
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b':')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// 相对根目录的远程路径
///
/// 内部只保存解码后的路径段；是否以 `/` 结尾单独记录，目录请求需要带上它。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePath {
    segments: Vec<String>,
    trailing_slash: bool,
}

impl RemotePath {
    /// 解析用户输入的路径，`""`、`"/"`、`"."` 都表示根目录
    pub fn parse(path: &str) -> Result<Self, WebDavError> {
        if path.contains('\0') {
            return Err(WebDavError::InvalidPath(path.to_string()));
        }

        let mut segments = Vec::new();
        for segment in path.split('/') {
            match segment {
                "" | "." => continue,
                ".." => {
                    return Err(WebDavError::InvalidPath(format!(
                        "不允许访问父目录: {path}"
                    )));
                }
                s => segments.push(s.to_string()),
            }
        }

        let trailing_slash = path.ends_with('/') && !segments.is_empty();

        Ok(Self { segments, trailing_slash })
    }

    pub fn root() -> Self {
        Self { segments: Vec::new(), trailing_slash: false }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// 用户是否以 `/` 结尾书写，用来判断调用方期望的是目录
    pub fn has_trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    /// 以 `/` 开头、不带结尾斜杠的规范形式，根目录为 `/`
    pub fn as_normalized(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// 最后一段名称，根目录为空串
    pub fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        let segments = self.segments[..self.segments.len() - 1].to_vec();
        let trailing_slash = !segments.is_empty();
        Some(Self { segments, trailing_slash })
    }

    pub fn join(&self, name: &str) -> Result<Self, WebDavError> {
        let child = Self::parse(name)?;
        let mut segments = self.segments.clone();
        segments.extend(child.segments);
        Ok(Self { segments, trailing_slash: child.trailing_slash })
    }

    /// 当作目录使用（追加结尾斜杠）
    pub fn as_dir(&self) -> Self {
        Self {
            segments: self.segments.clone(),
            trailing_slash: !self.segments.is_empty(),
        }
    }

    /// 按段编码后的相对路径，不以 `/` 开头
    pub fn encoded(&self) -> String {
        let mut encoded = self
            .segments
            .iter()
            .map(|s| utf8_percent_encode(s, SEGMENT).to_string())
            .collect::<Vec<String>>()
            .join("/");
        if self.trailing_slash {
            encoded.push('/');
        }
        encoded
    }

    /// 拼接到根 URL 上，并确认结果没有逃出根目录
    pub fn to_url(&self, base_url: &Url) -> Result<Url, WebDavError> {
        let joined_url = base_url
            .join(&self.encoded())
            .map_err(|_| WebDavError::InvalidPath(self.as_normalized()))?;

        if joined_url.scheme() != base_url.scheme()
            || joined_url.host_str() != base_url.host_str()
            || joined_url.port_or_known_default()
                != base_url.port_or_known_default()
            || !joined_url.path().starts_with(base_url.path())
        {
            return Err(WebDavError::InvalidPath(format!(
                "父目录不允许: {}",
                self.as_normalized()
            )));
        }

        Ok(joined_url)
    }

    /// 把服务端返回的 href（绝对 URL、绝对路径或相对路径）转换回相对根目录的路径
    ///
    /// href 不在根目录之下时返回 `None`
    pub fn from_href(href: &str, base_url: &Url) -> Option<Self> {
        let resolved = base_url.join(href.trim()).ok()?;

        let base_path = decode(base_url.path());
        let resolved_path = decode(resolved.path());

        let rest = if resolved_path.trim_end_matches('/')
            == base_path.trim_end_matches('/')
        {
            ""
        } else {
            resolved_path.strip_prefix(base_path.as_str())?
        };

        Self::parse(rest).ok()
    }
}

fn decode(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().to_string()
}
