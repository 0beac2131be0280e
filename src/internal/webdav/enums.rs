use reqwest::Method;

use crate::error::WebDavError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebDavMethod {
    GET,
    PUT,
    DELETE,
    MKCOL,
    COPY,
    MOVE,
    PROPFIND,
    PROPPATCH,
}

impl WebDavMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebDavMethod::GET => "GET",
            WebDavMethod::PUT => "PUT",
            WebDavMethod::DELETE => "DELETE",
            WebDavMethod::MKCOL => "MKCOL",
            WebDavMethod::COPY => "COPY",
            WebDavMethod::MOVE => "MOVE",
            WebDavMethod::PROPFIND => "PROPFIND",
            WebDavMethod::PROPPATCH => "PROPPATCH",
        }
    }

    pub fn to_head_method(&self) -> Result<Method, WebDavError> {
        match self {
            WebDavMethod::GET => Ok(Method::GET),
            WebDavMethod::PUT => Ok(Method::PUT),
            WebDavMethod::DELETE => Ok(Method::DELETE),
            // 扩展方法需要按字节构造
            _ => Method::from_bytes(self.as_str().as_bytes()).map_err(|e| {
                WebDavError::InvalidOption(format!(
                    "无法构造请求方法 {}: {e}",
                    self.as_str()
                ))
            }),
        }
    }
}

pub enum Depth {
    /// 仅返回当前资源
    Zero,
    /// 返回当前资源及直接子资源
    One,
    /// 返回当前资源及所有子资源（谨慎使用）
    Infinity,
}

impl Depth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Depth::Zero => "0",
            Depth::One => "1",
            Depth::Infinity => "infinity",
        }
    }
}
