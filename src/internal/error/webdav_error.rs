//! 客户端统一错误类型。
//!
//! 调用方需要区分三类情况：可以重试（网络、5xx）、需要修正凭据（401/403）、
//! 服务端不兼容（异常状态码、无法解析的 XML）。

use reqwest::StatusCode;
use thiserror::Error;

use crate::internal::remote_file::downloader::traits::download::HookAbort;

#[derive(Debug, Error)]
pub enum WebDavError {
    #[error("配置项无效: {0}")]
    InvalidOption(String),

    #[error("路径格式错误: {0}")]
    InvalidPath(String),

    #[error("认证失败（HTTP {status}）")]
    Authentication { status: u16 },

    #[error("网络连接失败: {0}")]
    Connection(#[from] reqwest::Error),

    #[error("远程资源不存在: {path}")]
    NotFound { path: String },

    #[error("远程父目录不存在: {path}")]
    ParentNotFound { path: String },

    #[error("服务器不允许对该资源执行此方法: {path}")]
    MethodNotAllowed { path: String },

    #[error("目标已存在且不允许覆盖: {path}")]
    PreconditionFailed { path: String },

    #[error("远程存储空间不足: {path}")]
    InsufficientStorage { path: String },

    #[error("服务器响应异常 {status}: {message}")]
    ServerResponse { status: u16, message: String },

    #[error("服务器响应无法解析: {0}")]
    MalformedResponse(String),

    #[error("本地资源不存在: {path}")]
    LocalNotFound { path: String },

    #[error("本地文件读写失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    HookAbort(#[from] HookAbort),
}

impl WebDavError {
    /// 是否值得原样重试：网络层失败、超时以及 5xx（507 除外）。
    pub fn is_retryable(&self) -> bool {
        match self {
            WebDavError::Connection(_) => true,
            WebDavError::ServerResponse { status, .. } => {
                (500..=599).contains(status)
            }
            _ => false,
        }
    }

    /// 是否需要调用方修正账号或令牌。
    pub fn is_authentication(&self) -> bool {
        matches!(self, WebDavError::Authentication { .. })
    }
}

/// 响应体在错误信息里最多保留的字符数，避免把整页 HTML 塞进日志。
const MAX_MESSAGE_CHARS: usize = 512;

/// 把非成功状态码映射成对应的错误，所有操作共用。
///
/// `path` 是发起请求时的远程路径，`body` 是已经读出的响应体（可能为空）。
pub(crate) fn map_status(
    status: StatusCode,
    path: &str,
    body: &str,
) -> WebDavError {
    let path = path.to_string();

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            WebDavError::Authentication { status: status.as_u16() }
        }
        StatusCode::NOT_FOUND | StatusCode::GONE => {
            WebDavError::NotFound { path }
        }
        // MKCOL / PUT / COPY / MOVE 在中间目录缺失时返回 409
        StatusCode::CONFLICT => WebDavError::ParentNotFound { path },
        StatusCode::METHOD_NOT_ALLOWED => {
            WebDavError::MethodNotAllowed { path }
        }
        StatusCode::PRECONDITION_FAILED => {
            WebDavError::PreconditionFailed { path }
        }
        StatusCode::INSUFFICIENT_STORAGE => {
            WebDavError::InsufficientStorage { path }
        }
        _ => WebDavError::ServerResponse {
            status: status.as_u16(),
            message: body.chars().take(MAX_MESSAGE_CHARS).collect(),
        },
    }
}
