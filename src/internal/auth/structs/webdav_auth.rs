use core::fmt;
use std::sync::Arc;

use base64::Engine;
use reqwest::header::HeaderValue;
use sha2::{Digest, Sha256};

use crate::config::ConnectionOptions;
use crate::error::WebDavError;

/// 认证结构体
///
/// 该结构体定位
/// - 根据连接配置生成 `Authorization` 头（Basic 或 Bearer）
/// - 保存凭据的 sha256 摘要，用于比较两个客户端是否是同一账号
///
/// 默认Eq只比较摘要，不会接触明文
#[derive(Clone)]
pub struct WebdavAuth {
    pub(crate) header: Option<HeaderValue>,
    pub(crate) encrypted_token: Arc<String>, // 对外导出时，不允许直接访问，哪怕它是被加密的
}

impl WebdavAuth {
    /// 从连接配置创建认证信息，token 优先于账号密码
    pub fn new(options: &ConnectionOptions) -> Result<Self, WebDavError> {
        let raw = match (&options.token, &options.login) {
            (Some(token), _) if !token.is_empty() => {
                Some(format!("Bearer {token}"))
            }
            (_, Some(login)) => {
                let password = options.password.as_deref().unwrap_or("");
                let token = base64::engine::general_purpose::STANDARD
                    .encode(format!("{login}:{password}"));
                Some(format!("Basic {token}"))
            }
            _ => None,
        };

        let header = match &raw {
            Some(raw) => {
                let mut value = HeaderValue::from_str(raw).map_err(|e| {
                    WebDavError::InvalidOption(format!(
                        "凭据包含非法字符: {e}"
                    ))
                })?;
                value.set_sensitive(true);
                Some(value)
            }
            None => None,
        };

        let encrypted_token =
            _encrypt_str(raw.as_deref().unwrap_or_default());

        Ok(Self { header, encrypted_token: Arc::new(encrypted_token) })
    }

    /// 是否携带凭据，匿名访问时为 false
    pub fn is_anonymous(&self) -> bool {
        self.header.is_none()
    }
}

/// 用于比较认证结构体是否相等
impl PartialEq for WebdavAuth {
    fn eq(&self, other: &Self) -> bool {
        self.encrypted_token == other.encrypted_token
    }
}

/// 防止debug泄漏账号
impl fmt::Debug for WebdavAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebdavAuth")
            .field("header", &"<hidden authorization>")
            .finish()
    }
}

fn _encrypt_str(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    format!("{:x}", hasher.finalize())
}
