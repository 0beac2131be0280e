use core::fmt;
use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Deserializer};
use url::Url;

use crate::internal::error::webdav_error::WebDavError;

/// 默认连接超时：30 秒
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// 默认同时在途的请求数
pub const DEFAULT_MAX_IN_FLIGHT: usize = 1;

/// 连接配置
///
/// 每个客户端实例持有一份，构建后不可变。
/// - `hostname` 必须带协议，可以带路径前缀，如 `https://dav.example.com/remote.php/dav`
/// - `token` 存在时使用 Bearer 认证，优先于 `login`/`password`
/// - `root` 是服务器上的工作目录，所有远程路径都相对它解析
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConnectionOptions {
    pub hostname: String,
    pub login: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
    pub root: String,
    /// 整个请求的超时，不设置则不限制，便于大文件传输；配置文件里按秒填写
    #[serde(deserialize_with = "de_opt_secs")]
    pub timeout: Option<Duration>,
    #[serde(deserialize_with = "de_secs")]
    pub connect_timeout: Duration,
    pub accept_invalid_certs: bool,
    pub max_in_flight: usize,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            login: None,
            password: None,
            token: None,
            root: "/".to_string(),
            timeout: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            accept_invalid_certs: false,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }
}

/// 防止debug泄漏账号
impl fmt::Debug for ConnectionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionOptions")
            .field("hostname", &self.hostname)
            .field("login", &self.login)
            .field("password", &self.password.as_ref().map(|_| "<hidden>"))
            .field("token", &self.token.as_ref().map(|_| "<hidden>"))
            .field("root", &self.root)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("max_in_flight", &self.max_in_flight)
            .finish()
    }
}

impl ConnectionOptions {
    pub fn new(hostname: &str) -> Self {
        Self { hostname: hostname.to_string(), ..Self::default() }
    }

    pub fn login(mut self, login: &str) -> Self {
        self.login = Some(login.to_string());
        self
    }

    pub fn password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string());
        self
    }

    pub fn token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn root(mut self, root: &str) -> Self {
        self.root = root.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    /// 从键值对构建配置，识别的键：
    /// `hostname` `login` `password` `token` `root` `timeout`
    /// `connect_timeout` `accept_invalid_certs` `max_in_flight`
    ///
    /// 未识别的键会被忽略，数值类键解析失败时返回错误。
    pub fn from_map(
        map: &HashMap<String, String>,
    ) -> Result<Self, WebDavError> {
        let mut options = Self::default();

        if let Some(v) = map.get("hostname") {
            options.hostname = v.clone();
        }
        options.login = map.get("login").cloned();
        options.password = map.get("password").cloned();
        options.token = map.get("token").cloned();
        if let Some(v) = map.get("root") {
            options.root = v.clone();
        }
        if let Some(v) = map.get("timeout") {
            options.timeout =
                Some(Duration::from_secs(parse_number(v, "timeout")?));
        }
        if let Some(v) = map.get("connect_timeout") {
            options.connect_timeout =
                Duration::from_secs(parse_number(v, "connect_timeout")?);
        }
        if let Some(v) = map.get("accept_invalid_certs") {
            options.accept_invalid_certs =
                v.trim().parse::<bool>().map_err(|_| {
                    WebDavError::InvalidOption(format!(
                        "accept_invalid_certs 只能是 true/false: {v}"
                    ))
                })?;
        }
        if let Some(v) = map.get("max_in_flight") {
            options.max_in_flight =
                parse_number(v, "max_in_flight")? as usize;
        }

        Ok(options)
    }

    /// 校验配置是否可用
    pub fn validate(&self) -> Result<(), WebDavError> {
        if self.hostname.trim().is_empty() {
            return Err(WebDavError::InvalidOption(
                "hostname 为空".to_string(),
            ));
        }

        let has_token =
            self.token.as_ref().is_some_and(|t| !t.is_empty());
        if !has_token && self.login.is_some() && self.password.is_none() {
            return Err(WebDavError::InvalidOption(
                "设置了 login 但缺少 password".to_string(),
            ));
        }

        // 为 0 的超时会让每个请求立刻失败
        if self.timeout.is_some_and(|t| t.is_zero())
            || self.connect_timeout.is_zero()
        {
            return Err(WebDavError::InvalidOption(
                "timeout / connect_timeout 必须大于 0".to_string(),
            ));
        }

        if self.max_in_flight == 0 {
            return Err(WebDavError::InvalidOption(
                "max_in_flight 至少为 1".to_string(),
            ));
        }

        self.base_url().map(|_| ())
    }

    /// hostname 的路径前缀 + root，保证以 `/` 结尾
    pub fn base_url(&self) -> Result<Url, WebDavError> {
        let mut url = Url::parse(self.hostname.trim()).map_err(|e| {
            WebDavError::InvalidOption(format!("hostname 无法解析: {e}"))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(WebDavError::InvalidOption(format!(
                "仅支持 http/https: {}",
                url.scheme()
            )));
        }

        let segments = url
            .path()
            .split('/')
            .chain(self.root.split('/'))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect::<Vec<String>>();

        if segments.iter().any(|s| s == "..") {
            return Err(WebDavError::InvalidOption(
                "root 不允许包含 ..".to_string(),
            ));
        }

        let path = if segments.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", segments.join("/"))
        };
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);

        Ok(url)
    }
}

fn de_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Duration::from_secs(u64::deserialize(deserializer)?))
}

fn de_opt_secs<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
}

fn parse_number(value: &str, key: &str) -> Result<u64, WebDavError> {
    value.trim().parse::<u64>().map_err(|_| {
        WebDavError::InvalidOption(format!("{key} 必须是非负整数: {value}"))
    })
}
