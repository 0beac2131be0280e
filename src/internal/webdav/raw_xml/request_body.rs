//! PROPFIND / PROPPATCH 请求体构建。

use quick_xml::escape::escape;

use crate::error::WebDavError;

/// WebDAV 自身属性所在的命名空间
pub const DAV_NAMESPACE: &str = "DAV:";

/// 请求全部属性
pub const PROPFIND_ALLPROP_BODY: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<D:propfind xmlns:D="DAV:">
  <D:allprop/>
</D:propfind>"#;

/// 一个带命名空间的属性名，例如 `DAV:` 下的 `getetag`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
    pub namespace: String,
    pub name: String,
}

impl Property {
    pub fn new(namespace: &str, name: &str) -> Self {
        Self { namespace: namespace.to_string(), name: name.to_string() }
    }

    /// `DAV:` 命名空间下的属性
    pub fn dav(name: &str) -> Self {
        Self::new(DAV_NAMESPACE, name)
    }

    /// 属性名必须是合法的 XML 本地名，命名空间不能为空
    pub fn validate(&self) -> Result<(), WebDavError> {
        let mut chars = self.name.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_alphabetic() || c == '_');
        let valid_rest = chars
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'));

        if !valid_start || !valid_rest {
            return Err(WebDavError::InvalidOption(format!(
                "属性名不合法: {}",
                self.name
            )));
        }

        if self.namespace.trim().is_empty() {
            return Err(WebDavError::InvalidOption(format!(
                "属性 {} 缺少命名空间",
                self.name
            )));
        }

        Ok(())
    }

    /// 在请求体里的限定名，DAV: 属性用 `D:` 前缀，其它统一用 `ns0:`
    fn qualified(&self) -> String {
        if self.namespace == DAV_NAMESPACE {
            format!("D:{}", self.name)
        } else {
            format!("ns0:{}", self.name)
        }
    }

    fn namespace_declaration(&self) -> String {
        if self.namespace == DAV_NAMESPACE {
            String::new()
        } else {
            format!(r#" xmlns:ns0="{}""#, escape(self.namespace.as_str()))
        }
    }
}

/// 只请求指定的若干属性
pub fn propfind_props_body(
    properties: &[Property],
) -> Result<String, WebDavError> {
    let mut props = String::new();
    for property in properties {
        property.validate()?;
        props.push_str(&format!(
            "    <{}{}/>\n",
            property.qualified(),
            property.namespace_declaration()
        ));
    }

    Ok(format!(
        r#"<?xml version="1.0" encoding="utf-8" ?>
<D:propfind xmlns:D="DAV:">
  <D:prop>
{props}  </D:prop>
</D:propfind>"#
    ))
}

/// 设置单个属性的值，值会被转义
pub fn proppatch_set_body(
    property: &Property,
    value: &str,
) -> Result<String, WebDavError> {
    property.validate()?;

    let qualified = property.qualified();
    Ok(format!(
        r#"<?xml version="1.0" encoding="utf-8" ?>
<D:propertyupdate xmlns:D="DAV:">
  <D:set>
    <D:prop>
      <{qualified}{ns}>{value}</{qualified}>
    </D:prop>
  </D:set>
</D:propertyupdate>"#,
        ns = property.namespace_declaration(),
        value = escape(value),
    ))
}
