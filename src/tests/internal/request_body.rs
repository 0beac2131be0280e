use crate::webdav::property::{DAV_NAMESPACE, Property};
use crate::internal::webdav::raw_xml::request_body::{propfind_props_body, proppatch_set_body};
use crate::WebDavError;

#[test]
fn propfind_body_declares_custom_namespaces() {
    let body = propfind_props_body(&[
        Property::dav("getetag"),
        Property::new("http://owncloud.org/ns", "checksums"),
    ])
    .unwrap();

    assert!(body.contains(r#"<D:propfind xmlns:D="DAV:">"#));
    assert!(body.contains("<D:getetag/>"));
    assert!(body.contains(r#"<ns0:checksums xmlns:ns0="http://owncloud.org/ns"/>"#));
}

#[test]
fn proppatch_body_escapes_value() {
    let body = proppatch_set_body(
        &Property::new("urn:example", "note"),
        r#"<a href="x">&</a>"#,
    )
    .unwrap();

    assert!(body.contains("<D:set>"));
    assert!(body.contains("&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;"));
    assert!(!body.contains(r#"<a href="x">"#));
}

#[test]
fn rejects_invalid_property_names() {
    for name in ["", "1abc", "has space", "a<b"] {
        let result = propfind_props_body(&[Property::dav(name)]);
        assert!(matches!(result, Err(WebDavError::InvalidOption(_))), "{name:?}");
    }

    let no_namespace = Property::new(" ", "color");
    assert!(proppatch_set_body(&no_namespace, "red").is_err());
    assert_eq!(Property::dav("x").namespace, DAV_NAMESPACE);
}
