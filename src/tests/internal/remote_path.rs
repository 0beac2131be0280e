use url::Url;

use crate::WebDavError;
use crate::webdav::path::RemotePath;

fn base() -> Url {
    Url::parse("https://dav.example.com/remote.php/dav/").unwrap()
}

#[test]
fn normalizes_user_input() {
    for raw in ["", "/", ".", "//", "./"] {
        let path = RemotePath::parse(raw).unwrap();
        assert!(path.is_root(), "{raw:?} 应当是根目录");
        assert_eq!(path.as_normalized(), "/");
    }

    let path = RemotePath::parse("a//b/./c/").unwrap();
    assert_eq!(path.as_normalized(), "/a/b/c");
    assert!(path.has_trailing_slash());
    assert_eq!(path.name(), "c");
}

#[test]
fn rejects_parent_segments() {
    for raw in ["..", "../etc", "a/../../b", "a/..", "a\0b"] {
        assert!(
            matches!(RemotePath::parse(raw), Err(WebDavError::InvalidPath(_))),
            "{raw:?} 应当被拒绝"
        );
    }
}

#[test]
fn parent_and_join() {
    let path = RemotePath::parse("/a/b/c.txt").unwrap();
    let parent = path.parent().unwrap();
    assert_eq!(parent.as_normalized(), "/a/b");
    assert!(parent.has_trailing_slash());
    assert!(RemotePath::root().parent().is_none());

    let joined = parent.join("d.txt").unwrap();
    assert_eq!(joined.as_normalized(), "/a/b/d.txt");
    assert!(parent.join("../x").is_err());
}

#[test]
fn encodes_each_segment() {
    let path = RemotePath::parse("/我的 文件/a#b?c:d.txt").unwrap();
    let encoded = path.encoded();
    assert_eq!(
        encoded,
        "%E6%88%91%E7%9A%84%20%E6%96%87%E4%BB%B6/a%23b%3Fc%3Ad.txt"
    );

    let url = path.to_url(&base()).unwrap();
    assert_eq!(
        url.as_str(),
        "https://dav.example.com/remote.php/dav/%E6%88%91%E7%9A%84%20%E6%96%87%E4%BB%B6/a%23b%3Fc%3Ad.txt"
    );
    assert!(url.query().is_none());
    assert!(url.fragment().is_none());
}

#[test]
fn directory_url_keeps_trailing_slash() {
    let url = RemotePath::parse("docs").unwrap().as_dir().to_url(&base()).unwrap();
    assert_eq!(url.path(), "/remote.php/dav/docs/");

    let root = RemotePath::root().to_url(&base()).unwrap();
    assert_eq!(root.as_str(), base().as_str());
}

#[test]
fn from_href_accepts_every_href_form() {
    let base = base();
    let cases = [
        ("/remote.php/dav/a/b.txt", "/a/b.txt"),
        ("https://dav.example.com/remote.php/dav/a/b.txt", "/a/b.txt"),
        ("/remote.php/dav/my%20dir/", "/my dir"),
        ("/remote.php/dav/", "/"),
        ("/remote.php/dav", "/"),
        ("a/b.txt", "/a/b.txt"),
    ];
    for (href, expected) in cases {
        let path = RemotePath::from_href(href, &base)
            .unwrap_or_else(|| panic!("{href} 应当可以解析"));
        assert_eq!(path.as_normalized(), expected, "href = {href}");
    }
}

#[test]
fn from_href_outside_root_is_none() {
    let base = base();
    assert!(RemotePath::from_href("/other/a.txt", &base).is_none());
    assert!(RemotePath::from_href("/remote.php/davx/a.txt", &base).is_none());
}
