use std::collections::HashMap;
use std::time::Duration;

use crate::tests::memory_server;
use crate::{Client, WebDavError};
use crate::auth::WebdavAuth;
use crate::config::{ConnectionOptions, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_MAX_IN_FLIGHT};

fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn from_map_reads_known_keys() {
    let options = ConnectionOptions::from_map(&map(&[
        ("hostname", "https://dav.example.com"),
        ("login", "alice"),
        ("password", "secret"),
        ("root", "/backup"),
        ("timeout", "120"),
        ("connect_timeout", "5"),
        ("accept_invalid_certs", "true"),
        ("max_in_flight", "4"),
        ("unknown", "ignored"),
    ]))
    .unwrap();

    assert_eq!(options.hostname, "https://dav.example.com");
    assert_eq!(options.login.as_deref(), Some("alice"));
    assert_eq!(options.root, "/backup");
    assert_eq!(options.timeout, Some(Duration::from_secs(120)));
    assert_eq!(options.connect_timeout, Duration::from_secs(5));
    assert!(options.accept_invalid_certs);
    assert_eq!(options.max_in_flight, 4);
    options.validate().unwrap();
}

#[test]
fn from_map_defaults_and_bad_numbers() {
    let options =
        ConnectionOptions::from_map(&map(&[("hostname", "http://h")])).unwrap();
    assert_eq!(options.root, "/");
    assert_eq!(options.timeout, None);
    assert_eq!(
        options.connect_timeout,
        Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)
    );
    assert_eq!(options.max_in_flight, DEFAULT_MAX_IN_FLIGHT);

    for (key, value) in [
        ("timeout", "soon"),
        ("max_in_flight", "-1"),
        ("accept_invalid_certs", "yes"),
    ] {
        let result = ConnectionOptions::from_map(&map(&[
            ("hostname", "http://h"),
            (key, value),
        ]));
        assert!(matches!(result, Err(WebDavError::InvalidOption(_))), "{key}={value}");
    }
}

#[test]
fn validate_rejects_unusable_options() {
    let bad = [
        ConnectionOptions::new(""),
        ConnectionOptions::new("ftp://h"),
        ConnectionOptions::new("not a url"),
        ConnectionOptions::new("http://h").login("alice"),
        ConnectionOptions::new("http://h").max_in_flight(0),
        ConnectionOptions::new("http://h").root("/a/../.."),
        ConnectionOptions::new("http://h").timeout(Duration::ZERO),
        ConnectionOptions::new("http://h").connect_timeout(Duration::from_millis(0)),
    ];
    for options in bad {
        assert!(
            matches!(options.validate(), Err(WebDavError::InvalidOption(_))),
            "{options:?}"
        );
    }

    // token 存在时不需要 password
    ConnectionOptions::new("http://h").login("alice").token("t").validate().unwrap();
}

#[test]
fn base_url_joins_prefix_and_root() {
    let url = ConnectionOptions::new("https://cloud.example.com/remote.php/dav?x=1#f")
        .root("files/alice/")
        .base_url()
        .unwrap();
    assert_eq!(url.as_str(), "https://cloud.example.com/remote.php/dav/files/alice/");

    let url = ConnectionOptions::new("http://127.0.0.1:8080").base_url().unwrap();
    assert_eq!(url.as_str(), "http://127.0.0.1:8080/");
}

#[test]
fn builder_keeps_sub_second_durations() {
    let options = ConnectionOptions::new("http://h")
        .timeout(Duration::from_millis(500))
        .connect_timeout(Duration::from_millis(1500));
    assert_eq!(options.timeout, Some(Duration::from_millis(500)));
    assert_eq!(options.connect_timeout, Duration::from_millis(1500));
    options.validate().unwrap();
}

#[test]
fn zero_timeout_from_map_is_rejected() {
    for key in ["timeout", "connect_timeout"] {
        let options =
            ConnectionOptions::from_map(&map(&[("hostname", "http://h"), (key, "0")]))
                .unwrap();
        assert!(
            matches!(options.validate(), Err(WebDavError::InvalidOption(_))),
            "{key}=0"
        );
    }
}

#[tokio::test]
async fn sub_second_timeout_still_reaches_server() {
    let (server, dav, _client) = memory_server().await;
    dav.put_file("/a.txt", b"a");

    let client = Client::new(
        ConnectionOptions::new(&server.uri())
            .root("/dav")
            .timeout(Duration::from_millis(500)),
    )
    .unwrap();
    assert!(client.check("/a.txt").await.unwrap());
}

#[test]
fn debug_hides_secrets() {
    let options = ConnectionOptions::new("http://h")
        .login("alice")
        .password("hunter2")
        .token("tok-123");
    let printed = format!("{options:?}");
    assert!(printed.contains("alice"));
    assert!(!printed.contains("hunter2"));
    assert!(!printed.contains("tok-123"));

    let auth = WebdavAuth::new(&options).unwrap();
    let printed = format!("{auth:?}");
    assert!(!printed.contains("hunter2"));
    assert!(!printed.contains("tok-123"));
}

#[test]
fn auth_prefers_token_and_fingerprints_credentials() {
    let basic = ConnectionOptions::new("http://h").login("alice").password("secret");
    let bearer = basic.clone().token("tok");
    let anonymous = ConnectionOptions::new("http://h");

    let basic_auth = WebdavAuth::new(&basic).unwrap();
    let bearer_auth = WebdavAuth::new(&bearer).unwrap();
    let anonymous_auth = WebdavAuth::new(&anonymous).unwrap();

    assert!(anonymous_auth.is_anonymous());
    assert!(!basic_auth.is_anonymous());
    assert_ne!(basic_auth, bearer_auth);
    assert_eq!(basic_auth, WebdavAuth::new(&basic.clone()).unwrap());
}
