use crate::get_remote_files;
use crate::tests::{init_tracing, load_account_optional, memory_server};
use crate::WebDavError;

#[tokio::test]
async fn get_remote_files_keeps_order_and_errors() {
    let (_server, dav, client) = memory_server().await;
    dav.add_dir("/t1");
    dav.add_dir("/t2");
    dav.put_file("/t2/a1.txt", b"a1");

    let files = get_remote_files(&client, &["t1", "t2/a1.txt", "t3", "../x"]).await;
    assert_eq!(files.len(), 4);

    let t1 = files[0].as_ref().unwrap();
    assert!(t1.is_dir());
    assert_eq!(t1.path(), "/t1");

    let a1 = files[1].as_ref().unwrap();
    assert!(!a1.is_dir());
    assert_eq!(a1.data.size, Some(2));
    assert!(a1.client.same_account(&client));

    assert!(matches!(files[2], Err(WebDavError::NotFound { .. })));
    assert!(matches!(files[3], Err(WebDavError::InvalidPath(_))));
}

/// 真实服务器冒烟测试，`src/tests/env/live.env` 不存在时跳过
#[tokio::test]
async fn get_remote_files_live() {
    init_tracing();
    let Some(account) = load_account_optional() else {
        return;
    };
    let client = account.to_client().unwrap();

    assert!(client.check("/").await.unwrap());
    for file in get_remote_files(&client, &["./"]).await {
        let remote_file = file.unwrap();
        assert!(remote_file.is_dir());
        tracing::info!(path = remote_file.path(), "remote_file: {:?}", remote_file);
    }
}
