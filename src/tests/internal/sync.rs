use std::fs;

use crate::WebDavError;
use crate::tests::memory_server;

#[tokio::test]
async fn push_uploads_tree_and_is_incremental() {
    let (_server, dav, client) = memory_server().await;
    let local = tempfile::tempdir().unwrap();
    fs::create_dir_all(local.path().join("sub/deeper")).unwrap();
    fs::write(local.path().join("root.txt"), b"root").unwrap();
    fs::write(local.path().join("sub/one.txt"), b"one").unwrap();
    fs::write(local.path().join("sub/deeper/two.txt"), b"two").unwrap();

    let report = client.push(local.path(), "/backup/2024").await.unwrap();
    let mut transferred = report.transferred.clone();
    transferred.sort();
    assert_eq!(
        transferred,
        vec![
            "/backup/2024/root.txt",
            "/backup/2024/sub/deeper/two.txt",
            "/backup/2024/sub/one.txt",
        ]
    );
    assert!(report.created_dirs.contains(&"/backup".to_string()));
    assert!(report.created_dirs.contains(&"/backup/2024/sub/deeper".to_string()));
    assert_eq!(dav.file("/backup/2024/sub/deeper/two.txt").unwrap(), b"two");

    // 第二次没有变化
    let again = client.push(local.path(), "/backup/2024").await.unwrap();
    assert!(again.is_noop(), "{again:?}");
    assert_eq!(again.skipped.len(), 3);

    // 改动大小后只传这一个
    fs::write(local.path().join("sub/one.txt"), b"one, edited").unwrap();
    let changed = client.push(local.path(), "/backup/2024").await.unwrap();
    assert_eq!(changed.transferred, vec!["/backup/2024/sub/one.txt"]);
    assert_eq!(dav.file("/backup/2024/sub/one.txt").unwrap(), b"one, edited");
}

#[tokio::test]
async fn push_missing_local_dir() {
    let (_server, _dav, client) = memory_server().await;
    let local = tempfile::tempdir().unwrap();
    let result = client.push(local.path().join("nope"), "/x").await;
    assert!(matches!(result, Err(WebDavError::LocalNotFound { .. })));
}

#[tokio::test]
async fn pull_downloads_tree_and_is_incremental() {
    let (_server, dav, client) = memory_server().await;
    dav.add_dir("/share");
    dav.add_dir("/share/img");
    dav.put_file("/share/readme.md", b"# readme");
    dav.put_file("/share/img/logo.png", &[0x89, b'P', b'N', b'G']);

    let local = tempfile::tempdir().unwrap();
    let target = local.path().join("mirror");

    let report = client.pull("/share", &target).await.unwrap();
    assert_eq!(report.transferred.len(), 2);
    let mut created = report.created_dirs.clone();
    created.sort();
    assert_eq!(created, vec!["/share", "/share/img"]);
    assert_eq!(fs::read(target.join("readme.md")).unwrap(), b"# readme");
    assert_eq!(fs::read(target.join("img/logo.png")).unwrap(), [0x89, b'P', b'N', b'G']);

    let again = client.pull("/share", &target).await.unwrap();
    assert!(again.is_noop(), "{again:?}");
    assert_eq!(again.skipped.len(), 2);

    // 远端大小变化后重新下载
    dav.put_file("/share/readme.md", b"# readme v2");
    let changed = client.pull("/share", &target).await.unwrap();
    assert_eq!(changed.transferred, vec!["/share/readme.md"]);
    assert_eq!(fs::read(target.join("readme.md")).unwrap(), b"# readme v2");
}

#[tokio::test]
async fn pull_skips_local_directory_with_same_name() {
    let (_server, dav, client) = memory_server().await;
    dav.put_file("/clash", b"file on server");

    let local = tempfile::tempdir().unwrap();
    fs::create_dir(local.path().join("clash")).unwrap();

    let report = client.pull("/", local.path()).await.unwrap();
    assert_eq!(report.skipped, vec!["/clash"]);
    assert!(local.path().join("clash").is_dir());
}

#[tokio::test]
async fn push_then_pull_round_trip() {
    let (_server, _dav, client) = memory_server().await;
    let source = tempfile::tempdir().unwrap();
    fs::create_dir(source.path().join("nested")).unwrap();
    fs::write(source.path().join("nested/data.bin"), vec![42u8; 70_000]).unwrap();

    client.push(source.path(), "/roundtrip").await.unwrap();

    let dest = tempfile::tempdir().unwrap();
    client.pull("/roundtrip", dest.path()).await.unwrap();
    assert_eq!(
        fs::read(dest.path().join("nested/data.bin")).unwrap(),
        vec![42u8; 70_000]
    );
}

#[cfg(unix)]
#[tokio::test]
async fn push_skips_directory_symlinks() {
    use std::os::unix::fs::symlink;

    let (_server, dav, client) = memory_server().await;
    let local = tempfile::tempdir().unwrap();
    fs::create_dir(local.path().join("sub")).unwrap();
    fs::write(local.path().join("root.txt"), b"root").unwrap();
    // 指回上级目录，跟随就会无限递归
    symlink("..", local.path().join("sub/up")).unwrap();
    symlink(local.path().join("root.txt"), local.path().join("sub/link.txt")).unwrap();
    symlink("missing", local.path().join("sub/dead")).unwrap();

    let report = client.push(local.path(), "/backup").await.unwrap();

    let mut skipped = report.skipped.clone();
    skipped.sort();
    assert_eq!(skipped, vec!["/backup/sub/dead", "/backup/sub/up"]);
    assert!(!dav.has_dir("/backup/sub/up"));
    assert_eq!(dav.file("/backup/sub/link.txt").unwrap(), b"root");
    assert!(report.transferred.contains(&"/backup/sub/link.txt".to_string()));
}
