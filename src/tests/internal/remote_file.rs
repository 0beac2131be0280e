use crate::WebDavError;
use crate::get_remote_files;
use crate::tests::memory_server;
use crate::webdav::property::Property;

#[tokio::test]
async fn remote_file_operations() {
    let (_server, dav, client) = memory_server().await;
    dav.add_dir("/notes");
    dav.put_file("/notes/todo.md", b"- write tests");

    let mut files = get_remote_files(&client, &["/notes"]).await;
    let notes = files.remove(0).unwrap();
    assert!(notes.is_dir());
    assert!(notes.check().await.unwrap());
    assert!(matches!(notes.build_downloader(), Err(WebDavError::InvalidPath(_))));

    let children = notes.list().await.unwrap();
    assert_eq!(children.len(), 1);
    let todo = &children[0];
    assert_eq!(todo.path(), "/notes/todo.md");
    assert_eq!(todo.read().await.unwrap().as_ref(), b"- write tests");
    assert!(matches!(todo.list().await, Err(WebDavError::InvalidPath(_))));

    todo.write("- done").await.unwrap();
    let refreshed = todo.refresh().await.unwrap();
    assert_eq!(refreshed.data.size, Some(6));
    // 旧快照不变
    assert_eq!(todo.data.size, Some(13));

    let tag = Property::new("urn:example", "tag");
    todo.set_property(&tag, "urgent").await.unwrap();
    assert_eq!(todo.get_property(&tag).await.unwrap().as_deref(), Some("urgent"));

    let renamed = todo.rename("done.md").await.unwrap();
    assert_eq!(renamed, "/notes/done.md");
    assert_eq!(dav.file("/notes/done.md").unwrap(), b"- done");
    assert!(!todo.check().await.unwrap());
    assert!(matches!(todo.rename("a/b").await, Err(WebDavError::InvalidPath(_))));
}

#[tokio::test]
async fn remote_file_copy_move_delete() {
    let (_server, dav, client) = memory_server().await;
    dav.put_file("/a.txt", b"a");
    dav.put_file("/b.txt", b"b");

    let file = client.resource("/a.txt").await.unwrap();
    assert_eq!(file.info().await.unwrap().size, Some(1));
    assert!(matches!(
        client.resource("/none.txt").await,
        Err(WebDavError::NotFound { .. })
    ));

    file.copy_to("/c.txt", false).await.unwrap();
    assert!(matches!(
        file.move_to("/b.txt", false).await,
        Err(WebDavError::PreconditionFailed { .. })
    ));
    file.move_to("/b.txt", true).await.unwrap();
    assert_eq!(dav.file("/b.txt").unwrap(), b"a");
    assert!(dav.file("/a.txt").is_none());

    let copy = client.resource("/c.txt").await.unwrap();
    copy.delete().await.unwrap();
    assert!(dav.file("/c.txt").is_none());
}
