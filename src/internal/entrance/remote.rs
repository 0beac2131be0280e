use futures_util::future::join_all;

use crate::client::Client;
use crate::error::WebDavError;
use crate::remote_file::RemoteFile;

/// 读取多个远程资源，并转换成领域结构体模型
///
/// 支持文件夹和文件混合读取，只读取资源本身（Depth 0），不会做递归处理。
/// 请求并发发出，实际在途数量受客户端的 `max_in_flight` 限制；
/// 返回结果与 `paths` 一一对应，单个路径失败不影响其它路径。
///
/// example:
/// ```ignore
/// let client = Client::new(ConnectionOptions::new("http://localhost:8080/")
///     .login("account")
///     .password("password"))?;
///
/// let files = get_remote_files(&client, &["t1", "t2/a1.txt", "t3"]).await;
/// ```
pub async fn get_remote_files(
    client: &Client,
    paths: &[&str],
) -> Vec<Result<RemoteFile, WebDavError>> {
    let tasks = paths.iter().map(|path| async move {
        let data = client.info(path).await?;
        Ok(RemoteFile::new(data, client.clone()))
    });

    // 并发获取全部的资源
    join_all(tasks).await
}
