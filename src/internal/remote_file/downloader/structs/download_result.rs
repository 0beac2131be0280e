use bytes::Bytes;

/// 单次下载的结果。
#[derive(Debug)]
pub enum DownloadResult {
    /// 已保存到本地文件，附带写入的字节数
    Saved(u64),
    /// 输出到内存的完整内容
    Bytes(Bytes),
}
