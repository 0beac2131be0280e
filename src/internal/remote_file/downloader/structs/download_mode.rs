use std::path::PathBuf;

/// 下载输出方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadMode {
    /// 整个文件读进内存
    OutputBytes,
    /// 流式写到本地文件
    SaveFile(PathBuf),
}
