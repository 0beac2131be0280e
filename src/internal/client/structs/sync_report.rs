/// pull / push 的结果汇总，三个列表里都是相对根目录的远程路径
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// 实际传输的文件
    pub transferred: Vec<String>,
    /// 两边一致、类型冲突或是本地目录符号链接而跳过的条目
    pub skipped: Vec<String>,
    /// 新建了目录的一侧对应的远程路径：push 为远程新建的目录，
    /// pull 为在本地新建了对应目录的远程目录
    pub created_dirs: Vec<String>,
}

impl SyncReport {
    pub fn is_noop(&self) -> bool {
        self.transferred.is_empty() && self.created_dirs.is_empty()
    }
}
