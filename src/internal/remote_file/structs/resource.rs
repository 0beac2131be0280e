use chrono::{DateTime, FixedOffset};

/// 资源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    File,
    Collection,
}

/// 一次 PROPFIND 得到的资源快照，只读，不做跨请求缓存
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub path: String,              // 相对根目录的路径，以 / 开头，根目录为 "/"
    pub href: String,              // 服务端返回的原始 href
    pub name: String,              // 友好化的文件或目录名
    pub kind: ResourceKind,        // 文件还是目录
    pub size: Option<u64>,         // 文件大小（字节）
    pub last_modified: Option<DateTime<FixedOffset>>, // 原始时间
    pub created: Option<String>,   // 创建时间，原样保留
    pub content_type: Option<String>, // MIME 类型
    pub etag: Option<String>,      // 清理后的 ETag
}

impl Resource {
    pub fn is_dir(&self) -> bool {
        self.kind == ResourceKind::Collection
    }

    pub fn is_file(&self) -> bool {
        self.kind == ResourceKind::File
    }
}
