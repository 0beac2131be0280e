/// 内部导出的模块
mod internal;

#[cfg(test)]
mod tests;

/// 导出核心入口
pub use internal::client::structs::Client;
pub use internal::entrance::remote::*;
pub use internal::error::webdav_error::WebDavError;

pub mod config {
    use crate::internal;
    pub use internal::config::connection_options::*;
}

pub mod error {
    use crate::internal;
    pub use internal::error::webdav_error::WebDavError;
}

pub mod auth {
    use crate::internal;
    pub use internal::auth::structs::webdav_auth::WebdavAuth;
}

pub mod client {
    use crate::internal;
    pub use internal::client::structs::*;
}

/// 对外提供webdav基础能力（路径、属性名、原始 XML 结构），以防有人自己要用
pub mod webdav {
    pub mod enums {
        use crate::internal;
        pub use internal::webdav::enums::*;
    }

    pub mod path {
        use crate::internal;
        pub use internal::webdav::remote_path::RemotePath;
    }

    pub mod property {
        use crate::internal;
        pub use internal::webdav::raw_xml::request_body::{
            DAV_NAMESPACE, Property,
        };
    }

    pub mod traits {
        pub use crate::internal::webdav::raw_xml::impl_multi_status::ToResources;
    }

    pub mod structs {
        pub use crate::internal::webdav::raw_xml::raw_file::*;
    }
}

pub mod remote_file {
    use crate::internal;
    // 结构体模型
    pub use internal::remote_file::structs::remote_file::*;
    pub use internal::remote_file::structs::resource::*;
    // 下载器：类型与入口（以 lib 为中心，此处统一导出）
    pub use internal::remote_file::downloader::structs::*;
    pub use internal::remote_file::downloader::traits::download;
    pub use internal::remote_file::downloader::traits::download::{
        DownloadHook, HookAbort,
    };
}
