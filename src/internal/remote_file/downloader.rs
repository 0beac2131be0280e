//! 下载器领域模块：由客户端或远程文件句柄创建并执行下载。
//!
//! 使用方式：`client.download(path)?.save_to(local).with_hook(hook).send().await`
//! 对外导出以 [`crate::remote_file`] 为准，此处仅做模块划分，不重复 pub use。

pub mod structs;
pub mod traits;
