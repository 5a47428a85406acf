//! # 工具模块 (utils)
//!
//! 提供本地文件系统操作、倒序分页读取，以及远程分布式存储的封装。

pub mod directory;
pub mod filesystem;
pub mod hash;
pub mod properties;
pub mod remote;
pub mod s3;
pub mod storage;
pub mod stream;
pub mod tail;

pub use directory::{copy_dir, delete_dir, ensure_directory_exists, list_files, move_dir};
pub use filesystem::{copy_file, get_file_extension, move_file, remove_path};
pub use remote::RemoteStore;
pub use storage::{FileInfo, MetaData, StorageClient, StorePath};
pub use tail::{PageRequest, read_tail_page};
