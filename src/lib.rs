//! # DFS File Utils - 分布式文件存储与本地文件工具集
//!
//! 对分布式文件存储客户端做一层薄封装（上传、下载、删除、存在性判断），
//! 并提供通用的本地文件系统工具函数。
//!
//! ## 模块
//!
//! - `commands` - CLI 命令实现
//! - `config` - JSON 配置文件解析
//! - `utils` - 公共工具函数，包括目录操作、倒序分页读取、远程存储封装等

pub mod commands;
pub mod config;
pub mod utils;
