//! # 命令模块 (commands)
//!
//! 每个子命令对应一个模块，提供 `Args` 参数结构体和 `run` 执行函数。

pub mod local;
pub mod remote;
pub mod tail;
