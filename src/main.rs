//! # 分布式文件存储工具 (dfs-utils)
//!
//! 集成本地文件处理和远程存储操作的命令行工具，支持子命令模式。

use anyhow::Result;
use clap::{Parser, Subcommand};
use dfs_file_utils::commands::{local, remote, tail};
use tracing_subscriber::EnvFilter;

/// 主命令结构体
///
/// 使用 clap 的 Parser API 自动解析命令行参数。
#[derive(Parser, Debug)]
#[command(name = "dfs-utils")]
#[command(version = "0.1.0")]
#[command(
    about = "分布式文件存储与本地文件工具集",
    long_about = "本地文件处理与远程分布式存储操作工具。使用子命令 --help 查看详细说明。日志级别通过 RUST_LOG 设置，默认 warn。"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// 子命令枚举
#[derive(Subcommand, Debug)]
enum Commands {
    /// 从文件末尾分页读取文本行
    Tail(tail::TailArgs),
    /// 复制整个目录的内容
    CopyDir(local::CopyDirArgs),
    /// 移动目录
    MoveDir(local::MoveDirArgs),
    /// 删除目录及其全部内容
    DeleteDir(local::DeleteDirArgs),
    /// 列出目录树下的所有文件
    ListFiles(local::ListFilesArgs),
    /// 操作远程分布式存储
    Remote(remote::RemoteArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Tail(args) => tail::run(args).await,
        Commands::CopyDir(args) => local::copy(args).await,
        Commands::MoveDir(args) => local::move_to(args).await,
        Commands::DeleteDir(args) => local::delete(args).await,
        Commands::ListFiles(args) => local::list(args).await,
        Commands::Remote(args) => remote::run(args).await,
    }
}

fn init_tracing() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
