//! # 远程存储命令 (remote)
//!
//! 读取 JSON 配置文件，对分布式存储执行存在性判断、上传、下载、删除和缩略图地址查询。
//! 配置中没有 `store` 段时拒绝执行。

use crate::config::Config;
use crate::utils::remote::RemoteStore;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// 命令行参数结构体
#[derive(Args, Debug)]
#[command(
    about = "操作远程分布式存储",
    long_about = "读取配置文件中的 store 段连接远程存储。路径可以带分组前缀（如 group1/M00/00/19/a.docx），也可以不带。"
)]
pub struct RemoteArgs {
    /// JSON 格式的配置文件路径
    #[arg(short = 'c', long, value_name = "CONFIG", help = "JSON 格式的配置文件路径")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub action: RemoteAction,
}

/// 远程操作
#[derive(Subcommand, Debug)]
pub enum RemoteAction {
    /// 判断远程文件是否存在
    Exists {
        #[arg(value_name = "REMOTE")]
        path: String,
    },
    /// 上传本地文件，输出远程完整路径
    Upload {
        #[arg(value_name = "LOCAL")]
        file: PathBuf,
    },
    /// 下载远程文件到本地
    Download {
        #[arg(value_name = "REMOTE")]
        path: String,
        #[arg(value_name = "LOCAL")]
        local: PathBuf,
    },
    /// 删除远程文件
    Delete {
        #[arg(value_name = "REMOTE")]
        path: String,
    },
    /// 输出图片的缩略图地址
    Thumb {
        #[arg(value_name = "REMOTE")]
        path: String,
    },
}

/// 命令执行函数
pub async fn run(args: RemoteArgs) -> Result<()> {
    let config = Config::load(&args.config)?;
    let store_config = config
        .store
        .with_context(|| format!("配置文件未启用远程存储 (缺少 store 段): {}", args.config.display()))?;

    let store = RemoteStore::connect(&store_config).await?;

    match args.action {
        RemoteAction::Exists { path } => {
            let exists = store.exists(&path).await;
            println!("{}", if exists { "存在" } else { "不存在" });
        }
        RemoteAction::Upload { file } => {
            let remote = store.upload_path(&file).await?;
            println!("上传完成: {}", remote);
        }
        RemoteAction::Download { path, local } => {
            if !store.download_to_local(&local, &path).await {
                anyhow::bail!("下载失败: {}", path);
            }
            println!("下载完成: {} -> {}", path, local.display());
        }
        RemoteAction::Delete { path } => {
            if store.delete_file(&path).await? {
                println!("已删除: {}", path);
            } else {
                println!("远程文件不存在: {}", path);
            }
        }
        RemoteAction::Thumb { path } => {
            let thumb = store.thumb_path(&path).await;
            if thumb.is_empty() {
                anyhow::bail!("远程文件不存在: {}", path);
            }
            match &store_config.server_url {
                Some(server) => println!(
                    "{}/{}/{}",
                    server.trim_end_matches('/'),
                    store.group_name(),
                    thumb
                ),
                None => println!("{}", thumb),
            }
        }
    }
    Ok(())
}
