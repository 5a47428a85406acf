//! # 本地目录命令 (local)
//!
//! 复制、移动、列出和删除本地目录树。

use crate::utils::directory::{
    copy_dir_filtered, delete_dir, ensure_not_nested, list_files, move_dir,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// 复制目录参数
#[derive(Args, Debug)]
#[command(
    about = "复制整个目录的内容",
    long_about = "将源目录下的所有文件和子目录复制到目标目录，目标目录不存在时自动创建。可跳过指定名称的子目录。"
)]
pub struct CopyDirArgs {
    /// 源目录
    #[arg(value_name = "SOURCE", help = "源目录")]
    pub source: PathBuf,

    /// 目标目录
    #[arg(value_name = "TARGET", help = "目标目录")]
    pub target: PathBuf,

    /// 需要跳过的子目录名称
    #[arg(
        short = 's',
        long,
        value_name = "NAME",
        help = "跳过该名称的子目录",
        long_help = "在任意层级跳过与该名称完全相同的子目录，不影响源目录本身。"
    )]
    pub skip: Option<String>,
}

/// 移动目录参数
#[derive(Args, Debug)]
#[command(about = "移动目录：复制成功后删除源目录")]
pub struct MoveDirArgs {
    /// 源目录
    #[arg(value_name = "SOURCE", help = "源目录")]
    pub source: PathBuf,

    /// 目标目录
    #[arg(value_name = "TARGET", help = "目标目录")]
    pub target: PathBuf,
}

/// 列出文件参数
#[derive(Args, Debug)]
#[command(about = "列出目录树下的所有文件")]
pub struct ListFilesArgs {
    /// 要遍历的目录
    #[arg(value_name = "DIR", help = "要遍历的目录")]
    pub dir: PathBuf,
}

/// 删除目录参数
#[derive(Args, Debug)]
#[command(about = "删除目录及其全部内容")]
pub struct DeleteDirArgs {
    /// 要删除的目录
    #[arg(value_name = "DIR", help = "要删除的目录")]
    pub dir: PathBuf,
}

pub async fn copy(args: CopyDirArgs) -> Result<()> {
    ensure_not_nested(&args.source, &args.target)?;
    if !copy_dir_filtered(&args.source, &args.target, args.skip.as_deref()) {
        anyhow::bail!(
            "复制目录失败: {} -> {}",
            args.source.display(),
            args.target.display()
        );
    }
    println!("复制完成: {} -> {}", args.source.display(), args.target.display());
    Ok(())
}

pub async fn move_to(args: MoveDirArgs) -> Result<()> {
    ensure_not_nested(&args.source, &args.target)?;
    if !move_dir(&args.source, &args.target) {
        anyhow::bail!(
            "移动目录失败: {} -> {}",
            args.source.display(),
            args.target.display()
        );
    }
    println!("移动完成: {} -> {}", args.source.display(), args.target.display());
    Ok(())
}

pub async fn list(args: ListFilesArgs) -> Result<()> {
    if !args.dir.is_dir() {
        anyhow::bail!("目录不存在: {}", args.dir.display());
    }
    let files = list_files(&args.dir);
    for file in &files {
        println!("{}", file.display());
    }
    println!("共 {} 个文件", files.len());
    Ok(())
}

pub async fn delete(args: DeleteDirArgs) -> Result<()> {
    if !args.dir.is_dir() {
        anyhow::bail!("目录不存在: {}", args.dir.display());
    }
    delete_dir(&args.dir);
    if args.dir.exists() {
        anyhow::bail!("删除目录失败: {}", args.dir.display());
    }
    println!("已删除: {}", args.dir.display());
    Ok(())
}
