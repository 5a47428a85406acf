//! # 倒序分页读取命令 (tail)
//!
//! 从文本文件末尾按页输出内容，适合查看大日志文件的最新部分。

use crate::utils::tail::{PageRequest, count_lines, read_tail_page};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// 命令行参数结构体
#[derive(Args, Debug)]
#[command(
    about = "从文件末尾分页读取文本行",
    long_about = "文件末尾所在页码为 1。每页按文件中的自然顺序输出，不会把整个文件载入内存。"
)]
pub struct TailArgs {
    /// 要读取的文本文件
    #[arg(value_name = "FILE", help = "文本文件路径")]
    pub file: PathBuf,

    /// 页码，从文件末尾开始计数
    #[arg(
        short = 'p',
        long,
        default_value = "1",
        help = "页码（末尾为第 1 页）"
    )]
    pub page: usize,

    /// 每页行数
    #[arg(short = 'n', long, default_value = "20", help = "每页行数")]
    pub size: usize,

    /// 同时输出文件总行数
    #[arg(short = 'c', long, help = "输出文件总行数")]
    pub count: bool,
}

/// 命令执行函数
pub async fn run(args: TailArgs) -> Result<()> {
    let page = PageRequest::new(args.page, args.size)?;

    if args.count {
        println!("总行数: {}", count_lines(&args.file)?);
    }

    let lines = read_tail_page(&args.file, page)?;
    if lines.is_empty() {
        println!("第 {} 页没有内容", args.page);
        return Ok(());
    }
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}
