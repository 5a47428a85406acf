//! # 字节流转换模块

use anyhow::{Context, Result};
use std::io::{Cursor, Read};

/// 读取流中的全部数据为字节数组
pub fn read_to_bytes<R: Read>(mut reader: R) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .context("将流转为字节失败")?;
    Ok(bytes)
}

/// 把字节数组包装为可读取的流
pub fn bytes_to_reader(bytes: Vec<u8>) -> Cursor<Vec<u8>> {
    Cursor::new(bytes)
}
