//! # 属性文件模块
//!
//! 更新 `key=value` 格式的属性文件中的单个键。

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::warn;

/// 更新属性文件中的一个键并写回文件
///
/// 已有的键在原位置替换，新键追加到末尾，其余行（包括注释）保持不变。
/// 文件首行写入 `#Update '<key>' value` 注释。失败时只记录警告。
pub fn save_property<P: AsRef<Path>>(path: P, key: &str, value: &str) {
    let path = path.as_ref();
    if let Err(err) = try_save_property(path, key, value) {
        warn!(
            path = %path.display(),
            key,
            error = %format!("{:#}", err),
            "更新属性文件失败"
        );
    }
}

/// 更新属性文件中的一个键，错误直接返回给调用方
pub fn try_save_property(path: &Path, key: &str, value: &str) -> Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("读取属性文件失败: {}", path.display()))?;

    let updated = update_property(&content, key, value);
    fs::write(path, updated).with_context(|| format!("写入属性文件失败: {}", path.display()))
}

/// 读取属性文件中某个键的值
pub fn read_property<P: AsRef<Path>>(path: P, key: &str) -> Result<Option<String>> {
    let path = path.as_ref();
    let content =
        fs::read_to_string(path).with_context(|| format!("读取属性文件失败: {}", path.display()))?;

    Ok(content
        .lines()
        .filter_map(parse_entry)
        .find(|(name, _)| *name == key)
        .map(|(_, value)| value.to_string()))
}

fn update_property(content: &str, key: &str, value: &str) -> String {
    let header = format!("#Update '{}' value", key);
    let mut lines: Vec<String> = Vec::new();
    let mut replaced = false;

    for line in content.lines() {
        // 上一次写入留下的头注释
        if lines.is_empty() && line.starts_with("#Update '") {
            continue;
        }
        match parse_entry(line) {
            Some((name, _)) if name == key && !replaced => {
                lines.push(format!("{}={}", key, value));
                replaced = true;
            }
            _ => lines.push(line.to_string()),
        }
    }
    if !replaced {
        lines.push(format!("{}={}", key, value));
    }

    let mut output = header;
    for line in lines {
        output.push('\n');
        output.push_str(&line);
    }
    output.push('\n');
    output
}

/// 解析一行属性，注释和空行返回 `None`
fn parse_entry(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
        return None;
    }
    let split = trimmed.find(['=', ':'])?;
    Some((trimmed[..split].trim(), trimmed[split + 1..].trim()))
}
