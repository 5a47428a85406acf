//! # 文件系统操作模块
//!
//! 提供文件的创建、复制、移动、删除和读写功能。
//!
//! 部分函数沿用"记录日志后继续"的约定：失败时写一条警告日志，
//! 并返回 `false` 或空结果，而不是向上传播错误。

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

use super::directory::{ensure_directory_exists, try_delete_dir};

/// 删除文件或目录
///
/// 根据路径类型自动选择删除方法：
/// - 文件：使用 `remove_file`
/// - 目录：迭代删除整个目录树，见 [`try_delete_dir`]
///
/// 路径不存在时直接返回成功。
pub fn remove_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if path.is_dir() {
        try_delete_dir(path)?;
    } else if path.exists() {
        fs::remove_file(path).with_context(|| format!("删除文件失败: {}", path.display()))?;
    }
    Ok(())
}

/// 获取文件扩展名（小写）
///
/// 如果文件没有扩展名，返回空字符串。
///
/// # 示例
///
/// ```rust
/// use dfs_file_utils::utils::filesystem::get_file_extension;
///
/// assert_eq!(get_file_extension("document.PDF"), "pdf");
/// assert_eq!(get_file_extension("archive.tar.GZ"), "gz");
/// assert_eq!(get_file_extension("no_extension"), "");
/// ```
pub fn get_file_extension<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default()
}

/// 在目录下为新文件生成一个不冲突的路径
///
/// 目录不存在时会先创建。如果同名文件已存在，在扩展名之前追加当前毫秒时间戳，
/// 例如 `report.txt` 变为 `report1717171717171.txt`。不会创建文件本身。
pub fn unique_file_path<P: AsRef<Path>>(dir_path: P, file_name: &str) -> Result<PathBuf> {
    let dir_path = dir_path.as_ref();
    ensure_directory_exists(dir_path)?;

    let candidate = dir_path.join(file_name);
    if !candidate.exists() {
        return Ok(candidate);
    }

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("系统时间早于 UNIX 纪元")?
        .as_millis();
    let renamed = match file_name.rfind('.') {
        Some(dot) => format!("{}{}{}", &file_name[..dot], millis, &file_name[dot..]),
        None => format!("{}{}", file_name, millis),
    };
    Ok(dir_path.join(renamed))
}

/// 复制单个文件
///
/// # 返回值
///
/// * `true` - 复制成功
/// * `false` - 源文件不存在或复制失败（错误已记录到日志）
pub fn copy_file<P: AsRef<Path>, Q: AsRef<Path>>(source: P, target: Q) -> bool {
    let source = source.as_ref();
    let target = target.as_ref();

    if !source.is_file() {
        return false;
    }
    match copy_file_strict(source, target) {
        Ok(()) => true,
        Err(err) => {
            warn!(
                source = %source.display(),
                target = %target.display(),
                error = %format!("{:#}", err),
                "复制单个文件操作出错"
            );
            false
        }
    }
}

/// 使用缓冲流复制文件，错误直接返回给调用方
pub fn copy_file_strict<P: AsRef<Path>, Q: AsRef<Path>>(source: P, target: Q) -> Result<()> {
    let source = source.as_ref();
    let target = target.as_ref();

    let mut reader = BufReader::new(
        File::open(source).with_context(|| format!("打开文件失败: {}", source.display()))?,
    );
    let mut writer = BufWriter::new(
        File::create(target).with_context(|| format!("创建文件失败: {}", target.display()))?,
    );

    io::copy(&mut reader, &mut writer)
        .with_context(|| format!("复制文件失败: {} -> {}", source.display(), target.display()))?;
    writer
        .flush()
        .with_context(|| format!("写入文件失败: {}", target.display()))?;
    Ok(())
}

/// 移动文件：复制成功后删除源文件
pub fn move_file<P: AsRef<Path>, Q: AsRef<Path>>(source: P, target: Q) -> bool {
    let source = source.as_ref();
    let moved = copy_file(source, target);
    if moved {
        delete_path(source);
    }
    moved
}

/// 删除文件或目录树，失败时记录警告
pub fn delete_path<P: AsRef<Path>>(path: P) {
    let path = path.as_ref();
    if let Err(err) = remove_path(path) {
        warn!(path = %path.display(), error = %format!("{:#}", err), "删除操作出错");
    }
}

/// 删除目录下（不含子目录）第一个名称匹配的普通文件
///
/// # 返回值
///
/// * `Ok(true)` - 找到并删除了文件
/// * `Ok(false)` - 目录不存在或没有匹配的文件
pub fn delete_named_file<P: AsRef<Path>>(dir_path: P, file_name: &str) -> Result<bool> {
    let dir_path = dir_path.as_ref();
    if !dir_path.is_dir() {
        return Ok(false);
    }

    let entries =
        fs::read_dir(dir_path).with_context(|| format!("读取目录失败: {}", dir_path.display()))?;
    for entry in entries.filter_map(|entry| entry.ok()) {
        let path = entry.path();
        if path.is_file() && entry.file_name().to_string_lossy() == file_name {
            fs::remove_file(&path).with_context(|| format!("删除文件失败: {}", path.display()))?;
            return Ok(true);
        }
    }
    Ok(false)
}

/// 读取整个文件为字节数组
///
/// 路径不存在或不是普通文件时返回错误。
pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    if !path.is_file() {
        anyhow::bail!("文件不存在或不是普通文件: {}", path.display());
    }
    fs::read(path).with_context(|| format!("读取文件失败: {}", path.display()))
}

/// 读取整个文件为字符串，非法 UTF-8 字节会被替换
pub fn read_string<P: AsRef<Path>>(path: P) -> Result<String> {
    let bytes = read_bytes(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// 逐行读取文件并把所有行直接拼接（不保留换行符）
///
/// 读取失败时记录警告，返回失败前已读到的内容。
pub fn read_joined_lines<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    let mut joined = String::new();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "打开文件失败");
            return joined;
        }
    };

    for line in BufReader::new(file).lines() {
        match line {
            Ok(line) => joined.push_str(&line),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "读取文件失败");
                break;
            }
        }
    }
    joined
}

/// 以追加模式写入文本，文件不存在时创建
///
/// 失败时只记录警告。
pub fn append_text<P: AsRef<Path>>(path: P, content: &str) {
    let path = path.as_ref();
    let result = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut file| {
            file.write_all(content.as_bytes())?;
            file.flush()
        });
    if let Err(err) = result {
        warn!(path = %path.display(), error = %err, "追加写入文件失败");
    }
}

/// 覆盖写入整个文件，父目录不存在时自动创建
pub fn write_bytes<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("写入文件失败: {}", path.display()))
}
