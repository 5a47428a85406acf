//! # 目录管理模块
//!
//! 提供目录的创建、复制、移动、删除和遍历功能。
//! 所有树形操作都是迭代式遍历，不依赖递归，目录层级再深也不会栈溢出。

use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// 确保目录存在，如果不存在则递归创建所有必要的父目录
///
/// # 返回值
///
/// * `Ok(())` - 目录已存在或创建成功
/// * `Err(anyhow::Error)` - 创建目录失败，包含详细错误信息
pub fn ensure_directory_exists<P: AsRef<Path>>(dir_path: P) -> Result<()> {
    let dir_path = dir_path.as_ref();

    if !dir_path.exists() {
        fs::create_dir_all(dir_path)
            .with_context(|| format!("创建目录失败: {}", dir_path.display()))?;
    }
    Ok(())
}

/// 创建目录，失败时只记录警告
pub fn new_folder<P: AsRef<Path>>(dir_path: P) {
    if let Err(err) = ensure_directory_exists(dir_path) {
        warn!(error = %format!("{:#}", err), "新建目录操作出错");
    }
}

/// 复制整个目录的内容
///
/// 目标目录不存在时自动创建。失败时记录警告并返回 `false`。
pub fn copy_dir<P: AsRef<Path>, Q: AsRef<Path>>(source: P, target: Q) -> bool {
    copy_dir_filtered(source, target, None)
}

/// 复制整个目录的内容，跳过指定名称的子目录
///
/// `skip_dir_name` 在任意层级生效，但不会作用于源目录本身。
///
/// # 返回值
///
/// * `true` - 复制成功
/// * `false` - 复制失败，错误已记录到日志
pub fn copy_dir_filtered<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    target: Q,
    skip_dir_name: Option<&str>,
) -> bool {
    let source = source.as_ref();
    let target = target.as_ref();

    match try_copy_dir(source, target, skip_dir_name) {
        Ok(()) => true,
        Err(err) => {
            warn!(
                source = %source.display(),
                target = %target.display(),
                error = %format!("{:#}", err),
                "复制整个文件夹内容操作出错"
            );
            false
        }
    }
}

/// 复制目录，错误直接返回给调用方
///
/// 目标目录不能是源目录本身或位于源目录之内。
pub fn try_copy_dir(source: &Path, target: &Path, skip_dir_name: Option<&str>) -> Result<()> {
    if !source.is_dir() {
        anyhow::bail!("源目录不存在: {}", source.display());
    }
    ensure_not_nested(source, target)?;

    let mut pending = VecDeque::from([(source.to_path_buf(), target.to_path_buf())]);

    while let Some((from_dir, to_dir)) = pending.pop_front() {
        ensure_directory_exists(&to_dir)?;

        let entries = fs::read_dir(&from_dir)
            .with_context(|| format!("读取目录失败: {}", from_dir.display()))?;
        for entry in entries {
            let entry =
                entry.with_context(|| format!("读取目录项失败: {}", from_dir.display()))?;
            let path = entry.path();
            let dest = to_dir.join(entry.file_name());

            if path.is_file() {
                fs::copy(&path, &dest).with_context(|| {
                    format!("复制文件失败: {} -> {}", path.display(), dest.display())
                })?;
            } else if path.is_dir() {
                let skipped = skip_dir_name
                    .is_some_and(|name| entry.file_name().to_string_lossy() == name);
                if !skipped {
                    pending.push_back((path, dest));
                }
            }
        }
    }
    Ok(())
}

/// 检查目标目录不在源目录之内（含两者相同）
pub fn ensure_not_nested(source: &Path, target: &Path) -> Result<()> {
    let source = source
        .canonicalize()
        .with_context(|| format!("源目录不存在: {}", source.display()))?;
    let target = resolve_path(target)?;
    if target.starts_with(&source) {
        anyhow::bail!(
            "目标目录不能位于源目录之内: {} -> {}",
            source.display(),
            target.display()
        );
    }
    Ok(())
}

/// 把可能尚不存在的路径解析为绝对路径：规范化最近的已存在祖先，再拼接剩余部分
fn resolve_path(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("无法获取当前工作目录")?
            .join(path)
    };

    let mut existing = absolute.as_path();
    let mut rest = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = existing
        .canonicalize()
        .with_context(|| format!("无法解析路径: {}", path.display()))?;
    for name in rest.into_iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}

/// 移动目录：先复制，再删除源目录
///
/// 复制失败时保留源目录。
pub fn move_dir<P: AsRef<Path>, Q: AsRef<Path>>(source: P, target: Q) -> bool {
    let source = source.as_ref();
    if !copy_dir_filtered(source, target, None) {
        return false;
    }
    delete_dir(source);
    true
}

/// 删除目录及其全部内容，失败时记录警告
pub fn delete_dir<P: AsRef<Path>>(dir_path: P) {
    let dir_path = dir_path.as_ref();
    if let Err(err) = try_delete_dir(dir_path) {
        warn!(path = %dir_path.display(), error = %format!("{:#}", err), "删除文件夹操作出错");
    }
}

/// 删除目录及其全部内容，错误直接返回给调用方
///
/// 路径不存在或不是目录时不做任何操作。
pub fn try_delete_dir(dir_path: &Path) -> Result<()> {
    if !dir_path.is_dir() {
        return Ok(());
    }
    try_clear_dir(dir_path)?;
    fs::remove_dir(dir_path).with_context(|| format!("删除目录失败: {}", dir_path.display()))
}

/// 清空目录里面的所有内容，保留目录本身
///
/// 路径不存在或不是目录时不做任何操作。
pub fn clear_dir<P: AsRef<Path>>(dir_path: P) {
    let dir_path = dir_path.as_ref();
    if let Err(err) = try_clear_dir(dir_path) {
        warn!(path = %dir_path.display(), error = %format!("{:#}", err), "清空文件夹操作出错");
    }
}

fn try_clear_dir(dir_path: &Path) -> Result<()> {
    if !dir_path.is_dir() {
        return Ok(());
    }

    // 先访问目录内容再访问目录本身，保证删除目录时它已经为空；符号链接不跟随
    for entry in WalkDir::new(dir_path).min_depth(1).contents_first(true) {
        let entry = entry.with_context(|| format!("遍历目录失败: {}", dir_path.display()))?;
        let path = entry.path();
        if entry.file_type().is_dir() {
            fs::remove_dir(path).with_context(|| format!("删除目录失败: {}", path.display()))?;
        } else {
            fs::remove_file(path).with_context(|| format!("删除文件失败: {}", path.display()))?;
        }
    }
    Ok(())
}

/// 删除目录树中的所有普通文件，保留目录结构
pub fn delete_files_in_tree<P: AsRef<Path>>(dir_path: P) -> Result<()> {
    let dir_path = dir_path.as_ref();
    if !dir_path.exists() {
        return Ok(());
    }

    for entry in WalkDir::new(dir_path) {
        let entry = entry.with_context(|| format!("遍历目录失败: {}", dir_path.display()))?;
        if entry.file_type().is_file() {
            fs::remove_file(entry.path())
                .with_context(|| format!("删除文件失败: {}", entry.path().display()))?;
        }
    }
    Ok(())
}

/// 列出目录树下的所有普通文件（扁平化）
///
/// 传入的不是目录时返回空列表。无法读取的子目录会被跳过。
pub fn list_files<P: AsRef<Path>>(dir_path: P) -> Vec<PathBuf> {
    let dir_path = dir_path.as_ref();
    if !dir_path.is_dir() {
        return Vec::new();
    }

    WalkDir::new(dir_path)
        .into_iter()
        .filter_map(|entry| entry.ok()) // 忽略遍历错误
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}
