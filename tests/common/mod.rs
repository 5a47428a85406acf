#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use dfs_file_utils::utils::hash::hash_bytes;
use dfs_file_utils::utils::storage::{
    FileInfo, MetaData, StorageClient, StorePath, UploadReader,
};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;
use tokio::io::AsyncReadExt;

/// 内存中的存储实现，键为 (分组, 路径)
#[derive(Default)]
pub struct MemoryStorage {
    pub files: Mutex<HashMap<(String, String), Vec<u8>>>,
    pub metadata: Mutex<HashMap<(String, String), Vec<MetaData>>>,
    /// 设置后所有查询都返回错误
    pub fail_queries: bool,
}

impl MemoryStorage {
    pub fn insert(&self, group: &str, path: &str, content: &[u8]) {
        self.files
            .lock()
            .unwrap()
            .insert((group.to_string(), path.to_string()), content.to_vec());
    }

    pub fn contains(&self, group: &str, path: &str) -> bool {
        self.files
            .lock()
            .unwrap()
            .contains_key(&(group.to_string(), path.to_string()))
    }

    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

#[async_trait]
impl StorageClient for MemoryStorage {
    async fn upload_file(
        &self,
        group: &str,
        reader: UploadReader<'_>,
        size: u64,
        file_ext: &str,
        metadata: &[MetaData],
    ) -> Result<StorePath> {
        let mut content = Vec::new();
        reader.take(size).read_to_end(&mut content).await?;
        let name = hash_bytes(&content);
        let path = if file_ext.is_empty() {
            format!("M00/00/00/{}", name)
        } else {
            format!("M00/00/00/{}.{}", name, file_ext)
        };
        self.insert(group, &path, &content);
        self.metadata
            .lock()
            .unwrap()
            .insert((group.to_string(), path.clone()), metadata.to_vec());
        Ok(StorePath::new(group, path))
    }

    async fn query_file_info(&self, group: &str, path: &str) -> Result<Option<FileInfo>> {
        if self.fail_queries {
            anyhow::bail!("tracker unavailable");
        }
        Ok(self
            .files
            .lock()
            .unwrap()
            .get(&(group.to_string(), path.to_string()))
            .map(|content| FileInfo {
                file_size: content.len() as u64,
                create_time: None,
            }))
    }

    async fn download_file(&self, group: &str, path: &str) -> Result<Option<Vec<u8>>> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .get(&(group.to_string(), path.to_string()))
            .cloned())
    }

    async fn delete_file(&self, group: &str, path: &str) -> Result<()> {
        self.files
            .lock()
            .unwrap()
            .remove(&(group.to_string(), path.to_string()));
        Ok(())
    }
}

/// 在临时目录中创建文件，自动创建父目录
pub fn create_file(dir: &TempDir, relative: &str, content: &str) -> PathBuf {
    let path = dir.path().join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// 收集目录树下所有文件的相对路径（排序后）
pub fn relative_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = dfs_file_utils::utils::directory::list_files(root)
        .into_iter()
        .map(|path| {
            path.strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}
