//! # 远程存储封装模块
//!
//! 在 [`StorageClient`] 之上提供按默认分组访问远程文件的便捷方法：
//! 存在性判断、上传、下载到本地、删除以及缩略图路径计算。
//!
//! 远程存储只在配置中存在 `store` 段时才会被创建，调用方通过
//! `Option<RemoteStore<_>>` 显式表达"未启用"。

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::io::AsyncRead;
use tracing::{debug, error, warn};

use super::directory::delete_files_in_tree;
use super::filesystem::{delete_path, get_file_extension, write_bytes};
use super::s3::S3Storage;
use super::storage::{MetaData, StorageClient};
use crate::config::{StoreConfig, ThumbConfig};

/// 远程存储客户端封装
pub struct RemoteStore<C> {
    client: C,
    group_name: String,
    file_down_url: PathBuf,
    thumb: ThumbConfig,
}

impl RemoteStore<S3Storage> {
    /// 根据配置创建基于 S3 的远程存储
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let client = S3Storage::new(&config.s3).await?;
        Ok(Self::new(client, &config.group_name, &config.file_down_url).with_thumb(config.thumb))
    }
}

impl<C: StorageClient> RemoteStore<C> {
    /// 创建远程存储封装
    ///
    /// # 参数
    ///
    /// * `client` - 存储客户端
    /// * `group_name` - 默认分组
    /// * `file_down_url` - 本地下载根目录，相对路径的本地文件都解析到这里
    pub fn new(client: C, group_name: &str, file_down_url: impl Into<PathBuf>) -> Self {
        Self {
            client,
            group_name: group_name.to_string(),
            file_down_url: file_down_url.into(),
            thumb: ThumbConfig::default(),
        }
    }

    pub fn with_thumb(mut self, thumb: ThumbConfig) -> Self {
        self.thumb = thumb;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    /// 去掉路径中的分组前缀
    ///
    /// `http://host/group1/M00/00/19/a.docx` 和 `group1/M00/00/19/a.docx`
    /// 都得到 `M00/00/19/a.docx`；不含分组的路径原样返回。
    pub fn strip_group<'a>(&self, path: &'a str) -> &'a str {
        let prefix = format!("{}/", self.group_name);
        match path.find(&prefix) {
            Some(index) => &path[index + prefix.len()..],
            None => path,
        }
    }

    /// 判断远程文件是否存在
    ///
    /// 查询出错时视为不存在。
    pub async fn exists(&self, path: &str) -> bool {
        let path = self.strip_group(path);
        match self.client.query_file_info(&self.group_name, path).await {
            Ok(info) => info.is_some(),
            Err(err) => {
                debug!(path, error = %format!("{:#}", err), "查询远程文件失败");
                false
            }
        }
    }

    /// 删除远程文件
    ///
    /// # 返回值
    ///
    /// * `Ok(true)` - 文件存在并已删除
    /// * `Ok(false)` - 文件不存在
    /// * `Err(anyhow::Error)` - 删除失败
    pub async fn delete_file(&self, path: &str) -> Result<bool> {
        let path = self.strip_group(path);
        if !self.exists(path).await {
            return Ok(false);
        }
        self.client
            .delete_file(&self.group_name, path)
            .await
            .with_context(|| format!("删除远程文件失败: {}", path))?;
        Ok(true)
    }

    /// 删除本地下载目录中的文件
    ///
    /// 相对路径解析到下载根目录下。目标是文件时直接删除；
    /// 是目录时删除其中所有文件，保留目录结构。
    pub fn delete_local_file(&self, path: &str) -> Result<bool> {
        let local = self.resolve_local(path);
        if local.is_file() {
            std::fs::remove_file(&local)
                .with_context(|| format!("删除本地文件失败: {}", local.display()))?;
        } else {
            delete_files_in_tree(&local)
                .with_context(|| format!("删除本地文件失败: {}", local.display()))?;
        }
        Ok(true)
    }

    fn resolve_local(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.starts_with(&self.file_down_url) {
            path.to_path_buf()
        } else {
            self.file_down_url.join(path.strip_prefix("/").unwrap_or(path))
        }
    }

    /// 上传本地文件，返回远程完整路径
    pub async fn upload_path(&self, local_path: &Path) -> Result<String> {
        if !local_path.is_file() {
            anyhow::bail!("本地文件不存在: {}", local_path.display());
        }
        let size = tokio::fs::metadata(local_path)
            .await
            .with_context(|| format!("无法获取文件信息: {}", local_path.display()))?
            .len();
        let mut file = tokio::fs::File::open(local_path)
            .await
            .with_context(|| format!("打开文件失败: {}", local_path.display()))?;

        self.upload_with_ext(&mut file, size, &get_file_extension(local_path), &[])
            .await
            .with_context(|| format!("上传文件失败: {}", local_path.display()))
    }

    /// 上传数据流，扩展名取自 `remote_name`，返回远程完整路径
    pub async fn upload_stream<R>(&self, reader: &mut R, size: u64, remote_name: &str) -> Result<String>
    where
        R: AsyncRead + Unpin + Send,
    {
        self.upload_with_ext(reader, size, &get_file_extension(remote_name), &[])
            .await
            .with_context(|| format!("上传数据流失败: {}", remote_name))
    }

    /// 上传字节数组，返回远程完整路径
    pub async fn upload_bytes(&self, bytes: &[u8], remote_name: &str) -> Result<String> {
        let mut reader = bytes;
        self.upload_stream(&mut reader, bytes.len() as u64, remote_name)
            .await
    }

    /// 上传数据流并附带元数据，返回远程完整路径
    pub async fn upload_with_metadata<R>(
        &self,
        reader: &mut R,
        size: u64,
        remote_name: &str,
        metadata: &[MetaData],
    ) -> Result<String>
    where
        R: AsyncRead + Unpin + Send,
    {
        self.upload_with_ext(reader, size, &get_file_extension(remote_name), metadata)
            .await
            .with_context(|| format!("上传数据流失败: {}", remote_name))
    }

    async fn upload_with_ext<R>(
        &self,
        reader: &mut R,
        size: u64,
        file_ext: &str,
        metadata: &[MetaData],
    ) -> Result<String>
    where
        R: AsyncRead + Unpin + Send,
    {
        let store_path = self
            .client
            .upload_file(&self.group_name, reader, size, file_ext, metadata)
            .await?;
        Ok(store_path.full_path())
    }

    /// 下载远程文件到本地
    ///
    /// 先删除本地已有的同名文件，再创建父目录并写入。
    /// 远程文件不存在或下载失败时记录错误日志并返回 `false`。
    pub async fn download_to_local(&self, local_path: &Path, remote_path: &str) -> bool {
        delete_path(local_path);
        let remote_path = self.strip_group(remote_path);

        match self.try_download(local_path, remote_path).await {
            Ok(true) => true,
            Ok(false) => {
                error!(remote = remote_path, "下载到本地失败, 文件系统无此文件");
                false
            }
            Err(err) => {
                error!(
                    remote = remote_path,
                    local = %local_path.display(),
                    error = %format!("{:#}", err),
                    "下载到本地失败"
                );
                false
            }
        }
    }

    async fn try_download(&self, local_path: &Path, remote_path: &str) -> Result<bool> {
        let bytes = match self.read_remote_bytes(remote_path).await? {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => return Ok(false),
        };
        write_bytes(local_path, &bytes)?;
        Ok(true)
    }

    /// 读取远程文件内容，不存在时返回 `None`
    pub async fn read_remote_bytes(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let path = self.strip_group(path);
        let info = self
            .client
            .query_file_info(&self.group_name, path)
            .await
            .with_context(|| format!("查询远程文件失败: {}", path))?;
        if info.is_none() {
            return Ok(None);
        }
        self.client
            .download_file(&self.group_name, path)
            .await
            .with_context(|| format!("下载远程文件失败: {}", path))
    }

    /// 根据图片地址计算缩略图地址
    ///
    /// 在扩展名之前插入 `_<宽>x<高>`。远程文件不存在时返回空字符串。
    pub async fn thumb_path(&self, url: &str) -> String {
        let path = self.strip_group(url);
        if !self.exists(path).await {
            warn!(path, "获取缩略图地址失败, 文件不存在");
            return String::new();
        }
        thumb_image_path(path, self.thumb)
    }
}

/// 在文件名的扩展名之前插入缩略图尺寸后缀
pub fn thumb_image_path(path: &str, thumb: ThumbConfig) -> String {
    let suffix = format!("_{}x{}", thumb.width, thumb.height);
    let name_start = path.rfind('/').map_or(0, |index| index + 1);
    match path[name_start..].rfind('.') {
        Some(dot) => {
            let dot = name_start + dot;
            format!("{}{}{}", &path[..dot], suffix, &path[dot..])
        }
        None => format!("{}{}", path, suffix),
    }
}
