//! # 远程存储接口模块
//!
//! 定义分布式文件存储客户端需要满足的最小接口。分块、副本、存储节点选择
//! 等工作都由具体实现（SDK）负责，这里只描述上传、查询、下载和删除。

use anyhow::Result;
use async_trait::async_trait;
use tokio::io::AsyncRead;

/// 上传成功后由存储端分配的文件位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePath {
    /// 文件所在的分组
    pub group: String,
    /// 分组内的文件路径，例如 `M00/00/19/xxx.docx`
    pub path: String,
}

impl StorePath {
    pub fn new(group: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            path: path.into(),
        }
    }

    /// 完整远程路径：`<group>/<path>`
    pub fn full_path(&self) -> String {
        format!("{}/{}", self.group, self.path)
    }
}

/// 远程文件信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// 文件大小（字节）
    pub file_size: u64,
    /// 创建时间（UNIX 秒），存储端未提供时为 `None`
    pub create_time: Option<i64>,
}

/// 上传时附带的元数据
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetaData {
    pub name: String,
    pub value: String,
}

impl MetaData {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// 上传数据源
pub type UploadReader<'a> = &'a mut (dyn AsyncRead + Unpin + Send);

/// 分布式文件存储客户端
///
/// "文件不存在" 不是错误：查询和下载以 `Ok(None)` 表示。
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// 上传 `size` 字节数据，返回存储端分配的位置
    ///
    /// `file_ext` 不带点号，可以为空。
    async fn upload_file(
        &self,
        group: &str,
        reader: UploadReader<'_>,
        size: u64,
        file_ext: &str,
        metadata: &[MetaData],
    ) -> Result<StorePath>;

    /// 查询文件信息
    async fn query_file_info(&self, group: &str, path: &str) -> Result<Option<FileInfo>>;

    /// 下载整个文件
    async fn download_file(&self, group: &str, path: &str) -> Result<Option<Vec<u8>>>;

    /// 删除文件
    async fn delete_file(&self, group: &str, path: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_path_joins_group_and_path() {
        let path = StorePath::new("group1", "M00/00/19/abc.docx");
        assert_eq!(path.full_path(), "group1/M00/00/19/abc.docx");
    }
}
