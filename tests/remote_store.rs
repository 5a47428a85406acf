use dfs_file_utils::config::ThumbConfig;
use dfs_file_utils::utils::remote::RemoteStore;
use dfs_file_utils::utils::storage::MetaData;
use std::fs;
use tempfile::tempdir;

mod common;
use common::{MemoryStorage, create_file};

fn store(down: &std::path::Path) -> RemoteStore<MemoryStorage> {
    RemoteStore::new(MemoryStorage::default(), "group1", down)
}

/// 测试：分组前缀可以出现在完整地址中。
#[test]
fn test_strip_group() {
    let dir = tempdir().unwrap();
    let store = store(dir.path());

    assert_eq!(store.strip_group("group1/M00/00/19/a.docx"), "M00/00/19/a.docx");
    assert_eq!(
        store.strip_group("http://219.142.87.76:8080/group1/M00/00/19/a.docx"),
        "M00/00/19/a.docx"
    );
    assert_eq!(store.strip_group("M00/00/19/a.docx"), "M00/00/19/a.docx");
}

/// 测试：上传字节后可以判断存在、读取内容、再删除。
#[tokio::test]
async fn test_upload_exists_read_delete_cycle() {
    let dir = tempdir().unwrap();
    let store = store(dir.path());

    let remote = store.upload_bytes(b"report body", "report.DOCX").await.unwrap();
    assert!(remote.starts_with("group1/M00/"));
    assert!(remote.ends_with(".docx"));

    assert!(store.exists(&remote).await);
    assert_eq!(
        store.read_remote_bytes(&remote).await.unwrap(),
        Some(b"report body".to_vec())
    );

    assert!(store.delete_file(&remote).await.unwrap());
    assert!(!store.exists(&remote).await);
    // 再次删除：文件已不存在
    assert!(!store.delete_file(&remote).await.unwrap());
    assert_eq!(store.read_remote_bytes(&remote).await.unwrap(), None);
}

/// 测试：上传本地文件和带元数据的数据流。
#[tokio::test]
async fn test_upload_path_and_metadata() {
    let dir = tempdir().unwrap();
    let store = store(dir.path());
    let local = create_file(&dir, "afile.data", "local content");

    let remote = store.upload_path(&local).await.unwrap();
    assert!(remote.ends_with(".data"));
    assert!(store.exists(&remote).await);

    let metadata = vec![
        MetaData::new("Author", "tobato"),
        MetaData::new("CreateDate", "2016-01-05"),
    ];
    let mut reader: &[u8] = b"with metadata";
    let remote = store
        .upload_with_metadata(&mut reader, 13, "meta.txt", &metadata)
        .await
        .unwrap();
    let key = store.strip_group(&remote).to_string();
    let stored = store.client().metadata.lock().unwrap()[&("group1".to_string(), key)].clone();
    assert_eq!(stored, metadata);

    assert!(store.upload_path(&dir.path().join("missing.bin")).await.is_err());
}

/// 测试：下载到本地会创建父目录，并覆盖已有文件。
#[tokio::test]
async fn test_download_to_local() {
    let dir = tempdir().unwrap();
    let store = store(dir.path());
    store.client().insert("group1", "M00/00/01/a.txt", b"remote data");

    let local = create_file(&dir, "nested/deeper/a.txt", "stale");
    assert!(store.download_to_local(&local, "group1/M00/00/01/a.txt").await);
    assert_eq!(fs::read_to_string(&local).unwrap(), "remote data");

    // 远程不存在：返回 false，本地旧文件已被删除
    let missing = dir.path().join("other/b.txt");
    create_file(&dir, "other/b.txt", "old");
    assert!(!store.download_to_local(&missing, "M00/00/01/none.txt").await);
    assert!(!missing.exists());
}

/// 测试：查询出错时视为不存在，下载返回 false。
#[tokio::test]
async fn test_query_failure_is_negative_result() {
    let dir = tempdir().unwrap();
    let client = MemoryStorage {
        fail_queries: true,
        ..Default::default()
    };
    client.insert("group1", "M00/00/01/a.txt", b"x");
    let store = RemoteStore::new(client, "group1", dir.path());

    assert!(!store.exists("M00/00/01/a.txt").await);
    assert!(store.read_remote_bytes("M00/00/01/a.txt").await.is_err());
    assert!(!store.download_to_local(&dir.path().join("a.txt"), "M00/00/01/a.txt").await);
    assert!(!store.delete_file("M00/00/01/a.txt").await.unwrap());
    assert!(store.client().contains("group1", "M00/00/01/a.txt"));
}

/// 测试：删除本地下载目录中的文件或目录内的文件。
#[test]
fn test_delete_local_file() {
    let dir = tempdir().unwrap();
    let store = store(dir.path());
    let file = create_file(&dir, "group1/M00/a.txt", "a");
    create_file(&dir, "batch/1.txt", "1");
    create_file(&dir, "batch/sub/2.txt", "2");

    // 相对路径解析到下载根目录
    assert!(store.delete_local_file("group1/M00/a.txt").unwrap());
    assert!(!file.exists());

    // 绝对路径（已在下载根目录下）原样使用
    let batch = dir.path().join("batch");
    assert!(store.delete_local_file(batch.to_str().unwrap()).unwrap());
    assert!(batch.join("sub").is_dir());
    assert!(!batch.join("sub/2.txt").exists());
}

/// 测试：缩略图地址在扩展名前插入尺寸，文件不存在时为空。
#[tokio::test]
async fn test_thumb_path() {
    let dir = tempdir().unwrap();
    let store = store(dir.path()).with_thumb(ThumbConfig {
        width: 150,
        height: 150,
    });
    store.client().insert("group1", "M00/00/19/pic.jpg", b"jpeg");

    assert_eq!(
        store.thumb_path("group1/M00/00/19/pic.jpg").await,
        "M00/00/19/pic_150x150.jpg"
    );
    assert_eq!(store.thumb_path("group1/M00/00/19/none.jpg").await, "");
    assert_eq!(store.client().len(), 1);
}
