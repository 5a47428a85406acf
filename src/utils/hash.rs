//! # 哈希计算模块
//!
//! 提供内容哈希计算功能，使用 Blake3 算法和 Base58 编码。
//! 远程存储后端用它为上传的对象生成唯一名称。

/// 计算字节内容的 Blake3 哈希值并使用 Base58 编码
///
/// 相同内容总是得到相同的名称，Base58 编码避免出现路径分隔符等无效字符。
pub fn hash_bytes(bytes: &[u8]) -> String {
    let hash = blake3::hash(bytes);
    bs58::encode(hash.as_bytes()).into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_content_same_name() {
        assert_eq!(hash_bytes(b"hello"), hash_bytes(b"hello"));
        assert_ne!(hash_bytes(b"hello"), hash_bytes(b"hello!"));
        assert!(!hash_bytes(b"").contains('/'));
    }
}
