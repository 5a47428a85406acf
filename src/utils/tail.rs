//! # 倒序分页读取模块
//!
//! 从文本文件末尾按页读取行，末尾所在页码为 1。
//! 只读取从文件末尾到目标页起始位置之间的字节，不会把整个文件载入内存。

use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// 每次向前读取的块大小
const BLOCK_SIZE: u64 = 8 * 1024;

/// 分页请求
///
/// 行号从文件末行开始计数，末行为第 0 行。
/// 第 `page_number` 页覆盖 `[(page_number - 1) * page_size, page_number * page_size - 1]`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: usize,
    page_size: usize,
}

impl PageRequest {
    /// 创建分页请求，页码和页大小都必须 ≥ 1，且 `page_number * page_size` 不能溢出
    pub fn new(page_number: usize, page_size: usize) -> Result<Self> {
        if page_number == 0 {
            anyhow::bail!("页码必须大于等于 1");
        }
        if page_size == 0 {
            anyhow::bail!("每页行数必须大于等于 1");
        }
        if page_number.checked_mul(page_size).is_none() {
            anyhow::bail!("页码或每页行数过大: {} x {}", page_number, page_size);
        }
        Ok(Self {
            page_number,
            page_size,
        })
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// 本页第一行（距末尾最近的一行）的倒序行号
    pub fn start_row(&self) -> usize {
        (self.page_number - 1) * self.page_size
    }

    /// 本页最后一行的倒序行号
    pub fn end_row(&self) -> usize {
        self.page_number * self.page_size - 1
    }

    pub fn contains(&self, row: usize) -> bool {
        row >= self.start_row() && row <= self.end_row()
    }
}

/// 从文件末尾分页读取文本行
///
/// 返回的行按文件中的自然顺序排列（页内旧行在前）。
/// 文件末尾的单个换行符只作为最后一行的结束符，不会产生空行。
///
/// # 参数
///
/// * `path` - 文本文件路径
/// * `page` - 分页请求
///
/// # 返回值
///
/// * `Ok(Vec<String>)` - 本页的行，超出文件行数时为空
/// * `Err(anyhow::Error)` - 文件无法打开或读取失败
///
/// # 示例
///
/// ```no_run
/// use dfs_file_utils::utils::tail::{PageRequest, read_tail_page};
///
/// let page = PageRequest::new(1, 20)?;
/// for line in read_tail_page("./logs/app.log", page)? {
///     println!("{}", line);
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn read_tail_page<P: AsRef<Path>>(path: P, page: PageRequest) -> Result<Vec<String>> {
    let path = path.as_ref();

    // 文件句柄在任意返回路径上随作用域释放
    let mut file =
        File::open(path).with_context(|| format!("打开文件失败: {}", path.display()))?;
    let length = file
        .metadata()
        .with_context(|| format!("获取文件信息失败: {}", path.display()))?
        .len();

    let mut lines = VecDeque::new();
    if length == 0 {
        return Ok(Vec::new());
    }

    // 末尾换行符属于最后一行
    let mut last = [0u8; 1];
    read_at(&mut file, length - 1, &mut last)
        .with_context(|| format!("读取文件失败: {}", path.display()))?;
    let mut pos = if last[0] == b'\n' { length - 1 } else { length };

    let mut cur_row = 0usize;
    // 当前行位于已读块中的部分（正序）
    let mut tail: Vec<u8> = Vec::new();

    while pos > 0 {
        let start = pos.saturating_sub(BLOCK_SIZE);
        let mut block = vec![0u8; (pos - start) as usize];
        read_at(&mut file, start, &mut block)
            .with_context(|| format!("读取文件失败: {}", path.display()))?;

        let mut line_end = block.len();
        for i in (0..block.len()).rev() {
            if block[i] != b'\n' {
                continue;
            }
            if page.contains(cur_row) {
                let mut line = block[i + 1..line_end].to_vec();
                line.append(&mut tail);
                lines.push_front(decode_line(line));
            }
            tail.clear();
            cur_row += 1;
            line_end = i;
            if cur_row > page.end_row() {
                return Ok(lines.into());
            }
        }

        if page.contains(cur_row) {
            let mut joined = block[..line_end].to_vec();
            joined.append(&mut tail);
            tail = joined;
        }
        pos = start;
    }

    // 扫描到文件开头，剩余部分即第一行
    if page.contains(cur_row) {
        lines.push_front(decode_line(tail));
    }

    Ok(lines.into())
}

/// 统计文件总行数
///
/// 末尾没有换行符的残行也计为一行，空文件为 0 行。
pub fn count_lines<P: AsRef<Path>>(path: P) -> Result<usize> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("打开文件失败: {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let mut count = 0;
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        let n = reader
            .read_until(b'\n', &mut buffer)
            .with_context(|| format!("读取文件失败: {}", path.display()))?;
        if n == 0 {
            break;
        }
        count += 1;
    }
    Ok(count)
}

fn read_at(file: &mut File, offset: u64, buf: &mut [u8]) -> std::io::Result<()> {
    file.seek(SeekFrom::Start(offset))?;
    file.read_exact(buf)
}

fn decode_line(mut bytes: Vec<u8>) -> String {
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    match String::from_utf8(bytes) {
        Ok(line) => line,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}
