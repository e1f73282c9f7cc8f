//! 缓存块结构
//!
//! 对应原驱动中链表节点里的 `{块号, 内容}` 部分。
//!
//! 原实现把 `next`/`prev` 指针嵌在块结构里手动维护，容易留下悬空链接。
//! 这里的 [`CachedBlock`] 只保存地址和数据，先后顺序完全交给
//! [`lru::LruCache`] 管理，块本身不知道自己在链表中的位置。

use crate::consts::BLOCK_SIZE;
use alloc::boxed::Box;

/// 缓存块
///
/// - `address`: 块在底层设备上的逻辑地址，同时是缓存键
/// - `payload`: 恰好 `BLOCK_SIZE` 字节的块内容，由缓存独占
pub struct CachedBlock {
    /// 逻辑块地址
    pub address: u64,

    /// 块数据
    payload: Box<[u8; BLOCK_SIZE]>,
}

impl core::fmt::Debug for CachedBlock {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CachedBlock")
            .field("address", &self.address)
            .field("payload_len", &self.payload.len())
            .finish()
    }
}

impl CachedBlock {
    /// 创建新的缓存块，复制 `data` 的内容
    ///
    /// # Panics
    ///
    /// `data` 长度不等于 `BLOCK_SIZE` 时 panic
    pub fn new(address: u64, data: &[u8]) -> Self {
        assert_eq!(data.len(), BLOCK_SIZE, "cached block payload must be BLOCK_SIZE bytes");

        let mut payload = Box::new([0u8; BLOCK_SIZE]);
        payload.copy_from_slice(data);
        Self { address, payload }
    }

    /// 块数据的只读视图
    pub fn data(&self) -> &[u8; BLOCK_SIZE] {
        &self.payload
    }

    /// 把块数据复制到 `out` 的前 `BLOCK_SIZE` 字节
    pub fn copy_to(&self, out: &mut [u8]) {
        out[..BLOCK_SIZE].copy_from_slice(&self.payload[..]);
    }

    /// 用新内容覆盖块数据（地址不变）
    pub fn overwrite(&mut self, data: &[u8]) {
        assert_eq!(data.len(), BLOCK_SIZE, "cached block payload must be BLOCK_SIZE bytes");
        self.payload.copy_from_slice(data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_creation() {
        let data = [0xABu8; BLOCK_SIZE];
        let block = CachedBlock::new(100, &data);
        assert_eq!(block.address, 100);
        assert_eq!(block.data().len(), BLOCK_SIZE);
        assert!(block.data().iter().all(|&b| b == 0xAB));
    }

    #[test]
    fn test_copy_to_larger_buffer() {
        let mut data = [0u8; BLOCK_SIZE];
        data[0] = 1;
        data[BLOCK_SIZE - 1] = 2;
        let block = CachedBlock::new(7, &data);

        let mut out = [0xFFu8; BLOCK_SIZE + 8];
        block.copy_to(&mut out);
        assert_eq!(&out[..BLOCK_SIZE], &data[..]);
        // 超出块大小的部分不被触碰
        assert!(out[BLOCK_SIZE..].iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_overwrite_keeps_address() {
        let mut block = CachedBlock::new(3, &[1u8; BLOCK_SIZE]);
        block.overwrite(&[2u8; BLOCK_SIZE]);
        assert_eq!(block.address, 3);
        assert!(block.data().iter().all(|&b| b == 2));
    }

    #[test]
    #[should_panic]
    fn test_wrong_sized_payload_panics() {
        let _ = CachedBlock::new(0, &[0u8; BLOCK_SIZE - 1]);
    }
}
