//! 块设备核心类型

use crate::cache::{BlockCache, CacheConfig, CacheStats};
use crate::consts::BLOCK_SIZE;
use crate::error::{Error, ErrorKind, Result};

/// 块设备接口
///
/// 由驱动层实现，对应 ATA 设备的 `deviceRead` / `deviceWrite`。
/// 块缓存本身从不调用这些方法，只有 [`CachedDevice`] 会。
///
/// # 示例
///
/// ```rust,ignore
/// use bcache_core::{BlockDevice, Result, BLOCK_SIZE};
///
/// struct AtaDevice {
///     // ...
/// }
///
/// impl BlockDevice for AtaDevice {
///     fn total_blocks(&self) -> u64 {
///         self.sector_count
///     }
///
///     fn read_block(&mut self, address: u64, buf: &mut [u8; BLOCK_SIZE]) -> Result<()> {
///         // 发出 PIO 读命令
///         Ok(())
///     }
///
///     fn write_block(&mut self, address: u64, buf: &[u8; BLOCK_SIZE]) -> Result<()> {
///         // 发出 PIO 写命令
///         Ok(())
///     }
/// }
/// ```
pub trait BlockDevice {
    /// 总块数
    fn total_blocks(&self) -> u64;

    /// 读取一个块
    fn read_block(&mut self, address: u64, buf: &mut [u8; BLOCK_SIZE]) -> Result<()>;

    /// 写入一个块
    fn write_block(&mut self, address: u64, buf: &[u8; BLOCK_SIZE]) -> Result<()>;

    /// 刷新设备写缓冲
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// 是否只读
    fn is_read_only(&self) -> bool {
        false
    }
}

/// 带块缓存的设备包装器
///
/// 驱动持有的缓存实例，生命周期与驱动相同：
/// - 读：先查缓存，未命中再读设备并把结果插入缓存
/// - 写：先写设备（写穿），成功后覆盖缓存中的副本，缓存中不会有脏块
///
/// # 并发使用
///
/// CachedDevice 本身不包含内部锁。多线程环境下整体包一层锁：
///
/// ```rust,ignore
/// use std::sync::{Arc, Mutex};
///
/// let dev = Arc::new(Mutex::new(CachedDevice::new(device)));
/// ```
pub struct CachedDevice<D> {
    /// 底层设备
    device: D,
    /// 块缓存
    bcache: BlockCache,
    /// 逻辑读取次数（包括缓存命中）
    read_count: u64,
    /// 逻辑写入次数
    write_count: u64,
    /// 物理读取次数（实际设备操作）
    physical_read_count: u64,
    /// 物理写入次数（实际设备操作）
    physical_write_count: u64,
}

impl<D: BlockDevice> CachedDevice<D> {
    /// 使用默认缓存配置（64 块、LRU）创建
    pub fn new(device: D) -> Self {
        Self::with_config(device, CacheConfig::default())
    }

    /// 使用指定缓存配置创建
    ///
    /// # Panics
    ///
    /// `config.capacity` 为 0 时 panic
    pub fn with_config(device: D, config: CacheConfig) -> Self {
        Self {
            device,
            bcache: BlockCache::with_config(config),
            read_count: 0,
            write_count: 0,
            physical_read_count: 0,
            physical_write_count: 0,
        }
    }

    /// 获取底层设备的引用
    pub fn device(&self) -> &D {
        &self.device
    }

    /// 获取底层设备的可变引用
    ///
    /// 绕过此包装器直接写设备会让缓存内容过期，之后应调用 [`reset_cache`](Self::reset_cache)。
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// 获取块缓存的引用
    pub fn cache(&self) -> &BlockCache {
        &self.bcache
    }

    /// 获取缓存统计信息
    pub fn cache_stats(&self) -> CacheStats {
        self.bcache.stats()
    }

    /// 拆出底层设备，丢弃缓存
    pub fn into_inner(self) -> D {
        self.device
    }

    /// 获取逻辑读取次数（包括缓存命中）
    pub fn read_count(&self) -> u64 {
        self.read_count
    }

    /// 获取逻辑写入次数
    pub fn write_count(&self) -> u64 {
        self.write_count
    }

    /// 获取物理读取次数（实际设备操作）
    pub fn physical_read_count(&self) -> u64 {
        self.physical_read_count
    }

    /// 获取物理写入次数（实际设备操作）
    pub fn physical_write_count(&self) -> u64 {
        self.physical_write_count
    }

    /// 获取缓存命中率
    ///
    /// 返回 0.0 到 1.0 之间的值
    pub fn cache_hit_rate(&self) -> f64 {
        if self.read_count == 0 {
            return 0.0;
        }
        let hits = self.read_count.saturating_sub(self.physical_read_count);
        hits as f64 / self.read_count as f64
    }

    fn check_address(&self, address: u64) -> Result<()> {
        if address >= self.device.total_blocks() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "block address out of range",
            ));
        }
        Ok(())
    }

    /// 读取单个块
    ///
    /// 优先从缓存读取；缓存未命中则从设备读取并填充缓存。
    /// 设备读取失败时缓存不变。
    ///
    /// # 参数
    ///
    /// * `address` - 逻辑块地址
    /// * `buf` - 目标缓冲区（大小至少为 BLOCK_SIZE）
    ///
    /// # 返回
    ///
    /// 成功返回读取的字节数
    pub fn read_block(&mut self, address: u64, buf: &mut [u8]) -> Result<usize> {
        if buf.len() < BLOCK_SIZE {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "buffer too small for block",
            ));
        }
        self.check_address(address)?;

        self.read_count += 1;

        if self.bcache.retrieve(address, buf) {
            return Ok(BLOCK_SIZE);
        }

        // 缓存未命中 - 从设备读取
        let mut block = [0u8; BLOCK_SIZE];
        self.physical_read_count += 1;
        self.device.read_block(address, &mut block).map_err(|e| {
            log::warn!("[BCACHE] device read of block={:#x} failed: {}", address, e);
            e
        })?;

        self.bcache.insert(address, &block);
        buf[..BLOCK_SIZE].copy_from_slice(&block);
        Ok(BLOCK_SIZE)
    }

    /// 写入单个块
    ///
    /// 先写设备，成功后用同样的数据覆盖缓存（地址不在缓存中时插入）。
    /// 设备写入失败时缓存不变。
    ///
    /// # 参数
    ///
    /// * `address` - 逻辑块地址
    /// * `buf` - 源数据缓冲区（只使用前 BLOCK_SIZE 字节）
    ///
    /// # 返回
    ///
    /// 成功返回写入的字节数
    pub fn write_block(&mut self, address: u64, buf: &[u8]) -> Result<usize> {
        let block: &[u8; BLOCK_SIZE] = buf
            .get(..BLOCK_SIZE)
            .and_then(|b| b.try_into().ok())
            .ok_or(Error::new(
                ErrorKind::InvalidInput,
                "buffer too small for block",
            ))?;
        self.check_address(address)?;

        if self.device.is_read_only() {
            return Err(Error::new(
                ErrorKind::PermissionDenied,
                "device is read-only",
            ));
        }

        self.write_count += 1;
        self.physical_write_count += 1;
        self.device.write_block(address, block)?;

        self.bcache.insert(address, block);
        Ok(BLOCK_SIZE)
    }

    /// 刷新底层设备
    pub fn flush(&mut self) -> Result<()> {
        self.device.flush()
    }

    /// 清空块缓存
    pub fn reset_cache(&mut self) {
        self.bcache.initialize();
    }
}

impl<D> core::fmt::Debug for CachedDevice<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CachedDevice")
            .field("bcache", &self.bcache)
            .field("read_count", &self.read_count)
            .field("write_count", &self.write_count)
            .field("physical_read_count", &self.physical_read_count)
            .field("physical_write_count", &self.physical_write_count)
            .finish()
    }
}
