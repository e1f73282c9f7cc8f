//! 块缓存实现（基于 lru crate）
//!
//! 对应原 ATA 驱动中的 `LRUCache` / `CacheAdv`。
//!
//! # 结构
//!
//! ```text
//! struct BlockCache {
//!     cache: LruCache<u64, CachedBlock>,  // 地址索引 + 访问顺序，O(1)
//!     policy: ReplacementPolicy,          // LRU 或 FIFO
//!     stats: CacheStats,
//! }
//! ```
//!
//! 链表头是最近使用（MRU）的块，链表尾是最久未使用（LRU）的块。
//! 索引和顺序由同一个 `LruCache` 维护，每次修改顺序时索引同步更新，
//! 不存在两者不一致的中间状态。
//!
//! # 与原驱动的差异
//!
//! - 查找从 O(n) 线性扫描改为 O(1) 哈希查找
//! - 满时只驱逐真正的链表尾，新块成为链表头
//! - 插入已存在的地址时原地覆盖，不会出现重复键

use super::buffer::CachedBlock;
use super::config::{CacheConfig, ReplacementPolicy};
use crate::consts::BLOCK_SIZE;
use core::num::NonZeroUsize;
use lru::LruCache;

/// 缓存统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// 总查找次数
    pub total_accesses: u64,
    /// 缓存命中次数
    pub hits: u64,
    /// 缓存未命中次数
    pub misses: u64,
    /// 新块插入次数
    pub insertions: u64,
    /// 已存在块的覆盖次数
    pub updates: u64,
    /// 驱逐次数
    pub evictions: u64,
}

impl CacheStats {
    /// 计算命中率
    pub fn hit_rate(&self) -> f64 {
        if self.total_accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.total_accesses as f64
        }
    }
}

/// 块缓存
///
/// 固定容量、固定块大小（[`BLOCK_SIZE`]）的读缓存。缓存只是被动的数据结构：
/// 调用者在读设备前先 [`retrieve`](Self::retrieve)，未命中时自己读设备，
/// 再把读到的数据 [`insert`](Self::insert) 进来。缓存从不访问设备。
///
/// 没有内部锁，多线程环境下需要调用者在 retrieve/insert 整个过程中持有同一把锁。
///
/// # 示例
///
/// ```rust
/// use bcache_core::{BlockCache, BLOCK_SIZE};
///
/// let mut cache = BlockCache::new();
/// let mut buf = [0u8; BLOCK_SIZE];
///
/// if !cache.retrieve(7, &mut buf) {
///     // 从设备读取 ...
///     buf.fill(0x5A);
///     cache.insert(7, &buf);
/// }
/// assert!(cache.retrieve(7, &mut buf));
/// ```
pub struct BlockCache {
    /// 地址索引和访问顺序
    cache: LruCache<u64, CachedBlock>,

    /// 替换策略
    policy: ReplacementPolicy,

    /// 统计信息
    stats: CacheStats,
}

impl BlockCache {
    /// 创建默认配置（64 块、LRU）的空缓存
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// 创建指定容量的 LRU 缓存
    ///
    /// # Panics
    ///
    /// `capacity` 为 0 时 panic
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(CacheConfig::default().with_capacity(capacity))
    }

    /// 按配置创建空缓存
    ///
    /// # Panics
    ///
    /// `config.capacity` 为 0 时 panic
    pub fn with_config(config: CacheConfig) -> Self {
        let capacity = match NonZeroUsize::new(config.capacity) {
            Some(capacity) => capacity,
            None => panic!("block cache capacity must be non-zero"),
        };

        Self {
            cache: LruCache::new(capacity),
            policy: config.policy,
            stats: CacheStats::default(),
        }
    }

    /// 重置为空缓存
    ///
    /// 释放所有缓存块并清零统计信息，可重复调用。
    pub fn initialize(&mut self) {
        log::debug!("[BCACHE] initialize, dropping {} blocks", self.cache.len());
        self.cache.clear();
        self.stats = CacheStats::default();
    }

    /// 查找块
    ///
    /// 命中时把块数据复制到 `out[..BLOCK_SIZE]` 并返回 `true`；
    /// LRU 策略下同时把该块移到链表头。
    ///
    /// 未命中时返回 `false`，`out` 和缓存内容、顺序都不变。
    ///
    /// # Panics
    ///
    /// `out` 小于 `BLOCK_SIZE` 时 panic
    pub fn retrieve(&mut self, address: u64, out: &mut [u8]) -> bool {
        assert!(out.len() >= BLOCK_SIZE, "retrieve buffer smaller than BLOCK_SIZE");

        self.stats.total_accesses += 1;

        // get 会把命中的块移到 MRU，peek 不会
        let block = match self.policy {
            ReplacementPolicy::Lru => self.cache.get(&address),
            ReplacementPolicy::Fifo => self.cache.peek(&address),
        };

        match block {
            Some(block) => {
                block.copy_to(out);
                self.stats.hits += 1;
                log::trace!("[BCACHE] retrieve block={:#x} HIT", address);
                true
            }
            None => {
                self.stats.misses += 1;
                log::trace!("[BCACHE] retrieve block={:#x} MISS", address);
                false
            }
        }
    }

    /// 插入块
    ///
    /// - 地址已存在：覆盖数据；LRU 策略下移到链表头，FIFO 策略下位置不变
    /// - 未满：新块放在链表头
    /// - 已满：先驱逐链表尾的一个块，再把新块放在链表头
    ///
    /// 插入后 `retrieve(address)` 一定命中并返回 `data`，直到被驱逐或覆盖。
    ///
    /// # Panics
    ///
    /// `data` 长度不等于 `BLOCK_SIZE` 时 panic
    pub fn insert(&mut self, address: u64, data: &[u8]) {
        assert_eq!(data.len(), BLOCK_SIZE, "inserted payload must be BLOCK_SIZE bytes");

        let existing = match self.policy {
            ReplacementPolicy::Lru => self.cache.get_mut(&address),
            ReplacementPolicy::Fifo => self.cache.peek_mut(&address),
        };

        if let Some(block) = existing {
            block.overwrite(data);
            self.stats.updates += 1;
            log::trace!("[BCACHE] insert block={:#x} UPDATE in place", address);
            return;
        }

        if self.cache.len() >= self.cache.cap().get() {
            self.evict_tail();
        }

        self.cache.put(address, CachedBlock::new(address, data));
        self.stats.insertions += 1;
        log::debug!(
            "[BCACHE] insert block={:#x} NEW, cache={}/{}",
            address,
            self.cache.len(),
            self.cache.cap().get()
        );
    }

    /// 驱逐链表尾的块
    fn evict_tail(&mut self) {
        if let Some((address, _block)) = self.cache.pop_lru() {
            self.stats.evictions += 1;
            log::debug!("[BCACHE] evicted block={:#x}", address);
        }
    }

    /// 检查块是否在缓存中（不调整顺序）
    pub fn contains(&self, address: u64) -> bool {
        self.cache.contains(&address)
    }

    /// 只读访问块数据（不调整顺序，不计入统计）
    pub fn peek(&self, address: u64) -> Option<&[u8; BLOCK_SIZE]> {
        self.cache.peek(&address).map(CachedBlock::data)
    }

    /// 链表头（最近使用）的块地址，空缓存返回 None
    pub fn mru(&self) -> Option<u64> {
        self.cache.iter().next().map(|(address, _)| *address)
    }

    /// 链表尾（下一个被驱逐）的块地址，空缓存返回 None
    pub fn lru(&self) -> Option<u64> {
        self.cache.peek_lru().map(|(address, _)| *address)
    }

    /// 按 MRU → LRU 顺序遍历缓存中的块地址
    pub fn addresses(&self) -> impl Iterator<Item = u64> + '_ {
        self.cache.iter().map(|(address, _)| *address)
    }

    /// 替换策略
    pub fn policy(&self) -> ReplacementPolicy {
        self.policy
    }

    /// 获取缓存统计信息
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    /// 获取缓存容量
    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }

    /// 获取当前缓存块数量
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// 检查缓存是否为空
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for BlockCache {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for BlockCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BlockCache")
            .field("capacity", &self.cache.cap())
            .field("len", &self.cache.len())
            .field("policy", &self.policy)
            .field("stats", &self.stats)
            .finish()
    }
}
