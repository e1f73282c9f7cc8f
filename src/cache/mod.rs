//! 块缓存模块
//!
//! 位于块设备前面的固定容量读缓存，块大小固定为 [`BLOCK_SIZE`](crate::BLOCK_SIZE)。
//!
//! # 主要组件
//!
//! - [`CachedBlock`] - 单个缓存块（地址 + 数据）
//! - [`BlockCache`] - 块缓存管理器，使用 lru crate 维护索引和访问顺序
//! - [`CacheConfig`] / [`ReplacementPolicy`] - 容量和替换策略
//! - [`CacheStats`] - 缓存统计信息
//!
//! # 设计原理
//!
//! 原驱动用手写的双向链表保存缓存块，查找靠线性扫描，满时的替换逻辑
//! 会留下悬空的 `next`/`prev` 指针。本模块改用 `lru::LruCache`：
//!
//! 1. **数据结构**：哈希索引和访问链表由同一个容器维护，始终同步
//! 2. **内存安全**：块数据由缓存独占，驱逐即释放，调用者只拿到副本
//! 3. **性能**：查找、提升、驱逐都是 O(1)
//!
//! # 与原驱动的对应关系
//!
//! | 原驱动                     | bcache_core                       |
//! |----------------------------|-----------------------------------|
//! | `struct Block`             | [`CachedBlock`]                   |
//! | `class LRUCache`           | [`BlockCache`]                    |
//! | `class CacheAdv`（FIFO）   | [`ReplacementPolicy::Fifo`]       |
//! | `init()`                   | [`BlockCache::initialize()`]      |
//! | `read()`                   | [`BlockCache::retrieve()`]        |
//! | `put()`                    | [`BlockCache::insert()`]          |
//!
//! # 功能完整性
//!
//! ✅ 地址索引（O(1) 查找）
//! ✅ LRU / FIFO 替换策略
//! ✅ 重复插入原地覆盖
//! ✅ 缓存统计信息
//! ❌ 脏块跟踪（缓存只读/覆盖，不是数据的权威副本）
//! ❌ 内部锁（由调用者负责互斥）
//!
//! # 使用示例
//!
//! ```rust
//! use bcache_core::cache::{BlockCache, CacheConfig, ReplacementPolicy};
//! use bcache_core::BLOCK_SIZE;
//!
//! let mut cache = BlockCache::with_config(
//!     CacheConfig::default().with_capacity(2).with_policy(ReplacementPolicy::Lru),
//! );
//! let mut buf = [0u8; BLOCK_SIZE];
//!
//! cache.insert(1, &[b'A'; BLOCK_SIZE]);
//! cache.insert(2, &[b'B'; BLOCK_SIZE]);
//! assert!(cache.retrieve(1, &mut buf)); // 块 1 成为 MRU
//! cache.insert(3, &[b'C'; BLOCK_SIZE]); // 驱逐块 2
//!
//! assert!(!cache.retrieve(2, &mut buf));
//! assert!(cache.retrieve(3, &mut buf));
//! assert_eq!(buf, [b'C'; BLOCK_SIZE]);
//! ```
//!
//! # 内存分配要求
//!
//! 本模块依赖 `alloc` crate，需要用户提供全局分配器。

mod block_cache;
mod buffer;
mod config;

pub use block_cache::{BlockCache, CacheStats};
pub use buffer::CachedBlock;
pub use config::{CacheConfig, ReplacementPolicy};
