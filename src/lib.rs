//! bcache_core: 块设备前的固定容量块缓存
//!
//! 缓存最近使用的 512 字节块，命中时直接返回数据，避免重复读设备；
//! 容量满时按 LRU（或可选的 FIFO）策略驱逐一个块。
//!
//! - **零 unsafe 代码**
//! - **O(1)** 查找、提升和驱逐
//! - 可在 `no_std` + `alloc` 环境（内核驱动）中使用
//!
//! # 示例
//!
//! ```rust,ignore
//! use bcache_core::{BlockDevice, CachedDevice, Result, BLOCK_SIZE};
//!
//! // 实现 BlockDevice trait
//! struct AtaDevice {
//!     // ...
//! }
//!
//! impl BlockDevice for AtaDevice {
//!     // 实现必要的方法
//!     // ...
//! }
//!
//! fn main() -> Result<()> {
//!     let mut dev = CachedDevice::new(AtaDevice::new());
//!
//!     // 第一次读设备，第二次命中缓存
//!     let mut buf = [0u8; BLOCK_SIZE];
//!     dev.read_block(0, &mut buf)?;
//!     dev.read_block(0, &mut buf)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # 模块结构
//!
//! - [`error`] - 错误类型定义
//! - [`consts`] - 常量定义
//! - [`cache`] - 块缓存
//! - [`block`] - 块设备接口和带缓存的设备包装器

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

/// 错误处理
pub mod error;

/// 常量定义
pub mod consts;

/// 块缓存
pub mod cache;

/// 块设备抽象
pub mod block;

// ===== 公共导出 =====

// 错误处理
pub use error::{Error, ErrorKind, Result};

// 常量
pub use consts::{BLOCK_SIZE, DEFAULT_CACHE_SIZE};

// Cache
pub use cache::{BlockCache, CacheConfig, CacheStats, CachedBlock, ReplacementPolicy};

// 块设备
pub use block::{BlockDevice, CachedDevice};
