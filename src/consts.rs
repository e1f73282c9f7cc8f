//! 块缓存常量定义

//=============================================================================
// 基础常量
//=============================================================================

/// 块大小（字节），与 ATA 扇区大小一致
pub const BLOCK_SIZE: usize = 512;

/// 默认缓存容量（块数）
pub const DEFAULT_CACHE_SIZE: usize = 64;
