//! 块缓存配置

use crate::consts::DEFAULT_CACHE_SIZE;

/// 替换策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplacementPolicy {
    /// 最近最少使用：命中和重复插入都会把块移到链表头
    #[default]
    Lru,
    /// 先进先出：顺序只由首次插入决定，命中不调整顺序
    Fifo,
}

/// 块缓存配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// 缓存容量（块数），必须大于 0
    pub capacity: usize,
    /// 替换策略
    pub policy: ReplacementPolicy,
}

impl CacheConfig {
    /// 设置缓存容量
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// 设置替换策略
    pub const fn with_policy(mut self, policy: ReplacementPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_SIZE, // 默认 64 个块
            policy: ReplacementPolicy::Lru,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.capacity, 64);
        assert_eq!(config.policy, ReplacementPolicy::Lru);
    }

    #[test]
    fn test_builders() {
        let config = CacheConfig::default()
            .with_capacity(2)
            .with_policy(ReplacementPolicy::Fifo);
        assert_eq!(config.capacity, 2);
        assert_eq!(config.policy, ReplacementPolicy::Fifo);
    }
}
