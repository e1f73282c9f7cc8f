//! 块设备抽象
//!
//! block/device.rs 定义驱动层需要实现的 [`BlockDevice`]，以及持有块缓存的
//! [`CachedDevice`]：读操作先查缓存，未命中再读设备并回填缓存；写操作写穿到设备后覆盖缓存副本。

mod device;

pub use device::{BlockDevice, CachedDevice};
