//! 维度去重值缓存
//!
//! 筛选下拉选项的去重查询是读多写少的参考数据，用进程内
//! TTL 缓存避免每次页面加载都打数据库。与无界全局字典不同：
//! - RwLock 保护，条目带写入时间，过期即失效
//! - 任何成功写入（创建/更新/删除/导入）后调用 invalidate_all

use domain::Dimension;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

struct CacheEntry {
    stored_at: Instant,
    values: Vec<String>,
}

/// 去重值 TTL 缓存。
pub struct DistinctValueCache {
    ttl: Duration,
    entries: RwLock<HashMap<Dimension, CacheEntry>>,
}

impl DistinctValueCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// 取未过期的缓存值；过期或缺失返回 None。
    pub fn get(&self, dimension: Dimension) -> Option<Vec<String>> {
        let entries = self.entries.read().ok()?;
        let entry = entries.get(&dimension)?;
        if entry.stored_at.elapsed() > self.ttl {
            return None;
        }
        Some(entry.values.clone())
    }

    pub fn put(&self, dimension: Dimension, values: Vec<String>) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(
                dimension,
                CacheEntry {
                    stored_at: Instant::now(),
                    values,
                },
            );
        }
    }

    /// 写入路径的失效钩子：清空全部条目。
    pub fn invalidate_all(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}
