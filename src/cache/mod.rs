use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use crate::routes::visits::VisitSummary;

struct CacheEntry {
    summary: VisitSummary,
    stored_at: Instant,
}

/// 有界的聚合结果缓存。
/// 淘汰顺序是显式的 FIFO（按插入顺序，非 LRU），只在写入时机会性淘汰，
/// 没有后台清理任务。实例在进程启动时创建一次，经 AppState 注入。
pub struct VisitCache {
    entries: HashMap<String, CacheEntry>,
    order: VecDeque<String>,
    ttl: Duration,
    capacity: usize,
}

impl VisitCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            ttl,
            capacity,
        }
    }

    /// 命中条件：条目存在且存活时间严格小于 TTL，过期条目留给写路径清理
    pub fn get(&self, user_id: &str) -> Option<VisitSummary> {
        self.entries.get(user_id).and_then(|entry| {
            if entry.stored_at.elapsed() < self.ttl {
                Some(entry.summary.clone())
            } else {
                None
            }
        })
    }

    /// 插入或覆盖。覆盖按重新插入处理，键移到淘汰队列末尾。
    /// 超出容量时在插入后淘汰最早插入的那一个条目。
    pub fn put(&mut self, user_id: &str, summary: VisitSummary) {
        let entry = CacheEntry {
            summary,
            stored_at: Instant::now(),
        };
        if self.entries.insert(user_id.to_string(), entry).is_some() {
            self.order.retain(|key| key != user_id);
        }
        self.order.push_back(user_id.to_string());

        while self.entries.len() > self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
