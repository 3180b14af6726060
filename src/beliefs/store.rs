//! BeliefStore 边界与内存实现
//!
//! contains / snapshot / add / delete 四个操作，全部为本地非阻塞操作；
//! 快照是某一时刻的不可变有序序列，由调用方持有。

use crate::beliefs::Predicate;

/// 信念库边界：一个 Agent 当前事实的可查询存储
pub trait BeliefStore: Send + Sync {
    /// 归一化比较下是否持有该谓词
    fn contains(&self, predicate: &Predicate) -> bool;

    /// 当前全部事实的有序快照
    fn snapshot(&self) -> Vec<Predicate>;

    /// 加入一条事实（已持有则不重复）
    fn add(&mut self, predicate: Predicate);

    /// 删除一条事实（未持有则无事发生）
    fn delete(&mut self, predicate: &Predicate);
}

/// 有序、去重的内存信念库
#[derive(Debug, Clone, Default)]
pub struct InMemoryBeliefStore {
    facts: Vec<Predicate>,
}

impl InMemoryBeliefStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以初始事实集构建（常用于测试与演示场景）
    pub fn with_facts<I, S>(facts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut store = Self::new();
        for f in facts {
            store.add(Predicate::parse(f.as_ref()));
        }
        store
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl BeliefStore for InMemoryBeliefStore {
    fn contains(&self, predicate: &Predicate) -> bool {
        self.facts.iter().any(|f| f == predicate)
    }

    fn snapshot(&self) -> Vec<Predicate> {
        self.facts.clone()
    }

    fn add(&mut self, predicate: Predicate) {
        if !self.contains(&predicate) {
            self.facts.push(predicate);
        }
    }

    fn delete(&mut self, predicate: &Predicate) {
        self.facts.retain(|f| f != predicate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_deduplicates() {
        let mut store = InMemoryBeliefStore::new();
        store.add(Predicate::parse("hasMoney"));
        store.add(Predicate::parse("hasMoney[source(self)]"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_contains_normalized() {
        let store = InMemoryBeliefStore::with_facts(["hasPhone[source(percepts)]"]);
        assert!(store.contains(&Predicate::parse("hasPhone")));
    }

    #[test]
    fn test_delete_then_absent() {
        let mut store = InMemoryBeliefStore::with_facts(["hasMoney", "atHome"]);
        store.delete(&Predicate::parse("hasMoney"));
        assert!(!store.contains(&Predicate::parse("hasMoney")));
        assert_eq!(store.snapshot(), vec![Predicate::parse("atHome")]);
    }

    #[test]
    fn test_snapshot_preserves_insertion_order() {
        let store = InMemoryBeliefStore::with_facts(["a", "b", "c"]);
        let snap: Vec<String> = store.snapshot().iter().map(|p| p.to_string()).collect();
        assert_eq!(snap, vec!["a", "b", "c"]);
    }
}
