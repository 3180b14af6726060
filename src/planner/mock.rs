//! Mock 规划器（用于测试，无需外部服务）
//!
//! 按脚本顺序逐次返回预置计划；脚本耗尽后返回空计划（「找不到计划」信号）。
//! 记录调用次数，供测试断言在线循环的迭代数。

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::planner::{PlannerClient, PlannerError, PlanningMode};

/// 脚本化规划器：每次调用弹出一条预置响应
#[derive(Debug, Default)]
pub struct MockPlanner {
    responses: Mutex<VecDeque<Vec<String>>>,
    calls: AtomicUsize,
}

impl MockPlanner {
    /// 始终返回空计划的规划器
    pub fn new() -> Self {
        Self::default()
    }

    /// 以响应脚本构建；第 n 次调用返回第 n 条
    pub fn with_responses<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    /// 便捷构造：以 &str 列表书写脚本
    pub fn scripted(responses: &[&[&str]]) -> Self {
        Self::with_responses(
            responses
                .iter()
                .map(|plan| plan.iter().map(|s| s.to_string()).collect()),
        )
    }

    /// 已被调用的次数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl PlannerClient for MockPlanner {
    async fn run(
        &self,
        _agent: &str,
        _beliefs: &[String],
        _goals: &[String],
        _mode: PlanningMode,
    ) -> Result<Vec<String>, PlannerError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let mut responses = self.responses.lock().expect("mock planner lock");
        Ok(responses.pop_front().unwrap_or_default())
    }
}
