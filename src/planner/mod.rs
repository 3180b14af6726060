//! 外部规划器边界
//!
//! 所有实现（HTTP / Mock）实现 PlannerClient：输入为纯字符串形式的信念与目标谓词，
//! 输出为有序的动作名序列。空序列是「找不到计划」的显式信号；Err 表示传输/基础设施错误。
//! 结构化对象不跨越该边界，以保证规划器可替换。

pub mod http;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

pub use http::HttpPlanner;
pub use mock::MockPlanner;

/// 规划模式：离线（一次性计划全量执行）或在线（每步前重规划）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanningMode {
    Offline,
    Online,
}

impl PlanningMode {
    /// 线缆编码：1 = 离线，2 = 在线
    pub fn wire_code(self) -> u8 {
        match self {
            PlanningMode::Offline => 1,
            PlanningMode::Online => 2,
        }
    }

    /// 宽容解析配置值；无法识别时回退在线模式并告警
    pub fn from_config(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "offline" => PlanningMode::Offline,
            "online" => PlanningMode::Online,
            other => {
                tracing::warn!("invalid planning mode '{other}', defaulting to online");
                PlanningMode::Online
            }
        }
    }
}

/// 规划器传输层错误（区别于「返回空计划」）
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("planner transport error: {0}")]
    Transport(String),

    #[error("planner returned malformed response: {0}")]
    Malformed(String),
}

/// 规划器客户端 trait：给定信念快照与未满足目标，返回修复计划
///
/// 实现必须可被多个 Agent 并发调用（视为其输入的无状态函数）。
#[async_trait]
pub trait PlannerClient: Send + Sync {
    async fn run(
        &self,
        agent: &str,
        beliefs: &[String],
        goals: &[String],
        mode: PlanningMode,
    ) -> Result<Vec<String>, PlannerError>;
}
