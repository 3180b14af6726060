//! 恢复过程事件
//!
//! RecoveryEvent 在恢复进行中向可选通道推送（缺口、计划、单步结果、终态），供外层展示或审计；
//! GoalEvent 是目标恢复成功后向推理循环队列投递的重提交事件，以消息传递取代直接回调重入。

use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

/// 单次恢复尝试的过程事件（可序列化为 JSON）
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecoveryEvent {
    /// 缺口计算完成（missing = 前置条件 − 当前信念）
    GapComputed { attempt: Uuid, missing: Vec<String> },
    /// 规划器返回修复计划
    PlanReceived { attempt: Uuid, plan: Vec<String> },
    /// 修复计划中的一步执行成功
    StepExecuted { attempt: Uuid, action: String },
    /// 修复计划中的一步执行失败（记录，不中止）
    StepFailed { attempt: Uuid, action: String },
    /// 缺口已闭合，即将重试原操作
    Recovered { attempt: Uuid },
    /// 本次恢复终止失败
    Failed { attempt: Uuid, reason: String },
}

/// 目标事件：恢复成功后恰好一次的目标重提交，由推理循环消费
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalEvent {
    Resubmit { goal: String },
}

pub(crate) fn send_event(tx: &Option<UnboundedSender<RecoveryEvent>>, event: RecoveryEvent) {
    if let Some(t) = tx {
        let _ = t.send(event);
    }
}
