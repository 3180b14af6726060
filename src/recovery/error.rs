//! 恢复错误类型
//!
//! 全部为终止性错误：向动作/目标调用方以布尔失败呈现，并留下诊断日志。
//! 前置条件不满足不是错误（它是恢复的触发条件）；计划中的单步失败也不是错误
//! （记录后继续，离线模式顺序执行余下步骤，在线模式下一轮重规划自会纠正）。

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecoveryError {
    /// 动作名未注册：调用方错误，不尝试恢复
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// 规划器返回空计划或传输失败：本次恢复终止，不再做信念变更
    #[error("planner failure: {0}")]
    PlannerFailure(String),

    /// 没有目标过程匹配失败目标的触发器：无从猜测相关谓词
    #[error("no matching procedure for goal: {0}")]
    NoMatchingProcedure(String),

    /// 匹配到的过程没有守卫可供恢复：需要开发者介入
    #[error("procedure for goal '{0}' has no guard to recover against")]
    AbsentGuard(String),
}
