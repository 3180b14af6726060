//! 目标失败处理
//!
//! 推理循环在目标失败且无内部回退时调用：找到触发器匹配该目标的首个目标过程
//! （注册顺序决胜，跳过 kqml 记账过程），把其守卫归约为原子谓词序列，
//! 交给恢复引擎闭合缺口；成功则向队列重提交原目标恰好一次，失败则不提交。

use tokio::sync::mpsc::UnboundedSender;

use crate::agent::AgentState;
use crate::beliefs::{strip_source, Predicate};
use crate::executor::ActionExecutor;
use crate::recovery::engine::{RecoveryContext, RecoveryEngine};
use crate::recovery::error::RecoveryError;
use crate::recovery::events::GoalEvent;

/// 目标过程：触发器（`+!goal` 形式）与可选的守卫表达式
#[derive(Debug, Clone)]
pub struct GoalProcedure {
    label: Option<String>,
    trigger: String,
    guard: Option<String>,
}

impl GoalProcedure {
    pub fn new(trigger: &str, guard: Option<&str>) -> Self {
        Self {
            label: None,
            trigger: trigger.to_string(),
            guard: guard.map(str::to_string),
        }
    }

    /// 附加过程标签；`kqml` 前缀的标签标记内部记账过程
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    pub fn guard(&self) -> Option<&str> {
        self.guard.as_deref()
    }

    fn is_bookkeeping(&self) -> bool {
        self.label.as_deref().is_some_and(|l| l.starts_with("kqml"))
    }
}

/// 目标过程库：注册顺序即匹配决胜顺序
#[derive(Debug, Clone, Default)]
pub struct ProcedureLibrary {
    procedures: Vec<GoalProcedure>,
}

impl ProcedureLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, procedure: GoalProcedure) {
        self.procedures.push(procedure);
    }

    /// 首个触发器以 `+!<literal>` 开头的非记账过程
    pub fn first_matching(&self, goal_literal: &str) -> Option<&GoalProcedure> {
        let wanted = format!("+!{goal_literal}");
        self.procedures
            .iter()
            .filter(|p| !p.is_bookkeeping())
            .find(|p| p.trigger.starts_with(&wanted))
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }
}

/// 把守卫（可能为合取表达式）归约为原子谓词序列
///
/// 纯文本/结构归约而非逻辑求值：去掉分组符号 `[ ] ( )` 后按 `&` 切分并去空白。
pub fn reduce_guard(guard: &str) -> Vec<Predicate> {
    let without_grouping: String = guard
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '(' | ')'))
        .collect();
    without_grouping
        .split('&')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(Predicate::parse)
        .collect()
}

/// 目标失败处理器：过程库 + 恢复引擎 + 目标重提交队列
pub struct GoalFailureHandler {
    library: ProcedureLibrary,
    engine: RecoveryEngine,
    resubmit_tx: UnboundedSender<GoalEvent>,
}

impl GoalFailureHandler {
    pub fn new(
        library: ProcedureLibrary,
        engine: RecoveryEngine,
        resubmit_tx: UnboundedSender<GoalEvent>,
    ) -> Self {
        Self {
            library,
            engine,
            resubmit_tx,
        }
    }

    /// 目标失败入口：恢复成功则重提交目标事件恰好一次并返回 true
    pub async fn handle(
        &self,
        executor: &ActionExecutor,
        agent: &mut AgentState,
        goal: &str,
    ) -> bool {
        match self.try_recover(executor, agent, goal).await {
            Ok(()) => {
                tracing::info!(agent = %agent.id(), goal = %goal, "context recovered, resubmitting goal");
                let _ = self.resubmit_tx.send(GoalEvent::Resubmit {
                    goal: strip_source(goal),
                });
                true
            }
            Err(e) => {
                tracing::error!(agent = %agent.id(), goal = %goal, error = %e, "goal recovery failed");
                false
            }
        }
    }

    async fn try_recover(
        &self,
        executor: &ActionExecutor,
        agent: &mut AgentState,
        goal: &str,
    ) -> Result<(), RecoveryError> {
        let literal = strip_source(goal);
        let procedure = self
            .library
            .first_matching(&literal)
            .ok_or_else(|| RecoveryError::NoMatchingProcedure(literal.clone()))?;
        let guard = procedure
            .guard()
            .ok_or_else(|| RecoveryError::AbsentGuard(literal.clone()))?;
        let targets = reduce_guard(guard);
        let ctx = RecoveryContext::for_goal(agent.id(), &literal, targets, self.engine.mode());
        self.engine.close_gap(executor, agent, &ctx).await
    }
}
