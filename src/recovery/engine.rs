//! 核心恢复引擎
//!
//! 状态机：Idle -> ComputingGap -> Planning -> {离线全量执行 | 在线重规划循环} ->
//! RetryOriginal -> {Done | Failed}。
//!
//! - 离线：规划器返回的计划被信任为完整修复，按序全量执行，步骤间不复查缺口；
//!   单步失败记录但不中止（尽力而为）。
//! - 在线：每轮只执行计划的首个动作，随后取新快照重算缺口；真实世界里动作效果
//!   只有执行后才可知，因此在线模式从不信任首步之外的计划。
//!   循环受迭代上限约束，超限视为规划失败。
//! - 规划器返回空计划或传输失败在任一时刻都是终止性失败，之后不再做信念变更。

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::agent::AgentState;
use crate::beliefs::Predicate;
use crate::catalog::ActionDefinition;
use crate::executor::ActionExecutor;
use crate::planner::{PlannerClient, PlanningMode};
use crate::recovery::error::RecoveryError;
use crate::recovery::events::{send_event, RecoveryEvent};

/// 恢复触发方：单个动作的前置条件失败，或整个目标失败
#[derive(Debug, Clone)]
pub enum RecoveryTrigger {
    Action(String),
    Goal(String),
}

/// 单次恢复尝试的瞬态记录：开始时创建，结束即丢弃，从不持久化
#[derive(Debug, Clone)]
pub struct RecoveryContext {
    pub attempt: Uuid,
    pub agent: String,
    pub trigger: RecoveryTrigger,
    /// 缺口计算的基准谓词集（动作前置条件，或归约后的守卫）
    pub targets: Vec<Predicate>,
    pub mode: PlanningMode,
}

impl RecoveryContext {
    pub fn for_action(
        agent: &str,
        action: &str,
        targets: &[Predicate],
        mode: PlanningMode,
    ) -> Self {
        Self {
            attempt: Uuid::new_v4(),
            agent: agent.to_string(),
            trigger: RecoveryTrigger::Action(action.to_string()),
            targets: targets.to_vec(),
            mode,
        }
    }

    pub fn for_goal(agent: &str, goal: &str, targets: Vec<Predicate>, mode: PlanningMode) -> Self {
        Self {
            attempt: Uuid::new_v4(),
            agent: agent.to_string(),
            trigger: RecoveryTrigger::Goal(goal.to_string()),
            targets,
            mode,
        }
    }
}

/// 恢复引擎：持有规划器、规划模式与在线循环迭代上限
#[derive(Clone)]
pub struct RecoveryEngine {
    planner: Arc<dyn PlannerClient>,
    mode: PlanningMode,
    max_replan_iterations: usize,
    event_tx: Option<UnboundedSender<RecoveryEvent>>,
}

impl RecoveryEngine {
    pub fn new(
        planner: Arc<dyn PlannerClient>,
        mode: PlanningMode,
        max_replan_iterations: usize,
    ) -> Self {
        Self {
            planner,
            mode,
            max_replan_iterations,
            event_tx: None,
        }
    }

    /// 挂接过程事件通道
    pub fn with_event_tx(mut self, tx: UnboundedSender<RecoveryEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    pub fn mode(&self) -> PlanningMode {
        self.mode
    }

    /// 动作触发的恢复：闭合前置条件缺口后重试原动作，重试结果即最终结果。
    ///
    /// 离线模式下重试前不复查缺口，重试失败会再次进入恢复；嵌套深度取决于
    /// 规划器给出的计划是否收敛，max_replan_iterations 只约束在线循环。
    pub(crate) async fn recover_action(
        &self,
        executor: &ActionExecutor,
        agent: &mut AgentState,
        definition: &ActionDefinition,
    ) -> Result<bool, RecoveryError> {
        let ctx = RecoveryContext::for_action(
            agent.id(),
            definition.name(),
            definition.precondition(),
            self.mode,
        );
        self.close_gap(executor, agent, &ctx).await?;
        tracing::info!(
            agent = %agent.id(),
            action = %definition.name(),
            "gap closed, retrying original action"
        );
        Ok(executor.execute_boxed(agent, definition.name()).await)
    }

    /// 闭合 ctx.targets 相对当前信念的缺口（动作恢复与目标恢复共用的循环机制）
    pub async fn close_gap(
        &self,
        executor: &ActionExecutor,
        agent: &mut AgentState,
        ctx: &RecoveryContext,
    ) -> Result<(), RecoveryError> {
        let result = self.close_gap_inner(executor, agent, ctx).await;
        match &result {
            Ok(()) => send_event(&self.event_tx, RecoveryEvent::Recovered { attempt: ctx.attempt }),
            Err(e) => send_event(
                &self.event_tx,
                RecoveryEvent::Failed {
                    attempt: ctx.attempt,
                    reason: e.to_string(),
                },
            ),
        }
        result
    }

    async fn close_gap_inner(
        &self,
        executor: &ActionExecutor,
        agent: &mut AgentState,
        ctx: &RecoveryContext,
    ) -> Result<(), RecoveryError> {
        tracing::debug!(
            agent = %ctx.agent,
            attempt = %ctx.attempt,
            trigger = ?ctx.trigger,
            "recovery attempt started"
        );
        let missing = agent.missing_from(&ctx.targets);
        send_event(
            &self.event_tx,
            RecoveryEvent::GapComputed {
                attempt: ctx.attempt,
                missing: missing.iter().map(|p| p.to_string()).collect(),
            },
        );
        // 重入时缺口可能已空，直接回到重试
        if missing.is_empty() {
            return Ok(());
        }
        match self.mode {
            PlanningMode::Offline => self.execute_offline(executor, agent, ctx, &missing).await,
            PlanningMode::Online => self.replan_online(executor, agent, ctx, missing).await,
        }
    }

    /// 离线：一次规划，计划全量按序执行，步骤间不复查缺口
    async fn execute_offline(
        &self,
        executor: &ActionExecutor,
        agent: &mut AgentState,
        ctx: &RecoveryContext,
        missing: &[Predicate],
    ) -> Result<(), RecoveryError> {
        let plan = self.call_planner(agent, ctx, missing).await?;
        tracing::info!(agent = %agent.id(), ?plan, "precondition gap, running offline repair plan");
        for step in &plan {
            let step_name = step.to_lowercase();
            self.run_step(executor, agent, ctx, &step_name).await;
        }
        Ok(())
    }

    /// 在线：每轮规划后只执行首个动作，再以新快照重算缺口，直到缺口闭合或规划失败
    async fn replan_online(
        &self,
        executor: &ActionExecutor,
        agent: &mut AgentState,
        ctx: &RecoveryContext,
        mut missing: Vec<Predicate>,
    ) -> Result<(), RecoveryError> {
        let mut iterations = 0usize;
        while !missing.is_empty() {
            if iterations >= self.max_replan_iterations {
                tracing::warn!(
                    agent = %agent.id(),
                    limit = self.max_replan_iterations,
                    "replan iteration ceiling reached"
                );
                return Err(RecoveryError::PlannerFailure(format!(
                    "replan iteration ceiling ({}) reached",
                    self.max_replan_iterations
                )));
            }
            let plan = self.call_planner(agent, ctx, &missing).await?;
            let first = plan[0].to_lowercase();
            tracing::info!(agent = %agent.id(), action = %first, "precondition gap, running next repair action");
            self.run_step(executor, agent, ctx, &first).await;
            missing = agent.missing_from(&ctx.targets);
            iterations += 1;
        }
        Ok(())
    }

    /// 执行修复计划中的一步；失败只记录（离线继续余下步骤，在线由下一轮重规划纠正）
    async fn run_step(
        &self,
        executor: &ActionExecutor,
        agent: &mut AgentState,
        ctx: &RecoveryContext,
        step: &str,
    ) {
        let ok = executor.execute_boxed(agent, step).await;
        if ok {
            send_event(
                &self.event_tx,
                RecoveryEvent::StepExecuted {
                    attempt: ctx.attempt,
                    action: step.to_string(),
                },
            );
        } else {
            tracing::warn!(agent = %agent.id(), action = %step, "recovery step failure");
            send_event(
                &self.event_tx,
                RecoveryEvent::StepFailed {
                    attempt: ctx.attempt,
                    action: step.to_string(),
                },
            );
        }
    }

    /// 调用规划器；空计划与传输错误都折算为 PlannerFailure
    async fn call_planner(
        &self,
        agent: &AgentState,
        ctx: &RecoveryContext,
        missing: &[Predicate],
    ) -> Result<Vec<String>, RecoveryError> {
        let beliefs = agent.belief_strings();
        let goals: Vec<String> = missing.iter().map(|p| p.to_string()).collect();
        let plan = self
            .planner
            .run(agent.id(), &beliefs, &goals, ctx.mode)
            .await
            .map_err(|e| RecoveryError::PlannerFailure(e.to_string()))?;
        if plan.is_empty() {
            return Err(RecoveryError::PlannerFailure(
                "planner returned an empty plan".to_string(),
            ));
        }
        send_event(
            &self.event_tx,
            RecoveryEvent::PlanReceived {
                attempt: ctx.attempt,
                plan: plan.clone(),
            },
        );
        Ok(plan)
    }
}
