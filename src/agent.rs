//! AgentState 与运行时装配
//!
//! AgentState 是单个 Agent 的信念归属方：恢复进行期间独占其信念库（同一 Agent 的
//! 信念读写、动作执行与恢复步骤严格串行）。AgentRuntime 按配置装配规划器、
//! 恢复引擎、执行器与目标失败处理器，并建立目标重提交队列。

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::beliefs::{BeliefStore, InMemoryBeliefStore, Predicate};
use crate::catalog::ActionCatalog;
use crate::config::AppConfig;
use crate::executor::ActionExecutor;
use crate::planner::{HttpPlanner, MockPlanner, PlannerClient, PlanningMode};
use crate::recovery::{GoalEvent, GoalFailureHandler, ProcedureLibrary, RecoveryEngine};

/// 单个 Agent 的标识与信念库
pub struct AgentState {
    id: String,
    pub beliefs: Box<dyn BeliefStore>,
}

impl AgentState {
    pub fn new(id: impl Into<String>, beliefs: Box<dyn BeliefStore>) -> Self {
        Self {
            id: id.into(),
            beliefs,
        }
    }

    /// 空的内存信念库
    pub fn in_memory(id: impl Into<String>) -> Self {
        Self::new(id, Box::new(InMemoryBeliefStore::new()))
    }

    /// 以初始事实集构建（测试与演示）
    pub fn with_facts<I, S>(id: impl Into<String>, facts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(id, Box::new(InMemoryBeliefStore::with_facts(facts)))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// 当前可见信念快照：过滤掉 kqml 记账信念
    pub fn visible_beliefs(&self) -> Vec<Predicate> {
        self.beliefs
            .snapshot()
            .into_iter()
            .filter(|p| !p.is_bookkeeping())
            .collect()
    }

    /// 可见信念的字符串形式（交给规划器的格式）
    pub fn belief_strings(&self) -> Vec<String> {
        self.visible_beliefs().iter().map(|p| p.to_string()).collect()
    }

    /// 缺口计算：targets − 当前信念（集合差，保持 targets 顺序）
    pub fn missing_from(&self, targets: &[Predicate]) -> Vec<Predicate> {
        targets
            .iter()
            .filter(|t| !self.beliefs.contains(t))
            .cloned()
            .collect()
    }
}

/// 按配置选择规划器后端：http（需 base_url）或 mock
pub fn create_planner_from_config(cfg: &AppConfig) -> anyhow::Result<Arc<dyn PlannerClient>> {
    match cfg.planner.provider.to_lowercase().as_str() {
        "http" => match cfg.planner.base_url.as_deref() {
            Some(url) => {
                tracing::info!(url = %url, "using HTTP planner");
                Ok(Arc::new(HttpPlanner::new(url, cfg.planner.timeout_secs)?))
            }
            None => {
                tracing::warn!("planner provider is http but base_url is unset, using mock planner");
                Ok(Arc::new(MockPlanner::new()))
            }
        },
        "mock" => Ok(Arc::new(MockPlanner::new())),
        other => {
            tracing::warn!("unknown planner provider '{other}', using mock planner");
            Ok(Arc::new(MockPlanner::new()))
        }
    }
}

/// 装配完成的单 Agent 运行时
pub struct AgentRuntime {
    pub state: AgentState,
    pub executor: ActionExecutor,
    pub goals: GoalFailureHandler,
    /// 目标重提交队列的消费端，由外围推理循环消费
    pub goal_events: mpsc::UnboundedReceiver<GoalEvent>,
}

impl AgentRuntime {
    /// 按配置装配运行时：规划模式与迭代上限取自 [recovery]，规划器取自 [planner]
    pub fn build(
        cfg: &AppConfig,
        catalog: ActionCatalog,
        library: ProcedureLibrary,
    ) -> anyhow::Result<Self> {
        let mode = PlanningMode::from_config(&cfg.recovery.planning_mode);
        let planner = create_planner_from_config(cfg)?;
        let engine = RecoveryEngine::new(planner, mode, cfg.recovery.max_replan_iterations);

        let (goal_tx, goal_rx) = mpsc::unbounded_channel();
        let executor = ActionExecutor::new(catalog, engine.clone());
        let goals = GoalFailureHandler::new(library, engine, goal_tx);
        let state = AgentState::in_memory(
            cfg.agent.name.clone().unwrap_or_else(|| "agent".to_string()),
        );

        Ok(Self {
            state,
            executor,
            goals,
            goal_events: goal_rx,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::household::{household_catalog, household_procedures};

    #[test]
    fn test_visible_beliefs_filter_bookkeeping() {
        let agent = AgentState::with_facts("ag1", ["hasMoney", "kqmlReceivedAt(ag2)"]);
        assert_eq!(agent.belief_strings(), vec!["hasMoney"]);
    }

    #[test]
    fn test_missing_from_is_set_difference() {
        let agent = AgentState::with_facts("ag1", ["hasPhone"]);
        let targets = [Predicate::parse("hasPhone"), Predicate::parse("onPhone")];
        assert_eq!(agent.missing_from(&targets), vec![Predicate::parse("onPhone")]);
    }

    #[test]
    fn test_missing_from_annotated_beliefs() {
        let agent = AgentState::with_facts("ag1", ["hasMoney[source(percepts)]"]);
        let targets = [Predicate::parse("hasMoney")];
        assert!(agent.missing_from(&targets).is_empty());
    }

    #[tokio::test]
    async fn test_runtime_builds_with_defaults() {
        let cfg = AppConfig::default();
        let runtime =
            AgentRuntime::build(&cfg, household_catalog(), household_procedures()).unwrap();
        assert_eq!(runtime.state.id(), "agent");
        assert_eq!(runtime.executor.catalog().len(), 9);
    }
}
