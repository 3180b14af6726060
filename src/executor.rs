//! 动作执行器
//!
//! execute：按名查目录（未注册为终止性失败，不触发恢复）-> 取信念快照算缺口 ->
//! 缺口为空则应用效果（删除严格先于新增）-> 否则委托恢复引擎，恢复后重试原动作。
//! 修复计划的每一步也经由 execute 执行，因此恢复可以嵌套。

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::agent::AgentState;
use crate::catalog::{ActionCatalog, ActionDefinition};
use crate::recovery::{RecoveryEngine, RecoveryError};

/// 动作执行器：持有动作目录与恢复引擎
pub struct ActionExecutor {
    catalog: Arc<ActionCatalog>,
    recovery: RecoveryEngine,
}

impl ActionExecutor {
    pub fn new(catalog: ActionCatalog, recovery: RecoveryEngine) -> Self {
        Self {
            catalog: Arc::new(catalog),
            recovery,
        }
    }

    pub fn catalog(&self) -> &ActionCatalog {
        &self.catalog
    }

    /// 执行一个动作；所有终止性错误折算为 false 并留下诊断日志
    pub async fn execute(&self, agent: &mut AgentState, action: &str) -> bool {
        match self.try_execute(agent, action).await {
            Ok(success) => success,
            Err(e) => {
                tracing::error!(agent = %agent.id(), action = %action, error = %e, "action failed");
                false
            }
        }
    }

    async fn try_execute(
        &self,
        agent: &mut AgentState,
        action: &str,
    ) -> Result<bool, RecoveryError> {
        let name = action.to_lowercase();
        let definition = self
            .catalog
            .lookup(&name)
            .ok_or_else(|| RecoveryError::UnknownAction(name.clone()))?;
        tracing::info!(agent = %agent.id(), action = %name, "executing");

        let missing = agent.missing_from(definition.precondition());
        if missing.is_empty() {
            self.apply_effects(agent, &definition);
            return Ok(true);
        }
        self.recovery.recover_action(self, agent, &definition).await
    }

    /// 删除严格先于新增：被删除后又在 adds 中重新给出的谓词必须在终态中存在
    fn apply_effects(&self, agent: &mut AgentState, definition: &ActionDefinition) {
        for predicate in definition.deletes() {
            agent.beliefs.delete(predicate);
        }
        for predicate in definition.adds() {
            agent.beliefs.add(predicate.clone());
        }
    }

    /// 装箱的 execute，打破执行器与恢复引擎互递归时的无限大小 Future
    pub(crate) fn execute_boxed<'a>(
        &'a self,
        agent: &'a mut AgentState,
        action: &'a str,
    ) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>> {
        Box::pin(self.execute(agent, action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::household::household_catalog;
    use crate::planner::{MockPlanner, PlanningMode};

    fn executor() -> ActionExecutor {
        let engine = RecoveryEngine::new(
            Arc::new(MockPlanner::new()),
            PlanningMode::Online,
            8,
        );
        ActionExecutor::new(household_catalog(), engine)
    }

    #[tokio::test]
    async fn test_satisfied_precondition_applies_effects() {
        let mut agent = AgentState::with_facts("ag1", ["hasMoney"]);
        assert!(executor().execute(&mut agent, "buyphone").await);
        assert_eq!(agent.belief_strings(), vec!["hasPhone"]);
    }

    #[tokio::test]
    async fn test_deletes_applied_before_adds() {
        // getincar：删除 atHome、新增 inCar；两个固定列表都完整应用
        let mut agent = AgentState::with_facts("ag1", ["hasCar", "atHome"]);
        assert!(executor().execute(&mut agent, "getincar").await);
        let beliefs = agent.belief_strings();
        assert!(beliefs.contains(&"inCar".to_string()));
        assert!(!beliefs.contains(&"atHome".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_action_is_terminal() {
        let mut agent = AgentState::in_memory("ag1");
        assert!(!executor().execute(&mut agent, "flytomars").await);
        assert!(agent.belief_strings().is_empty());
    }

    #[tokio::test]
    async fn test_action_name_case_insensitive_at_seam() {
        let mut agent = AgentState::with_facts("ag1", ["hasMoney"]);
        assert!(executor().execute(&mut agent, "BuyPhone").await);
        assert_eq!(agent.belief_strings(), vec!["hasPhone"]);
    }

    #[tokio::test]
    async fn test_no_precondition_action_always_runs() {
        let mut agent = AgentState::in_memory("ag1");
        assert!(executor().execute(&mut agent, "dochores").await);
        let beliefs = agent.belief_strings();
        assert_eq!(beliefs, vec!["hasMoney", "parentsHappy"]);
    }
}
