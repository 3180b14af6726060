//! Mender - 信念驱动的动作执行与失败恢复引擎
//!
//! 模块划分：
//! - **agent**: AgentState（信念归属方）与 AgentRuntime 装配
//! - **beliefs**: 谓词归一化与 BeliefStore 边界（内存实现）
//! - **catalog**: 数据驱动的动作目录（前置条件 / 新增 / 删除信念）
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **executor**: 动作执行器（缺口检测，失败时委托恢复引擎）
//! - **planner**: 外部规划器边界（HTTP / Mock）与规划模式
//! - **recovery**: 核心恢复引擎（离线/在线重规划）、目标失败处理、过程事件
//!
//! 恢复控制流：ActionExecutor ->（前置条件缺口）-> RecoveryEngine ->
//! PlannerClient -> ActionExecutor（逐步执行修复计划）-> 重试原动作。

pub mod agent;
pub mod beliefs;
pub mod catalog;
pub mod config;
pub mod executor;
pub mod observability;
pub mod planner;
pub mod recovery;

pub use agent::{AgentRuntime, AgentState};
pub use beliefs::{BeliefStore, InMemoryBeliefStore, Predicate};
pub use catalog::{ActionCatalog, ActionDefinition};
pub use executor::ActionExecutor;
pub use planner::{PlannerClient, PlanningMode};
pub use recovery::{GoalFailureHandler, RecoveryEngine};
