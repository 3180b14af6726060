//! 恢复层：核心恢复引擎、目标失败处理、过程事件

pub mod engine;
pub mod error;
pub mod events;
pub mod goal;

pub use engine::{RecoveryContext, RecoveryEngine, RecoveryTrigger};
pub use error::RecoveryError;
pub use events::{GoalEvent, RecoveryEvent};
pub use goal::{GoalFailureHandler, GoalProcedure, ProcedureLibrary};
