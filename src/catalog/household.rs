//! 示例领域：日常生活九动作
//!
//! 作为参考领域随库提供，测试与演示直接使用；同时附带两条目标过程，
//! 展示目标失败恢复所需的触发器与守卫（guard）写法。

use crate::catalog::{ActionCatalog, ActionDefinition};
use crate::recovery::goal::{GoalProcedure, ProcedureLibrary};

/// 构建日常生活示例目录
pub fn household_catalog() -> ActionCatalog {
    let mut catalog = ActionCatalog::new();
    let definitions = [
        ActionDefinition::new("dochores", &[], &["hasMoney", "parentsHappy"], &[]),
        ActionDefinition::new("buyphone", &["hasMoney"], &["hasPhone"], &["hasMoney"]),
        ActionDefinition::new("earnsalary", &[], &["hasMoney"], &[]),
        ActionDefinition::new("textfriend", &["onPhone", "hasPhone"], &["messageSent"], &[]),
        ActionDefinition::new("usephone", &["hasPhone"], &["onPhone"], &[]),
        ActionDefinition::new("gooffphone", &["hasPhone", "onPhone"], &[], &["onPhone"]),
        ActionDefinition::new(
            "gotogym",
            &["motivated", "inCar"],
            &["atGym", "hungry", "happy"],
            &[],
        ),
        ActionDefinition::new("getincar", &["hasCar"], &["inCar"], &["atHome"]),
        ActionDefinition::new("gotowork", &["inCar"], &["atWork", "tired", "bossHappy"], &[]),
    ];
    for def in definitions {
        catalog
            .register(def)
            .expect("household demo definitions are conflict-free");
    }
    catalog
}

/// 示例目标过程库：触发器为 `+!goal` 形式，守卫为合取谓词表达式
pub fn household_procedures() -> ProcedureLibrary {
    let mut library = ProcedureLibrary::new();
    library.register(GoalProcedure::new("+!stay_in_touch", Some("hasPhone & onPhone")));
    library.register(GoalProcedure::new("+!get_fit", Some("(motivated) & (inCar)")));
    library
}
