//! 动作目录
//!
//! 每个动作是纯数据（前置条件 / 新增信念 / 删除信念），由 ActionCatalog 按名注册与查找，
//! 取代按动作名展开的 if/else 分发链；新增动作只是一次数据注册。
//! 动作名在所有接缝处大小写不敏感（注册与查找都先 to_lowercase）。

pub mod household;

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::beliefs::Predicate;

/// 目录注册错误
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("duplicate action: {0}")]
    DuplicateAction(String),

    /// 同一动作的 adds 与 deletes 不允许出现同一谓词
    #[error("action {action} lists {predicate} in both adds and deletes")]
    ConflictingEffects { action: String, predicate: String },
}

/// 动作定义：名称、前置条件集合、有序新增列表、有序删除列表。注册后不可变。
#[derive(Debug, Clone)]
pub struct ActionDefinition {
    name: String,
    precondition: Vec<Predicate>,
    adds: Vec<Predicate>,
    deletes: Vec<Predicate>,
}

impl ActionDefinition {
    /// 以谓词文本构建动作定义；名称统一转小写
    pub fn new(name: &str, precondition: &[&str], adds: &[&str], deletes: &[&str]) -> Self {
        Self {
            name: name.to_lowercase(),
            precondition: precondition.iter().map(|p| Predicate::parse(p)).collect(),
            adds: adds.iter().map(|p| Predicate::parse(p)).collect(),
            deletes: deletes.iter().map(|p| Predicate::parse(p)).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 前置条件（集合语义，顺序无关）
    pub fn precondition(&self) -> &[Predicate] {
        &self.precondition
    }

    pub fn adds(&self) -> &[Predicate] {
        &self.adds
    }

    pub fn deletes(&self) -> &[Predicate] {
        &self.deletes
    }
}

/// 动作目录：按小写名称存储 Arc<ActionDefinition>
#[derive(Debug, Clone, Default)]
pub struct ActionCatalog {
    actions: HashMap<String, Arc<ActionDefinition>>,
}

impl ActionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一个动作；重名或 adds/deletes 冲突时拒绝
    pub fn register(&mut self, definition: ActionDefinition) -> Result<(), CatalogError> {
        if let Some(conflict) = definition
            .adds
            .iter()
            .find(|p| definition.deletes.contains(p))
        {
            return Err(CatalogError::ConflictingEffects {
                action: definition.name.clone(),
                predicate: conflict.to_string(),
            });
        }
        let name = definition.name.clone();
        if self.actions.contains_key(&name) {
            return Err(CatalogError::DuplicateAction(name));
        }
        self.actions.insert(name, Arc::new(definition));
        Ok(())
    }

    /// 大小写不敏感查找；未注册返回 None（调用方错误，不触发恢复）
    pub fn lookup(&self, name: &str) -> Option<Arc<ActionDefinition>> {
        self.actions.get(&name.to_lowercase()).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.actions.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_case_insensitive() {
        let mut catalog = ActionCatalog::new();
        catalog
            .register(ActionDefinition::new("BuyPhone", &["hasMoney"], &["hasPhone"], &["hasMoney"]))
            .unwrap();
        let a = catalog.lookup("buyphone").unwrap();
        let b = catalog.lookup("BUYPHONE").unwrap();
        assert_eq!(a.name(), b.name());
        assert_eq!(a.name(), "buyphone");
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut catalog = ActionCatalog::new();
        catalog
            .register(ActionDefinition::new("earnsalary", &[], &["hasMoney"], &[]))
            .unwrap();
        let err = catalog
            .register(ActionDefinition::new("EarnSalary", &[], &["hasMoney"], &[]))
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateAction(_)));
    }

    #[test]
    fn test_conflicting_effects_rejected() {
        let mut catalog = ActionCatalog::new();
        let err = catalog
            .register(ActionDefinition::new("broken", &[], &["hasMoney"], &["hasMoney"]))
            .unwrap_err();
        assert!(matches!(err, CatalogError::ConflictingEffects { .. }));
    }

    #[test]
    fn test_unknown_action_is_none() {
        let catalog = ActionCatalog::new();
        assert!(catalog.lookup("flytomars").is_none());
    }
}
