//! 谓词：归一化的原子事实
//!
//! 归一化约定：剥离来源标注 `[source(self)]` / `[source(percepts)]` 并去除首尾空白；
//! 两个谓词相等当且仅当归一化后的文本相同。以 `kqml` 开头的记账信念视为内部簿记，
//! 不参与缺口计算，也不交给规划器。

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

static SOURCE_ANNOTATION: OnceLock<Regex> = OnceLock::new();

fn source_annotation() -> &'static Regex {
    SOURCE_ANNOTATION.get_or_init(|| {
        Regex::new(r"\[source\((self|percepts)\)\]").expect("valid source annotation regex")
    })
}

/// 剥离来源标注，返回归一化文本
pub fn strip_source(text: &str) -> String {
    source_annotation().replace_all(text, "").trim().to_string()
}

/// 原子事实，内部始终保存归一化后的文本
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Predicate(String);

impl Predicate {
    /// 解析一条谓词文本并归一化（剥离来源标注、去空白）
    pub fn parse(text: &str) -> Self {
        Self(strip_source(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 是否为 `kqml` 前缀的内部记账信念
    pub fn is_bookkeeping(&self) -> bool {
        self.0.starts_with("kqml")
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Predicate {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}
