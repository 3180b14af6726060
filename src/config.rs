//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `MENDER__*` 覆盖（双下划线表示嵌套，
//! 如 `MENDER__RECOVERY__PLANNING_MODE=offline`）。

use std::path::PathBuf;

use serde::Deserialize;

/// 应用配置根
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub agent: AgentSection,
    #[serde(default)]
    pub recovery: RecoverySection,
    #[serde(default)]
    pub planner: PlannerSection,
}

/// [agent] 段：Agent 名称
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AgentSection {
    pub name: Option<String>,
}

/// [recovery] 段：规划模式与在线重规划迭代上限
#[derive(Debug, Clone, Deserialize)]
pub struct RecoverySection {
    /// offline / online；无法识别的值在装配时回退 online
    #[serde(default = "default_planning_mode")]
    pub planning_mode: String,
    /// 在线循环的迭代上限，超限折算为规划失败
    #[serde(default = "default_max_replan_iterations")]
    pub max_replan_iterations: usize,
}

fn default_planning_mode() -> String {
    "online".to_string()
}

fn default_max_replan_iterations() -> usize {
    32
}

impl Default for RecoverySection {
    fn default() -> Self {
        Self {
            planning_mode: default_planning_mode(),
            max_replan_iterations: default_max_replan_iterations(),
        }
    }
}

/// [planner] 段：后端选择与超时
#[derive(Debug, Clone, Deserialize)]
pub struct PlannerSection {
    /// 后端：http / mock
    #[serde(default = "default_provider")]
    pub provider: String,
    /// http 后端的服务地址
    pub base_url: Option<String>,
    /// 单次规划调用超时（秒）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_provider() -> String {
    "mock".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for PlannerSection {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            agent: AgentSection::default(),
            recovery: RecoverySection::default(),
            planner: PlannerSection::default(),
        }
    }
}

/// 从 config 目录加载配置，环境变量 MENDER__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 MENDER__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("MENDER")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}
