//! 全局配置管理,存储所有可配置项

use std::path::PathBuf;

use crate::detector::ALPHA_DEFAULT;

/// 全局配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // 规范语言档案目录
    pub profile_dir: PathBuf,
    // 平滑参数默认值
    pub alpha: f64,
    // 采样随机种子（None时由熵源初始化）
    pub seed: Option<u64>,
    // 是否启用详细日志
    pub verbose: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            profile_dir: PathBuf::from("profiles"),
            alpha: ALPHA_DEFAULT,
            seed: None,
            verbose: false,
        }
    }
}

/// 配置管理器（单例）
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GlobalConfig::default(),
        }
    }

    pub fn profile_dir(mut self, dir: PathBuf) -> Self {
        self.config.profile_dir = dir;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.config.alpha = alpha;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}

impl Default for CustomConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
