//! rslangdetect - Rust 统计式语言识别库
//! 从字符n-gram频率档案编译概率模型，对自由文本输出语言概率分布

// 导出全局错误类型
pub use self::error::{LangDetectError, LdResult};

// 导出配置模块
pub use self::config::{ConfigManager, CustomConfigBuilder, GlobalConfig};

// 导出档案模块核心接口
pub use self::profile::{LangProfile, Language, ProfileLoader};

// 导出注册表模块核心接口
pub use self::registry::{ProfileRegistry, RegistryCompiler};

// 导出检测模块核心接口（含模块级简化入口）
pub use self::detector::{
    detect, detect_langs, get_lang_list, load_json_profile, load_profile, Detector,
    RegistryCache,
};

// 导出离线剪枝工具核心接口
pub use self::pruner::{prune_profile_file, PruneStats, ScriptRange};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod profile;
pub mod registry;
pub mod extractor;
pub mod script;
pub mod detector;
pub mod pruner;
