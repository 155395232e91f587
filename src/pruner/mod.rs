//! 清理模块：离线档案n-gram剪枝（不在检测服务路径上）
pub mod script_range;
pub mod profile_pruner;

// 导出核心接口
pub use self::profile_pruner::{prune_profile_file, PruneStats};
pub use self::script_range::{lookup, ScriptRange};
