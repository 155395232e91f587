//! 注册表模块：将原始档案编译为可共享的概率模型
pub mod table;
pub mod builder;

// 导出核心接口
pub use self::table::ProfileRegistry;
pub use self::builder::RegistryCompiler;
