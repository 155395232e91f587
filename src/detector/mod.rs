//! 检测模块：检测会话核心逻辑与全局编排入口
pub mod global;
pub mod detector;

// 导出核心接口
pub use self::detector::{Detector, ALPHA_DEFAULT};
pub use self::global::{
    detect, detect_langs, get_lang_list, load_json_profile, load_profile, RegistryCache,
};
