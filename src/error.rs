//! 全局错误类型定义
//! 覆盖档案加载、编译、检测全流程，基于thiserror实现类型安全处理

use thiserror::Error;

/// 语言识别全局错误枚举
#[derive(Error, Debug)]
pub enum LangDetectError {
    // 档案相关错误
    /// 档案源为空/内联档案不足2份/未加载任何语言就发起检测
    #[error("Need load profiles: {0}")]
    NeedLoadProfile(String),
    /// 档案文件无法打开或读取
    #[error("Cannot open profile: {0}")]
    FileLoad(String),
    /// 档案解析失败或形状非法（含零分母统计）
    #[error("Profile format error: {0}")]
    Format(String),
    /// 两份档案声明了相同的语言标识
    #[error("Duplicate language profile: {0}")]
    DuplicateLang(String),

    // 检测相关错误
    /// 检测失败（输入中无可用特征）
    #[error("Detection failed: {0}")]
    Detect(String),
}

// 全局Result类型
pub type LdResult<T> = Result<T, LangDetectError>;
