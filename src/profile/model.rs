//! 档案数据模型定义
//! 仅存储单语言n-gram统计数据，无任何业务逻辑，支持序列化/反序列化

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// 单语言n-gram频率档案（从JSON档案文件解析）
/// 编译进注册表后即被丢弃，不在运行期保留
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LangProfile {
    /// 语言标识（ISO 639-1风格，如"en"、"zh-tw"）
    pub name: String,
    /// n-gram -> 出现次数（1–3字符）
    #[serde(default)]
    pub freq: HashMap<String, u64>,
    /// 各长度n-gram的总次数（n_words[k]对应长度k+1）
    /// 数组长度必须为3，反序列化时即校验
    pub n_words: [u64; 3],
}

/// 检测结果条目（语言标识 + 概率）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Language {
    pub lang: String,
    pub prob: f64,
}

impl Language {
    pub fn new(lang: impl Into<String>, prob: f64) -> Self {
        Self {
            lang: lang.into(),
            prob,
        }
    }
}

// ======== 为 Language 实现 Display trait（用于 CLI / Report 输出） ========
impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.lang, self.prob)
    }
}
