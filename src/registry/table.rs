//! 编译后的概率注册表模型
//! 只读共享：语言序列 + n-gram到各语言概率向量的稠密映射

use std::collections::HashMap;

/// 语言概率注册表
/// 一次编译构建完成后不再变更，可经Arc在并发检测会话间共享
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    /// 语言标识序列（顺序即概率向量槽位的分配顺序，构建后不重排）
    pub(crate) languages: Vec<String>,
    /// n-gram -> 每语言概率向量（所有向量长度一致）
    pub(crate) word_lang_prob_map: HashMap<String, Vec<f64>>,
}

impl ProfileRegistry {
    /// 已加载语言数量
    pub fn lang_count(&self) -> usize {
        self.languages.len()
    }

    /// 是否未加载任何语言
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// 语言标识序列（借用视图）
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// 语言标识序列快照（脱离注册表生命周期）
    pub fn lang_list(&self) -> Vec<String> {
        self.languages.clone()
    }

    /// 概率表中的n-gram条目数
    pub fn ngram_count(&self) -> usize {
        self.word_lang_prob_map.len()
    }

    /// 查询n-gram的各语言概率向量
    pub fn word_probs(&self, word: &str) -> Option<&[f64]> {
        self.word_lang_prob_map.get(word).map(Vec::as_slice)
    }

    /// 清空注册表（切换语言子集整体重建时使用）
    pub fn clear(&mut self) {
        self.languages.clear();
        self.word_lang_prob_map.clear();
    }
}
