//! 注册表编译器核心
//! 仅负责将原始语言档案批量编译为稠密概率表

use tracing::debug;

use super::table::ProfileRegistry;
use crate::error::{LangDetectError, LdResult};
use crate::extractor::MAX_GRAM;
use crate::profile::LangProfile;

/// 注册表编译器
pub struct RegistryCompiler;

impl RegistryCompiler {
    /// 编译档案批次
    ///
    /// `declared_capacity` 为概率向量的槽位数，调用方以本批次档案数传入。
    /// 编译在本地注册表上进行，任何一份档案失败则整批返回错误，
    /// 调用方不会看到半成品状态。
    pub fn compile(
        profiles: &[LangProfile],
        declared_capacity: usize,
    ) -> LdResult<ProfileRegistry> {
        let mut registry = ProfileRegistry::default();
        for profile in profiles {
            Self::add_profile(&mut registry, profile, declared_capacity)?;
        }

        debug!(
            "档案编译完成：语言 {} 种，n-gram条目 {} 条",
            registry.lang_count(),
            registry.ngram_count()
        );
        Ok(registry)
    }

    /// 将单份档案并入注册表
    fn add_profile(
        registry: &mut ProfileRegistry,
        profile: &LangProfile,
        declared_capacity: usize,
    ) -> LdResult<()> {
        // 1. 语言标识查重
        if registry.languages.iter().any(|lang| lang == &profile.name) {
            return Err(LangDetectError::DuplicateLang(
                "Duplicate the same language profile.".to_string(),
            ));
        }

        // 2. 分配槽位（顺序即索引）
        let index = registry.languages.len();
        if index >= declared_capacity {
            return Err(LangDetectError::Format(format!(
                "declared capacity {} exceeded by profile \"{}\"",
                declared_capacity, profile.name
            )));
        }
        registry.languages.push(profile.name.clone());

        // 3. 逐n-gram写入概率（count / n_words[len-1]）
        for (word, count) in &profile.freq {
            let length = word.chars().count();
            // 长度超出1–3的n-gram不参与概率表，不保留全零死行
            if length == 0 || length > MAX_GRAM {
                continue;
            }

            let total = profile.n_words[length - 1];
            if total == 0 {
                return Err(LangDetectError::Format(format!(
                    "zero n-gram total for length {} in profile \"{}\"",
                    length, profile.name
                )));
            }

            let row = registry
                .word_lang_prob_map
                .entry(word.clone())
                .or_insert_with(|| vec![0.0; declared_capacity]);
            row[index] = *count as f64 / total as f64;
        }

        Ok(())
    }
}
