//! 注册表缓存与全局检测入口
//! 进程级缓存最近一次编译的注册表，按语言子集键值判定复用或整体重建

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use once_cell::sync::Lazy;
use tracing::debug;

use super::detector::Detector;
use crate::config::{ConfigManager, GlobalConfig};
use crate::error::LdResult;
use crate::profile::{Language, ProfileLoader};
use crate::registry::{ProfileRegistry, RegistryCompiler};
use crate::script::chinese;

/// 缓存槽位条目
struct CacheEntry {
    subset_key: Option<BTreeSet<String>>,
    registry: Arc<ProfileRegistry>,
}

/// 注册表缓存
/// 至多持有一对（子集键，注册表）；键不匹配即丢弃重建，从不增量修补。
/// 槽位由互斥锁保护，并发的首次构建与子集切换在锁上串行化。
pub struct RegistryCache {
    config: GlobalConfig,
    slot: Mutex<Option<CacheEntry>>,
}

impl RegistryCache {
    /// 创建缓存（配置给出规范档案目录与检测参数）
    pub fn new(config: GlobalConfig) -> Self {
        Self {
            config,
            slot: Mutex::new(None),
        }
    }

    /// 获取缓存注册表；无缓存或子集键不等（按值比较，与顺序无关）则重建
    pub fn get_or_build(&self, subset: Option<&[String]>) -> LdResult<Arc<ProfileRegistry>> {
        let key = subset_key(subset);
        let mut slot = self.lock_slot();

        if let Some(entry) = slot.as_ref() {
            if entry.subset_key == key {
                return Ok(Arc::clone(&entry.registry));
            }
            debug!("语言子集变更，重建注册表缓存");
        }

        let registry = Arc::new(Self::build(&self.config.profile_dir, key.as_ref())?);
        *slot = Some(CacheEntry {
            subset_key: key,
            registry: Arc::clone(&registry),
        });
        Ok(registry)
    }

    /// 从指定目录显式加载注册表并整体替换缓存
    pub fn load_from_dir(&self, dir: &Path, subset: Option<&[String]>) -> LdResult<()> {
        let key = subset_key(subset);
        let registry = Arc::new(Self::build(dir, key.as_ref())?);
        *self.lock_slot() = Some(CacheEntry {
            subset_key: key,
            registry,
        });
        Ok(())
    }

    /// 从内联JSON档案加载注册表并整体替换缓存（至少2份）
    pub fn load_from_json(&self, json_profiles: &[String]) -> LdResult<()> {
        let profiles = ProfileLoader::parse_json_profiles(json_profiles)?;
        let registry = RegistryCompiler::compile(&profiles, profiles.len())?;
        *self.lock_slot() = Some(CacheEntry {
            subset_key: None,
            registry: Arc::new(registry),
        });
        Ok(())
    }

    /// 创建绑定缓存注册表的检测会话（应用配置的alpha与种子）
    pub fn create_session(&self, subset: Option<&[String]>) -> LdResult<Detector> {
        let registry = self.get_or_build(subset)?;
        let mut detector = Detector::new(registry)?;
        detector.set_alpha(self.config.alpha);
        if let Some(seed) = self.config.seed {
            detector.set_seed(seed);
        }
        Ok(detector)
    }

    /// 当前已加载语言列表快照（未加载时为空）
    pub fn lang_list(&self) -> Vec<String> {
        self.lock_slot()
            .as_ref()
            .map(|entry| entry.registry.lang_list())
            .unwrap_or_default()
    }

    /// 清空缓存槽位
    pub fn invalidate(&self) {
        *self.lock_slot() = None;
    }

    /// 加载并编译一次注册表
    fn build(dir: &Path, subset: Option<&BTreeSet<String>>) -> LdResult<ProfileRegistry> {
        let profiles = ProfileLoader::load_from_dir(dir, subset)?;
        RegistryCompiler::compile(&profiles, profiles.len())
    }

    fn lock_slot(&self) -> MutexGuard<'_, Option<CacheEntry>> {
        // 锁中毒仅在持锁代码panic时出现，恢复内层数据继续使用
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// 语言子集键（值相等判定，与传入顺序无关）
fn subset_key(subset: Option<&[String]>) -> Option<BTreeSet<String>> {
    subset.map(|langs| langs.iter().cloned().collect())
}

/// 全局注册表缓存实例
static GLOBAL_CACHE: Lazy<RegistryCache> =
    Lazy::new(|| RegistryCache::new(ConfigManager::get_default()));

/// 检测单一最优语言
pub fn detect(text: &str, supported_languages: Option<&[String]>) -> LdResult<String> {
    let mut detector = GLOBAL_CACHE.create_session(supported_languages)?;
    detector.append(text);
    detector.detect()
}

/// 检测完整概率分布（含中文简繁体消歧后处理）
pub fn detect_langs(
    text: &str,
    supported_languages: Option<&[String]>,
) -> LdResult<Vec<Language>> {
    let mut detector = GLOBAL_CACHE.create_session(supported_languages)?;
    detector.append(text);
    let ranked = detector.get_probabilities()?;
    Ok(resolve_chinese_script(text, ranked))
}

/// 加载指定目录的档案到全局缓存
pub fn load_profile(
    profile_directory: &Path,
    supported_languages: Option<&[String]>,
) -> LdResult<()> {
    GLOBAL_CACHE.load_from_dir(profile_directory, supported_languages)
}

/// 加载内联JSON档案到全局缓存
pub fn load_json_profile(json_profiles: &[String]) -> LdResult<()> {
    GLOBAL_CACHE.load_from_json(json_profiles)
}

/// 当前已加载语言列表快照
pub fn get_lang_list() -> Vec<String> {
    GLOBAL_CACHE.lang_list()
}

/// 语言标识是否属于中文简繁对（n-gram统计无法区分两者）
fn is_chinese(lang: &str) -> bool {
    matches!(lang, "zh" | "zh-tw")
}

/// 中文简繁体消歧后处理
/// 榜首为zh/zh-tw时按原始文本字形改写为单一结果，沿用榜首概率；
/// 其余情况原样返回分布
pub(crate) fn resolve_chinese_script(text: &str, ranked: Vec<Language>) -> Vec<Language> {
    match ranked.first() {
        Some(top) if is_chinese(&top.lang) => {
            let lang = if chinese::is_simplified(text) {
                "zh"
            } else {
                "zh-tw"
            };
            vec![Language::new(lang, top.prob)]
        }
        _ => ranked,
    }
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_profile(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    fn fixture_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write_profile(
            dir.path(),
            "en",
            r#"{"name":"en","freq":{"a":40,"b":30,"c":30},"n_words":[100,1,1]}"#,
        );
        write_profile(
            dir.path(),
            "fr",
            r#"{"name":"fr","freq":{"x":40,"y":30,"z":30},"n_words":[100,1,1]}"#,
        );
        dir
    }

    fn cache_for(dir: &Path) -> RegistryCache {
        let config = ConfigManager::custom()
            .profile_dir(dir.to_path_buf())
            .seed(42)
            .build();
        RegistryCache::new(config)
    }

    #[test]
    fn test_get_or_build_reuses_cached_registry() {
        // 测试场景：相同子集重复获取返回同一实例；删除目录后仍命中，证明未重新加载
        let dir = fixture_dir();
        let cache = cache_for(dir.path());

        let first = cache.get_or_build(None).unwrap();
        fs::remove_dir_all(dir.path()).unwrap();
        let second = cache.get_or_build(None).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_get_or_build_subset_equality_is_order_independent() {
        // 测试场景：子集元素相同顺序不同，仍命中缓存
        let dir = fixture_dir();
        let cache = cache_for(dir.path());

        let subset_a = ["en".to_string(), "fr".to_string()];
        let subset_b = ["fr".to_string(), "en".to_string()];
        let first = cache.get_or_build(Some(&subset_a)).unwrap();
        let second = cache.get_or_build(Some(&subset_b)).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_get_or_build_rebuilds_on_subset_change() {
        // 测试场景：子集变更触发整体重建，注册表实例与语言集合随之变化
        let dir = fixture_dir();
        let cache = cache_for(dir.path());

        let full = cache.get_or_build(None).unwrap();
        let subset = ["en".to_string()];
        let restricted = cache.get_or_build(Some(&subset)).unwrap();

        assert!(!Arc::ptr_eq(&full, &restricted));
        assert_eq!(restricted.lang_list(), ["en"]);
    }

    #[test]
    fn test_create_session_and_detect() {
        // 测试场景：经缓存创建会话，互斥特征文本稳定检出
        let dir = fixture_dir();
        let cache = cache_for(dir.path());

        let mut detector = cache.create_session(None).unwrap();
        detector.append("abc abc abc");
        assert_eq!(detector.detect().unwrap(), "en");
    }

    #[test]
    fn test_lang_list_snapshot() {
        // 测试场景：未加载时为空；加载后返回快照
        let dir = fixture_dir();
        let cache = cache_for(dir.path());

        assert!(cache.lang_list().is_empty());
        cache.get_or_build(None).unwrap();
        assert_eq!(cache.lang_list(), ["en", "fr"]);
    }

    #[test]
    fn test_load_from_json_replaces_slot() {
        // 测试场景：内联加载整体替换缓存
        let dir = fixture_dir();
        let cache = cache_for(dir.path());

        let profiles = vec![
            r#"{"name":"de","freq":{"a":1},"n_words":[10,1,1]}"#.to_string(),
            r#"{"name":"it","freq":{"b":1},"n_words":[10,1,1]}"#.to_string(),
        ];
        cache.load_from_json(&profiles).unwrap();
        assert_eq!(cache.lang_list(), ["de", "it"]);
    }

    #[test]
    fn test_invalidate_clears_slot() {
        // 测试场景：invalidate后缓存为空
        let dir = fixture_dir();
        let cache = cache_for(dir.path());

        cache.get_or_build(None).unwrap();
        cache.invalidate();
        assert!(cache.lang_list().is_empty());
    }

    #[test]
    fn test_resolve_chinese_script_rewrites_simplified_top() {
        // 测试场景：榜首为中文且原文为简体，整个分布改写为单一zh条目并沿用榜首概率
        let ranked = vec![
            Language::new("zh-tw", 0.6),
            Language::new("ja", 0.3),
            Language::new("ko", 0.1),
        ];
        let resolved = resolve_chinese_script("这是简体中文写的", ranked);

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].lang, "zh");
        assert!((resolved[0].prob - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_chinese_script_rewrites_traditional_top() {
        // 测试场景：榜首为中文且原文为繁体，改写为zh-tw
        let ranked = vec![Language::new("zh", 0.8), Language::new("ja", 0.2)];
        let resolved = resolve_chinese_script("這是繁體中文寫的", ranked);

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].lang, "zh-tw");
        assert!((resolved[0].prob - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_chinese_script_leaves_other_top_untouched() {
        // 测试场景：榜首非中文，分布长度与顺序原样保留
        let ranked = vec![
            Language::new("en", 0.7),
            Language::new("zh", 0.2),
            Language::new("fr", 0.1),
        ];
        let resolved = resolve_chinese_script("hello world", ranked.clone());

        assert_eq!(resolved, ranked);
    }

    #[test]
    fn test_resolve_chinese_script_empty_distribution() {
        // 测试场景：空分布原样返回
        assert!(resolve_chinese_script("text", Vec::new()).is_empty());
    }

    #[test]
    fn test_global_surface_with_inline_profiles() {
        // 测试场景：全局内联加载后，检测与语言列表均可用
        // 全局状态仅此一个测试触碰，避免并行测试相互干扰
        let profiles = vec![
            r#"{"name":"en","freq":{"a":40,"b":30,"c":30},"n_words":[100,1,1]}"#.to_string(),
            r#"{"name":"fr","freq":{"x":40,"y":30,"z":30},"n_words":[100,1,1]}"#.to_string(),
        ];
        load_json_profile(&profiles).unwrap();

        let mut langs = get_lang_list();
        langs.sort();
        assert_eq!(langs, ["en", "fr"]);

        assert_eq!(detect("abc abc abc", None).unwrap(), "en");
        let ranked = detect_langs("abc abc abc", None).unwrap();
        assert_eq!(ranked[0].lang, "en");
    }
}
