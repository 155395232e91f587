//! 检测会话核心：累积输入文本，基于注册表输出语言概率分布
//! 采样式朴素贝叶斯：多次随机试验取均值，降低单次采样噪声

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{LangDetectError, LdResult};
use crate::extractor;
use crate::profile::Language;
use crate::registry::ProfileRegistry;

/// 平滑参数默认值
pub const ALPHA_DEFAULT: f64 = 0.5;
/// 平滑参数每次试验的高斯扰动幅度
const ALPHA_WIDTH: f64 = 0.05;
/// 单次试验迭代上限
const ITERATION_LIMIT: usize = 1000;
/// 结果保留概率阈值
const PROB_THRESHOLD: f64 = 0.1;
/// 收敛判定阈值
const CONV_THRESHOLD: f64 = 0.99999;
/// 平滑基准频率
const BASE_FREQ: f64 = 10000.0;
/// 采样试验次数
const N_TRIAL: usize = 7;
/// 累积文本长度上限（字符）
const MAX_TEXT_LEN: usize = 10000;

/// 语言检测会话
/// 绑定一个共享注册表，单次检测请求生命周期：append后分类一次即丢弃
#[derive(Debug, Clone)]
pub struct Detector {
    registry: Arc<ProfileRegistry>,
    alpha: f64,
    seed: Option<u64>,
    text: String,
}

impl Detector {
    /// 创建检测会话（注册表未加载任何语言则失败）
    pub fn new(registry: Arc<ProfileRegistry>) -> LdResult<Self> {
        if registry.is_empty() {
            return Err(LangDetectError::NeedLoadProfile(
                "Need to load profiles.".to_string(),
            ));
        }
        Ok(Self {
            registry,
            alpha: ALPHA_DEFAULT,
            seed: None,
            text: String::new(),
        })
    }

    /// 覆盖平滑参数（不做范围校验，由采样过程直接消费）
    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    /// 固定采样随机种子（可复现检测结果）
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = Some(seed);
    }

    /// 追加待检测文本（清洗后累积，超出上限截断）
    pub fn append(&mut self, text: &str) {
        let cleaned = extractor::clean_text(text);
        if !self.text.is_empty() && !cleaned.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(&cleaned);

        if self.text.chars().count() > MAX_TEXT_LEN {
            self.text = self.text.chars().take(MAX_TEXT_LEN).collect();
        }
    }

    /// 返回单一最优语言标识
    pub fn detect(&self) -> LdResult<String> {
        self.get_probabilities()?
            .into_iter()
            .next()
            .map(|language| language.lang)
            .ok_or_else(|| {
                LangDetectError::Detect("no language candidate above threshold".to_string())
            })
    }

    /// 返回完整概率分布（按概率降序）
    pub fn get_probabilities(&self) -> LdResult<Vec<Language>> {
        // 1. 提取注册表已知的n-gram特征
        let ngrams: Vec<String> = extractor::extract_ngrams(&self.text)
            .into_iter()
            .filter(|word| self.registry.word_probs(word).is_some())
            .collect();
        if ngrams.is_empty() {
            return Err(LangDetectError::Detect("no features in text".to_string()));
        }

        let langsize = self.registry.lang_count();
        let mut lang_prob = vec![0.0f64; langsize];
        let mut rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        // 2. 多次随机采样试验，平均各语言概率
        for _ in 0..N_TRIAL {
            let mut prob = vec![1.0 / langsize as f64; langsize];
            let alpha = self.alpha + gaussian(&mut rng) * ALPHA_WIDTH;

            let mut iteration = 0usize;
            loop {
                let word = &ngrams[rng.gen_range(0..ngrams.len())];
                self.update_lang_prob(&mut prob, word, alpha);

                // 每5轮归一化一次并判定收敛
                if iteration % 5 == 0
                    && (normalize_prob(&mut prob) > CONV_THRESHOLD
                        || iteration >= ITERATION_LIMIT)
                {
                    break;
                }
                iteration += 1;
            }

            normalize_prob(&mut prob);
            for (accumulated, trial) in lang_prob.iter_mut().zip(prob.iter()) {
                *accumulated += trial / N_TRIAL as f64;
            }
        }

        // 3. 降序排序，剔除低于阈值的候选
        Ok(self.sort_probability(&lang_prob))
    }

    /// 用单个n-gram的条件概率更新各语言概率
    fn update_lang_prob(&self, prob: &mut [f64], word: &str, alpha: f64) {
        if let Some(word_probs) = self.registry.word_probs(word) {
            let weight = alpha / BASE_FREQ;
            for (p, word_prob) in prob.iter_mut().zip(word_probs.iter()) {
                *p *= weight + word_prob;
            }
        }
    }

    /// 概率降序排序并过滤阈值以下条目
    fn sort_probability(&self, prob: &[f64]) -> Vec<Language> {
        let mut result: Vec<Language> = self
            .registry
            .languages()
            .iter()
            .zip(prob.iter())
            .filter(|(_, p)| **p > PROB_THRESHOLD)
            .map(|(lang, p)| Language::new(lang.clone(), *p))
            .collect();
        result.sort_by(|a, b| {
            b.prob
                .partial_cmp(&a.prob)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        result
    }
}

/// 概率向量归一化，返回最大分量
fn normalize_prob(prob: &mut [f64]) -> f64 {
    let sum: f64 = prob.iter().sum();
    if sum <= 0.0 {
        return 0.0;
    }
    let mut max = 0.0f64;
    for p in prob.iter_mut() {
        *p /= sum;
        if *p > max {
            max = *p;
        }
    }
    max
}

/// Box-Muller高斯采样（用于平滑参数扰动）
fn gaussian<R: Rng>(rng: &mut R) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::LangProfile;
    use crate::registry::RegistryCompiler;
    use std::collections::HashMap;

    fn registry_en_xx() -> Arc<ProfileRegistry> {
        // 两种语言的单字特征完全不相交，检测结果应无歧义
        let en = LangProfile {
            name: "en".to_string(),
            freq: HashMap::from([
                ("a".to_string(), 40),
                ("b".to_string(), 30),
                ("c".to_string(), 30),
            ]),
            n_words: [100, 1, 1],
        };
        let xx = LangProfile {
            name: "xx".to_string(),
            freq: HashMap::from([
                ("x".to_string(), 40),
                ("y".to_string(), 30),
                ("z".to_string(), 30),
            ]),
            n_words: [100, 1, 1],
        };
        let profiles = vec![en, xx];
        Arc::new(RegistryCompiler::compile(&profiles, profiles.len()).unwrap())
    }

    #[test]
    fn test_new_rejects_empty_registry() {
        // 测试场景：空注册表创建会话，应返回NeedLoadProfile
        let registry = Arc::new(ProfileRegistry::default());
        let err = Detector::new(registry).unwrap_err();
        assert!(matches!(err, LangDetectError::NeedLoadProfile(_)));
    }

    #[test]
    fn test_detect_unambiguous_language() {
        // 测试场景：特征互斥的两种语言，固定种子下稳定检出
        let mut detector = Detector::new(registry_en_xx()).unwrap();
        detector.set_seed(42);
        detector.append("abc abc abc");

        assert_eq!(detector.detect().unwrap(), "en");
    }

    #[test]
    fn test_detect_is_deterministic_with_seed() {
        // 测试场景：同一种子两次检测，分布完全一致
        let run = || {
            let mut detector = Detector::new(registry_en_xx()).unwrap();
            detector.set_seed(7);
            detector.append("xyz xyz");
            detector.get_probabilities().unwrap()
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_probabilities_sorted_descending() {
        // 测试场景：输出分布按概率降序
        let mut detector = Detector::new(registry_en_xx()).unwrap();
        detector.set_seed(3);
        detector.append("abc xyz abc abc");

        let ranked = detector.get_probabilities().unwrap();
        assert!(!ranked.is_empty());
        for pair in ranked.windows(2) {
            assert!(pair[0].prob >= pair[1].prob);
        }
    }

    #[test]
    fn test_no_features_in_text() {
        // 测试场景：输入不含注册表任何n-gram，应返回Detect错误
        let mut detector = Detector::new(registry_en_xx()).unwrap();
        detector.append("0123 456789");

        let err = detector.get_probabilities().unwrap_err();
        assert!(matches!(err, LangDetectError::Detect(_)));
    }

    #[test]
    fn test_append_accumulates() {
        // 测试场景：分多次append的文本共同参与检测
        let mut detector = Detector::new(registry_en_xx()).unwrap();
        detector.set_seed(11);
        detector.append("ab");
        detector.append("cab");

        assert_eq!(detector.detect().unwrap(), "en");
    }
}
