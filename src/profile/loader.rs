//! 档案加载管理器
//! 负责枚举档案目录、解析内联JSON，产出LangProfile序列

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::debug;

use super::model::LangProfile;
use crate::error::{LangDetectError, LdResult};

/// 档案加载管理器
pub struct ProfileLoader;

impl ProfileLoader {
    /// 从目录加载语言档案（可选按支持语言子集限定）
    ///
    /// 子集给定时以子集名单为候选文件名，否则枚举目录（排序保证确定性）。
    /// 点文件与非常规文件跳过；子集中无对应文件的语言同样跳过。
    pub fn load_from_dir(
        dir: &Path,
        subset: Option<&BTreeSet<String>>,
    ) -> LdResult<Vec<LangProfile>> {
        // 1. 枚举候选文件名
        let candidates: Vec<String> = match subset {
            Some(langs) => langs.iter().cloned().collect(),
            None => {
                let entries = fs::read_dir(dir).map_err(|e| {
                    LangDetectError::NeedLoadProfile(format!(
                        "Not found profile: \"{}\": {}",
                        dir.display(),
                        e
                    ))
                })?;
                let mut names: Vec<String> = entries
                    .filter_map(|entry| entry.ok())
                    .filter_map(|entry| entry.file_name().into_string().ok())
                    .collect();
                names.sort();
                names
            }
        };
        if candidates.is_empty() {
            return Err(LangDetectError::NeedLoadProfile(format!(
                "Not found profile: \"{}\"",
                dir.display()
            )));
        }

        // 2. 逐文件读取并解析
        let mut profiles = Vec::new();
        for name in &candidates {
            if name.starts_with('.') {
                continue;
            }
            let path = dir.join(name);
            if !path.is_file() {
                continue;
            }

            let raw = fs::read_to_string(&path).map_err(|e| {
                LangDetectError::FileLoad(format!("Cannot open \"{}\": {}", path.display(), e))
            })?;
            let profile: LangProfile = serde_json::from_str(&raw).map_err(|e| {
                LangDetectError::Format(format!(
                    "Profile format error in \"{}\": {}",
                    path.display(),
                    e
                ))
            })?;
            profiles.push(profile);
        }

        // 3. 候选全部被过滤等同于档案缺失
        if profiles.is_empty() {
            return Err(LangDetectError::NeedLoadProfile(format!(
                "Not found profile: \"{}\"",
                dir.display()
            )));
        }

        debug!("已从目录 \"{}\" 加载语言档案 {} 份", dir.display(), profiles.len());
        Ok(profiles)
    }

    /// 解析内联JSON档案序列（至少2份）
    pub fn parse_json_profiles(json_profiles: &[String]) -> LdResult<Vec<LangProfile>> {
        if json_profiles.len() < 2 {
            return Err(LangDetectError::NeedLoadProfile(
                "Need more than 2 profiles.".to_string(),
            ));
        }

        json_profiles
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                serde_json::from_str(raw).map_err(|e| {
                    LangDetectError::Format(format!(
                        "Profile format error at index {}: {}",
                        index, e
                    ))
                })
            })
            .collect()
    }
}
