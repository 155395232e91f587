//! 离线档案剪枝
//! 在档案文件原地剔除不属于目标文字系统的n-gram，其余顶层键原样保留

use std::fs;
use std::io::Write;
use std::path::Path;

use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::debug;

use super::script_range::ScriptRange;
use crate::error::{LangDetectError, LdResult};

/// 剪枝统计信息
#[derive(Debug, Clone, Copy, Default)]
pub struct PruneStats {
    /// 剪枝前freq条目数
    pub before: usize,
    /// 剪枝后freq条目数
    pub after: usize,
}

impl PruneStats {
    /// 被剔除的条目数
    pub fn removed(&self) -> usize {
        self.before - self.after
    }
}

/// 原地剪枝档案文件
///
/// 剔除freq中所有字符都落在区间外的n-gram键；`name`、`n_words`等
/// 其余顶层键原样保留。改写经同目录临时文件持久化，避免半写状态。
pub fn prune_profile_file(path: &Path, range: ScriptRange) -> LdResult<PruneStats> {
    // 1. 读取并解析档案
    let raw = fs::read_to_string(path).map_err(|e| {
        LangDetectError::FileLoad(format!("Cannot open \"{}\": {}", path.display(), e))
    })?;
    let mut doc: Value = serde_json::from_str(&raw).map_err(|e| {
        LangDetectError::Format(format!(
            "Profile format error in \"{}\": {}",
            path.display(),
            e
        ))
    })?;

    // 2. 仅改写freq对象
    let stats = {
        let freq = doc
            .get_mut("freq")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| {
                LangDetectError::Format(format!(
                    "Profile format error in \"{}\": missing freq object",
                    path.display()
                ))
            })?;
        let before = freq.len();
        freq.retain(|ngram, _| ngram.chars().any(|c| range.contains(c)));
        PruneStats {
            before,
            after: freq.len(),
        }
    };

    // 3. 序列化并原子改写
    let serialized = serde_json::to_string(&doc).map_err(|e| {
        LangDetectError::Format(format!(
            "Profile format error in \"{}\": {}",
            path.display(),
            e
        ))
    })?;
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut temp_file = NamedTempFile::new_in(parent.unwrap_or_else(|| Path::new(".")))
        .map_err(|e| {
            LangDetectError::FileLoad(format!(
                "Cannot rewrite \"{}\": {}",
                path.display(),
                e
            ))
        })?;
    temp_file.write_all(serialized.as_bytes()).map_err(|e| {
        LangDetectError::FileLoad(format!("Cannot rewrite \"{}\": {}", path.display(), e))
    })?;
    temp_file.persist(path).map_err(|e| {
        LangDetectError::FileLoad(format!("Cannot rewrite \"{}\": {}", path.display(), e))
    })?;

    debug!(
        "档案剪枝完成：\"{}\"，freq条目 {} -> {}",
        path.display(),
        stats.before,
        stats.after
    );
    Ok(stats)
}
