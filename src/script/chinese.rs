//! 汉字简繁体判定
//! n-gram统计无法区分zh/zh-tw，检测后处理据此对原始文本做字形判定

use std::collections::HashSet;

use once_cell::sync::Lazy;

// 常用简繁分化字对照（简化后字形不同的高频字，取自两岸常用字表的交集）
// 左列为繁体专有字形，右列为对应简体专有字形，逐位对应
const TRADITIONAL_CHARS: &str = "對說們這來時個會學國為點還長發當從見動開關門問間無話電馬鳥龍東車書萬過現實體經濟愛歡樂雞買賣讀寫聽語錢頭顏風飛館習業藝醫鐵銀錯難題讓證級紅給結絕統網絡邊達運遠連鐘響頁順須飯鮮麗黃齊齒";
const SIMPLIFIED_CHARS: &str = "对说们这来时个会学国为点还长发当从见动开关门问间无话电马鸟龙东车书万过现实体经济爱欢乐鸡买卖读写听语钱头颜风飞馆习业艺医铁银错难题让证级红给结绝统网络边达运远连钟响页顺须饭鲜丽黄齐齿";

static TRADITIONAL_SET: Lazy<HashSet<char>> =
    Lazy::new(|| TRADITIONAL_CHARS.chars().collect());
static SIMPLIFIED_SET: Lazy<HashSet<char>> =
    Lazy::new(|| SIMPLIFIED_CHARS.chars().collect());

/// 文本是否可判定为简体（不含任何繁体专有字形）
pub fn is_simplified(text: &str) -> bool {
    !text.chars().any(|c| TRADITIONAL_SET.contains(&c))
}

/// 文本是否可判定为繁体（不含任何简体专有字形）
pub fn is_traditional(text: &str) -> bool {
    !text.chars().any(|c| SIMPLIFIED_SET.contains(&c))
}
