//! 文字系统Unicode码点区间定义

/// 闭区间Unicode码点范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptRange {
    pub begin: u32,
    pub end: u32,
}

impl ScriptRange {
    pub const fn new(begin: u32, end: u32) -> Self {
        Self { begin, end }
    }

    /// 字符是否落在区间内
    pub fn contains(&self, c: char) -> bool {
        let code_point = c as u32;
        self.begin <= code_point && code_point <= self.end
    }
}

/// 谚文音节区间（韩语）
pub const HANGUL: ScriptRange = ScriptRange::new(0xAC00, 0xD7AF);
/// 泰文区间
pub const THAI: ScriptRange = ScriptRange::new(0x0E00, 0x0E7F);
/// 天城文区间（印地语）
pub const DEVANAGARI: ScriptRange = ScriptRange::new(0x0900, 0x097F);
/// 果鲁穆奇文区间（旁遮普语）
pub const GURMUKHI: ScriptRange = ScriptRange::new(0x0A00, 0x0A7F);
/// 西里尔文区间（俄语，含补充区段）
pub const CYRILLIC: ScriptRange = ScriptRange::new(0x0400, 0x052F);

/// 按文字系统名或语言码解析内置区间
pub fn lookup(name: &str) -> Option<ScriptRange> {
    match name {
        "hangul" | "ko" => Some(HANGUL),
        "thai" | "th" => Some(THAI),
        "devanagari" | "hi" => Some(DEVANAGARI),
        "gurmukhi" | "pa" => Some(GURMUKHI),
        "cyrillic" | "ru" => Some(CYRILLIC),
        _ => None,
    }
}
