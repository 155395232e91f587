//! 文本特征提取
//! 负责清洗输入文本（剔除URL/邮箱、压缩空白）并提取1–3字符n-gram

use once_cell::sync::Lazy;
use regex::Regex;

/// n-gram最大长度（按字符计）
pub const MAX_GRAM: usize = 3;

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[-_.?&~;+=/#0-9A-Za-z]+").unwrap());
static MAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-_.0-9A-Za-z]+@[-_0-9A-Za-z]+(?:\.[-_.0-9A-Za-z]+)+").unwrap());

/// 文本清洗：URL与邮箱替换为空格，连续空白压缩为单个空格
pub fn clean_text(text: &str) -> String {
    let no_url = URL_RE.replace_all(text, " ");
    let no_mail = MAIL_RE.replace_all(&no_url, " ");

    let mut cleaned = String::with_capacity(no_mail.len());
    let mut prev_space = true;
    for c in no_mail.chars() {
        if c.is_whitespace() {
            if !prev_space {
                cleaned.push(' ');
                prev_space = true;
            }
        } else {
            cleaned.push(c);
            prev_space = false;
        }
    }
    while cleaned.ends_with(' ') {
        cleaned.pop();
    }
    cleaned
}

/// 提取1–3字符n-gram（纯空白窗口不构成特征）
pub fn extract_ngrams(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut grams = Vec::new();

    for start in 0..chars.len() {
        for len in 1..=MAX_GRAM {
            if start + len > chars.len() {
                break;
            }
            let window = &chars[start..start + len];
            if window.iter().all(|c| *c == ' ') {
                continue;
            }
            grams.push(window.iter().collect::<String>());
        }
    }
    grams
}
