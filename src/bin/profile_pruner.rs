//! 离线档案剪枝CLI
//! 按文字系统区间原地清理语言档案中的跨文字n-gram，每份档案执行一次

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use rslangdetect::pruner::{self, ScriptRange};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(
    name = "profile_pruner",
    about = "Prune out-of-script n-grams from a language profile file",
    version
)]
struct Cli {
    /// 语言档案文件路径
    profile: PathBuf,

    /// 内置文字系统名称或语言码（hangul/ko、thai/th、devanagari/hi、gurmukhi/pa、cyrillic/ru）
    #[arg(long, conflicts_with_all = ["begin", "end"])]
    script: Option<String>,

    /// 区间起始码点（十六进制，如AC00）
    #[arg(long, value_parser = parse_codepoint, requires = "end")]
    begin: Option<u32>,

    /// 区间结束码点（十六进制，如D7AF）
    #[arg(long, value_parser = parse_codepoint, requires = "begin")]
    end: Option<u32>,
}

fn parse_codepoint(raw: &str) -> Result<u32, String> {
    let trimmed = raw.trim_start_matches("U+").trim_start_matches("0x");
    u32::from_str_radix(trimmed, 16).map_err(|e| format!("invalid code point {raw:?}: {e}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let range = match (&cli.script, cli.begin, cli.end) {
        (Some(name), _, _) => pruner::lookup(name)
            .with_context(|| format!("unknown script name {name:?}"))?,
        (None, Some(begin), Some(end)) => ScriptRange::new(begin, end),
        _ => bail!("either --script or both --begin and --end are required"),
    };

    let stats = pruner::prune_profile_file(&cli.profile, range)
        .with_context(|| format!("failed to prune {:?}", cli.profile))?;

    println!(
        "{}: kept {} of {} n-grams ({} removed)",
        cli.profile.display(),
        stats.after,
        stats.before,
        stats.removed()
    );
    Ok(())
}
