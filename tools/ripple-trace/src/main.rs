//! # ripple-trace - 水波纹时间线工具
//!
//! 用手动时钟回放一次手势（t=0 按下，可选的移动与抬起），
//! 按固定帧间隔输出水波纹每帧的绘制结果，便于调参与回归对比。
//!
//! ## 用法
//!
//! ```bash
//! # 快速轻点：50ms 抬起
//! cargo run -p ripple-trace -- --exit-at 50
//!
//! # 拖出边界后抬起，输出 JSON
//! cargo run -p ripple-trace -- --move 300:150,50 --exit-at 900 --format json
//!
//! # 使用自定义参数
//! cargo run -p ripple-trace -- --config ripple.json --exit-at 1200 -v
//!
//! # 打印默认参数
//! cargo run -p ripple-trace -- --dump-config
//! ```

mod args;
mod replay;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use ripple::{Millis, Rect, RippleConfig, Vec2};
use tracing::{Level, info};

use crate::args::{ScheduledMove, parse_move, parse_point, parse_rect};
use crate::replay::{Gesture, format_text, replay};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// 对齐的文本表格
    Text,
    /// 每帧一行 JSON
    Json,
}

#[derive(Parser)]
#[command(name = "ripple-trace")]
#[command(about = "水波纹时间线工具 - 回放一次手势并输出每帧绘制结果")]
#[command(version)]
struct Cli {
    /// 参数文件（JSON），缺省使用默认参数
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 可交互区域 left,top,right,bottom
    #[arg(long, default_value = "0,0,100,100", value_parser = parse_rect, allow_hyphen_values = true)]
    bounds: Rect,

    /// 内边距 left,top,right,bottom
    #[arg(long, default_value = "0,0,0,0", value_parser = parse_rect, allow_hyphen_values = true)]
    padding: Rect,

    /// 按下位置 x,y（默认：区域中心）
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    at: Option<Vec2>,

    /// 每 dp 的像素数
    #[arg(long, default_value = "1.0")]
    density: f32,

    /// 计划中的移动 毫秒:x,y（可重复）
    #[arg(long = "move", value_parser = parse_move, allow_hyphen_values = true)]
    moves: Vec<ScheduledMove>,

    /// 抬起时间（毫秒），缺省表示一直按住
    #[arg(long)]
    exit_at: Option<Millis>,

    /// 采样间隔（毫秒）
    #[arg(long, default_value = "16")]
    frame_ms: Millis,

    /// 输出格式
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// 打印生效的参数（JSON）后退出
    #[arg(long)]
    dump_config: bool,

    /// 日志详细程度（-v: debug, -vv: trace）
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("ripple-trace error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => RippleConfig::load(path)
            .with_context(|| format!("加载参数文件失败: {}", path.display()))?,
        None => RippleConfig::default(),
    };

    if cli.dump_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    if cli.density <= 0.0 || !cli.density.is_finite() {
        anyhow::bail!("density 必须是正数，实际 {}", cli.density);
    }
    if cli.bounds.is_empty() {
        anyhow::bail!("可交互区域为空: {:?}", cli.bounds);
    }

    let start = cli.at.unwrap_or_else(|| {
        Vec2::new(
            (cli.bounds.left + cli.bounds.right) as f32 / 2.0,
            (cli.bounds.top + cli.bounds.bottom) as f32 / 2.0,
        )
    });

    let gesture = Gesture {
        bounds: cli.bounds,
        padding: cli.padding,
        start,
        density: cli.density,
        moves: cli.moves,
        exit_at: cli.exit_at,
    };
    info!(gesture = ?gesture, frame_ms = cli.frame_ms, "开始回放");

    let records = replay(&gesture, config, cli.frame_ms).context("参数无效")?;
    for record in &records {
        match cli.format {
            OutputFormat::Text => println!("{}", format_text(record)),
            OutputFormat::Json => println!("{}", serde_json::to_string(record)?),
        }
    }

    info!(frames = records.len(), "回放结束");
    Ok(())
}
