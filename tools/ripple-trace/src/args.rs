//! 命令行参数中的几何值解析。

use ripple::{Millis, Rect, Vec2};

/// 一次计划中的移动
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledMove {
    pub at: Millis,
    pub position: Vec2,
}

fn parse_numbers<T: std::str::FromStr>(s: &str, expected: usize) -> Result<Vec<T>, String> {
    let values = s
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<T>()
                .map_err(|_| format!("无法解析数值 '{}'", part.trim()))
        })
        .collect::<Result<Vec<T>, String>>()?;

    if values.len() != expected {
        return Err(format!("需要 {expected} 个逗号分隔的数值，实际 {} 个", values.len()));
    }
    Ok(values)
}

/// `left,top,right,bottom`
pub fn parse_rect(s: &str) -> Result<Rect, String> {
    let v = parse_numbers::<i32>(s, 4)?;
    Ok(Rect::new(v[0], v[1], v[2], v[3]))
}

/// `x,y`
pub fn parse_point(s: &str) -> Result<Vec2, String> {
    let v = parse_numbers::<f32>(s, 2)?;
    Ok(Vec2::new(v[0], v[1]))
}

/// `毫秒:x,y`
pub fn parse_move(s: &str) -> Result<ScheduledMove, String> {
    let (at, point) = s
        .split_once(':')
        .ok_or_else(|| format!("移动格式应为 '毫秒:x,y'，实际 '{s}'"))?;
    let at = at
        .trim()
        .parse::<Millis>()
        .map_err(|_| format!("无法解析时间 '{}'", at.trim()))?;
    if at < 0 {
        return Err("移动时间不能为负".to_string());
    }

    Ok(ScheduledMove {
        at,
        position: parse_point(point)?,
    })
}
