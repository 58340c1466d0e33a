//! 手势回放：用手动时钟驱动一个水波纹，按固定帧间隔采样。

use ripple::{
    ManualClock, Millis, Rect, RippleConfig, RippleEffect, RippleFrame, RipplePhase,
    RippleResult, Vec2,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::args::ScheduledMove;

/// 没有抬起（或抬起较早）时的最长回放时间
pub const MAX_TRACE_MS: Millis = 10_000;

/// 一次手势
#[derive(Debug, Clone)]
pub struct Gesture {
    pub bounds: Rect,
    pub padding: Rect,
    pub start: Vec2,
    pub density: f32,
    pub moves: Vec<ScheduledMove>,
    pub exit_at: Option<Millis>,
}

/// 一帧采样
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    pub t: Millis,
    pub phase: RipplePhase,
    pub active: bool,
    pub frame: Option<RippleFrame>,
}

#[derive(Debug, Clone, Copy)]
enum Event {
    Move(Vec2),
    Exit,
}

/// 回放手势
///
/// `enter()` 在 t=0 调用，之后每 `frame_ms` 采样一帧，直到效果不再活跃（包含最后一帧）。
/// 没有抬起时在 [`MAX_TRACE_MS`] 截止；有抬起时保证回放到消散结束之后。
pub fn replay(
    gesture: &Gesture,
    config: RippleConfig,
    frame_ms: Millis,
) -> RippleResult<Vec<FrameRecord>> {
    let frame_ms = frame_ms.max(1);
    let limit = trace_limit(gesture.exit_at, &config, frame_ms);
    let clock = ManualClock::new(0);
    let mut ripple = RippleEffect::with_config(
        gesture.bounds,
        gesture.padding,
        gesture.start.x,
        gesture.start.y,
        gesture.density,
        config,
        clock.clone(),
    )?;
    ripple.enter();

    let mut events: Vec<(Millis, Event)> = gesture
        .moves
        .iter()
        .map(|m| (m.at, Event::Move(m.position)))
        .chain(gesture.exit_at.map(|at| (at, Event::Exit)))
        .collect();
    // 稳定排序：同一时刻按给定顺序执行
    events.sort_by_key(|(at, _)| *at);
    let mut pending = events.into_iter().peekable();

    let mut records = Vec::new();
    let mut t = 0;
    while t <= limit {
        while let Some((at, event)) = pending.next_if(|(at, _)| *at <= t) {
            clock.set(at);
            debug!(at = at, event = ?event, "回放事件");
            match event {
                Event::Move(p) => ripple.move_to(p.x, p.y),
                Event::Exit => ripple.exit(),
            }
        }

        clock.set(t);
        let active = ripple.is_active();
        records.push(FrameRecord {
            t,
            phase: ripple.phase(),
            active,
            frame: ripple.frame(),
        });

        if !active {
            break;
        }
        t += frame_ms;
    }

    if records.last().is_some_and(|r| r.active) {
        warn!(limit = limit, "回放达到时长上限时效果仍在活跃，已截断");
    }

    Ok(records)
}

/// 回放截止时间
///
/// 抬起会被推迟到最短间隔之后，消散结束后还需多采样一帧才能看到不活跃状态。
fn trace_limit(exit_at: Option<Millis>, config: &RippleConfig, frame_ms: Millis) -> Millis {
    match exit_at {
        Some(at) => {
            let exit_end = at.max(Millis::from(config.exit_min_delay_ms))
                + Millis::from(config.exit_duration_ms);
            MAX_TRACE_MS.max(exit_end + frame_ms)
        }
        None => MAX_TRACE_MS,
    }
}

/// 文本表格中的一行
pub fn format_text(record: &FrameRecord) -> String {
    let head = format!("{:>6}ms  {:<9}", record.t, format!("{:?}", record.phase));
    match record.frame {
        Some(RippleFrame::Fill {
            center,
            radius,
            alpha,
        }) => format!(
            "{head}  fill  ({:>7.2}, {:>7.2})  r={radius:>7.2}            a={alpha:>3}",
            center.x, center.y
        ),
        Some(RippleFrame::Ring {
            center,
            radius,
            stroke_width,
            alpha,
        }) => format!(
            "{head}  ring  ({:>7.2}, {:>7.2})  r={radius:>7.2}  w={stroke_width:>7.2}  a={alpha:>3}",
            center.x, center.y
        ),
        None => format!("{head}  -"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tap(exit_at: Option<Millis>) -> Gesture {
        Gesture {
            bounds: Rect::from_size(100, 100),
            padding: Rect::zero(),
            start: Vec2::new(50.0, 50.0),
            density: 1.0,
            moves: Vec::new(),
            exit_at,
        }
    }

    #[test]
    fn test_quick_tap_ends_after_exit_duration() {
        let records = replay(&tap(Some(50)), RippleConfig::default(), 100).unwrap();

        let last = records.last().unwrap();
        assert!(!last.active);
        assert_eq!(last.t, 900);
        assert_eq!(last.phase, RipplePhase::Finished);
        assert!(records[..records.len() - 1].iter().all(|r| r.active));
    }

    #[test]
    fn test_held_gesture_stops_at_cap() {
        let records = replay(&tap(None), RippleConfig::default(), 1_000).unwrap();
        assert_eq!(records.len(), 11);
        assert_eq!(records.last().unwrap().t, MAX_TRACE_MS);
        assert!(records.iter().all(|r| r.active));
    }

    #[test]
    fn test_late_exit_replayed_past_cap() {
        let records = replay(&tap(Some(9_900)), RippleConfig::default(), 1_000).unwrap();

        // 消散在 10500 结束，11000 处第一次不活跃
        let last = records.last().unwrap();
        assert_eq!(last.t, 11_000);
        assert!(!last.active);
        assert_eq!(last.phase, RipplePhase::Finished);
        assert!(records.iter().any(|r| r.t == 10_000 && r.phase == RipplePhase::Exiting));
    }

    #[test]
    fn test_trace_limit() {
        let config = RippleConfig::default();
        assert_eq!(trace_limit(None, &config, 16), MAX_TRACE_MS);
        assert_eq!(trace_limit(Some(50), &config, 16), MAX_TRACE_MS);
        assert_eq!(trace_limit(Some(9_900), &config, 16), 10_516);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RippleConfig {
            exit_duration_ms: 0,
            ..RippleConfig::default()
        };
        assert!(replay(&tap(Some(50)), config, 16).is_err());
    }

    #[test]
    fn test_scheduled_move_applied_at_its_time() {
        let mut gesture = tap(None);
        gesture.moves.push(ScheduledMove {
            at: 450,
            position: Vec2::new(150.0, 50.0),
        });
        gesture.exit_at = Some(2_000);

        let records = replay(&gesture, RippleConfig::default(), 100).unwrap();
        let before = records.iter().find(|r| r.t == 400).unwrap();
        let after = records.iter().find(|r| r.t == 1_000).unwrap();

        assert_eq!(before.frame.unwrap().center().x, 50.0);
        assert!(after.frame.unwrap().center().x > 100.0);
    }

    #[test]
    fn test_format_text() {
        let record = FrameRecord {
            t: 0,
            phase: RipplePhase::Entering,
            active: true,
            frame: Some(RippleFrame::Fill {
                center: Vec2::new(50.0, 50.0),
                radius: 40.0,
                alpha: 255,
            }),
        };
        let line = format_text(&record);
        assert!(line.contains("Entering"));
        assert!(line.contains("fill"));
        assert!(line.contains("r=  40.00"));
        assert!(line.ends_with("a=255"));
    }
}
