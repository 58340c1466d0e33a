//! # Clock 模块
//!
//! 动画时钟。效果本身从不直接读取系统时间，而是从注入的时钟采样，
//! 这样同一时刻重复渲染得到相同结果，测试也可以精确控制时间。

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// 毫秒时间戳
pub type Millis = i64;

/// 单调毫秒时钟
pub trait AnimationClock {
    /// 当前动画时间（毫秒，单调不减）
    fn now_millis(&self) -> Millis;
}

impl<C: AnimationClock + ?Sized> AnimationClock for &C {
    fn now_millis(&self) -> Millis {
        (**self).now_millis()
    }
}

impl<C: AnimationClock + ?Sized> AnimationClock for Rc<C> {
    fn now_millis(&self) -> Millis {
        (**self).now_millis()
    }
}

/// 系统单调时钟，以创建时刻为零点
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationClock for SystemClock {
    fn now_millis(&self) -> Millis {
        Millis::try_from(self.origin.elapsed().as_millis()).unwrap_or(Millis::MAX)
    }
}

/// 手动推进的时钟
///
/// 克隆出的句柄共享同一个时间值。
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Millis>>,
}

impl ManualClock {
    /// 创建从 `start` 开始的时钟
    pub fn new(start: Millis) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// 设置当前时间
    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }

    /// 向前推进 `delta` 毫秒
    pub fn advance(&self, delta: Millis) {
        self.now.set(self.now.get() + delta);
    }
}

impl AnimationClock for ManualClock {
    fn now_millis(&self) -> Millis {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_handles() {
        let clock = ManualClock::new(10);
        let handle = clock.clone();

        handle.advance(5);
        assert_eq!(clock.now_millis(), 15);

        clock.set(100);
        assert_eq!(handle.now_millis(), 100);
    }

    #[test]
    fn test_clock_by_reference() {
        let clock = ManualClock::new(42);
        let by_ref: &ManualClock = &clock;
        assert_eq!(by_ref.now_millis(), 42);
    }

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_millis();
        let b = clock.now_millis();
        assert!(a >= 0);
        assert!(b >= a);
    }
}
