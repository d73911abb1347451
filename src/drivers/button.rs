//! Debounced push-button input.
//!
//! The physical switch is active-low behind a pull-up: the line idles
//! HIGH and a press pulls it LOW. Mechanical contacts chatter for a few
//! milliseconds around each actuation, so raw levels are filtered through
//! a time-window debounce: a new level must hold continuously for the
//! configured window before it becomes the stable level. Only the
//! HIGH→LOW stable transition counts as a press.
//!
//! This is a pure state machine over `(raw_level, now_ms)` — the caller
//! samples the GPIO and owns the clock, so the whole thing runs under
//! test without hardware.

/// A confirmed, debounced input transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEvent {
    /// Stable HIGH→LOW transition: the operator pressed the button.
    Pressed,
}

/// Time-window debouncer for a single active-low input.
pub struct DebouncedButton {
    /// Last raw sample (true = HIGH = released).
    raw_level: bool,
    /// Last committed stable level.
    stable_level: bool,
    /// When the raw level last changed (ms).
    last_change_ms: u32,
    /// How long a new level must hold before it is committed (ms).
    window_ms: u32,
}

impl DebouncedButton {
    /// Both raw and stable start HIGH (released) so a press held across
    /// boot still produces exactly one edge once the window elapses.
    pub fn new(window_ms: u32) -> Self {
        Self {
            raw_level: true,
            stable_level: true,
            last_change_ms: 0,
            window_ms,
        }
    }

    /// Feed one raw sample. Returns a confirmed press edge, if any.
    ///
    /// A raw flip restarts the window; the level commits only after it
    /// has held for `window_ms` straight. Releases are committed too
    /// (so the next press can fire) but never produce an event.
    pub fn poll(&mut self, raw_level: bool, now_ms: u32) -> Option<EdgeEvent> {
        if raw_level != self.raw_level {
            self.raw_level = raw_level;
            self.last_change_ms = now_ms;
            return None;
        }

        if self.raw_level == self.stable_level {
            return None;
        }

        if now_ms.wrapping_sub(self.last_change_ms) >= self.window_ms {
            self.stable_level = self.raw_level;
            if !self.stable_level {
                return Some(EdgeEvent::Pressed);
            }
        }
        None
    }

    /// Last committed stable level (true = released).
    pub fn stable_level(&self) -> bool {
        self.stable_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: u32 = 50;

    #[test]
    fn clean_press_fires_after_window() {
        let mut b = DebouncedButton::new(WINDOW);
        assert_eq!(b.poll(false, 100), None); // flip recorded
        assert_eq!(b.poll(false, 120), None); // 20 ms held
        assert_eq!(b.poll(false, 149), None); // 49 ms held
        assert_eq!(b.poll(false, 150), Some(EdgeEvent::Pressed));
        // Held beyond the window: no repeat.
        assert_eq!(b.poll(false, 200), None);
        assert_eq!(b.poll(false, 1000), None);
    }

    #[test]
    fn chatter_shorter_than_window_is_absorbed() {
        let mut b = DebouncedButton::new(WINDOW);
        // Bounce train: LOW/HIGH flips every few ms.
        assert_eq!(b.poll(false, 100), None);
        assert_eq!(b.poll(true, 105), None);
        assert_eq!(b.poll(false, 112), None);
        assert_eq!(b.poll(true, 118), None);
        // Settles back HIGH: never a press.
        assert_eq!(b.poll(true, 200), None);
        assert!(b.stable_level());
    }

    #[test]
    fn bounce_then_settle_low_fires_once() {
        let mut b = DebouncedButton::new(WINDOW);
        assert_eq!(b.poll(false, 100), None);
        assert_eq!(b.poll(true, 104), None);
        assert_eq!(b.poll(false, 109), None); // window restarts here
        assert_eq!(b.poll(false, 158), None); // 49 ms
        assert_eq!(b.poll(false, 159), Some(EdgeEvent::Pressed));
    }

    #[test]
    fn release_commits_silently() {
        let mut b = DebouncedButton::new(WINDOW);
        b.poll(false, 0);
        assert_eq!(b.poll(false, 50), Some(EdgeEvent::Pressed));
        // Release: stable commits after the window, no event.
        assert_eq!(b.poll(true, 300), None);
        assert_eq!(b.poll(true, 350), None);
        assert!(b.stable_level());
        // Second press now fires again.
        b.poll(false, 400);
        assert_eq!(b.poll(false, 450), Some(EdgeEvent::Pressed));
    }

    #[test]
    fn survives_clock_wraparound() {
        let mut b = DebouncedButton::new(WINDOW);
        let near_max = u32::MAX - 20;
        assert_eq!(b.poll(false, near_max), None);
        assert_eq!(b.poll(false, near_max.wrapping_add(49)), None);
        assert_eq!(
            b.poll(false, near_max.wrapping_add(50)),
            Some(EdgeEvent::Pressed)
        );
    }
}
