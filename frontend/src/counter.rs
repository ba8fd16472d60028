//! Count-up animation for the stats numbers.

use crate::surface::Surface;
use crate::timer::Scheduler;

/// ~60Hz.
pub const TICK_MS: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// Still counting, carries `floor(current)`.
    Partial(u64),
    /// Reached the target; nothing more to render after this.
    Final(u64),
}

#[derive(Debug, Clone)]
pub struct CounterState {
    current: f64,
    target: u64,
    increment: f64,
    ticks: u32,
}

impl CounterState {
    pub fn new(target: u64, duration_ms: u32) -> Self {
        let steps = f64::from(duration_ms.max(1)) / f64::from(TICK_MS);
        Self {
            current: 0.0,
            target,
            increment: target as f64 / steps,
            ticks: 0,
        }
    }

    pub fn tick(&mut self) -> Frame {
        self.ticks += 1;
        self.current += self.increment;
        if self.current < self.target as f64 {
            // floor can't reach target here, current is strictly below it
            Frame::Partial(self.current.floor() as u64)
        } else {
            Frame::Final(self.target)
        }
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn target(&self) -> u64 {
        self.target
    }
}

/// `1234567` -> `"1,234,567"`, what `toLocaleString()` gives for en-US.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterStyle {
    pub suffix: String,
    pub suffix_on_partial: bool,
    /// Thousands separators on every frame.
    pub grouped: bool,
}

impl Default for CounterStyle {
    fn default() -> Self {
        Self {
            suffix: "+".to_string(),
            suffix_on_partial: false,
            grouped: true,
        }
    }
}

impl CounterStyle {
    /// Plain digits with the suffix on every frame, as the section counters show them.
    pub fn with_partial_suffix() -> Self {
        Self {
            suffix_on_partial: true,
            grouped: false,
            ..Self::default()
        }
    }

    fn digits(&self, v: u64) -> String {
        if self.grouped {
            group_thousands(v)
        } else {
            v.to_string()
        }
    }

    pub fn render(&self, frame: Frame) -> String {
        match frame {
            Frame::Partial(v) if self.suffix_on_partial => format!("{}{}", self.digits(v), self.suffix),
            Frame::Partial(v) => self.digits(v),
            Frame::Final(v) => format!("{}{}", self.digits(v), self.suffix),
        }
    }
}

/// Count `surface`'s text up from 0 to `target` over roughly `duration_ms`.
pub fn animate<S, T>(scheduler: S, surface: T, target: u64, duration_ms: u32, style: CounterStyle)
where
    S: Scheduler,
    T: Surface + 'static,
{
    schedule_tick(scheduler, surface, CounterState::new(target, duration_ms), style);
}

fn schedule_tick<S, T>(scheduler: S, surface: T, mut state: CounterState, style: CounterStyle)
where
    S: Scheduler,
    T: Surface + 'static,
{
    let next = scheduler.clone();
    scheduler.spawn(
        TICK_MS,
        Box::new(move || {
            let frame = state.tick();
            surface.set_text(&style.render(frame));
            if let Frame::Partial(_) = frame {
                schedule_tick(next, surface, state, style);
            } else {
                log::debug!("counter reached {} after {} ticks", state.target(), state.ticks());
            }
        }),
    );
}
