//! Rest timer - countdown state machine plus its background tick source
//!
//! The state machine is clock-free: it only changes on explicit calls
//! (`tick`, `start_pause`, presets, editing), so tests drive it with a fake
//! clock. Real time comes from [`Ticker`], a dedicated tokio task that sends
//! one generation-stamped tick per second over a channel. The task lives
//! outside the UI event loop, so a busy or blocked redraw cannot stall the
//! countdown.

use std::sync::mpsc::Sender;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Quick-select base durations, in seconds.
pub const PRESETS: [u32; 3] = [60, 90, 120];

pub const DEFAULT_BASE_SECS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Expired,
    Editing,
}

/// What a delivered tick did to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer was not running; nothing happened.
    Ignored,
    /// One second elapsed.
    Counted,
    /// The countdown just hit zero. Fired at most once per run.
    Expired,
}

/// Per-day rest countdown.
pub struct RestTimer {
    remaining: u32,
    base: u32,
    state: TimerState,
    resume_after_edit: bool,
    edit_buffer: String,
}

impl Default for RestTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl RestTimer {
    pub fn new() -> Self {
        Self {
            remaining: DEFAULT_BASE_SECS,
            base: DEFAULT_BASE_SECS,
            state: TimerState::Idle,
            resume_after_edit: false,
            edit_buffer: String::new(),
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn edit_buffer(&self) -> &str {
        &self.edit_buffer
    }

    /// mm:ss display string.
    pub fn display(&self) -> String {
        format!("{}:{:02}", self.remaining / 60, self.remaining % 60)
    }

    /// Start, resume or pause. Starting from `Expired` reloads the base
    /// duration first.
    pub fn start_pause(&mut self) {
        match self.state {
            TimerState::Running => self.state = TimerState::Idle,
            TimerState::Idle | TimerState::Expired => {
                if self.remaining == 0 {
                    self.remaining = self.base;
                }
                self.state = TimerState::Running;
            }
            TimerState::Editing => {}
        }
    }

    /// Back to the base duration, paused.
    pub fn reset(&mut self) {
        if self.state == TimerState::Editing {
            return;
        }
        self.remaining = self.base;
        self.state = TimerState::Idle;
    }

    /// Select a preset: new base, remaining reloaded, forced to `Idle`
    /// (aborts an in-progress edit as well).
    pub fn preset(&mut self, secs: u32) {
        self.base = secs;
        self.remaining = secs;
        self.state = TimerState::Idle;
        self.edit_buffer.clear();
    }

    /// Enter duration editing; a running countdown is force-paused and
    /// remembered so commit/cancel can restore it.
    pub fn begin_edit(&mut self) {
        if self.state == TimerState::Editing {
            return;
        }
        self.resume_after_edit = self.state == TimerState::Running;
        self.state = TimerState::Editing;
        self.edit_buffer = self.remaining.to_string();
    }

    pub fn edit_push(&mut self, c: char) {
        if self.state == TimerState::Editing && c.is_ascii_digit() {
            self.edit_buffer.push(c);
        }
    }

    pub fn edit_backspace(&mut self) {
        if self.state == TimerState::Editing {
            self.edit_buffer.pop();
        }
    }

    /// Apply the edited duration. A valid positive integer updates both base
    /// and remaining; anything else leaves them untouched. Either way the
    /// timer returns to its pre-edit state.
    pub fn commit_edit(&mut self) {
        if self.state != TimerState::Editing {
            return;
        }
        if let Ok(secs) = self.edit_buffer.parse::<u32>()
            && secs > 0
        {
            self.base = secs;
            self.remaining = secs;
        }
        self.exit_edit();
    }

    pub fn cancel_edit(&mut self) {
        if self.state != TimerState::Editing {
            return;
        }
        self.exit_edit();
    }

    fn exit_edit(&mut self) {
        self.edit_buffer.clear();
        self.state = if self.resume_after_edit && self.remaining > 0 {
            TimerState::Running
        } else {
            TimerState::Idle
        };
        self.resume_after_edit = false;
    }

    /// Advance one second. Only counts while `Running`; the transition to
    /// `Expired` is reported exactly once.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != TimerState::Running {
            return TickOutcome::Ignored;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = TimerState::Expired;
            TickOutcome::Expired
        } else {
            TickOutcome::Counted
        }
    }
}

/// One second elapsed on the background clock. The generation stamp ties the
/// tick to the `start` call that produced it, so ticks from a superseded
/// task are discarded instead of double-counting a second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
}

/// Background one-second clock, isolated from the UI loop in its own tokio
/// task. `start` aborts any previous task before spawning, `stop` is
/// idempotent; consumers must drop ticks whose generation is stale.
pub struct Ticker {
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticker {
    pub fn new() -> Self {
        Self { handle: None, generation: 0 }
    }

    /// Begin ticking into `tx` once per second. Returns the generation that
    /// will stamp every tick of this run.
    pub fn start(&mut self, tx: Sender<Tick>) -> u64 {
        self.stop();
        self.generation += 1;
        let generation = self.generation;
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first interval tick completes immediately; skip it so the
            // first delivered tick lands a full second after start.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(Tick { generation }).is_err() {
                    break;
                }
            }
        }));
        generation
    }

    /// Abort the tick task. Safe to call repeatedly or when not running.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Generation of the most recent `start`; older stamps are stale.
    pub fn current_generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_and_expires_once() {
        let mut timer = RestTimer::new();
        timer.start_pause();
        assert!(timer.is_running());

        for _ in 0..59 {
            assert_eq!(timer.tick(), TickOutcome::Counted);
        }
        assert_eq!(timer.remaining(), 1);
        assert_eq!(timer.tick(), TickOutcome::Expired);
        assert_eq!(timer.state(), TimerState::Expired);
        assert_eq!(timer.remaining(), 0);

        // Idle ticks after expiry must not re-fire.
        assert_eq!(timer.tick(), TickOutcome::Ignored);
        assert_eq!(timer.tick(), TickOutcome::Ignored);
    }

    #[test]
    fn test_pause_resume_neither_skips_nor_duplicates() {
        let mut timer = RestTimer::new();
        timer.start_pause();
        for _ in 0..20 {
            timer.tick();
        }
        timer.start_pause(); // pause
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.tick(), TickOutcome::Ignored);
        assert_eq!(timer.remaining(), 40);

        timer.start_pause(); // resume
        for _ in 0..39 {
            assert_eq!(timer.tick(), TickOutcome::Counted);
        }
        // 20 ticks before the pause + 40 after = the full 60.
        assert_eq!(timer.tick(), TickOutcome::Expired);
    }

    #[test]
    fn test_start_after_expiry_reloads_base() {
        let mut timer = RestTimer::new();
        timer.preset(90);
        timer.start_pause();
        for _ in 0..90 {
            timer.tick();
        }
        assert_eq!(timer.state(), TimerState::Expired);

        timer.start_pause();
        assert!(timer.is_running());
        assert_eq!(timer.remaining(), 90);
    }

    #[test]
    fn test_preset_forces_idle_and_resets() {
        let mut timer = RestTimer::new();
        timer.start_pause();
        timer.tick();
        timer.preset(120);
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.base(), 120);
        assert_eq!(timer.remaining(), 120);
    }

    #[test]
    fn test_edit_commit_updates_base_and_restores_running() {
        let mut timer = RestTimer::new();
        timer.start_pause();
        timer.tick();
        timer.begin_edit();
        // Editing force-pauses the countdown.
        assert_eq!(timer.state(), TimerState::Editing);
        assert_eq!(timer.tick(), TickOutcome::Ignored);

        timer.edit_backspace();
        timer.edit_backspace();
        for c in "45".chars() {
            timer.edit_push(c);
        }
        timer.commit_edit();
        assert_eq!(timer.base(), 45);
        assert_eq!(timer.remaining(), 45);
        // It was running before the edit, so it resumes.
        assert!(timer.is_running());
    }

    #[test]
    fn test_edit_cancel_keeps_duration() {
        let mut timer = RestTimer::new();
        timer.begin_edit();
        for c in "999".chars() {
            timer.edit_push(c);
        }
        timer.cancel_edit();
        assert_eq!(timer.base(), DEFAULT_BASE_SECS);
        assert_eq!(timer.remaining(), DEFAULT_BASE_SECS);
        // Idle before the edit, idle after.
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn test_edit_invalid_input_acts_as_cancel() {
        let mut timer = RestTimer::new();
        timer.begin_edit();
        timer.edit_backspace();
        timer.edit_backspace();
        assert_eq!(timer.edit_buffer(), "");
        timer.commit_edit();
        assert_eq!(timer.base(), DEFAULT_BASE_SECS);
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn test_edit_rejects_non_digits() {
        let mut timer = RestTimer::new();
        timer.begin_edit();
        timer.edit_push('x');
        timer.edit_push('-');
        assert_eq!(timer.edit_buffer(), "60");
    }

    #[test]
    fn test_display_format() {
        let mut timer = RestTimer::new();
        timer.preset(90);
        assert_eq!(timer.display(), "1:30");
        timer.preset(60);
        assert_eq!(timer.display(), "1:00");
        timer.start_pause();
        timer.tick();
        assert_eq!(timer.display(), "0:59");
    }

    #[tokio::test]
    async fn test_ticker_restart_supersedes_generation() {
        let (tx, _rx) = std::sync::mpsc::channel();
        let mut ticker = Ticker::new();
        let g1 = ticker.start(tx.clone());
        let g2 = ticker.start(tx);
        assert!(g2 > g1);
        assert_eq!(ticker.current_generation(), g2);
        ticker.stop();
        ticker.stop();
        assert!(!ticker.is_running());
    }

    #[tokio::test]
    async fn test_ticker_delivers_stamped_ticks() {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut ticker = Ticker::new();
        let generation = ticker.start(tx);
        tokio::time::sleep(Duration::from_millis(2300)).await;
        ticker.stop();

        let ticks: Vec<Tick> = rx.try_iter().collect();
        assert!(ticks.len() >= 2, "expected at least 2 ticks, got {}", ticks.len());
        assert!(ticks.iter().all(|t| t.generation == generation));
    }
}
