use crate::pulser::ConfigError;

/// Trigger qualification policy, selected at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    /// Fire once a balanced streak of high samples satisfies the
    /// threshold: a straight run of highs fires, and isolated low samples
    /// are tolerated as long as highs outnumber lows by the required
    /// margin (e.g. `110111011` still satisfies a threshold of 5).
    ThresholdHoldoff,
    /// Fire on a low-to-high transition of the raw line.
    RisingEdge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Armed,
    Holdoff,
}

/// Converts a possibly noisy raw line into a single clean qualified pulse
/// followed by a dead time during which the input is ignored.
///
/// While armed, a bounded `credit` counter drains toward a -1 sentinel on
/// high samples and recovers on low ones, never rising above its initial
/// value. Firing enters the holdoff mode, where a second bounded counter
/// holds the qualified output high for exactly `holdoff` ticks; exactly one
/// of the two counters is active at any time.
pub struct Trigger {
    kind: TriggerKind,
    threshold: u64,
    holdoff: u64,
    mode: Mode,
    credit: i64,
    holdoff_remaining: i64,
    last_raw: bool,
}

impl Trigger {
    pub fn threshold_holdoff(threshold: u64, holdoff: u64) -> Result<Trigger, ConfigError> {
        if threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        Self::with_kind(TriggerKind::ThresholdHoldoff, threshold, holdoff)
    }

    pub fn rising_edge(holdoff: u64) -> Result<Trigger, ConfigError> {
        Self::with_kind(TriggerKind::RisingEdge, 1, holdoff)
    }

    fn with_kind(kind: TriggerKind, threshold: u64, holdoff: u64) -> Result<Trigger, ConfigError> {
        if holdoff == 0 {
            return Err(ConfigError::ZeroHoldoff);
        }
        Ok(Trigger {
            kind,
            threshold,
            holdoff,
            mode: Mode::Armed,
            credit: threshold as i64 - 2,
            holdoff_remaining: holdoff as i64 - 2,
            last_raw: false,
        })
    }

    fn fires(&self, raw: bool) -> bool {
        match self.kind {
            TriggerKind::ThresholdHoldoff => raw && self.credit < 0,
            TriggerKind::RisingEdge => raw && !self.last_raw,
        }
    }

    /// Qualified output for the current tick. Pure function of current
    /// state and the current raw sample; [`Trigger::clock`] commits the
    /// matching transition.
    pub fn output(&self, raw: bool) -> bool {
        match self.mode {
            Mode::Armed => self.fires(raw),
            Mode::Holdoff => self.holdoff_remaining >= 0,
        }
    }

    /// Commits this tick's state transition. Call exactly once per tick,
    /// after [`Trigger::output`] has been read for the same sample.
    pub fn clock(&mut self, raw: bool) {
        match self.mode {
            Mode::Armed => {
                if self.fires(raw) {
                    self.mode = Mode::Holdoff;
                    self.holdoff_remaining = self.holdoff as i64 - 2;
                } else if self.kind == TriggerKind::ThresholdHoldoff {
                    if raw {
                        self.credit -= 1;
                    } else if self.credit < self.threshold as i64 - 2 {
                        self.credit += 1;
                    }
                }
            }
            Mode::Holdoff => {
                if self.holdoff_remaining < 0 {
                    self.mode = Mode::Armed;
                    self.credit = self.threshold as i64 - 2;
                } else {
                    self.holdoff_remaining -= 1;
                }
            }
        }
        self.last_raw = raw;
    }

    pub fn kind(&self) -> TriggerKind {
        self.kind
    }

    pub fn holdoff(&self) -> u64 {
        self.holdoff
    }

    pub fn reset(&mut self) {
        self.mode = Mode::Armed;
        self.credit = self.threshold as i64 - 2;
        self.holdoff_remaining = self.holdoff as i64 - 2;
        self.last_raw = false;
    }
}
