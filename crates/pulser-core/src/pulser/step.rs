use crate::pulser::ConfigError;

/// Chainable pulse step primitive.
///
/// Holds the upstream level for `duration` ticks once the upstream `prev`
/// line asserts, then flips it and keeps signalling completion downstream
/// for as long as `prev` stays asserted. Counting down to a -1 sentinel
/// means completion is a single sign check on the counter.
pub struct PulseStep {
    duration: u64,
    remaining: i64,
}

impl PulseStep {
    pub fn new(duration: u64) -> Result<PulseStep, ConfigError> {
        if duration == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(PulseStep {
            duration,
            remaining: duration as i64 - 1,
        })
    }

    /// True once the countdown has elapsed. Reads current state only.
    pub fn completed(&self) -> bool {
        self.remaining < 0
    }

    /// Completion signal wired to the following step's `prev` input.
    pub fn next(&self) -> bool {
        self.completed()
    }

    /// Output level for the current tick. `enable` gates the flip without
    /// touching the countdown.
    pub fn output_level(&self, enable: bool, input_level: bool) -> bool {
        input_level ^ (enable && self.completed())
    }

    /// Commits this tick's state transition. Call exactly once per tick,
    /// after every output derived from this step has been read.
    pub fn commit(&mut self, prev: bool) {
        if prev {
            // count down to the sentinel, then latch there until prev drops
            if self.remaining >= 0 {
                self.remaining -= 1;
            }
        } else {
            self.remaining = self.duration as i64 - 1;
        }
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn reset(&mut self) {
        self.remaining = self.duration as i64 - 1;
    }
}
