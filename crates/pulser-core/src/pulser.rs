use thiserror::Error;

pub mod chain;
pub mod pll;
pub mod step;
pub mod tracer;
pub mod trigger;

use crate::trace_frame;
use chain::PulseChain;
use trigger::{Trigger, TriggerKind};

/// Extra holdoff ticks beyond the total sequence length, as measured on
/// the original hardware configuration. See [`PulserConfig::holdoff_margin`].
pub const DEFAULT_HOLDOFF_MARGIN: u64 = 12;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("segment duration must be at least 1 tick")]
    ZeroDuration,

    #[error("pulse sequence is empty")]
    EmptySequence,

    #[error("pulse sequence needs an even number of segments, got {0}")]
    OddSequence(usize),

    #[error("pulse sequence needs at least 2 segments, got {0}")]
    SequenceTooShort(usize),

    #[error("trigger threshold must be at least 1 tick")]
    ZeroThreshold,

    #[error("trigger holdoff must be at least 1 tick")]
    ZeroHoldoff,

    #[error("holdoff of {holdoff} ticks does not cover the {total}-tick sequence")]
    HoldoffTooShort { holdoff: u64, total: u64 },
}

/// Construction-time parameters for a [`Pulser`].
///
/// The qualified trigger must outlast the whole pulse sequence, so the
/// gate's holdoff is derived as `sum(durations) + holdoff_margin` rather
/// than configured directly.
#[derive(Debug, Clone)]
pub struct PulserConfig {
    /// Tick counts before each output toggle, in order. The count must be
    /// even and at least 2 so the output always returns to its start level.
    pub durations: Vec<u64>,
    /// Consecutive high-sample credit required to qualify a trigger.
    pub threshold: u64,
    /// Extra holdoff ticks beyond the total sequence length.
    pub holdoff_margin: u64,
    /// Idle level of the output line.
    pub start_level: bool,
    /// Trigger qualification policy.
    pub trigger_kind: TriggerKind,
}

impl PulserConfig {
    pub fn new(durations: Vec<u64>) -> PulserConfig {
        PulserConfig {
            durations,
            threshold: 1,
            holdoff_margin: DEFAULT_HOLDOFF_MARGIN,
            start_level: false,
            trigger_kind: TriggerKind::ThresholdHoldoff,
        }
    }

    pub fn total_duration(&self) -> u64 {
        self.durations.iter().sum()
    }

    pub fn holdoff(&self) -> u64 {
        self.total_duration() + self.holdoff_margin
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.durations.is_empty() {
            return Err(ConfigError::EmptySequence);
        }
        if self.durations.len() < 2 {
            return Err(ConfigError::SequenceTooShort(self.durations.len()));
        }
        if self.durations.len() % 2 != 0 {
            return Err(ConfigError::OddSequence(self.durations.len()));
        }
        let total = self.total_duration();
        let holdoff = self.holdoff();
        if holdoff <= total {
            return Err(ConfigError::HoldoffTooShort { holdoff, total });
        }
        Ok(())
    }
}

/// Programmable pulse-sequence generator.
///
/// A [`Trigger`] qualifies the raw input line; its output fans out to the
/// [`PulseChain`]'s start and enable inputs, and the chain's last segment
/// drives the output line. Composition only: all state lives in the gate
/// and the chain.
pub struct Pulser {
    trigger: Trigger,
    chain: PulseChain,
    start_level: bool,
    master_clock: u64,
}

impl Pulser {
    pub fn new(config: &PulserConfig) -> Result<Pulser, ConfigError> {
        config.validate()?;
        let chain = PulseChain::new(&config.durations)?;
        let trigger = match config.trigger_kind {
            TriggerKind::ThresholdHoldoff => {
                Trigger::threshold_holdoff(config.threshold, config.holdoff())?
            }
            TriggerKind::RisingEdge => Trigger::rising_edge(config.holdoff())?,
        };
        Ok(Pulser {
            trigger,
            chain,
            start_level: config.start_level,
            master_clock: 0,
        })
    }

    /// Ticks the generator once
    ///
    /// Samples the raw trigger line, propagates the qualified trigger
    /// through the pulse chain and commits every state transition.
    ///
    /// # Returns
    ///
    /// Returns a `(bool, bool)` tuple
    /// - First value is the output line level for the current tick
    /// - Second value is `true` while the qualified trigger (and its
    ///   holdoff window) is active
    pub fn tick(&mut self, trig_in: bool) -> (bool, bool) {
        let trigger = self.trigger.output(trig_in);
        let out = self.chain.tick(trigger, self.start_level, trigger);
        self.trigger.clock(trig_in);

        trace_frame!(self.master_clock, trig_in, trigger, out);
        self.master_clock += 1;
        (out, trigger)
    }

    /// Ticks elapsed since construction or the last [`Pulser::reset`].
    pub fn master_clock(&self) -> u64 {
        self.master_clock
    }

    /// Holdoff period of the trigger gate in ticks.
    pub fn holdoff(&self) -> u64 {
        self.trigger.holdoff()
    }

    /// Restores every counter to its construction value.
    pub fn reset(&mut self) {
        self.trigger.reset();
        self.chain.reset();
        self.master_clock = 0;
    }
}
