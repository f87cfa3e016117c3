use crate::pulser::ConfigError;
use crate::pulser::step::PulseStep;

/// Ordered composition of [`PulseStep`]s realizing a multi-segment pulse
/// pattern from a single start condition.
///
/// Step *i*'s output level feeds step *i+1*'s input, step *i*'s completion
/// signal feeds step *i+1*'s `prev`. The first step sees the chain's
/// external `start_level`/`start_pulse`, every step shares the external
/// `enable`, and the last step's output is the chain's result.
pub struct PulseChain {
    steps: Vec<PulseStep>,
}

impl PulseChain {
    pub fn new(durations: &[u64]) -> Result<PulseChain, ConfigError> {
        if durations.is_empty() {
            return Err(ConfigError::EmptySequence);
        }
        let steps = durations
            .iter()
            .map(|&d| PulseStep::new(d))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PulseChain { steps })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of all segment durations in ticks.
    pub fn total_duration(&self) -> u64 {
        self.steps.iter().map(|s| s.duration()).sum()
    }

    /// Advances every step by one tick and returns the chain output for
    /// the current tick.
    ///
    /// Each step's completion flag is latched before that step commits, so
    /// the following step observes this tick's value, never the
    /// already-updated one.
    pub fn tick(&mut self, enable: bool, start_level: bool, start_pulse: bool) -> bool {
        let mut prev = start_pulse;
        let mut level = start_level;
        for step in &mut self.steps {
            let completed = step.completed();
            let out = step.output_level(enable, level);
            step.commit(prev);
            prev = completed;
            level = out;
        }
        level
    }

    pub fn reset(&mut self) {
        for step in &mut self.steps {
            step.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Run `ticks` cycles with enable/start_pulse tied together and the
    /// start level low, collecting the chain output per tick.
    fn run(chain: &mut PulseChain, enable: bool, ticks: usize) -> Vec<bool> {
        (0..ticks).map(|_| chain.tick(enable, false, enable)).collect()
    }

    fn toggle_ticks(out: &[bool], start_level: bool) -> Vec<usize> {
        let mut last = start_level;
        let mut toggles = Vec::new();
        for (i, &level) in out.iter().enumerate() {
            if level != last {
                toggles.push(i);
                last = level;
            }
        }
        toggles
    }

    #[test]
    fn rejects_empty_sequence() {
        assert!(matches!(
            PulseChain::new(&[]),
            Err(ConfigError::EmptySequence)
        ));
    }

    #[test]
    fn rejects_zero_duration_segment() {
        assert!(matches!(
            PulseChain::new(&[1, 0, 5]),
            Err(ConfigError::ZeroDuration)
        ));
    }

    #[test]
    fn total_duration_is_segment_sum() {
        let chain = PulseChain::new(&[1, 3, 5]).unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.total_duration(), 9);
    }

    #[test]
    fn segment_boundaries_follow_running_sum() {
        let mut chain = PulseChain::new(&[1, 3, 5]).unwrap();
        let out = run(&mut chain, true, 12);

        // boundaries at 1, 1+3, 1+3+5
        assert_eq!(toggle_ticks(&out, false), vec![1, 4, 9]);

        // each segment holds its level for exactly its duration
        let expected = [
            false, // tick 0: initial delay still counting
            true, true, true, // 3-tick segment
            false, false, false, false, false, // 5-tick segment
            true, true, true, // final level held while enabled
        ];
        assert_eq!(out, expected);
    }

    #[test]
    fn final_level_holds_while_enabled() {
        let mut chain = PulseChain::new(&[2, 2]).unwrap();
        let out = run(&mut chain, true, 20);
        assert!(out[4..].iter().all(|&level| !level));
    }

    #[test]
    fn start_level_inverts_pattern() {
        let mut low = PulseChain::new(&[1, 3]).unwrap();
        let mut high = PulseChain::new(&[1, 3]).unwrap();
        for _ in 0..8 {
            let a = low.tick(true, false, true);
            let b = high.tick(true, true, true);
            assert_ne!(a, b);
        }
    }

    #[test]
    fn deassertion_restarts_from_first_segment() {
        let mut chain = PulseChain::new(&[1, 3, 5]).unwrap();

        // interrupt partway into the second segment
        run(&mut chain, true, 3);
        // long enough for the reset to ripple down the whole chain
        run(&mut chain, false, 5);

        let out = run(&mut chain, true, 12);
        assert_eq!(toggle_ticks(&out, false), vec![1, 4, 9]);
    }

    #[test]
    fn output_drops_to_start_level_immediately_on_disable() {
        let mut chain = PulseChain::new(&[1, 4]).unwrap();
        let out = run(&mut chain, true, 3);
        assert_eq!(out, vec![false, true, true]);

        // enable low forces the combinational output back to start level
        assert_eq!(chain.tick(false, false, false), false);
    }

    #[test]
    fn explicit_reset_matches_fresh_chain() {
        let mut interrupted = PulseChain::new(&[2, 2]).unwrap();
        run(&mut interrupted, true, 3);
        interrupted.reset();

        let mut fresh = PulseChain::new(&[2, 2]).unwrap();
        assert_eq!(run(&mut interrupted, true, 8), run(&mut fresh, true, 8));
    }
}
