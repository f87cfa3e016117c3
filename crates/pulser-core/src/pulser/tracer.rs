use bitflags::bitflags;
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::sync::Mutex;

pub(crate) mod macros;

pub static TRACER: Lazy<Mutex<Tracer>> = Lazy::new(|| Mutex::new(Tracer::new(1_000_000)));

bitflags! {
    /// One captured sample of the generator's boundary signals.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SignalFrame: u8 {
        const TRIG_IN = 0b001;
        const TRIGGER = 0b010;
        const PULSE_OUT = 0b100;
    }
}

impl SignalFrame {
    pub fn capture(trig_in: bool, trigger: bool, pulse_out: bool) -> SignalFrame {
        let mut frame = SignalFrame::empty();
        frame.set(SignalFrame::TRIG_IN, trig_in);
        frame.set(SignalFrame::TRIGGER, trigger);
        frame.set(SignalFrame::PULSE_OUT, pulse_out);
        frame
    }

    fn bit(&self, flag: SignalFrame) -> u8 {
        self.contains(flag) as u8
    }
}

/// Global waveform capture buffer
pub struct Tracer {
    history: VecDeque<(u64, SignalFrame)>,
    capacity: usize,
}

impl Tracer {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, tick: u64, frame: SignalFrame) {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back((tick, frame));
    }

    pub fn print(&self) {
        for &(tick, frame) in self.history.iter() {
            println!(
                "{:>10}: trig_in={} trigger={} out={}",
                tick,
                frame.bit(SignalFrame::TRIG_IN),
                frame.bit(SignalFrame::TRIGGER),
                frame.bit(SignalFrame::PULSE_OUT),
            );
        }
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}
