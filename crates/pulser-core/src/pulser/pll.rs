use log::warn;
use thiserror::Error;

// SB_PLL40_CORE operating ranges, per the iCE40 datasheet (and icepll).
const PFD_MHZ_MIN: f64 = 10.0;
const PFD_MHZ_MAX: f64 = 133.0;
const VCO_MHZ_MIN: f64 = 533.0;
const VCO_MHZ_MAX: f64 = 1066.0;

/// Supported reference clock range in MHz.
pub const INPUT_MHZ_RANGE: std::ops::RangeInclusive<u64> = 10..=13;
/// Supported synthesized output range in MHz.
pub const OUTPUT_MHZ_RANGE: std::ops::RangeInclusive<u64> = 16..=275;

#[derive(Debug, Error)]
pub enum PllError {
    #[error("input frequency {0} MHz outside supported range 10-13 MHz")]
    InputFrequencyRange(u64),

    #[error("output frequency {0} MHz outside supported range 16-275 MHz")]
    OutputFrequencyRange(u64),

    #[error("no divider coefficients reach {0} MHz")]
    NoSolution(u64),
}

/// Divider coefficients for an iCE40 `SB_PLL40_CORE` frequency synthesizer.
///
/// `fout_mhz` is the frequency the coefficients actually produce, which may
/// differ slightly from the requested one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PllCoefficients {
    pub divr: u8,
    pub divf: u8,
    pub divq: u8,
    pub fout_mhz: f64,
}

impl PllCoefficients {
    /// Searches the divider space for the closest achievable output
    /// frequency. Both frequencies are in MHz.
    pub fn search(freq_in: u64, freq_out: u64) -> Result<PllCoefficients, PllError> {
        if !INPUT_MHZ_RANGE.contains(&freq_in) {
            return Err(PllError::InputFrequencyRange(freq_in));
        }
        if !OUTPUT_MHZ_RANGE.contains(&freq_out) {
            return Err(PllError::OutputFrequencyRange(freq_out));
        }

        let requested = freq_out as f64;
        let mut best: Option<PllCoefficients> = None;
        for divr in 0..16u8 {
            let pfd = freq_in as f64 / f64::from(divr + 1);
            if !(PFD_MHZ_MIN..=PFD_MHZ_MAX).contains(&pfd) {
                continue;
            }
            for divf in 0..128u8 {
                let vco = pfd * f64::from(divf as u16 + 1);
                if !(VCO_MHZ_MIN..=VCO_MHZ_MAX).contains(&vco) {
                    continue;
                }
                for divq in 1..7u8 {
                    let fout = vco / f64::from(1u16 << divq);
                    let better = match best {
                        Some(b) => (fout - requested).abs() < (b.fout_mhz - requested).abs(),
                        None => true,
                    };
                    if better {
                        best = Some(PllCoefficients {
                            divr,
                            divf,
                            divq,
                            fout_mhz: fout,
                        });
                    }
                }
            }
        }

        let best = best.ok_or(PllError::NoSolution(freq_out))?;
        if best.fout_mhz != requested {
            warn!(
                "pll: requested {} MHz, best fit {} MHz (divr={} divf={} divq={})",
                freq_out, best.fout_mhz, best.divr, best.divf, best.divq
            );
        }
        Ok(best)
    }

    /// Tick period of the synthesized clock in nanoseconds.
    pub fn period_ns(&self) -> f64 {
        1.0e3 / self.fout_mhz
    }
}
