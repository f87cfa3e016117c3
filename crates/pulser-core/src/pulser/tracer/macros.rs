#[cfg(feature = "tracing")]
#[inline(always)]
pub(crate) fn __trace_record(tick: u64, frame: crate::pulser::tracer::SignalFrame) {
    let mut tracer = crate::pulser::tracer::TRACER.lock().unwrap();
    tracer.record(tick, frame);
}

#[macro_export]
macro_rules! trace_frame {
    ($tick:expr, $trig_in:expr, $trigger:expr, $out:expr) => {
        #[cfg(feature = "tracing")]
        {
            $crate::pulser::tracer::macros::__trace_record(
                $tick,
                $crate::pulser::tracer::SignalFrame::capture($trig_in, $trigger, $out),
            );
        }
    };
}

#[macro_export]
macro_rules! trace_dump {
    () => {
        #[cfg(feature = "tracing")]
        {
            $crate::pulser::tracer::TRACER.lock().unwrap().print();
        }
    };
}
