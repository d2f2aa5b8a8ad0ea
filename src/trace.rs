//! Optional instrumentation.
//!
//! With the `tracing` feature the macro forwards to `tracing::trace!`;
//! without it, the arguments are not evaluated.

macro_rules! chain_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            tracing::trace!($($arg)*);
        }
    };
}
