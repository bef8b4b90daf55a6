//! Span and event macros behind the `tracing` feature.
//!
//! Kernels open one `info` span per call, named after the operation, and
//! emit events for tap counts and chunking. Without the feature the span is
//! a `NoopSpan` and events only evaluate their field expressions.

/// Opens an `info` span named after a filter or transform call.
///
/// With `tracing` off this yields a `NoopSpan`, so call sites can write
/// `let _span = trace_span!(..).entered();` under either configuration.
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

/// Span for a windowed filter call: element type, rank, primary length,
/// tap count and extend mode code.
macro_rules! kernel_span {
    ($name:expr, $t:ty, $array:expr, $filter:expr, $mode:expr) => {
        $crate::trace::trace_span!(
            $name,
            dtype = <$t as $crate::array::Element>::DTYPE.name(),
            ndim = $array.ndim(),
            len = $array.len(),
            taps = $filter.len(),
            mode = $mode.code()
        )
    };
}

/// Records an `info` event, such as the chosen rank or the parallel chunk
/// size, inside the current kernel span.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
    ($name:expr) => {
        tracing::info!(name: $name)
    };
}

// Field expressions are still evaluated so call sites stay warning-free.
#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
    ($name:expr) => {};
}

pub(crate) use kernel_span;
pub(crate) use trace_event;
pub(crate) use trace_span;

/// Stand-in span guard when tracing is compiled out.
///
/// Holding it has no effect; it only keeps the `entered()` call shape of
/// `tracing::Span`.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Returns the same guard.
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
