//! Per-call options shared by the filter kernels.

use crate::boundary::ExtendMode;
use crate::util::{NdFilterError, NdFilterResult};

/// Boundary policy and execution strategy for one filter call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KernelConfig {
    /// How taps outside the primary array are treated.
    pub mode: ExtendMode,
    /// Runs the rayon driver; requires the `rayon` feature.
    pub parallel: bool,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            mode: ExtendMode::Nearest,
            parallel: false,
        }
    }
}

impl KernelConfig {
    /// Sequential configuration with the given boundary mode.
    pub fn with_mode(mode: ExtendMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Fails with `FeatureDisabled` when parallel execution is requested
    /// but the crate was built without rayon.
    pub fn validate(&self) -> NdFilterResult<()> {
        if self.parallel && !cfg!(feature = "rayon") {
            return Err(NdFilterError::FeatureDisabled { feature: "rayon" });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::KernelConfig;
    use crate::boundary::ExtendMode;

    #[test]
    fn default_is_sequential_nearest() {
        let cfg = KernelConfig::default();
        assert_eq!(cfg.mode, ExtendMode::Nearest);
        assert!(!cfg.parallel);
        assert!(cfg.validate().is_ok());
        assert_eq!(KernelConfig::with_mode(ExtendMode::Wrap).mode, ExtendMode::Wrap);
    }

    #[cfg(not(feature = "rayon"))]
    #[test]
    fn parallel_requires_rayon() {
        let cfg = KernelConfig {
            parallel: true,
            ..KernelConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(crate::util::NdFilterError::FeatureDisabled { feature: "rayon" })
        );
    }
}
