use std::sync::atomic::{AtomicBool, Ordering};

/// Environment variable consulted by [`MetricsConfig::from_env`].
pub const DISABLED_ENV_VAR: &str = "METRICS_GAUGE_DISABLED";

static GLOBAL_DISABLED: AtomicBool = AtomicBool::new(false);

/// Configuration captured by gauge constructors.
///
/// The configuration is read once, when a gauge is constructed.  A gauge built while metrics are
/// disabled is a no-op gauge for its entire lifetime, and a gauge built while metrics are enabled
/// never checks the configuration again, so toggling it only affects gauges constructed afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetricsConfig {
    disabled: bool,
}

impl MetricsConfig {
    /// Creates a configuration with metrics enabled.
    pub const fn enabled() -> Self {
        Self { disabled: false }
    }

    /// Creates a configuration with metrics disabled.
    ///
    /// Every constructor given this configuration returns a no-op gauge.
    pub const fn disabled() -> Self {
        Self { disabled: true }
    }

    /// Sets whether or not metrics are disabled.
    ///
    /// Defaults to `false`.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Whether or not metrics are disabled.
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Creates a configuration from the environment.
    ///
    /// Metrics are disabled when [`DISABLED_ENV_VAR`] is set to `1`, `true`, `yes`, or `on`,
    /// ignoring case.  Any other value, or the variable being unset, leaves metrics enabled.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(DISABLED_ENV_VAR).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Self {
        let disabled = value
            .map(str::trim)
            .map(|v| {
                ["1", "true", "yes", "on"].iter().any(|candidate| v.eq_ignore_ascii_case(candidate))
            })
            .unwrap_or(false);

        Self { disabled }
    }

    /// Gets the process-level configuration.
    ///
    /// This is what the top-level convenience constructors, such as [`new_gauge`][crate::new_gauge],
    /// use when no configuration is passed explicitly.
    pub fn global() -> Self {
        Self { disabled: GLOBAL_DISABLED.load(Ordering::Acquire) }
    }
}

/// Sets the process-level configuration.
///
/// Gauges that already exist are unaffected.
pub fn set_global_config(config: MetricsConfig) {
    GLOBAL_DISABLED.store(config.disabled, Ordering::Release);
}

#[cfg(test)]
mod tests {
    use super::MetricsConfig;

    #[test]
    fn defaults_to_enabled() {
        assert!(!MetricsConfig::default().is_disabled());
        assert_eq!(MetricsConfig::default(), MetricsConfig::enabled());
        assert!(MetricsConfig::enabled().with_disabled(true).is_disabled());
    }

    #[test]
    fn parses_env_values() {
        let cases = [
            (None, false),
            (Some(""), false),
            (Some("0"), false),
            (Some("false"), false),
            (Some("disabled"), false),
            (Some("1"), true),
            (Some("true"), true),
            (Some("TRUE"), true),
            (Some(" yes "), true),
            (Some("On"), true),
        ];

        for (value, disabled) in cases {
            assert_eq!(
                MetricsConfig::from_env_value(value).is_disabled(),
                disabled,
                "unexpected result for {:?}",
                value
            );
        }
    }
}
