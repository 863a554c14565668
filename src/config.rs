//! Runtime configuration for a [`crate::sequencer::Sequencer`].

use serde::Deserialize;
use serde::Serialize;

/// Runtime config for a sequencer instance.
///
/// Like `async-raft`'s `Config`, this is typically constructed once and
/// threaded through as an `Arc<Config>` alongside the session state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// When `true`, misuse that `spec.md` leaves undefined at the contract
    /// level (a response for an unknown or already-delivered sequence, a
    /// causal-gap event) is surfaced to the caller as a [`crate::SequencerError`]
    /// in addition to being dropped and logged. When `false` (the default),
    /// the item is dropped silently, matching the baseline contract exactly.
    #[serde(default)]
    pub strict: bool,

    /// A capacity hint for the initial allocation of the pending-responses
    /// map and pending-events queue. Purely an allocation-size hint; it does
    /// not bound how many items may be pending at once.
    #[serde(default = "Config::default_initial_capacity")]
    pub initial_capacity: usize,
}

impl Config {
    fn default_initial_capacity() -> usize {
        16
    }

    /// Build a [`ConfigBuilder`] for fluent construction.
    pub fn build() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { strict: false, initial_capacity: Self::default_initial_capacity() }
    }
}

/// Fluent builder for [`Config`].
#[derive(Default)]
pub struct ConfigBuilder {
    strict: bool,
    initial_capacity: Option<usize>,
}

impl ConfigBuilder {
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = Some(initial_capacity);
        self
    }

    pub fn validate(self) -> Config {
        Config {
            strict: self.strict,
            initial_capacity: self.initial_capacity.unwrap_or_else(Config::default_initial_capacity),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_config_is_lenient() {
        let config = Config::default();
        assert!(!config.strict);
        assert_eq!(config.initial_capacity, 16);
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = Config::build().strict(true).initial_capacity(64).validate();
        assert!(config.strict);
        assert_eq!(config.initial_capacity, 64);
    }

    #[test]
    fn deserializes_from_partial_json() {
        let config: Config = serde_json::from_str(r#"{"strict": true}"#).unwrap();
        assert!(config.strict);
        assert_eq!(config.initial_capacity, 16);
    }
}
