//! Strategy selection
//!
//! Precedence is fixed: an explicit accessor wins over a mapping key, which
//! wins over the declared name. The argument count only picks the arity of
//! the selected kind.

use super::strategy::ResolutionStrategy;
use crate::core::field::FieldConfig;

/// Picks exactly one [`ResolutionStrategy`] per field
pub struct StrategySelector;

impl StrategySelector {
    /// Select the strategy for `config`
    ///
    /// Total and deterministic: every config yields a strategy.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldwise::core::field::FieldConfig;
    /// use fieldwise::resolve::{StrategyKind, StrategySelector};
    ///
    /// let config = FieldConfig::new("title")
    ///     .with_accessor("display_title")
    ///     .with_mapping_key("title");
    ///
    /// assert_eq!(
    ///     StrategySelector::select(&config).kind(),
    ///     StrategyKind::AccessorInvoke
    /// );
    /// ```
    pub fn select(config: &FieldConfig) -> ResolutionStrategy {
        let with_arguments = config.takes_arguments();

        let strategy = if let Some(accessor) = config.explicit_accessor() {
            let accessor = accessor.to_string();
            if with_arguments {
                ResolutionStrategy::AccessorInvokeWithArguments { accessor }
            } else {
                ResolutionStrategy::AccessorInvoke { accessor }
            }
        } else if let Some(key) = config.mapping_key() {
            // Lookups never see the arguments, so both arities share a variant.
            ResolutionStrategy::KeyLookup { key: key.clone() }
        } else {
            let name = config.declared_name().clone();
            if with_arguments {
                ResolutionStrategy::NameInvokeWithArguments { name }
            } else {
                ResolutionStrategy::NameInvoke { name }
            }
        };

        tracing::debug!(
            field = %config.declared_name(),
            strategy = %strategy.kind(),
            argument_count = config.argument_count(),
            "selected resolution strategy"
        );

        strategy
    }
}
