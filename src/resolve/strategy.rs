//! Frozen resolution strategies

use crate::core::context::{Arguments, Context};
use crate::core::error::ResolveError;
use crate::core::field::{FieldName, MappingKey};
use crate::source::{Call, Shape, Source};
use serde_json::Value;
use std::fmt;

/// Tag of a selected strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// `source.accessor()`
    AccessorInvoke,
    /// `source.accessor(arguments, context)`
    AccessorInvokeWithArguments,
    /// `source[key]`, in both arities
    KeyLookup,
    /// `source.<declared name>()`
    NameInvoke,
    /// `source.<declared name>(arguments, context)`, bare on records
    NameInvokeWithArguments,
}

impl StrategyKind {
    /// Whether the strategy forwards arguments and context
    pub fn forwards_arguments(&self) -> bool {
        matches!(
            self,
            StrategyKind::AccessorInvokeWithArguments | StrategyKind::NameInvokeWithArguments
        )
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::AccessorInvoke => "accessor-invoke",
            StrategyKind::AccessorInvokeWithArguments => "accessor-invoke-with-arguments",
            StrategyKind::KeyLookup => "key-lookup",
            StrategyKind::NameInvoke => "name-invoke",
            StrategyKind::NameInvokeWithArguments => "name-invoke-with-arguments",
        };
        f.write_str(name)
    }
}

/// How one field fetches its value from a source
///
/// Built once by [`StrategySelector`](super::StrategySelector) and never
/// mutated afterwards. The name-invoke variants hold the field's shared name
/// cell rather than a copy, so a rename is picked up on the next call.
#[derive(Debug, Clone)]
pub enum ResolutionStrategy {
    AccessorInvoke { accessor: String },
    AccessorInvokeWithArguments { accessor: String },
    KeyLookup { key: MappingKey },
    NameInvoke { name: FieldName },
    NameInvokeWithArguments { name: FieldName },
}

impl ResolutionStrategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            ResolutionStrategy::AccessorInvoke { .. } => StrategyKind::AccessorInvoke,
            ResolutionStrategy::AccessorInvokeWithArguments { .. } => {
                StrategyKind::AccessorInvokeWithArguments
            }
            ResolutionStrategy::KeyLookup { .. } => StrategyKind::KeyLookup,
            ResolutionStrategy::NameInvoke { .. } => StrategyKind::NameInvoke,
            ResolutionStrategy::NameInvokeWithArguments { .. } => {
                StrategyKind::NameInvokeWithArguments
            }
        }
    }

    /// Fetch the field's value from `source`
    ///
    /// Absent mapping keys resolve to `Value::Null`. Every other failure is
    /// returned as is.
    pub fn resolve(
        &self,
        source: &dyn Source,
        arguments: &Arguments,
        context: &Context,
    ) -> Result<Value, ResolveError> {
        let result = match self {
            ResolutionStrategy::AccessorInvoke { accessor } => source.invoke(accessor, Call::Bare),
            ResolutionStrategy::AccessorInvokeWithArguments { accessor } => source.invoke(
                accessor,
                Call::WithArguments {
                    arguments,
                    context,
                },
            ),
            ResolutionStrategy::KeyLookup { key } => {
                source.lookup(key).map(|value| value.unwrap_or(Value::Null))
            }
            ResolutionStrategy::NameInvoke { name } => {
                name.with_current(|name| source.invoke(name, Call::Bare))
            }
            ResolutionStrategy::NameInvokeWithArguments { name } => {
                let call = match source.shape() {
                    Shape::Record => Call::Bare,
                    Shape::Object => Call::WithArguments {
                        arguments,
                        context,
                    },
                };
                name.with_current(|name| source.invoke(name, call))
            }
        };

        if let Err(e) = &result {
            tracing::trace!(
                strategy = %self.kind(),
                source = source.type_name(),
                code = e.error_code(),
                "field resolution failed"
            );
        }

        result
    }
}
