//! Value representation classifier.
//!
//! Walks the type graph of an [`Environment`] to pick a [`ValueRepr`] for
//! each type. `Optional` and `Flow` chains are peeled iteratively, and every
//! result is memoized.

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use plan_node::{DataSlot, Environment, NodeId, TypeData};

use crate::{ReprClassification, ReprError, ValueRepr};

/// Layout of a data slot.
///
/// Inline slots are embedded; every other kind is a byte buffer.
pub fn data_repr(slot: DataSlot) -> ValueRepr {
    if slot.is_inline() {
        ValueRepr::Embedded
    } else {
        ValueRepr::String
    }
}

/// Type classifier for value layouts.
///
/// Wraps an `Environment` reference with classification caching.
///
/// # Interior Mutability
///
/// Uses `RefCell` for the cache because the [`ReprClassification`] trait
/// takes `&self`.
pub struct ReprClassifier<'env> {
    env: &'env Environment,
    cache: RefCell<FxHashMap<NodeId, ValueRepr>>,
}

impl<'env> ReprClassifier<'env> {
    /// Create a new classifier over the given environment.
    pub fn new(env: &'env Environment) -> Self {
        Self {
            env,
            cache: RefCell::new(FxHashMap::default()),
        }
    }

    /// Access the underlying environment.
    pub fn env(&self) -> &'env Environment {
        self.env
    }

    fn classify(&self, ty: NodeId) -> Result<ValueRepr, ReprError> {
        // Peel Optional/Flow wrappers down to the type that decides.
        let mut peeled = Vec::new();
        let mut current = ty;
        let result = loop {
            if let Some(&cached) = self.cache.borrow().get(&current) {
                break cached;
            }
            let data = self.type_data(current)?;
            match data {
                TypeData::Optional(item) | TypeData::Flow(item) => {
                    peeled.push(current);
                    current = *item;
                }
                _ => {
                    let repr = Self::classify_by_kind(data)?;
                    self.cache.borrow_mut().insert(current, repr);
                    break repr;
                }
            }
        };

        let mut cache = self.cache.borrow_mut();
        for wrapper in peeled {
            cache.insert(wrapper, result);
        }
        tracing::trace!(?ty, ?result, "classified");
        Ok(result)
    }

    fn type_data(&self, ty: NodeId) -> Result<&'env TypeData, ReprError> {
        if !self.env.owns(ty) {
            return Err(ReprError::NotAType { node: ty });
        }
        self.env
            .as_type(ty)
            .ok_or(ReprError::NotAType { node: ty })
    }

    /// Layout of a type that is not an `Optional` or `Flow`.
    fn classify_by_kind(data: &TypeData) -> Result<ValueRepr, ReprError> {
        match data {
            TypeData::Data(data) => Ok(data_repr(data.slot())),

            // Heap objects
            TypeData::Stream(_)
            | TypeData::Struct(_)
            | TypeData::Tuple(_)
            | TypeData::Dict { .. }
            | TypeData::List(_)
            | TypeData::Resource { .. }
            | TypeData::Block { .. }
            | TypeData::Callable(_)
            | TypeData::EmptyList
            | TypeData::EmptyDict => Ok(ValueRepr::Boxed),

            TypeData::Variant(_) | TypeData::Void => Ok(ValueRepr::Any),

            TypeData::Null => Ok(ValueRepr::Embedded),

            TypeData::TypeOfType
            | TypeData::Any
            | TypeData::Tagged { .. }
            | TypeData::Optional(_)
            | TypeData::Flow(_) => Err(ReprError::Unsupported { kind: data.kind() }),
        }
    }
}

impl ReprClassification for ReprClassifier<'_> {
    fn value_repr(&self, ty: NodeId) -> Result<ValueRepr, ReprError> {
        self.classify(ty)
    }
}

#[cfg(test)]
mod tests;
