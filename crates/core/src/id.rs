//! Widget identifiers and pluggable id generation
//!
//! The store is generic over its id type. Any type that can key a hash map and
//! cross threads qualifies (see [`WidgetId`]). Ids are produced by an
//! [`IdGenerator`] owned by the store, so callers never pick them.
//!
//! Two strategies ship with the crate:
//! - [`SequentialIds`]: increasing `i64` values
//! - [`UuidIds`]: random v4 UUIDs
//!
//! [`WidgetKey`] and [`KeyGenerator`] let configuration choose between them at
//! runtime while keeping a single concrete id type.

use serde::Serialize;
use std::fmt;
use std::hash::Hash;
use uuid::Uuid;

/// Bound satisfied by every usable widget id type
pub trait WidgetId: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

impl<T> WidgetId for T where T: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

/// Source of fresh widget ids
///
/// Implementations must never return an id that is still live in the store
/// they feed. Generators are called under the store's write lock.
pub trait IdGenerator<Id>: Send + Sync {
    /// Produce the next id
    fn generate(&mut self) -> Id;
}

impl<Id, F> IdGenerator<Id> for F
where
    F: FnMut() -> Id + Send + Sync,
{
    fn generate(&mut self) -> Id {
        self()
    }
}

/// Monotonic `i64` ids starting at a configurable value
///
/// Wraps around at `i64::MAX`, which no realistic workload reaches.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: i64,
}

impl SequentialIds {
    /// Start counting at `start`
    pub fn starting_at(start: i64) -> Self {
        Self { next: start }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::starting_at(0)
    }
}

impl IdGenerator<i64> for SequentialIds {
    fn generate(&mut self) -> i64 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Random v4 UUID ids
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator<Uuid> for UuidIds {
    fn generate(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Id whose flavour is chosen at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum WidgetKey {
    /// Sequential integer id
    Int(i64),
    /// Random UUID id
    Uuid(Uuid),
}

impl fmt::Display for WidgetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetKey::Int(id) => write!(f, "{}", id),
            WidgetKey::Uuid(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for WidgetKey {
    fn from(id: i64) -> Self {
        WidgetKey::Int(id)
    }
}

impl From<Uuid> for WidgetKey {
    fn from(id: Uuid) -> Self {
        WidgetKey::Uuid(id)
    }
}

/// Generator of [`WidgetKey`] ids backed by one of the shipped strategies
#[derive(Debug, Clone)]
pub enum KeyGenerator {
    /// Delegate to [`SequentialIds`]
    Sequential(SequentialIds),
    /// Delegate to [`UuidIds`]
    Uuid(UuidIds),
}

impl IdGenerator<WidgetKey> for KeyGenerator {
    fn generate(&mut self) -> WidgetKey {
        match self {
            KeyGenerator::Sequential(ids) => WidgetKey::Int(ids.generate()),
            KeyGenerator::Uuid(ids) => WidgetKey::Uuid(ids.generate()),
        }
    }
}
