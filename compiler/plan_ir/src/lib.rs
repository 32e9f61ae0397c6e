//! Plan IR - identifiers shared by the execution-plan node graph.
//!
//! This crate holds the pieces every other plan crate agrees on:
//! - [`Name`]: a compact interned identifier, compared by identity
//! - [`NameTable`]: the per-environment interner that hands out names
//!
//! Names are scoped to the table that produced them. Two tables never share
//! handles, which is what lets a struct type compare member names in O(1).

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod interner;
mod name;

pub use interner::{InternError, NameTable};
pub use name::Name;
