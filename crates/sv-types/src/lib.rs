//! Canonical type registry: primitive scalars, predefined numerics,
//! floating types, packed-array canonicalization, and net types.

pub mod id;
pub mod kind;
pub mod registry;

pub use id::TypeId;
pub use kind::{
    FloatingKind, NetKind, PackedArrayFlags, PredefinedInteger, ScalarTypeKey, TypeData,
};
pub use registry::{Type, TypeRegistry};
