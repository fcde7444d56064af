use sv_common::arena::ArenaId;

/// A canonical type handle. Two `TypeId`s compare equal exactly when they
/// name the same canonical [`crate::Type`] object — the registry never
/// allocates two ids for structurally identical built-in or packed-array
/// types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeId(u32);

impl TypeId {
    pub const NONE: TypeId = TypeId(u32::MAX);

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

impl ArenaId for TypeId {
    fn from_index(index: u32) -> Self {
        TypeId(index)
    }

    fn index(self) -> u32 {
        self.0
    }
}
