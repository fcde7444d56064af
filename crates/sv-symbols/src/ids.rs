use sv_common::arena::ArenaId;

macro_rules! arena_id {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct $name(u32);

        impl $name {
            pub const NONE: $name = $name(u32::MAX);

            #[must_use]
            pub const fn is_none(self) -> bool {
                self.0 == u32::MAX
            }
        }

        impl ArenaId for $name {
            fn from_index(index: u32) -> Self {
                $name(index)
            }

            fn index(self) -> u32 {
                self.0
            }
        }
    };
}

arena_id!(SymbolId);
arena_id!(ScopeId);
arena_id!(DeferredMemberIndex);
arena_id!(ImportDataIndex);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_sentinel_round_trips() {
        assert!(SymbolId::NONE.is_none());
        assert!(!SymbolId::from_index(0).is_none());
        assert!(ScopeId::NONE.is_none());
    }
}
