//! The canonical type registry.
//!
//! Every built-in and packed-array type is allocated at most once: the
//! registry's accessors are idempotent, returning the same `TypeId` (not
//! merely an equal one) on every call, matching the "canonical types are
//! referentially unique" invariant.

use rustc_hash::FxHashMap;
use sv_common::arena::Arena;
use sv_syntax::{DataTypeSyntax, KeywordType, NameSyntax, Signing};
use tracing::trace;

use crate::id::TypeId;
use crate::kind::{FloatingKind, NetKind, PredefinedInteger, ScalarTypeKey, TypeData, PackedArrayFlags};

#[derive(Clone, Copy, Debug)]
pub struct Type {
    pub data: TypeData,
}

pub struct TypeRegistry {
    arena: Arena<Type, TypeId>,
    scalar_table: [Option<TypeId>; 8],
    predefined_integers: [TypeId; 6],
    floating: [TypeId; 3],
    string_type: TypeId,
    chandle_type: TypeId,
    void_type: TypeId,
    null_type: TypeId,
    event_type: TypeId,
    error_type: TypeId,
    net_types: [TypeId; 11],
    packed_array_cache: FxHashMap<u32, TypeId>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        let mut arena = Arena::new();

        let mut scalar_table = [None; 8];
        for signed in [false, true] {
            for four_state in [false, true] {
                for reg in [false, true] {
                    let key = ScalarTypeKey {
                        signed,
                        four_state,
                        reg,
                    };
                    if key.is_valid() {
                        let id = arena.alloc(Type {
                            data: TypeData::Scalar(key),
                        });
                        scalar_table[key.table_index()] = Some(id);
                    }
                }
            }
        }

        let predefined_integers = PredefinedInteger::ALL.map(|kind| {
            arena.alloc(Type {
                data: TypeData::PredefinedInteger(kind),
            })
        });

        let floating = FloatingKind::ALL.map(|kind| {
            arena.alloc(Type {
                data: TypeData::Floating(kind),
            })
        });

        let string_type = arena.alloc(Type {
            data: TypeData::StringType,
        });
        let chandle_type = arena.alloc(Type {
            data: TypeData::CHandleType,
        });
        let void_type = arena.alloc(Type {
            data: TypeData::VoidType,
        });
        let null_type = arena.alloc(Type {
            data: TypeData::NullType,
        });
        let event_type = arena.alloc(Type {
            data: TypeData::EventType,
        });
        let error_type = arena.alloc(Type {
            data: TypeData::ErrorType,
        });

        let net_types = NetKind::ALL.map(|kind| {
            arena.alloc(Type {
                data: TypeData::Net(kind),
            })
        });

        Self {
            arena,
            scalar_table,
            predefined_integers,
            floating,
            string_type,
            chandle_type,
            void_type,
            null_type,
            event_type,
            error_type,
            net_types,
            packed_array_cache: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn get(&self, id: TypeId) -> Option<&Type> {
        self.arena.get(id)
    }

    /// The distinguished error type, returned from any failed type
    /// computation so downstream operations don't cascade null checks.
    #[must_use]
    pub fn error_type(&self) -> TypeId {
        self.error_type
    }

    #[must_use]
    pub fn void_type(&self) -> TypeId {
        self.void_type
    }

    #[must_use]
    pub fn null_type(&self) -> TypeId {
        self.null_type
    }

    #[must_use]
    pub fn event_type(&self) -> TypeId {
        self.event_type
    }

    #[must_use]
    pub fn string_type(&self) -> TypeId {
        self.string_type
    }

    #[must_use]
    pub fn chandle_type(&self) -> TypeId {
        self.chandle_type
    }

    /// Looks up the scalar type for `{signed, four_state, reg}`. The two
    /// invalid combinations (`reg` without `four_state`) fall back to the
    /// error type, matching the "error type as fallback" design.
    #[must_use]
    pub fn scalar_type(&self, key: ScalarTypeKey) -> TypeId {
        if !key.is_valid() {
            return self.error_type;
        }
        self.scalar_table[key.table_index()].unwrap_or(self.error_type)
    }

    #[must_use]
    pub fn predefined_integer(&self, kind: PredefinedInteger) -> TypeId {
        self.predefined_integers[kind as usize]
    }

    #[must_use]
    pub fn floating(&self, kind: FloatingKind) -> TypeId {
        self.floating[kind as usize]
    }

    #[must_use]
    pub fn net_type(&self, kind: NetKind) -> TypeId {
        self.net_types[kind as usize]
    }

    /// Convenience accessor for `wire`, overwhelmingly the common case in
    /// real source.
    #[must_use]
    pub fn wire_net_type(&self) -> TypeId {
        self.net_type(NetKind::Wire)
    }

    /// Canonicalizes a packed-array type by packing its width and flags
    /// into a single 32-bit key. An existing entry for that key returns
    /// the same object; otherwise one is allocated and cached.
    pub fn packed_array_type(&mut self, width: u32, flags: PackedArrayFlags) -> TypeId {
        let key = pack_key(width, flags);
        if let Some(&id) = self.packed_array_cache.get(&key) {
            return id;
        }
        let id = self.arena.alloc(Type {
            data: TypeData::PackedArray { width, flags },
        });
        trace!(width, flags = ?flags, "allocated new packed-array type");
        self.packed_array_cache.insert(key, id);
        id
    }

    /// Converts a data-type syntax node to a type where no scope lookup is
    /// required (keyword types, signing modifiers, packed dimensions).
    /// Named-type references can't be resolved here, since that requires a
    /// symbol lookup this crate doesn't have; they fall back to the error
    /// type with no diagnostic. Callers that can supply a resolver (e.g.
    /// `sv-compilation`, which owns both a symbol table and the
    /// diagnostic sink) should use [`Self::from_syntax_with`] instead, which
    /// is also what this delegates to.
    pub fn from_syntax(&mut self, syntax: &DataTypeSyntax) -> TypeId {
        self.from_syntax_with(syntax, &mut |_| None)
    }

    /// Converts a data-type syntax node to a type, resolving `Named`
    /// references through `resolve_named` (called with the referenced
    /// name; `None` means unresolved). The caller is responsible for
    /// diagnosing an unresolved reference — this recurses into variable
    /// dimensions the same way regardless of whether a resolver is
    /// supplied.
    pub fn from_syntax_with(
        &mut self,
        syntax: &DataTypeSyntax,
        resolve_named: &mut dyn FnMut(&NameSyntax) -> Option<TypeId>,
    ) -> TypeId {
        match syntax {
            DataTypeSyntax::Keyword(keyword) => self.keyword_type(*keyword),
            DataTypeSyntax::Signing(inner, signing) => {
                let base = self.from_syntax_with(inner, resolve_named);
                self.with_signing(base, *signing)
            }
            DataTypeSyntax::Packed(inner, dimension) => {
                let base = self.from_syntax_with(inner, resolve_named);
                let base_flags = self.flags_of(base);
                self.packed_array_type(dimension.width(), base_flags)
            }
            DataTypeSyntax::Named(name) => resolve_named(name).unwrap_or(self.error_type),
        }
    }

    fn keyword_type(&self, keyword: KeywordType) -> TypeId {
        match keyword {
            KeywordType::Bit => self.scalar_type(ScalarTypeKey {
                signed: false,
                four_state: false,
                reg: false,
            }),
            KeywordType::Logic => self.scalar_type(ScalarTypeKey {
                signed: false,
                four_state: true,
                reg: false,
            }),
            KeywordType::Reg => self.scalar_type(ScalarTypeKey {
                signed: false,
                four_state: true,
                reg: true,
            }),
            KeywordType::ShortInt => self.predefined_integer(PredefinedInteger::ShortInt),
            KeywordType::Int => self.predefined_integer(PredefinedInteger::Int),
            KeywordType::LongInt => self.predefined_integer(PredefinedInteger::LongInt),
            KeywordType::Byte => self.predefined_integer(PredefinedInteger::Byte),
            KeywordType::Integer => self.predefined_integer(PredefinedInteger::Integer),
            KeywordType::Time => self.predefined_integer(PredefinedInteger::Time),
            KeywordType::Real => self.floating(FloatingKind::Real),
            KeywordType::RealTime => self.floating(FloatingKind::RealTime),
            KeywordType::ShortReal => self.floating(FloatingKind::ShortReal),
            KeywordType::String => self.string_type,
            KeywordType::CHandle => self.chandle_type,
            KeywordType::Void => self.void_type,
            KeywordType::Event => self.event_type,
        }
    }

    fn with_signing(&self, base: TypeId, signing: Signing) -> TypeId {
        let Some(Type {
            data: TypeData::Scalar(key),
        }) = self.get(base)
        else {
            return base;
        };
        self.scalar_type(ScalarTypeKey {
            signed: matches!(signing, Signing::Signed),
            ..*key
        })
    }

    fn flags_of(&self, id: TypeId) -> PackedArrayFlags {
        match self.get(id).map(|t| t.data) {
            Some(TypeData::Scalar(key)) => {
                let mut flags = PackedArrayFlags::empty();
                if key.signed {
                    flags |= PackedArrayFlags::SIGNED;
                }
                if key.four_state {
                    flags |= PackedArrayFlags::FOUR_STATE;
                }
                flags
            }
            _ => PackedArrayFlags::empty(),
        }
    }
}

const fn pack_key(width: u32, flags: PackedArrayFlags) -> u32 {
    // 24 bits of width (16M bits is far beyond any realistic packed array)
    // leaves 8 bits for flags, comfortably inside a u32 key.
    (width << 8) | flags.bits()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_accessors_are_referentially_stable() {
        let registry = TypeRegistry::new();
        assert_eq!(registry.error_type(), registry.error_type());
        assert_eq!(registry.string_type(), registry.string_type());
        assert_eq!(registry.wire_net_type(), registry.wire_net_type());
    }

    #[test]
    fn scalar_table_has_six_valid_and_two_error_slots() {
        let registry = TypeRegistry::new();
        let mut error_count = 0;
        for signed in [false, true] {
            for four_state in [false, true] {
                for reg in [false, true] {
                    let key = ScalarTypeKey {
                        signed,
                        four_state,
                        reg,
                    };
                    if registry.scalar_type(key) == registry.error_type() {
                        error_count += 1;
                    }
                }
            }
        }
        assert_eq!(error_count, 2);
    }

    #[test]
    fn packed_array_type_is_canonicalized_by_width_and_flags() {
        let mut registry = TypeRegistry::new();
        let a = registry.packed_array_type(8, PackedArrayFlags::SIGNED);
        let b = registry.packed_array_type(8, PackedArrayFlags::SIGNED);
        assert_eq!(a, b);

        let c = registry.packed_array_type(8, PackedArrayFlags::empty());
        assert_ne!(a, c);

        let d = registry.packed_array_type(16, PackedArrayFlags::SIGNED);
        assert_ne!(a, d);
    }

    #[test]
    fn net_type_catalog_is_distinct_and_stable() {
        let registry = TypeRegistry::new();
        let wire = registry.wire_net_type();
        let tri = registry.net_type(NetKind::Tri);
        assert_ne!(wire, tri);
        assert_eq!(wire, registry.net_type(NetKind::Wire));
    }

    #[test]
    fn from_syntax_resolves_packed_bit_vector() {
        use sv_syntax::PackedDimensionSyntax;

        let mut registry = TypeRegistry::new();
        let syntax = DataTypeSyntax::Packed(
            Box::new(DataTypeSyntax::Keyword(KeywordType::Bit)),
            PackedDimensionSyntax { msb: 7, lsb: 0 },
        );
        let id = registry.from_syntax(&syntax);
        match registry.get(id).map(|t| t.data) {
            Some(TypeData::PackedArray { width, .. }) => assert_eq!(width, 8),
            other => panic!("expected a packed array type, got {other:?}"),
        }
    }

    #[test]
    fn from_syntax_named_type_without_scope_is_the_error_type() {
        let mut registry = TypeRegistry::new();
        let syntax = DataTypeSyntax::Named(sv_syntax::parse_name("my_type"));
        assert_eq!(registry.from_syntax(&syntax), registry.error_type());
    }

    #[test]
    fn from_syntax_with_resolves_named_type_through_the_supplied_resolver() {
        let mut registry = TypeRegistry::new();
        let byte_type = registry.predefined_integer(PredefinedInteger::Byte);
        let syntax = DataTypeSyntax::Named(sv_syntax::parse_name("my_byte"));
        let resolved = registry.from_syntax_with(&syntax, &mut |_| Some(byte_type));
        assert_eq!(resolved, byte_type);
    }

    #[test]
    fn from_syntax_with_falls_back_to_error_type_when_resolver_misses() {
        let mut registry = TypeRegistry::new();
        let syntax = DataTypeSyntax::Named(sv_syntax::parse_name("unknown_type"));
        let resolved = registry.from_syntax_with(&syntax, &mut |_| None);
        assert_eq!(resolved, registry.error_type());
    }
}
