//! The closed set of type payloads the registry canonicalizes.

use bitflags::bitflags;

/// The `{signed, four_state, reg}` key into the 8-slot scalar type table.
///
/// `reg` without `four_state` is not a distinct type in the source
/// language (`reg` is always four-state), so two of the eight `{signed,
/// four_state, reg}` combinations never have an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScalarTypeKey {
    pub signed: bool,
    pub four_state: bool,
    pub reg: bool,
}

impl ScalarTypeKey {
    #[must_use]
    pub const fn table_index(self) -> usize {
        (self.signed as usize) | (self.four_state as usize) << 1 | (self.reg as usize) << 2
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        !(self.reg && !self.four_state)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PredefinedInteger {
    ShortInt,
    Int,
    LongInt,
    Byte,
    Integer,
    Time,
}

impl PredefinedInteger {
    pub const ALL: [PredefinedInteger; 6] = [
        PredefinedInteger::ShortInt,
        PredefinedInteger::Int,
        PredefinedInteger::LongInt,
        PredefinedInteger::Byte,
        PredefinedInteger::Integer,
        PredefinedInteger::Time,
    ];

    /// Bit width and four-state-ness, per the source language's fixed
    /// definitions for these types.
    #[must_use]
    pub const fn layout(self) -> (u32, bool) {
        match self {
            PredefinedInteger::ShortInt => (16, false),
            PredefinedInteger::Int => (32, false),
            PredefinedInteger::LongInt => (64, false),
            PredefinedInteger::Byte => (8, false),
            PredefinedInteger::Integer => (32, true),
            PredefinedInteger::Time => (64, true),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FloatingKind {
    Real,
    RealTime,
    ShortReal,
}

impl FloatingKind {
    pub const ALL: [FloatingKind; 3] = [
        FloatingKind::Real,
        FloatingKind::RealTime,
        FloatingKind::ShortReal,
    ];
}

/// The closed net-type catalog from the type registry's surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NetKind {
    Wire,
    Wand,
    Wor,
    Tri,
    TriAnd,
    TriOr,
    Tri0,
    Tri1,
    Supply0,
    Supply1,
    UWire,
}

impl NetKind {
    pub const ALL: [NetKind; 11] = [
        NetKind::Wire,
        NetKind::Wand,
        NetKind::Wor,
        NetKind::Tri,
        NetKind::TriAnd,
        NetKind::TriOr,
        NetKind::Tri0,
        NetKind::Tri1,
        NetKind::Supply0,
        NetKind::Supply1,
        NetKind::UWire,
    ];
}

impl From<sv_syntax::NetKeyword> for NetKind {
    fn from(keyword: sv_syntax::NetKeyword) -> Self {
        match keyword {
            sv_syntax::NetKeyword::Wire => NetKind::Wire,
            sv_syntax::NetKeyword::Wand => NetKind::Wand,
            sv_syntax::NetKeyword::Wor => NetKind::Wor,
            sv_syntax::NetKeyword::Tri => NetKind::Tri,
            sv_syntax::NetKeyword::TriAnd => NetKind::TriAnd,
            sv_syntax::NetKeyword::TriOr => NetKind::TriOr,
            sv_syntax::NetKeyword::Tri0 => NetKind::Tri0,
            sv_syntax::NetKeyword::Tri1 => NetKind::Tri1,
            sv_syntax::NetKeyword::Supply0 => NetKind::Supply0,
            sv_syntax::NetKeyword::Supply1 => NetKind::Supply1,
            sv_syntax::NetKeyword::UWire => NetKind::UWire,
        }
    }
}

bitflags! {
    /// Flags packed alongside a packed-array's width into its 32-bit cache key.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PackedArrayFlags: u32 {
        const SIGNED = 1 << 0;
        const FOUR_STATE = 1 << 1;
    }
}

/// The payload of a canonical [`crate::Type`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Scalar(ScalarTypeKey),
    PredefinedInteger(PredefinedInteger),
    Floating(FloatingKind),
    StringType,
    CHandleType,
    VoidType,
    NullType,
    EventType,
    ErrorType,
    PackedArray { width: u32, flags: PackedArrayFlags },
    Net(NetKind),
}
