//! Data-type syntax: the subset of the grammar the type registry's
//! `getType(syntax, ...)` contract actually converts.

use crate::name::NameSyntax;

/// Keyword-spelled built-in types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeywordType {
    Bit,
    Logic,
    Reg,
    ShortInt,
    Int,
    LongInt,
    Byte,
    Integer,
    Time,
    Real,
    RealTime,
    ShortReal,
    String,
    CHandle,
    Void,
    Event,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signing {
    Signed,
    Unsigned,
}

/// A single packed dimension, e.g. the `[7:0]` in `bit [7:0]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PackedDimensionSyntax {
    pub msb: i32,
    pub lsb: i32,
}

impl PackedDimensionSyntax {
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.msb.abs_diff(self.lsb) + 1
    }
}

/// The closed set of net-type keywords the type registry catalogs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NetKeyword {
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

/// A data-type syntax node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataTypeSyntax {
    Keyword(KeywordType),
    /// An explicit `signed`/`unsigned` modifier wrapping a keyword type.
    Signing(Box<DataTypeSyntax>, Signing),
    /// A type with one packed dimension, e.g. `bit [7:0]` or `logic signed [3:0]`.
    Packed(Box<DataTypeSyntax>, PackedDimensionSyntax),
    /// A reference to a user-defined type or net type by name.
    Named(NameSyntax),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_dimension_width_is_inclusive() {
        assert_eq!(PackedDimensionSyntax { msb: 7, lsb: 0 }.width(), 8);
        assert_eq!(PackedDimensionSyntax { msb: 0, lsb: 0 }.width(), 1);
        // Descending or ascending order gives the same width.
        assert_eq!(
            PackedDimensionSyntax { msb: 0, lsb: 7 }.width(),
            PackedDimensionSyntax { msb: 7, lsb: 0 }.width()
        );
    }
}
