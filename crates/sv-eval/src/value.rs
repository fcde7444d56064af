//! `ConstantValue`: the tagged union returned by constant evaluation.

/// An arbitrary-width (up to 128 bits), four-state-capable integer.
///
/// The governing front end backs this with an arbitrary-precision bignum;
/// this workspace has no bignum dependency in its stack, so integers are
/// capped at 128 bits (`value`/`unknown_mask` pairs, one bit per logic
/// position — a 1 in `unknown_mask` means that bit is X or Z). This is
/// recorded as a deliberate simplification, not an oversight: see
/// `DESIGN.md`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConstantInteger {
    pub width: u32,
    pub signed: bool,
    pub bits: u128,
    pub unknown_mask: u128,
}

impl ConstantInteger {
    #[must_use]
    pub const fn known(width: u32, signed: bool, value: u128) -> Self {
        Self {
            width,
            signed,
            bits: value,
            unknown_mask: 0,
        }
    }

    #[must_use]
    pub const fn is_four_state(&self) -> bool {
        self.unknown_mask != 0
    }
}

/// A tagged union over the constant-evaluable value kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstantValue {
    Integer(ConstantInteger),
    Real(f64),
    Str(String),
    Null,
    /// The `$` unbounded-wildcard literal (unsized array dimension).
    UnboundedWildcard,
    Aggregate(Vec<ConstantValue>),
}

impl ConstantValue {
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            ConstantValue::Integer(int) if int.is_four_state() => {
                format!("{}'{}x", int.width, int.bits)
            }
            ConstantValue::Integer(int) => format!("{}'{}", int.width, int.bits),
            ConstantValue::Real(value) => value.to_string(),
            ConstantValue::Str(value) => format!("\"{value}\""),
            ConstantValue::Null => "null".to_string(),
            ConstantValue::UnboundedWildcard => "$".to_string(),
            ConstantValue::Aggregate(items) => {
                let joined: Vec<String> = items.iter().map(ConstantValue::display).collect();
                format!("'{{{}}}", joined.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_state_detection() {
        let known = ConstantInteger::known(8, false, 5);
        assert!(!known.is_four_state());
        let unknown = ConstantInteger {
            unknown_mask: 0b1,
            ..known
        };
        assert!(unknown.is_four_state());
    }

    #[test]
    fn display_formats_match_expected_shapes() {
        assert_eq!(
            ConstantValue::Integer(ConstantInteger::known(32, false, 7)).display(),
            "32'7"
        );
        assert_eq!(ConstantValue::Str("hi".to_string()).display(), "\"hi\"");
        assert_eq!(ConstantValue::Null.display(), "null");
    }
}
