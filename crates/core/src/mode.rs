//! Construct categories and the mode bitmask that enables them.

use std::{
    fmt,
    ops::{BitOr, BitOrAssign},
    str::FromStr,
};

use crate::CleanError;

/// A family of Go constructs whose body boundaries can be trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Bodies of function declarations, method declarations and function literals.
    Func,
    /// Struct field lists and struct-typed composite literals.
    Struct,
    /// `if` and `else` blocks.
    If,
    /// The braces of `switch`, type switch and `select` statements.
    Switch,
    /// Case clauses, from the `:` to the next clause.
    Case,
    /// `for` loop bodies, including range loops.
    For,
    /// Interface method lists.
    Interface,
    /// Any other brace-delimited block.
    Block,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Func,
        Category::Struct,
        Category::If,
        Category::Switch,
        Category::Case,
        Category::For,
        Category::Interface,
        Category::Block,
    ];

    /// The name used on the command line and in log output.
    pub fn name(self) -> &'static str {
        match self {
            Category::Func => "func",
            Category::Struct => "struct",
            Category::If => "if",
            Category::Switch => "switch",
            Category::Case => "case",
            Category::For => "for",
            Category::Interface => "interface",
            Category::Block => "block",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Category::Func => 1 << 0,
            Category::Struct => 1 << 1,
            Category::If => 1 << 2,
            Category::Switch => 1 << 3,
            Category::Case => 1 << 4,
            Category::For => 1 << 5,
            Category::Interface => 1 << 6,
            Category::Block => 1 << 7,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = CleanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CleanError::UnknownCategory(s.to_string()))
    }
}

/// Bitmask of enabled [`Category`] values.
///
/// The bit layout matches the order of [`Category::ALL`], so `Mode::from_bits(0b1)` is
/// function-only and `Mode::from_bits(0xff)` is every category.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mode(u8);

impl Mode {
    pub const FUNC: Mode = Mode(Category::Func.bit());
    pub const STRUCT: Mode = Mode(Category::Struct.bit());
    pub const IF: Mode = Mode(Category::If.bit());
    pub const SWITCH: Mode = Mode(Category::Switch.bit());
    pub const CASE: Mode = Mode(Category::Case.bit());
    pub const FOR: Mode = Mode(Category::For.bit());
    pub const INTERFACE: Mode = Mode(Category::Interface.bit());
    pub const BLOCK: Mode = Mode(Category::Block.bit());
    pub const ALL: Mode = Mode(0xff);

    /// A mode that trims nothing.
    pub const fn empty() -> Self {
        Mode(0)
    }

    pub const fn from_bits(bits: u8) -> Self {
        Mode(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every bit of `other` is set in `self`.
    pub const fn contains(self, other: Mode) -> bool {
        self.0 & other.0 == other.0
    }

    /// This mode with `category` switched off.
    pub const fn without(self, category: Category) -> Self {
        Mode(self.0 & !category.bit())
    }

    pub const fn enables(self, category: Category) -> bool {
        self.0 & category.bit() != 0
    }

    /// Enabled categories in canonical order.
    pub fn categories(self) -> impl Iterator<Item = Category> {
        Category::ALL.into_iter().filter(move |&c| self.enables(c))
    }
}

impl From<Category> for Mode {
    fn from(category: Category) -> Self {
        Mode(category.bit())
    }
}

impl BitOr for Mode {
    type Output = Mode;

    fn bitor(self, rhs: Mode) -> Mode {
        Mode(self.0 | rhs.0)
    }
}

impl BitOrAssign for Mode {
    fn bitor_assign(&mut self, rhs: Mode) {
        self.0 |= rhs.0;
    }
}

impl FromIterator<Category> for Mode {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Mode::empty(), |mode, c| mode | Mode::from(c))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        for (i, category) in self.categories().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(category.name())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mode({self})")
    }
}
