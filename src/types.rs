// src/types.rs
use std::fmt;

/// Element type tag carried by a borrowed buffer view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F16,
    F32,
    F64,
    Bool,
}

#[derive(Clone, Copy)]
enum Kind {
    Signed,
    Unsigned,
}

impl ElementType {
    /// Size of one element in bytes
    pub fn fixed_size(&self) -> usize {
        match self {
            ElementType::I8 | ElementType::U8 | ElementType::Bool => 1,
            ElementType::I16 | ElementType::U16 | ElementType::F16 => 2,
            ElementType::I32 | ElementType::U32 | ElementType::F32 => 4,
            ElementType::I64 | ElementType::U64 | ElementType::F64 => 8,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ElementType::I8 => "i8",
            ElementType::I16 => "i16",
            ElementType::I32 => "i32",
            ElementType::I64 => "i64",
            ElementType::U8 => "u8",
            ElementType::U16 => "u16",
            ElementType::U32 => "u32",
            ElementType::U64 => "u64",
            ElementType::F16 => "f16",
            ElementType::F32 => "f32",
            ElementType::F64 => "f64",
            ElementType::Bool => "bool",
        }
    }

    /// Resolve a buffer-protocol format string (`struct` module syntax) to an element type.
    ///
    /// In native mode (`@` or no prefix) the width of `l`, `L`, `n` and `N` is
    /// taken from `item_size`, since it depends on the platform's C types.
    /// Standard-size prefixes (`=`, `<`, `>`, `!`) use the fixed `struct` widths.
    /// Returns `None` for unknown codes, multi-item formats, and byte orders
    /// other than the host's.
    ///
    /// # Example
    ///
    /// ```
    /// use buffer_utils::ElementType;
    ///
    /// assert_eq!(ElementType::from_format("L", 8), Some(ElementType::U64));
    /// assert_eq!(ElementType::from_format("<Q", 8), Some(ElementType::U64));
    /// assert_eq!(ElementType::from_format("d", 8), Some(ElementType::F64));
    /// assert_eq!(ElementType::from_format("L", 4), Some(ElementType::U32));
    /// ```
    pub fn from_format(format: &str, item_size: usize) -> Option<Self> {
        let mut chars = format.chars();
        let (native, code) = match (chars.next()?, chars.next(), chars.next()) {
            ('@', Some(code), None) => (true, code),
            ('=', Some(code), None) => (false, code),
            ('<', Some(code), None) if cfg!(target_endian = "little") => (false, code),
            ('>' | '!', Some(code), None) if cfg!(target_endian = "big") => (false, code),
            (code, None, None) => (true, code),
            _ => return None,
        };

        // `None` width means the platform's native size, read from `item_size`
        let integer = |kind: Kind, width: Option<usize>| Self::integer(kind, width.unwrap_or(item_size));
        let long = if native { None } else { Some(4) };

        match code {
            'b' => integer(Kind::Signed, Some(1)),
            'B' | 'c' => integer(Kind::Unsigned, Some(1)),
            'h' => integer(Kind::Signed, Some(2)),
            'H' => integer(Kind::Unsigned, Some(2)),
            'i' => integer(Kind::Signed, Some(4)),
            'I' => integer(Kind::Unsigned, Some(4)),
            'l' => integer(Kind::Signed, long),
            'L' => integer(Kind::Unsigned, long),
            'q' => integer(Kind::Signed, Some(8)),
            'Q' => integer(Kind::Unsigned, Some(8)),
            'n' if native => integer(Kind::Signed, None),
            'N' if native => integer(Kind::Unsigned, None),
            'e' => Some(ElementType::F16),
            'f' => Some(ElementType::F32),
            'd' => Some(ElementType::F64),
            '?' => Some(ElementType::Bool),
            _ => None,
        }
    }

    fn integer(kind: Kind, width: usize) -> Option<Self> {
        match (kind, width) {
            (Kind::Signed, 1) => Some(ElementType::I8),
            (Kind::Signed, 2) => Some(ElementType::I16),
            (Kind::Signed, 4) => Some(ElementType::I32),
            (Kind::Signed, 8) => Some(ElementType::I64),
            (Kind::Unsigned, 1) => Some(ElementType::U8),
            (Kind::Unsigned, 2) => Some(ElementType::U16),
            (Kind::Unsigned, 4) => Some(ElementType::U32),
            (Kind::Unsigned, 8) => Some(ElementType::U64),
            _ => None,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
