//! Strongly typed roster indices.
//!
//! Every id is the position of its entity in an ordered roster (`Vec`), so
//! the inner integer doubles as a stable tie-break key: "lowest index wins"
//! is the same as "first seen wins".  Absence is expressed with `Option<Id>`
//! rather than a sentinel value.

use std::fmt;

/// Generate a typed index wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a mobile client in the device roster.
    pub struct DeviceId(u32);
}

typed_id! {
    /// Index of a wireless access point in the AP roster.
    pub struct ApId(u32);
}

typed_id! {
    /// Index of an edge server ("cloudlet") in the server roster.
    pub struct ServerId(u32);
}
