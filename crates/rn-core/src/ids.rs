//! Strongly typed arena handles.
//!
//! A `Network` owns every node and link in slot vectors; the rest of the
//! engine refers to them by these handles rather than by reference, so
//! adjacency lists never form ownership cycles.  Handles are `Copy + Ord +
//! Hash` and stay stable for the lifetime of the entity (slots are not
//! reused until the network is cleared).
//!
//! External string keys (`"n42"`, `"L7"`) live on the entities themselves;
//! a handle only displays as its slot, e.g. `node#42`.

use std::fmt;

/// Declare a `u32` slot handle displayed as `<tag>#<slot>`.
macro_rules! slot_handle {
    ($(#[$attr:meta])* $vis:vis struct $name:ident => $tag:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
            /// Never handed out by a `Network`.
            pub const INVALID: $name = $name(u32::MAX);

            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "#{}"), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;

            fn try_from(slot: usize) -> Result<Self, Self::Error> {
                u32::try_from(slot).map($name)
            }
        }
    };
}

slot_handle! {
    /// Slot of a node in its `Network`.
    pub struct NodeId => "node";
}

slot_handle! {
    /// Slot of a link in its `Network`.
    pub struct LinkId => "link";
}
