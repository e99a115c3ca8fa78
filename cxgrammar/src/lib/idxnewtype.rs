// This macro generates index newtypes which expose a usize API but use a
// smaller storage size internally.

use std::mem::size_of;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

macro_rules! IdxNewtype {
    ($(#[$attr:meta])* $n:ident) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub struct $n(pub u16);

        impl From<$n> for usize {
            fn from(idx: $n) -> Self {
                debug_assert!(size_of::<usize>() >= size_of::<u16>());
                num_traits::cast(idx.0).unwrap()
            }
        }

        impl From<$n> for u32 {
            fn from(idx: $n) -> Self {
                debug_assert!(size_of::<u32>() >= size_of::<u16>());
                num_traits::cast(idx.0).unwrap()
            }
        }

        impl $n {
            /// Convert from a raw arena position.
            ///
            /// # Panics
            ///
            /// If `v` does not fit the storage type. No practical grammar
            /// comes close to 65535 non-terminals or productions.
            pub(crate) fn new(v: usize) -> Self {
                $n(num_traits::cast(v).expect("grammar index exceeds storage type"))
            }
        }
    };
}

IdxNewtype!(
    /// A type specifically for non-terminal indices.
    NtIdx
);
IdxNewtype!(
    /// A type specifically for production indices (a non-terminal with two
    /// alternatives owns two productions).
    PIdx
);
IdxNewtype!(
    /// A type specifically for symbol indices within a production.
    SIdx
);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(usize::from(NtIdx(7)), 7);
        assert_eq!(u32::from(PIdx(9)), 9);
        assert_eq!(SIdx::new(3), SIdx(3));
    }

    #[test]
    #[should_panic]
    fn overflow_panics() {
        NtIdx::new(usize::from(u16::MAX) + 1);
    }
}
