//! Merge semantics for re-inserting under an existing key.

/// Fold an incoming record into the one already stored under the same key
///
/// Implementations overwrite only what `incoming` actually carries: a field
/// the caller left absent must keep its stored value.
pub trait Merge {
    fn merge(&mut self, incoming: Self);
}

/// `None` means "no change", `Some` overwrites
impl<T> Merge for Option<T> {
    #[inline]
    fn merge(&mut self, incoming: Self) {
        if incoming.is_some() {
            *self = incoming;
        }
    }
}

macro_rules! impl_merge_replace {
    ($($t:ty),* $(,)?) => {
        $(
            impl Merge for $t {
                #[inline]
                fn merge(&mut self, incoming: Self) {
                    *self = incoming;
                }
            }
        )*
    };
}

// Scalars carry no absent state, so merging is plain replacement
impl_merge_replace!((), u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, bool, char, String);
