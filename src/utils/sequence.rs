use crate::protocol::{ID_MAX, ID_MIN};

/// Returns the sequence ID following `previous`.
///
/// IDs cycle through `ID_MIN..=ID_MAX`, so `ID_NONE` is never returned.
/// Any `previous` value outside of that range restarts the cycle at `ID_MIN`.
#[must_use]
pub const fn next_id(previous: u8) -> u8 {
    match previous.checked_add(1) {
        Some(id) if id <= ID_MAX => id,
        _ => ID_MIN,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::next_id;
    use crate::protocol::{END_MARKER, ESCAPE_MARKER, ID_MAX, ID_MIN, ID_NONE};

    #[test]
    fn test_first_id() {
        assert_eq!(next_id(ID_NONE), ID_MIN);
    }

    #[test]
    fn test_wraps_after_max() {
        assert_eq!(next_id(ID_MAX - 1), ID_MAX);
        assert_eq!(next_id(ID_MAX), ID_MIN);
    }

    #[test]
    fn test_full_cycle() {
        let mut id = next_id(ID_NONE);
        let mut seen = [false; ID_MAX as usize + 1];

        for _ in ID_MIN..=ID_MAX {
            assert!(!seen[id as usize], "ID {id} repeated before wrapping");
            seen[id as usize] = true;
            id = next_id(id);
        }

        assert_eq!(id, ID_MIN);
        assert!(!seen[ID_NONE as usize]);
    }

    proptest! {
        #[test]
        fn ids_stay_in_range(seed in any::<u8>(), steps in 0usize..1000) {
            let mut id = next_id(seed);

            for _ in 0..steps {
                let next = next_id(id);
                prop_assert!((ID_MIN..=ID_MAX).contains(&next));
                prop_assert_ne!(next, ID_NONE);
                prop_assert_ne!(next, END_MARKER);
                prop_assert_ne!(next, ESCAPE_MARKER);
                prop_assert_ne!(next, id);
                id = next;
            }
        }
    }
}
