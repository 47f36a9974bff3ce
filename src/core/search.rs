use crate::error::Error;
use core::borrow::Borrow;
use core::cmp::Ordering;

/// Binary search over an ascending, duplicate-free slice.
///
/// Returns `Ok(position)` of the matching element, or `Err(position)` with the index at which
/// `needle` would have to be inserted to keep the slice sorted.
#[inline]
pub fn search<Q, T>(haystack: &[T], needle: &Q) -> Result<usize, usize>
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut j = haystack.len();

    // SAFETY: `m` always lies in `[i, j)` and `j <= haystack.len()` while the loop runs.
    unsafe {
        let mut i = 0;
        let p = haystack.as_ptr();
        let mut m = j >> 1;
        while i != j {
            match (*p.add(m)).borrow().cmp(needle) {
                Ordering::Equal => return Ok(m),
                Ordering::Less => {
                    i = m + 1;
                    m = (i + j) >> 1;
                }
                Ordering::Greater => {
                    j = m;
                    m = (i + j) >> 1;
                }
            }
        }
        Err(i)
    }
}

/// Same as [`search`], but only looks at `haystack[after..]`. Positions are relative to the whole
/// slice. A hint past the end is clamped to the end.
///
/// The caller guarantees that `needle`, if present, does not lie before `after`.
#[inline]
pub fn search_after<Q, T>(haystack: &[T], needle: &Q, after: usize) -> Result<usize, usize>
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let after = after.min(haystack.len());

    search(&haystack[after..], needle)
        .map(|position| after + position)
        .map_err(|position| after + position)
}

/// Smallest index whose element is strictly greater than `needle`.
#[inline]
pub fn index_of_greater<Q, T>(haystack: &[T], needle: &Q) -> usize
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    match search(haystack, needle) {
        Ok(position) => position + 1,
        Err(position) => position,
    }
}

/// Smallest index whose element is greater than or equal to `needle`.
#[inline]
pub fn index_of_greater_or_equal<Q, T>(haystack: &[T], needle: &Q) -> usize
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    match search(haystack, needle) {
        Ok(position) | Err(position) => position,
    }
}

/// Checks that `hint` is a valid lower bound for `needle`: it must not run past the end, and
/// every element before it must be strictly less than `needle`.
pub(crate) fn check_hint<Q, T>(haystack: &[T], needle: &Q, hint: usize) -> Result<(), Error>
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    if hint > haystack.len() {
        return Err(Error::HintOutOfBounds {
            hint,
            len: haystack.len(),
        });
    }
    if hint > 0 && haystack[hint - 1].borrow() >= needle {
        return Err(Error::HintPastTarget { hint });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search() {
        let haystack: Vec<isize> = vec![1, 3, 5, 7, 9];

        assert_eq!(search(&haystack, &1), Ok(0));
        assert_eq!(search(&haystack, &9), Ok(4));
        assert_eq!(search(&haystack, &0), Err(0));
        assert_eq!(search(&haystack, &4), Err(2));
        assert_eq!(search(&haystack, &10), Err(5));

        let empty: Vec<isize> = vec![];
        assert_eq!(search(&empty, &1), Err(0));
    }

    #[test]
    fn test_search_after() {
        let haystack: Vec<isize> = vec![1, 3, 5, 7, 9];

        assert_eq!(search_after(&haystack, &7, 2), Ok(3));
        assert_eq!(search_after(&haystack, &6, 2), Err(3));
        assert_eq!(search_after(&haystack, &10, 5), Err(5));
        assert_eq!(search_after(&haystack, &10, 42), Err(5));
        // A hint past the target hides it.
        assert_eq!(search_after(&haystack, &1, 1), Err(1));
    }

    #[test]
    fn test_index_of_greater() {
        let haystack: Vec<isize> = vec![1, 3, 5];

        assert_eq!(index_of_greater(&haystack, &3), 2);
        assert_eq!(index_of_greater_or_equal(&haystack, &3), 1);
        assert_eq!(index_of_greater(&haystack, &4), 2);
        assert_eq!(index_of_greater_or_equal(&haystack, &4), 2);
        assert_eq!(index_of_greater(&haystack, &0), 0);
        assert_eq!(index_of_greater_or_equal(&haystack, &6), 3);
    }

    #[test]
    fn test_check_hint() {
        let haystack: Vec<isize> = vec![1, 3, 5];

        assert_eq!(check_hint(&haystack, &4, 2), Ok(()));
        assert_eq!(check_hint(&haystack, &0, 0), Ok(()));
        assert_eq!(check_hint(&haystack, &6, 3), Ok(()));
        assert_eq!(
            check_hint(&haystack, &6, 4),
            Err(Error::HintOutOfBounds { hint: 4, len: 3 })
        );
        assert_eq!(
            check_hint(&haystack, &3, 2),
            Err(Error::HintPastTarget { hint: 2 })
        );
    }
}
