/// Lomuto partition around the last element.
///
/// Scans left to right and swaps every element `<=` the pivot into the
/// growing left block, then drops the pivot right after that block.
///
/// Returns the pivot's final position `p`: `data[..p]` is `<= data[p]` and
/// `data[p + 1..]` is `> data[p]`. Ties go left, equal keys are not kept in
/// their original order.
#[inline]
pub fn partition<T: Ord>(data: &mut [T]) -> usize {
    debug_assert!(data.len() >= 2, "partition needs at least two elements");

    let Some((pivot, rest)) = data.split_last_mut() else {
        return 0;
    };

    let mut boundary = 0usize;
    for i in 0..rest.len() {
        if rest[i] <= *pivot {
            rest.swap(boundary, i);
            boundary += 1;
        }
    }

    if boundary < rest.len() {
        std::mem::swap(&mut rest[boundary], pivot);
    }
    boundary
}
