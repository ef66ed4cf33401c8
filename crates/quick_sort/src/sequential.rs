use crate::partition::partition;

/// In-place quicksort with the last element as pivot.
///
/// Recurses into the smaller side and loops on the larger one, so the stack
/// stays logarithmic even when the pivot rule degrades to quadratic time.
pub fn sort<T: Ord>(mut data: &mut [T]) {
    loop {
        match data.len() {
            0 | 1 => return,
            2 => {
                if data[0] > data[1] {
                    data.swap(0, 1);
                }
                return;
            }
            _ => {}
        }

        let split = partition(data);
        let (left, rest) = data.split_at_mut(split);
        let right = &mut rest[1..];

        if left.len() < right.len() {
            sort(left);
            data = right;
        } else {
            sort(right);
            data = left;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_element_fast_path() {
        let mut data = [2, 1];
        sort(&mut data);
        assert_eq!(data, [1, 2]);

        let mut data = [1, 2];
        sort(&mut data);
        assert_eq!(data, [1, 2]);
    }

    #[test]
    fn degenerate_pivots_do_not_blow_the_stack() {
        let mut ascending: Vec<u32> = (0..4000).collect();
        sort(&mut ascending);
        assert!(ascending.windows(2).all(|w| w[0] <= w[1]));

        let mut descending: Vec<u32> = (0..4000).rev().collect();
        sort(&mut descending);
        assert_eq!(descending, (0..4000).collect::<Vec<_>>());
    }

    #[test]
    fn sorts_non_copy_values() {
        let mut words = vec![
            String::from("pear"),
            String::from("apple"),
            String::from("fig"),
            String::from("apple"),
        ];
        sort(&mut words);
        assert_eq!(words, ["apple", "apple", "fig", "pear"]);
    }
}
