//! Bubble sort demo: sorts a fixed array in place and prints it before and after.

use std::fmt::Display;

/// Sorts `items` ascending in place.
///
/// Each pass bubbles the largest remaining element to the end, so the scanned
/// range shrinks by one per pass. Stops after the first pass with no swaps.
/// Returns the number of passes performed. Equal elements keep their order.
pub fn bubble_sort<T: PartialOrd>(items: &mut [T]) -> usize {
    let n = items.len();
    let mut passes = 0;
    for i in 0..n.saturating_sub(1) {
        passes += 1;
        let mut swapped = false;
        for j in 0..n - 1 - i {
            if items[j] > items[j + 1] {
                items.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
    passes
}

/// Space-separated rendering, trailing space included.
pub fn format_slice<T: Display>(items: &[T]) -> String {
    items.iter().map(|item| format!("{item} ")).collect()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut data = vec![64, 34, 25, 12, 22, 11, 90];

    println!("Original array: {}", format_slice(&data));
    let passes = bubble_sort(&mut data);
    log::debug!("bubble_sort finished {} elements in {} passes", data.len(), passes);
    println!("Sorted array: {}", format_slice(&data));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_the_demo_array() {
        let mut data = vec![64, 34, 25, 12, 22, 11, 90];
        let passes = bubble_sort(&mut data);
        assert_eq!(data, vec![11, 12, 22, 25, 34, 64, 90]);
        // Five swapping passes, then the clean pass that ends the sort.
        assert_eq!(passes, 6);
    }

    #[test]
    fn sorted_input_exits_after_one_pass() {
        let mut data = [1, 2, 3, 4, 5];
        assert_eq!(bubble_sort(&mut data), 1);
        assert_eq!(data, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn reversed_input_needs_every_pass() {
        let mut data = [5, 4, 3, 2, 1];
        assert_eq!(bubble_sort(&mut data), 4);
        assert_eq!(data, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn empty_and_single_element_take_no_passes() {
        let mut empty: [i32; 0] = [];
        assert_eq!(bubble_sort(&mut empty), 0);

        let mut single = [42];
        assert_eq!(bubble_sort(&mut single), 0);
        assert_eq!(single, [42]);
    }

    #[test]
    fn equal_keys_keep_their_order() {
        #[derive(Debug, Clone, Copy, PartialEq)]
        struct Keyed(i32, char);
        impl PartialOrd for Keyed {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                self.0.partial_cmp(&other.0)
            }
        }

        let mut data = [Keyed(2, 'a'), Keyed(1, 'b'), Keyed(2, 'c'), Keyed(1, 'd')];
        bubble_sort(&mut data);
        let tags: Vec<char> = data.iter().map(|k| k.1).collect();
        assert_eq!(tags, vec!['b', 'd', 'a', 'c']);
    }

    #[test]
    fn duplicates_and_floats_sort() {
        let mut data = [3.5, -1.0, 3.5, 0.0];
        bubble_sort(&mut data);
        assert_eq!(data, [-1.0, 0.0, 3.5, 3.5]);
    }

    #[test]
    fn format_slice_keeps_trailing_space() {
        assert_eq!(format_slice(&[11, 12, 22]), "11 12 22 ");
        assert_eq!(format_slice::<i32>(&[]), "");
    }
}
