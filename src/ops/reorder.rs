//! Pure list operations behind drag-and-drop. Inputs are never mutated.

/// Move the element at `start` so it lands at `end`.
///
/// `end` indexes the list *after* the element has been removed, so moving
/// forward lands one slot later than a naive swap would suggest:
/// `reorder([a, b, c], 0, 2) == [b, c, a]`. An `end` past the tail appends.
/// An out-of-range `start` returns an unchanged copy.
pub fn reorder<T: Clone>(list: &[T], start: usize, end: usize) -> Vec<T> {
    let mut result = list.to_vec();
    if start >= result.len() {
        return result;
    }
    let item = result.remove(start);
    let end = end.min(result.len());
    result.insert(end, item);
    result
}

/// Remove the element at `source_index` from `source` and insert it at
/// `dest_index` in `dest`. Returns `(source, dest)` as new lists. An index
/// past the end of `dest` appends; an out-of-range `source_index` returns
/// unchanged copies.
pub fn move_between<T: Clone>(
    source: &[T],
    dest: &[T],
    source_index: usize,
    dest_index: usize,
) -> (Vec<T>, Vec<T>) {
    let mut source = source.to_vec();
    let mut dest = dest.to_vec();
    if source_index >= source.len() {
        return (source, dest);
    }
    let item = source.remove(source_index);
    let dest_index = dest_index.min(dest.len());
    dest.insert(dest_index, item);
    (source, dest)
}

/// Clamp a pointer-reported drop index to a column of `column_len` cards.
/// An empty column always resolves to 0.
pub fn resolve_drop_index(column_len: usize, reported: usize) -> usize {
    if column_len == 0 {
        0
    } else {
        reported.min(column_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn abc() -> Vec<&'static str> {
        vec!["a", "b", "c"]
    }

    #[test]
    fn test_reorder_forward() {
        assert_eq!(reorder(&abc(), 0, 2), vec!["b", "c", "a"]);
        assert_eq!(reorder(&abc(), 0, 1), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_reorder_backward() {
        assert_eq!(reorder(&abc(), 2, 0), vec!["c", "a", "b"]);
        assert_eq!(reorder(&abc(), 2, 1), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_reorder_identity() {
        for i in 0..3 {
            assert_eq!(reorder(&abc(), i, i), abc());
        }
    }

    #[test]
    fn test_reorder_end_past_tail_appends() {
        assert_eq!(reorder(&abc(), 0, 99), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_reorder_bad_start_is_noop() {
        assert_eq!(reorder(&abc(), 7, 0), abc());
        let empty: Vec<&str> = Vec::new();
        assert!(reorder(&empty, 0, 0).is_empty());
    }

    #[test]
    fn test_reorder_is_permutation() {
        let list: Vec<u32> = (0..6).collect();
        for start in 0..6 {
            for end in 0..8 {
                let mut out = reorder(&list, start, end);
                out.sort();
                assert_eq!(out, list, "start={} end={}", start, end);
            }
        }
    }

    #[test]
    fn test_move_between() {
        let (src, dst) = move_between(&abc(), &["x", "y"], 1, 1);
        assert_eq!(src, vec!["a", "c"]);
        assert_eq!(dst, vec!["x", "b", "y"]);
    }

    #[test]
    fn test_move_between_into_empty_and_past_end() {
        let empty: Vec<&str> = Vec::new();
        let (src, dst) = move_between(&abc(), &empty, 0, 5);
        assert_eq!(src, vec!["b", "c"]);
        assert_eq!(dst, vec!["a"]);

        let (_, dst) = move_between(&abc(), &["x"], 2, 10);
        assert_eq!(dst, vec!["x", "c"]);
    }

    #[test]
    fn test_move_between_leaves_inputs_alone() {
        let src = abc();
        let dst = vec!["x"];
        let _ = move_between(&src, &dst, 0, 0);
        assert_eq!(src, abc());
        assert_eq!(dst, vec!["x"]);
    }

    #[test]
    fn test_resolve_drop_index() {
        assert_eq!(resolve_drop_index(0, 0), 0);
        assert_eq!(resolve_drop_index(0, 12), 0);
        assert_eq!(resolve_drop_index(3, 1), 1);
        assert_eq!(resolve_drop_index(3, 9), 3);
    }
}
