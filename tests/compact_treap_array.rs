use pretty_assertions::assert_eq;
use proptest::prelude::*;
use treap_array::{CompactTreapArray, IndexOutOfBounds};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Generates a deterministic pseudo-random value sequence (LCG).
fn random_values(n: usize) -> Vec<i64> {
    let mut values = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        values.push((x >> 33) as i64);
    }
    values
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum ArrayOp {
    Push(i64),
    PushFront(i64),
    Insert(usize, i64),
    Remove(usize),
    Set(usize, i64),
    PopFront,
    PopBack,
}

fn array_op_strategy() -> impl Strategy<Value = ArrayOp> {
    prop_oneof![
        4 => any::<i64>().prop_map(ArrayOp::Push),
        2 => any::<i64>().prop_map(ArrayOp::PushFront),
        3 => (any::<usize>(), any::<i64>()).prop_map(|(at, v)| ArrayOp::Insert(at, v)),
        3 => any::<usize>().prop_map(ArrayOp::Remove),
        2 => (any::<usize>(), any::<i64>()).prop_map(|(at, v)| ArrayOp::Set(at, v)),
        1 => Just(ArrayOp::PopFront),
        1 => Just(ArrayOp::PopBack),
    ]
}

// ─── Randomized model comparison ─────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of positional operations on both
    /// CompactTreapArray and Vec and asserts identical results at every
    /// step.
    #[test]
    fn array_ops_match_vec(ops in proptest::collection::vec(array_op_strategy(), TEST_SIZE)) {
        let mut array: CompactTreapArray<i64> = CompactTreapArray::new();
        let mut model: Vec<i64> = Vec::new();

        for op in &ops {
            match op {
                ArrayOp::Push(v) => {
                    array.push(*v);
                    model.push(*v);
                }
                ArrayOp::PushFront(v) => {
                    array.push_front(*v);
                    model.insert(0, *v);
                }
                ArrayOp::Insert(at, v) => {
                    let at = at % (model.len() + 1);
                    array.insert(at, *v);
                    model.insert(at, *v);
                }
                ArrayOp::Remove(at) => {
                    if model.is_empty() {
                        continue;
                    }
                    let at = at % model.len();
                    prop_assert_eq!(array.remove(at), model.remove(at), "remove({})", at);
                }
                ArrayOp::Set(at, v) => {
                    if model.is_empty() {
                        continue;
                    }
                    let at = at % model.len();
                    array.set(at, *v);
                    model[at] = *v;
                }
                ArrayOp::PopFront => {
                    prop_assert_eq!(array.pop_front(), if model.is_empty() { None } else { Some(model.remove(0)) });
                }
                ArrayOp::PopBack => {
                    prop_assert_eq!(array.pop_back(), model.pop());
                }
            }
            prop_assert_eq!(array.len(), model.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(array.is_empty(), model.is_empty());
        }

        let items: Vec<i64> = array.iter().copied().collect();
        prop_assert_eq!(items, model);
    }

    /// The node buffer only ever grows: removals recycle slots, and a
    /// removal/insert cycle settles back to the same capacity.
    #[test]
    fn recycling_keeps_capacity_stable(values in proptest::collection::vec(any::<i64>(), 1..512)) {
        let mut array: CompactTreapArray<i64> = values.iter().copied().collect();
        let capacity = array.capacity();

        for _ in 0..values.len() {
            array.pop_front();
        }
        for &value in &values {
            array.push(value);
        }

        prop_assert_eq!(array.len(), values.len());
        prop_assert_eq!(array.capacity(), capacity);
    }

    /// Iteration yields exactly the model contents, in order, with an
    /// exact size hint.
    #[test]
    fn iter_matches_model(values in proptest::collection::vec(any::<i64>(), 0..512)) {
        let array: CompactTreapArray<i64> = values.iter().copied().collect();

        let iter = array.iter();
        prop_assert_eq!(iter.len(), array.len());

        let items: Vec<i64> = array.iter().copied().collect();
        prop_assert_eq!(&items, &values);

        let owned: Vec<i64> = array.into_iter().collect();
        prop_assert_eq!(&owned, &values);
    }
}

// ─── Concrete scenarios ──────────────────────────────────────────────────────

#[test]
fn appending_preserves_order() {
    let mut array = CompactTreapArray::new();
    for i in 0..10 {
        array.push(i);
    }
    assert_eq!(array.to_vec(), vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
}

#[test]
fn prepending_reverses_order() {
    let mut array = CompactTreapArray::new();
    for i in 0..10 {
        array.push_front(i);
    }
    assert_eq!(array.to_vec(), vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
}

#[test]
fn removing_the_middle_element() {
    let mut array = CompactTreapArray::from([1, 2, 3]);
    assert_eq!(array.remove(1), 2);
    assert_eq!(array.to_vec(), vec![1, 3]);
}

#[test]
fn large_subrange_removal_matches_vec() {
    let mut array: CompactTreapArray<u32> = (0..100_000).collect();
    let mut model: Vec<u32> = (0..100_000).collect();

    array.remove_range(5..123);
    model.drain(5..123);

    assert_eq!(array.len(), model.len());
    assert_eq!(array[4], model[4]);
    assert_eq!(array[5], model[5]);
    assert_eq!(array[99_000], model[99_000]);
    let items: Vec<u32> = array.iter().copied().collect();
    assert_eq!(items, model);
}

#[test]
fn random_set_get_stress_matches_vec() {
    let size = 1_024;
    let mut array: CompactTreapArray<i64> = (0..size as i64).collect();
    let mut model: Vec<i64> = (0..size as i64).collect();

    let positions = random_values(10_000);
    for (step, &position) in positions.iter().enumerate() {
        let at = position.unsigned_abs() as usize % size;
        let value = step as i64;
        array.set(at, value);
        model[at] = value;
        assert_eq!(array[at], model[at]);
    }

    assert_eq!(array.to_vec(), model);
}

#[test]
fn setting_index_zero_of_an_empty_array_inserts() {
    let mut array: CompactTreapArray<i32> = CompactTreapArray::new();
    array.set(0, 42);
    assert_eq!(array.to_vec(), vec![42]);

    array.set(0, 7);
    assert_eq!(array.to_vec(), vec![7]);
}

#[test]
fn inserting_a_sequence_walks_forward() {
    let mut array: CompactTreapArray<i32> = (0..=10).collect();
    let mut model: Vec<i32> = (0..=10).collect();

    let elements = array.to_vec();
    array.insert_many(9, elements.iter().copied());
    let model_copy = model.clone();
    model.splice(9..9, model_copy);

    assert_eq!(array.to_vec(), model);
}

#[test]
fn inserting_an_empty_sequence_is_a_no_op() {
    let mut array = CompactTreapArray::from([1, 2, 3]);
    // An empty iterator must not even validate the position.
    array.insert_many(99, std::iter::empty());
    assert_eq!(array.to_vec(), vec![1, 2, 3]);
}

#[test]
fn repeating_a_value() {
    let array = CompactTreapArray::repeat(10, 100);
    assert_eq!(array.len(), 100);
    assert!(array.iter().all(|&v| v == 10));
}

#[test]
fn retain_matches_vec_retain() {
    let values = random_values(4_096);
    let mut array: CompactTreapArray<i64> = values.iter().copied().collect();
    let mut model = values;

    array.retain(|&v| v % 3 == 0);
    model.retain(|&v| v % 3 == 0);

    assert_eq!(array.to_vec(), model);
}

#[test]
fn remove_first_drops_the_prefix() {
    let mut array: CompactTreapArray<i32> = (0..10).collect();
    array.remove_first(4);
    assert_eq!(array.to_vec(), vec![4, 5, 6, 7, 8, 9]);
}

#[test]
fn mutating_methods_work_without_clone() {
    // A type with no Clone impl: mutation must still compile and work.
    #[derive(Debug, PartialEq)]
    struct Opaque(u32);

    let mut array: CompactTreapArray<Opaque> = CompactTreapArray::new();
    array.push(Opaque(1));
    array.push_front(Opaque(0));
    array.insert(2, Opaque(2));

    assert_eq!(array.remove(1), Opaque(1));
    assert_eq!(array.pop_front(), Some(Opaque(0)));
    assert_eq!(array.pop_back(), Some(Opaque(2)));
}

#[test]
fn cloning_copies_the_whole_buffer() {
    let values = random_values(2_048);
    let array: CompactTreapArray<i64> = values.iter().copied().collect();
    let mut copy = array.clone();

    for index in 0..copy.len() {
        copy.set(index, -1);
    }
    copy.push(-2);

    assert_eq!(array.to_vec(), values);
    assert_eq!(copy.len(), values.len() + 1);
}

#[test]
fn with_capacity_avoids_regrowth() {
    let mut array: CompactTreapArray<i32> = CompactTreapArray::with_capacity(256);
    let capacity = array.capacity();
    assert!(capacity >= 256);

    for i in 0..256 {
        array.push(i);
    }
    assert_eq!(array.capacity(), capacity);
}

#[test]
fn clearing_keeps_capacity() {
    let mut array: CompactTreapArray<i32> = (0..128).collect();
    let capacity = array.capacity();

    array.clear();
    assert!(array.is_empty());
    assert_eq!(array.capacity(), capacity);

    for i in 0..128 {
        array.push(i);
    }
    assert_eq!(array.capacity(), capacity);
}

#[test]
fn equality_ignores_tree_shape() {
    let mut a = CompactTreapArray::with_seed(1);
    let mut b = CompactTreapArray::with_seed(2);
    for i in 0..100 {
        a.push(i);
        b.insert(i as usize, i);
    }
    assert_eq!(a, b);

    b.remove(0);
    assert_ne!(a, b);
}

#[test]
fn debug_renders_elements_in_order() {
    let array = CompactTreapArray::from([3, 1, 2]);
    assert_eq!(format!("{array:?}"), "[3, 1, 2]");
}

// ─── Bounds handling ─────────────────────────────────────────────────────────

#[test]
fn fallible_operations_report_the_rejected_position() {
    let mut array = CompactTreapArray::from([1, 2, 3]);

    assert_eq!(array.try_insert(4, 9), Err(IndexOutOfBounds { index: 4, len: 3 }));
    assert_eq!(array.try_remove(3), Err(IndexOutOfBounds { index: 3, len: 3 }));
    assert_eq!(array.try_set(5, 9), Err(IndexOutOfBounds { index: 5, len: 3 }));

    assert_eq!(array.to_vec(), vec![1, 2, 3]);

    assert_eq!(array.try_insert(3, 4), Ok(()));
    assert_eq!(array.try_remove(0), Ok(1));
    assert_eq!(array.try_set(0, 0), Ok(()));
    assert_eq!(array.to_vec(), vec![0, 3, 4]);
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn indexing_past_the_end_panics() {
    let array = CompactTreapArray::from([1, 2, 3]);
    let _ = array[3];
}

#[test]
#[should_panic(expected = "insertion index (is 5) should be <= len (is 3)")]
fn inserting_past_the_end_panics() {
    let mut array = CompactTreapArray::from([1, 2, 3]);
    array.insert(5, 9);
}

#[test]
#[should_panic(expected = "removal index (is 3) should be < len (is 3)")]
fn removing_past_the_end_panics() {
    let mut array = CompactTreapArray::from([1, 2, 3]);
    array.remove(3);
}

#[test]
#[should_panic(expected = "range end (is 7) should be <= len (is 3)")]
fn removing_a_range_past_the_end_panics() {
    let mut array = CompactTreapArray::from([1, 2, 3]);
    array.remove_range(1..7);
}
