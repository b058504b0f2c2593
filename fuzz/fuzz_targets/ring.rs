#![no_main]
use std::{collections::VecDeque, mem};

use arbitrary::Arbitrary;
use circular_buffer::CircularBuffer;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    Back,
    Clear,
    Clone,
    CloneFrom,
    Contains(i32),
    CursorWalk(isize),
    Equals,
    Erase(usize),
    EraseRange(usize, usize),
    Front,
    Get(usize),
    Insert(usize, i32),
    InsertAtCursor(usize, i32),
    IsEmpty,
    Iter,
    Len,
    MakeContiguous,
    PopBack,
    PopFront,
    PushBack(i32),
    PushFront(i32),
    Range(usize, usize),
    Reserve(u16),
    Swap(usize, usize),
    SwapWith,
    Truncate(usize),
}

const MAX_LEN: usize = 1000000;

fuzz_target!(|data: Vec<Op>| { fuzz(&data) });

/// Capacity never shrinks and always leaves one slot free.
fn check_capacity(d: &CircularBuffer<i32>, old_cap: usize) {
    assert!(d.capacity() >= old_cap);
    if d.capacity() > 0 {
        assert!(d.len() < d.capacity());
    }
}

fn fuzz(data: &[Op]) {
    let (mut d1, mut d2) = (CircularBuffer::<i32>::new(), CircularBuffer::<i32>::new());
    let (mut v1, mut v2) = (VecDeque::<i32>::new(), VecDeque::<i32>::new());

    for op in data {
        let (cap1, cap2) = (d1.capacity(), d2.capacity());
        match op {
            Op::Back => {
                assert_eq!(d1.back(), v1.back());
                assert_eq!(d2.back(), v2.back());
            }
            Op::Clear => {
                d1.clear();
                d2.clear();
                v1.clear();
                v2.clear();
                assert_eq!(d1.capacity(), cap1);
            }
            Op::Clone => {
                d2 = d1.clone();
                v2 = v1.clone();
                assert!(d2.iter().eq(v2.iter()));
            }
            Op::CloneFrom => {
                d1.clone_from(&d2);
                v1.clone_from(&v2);
            }
            Op::Contains(i) => {
                assert_eq!(d1.contains(i), v1.contains(i));
                assert_eq!(d2.contains(i), v2.contains(i));
            }
            &Op::CursorWalk(k) => {
                let k = k % 64;
                let begin = d1.begin();
                let it = begin + k;
                assert_eq!(it - begin, k);
                assert_eq!(it.get(), usize::try_from(k).ok().and_then(|i| v1.get(i)));
                let r = d1.rbegin() + k;
                let back = usize::try_from(k).ok().and_then(|i| v1.len().checked_sub(i + 1));
                assert_eq!(r.get(), back.and_then(|i| v1.get(i)));
            }
            Op::Equals => {
                assert!(d1.iter().eq(v1.iter()));
                assert!(d2.iter().eq(v2.iter()));
            }
            &Op::Erase(i) => {
                if !v1.is_empty() {
                    let i1 = i % v1.len();
                    assert_eq!(d1.erase(i1), v1.remove(i1));
                }
                if !v2.is_empty() {
                    let i2 = i % v2.len();
                    assert_eq!(d2.erase(i2), v2.remove(i2));
                }
                assert_eq!(d1.erase(d1.len()), None);
            }
            &Op::EraseRange(min, max) => {
                if !v1.is_empty() {
                    let mut min1 = min % (v1.len() + 1);
                    let mut max1 = max % (v1.len() + 1);
                    if min1 > max1 {
                        mem::swap(&mut min1, &mut max1)
                    }
                    d1.erase_range(min1..max1);
                    v1.drain(min1..max1);
                }
                if !v2.is_empty() {
                    let mut min2 = min % (v2.len() + 1);
                    let mut max2 = max % (v2.len() + 1);
                    if min2 > max2 {
                        mem::swap(&mut min2, &mut max2)
                    }
                    d2.erase_range(min2..max2);
                    v2.drain(min2..max2);
                }
            }
            Op::Front => {
                assert_eq!(d1.front(), v1.front());
                assert_eq!(d2.front(), v2.front());
            }
            Op::Get(i) => {
                assert_eq!(d1.get(*i), v1.get(*i));
                assert_eq!(d2.get(*i), v2.get(*i));
                let i1 = *i & v1.len();
                let i2 = *i & v2.len();
                assert_eq!(d1.get(i1), v1.get(i1));
                assert_eq!(d2.get(i2), v2.get(i2));
            }
            &Op::Insert(i, a) => {
                if v1.len() < MAX_LEN {
                    let i1 = i % (v1.len() + 1);
                    assert_eq!(d1.insert(i1, a), i1);
                    v1.insert(i1, a);
                }
                if v2.len() < MAX_LEN {
                    let i2 = i % (v2.len() + 1);
                    d2.insert(i2, a);
                    v2.insert(i2, a);
                }
            }
            &Op::InsertAtCursor(i, a) => {
                if v1.len() < MAX_LEN {
                    let i1 = i % (v1.len() + 1);
                    let mut cur = d1.cursor_mut_at(i1);
                    cur.insert(a);
                    assert_eq!(cur.get(), Some(&a));
                    v1.insert(i1, a);
                }
            }
            Op::IsEmpty => {
                assert_eq!(d1.is_empty(), v1.is_empty());
                assert_eq!(d2.is_empty(), v2.is_empty());
            }
            Op::Iter => {
                let mut d1_iter = d1.iter();
                let mut v1_iter = v1.iter();
                while v1_iter.len() > 0 {
                    if fastrand::bool() {
                        assert_eq!(d1_iter.next(), v1_iter.next());
                    } else {
                        assert_eq!(d1_iter.next_back(), v1_iter.next_back());
                    }
                }

                let mut d2_iter = d2.iter();
                let mut v2_iter = v2.iter();
                while v2_iter.len() > 0 {
                    if fastrand::bool() {
                        assert_eq!(d2_iter.next(), v2_iter.next());
                    } else {
                        assert_eq!(d2_iter.next_back(), v2_iter.next_back());
                    }
                }
            }
            Op::Len => {
                assert_eq!(d1.len(), v1.len());
                assert_eq!(d2.len(), v2.len());
            }
            Op::MakeContiguous => {
                assert_eq!(d1.make_contiguous(), v1.make_contiguous());
                assert_eq!(d2.make_contiguous(), v2.make_contiguous());
            }
            Op::PopBack => {
                assert_eq!(d1.pop_back(), v1.pop_back());
                assert_eq!(d2.pop_back(), v2.pop_back());
                assert_eq!(d1.capacity(), cap1);
            }
            Op::PopFront => {
                assert_eq!(d1.pop_front(), v1.pop_front());
                assert_eq!(d2.pop_front(), v2.pop_front());
                assert_eq!(d2.capacity(), cap2);
            }
            Op::PushBack(i) => {
                if v1.len() < MAX_LEN {
                    d1.push_back(*i);
                    v1.push_back(*i);
                }
                if v2.len() < MAX_LEN {
                    d2.push_back(*i);
                    v2.push_back(*i);
                }
            }
            Op::PushFront(i) => {
                if v1.len() < MAX_LEN {
                    d1.push_front(*i);
                    v1.push_front(*i);
                }
                if v2.len() < MAX_LEN {
                    d2.push_front(*i);
                    v2.push_front(*i);
                }
            }
            &Op::Range(min, max) => {
                if !v1.is_empty() {
                    let mut min1 = min % v1.len();
                    let mut max1 = max % v1.len();
                    if min1 > max1 {
                        mem::swap(&mut min1, &mut max1)
                    }

                    assert!(d1.range(min1..max1).eq(v1.range(min1..max1)));
                    let (a, b) = (d1.cursor_at(min1), d1.cursor_at(max1));
                    assert!(a.iter_to(b).eq(v1.range(min1..max1)));
                }

                if !v2.is_empty() {
                    let mut min2 = min % v2.len();
                    let mut max2 = max % v2.len();
                    if min2 > max2 {
                        mem::swap(&mut min2, &mut max2)
                    }
                    assert!(d2.range(min2..max2).eq(v2.range(min2..max2)));
                }
            }
            &Op::Reserve(n) => {
                let n = n as usize;
                d1.reserve(n);
                v1.reserve(n.saturating_sub(v1.len()));
                if n > cap1.saturating_sub(1) {
                    assert_eq!(d1.capacity(), n + 1);
                } else {
                    assert_eq!(d1.capacity(), cap1);
                }
            }
            Op::Swap(i, j) => {
                if !v1.is_empty() {
                    let i1 = i % v1.len();
                    let j1 = j % v1.len();
                    d1.swap(i1, j1);
                    v1.swap(i1, j1);
                }

                if !v2.is_empty() {
                    let j2 = j % v2.len();
                    let i2 = i % v2.len();
                    d2.swap(i2, j2);
                    v2.swap(i2, j2);
                }
            }
            Op::SwapWith => {
                d1.swap_with(&mut d2);
                mem::swap(&mut v1, &mut v2);
            }
            &Op::Truncate(i) => {
                d1.truncate(i);
                v1.truncate(i);
                d2.truncate(i);
                v2.truncate(i);
            }
        }
        match op {
            Op::Clone | Op::CloneFrom | Op::SwapWith => {}
            _ => {
                check_capacity(&d1, cap1);
                check_capacity(&d2, cap2);
            }
        }
    }
}
