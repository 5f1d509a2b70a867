//! Integration tests combining the containers, the allocators and the
//! numeric types.

use tessera_collections::{ContainerError, Deque, List};
use tessera_memory::{AllocError, BumpArena, StackAllocator, StackStorage};
use tessera_numeric::{BigInteger, Rational};

fn int(s: &str) -> BigInteger {
    s.parse().unwrap()
}

fn frac(s: &str) -> Rational {
    s.parse().unwrap()
}

#[test]
fn deque_of_big_integers_across_blocks() {
    let mut deque = Deque::new();
    let mut value = BigInteger::one();
    for _ in 0..20 {
        value *= &BigInteger::from(1_000_000_007u64);
        deque.push_back(value.clone());
        deque.push_front(-&value);
    }
    assert_eq!(deque.len(), 40);
    assert!(deque.block_count() >= 3);

    let total = deque
        .iter()
        .fold(BigInteger::zero(), |acc, n| acc + n);
    assert!(total.is_zero());

    assert_eq!(deque.back(), Some(&value));
    assert_eq!(deque.front(), Some(&-&value));
    assert_eq!(deque[19], int("-1000000007"));
    assert_eq!(deque[20], int("1000000007"));
}

#[test]
fn deque_drain_in_fifo_order() {
    let mut deque: Deque<Rational> = (1..=20i64)
        .map(|k| Rational::new(BigInteger::one(), BigInteger::from(k)))
        .collect();
    let mut sum = Rational::zero();
    let mut last = Rational::from(2);
    while let Some(r) = deque.pop_front() {
        assert!(r < last);
        sum += &r;
        last = r;
    }
    assert!(deque.is_empty());
    assert_eq!(sum.as_decimal(6), "3.597739");
}

#[test]
fn deque_checked_access_reports_index() {
    let deque: Deque<BigInteger> = Deque::with_default(3);
    match deque.at(3) {
        Err(ContainerError::IndexOutOfBounds { index, len }) => {
            assert_eq!((index, len), (3, 3));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(deque.iter().all(BigInteger::is_zero));
}

#[test]
fn deque_constructor_failure_leaves_contents() {
    let mut deque: Deque<BigInteger> = Deque::new();
    deque.push_back(int("5"));
    let err = deque
        .try_push_back_with(|| "9x".parse::<BigInteger>())
        .unwrap_err();
    assert!(matches!(err, ContainerError::Construct(_)));
    assert_eq!(deque.len(), 1);
    deque.try_push_front_with(|| "-9".parse::<BigInteger>()).unwrap();
    assert_eq!(
        deque.iter().map(ToString::to_string).collect::<Vec<_>>(),
        ["-9", "5"]
    );
}

#[test]
fn list_of_rationals_in_stack_arena() {
    let storage = StackStorage::<4096>::new();
    {
        let mut list: List<Rational, _> = List::new_in(StackAllocator::new(&storage));
        for s in ["1/2", "1/3", "1/6"] {
            list.push_back(frac(s)).unwrap();
        }
        let sum = list.iter().fold(Rational::zero(), |acc, r| acc + r);
        assert_eq!(sum, Rational::one());
        assert!(storage.used() > 0);

        let mut pos = list.begin();
        while pos != list.end() {
            if let Some(r) = list.get_mut(pos) {
                *r = -&*r;
            }
            pos = list.next(pos);
        }
        assert_eq!(list.front(), Some(&frac("-1/2")));
        assert_eq!(list.back(), Some(&frac("-1/6")));
    }
    assert_eq!(storage.used(), 0);
    let stats = storage.stats();
    assert_eq!(stats.allocations, 3);
    assert_eq!(stats.deallocations, 3);
    assert_eq!(stats.failures, 0);
}

#[test]
fn list_reports_exhausted_arena() {
    let storage = StackStorage::<256>::new();
    let mut list: List<BigInteger, _> = List::new_in(StackAllocator::new(&storage));
    let mut pushed = 0usize;
    let err = loop {
        match list.push_back(BigInteger::from(pushed)) {
            Ok(()) => pushed += 1,
            Err(err) => break err,
        }
    };
    assert!(pushed > 0);
    assert_eq!(list.len(), pushed);
    assert!(matches!(err.error(), AllocError::Exhausted { .. }));
    assert_eq!(err.into_inner(), BigInteger::from(pushed));
    assert_eq!(storage.stats().failures, 1);

    // Freeing the newest node makes room for exactly one more.
    list.pop_back();
    list.push_back(int("7")).unwrap();
    assert_eq!(list.back(), Some(&int("7")));
}

#[test]
fn two_lists_share_one_arena() {
    let storage = StackStorage::<2048>::new();
    let alloc = StackAllocator::<BigInteger, 2048>::new(&storage);
    let mut a = List::new_in(alloc);
    let mut b = List::new_in(alloc);
    a.push_back(int("1")).unwrap();
    b.push_back(int("2")).unwrap();
    assert_eq!(a.get_allocator(), b.get_allocator());

    let copy = a.try_clone().unwrap();
    assert_eq!(copy, a);
    assert_ne!(copy, b);
}

#[test]
fn list_in_bump_arena_holds_big_integers() {
    let arena = BumpArena::new();
    let mut list = List::new_in(arena.allocator::<BigInteger>());
    list.try_extend((0..50u64).map(|k| BigInteger::from(10u64).pow(u32::try_from(k).unwrap())))
        .unwrap();
    assert_eq!(list.len(), 50);
    assert!(arena.allocated_bytes() > 0);
    let digits: usize = list.iter().map(|n| n.to_string().len()).sum();
    assert_eq!(digits, (1..=50).sum::<usize>());
}

#[test]
fn heap_list_round_trips_through_deque() {
    let list = List::from_elem(3, &frac("2/4")).unwrap();
    let deque: Deque<Rational> = list.into_iter().collect();
    assert_eq!(deque.len(), 3);
    assert!(deque.iter().all(|r| r.to_string() == "1/2"));
}
