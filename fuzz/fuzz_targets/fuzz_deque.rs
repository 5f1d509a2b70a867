#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;

use tessera_collections::Deque;

fuzz_target!(|data: &[u8]| {
    let mut deque = Deque::new();
    let mut model = VecDeque::new();

    for (step, pair) in data.chunks_exact(2).enumerate() {
        let (op, arg) = (pair[0], usize::from(pair[1]));
        match op % 8 {
            0 => {
                deque.push_back(step);
                model.push_back(step);
            }
            1 => {
                deque.push_front(step);
                model.push_front(step);
            }
            2 => assert_eq!(deque.pop_back(), model.pop_back()),
            3 => assert_eq!(deque.pop_front(), model.pop_front()),
            4 => {
                let index = arg % (model.len() + 1);
                deque.insert(index, step);
                model.insert(index, step);
            }
            5 => assert_eq!(deque.remove(arg), model.remove(arg)),
            6 => assert_eq!(deque.get(arg), model.get(arg)),
            _ => {
                deque.clear();
                model.clear();
            }
        }
        assert_eq!(deque.len(), model.len());
    }

    assert!(deque.iter().eq(model.iter()));
    assert!(deque.iter().rev().eq(model.iter().rev()));
});
