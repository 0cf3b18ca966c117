// ==============================================
// CONCURRENT LOOKUP TABLE TESTS (integration)
// ==============================================
//
// ConcurrentLookupTable serializes every operation behind one lock. These
// tests hammer it from several threads and then check that counts, contents
// and structure are exactly what a serial run would give.

#![cfg(feature = "concurrency")]

use std::sync::{Arc, Barrier};
use std::thread;

use lookupkit::concurrent::ConcurrentLookupTable;
use lookupkit::value::Value;

const THREADS: usize = 8;
const PER_THREAD: usize = 200;

mod disjoint_writers {
    use super::*;

    #[test]
    fn every_store_lands_and_structure_stays_valid() {
        let table = Arc::new(ConcurrentLookupTable::new(0));
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let table = Arc::clone(&table);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..PER_THREAD {
                        let n = (t * PER_THREAD + i) as i64;
                        table.store(format!("t{t}_{i}"), n).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(table.len(), THREADS * PER_THREAD);
        for t in 0..THREADS {
            for i in 0..PER_THREAD {
                let n = (t * PER_THREAD + i) as i64;
                assert_eq!(table.fetch(format!("t{t}_{i}")), Ok(Some(Value::Int(n))));
            }
        }
        table.with_state_mut(|state, table| table.check_invariants(state).unwrap());
    }
}

mod mixed_churn {
    use super::*;

    #[test]
    fn interleaved_store_and_delete_keep_count_consistent() {
        let table = Arc::new(ConcurrentLookupTable::new(0));
        let barrier = Arc::new(Barrier::new(THREADS));

        // Each thread stores its own keys, then deletes the even ones.
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let table = Arc::clone(&table);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..PER_THREAD {
                        table.store(format!("t{t}_{i}"), i as i64).unwrap();
                    }
                    for i in (0..PER_THREAD).step_by(2) {
                        assert_eq!(
                            table.delete(format!("t{t}_{i}")),
                            Ok(Some(Value::Int(i as i64)))
                        );
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(table.len(), THREADS * PER_THREAD / 2);
        assert_eq!(table.keys().len(), table.values().len());
        for t in 0..THREADS {
            assert_eq!(table.has_key(format!("t{t}_0")), Ok(false));
            assert_eq!(table.has_key(format!("t{t}_1")), Ok(true));
        }
        table.with_state_mut(|state, table| {
            state.heap.collect(&[table.root()]);
            table.check_invariants(state).unwrap();
            assert_eq!(state.heap.live_records(), 1 + table.len());
        });
    }
}
