#![no_main]

use std::collections::HashMap;

use libfuzzer_sys::fuzz_target;
use lookupkit::prelude::*;

// Fuzz arbitrary operation sequences on LookupTable
//
// Tests random sequences of store, fetch, delete, has_key, invalid-key and
// collection operations against a HashMap model.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut state = State::new();
    let mut table = LookupTable::new(&mut state, usize::from(data[0]));
    let mut model: HashMap<u8, i64> = HashMap::new();

    let mut idx = 1;
    while idx + 1 < data.len() {
        let op = data[idx] % 7;
        let k = data[idx + 1];
        let name = format!("k{k}");

        match op {
            0 | 1 => {
                // store
                let value = i64::from(k) * 3 + i64::from(op);
                assert_eq!(table.store(&mut state, name, value), Ok(Value::Int(value)));
                model.insert(k, value);
            },
            2 => {
                // fetch
                let expected = model.get(&k).map(|v| Value::Int(*v));
                assert_eq!(table.fetch(&mut state, name), Ok(expected));
            },
            3 => {
                // delete
                let expected = model.remove(&k).map(Value::Int);
                assert_eq!(table.delete(&mut state, name), Ok(expected));
            },
            4 => {
                // has_key via symbol
                let sym = state.intern(&name);
                assert_eq!(table.has_key(&mut state, sym), Ok(model.contains_key(&k)));
            },
            5 => {
                // invalid key
                let before = table.len();
                assert!(table.store(&mut state, i64::from(k), 0).is_err());
                assert!(table.delete(&mut state, Value::Nil).is_err());
                assert_eq!(table.len(), before);
            },
            6 => {
                // collect
                state.heap.collect(&[table.root()]);
                assert_eq!(state.heap.live_records(), 1 + table.len());
            },
            _ => unreachable!(),
        }

        // Basic invariants
        assert_eq!(table.len(), model.len());
        assert!(table.bin_count().is_power_of_two());
        assert_eq!(table.keys(&state).len(), table.values(&state).len());

        idx += 2;
    }

    table.check_invariants(&state).unwrap();
});
