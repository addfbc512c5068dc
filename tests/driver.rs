#![allow(clippy::unwrap_used, clippy::missing_docs_in_private_items)]

use std::sync::{Arc, Mutex};
use std::thread;

use chainmap::{ChainedHashMap, TableError};

fn init_test_logger() {
    let _ = env_logger::builder().filter_level(log::LevelFilter::Trace).is_test(true).try_init();
}

fn fill_sample(map: &mut ChainedHashMap<&'static str>) -> Result<(), TableError> {
    map.set("apple", "red")?;
    map.set("banana", "yellow")?;
    map.set("carrot", "orange")?;
    map.set("dog", "brown")?;
    map.set("elephant", "gray")?;
    map.set("frog", "green")?;
    map.set("grape", "purple")?;
    map.set("hat", "black")?;
    map.set("ice cream", "white")?;
    map.set("jacket", "blue")?;
    map.set("kite", "pink")?;
    map.set("lion", "golden")?;
    Ok(())
}

#[test]
fn sample_session() -> Result<(), TableError> {
    init_test_logger();
    let mut map = ChainedHashMap::new();
    fill_sample(&mut map)?;
    assert_eq!(map.len(), 12);
    assert_eq!(map.capacity(), 16);

    // Overwrites neither grow the count nor the table
    assert_eq!(map.set("apple", "green")?, Some("red"));
    assert_eq!(map.set("banana", "brown")?, Some("yellow"));
    assert_eq!(map.len(), 12);
    assert_eq!(map.capacity(), 16);

    // 13 / 16 > 0.75
    map.set("moon", "silver")?;
    assert_eq!(map.len(), 13);
    assert_eq!(map.capacity(), 32);

    assert_eq!(map.get("apple")?, Some(&"green"));
    assert_eq!(map.get("banana")?, Some(&"brown"));
    assert_eq!(map.get("moon")?, Some(&"silver"));
    assert_eq!(map.get("lion")?, Some(&"golden"));

    let keys = map.keys();
    let values = map.values();
    let entries = map.entries();
    assert_eq!(keys.len(), 13);
    assert_eq!(values.len(), 13);
    for ((key, value), (entry_key, entry_value)) in keys.iter().zip(&values).zip(&entries) {
        assert_eq!(key, entry_key);
        assert_eq!(value, entry_value);
        assert_eq!(map.get(key)?, Some(entry_value));
    }

    let dump = map.to_string();
    assert!(dump.starts_with("ChainedHashMap contents:\n"));
    assert_eq!(dump.lines().count(), 1 + map.bucket_lengths().iter().filter(|&&n| n > 0).count());
    assert!(dump.contains("(\"moon\", \"silver\")"));
    Ok(())
}

#[test]
fn clear_then_reuse() -> Result<(), TableError> {
    init_test_logger();
    let mut map = ChainedHashMap::new();
    fill_sample(&mut map)?;
    map.set("moon", "silver")?;

    map.clear();
    assert_eq!(map.len(), 0);
    assert!(map.keys().is_empty());
    assert_eq!(map.capacity(), 32);

    map.set("sun", "yellow")?;
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("sun")?, Some(&"yellow"));
    assert_eq!(map.get("apple")?, None);
    Ok(())
}

#[test]
fn remove_never_shrinks() -> Result<(), TableError> {
    let mut map = ChainedHashMap::new();
    for i in 0..100 {
        map.set(&format!("key-{i}"), i)?;
    }
    let grown = map.capacity();
    assert!(grown > 16);

    for i in 0..100 {
        assert!(map.remove(&format!("key-{i}"))?);
    }
    assert!(map.is_empty());
    assert_eq!(map.capacity(), grown);
    Ok(())
}

#[test]
fn shared_behind_a_mutex() {
    let map = Arc::new(Mutex::new(ChainedHashMap::new()));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                for i in 0..50 {
                    map.lock().unwrap().set(&format!("t{t}-{i}"), i).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let map = map.lock().unwrap();
    assert_eq!(map.len(), 200);
    assert_eq!(map.get("t3-49").unwrap(), Some(&49));
}
