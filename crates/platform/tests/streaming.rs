use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

use retroport::StreamingCache;

static FILE_COUNTER: AtomicU32 = AtomicU32::new(0);

fn temp_file(contents: &[u8]) -> PathBuf {
    let n = FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "retroport-stream-{}-{}.bin",
        std::process::id(),
        n
    ));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn file_shorter_than_window_is_zero_padded() {
    let data: Vec<u8> = (0..100).map(|i| (i % 251) as u8 + 1).collect();
    let path = temp_file(&data);

    let mut cache = StreamingCache::new();
    cache.open(&path).unwrap();
    assert_eq!(cache.path(), Some(path.as_path()));

    let window = cache.next(150).unwrap();
    assert_eq!(window.len(), 150);
    assert_eq!(&window[..100], &data[..]);
    assert!(window[100..].iter().all(|&b| b == 0));

    fs::remove_file(path).unwrap();
}

#[test]
fn sequential_windows_then_reopen() {
    let first: Vec<u8> = (0..1000u32).map(|i| (i % 200) as u8).collect();
    let second = vec![0x5Au8; 64];
    let a = temp_file(&first);
    let b = temp_file(&second);

    let mut cache = StreamingCache::new();
    cache.open(&a).unwrap();

    let mut collected = Vec::new();
    for _ in 0..4 {
        collected.extend_from_slice(cache.next(300).unwrap());
    }
    assert_eq!(&collected[..1000], &first[..]);
    assert!(collected[1000..].iter().all(|&b| b == 0));
    assert_eq!(cache.grow_count(), 1);

    cache.open(&b).unwrap();
    assert_eq!(cache.next(64).unwrap(), &second[..]);
    assert_eq!(cache.working_capacity(), 300);
    assert_eq!(cache.grow_count(), 1);

    fs::remove_file(a).unwrap();
    fs::remove_file(b).unwrap();
}
