//! Bucketed map for accumulating values from many threads.
//!
//! Keys are spread over a fixed number of buckets by `key mod bucket_count`;
//! each bucket is an ordered map behind its own mutex, so writers touching
//! different buckets never contend and no global lock exists.

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use std::collections::BTreeMap;

/// Integer-like keys that can pick their bucket.
pub trait BucketKey: Ord + Copy {
    fn bucket(&self, bucket_count: usize) -> usize;
}

macro_rules! impl_bucket_key {
    ($($t:ty),*) => {
        $(impl BucketKey for $t {
            #[inline]
            fn bucket(&self, bucket_count: usize) -> usize {
                // Negative keys wrap like an unsigned cast.
                (*self as u64 % bucket_count as u64) as usize
            }
        })*
    };
}

impl_bucket_key!(i32, i64, u32, u64, usize);

pub struct ConcurrentMap<K, V> {
    buckets: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K: BucketKey, V> ConcurrentMap<K, V> {
    /// # Panics
    /// If `bucket_count` is zero.
    pub fn new(bucket_count: usize) -> Self {
        assert!(bucket_count > 0, "bucket count must be positive");
        Self { buckets: (0..bucket_count).map(|_| Mutex::new(BTreeMap::new())).collect() }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn bucket_for(&self, key: &K) -> &Mutex<BTreeMap<K, V>> {
        &self.buckets[key.bucket(self.buckets.len())]
    }

    /// Locks the key's bucket and hands out the value, inserting a default
    /// one if absent. The lock is released when the guard drops.
    pub fn access(&self, key: K) -> MappedMutexGuard<'_, V>
    where
        V: Default,
    {
        let guard = self.bucket_for(&key).lock();
        MutexGuard::map(guard, |bucket| bucket.entry(key).or_default())
    }

    pub fn erase(&self, key: &K) -> Option<V> {
        self.bucket_for(key).lock().remove(key)
    }

    /// Drains every bucket, one lock at a time, into a single ordered map.
    pub fn build_ordinary_map(&self) -> BTreeMap<K, V> {
        let mut result = BTreeMap::new();
        for bucket in &self.buckets {
            let mut values = bucket.lock();
            result.append(&mut values);
        }
        result
    }
}
