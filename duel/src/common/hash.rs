/// Fast, non-cryptographic hash map.
pub type FastHashMap<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;

/// Fast, non-cryptographic hash set.
pub type FastHashSet<T> = std::collections::HashSet<T, ahash::RandomState>;
