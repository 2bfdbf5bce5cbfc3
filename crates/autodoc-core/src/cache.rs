//! Content-keyed memo of parse results.
//!
//! The parser holds no state between calls; callers that re-parse the same
//! text (an editor redrawing, a browser moving its selection back and forth)
//! keep one of these and ask it instead.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::{InputShape, ParsedDoc, parse};

pub const DEFAULT_CAPACITY: usize = 64;

struct Entry {
    shape: InputShape,
    text: String,
    doc: Arc<ParsedDoc>,
}

/// Bounded cache of parses keyed by a hash of `(shape, text)`.
///
/// When full, the entry inserted first is evicted.
pub struct ParseCache {
    capacity: usize,
    entries: HashMap<u64, Entry>,
    order: VecDeque<u64>,
    hits: u64,
    misses: u64,
}

impl ParseCache {
    /// A cache holding at most `capacity` parses (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            hits: 0,
            misses: 0,
        }
    }

    pub fn get_or_parse(&mut self, text: &str, shape: InputShape) -> Arc<ParsedDoc> {
        let key = content_key(text, shape);

        if let Some(entry) = self.entries.get(&key) {
            if entry.shape == shape && entry.text == text {
                self.hits += 1;
                return Arc::clone(&entry.doc);
            }
            log::debug!("parse cache: hash collision on {key:#x}, replacing entry");
            self.remove(key);
        }

        self.misses += 1;
        let doc = Arc::new(parse(text, shape));
        self.insert(key, shape, text, Arc::clone(&doc));
        doc
    }

    fn insert(&mut self, key: u64, shape: InputShape, text: &str, doc: Arc<ParsedDoc>) {
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            log::trace!("parse cache: evicted {oldest:#x}");
        }
        self.entries.insert(
            key,
            Entry {
                shape,
                text: text.to_string(),
                doc,
            },
        );
        self.order.push_back(key);
    }

    fn remove(&mut self, key: u64) {
        self.entries.remove(&key);
        self.order.retain(|k| *k != key);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

fn content_key(text: &str, shape: InputShape) -> u64 {
    let mut hasher = DefaultHasher::new();
    shape.hash(&mut hasher);
    text.hash(&mut hasher);
    hasher.finish()
}
