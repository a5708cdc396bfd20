//! Chunked builder for sequences that may be very large.
//!
//! The first chunk is resized in place until it reaches the configured resize
//! limit. After that, full chunks are never copied again: new chunks are
//! appended, each as large as everything collected so far (capped by the
//! configured maximum), and the chunks are concatenated once on finalize.

use lazyseq_core::QueryConfig;

#[derive(Debug)]
pub struct LargeArrayBuilder<T> {
    first: Vec<T>,
    chunks: Vec<Vec<T>>,
    count: usize,
    starting_capacity: usize,
    resize_limit: usize,
    max_capacity: usize,
}

impl<T> LargeArrayBuilder<T> {
    pub fn new() -> Self {
        Self::with_config(QueryConfig::global())
    }

    pub fn with_config(cfg: &QueryConfig) -> Self {
        Self {
            first: Vec::new(),
            chunks: Vec::new(),
            count: 0,
            starting_capacity: cfg.buffer_starting_capacity,
            resize_limit: cfg.buffer_resize_limit,
            max_capacity: cfg.buffer_max_capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of chunks allocated beyond the first.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn add(&mut self, item: T) {
        let current = self.chunks.last().unwrap_or(&self.first);
        if current.len() == current.capacity() {
            self.allocate();
        }
        match self.chunks.last_mut() {
            Some(chunk) => chunk.push(item),
            None => self.first.push(item),
        }
        self.count += 1;
    }

    pub fn add_range(&mut self, items: impl IntoIterator<Item = T>) {
        for item in items {
            self.add(item);
        }
    }

    fn allocate(&mut self) {
        if self.count < self.resize_limit {
            let next = if self.count == 0 {
                self.starting_capacity
            } else {
                self.count.saturating_mul(2)
            };
            let next = next.min(self.max_capacity).max(self.count + 1);
            self.first.reserve_exact(next - self.first.len());
        } else {
            let next = self
                .count
                .min(self.max_capacity.saturating_sub(self.count))
                .max(1);
            #[cfg(feature = "tracing")]
            tracing::trace!(count = self.count, chunk = next, "large array builder chunk");
            self.chunks.push(Vec::with_capacity(next));
        }
    }

    /// Concatenate chunk by chunk into one exact-length vector. With no extra
    /// chunks the first chunk is returned as is.
    pub fn into_vec(mut self) -> Vec<T> {
        if self.chunks.is_empty() {
            return self.first;
        }
        let mut out = Vec::with_capacity(self.count);
        out.append(&mut self.first);
        for mut chunk in self.chunks {
            out.append(&mut chunk);
        }
        out
    }

    pub fn into_boxed_slice(self) -> Box<[T]> {
        self.into_vec().into_boxed_slice()
    }
}

impl<T> Default for LargeArrayBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for LargeArrayBuilder<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_range(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_chunk_grows_until_resize_limit() {
        let mut b = LargeArrayBuilder::with_config(&QueryConfig::default());
        b.add_range(0..8);
        assert_eq!(b.chunk_count(), 0);
        b.add(8);
        assert_eq!(b.chunk_count(), 1);
    }

    #[test]
    fn chunks_double_geometrically() {
        let mut b = LargeArrayBuilder::with_config(&QueryConfig::default());
        // 8 in first, then chunks of 8, 16, 32.
        b.add_range(0..64);
        assert_eq!(b.chunk_count(), 3);
        b.add(64);
        assert_eq!(b.chunk_count(), 4);
    }

    #[test]
    fn into_vec_preserves_order_across_chunks() {
        let mut b = LargeArrayBuilder::with_config(&QueryConfig::default());
        b.add_range(0..1000);
        let v = b.into_vec();
        assert_eq!(v.len(), 1000);
        assert!(v.iter().copied().eq(0..1000));
        assert_eq!(v.capacity(), 1000);
    }

    #[test]
    fn max_capacity_caps_chunk_size() {
        let cfg = QueryConfig {
            buffer_max_capacity: 12,
            ..QueryConfig::default()
        };
        let mut b = LargeArrayBuilder::with_config(&cfg);
        b.add_range(0..12);
        assert_eq!(b.chunk_count(), 1);
        assert_eq!(b.into_vec().len(), 12);
    }
}
