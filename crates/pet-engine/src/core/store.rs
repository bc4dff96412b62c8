/// Ordered particle storage using a flat Vec.
/// Designed for small particle counts (tens to hundreds, not millions).
///
/// Insertion order is preserved. Removal shifts later elements down, so the
/// frame loop walks indices in reverse: removing index `i` never moves an
/// element the walk has yet to visit.
#[derive(Debug, Clone)]
pub struct ParticleStore<T> {
    items: Vec<T>,
}

impl<T> ParticleStore<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(64),
        }
    }

    /// Append a particle at the end of the sequence.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove the particle at `index`, keeping the order of the rest.
    /// Returns `None` if the index is out of range.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// The stored particles as a slice, in insertion order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Mutable slice access, used by the pairwise collision pass.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Take every particle out of the store, leaving it empty.
    pub fn drain(&mut self) -> Vec<T> {
        std::mem::take(&mut self.items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for ParticleStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
