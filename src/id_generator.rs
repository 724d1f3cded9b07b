/// Sequential id source owned by a single canvas.
///
/// Each canvas keeps its own generators, so two canvases in one process never
/// share a counter.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator {
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    pub fn generate(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The id the next call to `generate` will return.
    pub fn peek(&self) -> u64 {
        self.next
    }
}
