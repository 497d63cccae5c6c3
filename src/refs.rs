use pdf_writer::Ref;

/// Hands out PDF object ids in increasing order while a document is written
#[derive(Debug)]
pub(crate) struct RefAllocator {
    next_id: i32,
}

impl RefAllocator {
    pub(crate) fn new() -> RefAllocator {
        RefAllocator { next_id: 1 }
    }

    pub(crate) fn next(&mut self) -> Ref {
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Allocate `count` ids at once, e.g. for the page tree kids
    pub(crate) fn take(&mut self, count: usize) -> Vec<Ref> {
        (0..count).map(|_| self.next()).collect()
    }
}
