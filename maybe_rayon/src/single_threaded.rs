pub use std::slice::{Chunks, ChunksMut};

#[inline]
pub fn join<A, B, RA, RB>(oper_a: A, oper_b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    (oper_a(), oper_b())
}

/// Without the `multithreaded` feature, everything runs on the calling thread.
#[inline]
pub const fn current_num_threads() -> usize {
    1
}

/// Calls `op(0, values)`; the worker hint is ignored.
#[inline]
pub fn execute<T, OP>(values: &mut [T], _num_workers: usize, op: OP)
where
    T: Send,
    OP: Fn(usize, &mut [T]) + Sync + Send,
{
    op(0, values);
}

pub trait MaybeParallelSlice<T> {
    fn maybe_par_chunks(&self, chunk_size: usize) -> Chunks<'_, T>;
}

pub trait MaybeParallelSliceMut<T> {
    fn maybe_par_chunks_mut(&mut self, chunk_size: usize) -> ChunksMut<'_, T>;
}

impl<T: Sync> MaybeParallelSlice<T> for [T] {
    fn maybe_par_chunks(&self, chunk_size: usize) -> Chunks<'_, T> {
        self.chunks(chunk_size)
    }
}

impl<T: Send> MaybeParallelSliceMut<T> for [T] {
    fn maybe_par_chunks_mut(&mut self, chunk_size: usize) -> ChunksMut<'_, T> {
        self.chunks_mut(chunk_size)
    }
}
