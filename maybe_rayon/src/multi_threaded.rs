pub use rayon::{
    current_num_threads,
    iter::{IndexedParallelIterator, ParallelIterator},
    join,
    slice::{Chunks, ChunksMut, ParallelSlice, ParallelSliceMut},
};

use crate::chunk_size;

pub trait MaybeParallelSlice<T: Sync> {
    fn maybe_par_chunks(&self, chunk_size: usize) -> Chunks<'_, T>;
}

pub trait MaybeParallelSliceMut<T: Send> {
    fn maybe_par_chunks_mut(&mut self, chunk_size: usize) -> ChunksMut<'_, T>;
}

impl<T: Sync> MaybeParallelSlice<T> for [T] {
    fn maybe_par_chunks(&self, chunk_size: usize) -> Chunks<'_, T> {
        self.par_chunks(chunk_size)
    }
}

impl<T: Send> MaybeParallelSliceMut<T> for [T] {
    fn maybe_par_chunks_mut(&mut self, chunk_size: usize) -> ChunksMut<'_, T> {
        self.par_chunks_mut(chunk_size)
    }
}

/// Splits `values` into at most `num_workers` contiguous chunks and calls
/// `op(start, chunk)` on each of them, where `start` is the index of the
/// first element of `chunk` in `values`.
///
/// Returns once every chunk has been processed. A panic in any chunk is
/// propagated to the caller.
pub fn execute<T, OP>(values: &mut [T], num_workers: usize, op: OP)
where
    T: Send,
    OP: Fn(usize, &mut [T]) + Sync + Send,
{
    let size = chunk_size(values.len(), num_workers);
    if size >= values.len() {
        op(0, values);
        return;
    }

    values
        .par_chunks_mut(size)
        .enumerate()
        .for_each(|(chunk_index, chunk)| op(chunk_index * size, chunk));
}
