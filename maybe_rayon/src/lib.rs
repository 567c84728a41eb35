#[cfg(feature = "multithreaded")]
mod multi_threaded;
#[cfg(not(feature = "multithreaded"))]
mod single_threaded;

#[cfg(feature = "multithreaded")]
pub use multi_threaded::*;
#[cfg(not(feature = "multithreaded"))]
pub use single_threaded::*;

pub mod prelude {
    #[cfg(feature = "multithreaded")]
    pub use rayon::prelude::*;

    pub use crate::*;
}

/// Returns the length of each contiguous chunk when `extent` elements are
/// split between `num_workers` workers.
///
/// The last chunk may be shorter. The result is never zero, so it can be
/// handed directly to `chunks_mut` and friends.
pub const fn chunk_size(extent: usize, num_workers: usize) -> usize {
    let num_workers = if num_workers == 0 { 1 } else { num_workers };
    let size = extent.div_ceil(num_workers);
    if size == 0 {
        1
    } else {
        size
    }
}
