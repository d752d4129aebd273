//! Switches the amplitude loops between sequential and rayon iterators depending on the
//! `parallel` feature. Every loop driven through these macros computes each output element from
//! an immutable input, so both variants produce identical results. Reductions go through
//! `chunks!` with a fixed chunk size and combine the partial sums in order.

/// Choose between iter_mut and par_iter_mut
#[cfg(not(feature = "parallel"))]
#[macro_export]
macro_rules! iter_mut {
    ($e:expr) => {
        $e.iter_mut()
    };
}

/// Choose between iter_mut and par_iter_mut
#[cfg(feature = "parallel")]
#[macro_export]
macro_rules! iter_mut {
    ($e:expr) => {
        $e.par_iter_mut()
    };
}

/// Choose between chunks and par_chunks
#[cfg(not(feature = "parallel"))]
#[macro_export]
macro_rules! chunks {
    ($e:expr, $size:expr) => {
        $e.chunks($size)
    };
}

/// Choose between chunks and par_chunks
#[cfg(feature = "parallel")]
#[macro_export]
macro_rules! chunks {
    ($e:expr, $size:expr) => {
        $e.par_chunks($size)
    };
}
