//! Logging shims
//!
//! Forward to `defmt` when the `embedded` feature is enabled, otherwise
//! evaluate the arguments by reference and discard them.

#![allow(unused_macros)]

macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "embedded")]
            ::defmt::trace!($s $(, $x)*);
            #[cfg(not(feature = "embedded"))]
            #[allow(unused_parens)]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "embedded")]
            ::defmt::debug!($s $(, $x)*);
            #[cfg(not(feature = "embedded"))]
            #[allow(unused_parens)]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "embedded")]
            ::defmt::warn!($s $(, $x)*);
            #[cfg(not(feature = "embedded"))]
            #[allow(unused_parens)]
            let _ = ($( & $x ),*);
        }
    };
}
