#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::just_underscores_and_digits, clippy::len_without_is_empty)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
pub use error::{Error, Result};

mod utils;
pub(crate) use utils::helper;

mod tree;
pub use tree::{Iter, MedianTree};

mod running_median;
pub use running_median::{MedianPolicy, RunningMedian};

