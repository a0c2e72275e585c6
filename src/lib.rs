#![doc = include_str!("../README.md")]
#![no_std]
#![cfg_attr(feature = "allocator_api", feature(allocator_api))]

extern crate alloc;

use core::alloc::Layout;
use core::fmt;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// SUBMODULES                                                                 //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

mod list;
mod opt;
mod ptr;
mod xor;

pub use list::Iter;
pub use list::List;
pub use list::Nil;
pub use opt::Opt;
pub use xor::Xor;

pub use allocator_api2::alloc::Allocator;
pub use allocator_api2::alloc::Global;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PUBLIC TYPE AND TRAIT DEFINITIONS                                          //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

/// The allocator backing a list refused to provide memory for a node.
///
/// Returned by the `try_` variants of the allocating list operations.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllocError;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PRIVATE TYPE AND TRAIT DEFINITIONS                                         //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

enum Panicked { }

trait Fail: Sized {
  fn fail<T>(layout: Layout) -> Result<T, Self>;
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// UTILITY FUNCTIONS                                                          //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

#[inline(always)]
fn unwrap<T>(x: Result<T, Panicked>) -> T {
  match x { Ok(x) => x, Err(e) => match e { } }
}

/// Returns the empty list backed by the global allocator.
///
/// No memory is allocated. Empty lists of every element type compare equal
/// to [`Nil`].

#[inline(always)]
pub const fn empty<T>() -> List<T> {
  List::new()
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Fail                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl Fail for Panicked {
  #[inline(never)]
  #[cold]
  fn fail<T>(layout: Layout) -> Result<T, Self> {
    log::error!("consort: node allocation of {} bytes failed", layout.size());
    alloc::alloc::handle_alloc_error(layout)
  }
}

impl Fail for AllocError {
  #[inline(never)]
  #[cold]
  fn fail<T>(layout: Layout) -> Result<T, Self> {
    log::debug!("consort: node allocation of {} bytes failed", layout.size());
    Err(AllocError)
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// AllocError                                                                 //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl fmt::Display for AllocError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("memory allocation failed")
  }
}

impl core::error::Error for AllocError { }
