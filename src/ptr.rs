use core::alloc::Layout;
use core::ptr::NonNull;
use allocator_api2::alloc::Allocator;
use crate::Fail;

#[inline(always)]
pub(crate) fn from_mut_ref<T>(x: &mut T) -> NonNull<T> {
  NonNull::from(x)
}

#[inline(always)]
pub(crate) unsafe fn as_ref<'a, T>(x: NonNull<T>) -> &'a T {
  &*x.as_ptr()
}

#[inline(always)]
pub(crate) unsafe fn as_mut_ref<'a, T>(x: NonNull<T>) -> &'a mut T {
  &mut *x.as_ptr()
}

#[inline(always)]
pub(crate) unsafe fn write<T>(x: NonNull<T>, y: T) {
  x.as_ptr().write(y)
}

#[inline(always)]
pub(crate) unsafe fn read<T>(x: NonNull<T>) -> T {
  x.as_ptr().read()
}

// `T` must not be zero-sized.

#[inline(always)]
pub(crate) fn alloc<T, A, E>(allocator: &A) -> Result<NonNull<T>, E>
where
  A: Allocator,
  E: Fail,
{
  let layout = Layout::new::<T>();

  match allocator.allocate(layout) {
    Ok(p) => Ok(p.cast()),
    Err(_) => E::fail(layout),
  }
}

// SAFETY:
//
// `x` must have been returned by `alloc::<T, _, _>` on `allocator` or on a
// clone of it, and must not be used afterwards.

#[inline(always)]
pub(crate) unsafe fn dealloc<T, A>(allocator: &A, x: NonNull<T>)
where
  A: Allocator,
{
  allocator.deallocate(x.cast(), Layout::new::<T>())
}
