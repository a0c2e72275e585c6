use std::alloc::Layout;
use std::cell::Cell;
use std::ptr::NonNull;
use allocator_api2::alloc::AllocError as RawAllocError;
use allocator_api2::alloc::Global;
use bumpalo::Bump;
use expect_test::expect;
use consort::AllocError;
use consort::Allocator;
use consort::List;
use crate::Probe;

// Refuses every request.

#[derive(Clone, Copy)]
struct Refuse;

unsafe impl Allocator for Refuse {
  fn allocate(&self, _: Layout) -> Result<NonNull<[u8]>, RawAllocError> {
    Err(RawAllocError)
  }

  unsafe fn deallocate(&self, _: NonNull<u8>, _: Layout) {
    unreachable!()
  }
}

// Forwards to the global allocator until the shared budget runs out, and
// tracks how many blocks are live.

#[derive(Clone, Copy)]
struct Budget<'a> {
  left: &'a Cell<usize>,
  live: &'a Cell<usize>,
}

unsafe impl<'a> Allocator for Budget<'a> {
  fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, RawAllocError> {
    if self.left.get() == 0 {
      return Err(RawAllocError);
    }

    self.left.set(self.left.get() - 1);
    self.live.set(self.live.get() + 1);
    Global.allocate(layout)
  }

  unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
    self.live.set(self.live.get() - 1);
    Global.deallocate(ptr, layout)
  }
}

#[test]
fn test_bump() {
  let bump = Bump::new();
  let x = List::new_in(&bump).prepend(1).prepend(2).prepend(3);
  let y = x.map(|v| v * 10);
  let z = List::from_iter_in(["a", "b"], &bump);

  assert!(bump.allocated_bytes() > 0);
  assert!(x == consort::empty::<i32>().prepend(1).prepend(2).prepend(3));
  expect!["[30, 20, 10]"].assert_eq(&format!("{:?}", y));
  expect![[r#"["a", "b"]"#]].assert_eq(&format!("{:?}", z));
}

#[test]
fn test_refused_prepend() {
  let _ = env_logger::builder().is_test(true).try_init();

  let drops = Cell::new(0);
  let x = List::new_in(Refuse);
  assert!(x.try_prepend(Probe(&drops)).err() == Some(AllocError));
  assert!(drops.get() == 1);
  assert!(x.is_empty());
}

#[test]
fn test_refused_map() {
  let _ = env_logger::builder().is_test(true).try_init();

  let left = Cell::new(6);
  let live = Cell::new(0);
  let budget = Budget { left: &left, live: &live };

  let x = List::from_iter_in([1, 2, 3, 4], budget);
  assert!(live.get() == 4);

  let calls = Cell::new(0);
  let y = x.try_map(|v| { calls.set(calls.get() + 1); v + 1 });
  assert!(y.err() == Some(AllocError));
  assert!(calls.get() == 3);
  assert!(live.get() == 4);

  let z = x.try_prepend(0);
  assert!(z.is_err());

  drop(x);
  assert!(live.get() == 0);
}

#[test]
fn test_budget_reclaims() {
  let left = Cell::new(usize::MAX);
  let live = Cell::new(0);
  let budget = Budget { left: &left, live: &live };

  let a = List::new_in(budget).prepend(1).prepend(2);
  let b = a.prepend(3);
  let c = b.map(|v| v * 2);
  assert!(live.get() == 6);

  drop(b);
  assert!(live.get() == 5);
  drop(a);
  assert!(live.get() == 3);
  drop(c);
  assert!(live.get() == 0);
}

#[test]
fn test_alloc_error() {
  expect!["AllocError"].assert_eq(&format!("{:?}", AllocError));
  expect!["memory allocation failed"].assert_eq(&format!("{}", AllocError));
  let e: Box<dyn std::error::Error> = Box::new(AllocError);
  expect!["memory allocation failed"].assert_eq(&e.to_string());
}
