use core::fmt;
use core::hash::Hash;
use core::hash::Hasher;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ptr::NonNull;
use core::sync::atomic::AtomicUsize;
use core::sync::atomic::Ordering;
use core::sync::atomic::fence;
use allocator_api2::alloc::Allocator;
use allocator_api2::alloc::Global;
use crate::AllocError;
use crate::Fail;
use crate::Panicked;
use crate::ptr;
use crate::unwrap;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PUBLIC TYPE AND TRAIT DEFINITIONS                                          //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

/// A persistent singly-linked list.
///
/// Lists are never mutated. [`prepend`](List::prepend) allocates one node
/// whose tail is the list it was called on, so any number of lists can share
/// a common suffix. Nodes are reference counted and are freed when the last
/// list that reaches them is dropped.
///
/// Cloning a list is O(1).
///
/// ```
/// let a = consort::empty().prepend(1).prepend(2);
/// let b = a.prepend(3);
///
/// assert_eq!(format!("{:?}", b), "[3, 2, 1]");
/// assert!(b.tail().unwrap().ptr_eq(&a));
/// ```

pub struct List<T, A: Allocator + Clone = Global> {
  node: Option<NonNull<Node<T, A>>>,
  allocator: A,
  marker: PhantomData<T>,
}

/// The empty list, without an element type.
///
/// Every empty [`List`] compares equal to `Nil`, whatever its element type,
/// and both print as `[]`.
///
/// ```
/// use consort::List;
/// use consort::Nil;
///
/// assert!(List::<String>::new() == Nil);
/// assert!(List::<u64>::from(Nil) == Nil);
/// ```
///
/// Because a list can be compared both with other lists of any compatible
/// element type and with `Nil`, comparing against an unannotated
/// `List::new()` is ambiguous. Name the element type, or compare with `Nil`:
///
/// ```
/// use consort::List;
/// use consort::Nil;
///
/// let x = List::<i32>::new();
/// assert!(x == List::<i32>::new());
/// assert!(x == Nil);
/// ```
///
/// ```compile_fail
/// let x = consort::List::<i32>::new();
/// let _ = x == consort::List::new();
/// ```

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Nil;

/// An iterator over the elements of a [`List`], head first.

pub struct Iter<'a, T, A: Allocator + Clone = Global> {
  list: &'a List<T, A>,
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PRIVATE TYPE AND TRAIT DEFINITIONS                                         //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

struct Node<T, A: Allocator + Clone> {
  count: AtomicUsize,
  head: T,
  tail: List<T, A>,
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// CONSTANTS                                                                  //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

const MAX_COUNT: usize = isize::MAX as usize;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// List                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

// SAFETY:
//
// Nodes are only ever read after construction and the reference count is
// atomic, so a list may be shared the way an `Arc` may.

unsafe impl<T, A> Send for List<T, A>
where
  T: Send + Sync,
  A: Allocator + Clone + Send + Sync,
{ }

unsafe impl<T, A> Sync for List<T, A>
where
  T: Send + Sync,
  A: Allocator + Clone + Send + Sync,
{ }

fn prepend<T, A, E>(list: &List<T, A>, value: T) -> Result<List<T, A>, E>
where
  A: Allocator + Clone,
  E: Fail,
{
  let p = ptr::alloc::<Node<T, A>, A, E>(&list.allocator)?;

  let node = Node {
    count: AtomicUsize::new(1),
    head: value,
    tail: list.clone(),
  };

  unsafe { ptr::write(p, node) };

  Ok(List { node: Some(p), allocator: list.allocator.clone(), marker: PhantomData })
}

// Builds a list front to back, calling `next` on `items` exactly once per
// element. Each new node starts with an empty tail which is then patched to
// point at the next node. The nodes are not reachable from anywhere else
// until the list is returned.

fn build<T, A, E, I>(items: I, allocator: A) -> Result<List<T, A>, E>
where
  A: Allocator + Clone,
  E: Fail,
  I: IntoIterator<Item = T>,
{
  let mut list = List::new_in(allocator);
  let mut hole = ptr::from_mut_ref(&mut list.node);

  for x in items {
    let p = ptr::alloc::<Node<T, A>, A, E>(&list.allocator)?;

    let node = Node {
      count: AtomicUsize::new(1),
      head: x,
      tail: List::new_in(list.allocator.clone()),
    };

    unsafe { ptr::write(p, node) };
    unsafe { ptr::write(hole, Some(p)) };

    hole = ptr::from_mut_ref(&mut unsafe { ptr::as_mut_ref(p) }.tail.node);
  }

  Ok(list)
}

impl<T> List<T> {
  /// Returns the empty list backed by the global allocator. Does not
  /// allocate.

  #[inline(always)]
  pub const fn new() -> Self {
    Self { node: None, allocator: Global, marker: PhantomData }
  }
}

impl<T, A: Allocator + Clone> List<T, A> {
  /// Returns the empty list whose nodes will be allocated with the given
  /// allocator. Does not allocate.

  #[inline(always)]
  pub fn new_in(allocator: A) -> Self {
    Self { node: None, allocator, marker: PhantomData }
  }

  /// Builds a list whose nodes are allocated with the given allocator. The
  /// first item becomes the head.
  ///
  /// # Panics
  ///
  /// Diverges through [`handle_alloc_error`](alloc::alloc::handle_alloc_error)
  /// on failure to allocate memory.

  pub fn from_iter_in<I>(items: I, allocator: A) -> Self
  where
    I: IntoIterator<Item = T>
  {
    unwrap(build(items, allocator))
  }

  /// A reference to the allocator backing this list.

  #[inline(always)]
  pub fn allocator(&self) -> &A {
    &self.allocator
  }

  /// Returns a new list with `value` at its head and `self` as its tail.
  /// `self` is not modified.
  ///
  /// # Panics
  ///
  /// Diverges through [`handle_alloc_error`](alloc::alloc::handle_alloc_error)
  /// on failure to allocate memory.

  #[inline]
  pub fn prepend(&self, value: T) -> Self {
    unwrap(prepend(self, value))
  }

  /// Returns a new list with `value` at its head and `self` as its tail.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory. `value` is dropped.

  #[inline]
  pub fn try_prepend(&self, value: T) -> Result<Self, AllocError> {
    prepend(self, value)
  }

  /// The first element, or `None` if the list is empty.

  #[inline]
  pub fn head(&self) -> Option<&T> {
    self.uncons().map(|(x, _)| x)
  }

  /// Everything after the first element, or `None` if the list is empty.
  ///
  /// The returned list is the one the first node was prepended to, not a
  /// copy of it.

  #[inline]
  pub fn tail(&self) -> Option<&Self> {
    self.uncons().map(|(_, y)| y)
  }

  /// The head and tail together, or `None` if the list is empty.

  #[inline]
  pub fn uncons(&self) -> Option<(&T, &Self)> {
    let p = self.node?;
    let n = unsafe { ptr::as_ref(p) };
    Some((&n.head, &n.tail))
  }

  /// Returns `true` if the list has no elements.

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.node.is_none()
  }

  /// The number of elements. This walks the list.

  pub fn len(&self) -> usize {
    self.iter().count()
  }

  /// Returns `true` if both lists start at the same node, or are both
  /// empty.

  #[inline(always)]
  pub fn ptr_eq(&self, other: &Self) -> bool {
    self.node == other.node
  }

  /// Iterates over the elements, head first.

  #[inline(always)]
  pub fn iter(&self) -> Iter<'_, T, A> {
    Iter { list: self }
  }

  /// Returns a new list holding `f` applied to each element, in the same
  /// order. `f` is called exactly once per element, head first.
  ///
  /// # Panics
  ///
  /// Diverges through [`handle_alloc_error`](alloc::alloc::handle_alloc_error)
  /// on failure to allocate memory.

  pub fn map<U, F>(&self, f: F) -> List<U, A>
  where
    F: FnMut(&T) -> U
  {
    unwrap(build(self.iter().map(f), self.allocator.clone()))
  }

  /// Returns a new list holding `f` applied to each element, in the same
  /// order.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory. `f` will have been
  /// called on a prefix of the list.

  pub fn try_map<U, F>(&self, f: F) -> Result<List<U, A>, AllocError>
  where
    F: FnMut(&T) -> U
  {
    build(self.iter().map(f), self.allocator.clone())
  }
}

impl<T, A: Allocator + Clone> Clone for List<T, A> {
  #[inline]
  fn clone(&self) -> Self {
    if let Some(p) = self.node {
      let n = unsafe { ptr::as_ref(p) };
      let k =
        n.count.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |k| {
          if k < MAX_COUNT { Some(k + 1) } else { None }
        });

      // The count is left untouched on overflow.

      if k.is_err() {
        panic!("consort: reference count overflow");
      }
    }

    Self { node: self.node, allocator: self.allocator.clone(), marker: PhantomData }
  }
}

impl<T, A: Allocator + Clone> Drop for List<T, A> {
  fn drop(&mut self) {
    // Walks forward instead of recursing into the tail, so that dropping a
    // long list uses constant stack space.

    let mut next = self.node.take();

    while let Some(p) = next {
      if unsafe { ptr::as_ref(p) }.count.fetch_sub(1, Ordering::Release) != 1 {
        return;
      }

      fence(Ordering::Acquire);

      let Node { head, mut tail, .. } = unsafe { ptr::read(p) };

      unsafe { ptr::dealloc(&self.allocator, p) };

      next = tail.node.take();

      drop(head);
    }
  }
}

impl<T> Default for List<T> {
  #[inline(always)]
  fn default() -> Self {
    Self::new()
  }
}

impl<T> From<Nil> for List<T> {
  #[inline(always)]
  fn from(_: Nil) -> Self {
    Self::new()
  }
}

impl<T> FromIterator<T> for List<T> {
  fn from_iter<I>(items: I) -> Self
  where
    I: IntoIterator<Item = T>
  {
    unwrap(build::<_, _, Panicked, _>(items, Global))
  }
}

impl<'a, T, A: Allocator + Clone> IntoIterator for &'a List<T, A> {
  type Item = &'a T;
  type IntoIter = Iter<'a, T, A>;

  #[inline(always)]
  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<T, U, A, B> PartialEq<List<U, B>> for List<T, A>
where
  T: PartialEq<U>,
  A: Allocator + Clone,
  B: Allocator + Clone,
{
  fn eq(&self, other: &List<U, B>) -> bool {
    let mut x = self.iter();
    let mut y = other.iter();

    loop {
      match (x.next(), y.next()) {
        (None, None) => return true,
        (Some(a), Some(b)) if a == b => continue,
        _ => return false,
      }
    }
  }
}

impl<T: Eq, A: Allocator + Clone> Eq for List<T, A> { }

impl<T, A: Allocator + Clone> PartialEq<Nil> for List<T, A> {
  #[inline(always)]
  fn eq(&self, _: &Nil) -> bool {
    self.is_empty()
  }
}

impl<T: Hash, A: Allocator + Clone> Hash for List<T, A> {
  fn hash<H: Hasher>(&self, state: &mut H) {
    state.write_usize(self.len());

    for x in self {
      x.hash(state);
    }
  }
}

impl<T: fmt::Debug, A: Allocator + Clone> fmt::Debug for List<T, A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.iter()).finish()
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Nil                                                                        //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl<T, A: Allocator + Clone> PartialEq<List<T, A>> for Nil {
  #[inline(always)]
  fn eq(&self, other: &List<T, A>) -> bool {
    other.is_empty()
  }
}

impl fmt::Debug for Nil {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("[]")
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Iter                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl<'a, T, A: Allocator + Clone> Iterator for Iter<'a, T, A> {
  type Item = &'a T;

  #[inline]
  fn next(&mut self) -> Option<&'a T> {
    let list = self.list;
    let (x, y) = list.uncons()?;
    self.list = y;
    Some(x)
  }
}

impl<'a, T, A: Allocator + Clone> FusedIterator for Iter<'a, T, A> { }

impl<'a, T, A: Allocator + Clone> Clone for Iter<'a, T, A> {
  #[inline(always)]
  fn clone(&self) -> Self {
    Self { list: self.list }
  }
}

impl<'a, T: fmt::Debug, A: Allocator + Clone> fmt::Debug for Iter<'a, T, A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Iter").field(self.list).finish()
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// TESTS                                                                      //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////
