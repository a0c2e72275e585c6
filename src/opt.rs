/// An optional value.
///
/// Unlike [`Option`], this type names its variants after what they mean for
/// the holder: a value is either present or absent. [`Opt::Absent`] carries
/// no data, so the same constant serves as `Opt<T>` for every `T`.
///
/// ```
/// use consort::Opt;
///
/// let x = Opt::present(1).map(|x| x + 1);
/// assert_eq!(x.get(), Some(2));
///
/// let y: Opt<i32> = Opt::ABSENT;
/// assert_eq!(y.map(|x| x + 1).get(), None);
/// ```

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Opt<T> {
  /// No value.
  Absent,
  /// Exactly one value.
  Present(T),
}

impl<T> Opt<T> {
  /// The absent value.

  pub const ABSENT: Self = Self::Absent;

  /// Wraps a value.

  #[inline(always)]
  pub const fn present(value: T) -> Self {
    Self::Present(value)
  }

  /// Returns the absent value.

  #[inline(always)]
  pub const fn absent() -> Self {
    Self::Absent
  }

  /// Applies `f` to a present value. On an absent value `f` is not called.

  #[inline]
  pub fn map<U, F>(self, f: F) -> Opt<U>
  where
    F: FnOnce(T) -> U
  {
    match self {
      Self::Present(x) => Opt::Present(f(x)),
      Self::Absent => Opt::Absent,
    }
  }

  /// Returns the contained value, or `None` if it is absent.

  #[inline]
  pub fn get(self) -> Option<T> {
    match self {
      Self::Present(x) => Some(x),
      Self::Absent => None,
    }
  }

  /// Borrows the contained value.

  #[inline]
  pub const fn as_ref(&self) -> Opt<&T> {
    match self {
      Self::Present(x) => Opt::Present(x),
      Self::Absent => Opt::Absent,
    }
  }

  /// Returns `true` for a present value.

  #[inline]
  pub const fn is_present(&self) -> bool {
    matches!(self, Self::Present(_))
  }

  /// Returns `true` for the absent value.

  #[inline]
  pub const fn is_absent(&self) -> bool {
    matches!(self, Self::Absent)
  }
}

impl<T> Default for Opt<T> {
  #[inline(always)]
  fn default() -> Self {
    Self::Absent
  }
}

impl<T> From<Option<T>> for Opt<T> {
  #[inline]
  fn from(x: Option<T>) -> Self {
    match x {
      Some(x) => Self::Present(x),
      None => Self::Absent,
    }
  }
}

impl<T> From<Opt<T>> for Option<T> {
  #[inline]
  fn from(x: Opt<T>) -> Self {
    x.get()
  }
}
