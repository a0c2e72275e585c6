/// A value of one of two types.
///
/// The right side is the one [`map`](Xor::map) transforms; the left side
/// passes through untouched. Construct values with the variants directly.
///
/// ```
/// use consort::Xor;
///
/// let r: Xor<&str, i32> = Xor::Right(1);
/// let l: Xor<&str, i32> = Xor::Left("abc");
///
/// assert_eq!(r.map(|x| x + 1), Xor::Right(2));
/// assert_eq!(l.map(|x| x + 1), Xor::Left("abc"));
/// ```

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Xor<L, R> {
  /// A left value.
  Left(L),
  /// A right value.
  Right(R),
}

impl<L, R> Xor<L, R> {
  /// Applies `f` to a right value. A left value is rewrapped as is and `f`
  /// is not called.

  #[inline]
  pub fn map<U, F>(self, f: F) -> Xor<L, U>
  where
    F: FnOnce(R) -> U
  {
    match self {
      Self::Left(x) => Xor::Left(x),
      Self::Right(x) => Xor::Right(f(x)),
    }
  }

  /// Applies `f` to a left value. A right value is rewrapped as is and `f`
  /// is not called.

  #[inline]
  pub fn map_left<U, F>(self, f: F) -> Xor<U, R>
  where
    F: FnOnce(L) -> U
  {
    match self {
      Self::Left(x) => Xor::Left(f(x)),
      Self::Right(x) => Xor::Right(x),
    }
  }

  /// Returns `true` for a left value.

  #[inline]
  pub const fn is_left(&self) -> bool {
    matches!(self, Self::Left(_))
  }

  /// Returns `true` for a right value.

  #[inline]
  pub const fn is_right(&self) -> bool {
    matches!(self, Self::Right(_))
  }

  /// Returns the left value, or `None` for a right value.

  #[inline]
  pub fn left(self) -> Option<L> {
    match self {
      Self::Left(x) => Some(x),
      Self::Right(_) => None,
    }
  }

  /// Returns the right value, or `None` for a left value.

  #[inline]
  pub fn right(self) -> Option<R> {
    match self {
      Self::Left(_) => None,
      Self::Right(x) => Some(x),
    }
  }

  /// Borrows whichever value is held.

  #[inline]
  pub const fn as_ref(&self) -> Xor<&L, &R> {
    match self {
      Self::Left(x) => Xor::Left(x),
      Self::Right(x) => Xor::Right(x),
    }
  }

  /// Swaps the sides.

  #[inline]
  pub fn flip(self) -> Xor<R, L> {
    match self {
      Self::Left(x) => Xor::Right(x),
      Self::Right(x) => Xor::Left(x),
    }
  }
}

// `Ok` is the right side, the one `map` works on.

impl<L, R> From<Result<R, L>> for Xor<L, R> {
  #[inline]
  fn from(x: Result<R, L>) -> Self {
    match x {
      Ok(x) => Self::Right(x),
      Err(x) => Self::Left(x),
    }
  }
}

impl<L, R> From<Xor<L, R>> for Result<R, L> {
  #[inline]
  fn from(x: Xor<L, R>) -> Self {
    match x {
      Xor::Left(x) => Err(x),
      Xor::Right(x) => Ok(x),
    }
  }
}
