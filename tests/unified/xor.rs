use std::cell::Cell;
use expect_test::expect;
use consort::Xor;

#[test]
fn test_map_right() {
  for y in [-1, 0, 7] {
    let x: Xor<String, i32> = Xor::Right(y);
    assert!(x.map(|y| y + 1) == Xor::Right(y + 1));
  }
}

#[test]
fn test_map_left_passes_through() {
  let calls = Cell::new(0);
  let x: Xor<String, i32> = Xor::Left(String::from("abc"));
  let y: Xor<String, bool> = x.map(|y| { calls.set(calls.get() + 1); y > 0 });
  assert!(y == Xor::Left(String::from("abc")));
  assert!(calls.get() == 0);
}

#[test]
fn test_exactly_one_side() {
  let xs: [Xor<u8, char>; 2] = [Xor::Left(1), Xor::Right('a')];
  for x in xs {
    assert!(x.is_left() != x.is_right());
    assert!(x.left().is_some() == x.is_left());
    assert!(x.right().is_some() == x.is_right());
  }
}

#[test]
fn test_accessors() {
  let l: Xor<&str, i32> = Xor::Left("abc");
  let r: Xor<&str, i32> = Xor::Right(1);
  assert!(l.left() == Some("abc"));
  assert!(l.right().is_none());
  assert!(r.left().is_none());
  assert!(r.right() == Some(1));
  assert!(r.as_ref().right() == Some(&1));
}

#[test]
fn test_map_left_and_flip() {
  let l: Xor<&str, i32> = Xor::Left("abc");
  let r: Xor<&str, i32> = Xor::Right(1);
  assert!(l.map_left(str::len) == Xor::Left(3));
  assert!(r.map_left(str::len) == Xor::Right(1));
  expect![[r#"Right("abc")"#]].assert_eq(&format!("{:?}", l.flip()));
  expect!["Left(1)"].assert_eq(&format!("{:?}", r.flip()));
}

#[test]
fn test_result_conversions() {
  let ok: Result<i32, &str> = Ok(1);
  let err: Result<i32, &str> = Err("e");
  assert!(Xor::from(ok) == Xor::Right(1));
  assert!(Xor::from(err) == Xor::Left("e"));
  assert!(Result::<i32, &str>::from(Xor::Right(1)) == Ok(1));
  assert!(Result::<i32, &str>::from(Xor::Left("e")) == Err("e"));
}
