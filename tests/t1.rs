use anyhow::Result;
use tinysexpr::read::{read_all, write_all};
use tinysexpr::value::Arena;

const INPUT: &[u8] = include_bytes!("t-input.scm");
const EXPECTED: &[u8] = include_bytes!("t-expected.scm");

#[test]
fn t1() -> Result<()> {
    let mut arena = Arena::new();
    let vals = read_all(INPUT, &mut arena)?;
    let mut out = Vec::<u8>::new();
    write_all(&mut out, &arena, vals)?;
    assert_eq!(String::from_utf8(out)?, std::str::from_utf8(EXPECTED)?);
    Ok(())
}

#[test]
fn t1_reprinted_output_is_stable() -> Result<()> {
    let mut arena = Arena::new();
    let vals = read_all(EXPECTED, &mut arena)?;
    let mut out = Vec::<u8>::new();
    write_all(&mut out, &arena, vals)?;
    assert_eq!(out, EXPECTED);
    Ok(())
}
