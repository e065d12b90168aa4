//! Missing API from `<winnt.h>`

#![allow(bad_style)]

type WORD = u16;
type LANGID = WORD;

#[inline]
pub fn MAKELANGID(p: WORD, s: WORD) -> LANGID {
    (s << 10) | p
}
#[inline]
pub fn PRIMARYLANGID(lgid: LANGID) -> WORD {
    lgid & 0x3ff
}
