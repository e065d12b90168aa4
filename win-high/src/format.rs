//! Multi-string buffers, as returned by the PDH enumeration functions: UTF-16 strings
//! delimited by `0u16` and terminated by a double `0u16` sequence.
use widestring::U16Str;

/// Iterator over the non-empty strings of a NUL-delimited, double-NUL-terminated buffer.
///
/// Iteration ends at the double NUL or at the end of the slice, whichever comes first, so a
/// truncated buffer yields whatever strings it holds instead of reading past its end.
#[derive(Clone, Debug)]
pub struct NulDelimited<'a> {
    rest: &'a [u16],
}

impl<'a> Iterator for NulDelimited<'a> {
    type Item = &'a U16Str;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.rest.is_empty() {
            let end = self
                .rest
                .iter()
                .position(|&wchar| wchar == 0)
                .unwrap_or(self.rest.len());
            let (head, tail) = self.rest.split_at(end);
            // skip the NUL which terminates `head`, if there was one
            self.rest = tail.get(1..).unwrap_or(&[]);
            // a terminator followed by another NUL closes the list
            if self.rest.first() == Some(&0) {
                self.rest = &[];
            }
            if !head.is_empty() {
                return Some(U16Str::from_slice(head));
            }
        }
        None
    }
}

pub fn split_nul_delimited_double_nul_terminated(raw: &[u16]) -> NulDelimited<'_> {
    NulDelimited { rest: raw }
}

/// Decode a name list into owned strings. Invalid UTF-16 is replaced lossily.
pub fn parse_name_list(raw: &[u16]) -> Vec<String> {
    split_nul_delimited_double_nul_terminated(raw)
        .map(U16Str::to_string_lossy)
        .collect()
}
