// SPDX-License-Identifier: MIT

//! Delimiter-set scanner used by every response parser.
//!
//! Follows `strtok` semantics over a borrowed `&str`: each call skips a
//! leading run of delimiters, yields the token up to the next delimiter,
//! and consumes that delimiter. The delimiter set is supplied per call,
//! so key/value parsers can scan field keywords on `:` and values on
//! CR/LF without restarting.

/// Cursor over a response text.
#[derive(Debug)]
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Next token, using `delims` as the delimiter set for this call.
    ///
    /// Returns `None` once only delimiters (or nothing) remain. Tokens
    /// are never empty.
    pub fn next(&mut self, delims: &str) -> Option<&'a str> {
        let rest = &self.input[self.pos..];
        let start = rest.find(|c| !delims.contains(c))?;
        let rest = &rest[start..];

        match rest.find(|c| delims.contains(c)) {
            Some(end) => {
                let token = &rest[..end];
                // Consume the terminating delimiter as well.
                let delim_len = rest[end..].chars().next().map_or(0, char::len_utf8);
                self.pos += start + end + delim_len;
                Some(token)
            }
            None => {
                self.pos = self.input.len();
                Some(rest)
            }
        }
    }

    /// Next token parsed as an unsigned integer, `None` if the token is
    /// missing or not numeric. The token is whitespace-trimmed first.
    pub fn next_u32(&mut self, delims: &str) -> Option<u32> {
        self.next(delims)?.trim().parse().ok()
    }

    /// Next token parsed as an unsigned long value.
    pub fn next_u64(&mut self, delims: &str) -> Option<u64> {
        self.next(delims)?.trim().parse().ok()
    }

    /// Next token parsed as a float.
    pub fn next_f32(&mut self, delims: &str) -> Option<f32> {
        self.next(delims)?.trim().parse().ok()
    }

    /// Whether the scanner has consumed all input.
    pub fn is_done(&self) -> bool {
        self.pos >= self.input.len()
    }
}

/// Trim leading whitespace, the way response values are stored.
pub fn ltrim(s: &str) -> &str {
    s.trim_start()
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;
