// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.


/// Helper for converting a word value to a floating number.
///
/// Empty, malformed and non-finite values ("inf", "NaN") are rejected.
pub fn parse_float(inp: &str) -> Option<f64> {
    inp.parse::<f64>().ok().filter(|v| v.is_finite())
}
