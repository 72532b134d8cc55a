// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported for invalid host requests.

use core::fmt;

/// Error returned when the host addresses the collection incorrectly.
///
/// The pager never clamps or otherwise repairs a bad request; the caller is
/// expected to check [`Pager::len`](crate::Pager::len) first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PagerError {
    /// `index` is not valid for a collection of `len` views.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The collection length at the time of the request.
        len: usize,
    },
    /// The operation needs at least one view.
    Empty,
}

impl PagerError {
    pub(crate) const fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}

impl fmt::Display for PagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} is out of range for {len} views")
            }
            Self::Empty => f.write_str("the pager holds no views"),
        }
    }
}

impl core::error::Error for PagerError {}
