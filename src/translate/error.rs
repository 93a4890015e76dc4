// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fmt;
use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;

use crate::ast::Letter;
use crate::parse::ParseError;

/// A failure that aborts the whole translation run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranslateError {
    #[error("Error in {0}")]
    Parse(#[from] ParseError),
}

impl TranslateError {
    /// The input line that caused the failure.
    pub fn lineno(&self) -> usize {
        match self {
            TranslateError::Parse(e) => e.lineno,
        }
    }
}

/// A non-fatal condition recorded while translating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// 1-based input line, 0 for conditions about the whole input.
    pub lineno: usize,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DiagnosticKind {
    /// A non-empty line without a command family marker.
    Discarded(String),
    /// An arc line lacking some of I, J, X, Y.
    ArcParameterMissing { missing: Vec<Letter> },
    /// Nothing to translate at all.
    EmptyInput,
}

impl Diagnostic {
    pub fn is_arc_error(&self) -> bool {
        matches!(self.kind, DiagnosticKind::ArcParameterMissing { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::Discarded(text) =>
                write!(f, "Discarded line {}: {}", self.lineno, text),
            DiagnosticKind::ArcParameterMissing { missing } =>
                write!(f, "Arc in line {} is missing {}", self.lineno,
                       missing.iter().join(", ")),
            DiagnosticKind::EmptyInput =>
                write!(f, "No motion lines to translate"),
        }
    }
}
