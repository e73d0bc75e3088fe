//! Non-fatal render diagnostics.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

/// Stable code of a [`Diagnostic`].
///
/// `UnresolvedToken` and `MissingPrice` point at absent data;
/// `DepthExceeded`, `CycleDetected`, `UnknownToken`, `LinkPoolMismatch` and
/// `EmptyLinkHalf` point at authoring problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticCode {
    UnresolvedToken,
    MissingPrice,
    DepthExceeded,
    CycleDetected,
    UnknownToken,
    LinkPoolMismatch,
    EmptyLinkHalf,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::UnresolvedToken => "unresolved_token",
            DiagnosticCode::MissingPrice => "missing_price",
            DiagnosticCode::DepthExceeded => "depth_exceeded",
            DiagnosticCode::CycleDetected => "cycle_detected",
            DiagnosticCode::UnknownToken => "unknown_token",
            DiagnosticCode::LinkPoolMismatch => "link_pool_mismatch",
            DiagnosticCode::EmptyLinkHalf => "empty_link_half",
        }
    }

    /// True for codes caused by content rather than missing rows.
    pub fn is_authoring_error(&self) -> bool {
        !matches!(
            self,
            DiagnosticCode::UnresolvedToken | DiagnosticCode::MissingPrice
        )
    }
}

impl Display for DiagnosticCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Something the engine recovered from while rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    /// Placeholder source text the diagnostic is about.
    pub token: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, token: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            code,
            token: token.into(),
            detail: detail.into(),
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "[{}] {}: {}", self.code, self.token, self.detail)
    }
}

/// The output of an uncached render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub text: String,
    /// Diagnostics in template order.
    pub diagnostics: Vec<Diagnostic>,
    /// Categories whose switch pools were looked up, at any nesting level.
    pub categories: BTreeSet<u32>,
}

impl Rendered {
    pub fn count(&self, code: DiagnosticCode) -> usize {
        self.diagnostics.iter().filter(|d| d.code == code).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_data_is_not_an_authoring_error() {
        assert!(!DiagnosticCode::UnresolvedToken.is_authoring_error());
        assert!(!DiagnosticCode::MissingPrice.is_authoring_error());
        assert!(DiagnosticCode::CycleDetected.is_authoring_error());
        assert!(DiagnosticCode::DepthExceeded.is_authoring_error());
    }

    #[test]
    fn display_includes_code_and_token() {
        let diagnostic = Diagnostic::new(
            DiagnosticCode::UnresolvedToken,
            "#CompSwitch_5_9999#",
            "no switch content",
        );
        assert_eq!(
            diagnostic.to_string(),
            "[unresolved_token] #CompSwitch_5_9999#: no switch content"
        );
    }
}
