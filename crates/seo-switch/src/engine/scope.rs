//! Call stack carried through recursive expansion.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::engine::diagnostics::{Diagnostic, DiagnosticCode};
use crate::parser::Placeholder;
use crate::rotation::{LINK_ANCHOR_SLOT, MAIN_SLOT};

/// What is being expanded at one level of the call stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frame {
    /// A switch pool lookup, keyed by requested category and slot.
    Switch { category_id: u32, slot: u32 },
    /// A context-derived variable.
    Derived(Placeholder),
}

impl From<Placeholder> for Frame {
    fn from(placeholder: Placeholder) -> Self {
        match placeholder {
            Placeholder::CompSwitch { slot, category_id } => Frame::Switch { category_id, slot },
            Placeholder::CompSwitchSelf { category_id } => Frame::Switch {
                category_id,
                slot: MAIN_SLOT,
            },
            Placeholder::LinkGammeCar { category_id } => Frame::Switch {
                category_id,
                slot: LINK_ANCHOR_SLOT,
            },
            derived => Frame::Derived(derived),
        }
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Frame::Switch { category_id, slot } => write!(f, "{category_id}:{slot}"),
            Frame::Derived(placeholder) => write!(f, "{placeholder}"),
        }
    }
}

/// Why a placeholder was left unexpanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interrupt {
    DepthExceeded { max_depth: usize },
    Cycle { chain: Vec<Frame> },
}

impl Interrupt {
    pub fn into_diagnostic(self, token: &str) -> Diagnostic {
        match self {
            Interrupt::DepthExceeded { max_depth } => Diagnostic::new(
                DiagnosticCode::DepthExceeded,
                token,
                format!("nesting deeper than {max_depth} levels"),
            ),
            Interrupt::Cycle { chain } => {
                let chain: Vec<String> = chain.iter().map(ToString::to_string).collect();
                Diagnostic::new(
                    DiagnosticCode::CycleDetected,
                    token,
                    format!("cyclic reference: {}", chain.join(" -> ")),
                )
            }
        }
    }
}

/// The active expansion path of one branch of a render.
///
/// Scopes are values: entering a frame returns a child scope, so sibling
/// placeholders expanded concurrently never see each other's frames. The
/// template itself is level 1; a switch placeholder found at level `n` can
/// only be expanded while `n <= max_depth`. Derived variables are leaves and
/// are only subject to the cycle guard.
#[derive(Debug, Clone)]
pub struct RenderScope {
    call_stack: Vec<Frame>,
    max_depth: usize,
}

impl RenderScope {
    pub fn new(max_depth: usize) -> Self {
        Self {
            call_stack: Vec::new(),
            max_depth,
        }
    }

    /// Level of placeholders scanned in this scope.
    pub fn level(&self) -> usize {
        self.call_stack.len() + 1
    }

    pub fn call_stack(&self) -> &[Frame] {
        &self.call_stack
    }

    pub fn is_in_call_stack(&self, frame: &Frame) -> bool {
        self.call_stack.contains(frame)
    }

    /// Enter `frame`, returning the scope its content is expanded in.
    ///
    /// Fails if `frame` is already on the stack, or if it is a switch and the
    /// depth cap is reached.
    pub fn enter(&self, frame: Frame) -> Result<RenderScope, Interrupt> {
        if self.is_in_call_stack(&frame) {
            let mut chain = self.call_stack.clone();
            chain.push(frame);
            return Err(Interrupt::Cycle { chain });
        }
        if matches!(frame, Frame::Switch { .. }) && self.level() > self.max_depth {
            return Err(Interrupt::DepthExceeded {
                max_depth: self.max_depth,
            });
        }
        let mut call_stack = self.call_stack.clone();
        call_stack.push(frame);
        Ok(RenderScope {
            call_stack,
            max_depth: self.max_depth,
        })
    }
}
