//! Applicability dimension of a fee row and the call context it is
//! matched against.
//!
//! A `None` dimension matches every call. A `Some` dimension narrows the
//! row to calls whose context carries the same value.

use serde::{Deserialize, Serialize};

/// Weight of a port-scoped dimension when ranking candidate rows.
pub const PORT_SPECIFICITY: u8 = 4;
/// Weight of a state-scoped dimension.
pub const STATE_SPECIFICITY: u8 = 2;
/// Weight of the Cascadia flag.
pub const CASCADIA_SPECIFICITY: u8 = 1;

/// The `(applies_state, applies_port_code, applies_cascadia)` triple.
///
/// Two rows with the same fee code and equal applicability describe the
/// same population of calls, so their validity intervals must not overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Applicability {
    pub state: Option<String>,
    pub port_code: Option<String>,
    pub cascadia: Option<bool>,
}

impl Applicability {
    /// Applies to every call.
    pub fn general() -> Self {
        Self::default()
    }

    /// Whether a call described by `ctx` is covered by this row.
    pub fn matches(&self, ctx: &CallContext) -> bool {
        if let Some(port_code) = &self.port_code {
            if ctx.port_code.as_deref() != Some(port_code.as_str()) {
                return false;
            }
        }
        if let Some(state) = &self.state {
            if ctx.state.as_deref() != Some(state.as_str()) {
                return false;
            }
        }
        if let Some(cascadia) = self.cascadia {
            if ctx.is_cascadia != cascadia {
                return false;
            }
        }
        true
    }

    /// Rank used to prefer narrower rows over general ones.
    ///
    /// Port beats state beats the Cascadia flag; weights are powers of two
    /// so distinct dimension sets never tie.
    pub fn specificity(&self) -> u8 {
        let mut score = 0;
        if self.port_code.is_some() {
            score += PORT_SPECIFICITY;
        }
        if self.state.is_some() {
            score += STATE_SPECIFICITY;
        }
        if self.cascadia.is_some() {
            score += CASCADIA_SPECIFICITY;
        }
        score
    }
}

impl std::fmt::Display for Applicability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if let Some(port_code) = &self.port_code {
            parts.push(format!("port={port_code}"));
        }
        if let Some(state) = &self.state {
            parts.push(format!("state={state}"));
        }
        if let Some(cascadia) = self.cascadia {
            parts.push(format!("cascadia={cascadia}"));
        }
        if parts.is_empty() {
            f.write_str("general")
        } else {
            f.write_str(&parts.join(","))
        }
    }
}

/// What is known about a vessel call when looking up a fee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    pub port_code: Option<String>,
    pub state: Option<String>,
    pub is_cascadia: bool,
}

impl CallContext {
    /// Context for a call at a known port.
    pub fn at_port(port_code: impl Into<String>, state: Option<String>, is_cascadia: bool) -> Self {
        Self {
            port_code: Some(port_code.into()),
            state,
            is_cascadia,
        }
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_cascadia(mut self, is_cascadia: bool) -> Self {
        self.is_cascadia = is_cascadia;
        self
    }
}
