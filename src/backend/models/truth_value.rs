//! Simple (strength, confidence) truth values carried by atoms.

use std::fmt;

/// A truth value payload. Not part of an atom's structural identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruthValue {
    pub strength: f64,
    pub confidence: f64,
}

impl TruthValue {
    /// The value every freshly created atom starts with.
    pub const DEFAULT: TruthValue = TruthValue {
        strength: 1.0,
        confidence: 0.0,
    };
    pub const TRUE: TruthValue = TruthValue {
        strength: 1.0,
        confidence: 1.0,
    };
    pub const FALSE: TruthValue = TruthValue {
        strength: 0.0,
        confidence: 1.0,
    };

    /// Create a truth value, clamping both components into `[0, 1]`.
    pub fn new(strength: f64, confidence: f64) -> Self {
        TruthValue {
            strength: strength.clamp(0.0, 1.0),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    #[inline]
    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }

    /// Crisp reading used by the boolean connectives.
    #[inline]
    pub fn is_true(&self) -> bool {
        self.strength > 0.5
    }

    pub fn from_bool(b: bool) -> Self {
        if b {
            Self::TRUE
        } else {
            Self::FALSE
        }
    }

    /// Strength inverted, confidence kept.
    pub fn negate(&self) -> Self {
        TruthValue {
            strength: 1.0 - self.strength,
            confidence: self.confidence,
        }
    }
}

impl Default for TruthValue {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for TruthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(stv {} {})", self.strength, self.confidence)
    }
}
