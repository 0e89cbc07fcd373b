//! Depth limiting for recursive relation and validation queries.
//!
//! Type expressions are finite trees, so every query terminates; the guard
//! exists so that pathological nesting produces a deterministic
//! [`DepthExceeded`](crate::DepthExceeded) instead of exhausting the host
//! stack.
//!
//! # Profiles
//!
//! [`RecursionProfile`] provides named presets so call sites say what they
//! guard rather than repeating magic numbers:
//!
//! ```ignore
//! let counter = DepthCounter::new(RecursionProfile::RelationCheck.max_depth());
//! ```
//!
//! # Safety
//!
//! - **Debug leak detection**: In debug builds, dropping a counter with
//!   unmatched `enter()` calls panics.
//! - **Debug underflow detection**: In debug builds, `leave()` at depth 0
//!   panics.

use typemap_common::limits::{MAX_RELATION_DEPTH, MAX_VALIDATION_DEPTH};

// ---------------------------------------------------------------------------
// RecursionProfile
// ---------------------------------------------------------------------------

/// Named recursion limit presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionProfile {
    /// Subtype, compatibility and identity checks.
    ///
    /// One level per nested type argument or union arm.
    ///
    /// depth = 100
    RelationCheck,

    /// Runtime validation of values against declared types.
    ///
    /// One level per nested declared container or union arm.
    ///
    /// depth = 100
    RuntimeValidation,

    /// Custom limit for one-off or test scenarios.
    Custom { max_depth: u32 },
}

impl RecursionProfile {
    /// Maximum recursion depth for this profile.
    pub const fn max_depth(self) -> u32 {
        match self {
            Self::RelationCheck => MAX_RELATION_DEPTH,
            Self::RuntimeValidation => MAX_VALIDATION_DEPTH,
            Self::Custom { max_depth } => max_depth,
        }
    }
}

// ---------------------------------------------------------------------------
// DepthCounter
// ---------------------------------------------------------------------------

/// A depth counter for stack overflow protection.
///
/// Expressions are trees without identity, so there is nothing to key a
/// cycle check on; only nesting depth is limited.
///
/// # Usage
///
/// ```ignore
/// if !self.depth.enter() {
///     return Err(self.depth_exceeded());
/// }
/// let result = self.check_inner(sub, sup);
/// self.depth.leave();
/// result
/// ```
pub struct DepthCounter {
    depth: u32,
    max_depth: u32,
    exceeded: bool,
}

impl DepthCounter {
    /// Create a counter with an explicit max depth.
    pub fn new(max_depth: u32) -> Self {
        Self {
            depth: 0,
            max_depth,
            exceeded: false,
        }
    }

    /// Try to enter a deeper level.
    ///
    /// Returns `true` if entry is allowed; the caller **must** then call
    /// [`leave`](Self::leave). Returns `false` once the limit is reached,
    /// sets the exceeded flag and does not increment the depth; do **not**
    /// call `leave()` in that case.
    #[inline]
    pub fn enter(&mut self) -> bool {
        if self.depth >= self.max_depth {
            self.exceeded = true;
            return false;
        }
        self.depth += 1;
        true
    }

    /// Leave the current depth level.
    ///
    /// # Debug panics
    ///
    /// In debug builds, panics if depth is already 0 (leave without enter).
    #[inline]
    pub fn leave(&mut self) {
        debug_assert!(
            self.depth > 0,
            "DepthCounter::leave() called at depth 0. \
             This indicates a leave without a matching enter()."
        );
        self.depth = self.depth.saturating_sub(1);
    }

    /// The configured maximum depth.
    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Returns `true` if the depth limit was previously exceeded.
    ///
    /// Sticky for the lifetime of the counter, so one checker reports a
    /// ceiling hit anywhere in its query.
    #[inline]
    pub fn is_exceeded(&self) -> bool {
        self.exceeded
    }
}

#[cfg(debug_assertions)]
impl Drop for DepthCounter {
    fn drop(&mut self) {
        if !std::thread::panicking() && self.depth > 0 {
            panic!(
                "DepthCounter dropped with depth {}. \
                 This indicates leaked enter() calls without matching leave() calls.",
                self.depth,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
