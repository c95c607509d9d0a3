//! Condition expressions attached to stops and tourist maps
//!
//! The host game owns the real query language. Content only needs a yes/no
//! answer, so evaluation sits behind a trait.

use std::collections::HashSet;

/// Answers whether a content condition currently holds
pub trait ConditionEvaluator {
    fn check(&self, condition: &str) -> bool;

    /// Check an optional condition; a missing or blank condition always passes
    fn check_optional(&self, condition: Option<&str>) -> bool {
        match condition.map(str::trim) {
            None | Some("") => true,
            Some(condition) => self.check(condition),
        }
    }
}

impl<F> ConditionEvaluator for F
where
    F: Fn(&str) -> bool,
{
    fn check(&self, condition: &str) -> bool {
        self(condition)
    }
}

/// Evaluator that accepts every condition
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysTrue;

impl ConditionEvaluator for AlwaysTrue {
    fn check(&self, _condition: &str) -> bool {
        true
    }
}

/// Evaluates comma-separated flag lists against a set of raised flags
///
/// `"A, !B"` holds when flag `A` is set and `B` is not. The literals `TRUE`
/// and `FALSE` are also understood.
#[derive(Debug, Clone, Default)]
pub struct FlagConditions {
    flags: HashSet<String>,
}

impl FlagConditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.insert(flag.into());
        self
    }

    pub fn set(&mut self, flag: impl Into<String>) {
        self.flags.insert(flag.into());
    }
}

impl ConditionEvaluator for FlagConditions {
    fn check(&self, condition: &str) -> bool {
        condition
            .split(',')
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .all(|term| {
                if term.eq_ignore_ascii_case("TRUE") {
                    return true;
                }
                if term.eq_ignore_ascii_case("FALSE") {
                    return false;
                }
                match term.strip_prefix('!') {
                    Some(flag) => !self.flags.contains(flag.trim()),
                    None => self.flags.contains(term),
                }
            })
    }
}
