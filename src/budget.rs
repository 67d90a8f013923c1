//! Character budgets for the free-text wizard stages
//!
//! Two modes exist. Per-field limits cap each field on its own and simply refuse
//! extra characters. A shared total budget is consumed by the `prefix(): `
//! decoration, then by the finalized scope, and whatever remains is the live
//! allowance of the field being edited. An exhausted shared budget blanks the
//! field instead of truncating it.

use std::fmt;

/// Characters the fixed `(` `)` `:` ` ` decoration adds around a prefix
const DECORATION: &str = "(): ";

/// Free-text fields that carry a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Scope,
    Subject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharBudget {
    /// Independent fixed limits per field
    PerField { scope: usize, subject: usize },
    /// One allowance shared by decoration, scope and subject
    Shared { total: usize },
}

impl Default for CharBudget {
    fn default() -> Self {
        CharBudget::PerField {
            scope: Self::DEFAULT_SCOPE_LIMIT,
            subject: Self::DEFAULT_SUBJECT_LIMIT,
        }
    }
}

impl CharBudget {
    pub const DEFAULT_SCOPE_LIMIT: usize = 16;
    pub const DEFAULT_SUBJECT_LIMIT: usize = 100;

    pub fn is_shared(&self) -> bool {
        matches!(self, CharBudget::Shared { .. })
    }

    /// Allowance for `field` given how many characters are already committed
    /// (decoration plus any finalized scope). `committed` is ignored in
    /// per-field mode.
    pub fn allowance(&self, field: Field, committed: usize) -> Allowance {
        match *self {
            CharBudget::PerField { scope, subject } => Allowance::Capped(match field {
                Field::Scope => scope,
                Field::Subject => subject,
            }),
            CharBudget::Shared { total } => match total.saturating_sub(committed) {
                0 => Allowance::Exhausted,
                remaining => Allowance::Remaining(remaining),
            },
        }
    }

    /// Counter shown next to the prompt
    pub fn counter(&self, field: Field, committed: usize, pending: usize) -> Counter {
        match *self {
            CharBudget::PerField { scope, subject } => Counter {
                used: pending,
                limit: match field {
                    Field::Scope => scope,
                    Field::Subject => subject,
                },
            },
            CharBudget::Shared { total } => Counter {
                used: committed + pending,
                limit: total,
            },
        }
    }
}

/// What a field may still accept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allowance {
    /// Per-field limit: refuse input beyond this many characters
    Capped(usize),
    /// Shared budget with this many characters left for the field
    Remaining(usize),
    /// Shared budget spent; the field is locked and left blank
    Exhausted,
}

impl Allowance {
    /// Maximum characters the field may hold
    pub fn max_len(&self) -> usize {
        match *self {
            Allowance::Capped(n) | Allowance::Remaining(n) => n,
            Allowance::Exhausted => 0,
        }
    }

    /// Decide what typing one more character into a field of `current_len` does
    pub fn check_insert(&self, current_len: usize) -> InsertCheck {
        match *self {
            Allowance::Capped(limit) if current_len < limit => InsertCheck::Accept,
            Allowance::Capped(_) => InsertCheck::Refuse,
            Allowance::Remaining(left) if current_len < left => InsertCheck::Accept,
            Allowance::Remaining(_) | Allowance::Exhausted => InsertCheck::Exhaust,
        }
    }
}

/// Outcome of a single keystroke against a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertCheck {
    Accept,
    /// Standard capping: drop the character, keep the value
    Refuse,
    /// Shared budget overrun: lock the field and clear it
    Exhaust,
}

/// Length of `prefix(): ` as counted against a shared budget
pub fn decoration_len(prefix: &str) -> usize {
    char_len(prefix) + DECORATION.len()
}

/// Budgets count characters, not bytes
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Keep at most `max` characters of `s`
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// `[used/limit]`, with `used` zero-padded to the width of `limit`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    pub used: usize,
    pub limit: usize,
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.limit.to_string().len();
        write!(f, "[{:0width$}/{}]", self.used, self.limit, width = width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoration_len() {
        assert_eq!(decoration_len("feat"), 8);
        assert_eq!(decoration_len("ci"), 6);
    }

    #[test]
    fn test_per_field_allowance_ignores_committed() {
        let budget = CharBudget::default();
        assert_eq!(budget.allowance(Field::Scope, 500), Allowance::Capped(16));
        assert_eq!(budget.allowance(Field::Subject, 500), Allowance::Capped(100));
    }

    #[test]
    fn test_shared_allowance_after_prefix() {
        let budget = CharBudget::Shared { total: 10 };
        let committed = decoration_len("feat");
        assert_eq!(budget.allowance(Field::Subject, committed), Allowance::Remaining(2));
    }

    #[test]
    fn test_shared_allowance_exhausted() {
        let budget = CharBudget::Shared { total: 8 };
        assert_eq!(
            budget.allowance(Field::Scope, decoration_len("feat")),
            Allowance::Exhausted
        );
        // Decoration alone may overshoot a tiny budget
        let budget = CharBudget::Shared { total: 3 };
        assert_eq!(
            budget.allowance(Field::Scope, decoration_len("feat")),
            Allowance::Exhausted
        );
    }

    #[test]
    fn test_capped_refuses_without_clearing() {
        let allowance = Allowance::Capped(3);
        assert_eq!(allowance.check_insert(2), InsertCheck::Accept);
        assert_eq!(allowance.check_insert(3), InsertCheck::Refuse);
    }

    #[test]
    fn test_shared_overrun_exhausts() {
        let allowance = Allowance::Remaining(2);
        assert_eq!(allowance.check_insert(0), InsertCheck::Accept);
        assert_eq!(allowance.check_insert(1), InsertCheck::Accept);
        assert_eq!(allowance.check_insert(2), InsertCheck::Exhaust);
        assert_eq!(Allowance::Exhausted.check_insert(0), InsertCheck::Exhaust);
    }

    #[test]
    fn test_counter_format() {
        let c = Counter { used: 8, limit: 10 };
        assert_eq!(c.to_string(), "[08/10]");
        let c = Counter { used: 3, limit: 100 };
        assert_eq!(c.to_string(), "[003/100]");
        let c = Counter { used: 7, limit: 9 };
        assert_eq!(c.to_string(), "[7/9]");
    }

    #[test]
    fn test_shared_counter_includes_committed() {
        let budget = CharBudget::Shared { total: 50 };
        let c = budget.counter(Field::Subject, decoration_len("fix") + 3, 5);
        assert_eq!(c, Counter { used: 15, limit: 50 });
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
