//! Expression evaluation over a loaded [`Directory`].
//!
//! Expressions are flat chains of identifiers joined by `+` (union) and `^`
//! (difference), evaluated left to right with no precedence or grouping.
//! Macro atoms expand recursively; the expansion path travels with the call
//! so a cycle is a detected error, not a stack overflow.

use crate::directory::{Atom, Directory};
use crate::error::EvalError;
use crate::host::Host;
use std::collections::{BTreeSet, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Union,
    Difference,
}

/// Splits an expression into its first atom and the `(op, atom)` chain.
///
/// Atoms are trimmed; an empty atom anywhere is malformed.
fn parse_terms(expr: &str) -> Result<Vec<(Option<Op>, &str)>, String> {
    let mut terms = Vec::new();
    let mut pending = None;
    let mut start = 0;

    for (i, c) in expr.char_indices() {
        let op = match c {
            '+' => Op::Union,
            '^' => Op::Difference,
            _ => continue,
        };
        let atom = expr[start..i].trim();
        if atom.is_empty() {
            return Err(if pending.is_none() && terms.is_empty() {
                format!("leading {c:?} operator")
            } else {
                "consecutive operators".to_string()
            });
        }
        terms.push((pending, atom));
        pending = Some(op);
        start = i + c.len_utf8();
    }

    let last = expr[start..].trim();
    if last.is_empty() {
        return Err(if terms.is_empty() {
            "expression is empty".to_string()
        } else {
            "trailing operator".to_string()
        });
    }
    terms.push((pending, last));

    Ok(terms)
}

impl Directory {
    /// Evaluates one expression into hosts ordered by ascending declaration
    /// sequence.
    ///
    /// Unknown identifiers contribute the empty set; an expression matching
    /// nothing yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed expression or a cyclic macro
    /// expansion.
    pub fn evaluate(&self, expr: &str) -> Result<Vec<&Host>, EvalError> {
        let mut expanding = Vec::new();
        let set = self.eval_expr(expr, &mut expanding)?;
        Ok(set.into_iter().map(|i| &self.hosts[i]).collect())
    }

    /// Evaluates several independent expressions and concatenates the
    /// results, deduplicated by first occurrence.
    ///
    /// # Errors
    ///
    /// Fails on the first erroneous expression. Callers wanting to keep
    /// going past a bad expression evaluate each one with
    /// [`Directory::evaluate`] instead; a failed expression must never be
    /// papered over with a wrong result.
    pub fn evaluate_all<'e, I>(&self, exprs: I) -> Result<Vec<&Host>, EvalError>
    where
        I: IntoIterator<Item = &'e str>,
    {
        let mut seen = HashSet::new();
        let mut hosts = Vec::new();
        for expr in exprs {
            for host in self.evaluate(expr)? {
                if seen.insert(host.sequence()) {
                    hosts.push(host);
                }
            }
        }
        Ok(hosts)
    }

    /// Evaluates an expression into a set of host sequence indices.
    ///
    /// The accumulator is an ordered set, so results come out in
    /// declaration order no matter how the expression introduced them.
    pub(crate) fn eval_expr(
        &self,
        expr: &str,
        expanding: &mut Vec<String>,
    ) -> Result<BTreeSet<usize>, EvalError> {
        let terms = parse_terms(expr).map_err(|reason| EvalError::BadExpression {
            expr: expr.to_string(),
            reason,
        })?;

        let mut acc = BTreeSet::new();
        for (op, atom) in terms {
            let resolved = self.eval_atom(atom, expanding)?;
            match op {
                None | Some(Op::Union) => acc.extend(resolved),
                Some(Op::Difference) => {
                    for index in resolved {
                        acc.remove(&index);
                    }
                }
            }
        }
        Ok(acc)
    }

    fn eval_atom(
        &self,
        name: &str,
        expanding: &mut Vec<String>,
    ) -> Result<BTreeSet<usize>, EvalError> {
        match self.resolve_atom(name) {
            Atom::Macro { name, expr } => {
                if expanding.iter().any(|n| n == name) {
                    let mut cycle: Vec<&str> = expanding.iter().map(String::as_str).collect();
                    cycle.push(name);
                    return Err(EvalError::CyclicMacro {
                        cycle: cycle.join(" -> "),
                    });
                }
                expanding.push(name.to_string());
                let result = self.eval_expr(expr, expanding);
                expanding.pop();
                result
            }
            Atom::Tag(hosts) => Ok(hosts.iter().map(|h| h.sequence()).collect()),
            Atom::Literal(host) => Ok(BTreeSet::from([host.sequence()])),
            Atom::Unknown => Ok(BTreeSet::new()),
        }
    }
}
