use regex::Regex;

use super::ast::Condition;
use super::error::{ConditionError, ConditionResult};
use super::value::Context;

/// Evaluate a condition against the runtime context.
///
/// Combinators short-circuit; atoms are either bare variable names
/// (truthiness test, absent keys are false) or `regex(a, b)` call forms.
pub fn evaluate_condition(condition: &Condition, ctx: &Context) -> ConditionResult<bool> {
    match condition {
        Condition::Atom(atom) => evaluate_atom(atom, ctx),
        Condition::All { and } => {
            for sub in and {
                if !evaluate_condition(sub, ctx)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Condition::Any { or } => {
            for sub in or {
                if evaluate_condition(sub, ctx)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

fn evaluate_atom(atom: &str, ctx: &Context) -> ConditionResult<bool> {
    let atom = atom.trim();
    if let Some(args) = atom
        .strip_prefix("regex(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return evaluate_regex_call(atom, args, ctx);
    }
    if atom.is_empty() || atom.contains('(') || atom.contains(')') {
        return Err(ConditionError::Malformed(format!(
            "expected variable name or regex(a, b), found '{}'",
            atom
        )));
    }
    Ok(ctx.vars.get(atom).is_some_and(|value| value.is_truthy()))
}

/// One resolved side of a `regex(a, b)` call.
enum Operand {
    /// `/…/`-delimited literal, inner text kept as the pattern source.
    Pattern(String),
    /// Variable value, used as a literal string.
    Text(String),
    /// Variable absent from the context.
    Missing,
}

fn evaluate_regex_call(atom: &str, args: &str, ctx: &Context) -> ConditionResult<bool> {
    let (first, second) = split_args(args).ok_or_else(|| {
        ConditionError::Malformed(format!("regex call needs two arguments: '{}'", atom))
    })?;

    let left = resolve_operand(first, ctx)?;
    let right = resolve_operand(second, ctx)?;

    match (left, right) {
        (Operand::Missing, _) | (_, Operand::Missing) => Ok(false),
        (Operand::Text(subject), Operand::Pattern(pattern))
        | (Operand::Pattern(pattern), Operand::Text(subject)) => {
            Ok(compile(&pattern)?.is_match(&subject))
        }
        // Neither side delimited: exact-value equality, no pattern semantics.
        (Operand::Text(left), Operand::Text(right)) => Ok(left == right),
        // Both sides delimited only happens by author error; the right side
        // wins as the pattern.
        (Operand::Pattern(subject), Operand::Pattern(pattern)) => {
            Ok(compile(&pattern)?.is_match(&subject))
        }
    }
}

/// Split the argument list at the first comma outside a `/…/` delimiter.
fn split_args(args: &str) -> Option<(&str, &str)> {
    let mut in_pattern = false;
    for (index, ch) in args.char_indices() {
        match ch {
            '/' => in_pattern = !in_pattern,
            ',' if !in_pattern => {
                let (first, second) = args.split_at(index);
                let second = &second[1..];
                if second.contains(',') && !second.contains('/') {
                    return None;
                }
                return Some((first, second));
            }
            _ => {}
        }
    }
    None
}

fn resolve_operand(arg: &str, ctx: &Context) -> ConditionResult<Operand> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Err(ConditionError::Malformed(
            "empty regex argument".to_string(),
        ));
    }
    if let Some(rest) = arg.strip_prefix('/') {
        let inner = rest.strip_suffix('/').ok_or_else(|| {
            ConditionError::Malformed(format!("unterminated pattern literal '{}'", arg))
        })?;
        return Ok(Operand::Pattern(inner.to_string()));
    }
    Ok(match ctx.vars.get(arg) {
        Some(value) => Operand::Text(value.to_text()),
        None => Operand::Missing,
    })
}

fn compile(pattern: &str) -> ConditionResult<Regex> {
    Regex::new(pattern).map_err(|err| ConditionError::Pattern {
        pattern: pattern.to_string(),
        detail: err.to_string(),
    })
}
