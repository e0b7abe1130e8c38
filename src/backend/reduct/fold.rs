//! Numeric folds and string concatenation.

use crate::backend::grounded::{ExecError, ExecResult};
use crate::backend::models::{Handle, HandleSeq};
use crate::backend::types::Type;

/// `PlusLink` / `TimesLink`: fold the numeric arguments, keep the rest.
///
/// `(PlusLink 1 $x 2)` reduces to `(PlusLink $x 3)`; a fully numeric fold
/// reduces to a `NumberNode`.
pub(super) fn sum_product(ty: Type, args: HandleSeq) -> ExecResult<Handle> {
    let (identity, op): (f64, fn(f64, f64) -> f64) = match ty {
        Type::PlusLink => (0.0, |a, b| a + b),
        Type::TimesLink => (1.0, |a, b| a * b),
        _ => return Err(ExecError::IncorrectArgument(format!("{} is not a sum or product", ty))),
    };

    let mut acc = identity;
    let mut rest = HandleSeq::new();
    for arg in args {
        match arg.as_number() {
            Some(n) => acc = op(acc, n),
            None => rest.push(arg),
        }
    }

    if rest.is_empty() {
        return Ok(Handle::number(acc));
    }
    if acc != identity {
        rest.push(Handle::number(acc));
    }
    if rest.len() == 1 {
        return Ok(rest.remove(0));
    }
    Ok(Handle::link(ty, rest))
}

/// `MinusLink` / `DivideLink`: left fold. A single argument is negated or
/// inverted. Any non-numeric argument leaves the link unreduced.
pub(super) fn difference_quotient(ty: Type, args: HandleSeq) -> ExecResult<Handle> {
    let Some(numbers) = args.iter().map(Handle::as_number).collect::<Option<Vec<f64>>>() else {
        return Ok(Handle::link(ty, args));
    };

    let divide = match ty {
        Type::MinusLink => false,
        Type::DivideLink => true,
        _ => return Err(ExecError::IncorrectArgument(format!("{} is not a difference or quotient", ty))),
    };

    let (first, rest) = numbers
        .split_first()
        .ok_or_else(|| ExecError::IncorrectArgument(format!("{} needs at least one argument", ty)))?;

    if rest.is_empty() {
        return if divide {
            checked_div(1.0, *first).map(Handle::number)
        } else {
            Ok(Handle::number(-first))
        };
    }

    let mut acc = *first;
    for n in rest {
        acc = if divide { checked_div(acc, *n)? } else { acc - n };
    }
    Ok(Handle::number(acc))
}

fn checked_div(a: f64, b: f64) -> ExecResult<f64> {
    if b == 0.0 {
        return Err(ExecError::Arithmetic(format!("division by zero: {} / {}", a, b)));
    }
    Ok(a / b)
}

/// `ConcatLink`: names of all (node) arguments joined into a `ConceptNode`.
pub(super) fn concat(args: &[Handle]) -> ExecResult<Handle> {
    let mut out = String::new();
    for arg in args {
        match arg.name() {
            Some(name) => out.push_str(name),
            None => {
                return Err(ExecError::IncorrectArgument(format!(
                    "ConcatLink expects nodes, got {}",
                    arg
                )))
            }
        }
    }
    Ok(Handle::concept(out))
}
