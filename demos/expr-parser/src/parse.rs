//! The expression grammar.
//!
//! ```text
//! expr   :: term   ( ('+' | '-') term   )*
//! term   :: factor ( ('*' | '/') factor )*
//! factor :: natural | '(' expr ')'
//! ```
//!
//! Whitespace after any token is skipped. Each chain folds to the left, so
//! `8-2-1` is `(- (- 8 2) 1)`.

use seekparse::{Parser, Rec, center, cons, exact_char, fix, many, natural, next, token};

use crate::ast::{Expr, Op};

/// Builds the expression grammar. The returned `Rec` owns it.
pub fn grammar() -> Rec<Expr> {
    fix(|expr| {
        let factor = token(natural())
            .map(Expr::Constant)
            .or(center(token(exact_char('(')), expr, token(exact_char(')'))));
        let term = chain(factor, Op::Mul, Op::Div);
        chain(term, Op::Add, Op::Sub)
    })
}

/// `operand ( (first | second) operand )*`, folded to the left.
fn chain<P>(operand: P, first: Op, second: Op) -> impl Parser<Output = Expr> + Clone
where
    P: Parser<Output = Expr> + Clone,
{
    let step = |op: Op| {
        next(
            token(exact_char(op.symbol())),
            operand.clone().map(move |rhs| (op, rhs)),
        )
    };
    let tail = many(step(first).or(step(second)));
    // The head's operator is never read.
    let head = operand.clone().map(move |lhs| (first, lhs));
    cons(head, tail).map(fold_left)
}

fn fold_left(links: Vec<(Op, Expr)>) -> Expr {
    let mut links = links.into_iter();
    // `cons` always yields the head
    let Some((_, seed)) = links.next() else {
        return Expr::Constant(0);
    };
    links.fold(seed, |lhs, (op, rhs)| Expr::binary(op, lhs, rhs))
}
