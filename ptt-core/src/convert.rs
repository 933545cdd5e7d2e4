//! Conversion of the syntax trees produced by [`ptt_parser`] into engine values.

use crate::{
    consts::{DIVISION, MINUS, PRODUCT, SUM},
    error::{DuplicateQuantifier, Error, UnusedQuantifier},
    expr::Expr,
    relation::Relation,
    rule::Rule,
    symbol::Symbol,
};
use ptt_parser::parser::{
    ast,
    token::{BinOpKind, RelOpKind, UnaryOpKind},
    Parser,
};
use std::{
    collections::{HashMap, HashSet},
    ops::Range,
};

impl From<&ast::Expr> for Expr {
    fn from(expr: &ast::Expr) -> Self {
        match expr {
            ast::Expr::Atom(atom) => Expr::atom(&atom.name),
            ast::Expr::Paren(paren) => Expr::from(paren.innermost()),
            ast::Expr::Unary(unary) => {
                let symbol = match unary.op.kind {
                    UnaryOpKind::Neg => MINUS.clone(),
                };
                Expr::unary(symbol, Expr::from(unary.operand.as_ref()))
            },
            ast::Expr::Binary(binary) => {
                let symbol = match binary.op.kind {
                    BinOpKind::Mul => PRODUCT.clone(),
                    BinOpKind::Div => DIVISION.clone(),
                    BinOpKind::Add => SUM.clone(),
                    BinOpKind::Sub => MINUS.clone(),
                };
                Expr::binary(symbol, binary.lhs.as_ref().into(), binary.rhs.as_ref().into())
            },
        }
    }
}

impl From<&ast::Relation> for Relation {
    fn from(relation: &ast::Relation) -> Self {
        let lhs = Expr::from(&relation.lhs);
        let rhs = Expr::from(&relation.rhs);
        match relation.op.kind {
            RelOpKind::Eq => lhs.equals(rhs),
            RelOpKind::NotEq => lhs.not_equals(rhs),
            RelOpKind::Less => lhs.less_than(rhs),
            RelOpKind::Greater => lhs.greater_than(rhs),
            RelOpKind::LessEq => lhs.at_most(rhs),
            RelOpKind::GreaterEq => lhs.at_least(rhs),
        }
    }
}

impl TryFrom<&ast::RuleDecl> for Rule {
    type Error = Error;

    /// Builds the rule a declaration describes. Every quantified variable must be listed once,
    /// and must appear in at least one of the rule's relations.
    fn try_from(decl: &ast::RuleDecl) -> Result<Self, Error> {
        let mut first_seen = HashMap::<&str, Range<usize>>::new();
        for atom in &decl.quantified {
            if let Some(first) = first_seen.get(atom.name.as_str()) {
                return Err(Error::new(
                    vec![first.clone(), atom.span.clone()],
                    DuplicateQuantifier { name: atom.name.clone() },
                ));
            }
            first_seen.insert(&atom.name, atom.span.clone());
        }

        let mut used = HashSet::new();
        for relation in std::iter::once(&decl.corollary).chain(&decl.conditions) {
            let mut visit = |atom: &ast::Atom| {
                used.insert(atom.name.clone());
            };
            relation.lhs.visit_atoms(&mut visit);
            relation.rhs.visit_atoms(&mut visit);
        }
        if let Some(unused) = decl.quantified.iter().find(|atom| !used.contains(&atom.name)) {
            return Err(Error::new(
                vec![unused.span.clone()],
                UnusedQuantifier { name: unused.name.clone() },
            ));
        }

        Ok(Rule::implication(
            decl.name.name.as_str(),
            decl.quantified.iter().map(|atom| Symbol::new(atom.name.as_str())),
            Relation::from(&decl.corollary),
            decl.conditions.iter().map(Relation::from),
        ))
    }
}

/// Parses a complete expression, such as `(x * y) * z`.
pub fn parse_expr(source: &str) -> Result<Expr, Error> {
    let expr = Parser::new(source).try_parse_full::<ast::Expr>()?;
    Ok(Expr::from(&expr))
}

/// Parses a complete relation, such as `x + 0 = x`.
pub fn parse_relation(source: &str) -> Result<Relation, Error> {
    let relation = Parser::new(source).try_parse_full::<ast::Relation>()?;
    Ok(Relation::from(&relation))
}

/// Parses a complete rule declaration, such as `rule neutral [x]: x * 1 = x`.
pub fn parse_rule(source: &str) -> Result<Rule, Error> {
    let decl = Parser::new(source).try_parse_full::<ast::RuleDecl>()?;
    Rule::try_from(&decl)
}
