use std::fmt;

use crate::util::num::format_auto;

/// An abstract syntax tree (AST) node representing an expression.
///
/// `Expr` covers every construct that can appear on the right hand side of an
/// assignment: numeric constants, symbols (variables, constants and units),
/// operators, function calls and parentheses. Parentheses are kept as their
/// own node so that formatting reproduces the formula as it was written.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric constant such as `3`, `0.5` or `2e-3`.
    Number(f64),
    /// A symbol reference such as `x`, `pi` or `cm`.
    Symbol(String),
    /// A prefix or postfix operator applied to one operand.
    Unary {
        /// The operator.
        op:   UnaryOperator,
        /// The operand.
        expr: Box<Expr>,
    },
    /// An infix operator applied to two operands.
    Binary {
        /// The left operand.
        left:  Box<Expr>,
        /// The operator.
        op:    BinaryOperator,
        /// The right operand.
        right: Box<Expr>,
    },
    /// A function call such as `sqrt(x)` or `f(1, 2)`.
    Call {
        /// The function name.
        name:      String,
        /// The argument expressions.
        arguments: Vec<Expr>,
    },
    /// An expression wrapped in parentheses.
    Parenthesis(Box<Expr>),
}

/// Represents a user-defined function definition.
///
/// A function binds parameter names to an expression body, e.g.
/// `f(x, y) = x ^ 2 + y`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:   String,
    /// The parameter names.
    pub params: Vec<String>,
    /// The body expression evaluated when the function is called.
    pub body:   Expr,
}

/// Represents a single statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A standalone expression evaluated for its result.
    Expression(Expr),
    /// A variable assignment binding a name to an expression.
    Assignment {
        /// The name of the variable.
        name:  String,
        /// The value which is being assigned.
        value: Expr,
    },
    /// A user-defined function assignment.
    Function(FunctionDef),
}

/// One statement of a sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceItem {
    /// The statement.
    pub statement: Statement,
    /// `false` when the statement was terminated by `;`.
    pub visible:   bool,
}

/// The root of a parsed formula.
///
/// A formula consisting of exactly one statement without separator parses to
/// [`Node::Statement`]; anything separated by `;` or newlines parses to
/// [`Node::Sequence`], even if only one statement remains.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A single statement.
    Statement(Statement),
    /// Statements evaluated in order.
    Sequence(Vec<SequenceItem>),
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Multiplication by juxtaposition (`5 cm`, `2 x`)
    ImplicitMul,
    /// Division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
    /// Exponentiation (`^`)
    Pow,
    /// Unit conversion (`to`, `in`)
    Convert,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Unary plus (e.g. `+x`).
    Plus,
    /// Postfix factorial (e.g. `x!`).
    Factorial,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::ImplicitMul => "",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
            Self::Convert => "to",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for Expr {
    /// Renders the expression with spaced binary operators.
    ///
    /// ## Example
    /// ```
    /// use lmath::ast::{BinaryOperator, Expr};
    ///
    /// let expr = Expr::Binary { left:  Box::new(Expr::Number(5.0)),
    ///                           op:    BinaryOperator::ImplicitMul,
    ///                           right: Box::new(Expr::Symbol("cm".to_string())), };
    ///
    /// assert_eq!(expr.to_string(), "5 cm");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", format_auto(*n)),
            Self::Symbol(name) => write!(f, "{name}"),
            Self::Unary { op, expr } => match op {
                UnaryOperator::Negate => write!(f, "-{expr}"),
                UnaryOperator::Plus => write!(f, "+{expr}"),
                UnaryOperator::Factorial => write!(f, "{expr}!"),
            },
            Self::Binary { left,
                           op: BinaryOperator::ImplicitMul,
                           right, } => write!(f, "{left} {right}"),
            Self::Binary { left, op, right } => write!(f, "{left} {op} {right}"),
            Self::Call { name, arguments } => {
                write!(f, "{name}(")?;
                write_comma_separated(f, arguments)?;
                write!(f, ")")
            },
            Self::Parenthesis(expr) => write!(f, "({expr})"),
        }
    }
}

impl fmt::Display for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        write_comma_separated(f, &self.params)?;
        write!(f, ") = {}", self.body)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression(expr) => write!(f, "{expr}"),
            Self::Assignment { name, value } => write!(f, "{name} = {value}"),
            Self::Function(def) => write!(f, "{def}"),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Statement(statement) => write!(f, "{statement}"),
            Self::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", item.statement)?;
                    if !item.visible {
                        write!(f, ";")?;
                    }
                }
                Ok(())
            },
        }
    }
}

fn write_comma_separated<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
