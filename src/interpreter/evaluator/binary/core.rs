use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a binary operation between two values.
    ///
    /// This function routes the operation to specialized handlers depending on
    /// the operator. Arithmetic operators use `eval_scalar_op`, modulo uses
    /// `eval_mod`, power calls `eval_pow` and unit conversion calls
    /// `eval_convert`.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use lmath::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let left = Value::Number(3.0);
    /// let right = Value::Number(4.0);
    ///
    /// let result = Context::eval_binary(BinaryOperator::Add, &left, &right);
    /// assert_eq!(result.unwrap(), Value::Number(7.0));
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{Add, Convert, Div, ImplicitMul, Mod, Mul, Pow, Sub};

        match op {
            Add | Sub | Mul | ImplicitMul | Div => Self::eval_scalar_op(op, left, right),
            Mod => Self::eval_mod(left, right),
            Pow => Self::eval_pow(left, right),
            Convert => Self::eval_convert(left, right),
        }
    }
}
