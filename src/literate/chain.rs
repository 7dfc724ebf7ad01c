use crate::literate::{
    block::Block,
    engine::{Engine, ValueOf},
    scope::Scope,
};

/// The blocks of a document together with the scope left by the last one.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain<V> {
    blocks: Vec<Block>,
    scope:  Scope<V>,
}

impl<V> Chain<V> {
    /// The blocks in body order.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The scope after the last body.
    #[must_use]
    pub const fn scope(&self) -> &Scope<V> {
        &self.scope
    }

    /// Whether any block ended in an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.blocks.iter().any(Block::is_error)
    }

    /// Splits the chain into its blocks and final scope.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Block>, Scope<V>) {
        (self.blocks, self.scope)
    }
}

/// Evaluates bodies in order, starting from an empty scope and handing each
/// block's scope to the next body.
///
/// A failing body does not stop the chain; the next body simply sees the
/// scope as it was before the failure.
///
/// # Parameters
/// - `engine`: The expression language.
/// - `bodies`: The raw bodies in document order.
///
/// # Returns
/// The resulting [`Chain`].
///
/// # Example
/// ```
/// use lmath::{interpreter::Interpreter, literate::chain::evaluate_chain};
///
/// let chain = evaluate_chain(&Interpreter, ["!a = 2", "= a +", "= a * 3"]);
///
/// assert!(chain.blocks()[1].is_error());
/// assert_eq!(chain.blocks()[2].display_result(), Some("6"));
/// ```
pub fn evaluate_chain<E, I, S>(engine: &E, bodies: I) -> Chain<ValueOf<E>>
    where E: Engine,
          I: IntoIterator<Item = S>,
          S: AsRef<str>
{
    let mut scope = Scope::new();
    let mut blocks = Vec::new();
    for body in bodies {
        let evaluated = Block::evaluate(engine, body.as_ref(), &scope);
        blocks.push(evaluated.block);
        scope = evaluated.scope;
    }
    log::debug!("evaluated {} blocks, {} bindings in scope", blocks.len(), scope.len());
    Chain { blocks, scope }
}
