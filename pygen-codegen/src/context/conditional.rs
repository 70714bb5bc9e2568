//! `elif`/`else` continuations.

use super::{BlockContext, open_block};
use crate::{Result, builder::Scope};

/// Continuation of an `if` construct.
///
/// Only [`BlockContext::if_`] and [`ConditionalChain::elif`] produce a
/// chain. It holds the originating block's buffer exclusively, so every
/// continuation is written right after the previous branch body, at the
/// same depth as the `if`. [`else_`](ConditionalChain::else_) consumes the
/// chain and ends it.
///
/// ```
/// use pygen_codegen::{Document, Function};
///
/// let mut doc = Document::from_writer(Vec::new());
/// doc.add_function(Function::new("sign"), |body| {
///     body.if_("x > 0", |b| {
///         b.statement("s = 1");
///         Ok(())
///     })?
///     .elif("x < 0", |b| {
///         b.statement("s = -1");
///         Ok(())
///     })?
///     .else_(|b| {
///         b.statement("s = 0");
///         Ok(())
///     })
/// })?;
/// # Ok::<(), pygen_codegen::Error>(())
/// ```
#[derive(Debug)]
pub struct ConditionalChain<'a> {
    scope: &'a mut Scope,
}

impl<'a> ConditionalChain<'a> {
    pub(crate) fn new(scope: &'a mut Scope) -> Self {
        Self { scope }
    }

    /// Depth of the `if`/`elif`/`else` header lines.
    pub fn depth(&self) -> usize {
        self.scope.depth()
    }

    /// Add `elif <condition>:` and its body.
    pub fn elif<F>(self, condition: impl AsRef<str>, body: F) -> Result<ConditionalChain<'a>>
    where
        F: FnOnce(&mut BlockContext) -> Result<()>,
    {
        open_block(self.scope, format!("elif {}:", condition.as_ref()), body)?;
        Ok(self)
    }

    /// Add the terminal `else:` branch.
    pub fn else_<F>(self, body: F) -> Result<()>
    where
        F: FnOnce(&mut BlockContext) -> Result<()>,
    {
        open_block(self.scope, "else:".to_string(), body)
    }
}
