//! Statement bodies and the control-flow constructs that nest them.

use std::fmt::Display;

use super::ConditionalChain;
use crate::{
    Result,
    builder::{Context, Scope, Value},
};

/// The writable body of a function, method, loop or branch.
///
/// Every construct that opens a nested block takes a callback receiving a
/// fresh `BlockContext` one level deeper. The header and the nested body are
/// appended to this block only once the callback has returned successfully,
/// so a failed callback leaves no partial fragment behind.
///
/// ```
/// use pygen_codegen::{BlockContext, Function, Document};
///
/// let mut doc = Document::from_writer(Vec::new());
/// doc.add_function(Function::new("main"), |body: &mut BlockContext| {
///     body.for_range("i", 0, 3, |body| {
///         body.statement("print(i)");
///         Ok(())
///     })?;
///     Ok(())
/// })?;
/// assert!(doc.render()?.contains("    for i in range(0, 3):\n        print(i)\n"));
/// # Ok::<(), pygen_codegen::Error>(())
/// ```
#[derive(Debug)]
pub struct BlockContext {
    scope: Scope,
}

impl BlockContext {
    pub(crate) fn new(scope: Scope) -> Self {
        Self { scope }
    }

    pub(crate) fn into_scope(self) -> Scope {
        self.scope
    }

    /// Emit an arbitrary statement or expression.
    pub fn statement(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.scope.write_line(text.as_ref());
        self
    }

    /// Emit a statement built from a `{}` template.
    pub fn statement_fmt(&mut self, template: &str, args: &[&dyn Display]) -> Result<&mut Self> {
        self.scope.write_fmt_line(template, args)?;
        Ok(self)
    }

    /// Emit `name: type = expr` (or `name = expr` for untyped values).
    pub fn assign(&mut self, target: &Value, expr: impl AsRef<str>) -> &mut Self {
        let line = format!("{} = {}", target.as_target(), expr.as_ref());
        self.statement(line)
    }

    pub fn pass(&mut self) -> &mut Self {
        self.statement("pass")
    }

    /// Open `if <condition>:` and return the chain for `elif`/`else`.
    pub fn if_<F>(&mut self, condition: impl AsRef<str>, body: F) -> Result<ConditionalChain<'_>>
    where
        F: FnOnce(&mut BlockContext) -> Result<()>,
    {
        open_block(
            &mut self.scope,
            format!("if {}:", condition.as_ref()),
            body,
        )?;
        Ok(ConditionalChain::new(&mut self.scope))
    }

    /// Open `while <condition>:`.
    pub fn while_<F>(&mut self, condition: impl AsRef<str>, body: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut BlockContext) -> Result<()>,
    {
        open_block(
            &mut self.scope,
            format!("while {}:", condition.as_ref()),
            body,
        )?;
        Ok(self)
    }

    /// Open `for <var> in range(<start>, <end>):` (end exclusive).
    pub fn for_range<F>(
        &mut self,
        var: impl AsRef<str>,
        start: i64,
        end: i64,
        body: F,
    ) -> Result<&mut Self>
    where
        F: FnOnce(&mut BlockContext) -> Result<()>,
    {
        open_block(
            &mut self.scope,
            format!("for {} in range({}, {}):", var.as_ref(), start, end),
            body,
        )?;
        Ok(self)
    }

    /// Open `for <index>, <item> in enumerate(<iterable>):`.
    pub fn for_enumerate<F>(
        &mut self,
        index: impl AsRef<str>,
        item: impl AsRef<str>,
        iterable: impl AsRef<str>,
        body: F,
    ) -> Result<&mut Self>
    where
        F: FnOnce(&mut BlockContext) -> Result<()>,
    {
        open_block(
            &mut self.scope,
            format!(
                "for {}, {} in enumerate({}):",
                index.as_ref(),
                item.as_ref(),
                iterable.as_ref()
            ),
            body,
        )?;
        Ok(self)
    }
}

impl Context for BlockContext {
    fn scope(&self) -> &Scope {
        &self.scope
    }

    fn scope_mut(&mut self) -> &mut Scope {
        &mut self.scope
    }
}

/// Run `body` against a fresh child block and, on success, append
/// `header` followed by the child's text to `parent`.
///
/// An empty body becomes `pass`.
pub(crate) fn open_block<F>(parent: &mut Scope, header: String, body: F) -> Result<()>
where
    F: FnOnce(&mut BlockContext) -> Result<()>,
{
    let mut child = BlockContext::new(parent.child());
    body(&mut child)?;

    let mut child = child.into_scope();
    if child.is_empty() {
        child.write_line("pass");
    }

    tracing::trace!(depth = parent.depth(), %header, "closing block");
    parent.write_line(&header);
    parent.splice(child);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Indent};

    fn block(depth: usize) -> BlockContext {
        BlockContext::new(Scope::at(depth, Indent::PYTHON))
    }

    fn text(block: BlockContext) -> String {
        block.into_scope().into_buffer().into_string()
    }

    #[test]
    fn test_statements_in_order() {
        let mut b = block(1);
        b.statement("a = 1").statement("b = 2");
        assert_eq!(text(b), "    a = 1\n    b = 2\n");
    }

    #[test]
    fn test_assign() {
        let mut b = block(0);
        b.assign(&Value::new("total", "int"), "0")
            .assign(&Value::new("name", ""), "'x'");
        assert_eq!(text(b), "total: int = 0\nname = 'x'\n");
    }

    #[test]
    fn test_while() {
        let mut b = block(1);
        b.while_("n > 0", |body| {
            body.statement("n -= 1");
            Ok(())
        })
        .unwrap();
        assert_eq!(text(b), "    while n > 0:\n        n -= 1\n");
    }

    #[test]
    fn test_range_is_end_exclusive() {
        let mut b = block(0);
        b.for_range("i", 1, 10, |body| {
            body.statement("i += 1");
            Ok(())
        })
        .unwrap();
        assert_eq!(text(b), "for i in range(1, 10):\n    i += 1\n");
    }

    #[test]
    fn test_negative_range_bounds() {
        let mut b = block(0);
        b.for_range("i", -3, 0, |body| {
            body.pass();
            Ok(())
        })
        .unwrap();
        assert_eq!(text(b), "for i in range(-3, 0):\n    pass\n");
    }

    #[test]
    fn test_enumerate() {
        let mut b = block(0);
        b.for_enumerate("i", "v", "items", |body| {
            body.statement("print(i, v)");
            Ok(())
        })
        .unwrap();
        assert_eq!(
            text(b),
            "for i, v in enumerate(items):\n    print(i, v)\n"
        );
    }

    #[test]
    fn test_empty_body_gets_pass() {
        let mut b = block(0);
        b.while_("True", |_| Ok(())).unwrap();
        assert_eq!(text(b), "while True:\n    pass\n");
    }

    #[test]
    fn test_order_around_nested_block() {
        let mut b = block(1);
        b.statement("s1()");
        b.for_range("i", 0, 2, |body| {
            body.statement("loop()");
            Ok(())
        })
        .unwrap()
        .statement("s2()");
        assert_eq!(
            text(b),
            "    s1()\n    for i in range(0, 2):\n        loop()\n    s2()\n"
        );
    }

    #[test]
    fn test_deep_nesting_indentation() {
        let mut b = block(0);
        b.while_("a", |b1| {
            b1.for_range("i", 0, 1, |b2| {
                b2.if_("i", |b3| {
                    b3.statement("deep()");
                    Ok(())
                })?;
                Ok(())
            })?;
            b1.statement("after()");
            Ok(())
        })
        .unwrap();

        let out = text(b);
        for line in out.lines() {
            let depth = (line.len() - line.trim_start().len()) / 4;
            let expected = match line.trim_start() {
                "while a:" => 0,
                "for i in range(0, 1):" | "after()" => 1,
                "if i:" => 2,
                "deep()" => 3,
                other => panic!("unexpected line {other:?}"),
            };
            assert_eq!(depth, expected, "line {line:?}");
        }
    }

    #[test]
    fn test_failed_callback_leaves_parent_untouched() {
        let mut b = block(0);
        b.statement("before()");
        let err = b
            .while_("True", |body| {
                body.statement("partial()");
                Err(Error::callback("boom"))
            })
            .unwrap_err();

        assert_eq!(err.to_string(), "boom");
        assert_eq!(text(b), "before()\n");
    }

    #[test]
    fn test_statement_fmt_error_propagates() {
        let mut b = block(0);
        let result = b.if_("x", |body| {
            body.statement_fmt("{} = {}", &[&"y"])?;
            Ok(())
        });
        assert!(matches!(result, Err(Error::FormatArity { .. })));
        assert_eq!(text(b), "");
    }
}
