//! Function and method definitions.

use std::collections::HashSet;

use super::BlockContext;
use crate::{
    Error, Result,
    builder::{Indent, Scope, TextBuffer, Value},
};

/// Declaration of a function or method.
///
/// The return statement is synthesized from the declared return values and
/// always closes the body, after everything the body callback emitted.
///
/// ```
/// use pygen_codegen::{Function, Value};
///
/// let f = Function::new("divmod_")
///     .param(Value::new("a", "int"))
///     .param(Value::new("b", "int"))
///     .returns(Value::new("q", "int"))
///     .returns(Value::new("r", "int"));
///
/// assert_eq!(f.signature(), "def divmod_(a:int, b:int) -> Tuple[int,int]:");
/// assert_eq!(f.return_statement(), "return (q,r)");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Function {
    name: String,
    params: Vec<Value>,
    returns: Vec<Value>,
    doc: Option<String>,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a parameter.
    pub fn param(mut self, param: impl Into<Value>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Add multiple parameters.
    pub fn params(mut self, params: impl IntoIterator<Item = Value>) -> Self {
        self.params.extend(params);
        self
    }

    /// Add a return value.
    pub fn returns(mut self, value: impl Into<Value>) -> Self {
        self.returns.push(value.into());
        self
    }

    /// Add multiple return values.
    pub fn returns_all(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.returns.extend(values);
        self
    }

    /// Set the docstring. An empty string means no docstring.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Make the receiver the first parameter, unless it already is.
    pub(crate) fn with_receiver(mut self) -> Self {
        if !self.params.first().is_some_and(Value::is_receiver) {
            self.params.insert(0, Value::receiver());
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Value] {
        &self.params
    }

    pub fn return_values(&self) -> &[Value] {
        &self.returns
    }

    /// Comma-separated parameter list.
    pub fn parameter_list(&self) -> String {
        self.params
            .iter()
            .map(Value::as_param)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Return type annotation derived from the return values.
    pub fn return_annotation(&self) -> String {
        match self.returns.as_slice() {
            [] => "None".to_string(),
            [single] => single.ty().to_string(),
            many => format!(
                "Tuple[{}]",
                many.iter().map(Value::ty).collect::<Vec<_>>().join(",")
            ),
        }
    }

    /// The `return` line closing the body.
    pub fn return_statement(&self) -> String {
        match self.returns.as_slice() {
            [] => "return".to_string(),
            [single] => format!("return {}", single.name()),
            many => format!(
                "return ({})",
                many.iter().map(Value::name).collect::<Vec<_>>().join(",")
            ),
        }
    }

    /// The `def` line.
    pub fn signature(&self) -> String {
        format!(
            "def {}({}) -> {}:",
            self.name,
            self.parameter_list(),
            self.return_annotation()
        )
    }

    /// Render this function at `depth`, letting `body` fill in the statements.
    pub(crate) fn render<F>(&self, depth: usize, indent: Indent, body: F) -> Result<TextBuffer>
    where
        F: FnOnce(&mut BlockContext) -> Result<()>,
    {
        self.check_parameters()?;

        let mut scope = Scope::at(depth, indent);
        let mut block = BlockContext::new(scope.child());
        if let Some(doc) = self.doc.as_deref().filter(|d| !d.is_empty()) {
            block.statement(format!("\"\"\"{doc}\"\"\""));
        }

        body(&mut block)?;
        block.statement(self.return_statement());

        scope.write_line(&self.signature());
        scope.splice(block.into_scope());
        tracing::debug!(function = %self.name, depth, "rendered function");
        Ok(scope.into_buffer())
    }

    fn check_parameters(&self) -> Result<()> {
        let mut seen = HashSet::new();
        match self.params.iter().find(|p| !seen.insert(p.name())) {
            Some(dup) => Err(Error::DuplicateParameter {
                function: self.name.clone(),
                name: dup.name().to_string(),
            }),
            None => Ok(()),
        }
    }
}
