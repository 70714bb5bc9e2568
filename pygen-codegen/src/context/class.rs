//! Class bodies.

use indexmap::IndexMap;

use super::{BlockContext, Function};
use crate::{
    Error, Result,
    builder::{Context, Indent, Scope, TextBuffer, Value},
};

/// Builder surface for one class definition.
///
/// Member fields only become text when the class is rendered, where they
/// turn into the parameters and assignments of a synthesized `__init__`.
/// Methods are rendered as soon as they are declared, in declaration order.
#[derive(Debug)]
pub struct ClassContext {
    name: String,
    doc: String,
    depth: usize,
    indent: Indent,
    fields: IndexMap<String, Value>,
    init_extra: TextBuffer,
    methods: Vec<TextBuffer>,
}

impl ClassContext {
    pub(crate) fn new(
        name: impl Into<String>,
        doc: impl Into<String>,
        depth: usize,
        indent: Indent,
    ) -> Self {
        Self {
            name: name.into(),
            doc: doc.into(),
            depth,
            indent,
            fields: IndexMap::new(),
            init_extra: TextBuffer::new(),
            methods: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Declare a member field.
    ///
    /// The name must be unique within the class and must not be the
    /// receiver's name.
    pub fn field(&mut self, field: impl Into<Value>) -> Result<&mut Self> {
        let field = field.into();
        if field.name() == Value::RECEIVER_NAME || self.fields.contains_key(field.name()) {
            return Err(Error::DuplicateField {
                class: self.name.clone(),
                field: field.name().to_string(),
            });
        }
        self.fields.insert(field.name().to_string(), field);
        Ok(self)
    }

    /// Declare several member fields in order.
    pub fn fields(&mut self, fields: impl IntoIterator<Item = Value>) -> Result<&mut Self> {
        for field in fields {
            self.field(field)?;
        }
        Ok(self)
    }

    /// All constructor parameters: the receiver followed by the fields.
    pub fn member_fields(&self) -> Vec<Value> {
        std::iter::once(Value::receiver())
            .chain(self.fields.values().cloned())
            .collect()
    }

    /// Declare a method. The receiver is prepended to its parameters.
    pub fn method<F>(&mut self, function: Function, body: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut BlockContext) -> Result<()>,
    {
        let function = function.with_receiver();
        let text = function.render(self.depth + 1, self.indent, body)?;
        self.methods.push(text);
        Ok(self)
    }

    /// Add statements to the synthesized constructor, after the field
    /// assignments.
    pub fn constructor_body<F>(&mut self, body: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut BlockContext) -> Result<()>,
    {
        let mut block = BlockContext::new(Scope::at(self.depth + 2, self.indent));
        body(&mut block)?;
        self.init_extra
            .append_buffer(block.into_scope().buffer());
        Ok(self)
    }

    /// The synthesized `__init__` declaration.
    pub fn constructor(&self) -> Function {
        Function::new("__init__").params(self.member_fields())
    }

    /// Render the class header, docstring, constructor and methods.
    pub fn render(&self) -> Result<TextBuffer> {
        let mut scope = Scope::at(self.depth, self.indent);
        scope.write_line(&format!("class {}:", self.name));

        let mut body = scope.child();
        if !self.doc.is_empty() {
            body.write_line(&format!("\"\"\"{}\"\"\"", self.doc));
        }

        let constructor = self
            .constructor()
            .render(self.depth + 1, self.indent, |init| {
                for field in self.fields.values() {
                    init.statement(format!("self.{0} = {0}", field.name()));
                }
                init.scope_mut().append_buffer(&self.init_extra);
                Ok(())
            })?;
        body.append_buffer(&constructor);

        for method in &self.methods {
            body.blank_line().append_buffer(method);
        }

        scope.splice(body);
        tracing::debug!(
            class = %self.name,
            fields = self.fields.len(),
            methods = self.methods.len(),
            "rendered class"
        );
        Ok(scope.into_buffer())
    }
}
