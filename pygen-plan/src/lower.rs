use std::{io::Write, path::Path};

use pygen_codegen::{
    BlockContext, ClassContext, Document, DocumentOptions, Error, FileRules, Function, Indent,
    Value, WriteResult, write_destination,
};
use tracing::debug;

use crate::{ClassDef, DocumentConfig, FunctionDef, Plan, Statement, ValueDef};

impl From<&ValueDef> for Value {
    fn from(def: &ValueDef) -> Self {
        Value::new(&def.name, &def.ty)
    }
}

impl DocumentConfig {
    /// Document options described by this table.
    pub fn options(&self) -> DocumentOptions {
        let indent = if self.tabs {
            Indent::Tab
        } else {
            self.indent.map(Indent::Spaces).unwrap_or_default()
        };
        let options = DocumentOptions::default().with_indent(indent);
        match &self.header {
            Some(header) => options.with_header(header),
            None => options,
        }
    }
}

impl FunctionDef {
    /// The function signature, without its body.
    pub fn to_function(&self) -> Function {
        let function = Function::new(&self.name)
            .params(self.params.iter().map(Value::from))
            .returns_all(self.returns.iter().map(Value::from));
        match &self.doc {
            Some(doc) => function.doc(doc),
            None => function,
        }
    }
}

impl Plan {
    /// Emit every item of the plan into `doc`.
    ///
    /// Header lines come first (imports, then `from` imports, then
    /// expressions), followed by globals, classes and functions, each in
    /// declaration order.
    pub fn apply<W: Write>(&self, doc: &mut Document<W>) -> pygen_codegen::Result<()> {
        for module in &self.imports {
            doc.import(module)?;
        }
        for import in &self.from_imports {
            doc.import_from(&import.module, &import.symbols)?;
        }
        for expression in &self.expressions {
            doc.expression(expression)?;
        }
        for global in &self.globals {
            doc.global(&Value::new(&global.name, &global.ty), &global.value)?;
        }
        for class in &self.classes {
            doc.add_class(&class.name, &class.doc, |cls| lower_class(cls, class))?;
        }
        for function in &self.functions {
            doc.add_function(function.to_function(), |body| emit_body(body, &function.body))?;
        }

        debug!(
            classes = self.classes.len(),
            functions = self.functions.len(),
            "applied plan"
        );
        Ok(())
    }

    /// Lower the plan in memory with its own document options.
    pub fn render(&self) -> pygen_codegen::Result<String> {
        let mut doc = Document::from_writer_with(Vec::new(), self.document.options());
        self.apply(&mut doc)?;
        let text = doc.render()?;
        doc.discard();
        Ok(text)
    }

    /// Render the plan, then write it to `path` under `rules`.
    ///
    /// The destination is untouched when lowering fails.
    pub fn write_to(&self, path: &Path, rules: &FileRules) -> pygen_codegen::Result<WriteResult> {
        let text = self.render()?;
        write_destination(path, rules, text.as_bytes()).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn lower_class(cls: &mut ClassContext, class: &ClassDef) -> pygen_codegen::Result<()> {
    cls.fields(class.fields.iter().map(Value::from))?;
    if !class.init.is_empty() {
        cls.constructor_body(|body| emit_body(body, &class.init))?;
    }
    for method in &class.methods {
        cls.method(method.to_function(), |body| emit_body(body, &method.body))?;
    }
    Ok(())
}

fn emit_body(block: &mut BlockContext, body: &[Statement]) -> pygen_codegen::Result<()> {
    for statement in body {
        emit_statement(block, statement)?;
    }
    Ok(())
}

fn emit_statement(block: &mut BlockContext, statement: &Statement) -> pygen_codegen::Result<()> {
    match statement {
        Statement::Line(text) => {
            block.statement(text);
        }
        Statement::Assign(stmt) => {
            block.assign(&Value::from(&stmt.assign), &stmt.value);
        }
        Statement::If(stmt) => {
            let mut chain = block.if_(&stmt.condition, |b| emit_body(b, &stmt.then))?;
            for branch in &stmt.elif {
                chain = chain.elif(&branch.condition, |b| emit_body(b, &branch.then))?;
            }
            if let Some(otherwise) = &stmt.otherwise {
                chain.else_(|b| emit_body(b, otherwise))?;
            }
        }
        Statement::While(stmt) => {
            block.while_(&stmt.condition, |b| emit_body(b, &stmt.body))?;
        }
        Statement::For(stmt) => {
            block.for_range(&stmt.var, stmt.start, stmt.end, |b| emit_body(b, &stmt.body))?;
        }
        Statement::Enumerate(stmt) => {
            block.for_enumerate(&stmt.index, &stmt.item, &stmt.iterable, |b| {
                emit_body(b, &stmt.body)
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lower(src: &str) -> String {
        let plan: Plan = src.parse().unwrap();
        let mut doc = Document::from_writer_with(Vec::new(), plan.document.options());
        plan.apply(&mut doc).unwrap();
        doc.render().unwrap()
    }

    #[test]
    fn test_header_order() {
        let text = lower(
            r#"
imports = ["os", "sys"]
expressions = ["print('loaded')"]

[[from_imports]]
module = "typing"
symbols = ["List", "Any"]
"#,
        );
        assert_eq!(
            text,
            "import os\nimport sys\nfrom typing import List, Any\nprint('loaded')\n\n\n"
        );
    }

    #[test]
    fn test_function_matches_api() {
        let text = lower(
            r#"
[[functions]]
name = "add"
doc = "Sum"
params = [{ name = "a", type = "int" }, { name = "b", type = "int" }]
returns = [{ name = "s", type = "int" }]
body = ["s = a + b"]
"#,
        );

        let mut doc = Document::from_writer(Vec::new());
        doc.add_function(
            Function::new("add")
                .params([Value::new("a", "int"), Value::new("b", "int")])
                .returns(("s", "int"))
                .doc("Sum"),
            |body| {
                body.statement("s = a + b");
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(text, doc.render().unwrap());
    }

    #[test]
    fn test_conditional_without_else() {
        let text = lower(
            r#"
[[functions]]
name = "f"
body = [{ if = "a", then = ["x()"], elif = [{ if = "b" }] }, "y()"]
"#,
        );
        assert!(text.contains("    if a:\n        x()\n    elif b:\n        pass\n    y()\n"));
    }

    #[test]
    fn test_class_init_and_methods() {
        let text = lower(
            r#"
[[classes]]
name = "Dev"
fields = [{ name = "name", type = "str" }]
init = ["self.active = True"]

[[classes.methods]]
name = "rename"
params = [{ name = "new_name", type = "str" }]
body = ["self.name = new_name"]
"#,
        );
        assert!(text.contains(
            "        self.name = name\n        self.active = True\n        return\n"
        ));
        assert!(text.contains("    def rename(self, new_name:str) -> None:\n"));
    }

    #[test]
    fn test_tab_indent_option() {
        let text = lower(
            r#"
[document]
tabs = true

[[functions]]
name = "f"
body = [{ while = "x", body = ["x = step(x)"] }]
"#,
        );
        assert!(text.contains("def f() -> None:\n\twhile x:\n\t\tx = step(x)\n\treturn\n"));
    }

    #[test]
    fn test_render_uses_document_options() {
        let plan: Plan = "[document]\nindent = 2\n\n[[functions]]\nname = \"f\"\n"
            .parse()
            .unwrap();
        assert_eq!(plan.render().unwrap(), "\n\ndef f() -> None:\n  return\n\n");
    }

    #[test]
    fn test_options_header() {
        let config = DocumentConfig {
            indent: Some(2),
            header: Some("generated".to_string()),
            ..Default::default()
        };
        let options = config.options();
        assert_eq!(options.indent, Indent::Spaces(2));
        assert_eq!(options.header.as_deref(), Some("generated"));
    }
}
