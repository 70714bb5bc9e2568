//! The built-in demo module, assembled through the library API.

use std::io::Write;

use pygen_codegen::{Document, Function, Result, Value};

/// Fill `doc` with a hello-world entry point, an arithmetic helper and a
/// small class.
pub fn build<W: Write>(doc: &mut Document<W>) -> Result<()> {
    doc.import_from("typing", ["List", "Literal", "Any"])?;

    doc.add_function(Function::new("main").doc("hello world!"), |ctx| {
        ctx.statement("print(\"hello world\")");
        ctx.for_range("i", 1, 10, |ctx| {
            ctx.statement("i += 1");
            Ok(())
        })?;
        Ok(())
    })?;

    doc.add_function(
        Function::new("add")
            .params([Value::new("a", "int"), Value::new("b", "int")])
            .returns(("s", "int"))
            .doc("两数之和"),
        |ctx| {
            ctx.statement("s = a+b");
            Ok(())
        },
    )?;

    doc.add_class("Dev", "", |cls| {
        cls.field(("name", "str"))?;
        cls.method(
            Function::new("getIdn").returns(("newName", "str")),
            |func| {
                func.statement("self.name = newName");
                Ok(())
            },
        )?;
        Ok(())
    })?;

    Ok(())
}
