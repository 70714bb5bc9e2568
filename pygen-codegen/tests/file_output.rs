//! Integration tests for writing documents to disk.

use std::{fs, io::Write};

use pygen_codegen::{
    Document, DocumentOptions, Error, FileRules, Function, Indent, Value, WriteResult,
    write_destination,
};
use tempfile::TempDir;

#[test]
fn test_create_and_close_writes_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.py");

    let mut doc = Document::create(&path).unwrap();
    doc.import("os").unwrap();
    doc.add_function(Function::new("main"), |body| {
        body.statement("print(os.name)");
        Ok(())
    })
    .unwrap();

    assert_eq!(doc.path(), Some(path.as_path()));
    assert_eq!(doc.close().unwrap(), WriteResult::Written);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "import os\n\n\ndef main() -> None:\n    print(os.name)\n    return\n\n"
    );
}

#[test]
fn test_second_close_does_not_write_again() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("once.py");

    let mut doc = Document::create(&path).unwrap();
    doc.import("sys").unwrap();
    assert_eq!(doc.close().unwrap(), WriteResult::Written);
    assert_eq!(doc.close().unwrap(), WriteResult::Skipped);
    drop(doc);

    assert_eq!(fs::read_to_string(&path).unwrap(), "import sys\n\n\n");
}

#[test]
fn test_drop_finalizes_document() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("dropped.py");

    {
        let mut doc = Document::create(&path).unwrap();
        doc.add_class("Point", "", |cls| {
            cls.fields([Value::new("x", "float"), Value::new("y", "float")])?;
            Ok(())
        })
        .unwrap();
    }

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("class Point:\n    def __init__(self, x:float, y:float) -> None:\n"));
    assert_eq!(text.matches("class Point:").count(), 1);
}

#[test]
fn test_unopenable_destination_fails() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "plain file").unwrap();

    let result = Document::create(blocker.join("out.py"));

    match result {
        Err(Error::Io { path, .. }) => assert_eq!(path, blocker.join("out.py")),
        Err(other) => panic!("expected Io error, got {other}"),
        Ok(_) => panic!("expected Io error, got a document"),
    }
}

#[test]
fn test_if_missing_keeps_existing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("kept.py");
    fs::write(&path, "# hand written\n").unwrap();

    let mut doc =
        Document::create_with(&path, &FileRules::if_missing(), DocumentOptions::default())
            .unwrap();
    doc.import("os").unwrap();

    assert_eq!(doc.close().unwrap(), WriteResult::Skipped);
    assert_eq!(fs::read_to_string(&path).unwrap(), "# hand written\n");
}

#[test]
fn test_rules_header_and_options() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("gen").join("headed.py");

    let rules = FileRules::default().with_header("Generated by pygen. Do not edit.");
    let options = DocumentOptions::default().with_indent(Indent::Tab);
    let mut doc = Document::create_with(&path, &rules, options).unwrap();
    doc.add_function(Function::new("f"), |_| Ok(())).unwrap();
    doc.close().unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "# Generated by pygen. Do not edit.\n\n\ndef f() -> None:\n\treturn\n\n"
    );
}

#[test]
fn test_into_inner_returns_rendered_bytes() {
    let mut doc = Document::from_writer(Vec::new());
    doc.import("json").unwrap();
    let bytes = doc.into_inner().unwrap().expect("writer should be returned");
    assert_eq!(String::from_utf8(bytes).unwrap(), "import json\n\n\n");
}

fn build_with_bad_method<W: Write>(doc: &mut Document<W>) -> pygen_codegen::Result<()> {
    doc.add_class("Good", "", |cls| {
        cls.field(("x", "int"))?;
        Ok(())
    })?;
    doc.add_class("Bad", "", |cls| {
        cls.method(Function::new("m").param(("self", "")), |_| Ok(()))?;
        Ok(())
    })?;
    Ok(())
}

#[test]
fn test_drop_after_failed_build_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("partial.py");

    let result = (|| {
        let mut doc = Document::create(&path)?;
        build_with_bad_method(&mut doc)
    })();

    assert!(matches!(result, Err(Error::DuplicateParameter { .. })));
    let text = fs::read_to_string(&path).unwrap();
    assert!(!text.contains("class Good"), "partial document written: {text:?}");
}

#[test]
fn test_discard_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("discarded.py");

    let mut doc = Document::create(&path).unwrap();
    doc.import("os").unwrap();
    doc.discard();

    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn test_render_before_writing_keeps_existing_file_on_failure() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("kept.py");
    fs::write(&path, "# hand written\n").unwrap();

    let mut doc = Document::from_writer(Vec::new());
    let result = build_with_bad_method(&mut doc).and_then(|()| doc.render());
    assert!(result.is_err());
    doc.discard();

    assert_eq!(fs::read_to_string(&path).unwrap(), "# hand written\n");

    let mut doc = Document::from_writer(Vec::new());
    doc.import("os").unwrap();
    let text = doc.render().unwrap();
    doc.discard();
    let written = write_destination(&path, &FileRules::default(), text.as_bytes()).unwrap();
    assert_eq!(written, WriteResult::Written);
    assert_eq!(fs::read_to_string(&path).unwrap(), "import os\n\n\n");
}
