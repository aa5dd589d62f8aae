//! End-to-end table parsing: GFM source in, raw rows with spans out.

use vellum_document::{parse, Block, RawTableColumnAlignment, RawTableRow};

fn only_table(src: &str) -> (Vec<RawTableColumnAlignment>, Vec<RawTableRow>) {
    let doc = parse(src);
    let tables = doc.tables();
    assert_eq!(tables.len(), 1, "expected exactly one table in {:?}", doc.blocks);
    (tables[0].column_alignments.to_vec(), tables[0].rows.to_vec())
}

#[test]
fn spans_from_markers() {
    let src = "\
| Region | Q1 | Q2 |
|--------|----|----|
| North  | 10 | << |
| ^^     | 12 | 14 |
| South  | 9  | 11 |
";
    let (alignments, rows) = only_table(src);
    assert_eq!(alignments.len(), 3);
    assert_eq!(rows.len(), 4);

    let north = &rows[1].cells[0];
    assert_eq!((north.colspan, north.rowspan), (1, 2));
    let ten = &rows[1].cells[1];
    assert_eq!((ten.colspan, ten.rowspan), (2, 1));
    assert!(rows[1].cells[2].is_placeholder());
    assert!(rows[2].cells[0].is_placeholder());
    assert_eq!(rows[2].cells[0].rowspan, 0);
    assert!(!rows[3].cells[0].is_placeholder());
}

#[test]
fn inline_formatting_survives_in_cells() {
    let (_, rows) = only_table("| **bold** | `code` |\n|---|---|\n| [link](u) | x |\n");
    assert_eq!(rows[0].cells[0].plain_text(), "bold");
    assert_eq!(rows[0].cells[1].plain_text(), "code");
    assert_eq!(rows[1].cells[0].plain_text(), "link");
}

#[test]
fn table_inside_block_quote() {
    let doc = parse("> | a |\n> |---|\n> | b |\n");
    assert!(matches!(&doc.blocks[0], Block::BlockQuote(children) if matches!(children[0], Block::Table { .. })));
}

#[test]
fn document_without_tables() {
    let doc = parse("just text\n\n* and\n* a list\n");
    assert!(doc.tables().is_empty());
    assert_eq!(doc.blocks.len(), 2);
}
