//! Integration test support.
//!
//! Test documents are built programmatically with `lopdf`. Pages carry
//! distinct MediaBox widths so page identity and order survive a round
//! trip through disk.

use lopdf::{Document, Object, dictionary};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write a PDF whose pages have the given MediaBox widths.
pub fn write_pdf(dir: &Path, name: &str, widths: &[i64]) -> PathBuf {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let mut page_ids = Vec::new();
    for &width in widths {
        let page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), 792.into()],
        };
        page_ids.push(doc.add_object(page));
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.iter().map(|&id| id.into()).collect::<Vec<Object>>(),
        "Count" => widths.len() as i64,
    };
    doc.objects.insert(pages_id, pages_dict.into());

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let path = dir.join(name);
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    std::fs::File::create(&path)
        .unwrap()
        .write_all(&buffer)
        .unwrap();
    path
}

/// Write a PDF with `pages` identically sized pages.
pub fn write_pdf_with_pages(dir: &Path, name: &str, pages: usize) -> PathBuf {
    let widths: Vec<i64> = vec![612; pages];
    write_pdf(dir, name, &widths)
}

/// Page count of a document on disk.
pub fn page_count(path: &Path) -> usize {
    Document::load(path).unwrap().get_pages().len()
}

/// MediaBox widths of a document's pages, in page order.
pub fn page_widths(path: &Path) -> Vec<i64> {
    let doc = Document::load(path).unwrap();
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let dict = doc.get_object(page_id).unwrap().as_dict().unwrap();
            match dict.get(b"MediaBox").unwrap() {
                Object::Array(arr) => arr[2].as_i64().unwrap(),
                other => panic!("unexpected MediaBox object: {other:?}"),
            }
        })
        .collect()
}
