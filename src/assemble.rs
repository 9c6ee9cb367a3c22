//! PDF assembly: merge the title PDF and the content PDF into the
//! final output document.
//!
//! Pages are deep-copied into a fresh document. Each page's `Parent`
//! entry is stripped before copying so only the page subtree
//! (contents, resources) crosses over; the source `Pages` tree stays
//! behind. The copier remaps object references as it goes and
//! pre-registers each object id before recursing, so shared
//! resources are copied once and reference cycles terminate.

use crate::error::{Error, Result};
use lopdf::{dictionary, Document, Object, ObjectId};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Facts about the merged output, read back from the written file.
#[derive(Debug, Clone, Copy)]
pub struct AssembledPdf {
    /// Total page count of the merged document.
    pub page_count: u32,

    /// Byte size of the merged file on disk.
    pub file_size: u64,
}

/// Copies objects between documents, remapping references.
struct ObjectCopier<'a> {
    source: &'a Document,
    target: &'a mut Document,
    id_map: HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectCopier<'a> {
    fn new(source: &'a Document, target: &'a mut Document) -> Self {
        Self {
            source,
            target,
            id_map: HashMap::new(),
        }
    }

    /// Copy a page object, dropping its `Parent` entry first so the
    /// source's `Pages` tree is not dragged along. The caller
    /// reparents the copied page into the merged tree.
    fn copy_page(&mut self, source_id: ObjectId) -> Result<ObjectId> {
        if let Some(target_id) = self.id_map.get(&source_id) {
            return Ok(*target_id);
        }

        let new_id = self.target.add_object(Object::Null);
        self.id_map.insert(source_id, new_id);

        let mut dict = self.source.get_object(source_id)?.as_dict()?.clone();
        dict.remove(b"Parent");
        let new_obj = self.remap(Object::Dictionary(dict))?;
        match self.target.objects.get_mut(&new_id) {
            Some(slot) => *slot = new_obj,
            None => return Err(Error::PdfAssembly(format!("lost object {:?}", new_id))),
        }
        Ok(new_id)
    }

    fn copy_object(&mut self, source_id: ObjectId) -> Result<ObjectId> {
        if let Some(target_id) = self.id_map.get(&source_id) {
            return Ok(*target_id);
        }

        // Register the new id before recursing into references so
        // cyclical structures terminate.
        let new_id = self.target.add_object(Object::Null);
        self.id_map.insert(source_id, new_id);

        let obj = self.source.get_object(source_id)?.clone();
        let new_obj = self.remap(obj)?;
        match self.target.objects.get_mut(&new_id) {
            Some(slot) => *slot = new_obj,
            None => return Err(Error::PdfAssembly(format!("lost object {:?}", new_id))),
        }
        Ok(new_id)
    }

    fn remap(&mut self, obj: Object) -> Result<Object> {
        match obj {
            Object::Reference(id) => Ok(Object::Reference(self.copy_object(id)?)),
            Object::Array(arr) => Ok(Object::Array(
                arr.into_iter()
                    .map(|o| self.remap(o))
                    .collect::<Result<Vec<_>>>()?,
            )),
            Object::Dictionary(mut dict) => {
                for (_, value) in dict.iter_mut() {
                    *value = self.remap(value.clone())?;
                }
                Ok(Object::Dictionary(dict))
            }
            Object::Stream(mut stream) => {
                for (_, value) in stream.dict.iter_mut() {
                    *value = self.remap(value.clone())?;
                }
                Ok(Object::Stream(stream))
            }
            other => Ok(other),
        }
    }
}

/// Copy every page of `source` into `target`, in page order, and
/// return the new page object ids.
fn copy_pages(target: &mut Document, source: &Document) -> Result<Vec<ObjectId>> {
    let mut pages: Vec<_> = source.get_pages().into_iter().collect();
    pages.sort_by_key(|(number, _)| *number);

    let mut copier = ObjectCopier::new(source, target);
    pages
        .into_iter()
        .map(|(_, page_id)| copier.copy_page(page_id))
        .collect()
}

/// Merge the title PDF and the content PDF (in that order: title
/// page first, then TOC + content) and write the result to `output`.
///
/// The reported page count and byte size are read back from the
/// merged file, not from the intermediate artifacts.
pub fn assemble(title_pdf: &[u8], content_pdf: &[u8], output: &Path) -> Result<AssembledPdf> {
    let title = Document::load_mem(title_pdf)
        .map_err(|e| Error::PdfAssembly(format!("title PDF: {}", e)))?;
    let content = Document::load_mem(content_pdf)
        .map_err(|e| Error::PdfAssembly(format!("content PDF: {}", e)))?;

    let mut merged = Document::with_version("1.5");
    let pages_id = merged.new_object_id();

    let mut kids: Vec<ObjectId> = Vec::new();
    kids.extend(copy_pages(&mut merged, &title)?);
    kids.extend(copy_pages(&mut merged, &content)?);

    for page_id in &kids {
        if let Ok(Object::Dictionary(dict)) = merged.get_object_mut(*page_id) {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    let kids_refs: Vec<Object> = kids.iter().map(|id| Object::Reference(*id)).collect();
    let page_count = kids.len() as i64;
    merged.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids_refs,
            "Count" => page_count,
        }),
    );

    let catalog_id = merged.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    merged.trailer.set("Root", catalog_id);
    merged.compress();
    merged.save(output)?;

    // Read back from the merged file.
    let written = Document::load(output)?;
    let page_count = written.get_pages().len() as u32;
    let file_size = fs::metadata(output)?.len();
    log::info!(
        "assembled {} pages, {} bytes at {}",
        page_count,
        file_size,
        output.display()
    );

    Ok(AssembledPdf {
        page_count,
        file_size,
    })
}
