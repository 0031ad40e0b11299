//! The master page sequence.
//!
//! Pages arrive one at a time. Each carries a private object table and,
//! if it came from a source PDF, the source objects it reaches. Binding a
//! page gives its private objects fresh numbers in the output document.
//! Source objects are bound the first time any page reaches them and
//! reused after that.

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use std::collections::{BTreeMap, HashMap};

use crate::error::{ExhibitError, Result};
use crate::merge::bookmarks::{BookmarkManager, OutlineEntry};
use crate::merge::metadata::{DocumentInfo, MetadataManager};
use crate::render::Page;
use crate::render::page::SharedObjects;

/// PDF version of the output document.
const PDF_VERSION: &str = "1.7";

/// Ordered pages of the output PDF.
#[derive(Debug)]
pub struct PageSequence {
    document: Document,
    pages_id: ObjectId,
    page_count: usize,
    outline: Vec<OutlineEntry>,
    /// Output ids of source objects already bound, by source and source id.
    bound: HashMap<(u64, ObjectId), ObjectId>,
}

impl PageSequence {
    /// Start an empty document.
    pub fn new() -> Self {
        let mut document = Document::with_version(PDF_VERSION);
        let pages_id = document.new_object_id();
        let catalog_id = document.new_object_id();

        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0,
            }),
        );
        document.objects.insert(
            catalog_id,
            Object::Dictionary(dictionary! {
                "Type" => "Catalog",
                "Pages" => pages_id,
            }),
        );
        document.trailer.set("Root", catalog_id);

        Self {
            document,
            pages_id,
            page_count: 0,
            outline: Vec::new(),
            bound: HashMap::new(),
        }
    }

    /// Number of pages bound so far.
    pub fn len(&self) -> usize {
        self.page_count
    }

    /// Check whether no page has been bound yet.
    pub fn is_empty(&self) -> bool {
        self.page_count == 0
    }

    /// Append `page` and return its id in the output document.
    pub fn push(&mut self, page: Page) -> Result<ObjectId> {
        let (objects, shared, page_id) = page.into_parts();

        let private: BTreeMap<ObjectId, ObjectId> = objects
            .keys()
            .map(|&id| (id, self.document.new_object_id()))
            .collect();

        if let Some(shared) = &shared {
            self.bind_shared(shared);
        }

        let source = shared.as_ref().map(|shared| shared.source);
        let bound = &self.bound;
        for (id, mut object) in objects {
            remap(&mut object, &|target| {
                private
                    .get(&target)
                    .or_else(|| bound.get(&(source?, target)))
                    .copied()
            });
            if let Some(&new_id) = private.get(&id) {
                self.document.objects.insert(new_id, object);
            }
        }

        let new_page_id = private
            .get(&page_id)
            .copied()
            .ok_or_else(|| ExhibitError::other("page dictionary missing from its object table"))?;
        self.document
            .get_dictionary_mut(new_page_id)?
            .set("Parent", self.pages_id);
        self.add_pages_to_tree(&[new_page_id])?;

        self.page_count += 1;
        Ok(new_page_id)
    }

    /// Copy the source objects `shared` reaches that no earlier page has.
    fn bind_shared(&mut self, shared: &SharedObjects) {
        let fresh: Vec<(ObjectId, ObjectId)> = shared
            .reachable
            .iter()
            .filter(|&&id| !self.bound.contains_key(&(shared.source, id)))
            .map(|&id| (id, self.document.new_object_id()))
            .collect();

        for &(id, new_id) in &fresh {
            self.bound.insert((shared.source, id), new_id);
        }

        for (id, new_id) in fresh {
            let Some(object) = shared.table.get(&id) else {
                continue;
            };
            let mut object = object.clone();
            remap(&mut object, &|target| self.bound.get(&(shared.source, target)).copied());
            self.document.objects.insert(new_id, object);
        }
    }

    /// Append `page` with an outline entry pointing at it.
    pub fn push_bookmarked(&mut self, page: Page, title: impl Into<String>) -> Result<ObjectId> {
        let page_id = self.push(page)?;
        self.outline.push(OutlineEntry {
            title: title.into(),
            page_id,
        });
        Ok(page_id)
    }

    /// Outline entries recorded so far.
    pub fn outline(&self) -> &[OutlineEntry] {
        &self.outline
    }

    /// Finish the document: set its Info dictionary and, if requested,
    /// write the outline.
    pub fn finish(self, info: &DocumentInfo, bookmarks: bool) -> Result<Document> {
        let mut document = self.document;

        if bookmarks && !self.outline.is_empty() {
            BookmarkManager::new().add_outline(&mut document, &self.outline)?;
        }
        MetadataManager::new().set_info(&mut document, info)?;

        Ok(document)
    }

    /// Add pages to the Kids array of the Pages node.
    fn add_pages_to_tree(&mut self, page_ids: &[ObjectId]) -> Result<()> {
        let pages: &mut Dictionary = self.document.get_dictionary_mut(self.pages_id)?;

        match pages.get_mut(b"Kids") {
            Ok(Object::Array(kids)) => {
                kids.extend(page_ids.iter().map(|&id| Object::Reference(id)));
            }
            _ => return Err(ExhibitError::other("Pages dictionary missing Kids array")),
        }

        let current_count = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
        pages.set("Count", Object::Integer(current_count + page_ids.len() as i64));
        Ok(())
    }
}

impl Default for PageSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Point every reference in `object` at its output id; references with
/// no output id become null.
fn remap<F>(object: &mut Object, lookup: &F)
where
    F: Fn(ObjectId) -> Option<ObjectId>,
{
    if let Object::Reference(id) = object {
        let id = *id;
        *object = match lookup(id) {
            Some(new_id) => Object::Reference(new_id),
            None => Object::Null,
        };
        return;
    }

    match object {
        Object::Array(items) => {
            for item in items {
                remap(item, lookup);
            }
        }
        Object::Dictionary(dict) => {
            for (_, value) in dict.iter_mut() {
                remap(value, lookup);
            }
        }
        Object::Stream(stream) => {
            for (_, value) in stream.dict.iter_mut() {
                remap(value, lookup);
            }
        }
        _ => {}
    }
}
