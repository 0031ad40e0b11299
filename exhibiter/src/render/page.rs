//! In-memory pages.
//!
//! A [`Page`] owns its page dictionary and whatever has been drawn onto
//! it. Pages split from the same source PDF also hold a handle on that
//! document's object table, so the fonts and images they have in common
//! are bound into the output once.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{ExhibitError, Result};

/// US Letter width in points.
pub const LETTER_WIDTH: f32 = 612.0;

/// US Letter height in points.
pub const LETTER_HEIGHT: f32 = 792.0;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Keys that point back into the source document's structure rather than
/// at page content.
const BACK_REFERENCES: [&[u8]; 3] = [b"Parent", b"P", b"Dest"];

/// Deepest page tree we are willing to climb when resolving inheritance.
const MAX_TREE_DEPTH: usize = 64;

static NEXT_SOURCE: AtomicU64 = AtomicU64::new(1);

/// Objects of one source document, shared by every page split from it.
#[derive(Debug, Clone)]
pub(crate) struct SharedObjects {
    /// Tells source documents apart within this process.
    pub(crate) source: u64,
    /// The source document's object table.
    pub(crate) table: Arc<BTreeMap<ObjectId, Object>>,
    /// Ids in `table` reachable from the page.
    pub(crate) reachable: BTreeSet<ObjectId>,
}

impl SharedObjects {
    fn get(&self, id: &ObjectId) -> Option<&Object> {
        if self.reachable.contains(id) {
            self.table.get(id)
        } else {
            None
        }
    }
}

/// A single PDF page, movable into any output document.
#[derive(Debug, Clone)]
pub struct Page {
    objects: BTreeMap<ObjectId, Object>,
    shared: Option<SharedObjects>,
    id: ObjectId,
    next_id: u32,
}

impl Page {
    /// Create an empty page of the given size.
    pub fn blank(width: f32, height: f32) -> Self {
        let id = (1, 0);
        let page = dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
            "Resources" => Dictionary::new(),
        };

        let mut objects = BTreeMap::new();
        objects.insert(id, Object::Dictionary(page));
        Self {
            objects,
            shared: None,
            id,
            next_id: 2,
        }
    }

    /// Create an empty US Letter page.
    pub fn letter() -> Self {
        Self::blank(LETTER_WIDTH, LETTER_HEIGHT)
    }

    /// Split `doc` into its pages, in page order.
    ///
    /// Inherited attributes are copied onto each page and the link to the
    /// source page tree is dropped. The pages share `doc`'s object table.
    pub fn split(doc: Document) -> Result<Vec<Self>> {
        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        let tree: BTreeSet<ObjectId> = page_ids.iter().copied().collect();
        let dictionaries = page_ids
            .iter()
            .map(|&page_id| flattened_page(&doc, page_id))
            .collect::<Result<Vec<_>>>()?;

        let highest = doc.objects.keys().map(|(number, _)| *number).max().unwrap_or(0);
        let next_id = highest.max(doc.max_id) + 1;
        let source = NEXT_SOURCE.fetch_add(1, Ordering::Relaxed);
        let table = Arc::new(doc.objects);

        Ok(page_ids
            .into_iter()
            .zip(dictionaries)
            .map(|(id, page)| {
                let reachable = reachable_objects(&table, &tree, &page);
                let mut objects = BTreeMap::new();
                objects.insert(id, Object::Dictionary(page));
                Self {
                    objects,
                    shared: Some(SharedObjects {
                        source,
                        table: Arc::clone(&table),
                        reachable,
                    }),
                    id,
                    next_id,
                }
            })
            .collect())
    }

    /// Id of the page dictionary within [`Page::objects`].
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Objects that belong to this page alone: its dictionary and
    /// anything drawn onto it.
    pub fn objects(&self) -> &BTreeMap<ObjectId, Object> {
        &self.objects
    }

    /// Source objects the page reaches, if it came from a PDF.
    pub(crate) fn shared(&self) -> Option<&SharedObjects> {
        self.shared.as_ref()
    }

    pub(crate) fn into_parts(self) -> (BTreeMap<ObjectId, Object>, Option<SharedObjects>, ObjectId) {
        (self.objects, self.shared, self.id)
    }

    /// The page dictionary.
    pub fn dictionary(&self) -> Result<&Dictionary> {
        self.objects
            .get(&self.id)
            .and_then(|object| object.as_dict().ok())
            .ok_or_else(|| ExhibitError::other("page object is not a dictionary"))
    }

    fn dictionary_mut(&mut self) -> Result<&mut Dictionary> {
        self.objects
            .get_mut(&self.id)
            .and_then(|object| object.as_dict_mut().ok())
            .ok_or_else(|| ExhibitError::other("page object is not a dictionary"))
    }

    fn object(&self, id: ObjectId) -> Result<&Object> {
        self.objects
            .get(&id)
            .or_else(|| self.shared.as_ref()?.get(&id))
            .ok_or_else(|| ExhibitError::other(format!("page references missing object {id:?}")))
    }

    /// Resolve a value that may be stored directly or behind a reference.
    fn resolve<'a>(&'a self, value: &'a Object) -> Result<&'a Object> {
        match value {
            Object::Reference(id) => self.object(*id),
            other => Ok(other),
        }
    }

    /// The page's MediaBox as `[llx, lly, urx, ury]`, US Letter if absent.
    pub fn media_box(&self) -> [f32; 4] {
        let letter = [0.0, 0.0, LETTER_WIDTH, LETTER_HEIGHT];

        let Ok(value) = self.dictionary().and_then(|dict| Ok(dict.get(b"MediaBox")?)) else {
            return letter;
        };
        let Ok(Object::Array(values)) = self.resolve(value) else {
            return letter;
        };

        let numbers: Vec<f32> = values
            .iter()
            .filter_map(|value| value.as_float().ok())
            .collect();
        match numbers.as_slice() {
            [llx, lly, urx, ury] => [*llx, *lly, *urx, *ury],
            _ => letter,
        }
    }

    /// Page width in points.
    pub fn width(&self) -> f32 {
        let [llx, _, urx, _] = self.media_box();
        (urx - llx).abs()
    }

    /// Page height in points.
    pub fn height(&self) -> f32 {
        let [_, lly, _, ury] = self.media_box();
        (ury - lly).abs()
    }

    /// Add an object to the page's private object table.
    pub(crate) fn add_object(&mut self, object: impl Into<Object>) -> ObjectId {
        let id = (self.next_id, 0);
        self.next_id += 1;
        self.objects.insert(id, object.into());
        id
    }

    /// Register `target` under a fresh name in the `category` resource
    /// dictionary (e.g. `Font`, `XObject`) and return the name.
    pub(crate) fn add_resource(
        &mut self,
        category: &str,
        prefix: &str,
        target: ObjectId,
    ) -> Result<String> {
        let mut resources = match self.dictionary()?.get(b"Resources") {
            Ok(value) => self.resolve(value)?.as_dict()?.clone(),
            Err(_) => Dictionary::new(),
        };

        let mut entries = match resources.get(category.as_bytes()) {
            Ok(value) => self.resolve(value)?.as_dict()?.clone(),
            Err(_) => Dictionary::new(),
        };

        let mut n = 0;
        let name = loop {
            let candidate = format!("{prefix}{n}");
            if !entries.has(candidate.as_bytes()) {
                break candidate;
            }
            n += 1;
        };

        entries.set(name.as_str(), Object::Reference(target));
        resources.set(category, entries);
        self.dictionary_mut()?.set("Resources", resources);
        Ok(name)
    }

    /// References to the page's current content streams, in order.
    fn content_refs(&self) -> Result<Vec<Object>> {
        let Ok(contents) = self.dictionary()?.get(b"Contents") else {
            return Ok(Vec::new());
        };

        Ok(match contents {
            Object::Reference(id) => match self.object(*id)? {
                Object::Array(items) => items.clone(),
                _ => vec![Object::Reference(*id)],
            },
            Object::Array(items) => items.clone(),
            _ => Vec::new(),
        })
    }

    /// Append a content stream that draws on top of what is already there.
    pub(crate) fn append_content(&mut self, content: Vec<u8>) -> Result<()> {
        let stream_id = self.add_object(Stream::new(Dictionary::new(), content));
        let mut contents = self.content_refs()?;
        contents.push(Object::Reference(stream_id));
        self.dictionary_mut()?.set("Contents", contents);
        Ok(())
    }

    /// Wrap the existing content in a saved graphics state so anything
    /// appended later starts from the default state.
    pub(crate) fn isolate_content(&mut self) -> Result<()> {
        let existing = self.content_refs()?;
        if existing.is_empty() {
            return Ok(());
        }

        let save = self.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
        let restore = self.add_object(Stream::new(Dictionary::new(), b"\nQ\n".to_vec()));

        let mut contents = Vec::with_capacity(existing.len() + 2);
        contents.push(Object::Reference(save));
        contents.extend(existing);
        contents.push(Object::Reference(restore));
        self.dictionary_mut()?.set("Contents", contents);
        Ok(())
    }
}

/// Walk up the page tree looking for an inherited attribute.
fn inherited_attribute(doc: &Document, page: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    for _ in 0..MAX_TREE_DEPTH {
        let node = doc.get_dictionary(parent?).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    None
}

/// The page dictionary with inherited attributes filled in and its
/// `Parent` link removed.
fn flattened_page(doc: &Document, page_id: ObjectId) -> Result<Dictionary> {
    let mut page = doc.get_dictionary(page_id)?.clone();

    for key in INHERITABLE {
        if !page.has(key)
            && let Some(value) = inherited_attribute(doc, &page, key)
        {
            page.set(key.to_vec(), value);
        }
    }
    page.remove(b"Parent");
    Ok(page)
}

/// Ids of every object in `table` reachable from `page`, not following
/// back references or links to other pages.
fn reachable_objects(
    table: &BTreeMap<ObjectId, Object>,
    pages: &BTreeSet<ObjectId>,
    page: &Dictionary,
) -> BTreeSet<ObjectId> {
    let mut reachable = BTreeSet::new();
    let mut pending = Vec::new();
    dictionary_references(page, &mut pending);

    while let Some(id) = pending.pop() {
        if pages.contains(&id) || reachable.contains(&id) {
            continue;
        }
        if let Some(object) = table.get(&id) {
            reachable.insert(id);
            references(object, &mut pending);
        }
    }

    reachable
}

fn references(object: &Object, out: &mut Vec<ObjectId>) {
    match object {
        Object::Reference(id) => out.push(*id),
        Object::Dictionary(dict) => dictionary_references(dict, out),
        Object::Array(items) => {
            for item in items {
                references(item, out);
            }
        }
        Object::Stream(stream) => dictionary_references(&stream.dict, out),
        _ => {}
    }
}

fn dictionary_references(dict: &Dictionary, out: &mut Vec<ObjectId>) {
    for (key, value) in dict.iter() {
        if !BACK_REFERENCES.contains(&key.as_slice()) {
            references(value, out);
        }
    }
}
