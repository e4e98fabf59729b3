//! [`PageStore`] backed by `lopdf::Document`.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId, Stream};

use super::PageStore;
use crate::detect::{pdf_version_from_bytes, pdf_version_from_path};
use crate::error::{Error, Result};
use crate::model::{ContentNode, Group, Matrix, Page, Rect};

/// Maximum `/Parent` hops followed when resolving inherited attributes.
const MAX_INHERITANCE_DEPTH: usize = 32;

/// A PDF document opened with lopdf.
pub struct LopdfBackend {
    doc: LopdfDocument,
    page_ids: Vec<ObjectId>,
}

impl LopdfBackend {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Verify it's a PDF
        pdf_version_from_path(path)?;

        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Self::from_document(doc)
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        pdf_version_from_bytes(data)?;

        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Self::from_document(doc)
    }

    /// Wrap an already loaded document.
    pub fn from_document(mut doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        promote_direct_streams(&mut doc, &page_ids)?;
        Ok(Self { doc, page_ids })
    }

    /// Direct access to the underlying `lopdf::Document`.
    pub fn raw_doc(&self) -> &LopdfDocument {
        &self.doc
    }

    /// Get PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Write the document to `path`, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.doc.save(path)?;
        Ok(())
    }

    /// Serialize the document into a byte vector.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.doc.save_to(&mut buffer)?;
        Ok(buffer)
    }

    fn page_id(&self, index: usize) -> Result<ObjectId> {
        self.page_ids
            .get(index)
            .copied()
            .ok_or(Error::PageOutOfRange(index + 1, self.page_ids.len()))
    }

    /// Look up a page attribute, following `/Parent` for inheritable keys.
    fn inherited<'a>(&'a self, page: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
        let mut current = page;
        for _ in 0..MAX_INHERITANCE_DEPTH {
            if let Ok(value) = current.get(key) {
                return Some(value);
            }
            let parent = current.get(b"Parent").ok()?.as_reference().ok()?;
            current = self.doc.get_dictionary(parent).ok()?;
        }
        None
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> Result<&'a Object> {
        match obj {
            Object::Reference(id) => Ok(self.doc.get_object(*id)?),
            other => Ok(other),
        }
    }

    fn rect(&self, obj: &Object, name: &str) -> Result<Rect> {
        let array = self.resolve(obj)?.as_array()?;
        if array.len() != 4 {
            return Err(Error::Corrupted(format!(
                "{} has {} entries, expected 4",
                name,
                array.len()
            )));
        }
        let mut v = [0.0f64; 4];
        for (slot, item) in v.iter_mut().zip(array) {
            *slot = f64::from(self.resolve(item)?.as_float()?);
        }
        Ok(Rect::new(v[0], v[1], v[2], v[3]))
    }

    fn optional_rect(&self, page: &Dictionary, key: &[u8], name: &str) -> Result<Option<Rect>> {
        match page.get(key) {
            Ok(obj) => self.rect(obj, name).map(Some),
            Err(_) => Ok(None),
        }
    }

    /// Content stream ids of a page in order.
    fn content_streams(&self, page: &Dictionary) -> Result<Vec<ObjectId>> {
        let contents = match page.get(b"Contents") {
            Ok(obj) => obj,
            Err(_) => return Ok(Vec::new()),
        };

        let items = match contents {
            Object::Reference(id) => match self.doc.get_object(*id)? {
                Object::Stream(_) => return Ok(vec![*id]),
                Object::Array(arr) => arr,
                _ => return Err(Error::Corrupted("invalid /Contents entry".to_string())),
            },
            Object::Array(arr) => arr,
            Object::Null => return Ok(Vec::new()),
            _ => return Err(Error::Corrupted("invalid /Contents entry".to_string())),
        };

        items
            .iter()
            .map(|obj| match obj {
                Object::Reference(id) => Ok(*id),
                _ => Err(Error::Corrupted("invalid /Contents array item".to_string())),
            })
            .collect()
    }

    /// Flatten a content tree into stream references, creating the `q cm` /
    /// `Q` streams each group needs.
    fn flatten(&mut self, nodes: &[ContentNode], out: &mut Vec<Object>) -> Result<()> {
        for node in nodes {
            match node {
                ContentNode::Stream(id) => out.push(Object::Reference(*id)),
                ContentNode::Group(group) => {
                    out.push(Object::Reference(self.add_group_open(group)?));
                    self.flatten(&group.children, out)?;
                    out.push(Object::Reference(self.add_content(vec![Operation::new(
                        "Q",
                        vec![],
                    )])?));
                }
            }
        }
        Ok(())
    }

    fn add_group_open(&mut self, group: &Group) -> Result<ObjectId> {
        let operands = group
            .transform
            .to_array()
            .iter()
            .map(|v| Object::Real(*v as f32))
            .collect();
        self.add_content(vec![
            Operation::new("q", vec![]),
            Operation::new("cm", operands),
        ])
    }

    fn add_content(&mut self, operations: Vec<Operation>) -> Result<ObjectId> {
        let data = Content { operations }.encode()?;
        Ok(self.doc.add_object(Stream::new(Dictionary::new(), data)))
    }
}

/// Move content streams stored directly in page dictionaries into indirect
/// objects, so every content stream has an id.
fn promote_direct_streams(doc: &mut LopdfDocument, page_ids: &[ObjectId]) -> Result<()> {
    for &page_id in page_ids {
        let contents = match doc.get_dictionary(page_id)?.get(b"Contents") {
            Ok(obj) => obj.clone(),
            Err(_) => continue,
        };

        let promoted = match contents {
            Object::Stream(stream) => Object::Reference(doc.add_object(stream)),
            Object::Array(items) if items.iter().any(|o| matches!(o, Object::Stream(_))) => {
                Object::Array(
                    items
                        .into_iter()
                        .map(|o| match o {
                            Object::Stream(stream) => Object::Reference(doc.add_object(stream)),
                            other => other,
                        })
                        .collect(),
                )
            }
            _ => continue,
        };
        doc.get_object_mut(page_id)?
            .as_dict_mut()?
            .set("Contents", promoted);
    }
    Ok(())
}

fn rect_object(rect: &Rect) -> Object {
    Object::Array(
        rect.to_array()
            .iter()
            .map(|v| Object::Real(*v as f32))
            .collect(),
    )
}

impl PageStore for LopdfBackend {
    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn read_page(&self, index: usize) -> Result<Page> {
        let page_id = self.page_id(index)?;
        let dict = self.doc.get_dictionary(page_id)?;

        let media_box = match self.inherited(dict, b"MediaBox") {
            Some(obj) => self.rect(obj, "MediaBox")?,
            None => return Err(Error::MissingObject("MediaBox".to_string())),
        };
        let crop_box = match self.inherited(dict, b"CropBox") {
            Some(obj) => self.rect(obj, "CropBox")?,
            None => media_box,
        };
        let bleed_box = self
            .optional_rect(dict, b"BleedBox", "BleedBox")?
            .unwrap_or(crop_box);
        let trim_box = self
            .optional_rect(dict, b"TrimBox", "TrimBox")?
            .unwrap_or(crop_box);
        let content_box = self
            .optional_rect(dict, b"ArtBox", "ArtBox")?
            .unwrap_or(crop_box);

        let mut children: Vec<ContentNode> = self
            .content_streams(dict)?
            .into_iter()
            .map(ContentNode::Stream)
            .collect();

        // Normalize the extent so it starts at the origin.
        if !media_box.is_at_origin() {
            let mut group = Group::new(Matrix::translate(-media_box.x0, -media_box.y0));
            group.children = children;
            children = vec![ContentNode::Group(group)];
        }

        let mut page = Page::with_children(media_box.width(), media_box.height(), children);
        let (ox, oy) = (media_box.x0, media_box.y0);
        let shift = |r: Rect| Rect::new(r.x0 - ox, r.y0 - oy, r.x1 - ox, r.y1 - oy);
        page.crop_box = shift(crop_box);
        page.bleed_box = shift(bleed_box);
        page.trim_box = shift(trim_box);
        page.content_box = shift(content_box);
        Ok(page)
    }

    fn write_page(&mut self, index: usize, page: &Page) -> Result<()> {
        let page_id = self.page_id(index)?;

        let mut contents = Vec::new();
        self.flatten(page.children(), &mut contents)?;

        let dict = self.doc.get_object_mut(page_id)?.as_dict_mut()?;
        dict.set(
            "MediaBox",
            rect_object(&Rect::from_size(page.width, page.height)),
        );
        dict.set("CropBox", rect_object(&page.crop_box));
        dict.set("BleedBox", rect_object(&page.bleed_box));
        dict.set("TrimBox", rect_object(&page.trim_box));
        dict.set("ArtBox", rect_object(&page.content_box));
        dict.set("Contents", Object::Array(contents));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageSize;
    use crate::transform::fit_page;
    use lopdf::dictionary;

    /// Build a one-page document whose page inherits its MediaBox from the page tree.
    fn create_test_doc(media_box: [i64; 4], direct_contents: bool) -> LopdfDocument {
        let mut doc = LopdfDocument::with_version("1.5");
        let pages_id = doc.new_object_id();

        let content = Stream::new(Dictionary::new(), b"0 0 m 100 100 l S".to_vec());
        let contents = if direct_contents {
            Object::Stream(content)
        } else {
            Object::Reference(doc.add_object(content))
        };
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => contents,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => Object::Integer(1),
                "MediaBox" => media_box.iter().map(|v| Object::Integer(*v)).collect::<Vec<_>>(),
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    fn create_test_pdf(media_box: [i64; 4]) -> Vec<u8> {
        let mut doc = create_test_doc(media_box, false);
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    #[test]
    fn test_read_page_inherits_media_box() {
        let backend = LopdfBackend::load_bytes(&create_test_pdf([0, 0, 1000, 500])).unwrap();
        assert_eq!(backend.page_count(), 1);

        let page = backend.read_page(0).unwrap();
        assert_eq!(page.dimensions(), (1000.0, 500.0));
        assert_eq!(page.crop_box, Rect::from_size(1000.0, 500.0));
        assert_eq!(page.child_count(), 1);
        assert!(matches!(page.children()[0], ContentNode::Stream(_)));
    }

    #[test]
    fn test_read_page_normalizes_origin() {
        let backend = LopdfBackend::load_bytes(&create_test_pdf([50, 20, 662, 812])).unwrap();
        let page = backend.read_page(0).unwrap();

        assert_eq!(page.dimensions(), (612.0, 792.0));
        assert_eq!(page.crop_box, Rect::from_size(612.0, 792.0));
        let group = page.children()[0].as_group().unwrap();
        assert_eq!(group.transform, Matrix::translate(-50.0, -20.0));
        assert_eq!(group.child_count(), 1);
    }

    #[test]
    fn test_direct_contents_are_promoted() {
        let backend = LopdfBackend::from_document(create_test_doc([0, 0, 612, 792], true)).unwrap();
        let page = backend.read_page(0).unwrap();
        assert_eq!(page.stream_ids().len(), 1);
    }

    #[test]
    fn test_write_page_wraps_contents() {
        let mut backend = LopdfBackend::load_bytes(&create_test_pdf([0, 0, 1000, 500])).unwrap();
        let mut page = backend.read_page(0).unwrap();
        let original = page.stream_ids();

        let letter = PageSize::new("LETTER", 612.0, 792.0);
        let fit = fit_page(&mut page, &letter).unwrap();
        backend.write_page(0, &page).unwrap();

        let reloaded = LopdfBackend::load_bytes(&backend.save_to_bytes().unwrap()).unwrap();
        let page_id = reloaded.page_id(0).unwrap();
        let dict = reloaded.raw_doc().get_dictionary(page_id).unwrap();
        let keys: [&[u8]; 5] = [b"MediaBox", b"CropBox", b"BleedBox", b"TrimBox", b"ArtBox"];
        for key in keys {
            let rect = reloaded.rect(dict.get(key).unwrap(), "box").unwrap();
            assert_eq!(rect, Rect::from_size(792.0, 612.0));
        }

        let streams = reloaded.content_streams(dict).unwrap();
        assert_eq!(streams.len(), original.len() + 2);
        assert_eq!(&streams[1..streams.len() - 1], &original[..]);

        let open = reloaded.raw_doc().get_object(streams[0]).unwrap().as_stream().unwrap();
        let ops = Content::decode(&open.content).unwrap().operations;
        assert_eq!(ops[0].operator, "q");
        assert_eq!(ops[1].operator, "cm");
        let scale = ops[1].operands[0].as_float().unwrap();
        assert!((f64::from(scale) - fit.scale).abs() < 1e-6);
        let dy = ops[1].operands[5].as_float().unwrap();
        assert!((f64::from(dy) - 108.0).abs() < 1e-3);

        let close_id = *streams.last().unwrap();
        let close = reloaded.raw_doc().get_object(close_id).unwrap().as_stream().unwrap();
        let ops = Content::decode(&close.content).unwrap().operations;
        assert_eq!(ops[0].operator, "Q");
    }

    #[test]
    fn test_page_out_of_range() {
        let backend = LopdfBackend::load_bytes(&create_test_pdf([0, 0, 612, 792])).unwrap();
        assert!(matches!(backend.read_page(3), Err(Error::PageOutOfRange(4, 1))));
    }

    #[test]
    fn test_rejects_non_pdf_bytes() {
        assert!(matches!(
            LopdfBackend::load_bytes(b"not a pdf at all"),
            Err(Error::UnknownFormat)
        ));
    }
}
