#![allow(dead_code)]

use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Build a document whose page N (1-based) strokes a diagonal with line width N.
pub fn create_test_pdf(num_pages: usize) -> Document {
    create_sized_pdf(&vec![(612, 792); num_pages])
}

/// Build a document with one page per entry, each with its own MediaBox size.
pub fn create_sized_pdf(sizes: &[(i64, i64)]) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for (idx, &(width, height)) in sizes.iter().enumerate() {
        let content = format!("q {} w 0 0 m {} {} l S Q", idx + 1, width, height);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(width),
                    Object::Integer(height),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    finish_document(doc, pages_id, kids, Dictionary::new())
}

/// Attach the page tree and catalog; `extra` is merged into the Pages node.
pub fn finish_document(
    mut doc: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    extra: Dictionary,
) -> Document {
    let count = kids.len() as i64;
    let mut pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(count)),
    ]);
    for (key, value) in extra.iter() {
        pages_dict.set(key.clone(), value.clone());
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc
}

pub fn to_bytes(mut doc: Document) -> Vec<u8> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    writer
}

pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

pub fn number(obj: &Object) -> f32 {
    match obj {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r,
        other => panic!("not a number: {:?}", other),
    }
}

pub fn media_box(doc: &Document, page_id: ObjectId) -> Vec<f32> {
    doc.get_dictionary(page_id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(number)
        .collect()
}

/// Names of the XObjects drawn on a page, in drawing order
pub fn drawn_xobjects(doc: &Document, page_id: ObjectId) -> Vec<String> {
    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
    content
        .operations
        .iter()
        .filter(|op| op.operator == "Do")
        .map(|op| String::from_utf8(op.operands[0].as_name().unwrap().to_vec()).unwrap())
        .collect()
}

/// Operands of the `cm` operator preceding each `Do` on a page
pub fn draw_matrices(doc: &Document, page_id: ObjectId) -> Vec<Vec<f32>> {
    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
    content
        .operations
        .iter()
        .filter(|op| op.operator == "cm")
        .map(|op| op.operands.iter().map(number).collect())
        .collect()
}

/// The XObject stream registered under `name` on a page
pub fn xobject<'a>(doc: &'a Document, page_id: ObjectId, name: &str) -> &'a Stream {
    let resources = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"Resources")
        .unwrap()
        .as_dict()
        .unwrap();
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
    let id = xobjects.get(name.as_bytes()).unwrap().as_reference().unwrap();
    doc.get_object(id).unwrap().as_stream().unwrap()
}

pub fn stream_text(stream: &Stream) -> String {
    let data = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());
    String::from_utf8_lossy(&data).into_owned()
}
