mod common;

use common::*;
use lopdf::{Dictionary, Document, Object, Stream};
use pdf_sheets::*;

fn source_line_width(doc: &Document, page_id: lopdf::ObjectId, name: &str) -> String {
    let text = stream_text(xobject(doc, page_id, name));
    text.split_whitespace().nth(1).unwrap().to_string()
}

#[tokio::test]
async fn test_four_pages_make_two_tabloid_sheets() {
    let bytes = to_bytes(create_test_pdf(4));

    let output = convert_bytes(bytes, &ImposeOptions::default()).await.unwrap();
    let doc = Document::load_mem(&output).unwrap();
    let pages = page_ids(&doc);

    assert_eq!(pages.len(), 2);
    for page_id in pages {
        assert_eq!(media_box(&doc, page_id), vec![0.0, 0.0, 1224.0, 792.0]);
    }
}

#[tokio::test]
async fn test_booklet_pairing_puts_last_page_left_on_first_sheet() {
    let bytes = to_bytes(create_test_pdf(4));

    let output = convert_bytes(bytes, &ImposeOptions::default()).await.unwrap();
    let doc = Document::load_mem(&output).unwrap();
    let pages = page_ids(&doc);

    assert_eq!(drawn_xobjects(&doc, pages[0]), vec!["P3", "P0"]);
    assert_eq!(drawn_xobjects(&doc, pages[1]), vec!["P1", "P2"]);

    // XObject content is the original page content
    assert_eq!(source_line_width(&doc, pages[0], "P3"), "4");
    assert_eq!(source_line_width(&doc, pages[0], "P0"), "1");
    assert_eq!(source_line_width(&doc, pages[1], "P1"), "2");
    assert_eq!(source_line_width(&doc, pages[1], "P2"), "3");
}

#[tokio::test]
async fn test_left_half_at_origin_right_half_at_middle() {
    let source = create_test_pdf(4);

    let output = impose(&source, &ImposeOptions::default()).await.unwrap();
    let pages = page_ids(&output);

    for page_id in pages {
        let matrices = draw_matrices(&output, page_id);
        assert_eq!(matrices.len(), 2);
        // Letter pages fill each half exactly
        assert_eq!(matrices[0], vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        assert_eq!(matrices[1], vec![1.0, 0.0, 0.0, 1.0, 612.0, 0.0]);
    }
}

#[tokio::test]
async fn test_fold_pairing_keeps_first_page_left() {
    let source = create_test_pdf(4);
    let options = ImposeOptions {
        pairing: Pairing::Fold,
        ..Default::default()
    };

    let output = impose(&source, &options).await.unwrap();
    let pages = page_ids(&output);

    assert_eq!(drawn_xobjects(&output, pages[0]), vec!["P0", "P3"]);
    assert_eq!(drawn_xobjects(&output, pages[1]), vec!["P1", "P2"]);
}

#[tokio::test]
async fn test_three_pages_rejected() {
    let bytes = to_bytes(create_test_pdf(3));

    let result = convert_bytes(bytes, &ImposeOptions::default()).await;
    match result {
        Err(err @ SheetError::InvalidPageCount { .. }) => {
            assert!(err.is_page_count());
            assert_eq!(
                err.to_string(),
                "The PDF must have exactly 4 pages (found 3)."
            );
        }
        other => panic!("Expected InvalidPageCount, got {:?}", other.map(|b| b.len())),
    }
}

#[tokio::test]
async fn test_empty_document_rejected_by_page_count() {
    let source = create_test_pdf(0);

    let result = impose(&source, &ImposeOptions::default()).await;
    assert!(matches!(
        result,
        Err(SheetError::InvalidPageCount {
            expected: 4,
            found: 0
        })
    ));
}

#[tokio::test]
async fn test_open_page_count_accepts_any_even_count() {
    let source = create_test_pdf(8);
    let options = ImposeOptions {
        required_pages: None,
        ..Default::default()
    };

    let output = impose(&source, &options).await.unwrap();
    let pages = page_ids(&output);

    assert_eq!(pages.len(), 4);
    assert_eq!(drawn_xobjects(&output, pages[0]), vec!["P7", "P0"]);
    assert_eq!(drawn_xobjects(&output, pages[1]), vec!["P1", "P6"]);
    assert_eq!(drawn_xobjects(&output, pages[2]), vec!["P5", "P2"]);
    assert_eq!(drawn_xobjects(&output, pages[3]), vec!["P3", "P4"]);
}

#[tokio::test]
async fn test_open_page_count_rejects_odd_count() {
    let source = create_test_pdf(5);
    let options = ImposeOptions {
        required_pages: None,
        ..Default::default()
    };

    let result = impose(&source, &options).await;
    assert!(matches!(result, Err(SheetError::UnpairablePageCount(5))));
}

#[tokio::test]
async fn test_garbage_input_is_a_pdf_error() {
    let result = convert_bytes(b"definitely not a pdf".to_vec(), &ImposeOptions::default()).await;
    assert!(matches!(result, Err(SheetError::Pdf(_))));
}

#[tokio::test]
async fn test_undecodable_content_stream_is_an_error() {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for n in 1..=4 {
        let hex: String = format!("q {} w 0 0 m 612 792 l S Q", n)
            .bytes()
            .map(|b| format!("{:02X}", b))
            .collect();
        let encoded = Stream::new(
            Dictionary::from_iter(vec![("Filter", Object::Name(b"ASCIIHexDecode".to_vec()))]),
            format!("{}>", hex).into_bytes(),
        );
        let content_id = doc.add_object(encoded);
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }
    let source = finish_document(doc, pages_id, kids, Dictionary::new());

    let result = impose(&source, &ImposeOptions::default()).await;
    assert!(matches!(result, Err(SheetError::UndecodableContent(_))));

    let result = convert_bytes(to_bytes(source), &ImposeOptions::default()).await;
    assert!(matches!(result, Err(SheetError::UndecodableContent(_))));
}

#[tokio::test]
async fn test_invalid_options_rejected_before_loading() {
    let options = ImposeOptions {
        required_pages: Some(3),
        ..Default::default()
    };

    let result = convert_bytes(Vec::new(), &options).await;
    assert!(matches!(result, Err(SheetError::Config(_))));
}

#[tokio::test]
async fn test_output_is_deterministic() {
    let bytes = to_bytes(create_test_pdf(4));

    let first = convert_bytes(bytes.clone(), &ImposeOptions::default())
        .await
        .unwrap();
    let second = convert_bytes(bytes, &ImposeOptions::default())
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_fit_scaling_centers_a4_pages() {
    let source = create_sized_pdf(&[(595, 842); 4]);
    let options = ImposeOptions {
        scaling: ScalingMode::Fit,
        ..Default::default()
    };

    let output = impose(&source, &options).await.unwrap();
    let pages = page_ids(&output);
    let matrices = draw_matrices(&output, pages[0]);

    let scale = (612.0f32 / 595.0).min(792.0 / 842.0);
    assert!((matrices[0][0] - scale).abs() < 1e-4);
    assert!((matrices[0][3] - scale).abs() < 1e-4);
    // Narrower than the half, so shifted right by half the slack
    let expected_x = (612.0 - 595.0 * scale) / 2.0;
    assert!((matrices[0][4] - expected_x).abs() < 1e-3);
    assert!((matrices[1][4] - (612.0 + expected_x)).abs() < 1e-3);
}

#[tokio::test]
async fn test_inherited_media_box_and_resources() {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));
    let fonts = Dictionary::from_iter(vec![("F1", Object::Reference(font_id))]);
    let resources = Dictionary::from_iter(vec![("Font", Object::Dictionary(fonts))]);

    let mut kids = Vec::new();
    for n in 1..=4 {
        let content = format!("BT /F1 12 Tf 72 72 Td (Page {}) Tj ET", n);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let inherited = Dictionary::from_iter(vec![
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(396),
                Object::Integer(612),
            ]),
        ),
        ("Resources", Object::Dictionary(resources)),
    ]);
    let source = finish_document(doc, pages_id, kids, inherited);

    let output = impose(&source, &ImposeOptions::default()).await.unwrap();
    let pages = page_ids(&output);

    let form = xobject(&output, pages[0], "P3");
    let bbox: Vec<f32> = form
        .dict
        .get(b"BBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(number)
        .collect();
    assert_eq!(bbox, vec![0.0, 0.0, 396.0, 612.0]);
    assert!(form.dict.get(b"Resources").is_ok());

    // One shared font copied once, even though all four pages use it
    let font_copies = output
        .objects
        .values()
        .filter(|obj| {
            obj.as_dict()
                .map(|d| d.get(b"Type").and_then(|t| t.as_name()).ok() == Some(b"Font".as_slice()))
                .unwrap_or(false)
        })
        .count();
    assert_eq!(font_copies, 1);

    // Stretched from half-letter into the 612 x 792 half
    let matrices = draw_matrices(&output, pages[0]);
    assert!((matrices[0][0] - 612.0 / 396.0).abs() < 1e-4);
    assert!((matrices[0][3] - 792.0 / 612.0).abs() < 1e-4);
}

#[tokio::test]
async fn test_custom_sheet_size() {
    let source = create_test_pdf(4);
    let options = ImposeOptions {
        sheet: SheetGeometry::from_inches(11.0, 8.5),
        ..Default::default()
    };

    let output = impose(&source, &options).await.unwrap();
    for page_id in page_ids(&output) {
        assert_eq!(media_box(&output, page_id), vec![0.0, 0.0, 792.0, 612.0]);
    }
}

#[tokio::test]
async fn test_load_pdf() {
    use tempfile::NamedTempFile;

    let temp = NamedTempFile::new().unwrap();
    std::fs::write(temp.path(), to_bytes(create_test_pdf(4))).unwrap();

    let loaded = load_pdf(temp.path()).await.unwrap();
    assert_eq!(loaded.get_pages().len(), 4);
}

#[tokio::test]
async fn test_save_pdf() {
    use tempfile::NamedTempFile;

    let output = impose(&create_test_pdf(4), &ImposeOptions::default())
        .await
        .unwrap();
    let temp = NamedTempFile::new().unwrap();

    save_pdf(output, temp.path()).await.unwrap();

    let loaded = Document::load(temp.path()).unwrap();
    assert_eq!(loaded.get_pages().len(), 2);
}

#[tokio::test]
async fn test_save_pdf_bytes_round_trips_through_loader() {
    let output = impose(&create_test_pdf(4), &ImposeOptions::default())
        .await
        .unwrap();

    let bytes = save_pdf_bytes(output).await.unwrap();
    let reloaded = load_pdf_bytes(bytes).await.unwrap();
    assert_eq!(reloaded.get_pages().len(), 2);
}
