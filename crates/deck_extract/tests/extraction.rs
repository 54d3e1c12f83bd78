use deck_core::{BorderStyle, Color, Edge, Fill, Rect, VisualElement, ZLayer};
use deck_extract::{ExtractOptions, extract_elements};
use deck_snapshot::{ImageInfo, Pseudo, SnapshotTree, TreeBuilder};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn canvas() -> TreeBuilder {
    TreeBuilder::new(Rect::new(0.0, 0.0, 1920.0, 1080.0))
}

fn extract(tree: &SnapshotTree) -> Vec<VisualElement> {
    extract_elements(tree, &ExtractOptions::default())
}

fn kinds(elements: &[VisualElement]) -> Vec<&'static str> {
    elements.iter().map(VisualElement::kind_name).collect()
}

#[test]
fn gradient_span_inside_paragraph_is_text_only() {
    init_logs();
    let mut builder = canvas();
    let root = builder.root();
    let para = builder
        .element(root, "p", Rect::new(100.0, 100.0, 600.0, 50.0))
        .style("color", "rgb(30, 30, 30)")
        .style("font-size", "32px")
        .id();
    builder.text(para, "Build ", Rect::new(100.0, 100.0, 80.0, 50.0));
    builder
        .element(para, "span", Rect::new(180.0, 100.0, 100.0, 50.0))
        .style("background-image", "linear-gradient(90deg, #ff71b8 0%, #6b5cff 100%)")
        .style("-webkit-background-clip", "text")
        .style("-webkit-text-fill-color", "transparent")
        .text("faster");
    builder.text(para, " today", Rect::new(280.0, 100.0, 90.0, 50.0));
    let tree = builder.build().expect("tree");

    let elements = extract(&tree);
    assert_eq!(kinds(&elements), vec!["text"]);
    let VisualElement::Text(text) = &elements[0] else {
        panic!("expected text");
    };
    assert_eq!(text.text(), "Build faster today");
    assert_eq!(text.geometry, Rect::new(100.0, 100.0, 270.0, 50.0));
    assert_eq!(text.runs.len(), 3);
    assert!(text.runs[0].gradient_overlay.is_none());
    assert!(text.runs[1].gradient_overlay.is_some());
    assert_eq!(text.runs[0].font_size_pt, 24.0);
}

#[test]
fn avatar_image_keeps_own_box_next_to_circle() {
    init_logs();
    let mut builder = canvas();
    let root = builder.root();
    let avatar = builder
        .element(root, "div", Rect::new(100.0, 100.0, 80.0, 80.0))
        .style("background-image", "linear-gradient(135deg, #667eea, #764ba2)")
        .style("border-radius", "50%")
        .id();
    builder
        .element(avatar, "img", Rect::new(110.0, 110.0, 60.0, 60.0))
        .image(ImageInfo {
            src: "avatar.png".to_owned(),
            alt: "Ada".to_owned(),
            natural_width: 0.0,
            natural_height: 0.0,
        });
    let tree = builder.build().expect("tree");

    let elements = extract(&tree);
    assert_eq!(kinds(&elements), vec!["circle", "image"]);
    let VisualElement::Circle(circle) = &elements[0] else {
        panic!("expected circle");
    };
    assert_eq!(circle.geometry, Rect::new(100.0, 100.0, 80.0, 80.0));
    assert!(matches!(circle.fill, Some(Fill::Gradient(_))));
    let VisualElement::Image(image) = &elements[1] else {
        panic!("expected image");
    };
    assert_eq!(image.geometry, Rect::new(110.0, 110.0, 60.0, 60.0));
    assert!(image.circular);
    assert_eq!(image.corner_radius_px, 40.0);
    assert_eq!((image.natural_width, image.natural_height), (60.0, 60.0));
}

#[test]
fn small_badge_splits_surrounding_text() {
    init_logs();
    let mut builder = canvas();
    let root = builder.root();
    let para = builder
        .element(root, "p", Rect::new(0.0, 0.0, 400.0, 30.0))
        .id();
    builder.text(para, "Open issues", Rect::new(0.0, 0.0, 120.0, 30.0));
    builder
        .element(para, "span", Rect::new(124.0, 3.0, 24.0, 24.0))
        .style("background-color", "rgb(220, 40, 40)")
        .style("border-radius", "12px")
        .text("3");
    builder.text(para, "this week", Rect::new(152.0, 0.0, 100.0, 30.0));
    let tree = builder.build().expect("tree");

    let elements = extract(&tree);
    assert_eq!(kinds(&elements), vec!["styled_text", "text", "text"]);
    let texts: Vec<String> = elements
        .iter()
        .filter_map(|element| match element {
            VisualElement::Text(text) => Some(text.text()),
            _ => None,
        })
        .collect();
    assert_eq!(texts, vec!["Open issues", "this week"]);
}

#[test]
fn image_and_icon_inside_badge_are_kept() {
    init_logs();
    let mut builder = canvas();
    let root = builder.root();
    let badge = builder
        .element(root, "span", Rect::new(100.0, 100.0, 140.0, 34.0))
        .style("background-color", "rgb(238, 242, 255)")
        .style("border-radius", "6px")
        .text("United States")
        .id();
    builder
        .element(badge, "img", Rect::new(108.0, 109.0, 16.0, 16.0))
        .image(ImageInfo {
            src: "flag.png".to_owned(),
            ..ImageInfo::default()
        });
    builder
        .element(badge, "i", Rect::new(220.0, 109.0, 16.0, 16.0))
        .class("fas")
        .class("fa-check");
    let tree = builder.build().expect("tree");

    let elements = extract(&tree);
    assert_eq!(kinds(&elements), vec!["styled_text", "image", "text"]);
    let VisualElement::Image(image) = &elements[1] else {
        panic!("expected image, got {elements:?}");
    };
    assert_eq!(image.source, "flag.png");
    assert_eq!(image.geometry, Rect::new(108.0, 109.0, 16.0, 16.0));
    let VisualElement::Text(icon) = &elements[2] else {
        panic!("expected icon, got {elements:?}");
    };
    assert_eq!(icon.text(), "\u{2713}");
}

#[test]
fn image_inside_gradient_text_is_kept() {
    init_logs();
    let mut builder = canvas();
    let root = builder.root();
    let title = builder
        .element(root, "div", Rect::new(100.0, 300.0, 500.0, 60.0))
        .style("background-image", "linear-gradient(90deg, #ff71b8, #6b5cff)")
        .style("-webkit-background-clip", "text")
        .style("-webkit-text-fill-color", "transparent")
        .text("Launch")
        .id();
    builder
        .element(title, "img", Rect::new(560.0, 310.0, 40.0, 40.0))
        .image(ImageInfo {
            src: "rocket.svg".to_owned(),
            ..ImageInfo::default()
        });
    let tree = builder.build().expect("tree");

    let elements = extract(&tree);
    assert_eq!(kinds(&elements), vec!["text", "image"]);
}

#[test]
fn table_cells_carry_pseudo_separators() {
    init_logs();
    let mut builder = canvas();
    let root = builder.root();
    let table = builder
        .element(root, "table", Rect::new(50.0, 50.0, 400.0, 80.0))
        .id();
    let row = builder
        .element(table, "tr", Rect::new(50.0, 50.0, 400.0, 40.0))
        .id();
    builder
        .element(row, "th", Rect::new(50.0, 50.0, 200.0, 40.0))
        .style("font-weight", "700")
        .pseudo(Pseudo::After, "content", "\"\"")
        .pseudo(Pseudo::After, "width", "1px")
        .text("Name");
    builder
        .element(row, "td", Rect::new(250.0, 50.0, 200.0, 40.0))
        .style("background-color", "rgb(240, 240, 240)")
        .text("Value");
    let tree = builder.build().expect("tree");

    let elements = extract(&tree);
    assert_eq!(kinds(&elements), vec!["table"]);
    let VisualElement::Table(table) = &elements[0] else {
        panic!("expected table");
    };
    let cells: Vec<_> = table.cells().collect();
    assert_eq!(cells.len(), 2);
    assert!(cells[0].header && cells[0].bold);
    let separator = cells[0].separators.get(Edge::Right).expect("separator");
    assert_eq!(separator.style, BorderStyle::Dotted);
    assert_eq!(separator.color, Color::rgb(176, 176, 176));
    assert!(cells[1].separators.get(Edge::Left).is_none());
    assert_eq!(cells[1].background, Some(Color::rgb(240, 240, 240)));
    assert_eq!(cells[1].text, "Value");
}

#[test]
fn icon_glyph_falls_back_to_accent_color() {
    init_logs();
    let mut builder = canvas();
    let root = builder.root();
    builder
        .element(root, "i", Rect::new(10.0, 10.0, 24.0, 24.0))
        .class("fas")
        .class("fa-check");
    let tree = builder.build().expect("tree");

    let elements = extract(&tree);
    let VisualElement::Text(icon) = &elements[0] else {
        panic!("expected icon text, got {elements:?}");
    };
    assert_eq!(icon.text(), "\u{2713}");
    assert_eq!(icon.runs[0].color, Color::rgb(107, 92, 255));
}

#[test]
fn hairline_containers_are_not_drawn() {
    init_logs();
    let mut builder = canvas();
    let root = builder.root();
    builder
        .element(root, "div", Rect::new(0.0, 100.0, 400.0, 1.0))
        .style("background-color", "rgb(200, 200, 200)");
    builder
        .element(root, "div", Rect::new(0.0, 200.0, 400.0, 2.0))
        .style("background-color", "rgb(200, 200, 200)");
    let tree = builder.build().expect("tree");

    let elements = extract(&tree);
    assert_eq!(kinds(&elements), vec!["shape"]);
    assert_eq!(elements[0].geometry(), Rect::new(0.0, 200.0, 400.0, 2.0));
}

#[test]
fn body_color_becomes_background_first() {
    init_logs();
    let mut builder = canvas();
    let root = builder.root();
    builder.edit(root).style("background-color", "rgb(15, 23, 42)");
    builder
        .element(root, "h1", Rect::new(100.0, 100.0, 800.0, 80.0))
        .style("color", "rgb(255, 255, 255)")
        .text("Quarterly review");
    let tree = builder.build().expect("tree");

    let elements = extract(&tree);
    assert_eq!(kinds(&elements), vec!["background", "text"]);
    let VisualElement::Background(background) = &elements[0] else {
        panic!("expected background");
    };
    assert_eq!(background.color, Some(Color::rgb(15, 23, 42)));
    assert_eq!(background.geometry, Rect::new(0.0, 0.0, 1920.0, 1080.0));
    assert_eq!(elements[0].layer(), ZLayer::Background);
}

#[test]
fn loose_text_is_emitted_once_and_hidden_nodes_never() {
    init_logs();
    let mut builder = canvas();
    let root = builder.root();
    let outer = builder
        .element(root, "div", Rect::new(0.0, 0.0, 300.0, 40.0))
        .text("Footnote ")
        .id();
    builder
        .element(outer, "span", Rect::new(0.0, 0.0, 100.0, 40.0))
        .text("inner");
    builder
        .element(root, "div", Rect::new(0.0, 50.0, 300.0, 40.0))
        .style("display", "none")
        .text("Hidden");
    let tree = builder.build().expect("tree");

    let elements = extract(&tree);
    assert_eq!(kinds(&elements), vec!["text"]);
    let VisualElement::Text(text) = &elements[0] else {
        panic!("expected text");
    };
    assert_eq!(text.text(), "Footnote inner");
}

#[test]
fn extraction_is_deterministic() {
    init_logs();
    let mut builder = canvas();
    let root = builder.root();
    builder.edit(root).style("background-color", "#ffffff");
    let card = builder
        .element(root, "section", Rect::new(40.0, 40.0, 500.0, 300.0))
        .style("background-color", "rgba(0, 0, 0, 0.5)")
        .style("border-radius", "16px")
        .id();
    builder
        .element(card, "h2", Rect::new(60.0, 60.0, 400.0, 40.0))
        .text("Title");
    let list = builder
        .element(card, "ul", Rect::new(60.0, 120.0, 400.0, 80.0))
        .id();
    builder
        .element(list, "li", Rect::new(60.0, 120.0, 400.0, 30.0))
        .style("list-style-type", "circle")
        .text("Point");
    let tree = builder.build().expect("tree");

    let first = extract(&tree);
    let second = extract(&tree);
    assert_eq!(first, second);
    assert_eq!(kinds(&first), vec!["background", "shape", "text", "text"]);
    let VisualElement::Shape(card) = &first[1] else {
        panic!("expected shape");
    };
    assert_eq!(card.fill, Some(Fill::Solid(Color::rgba(0, 0, 0, 0.5))));
}
