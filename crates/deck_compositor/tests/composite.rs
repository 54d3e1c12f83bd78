use deck_compositor::DocumentSink as _;
use deck_compositor::units::{inches, points};
use deck_compositor::{
    Corners, DashStyle, LocalImageLoader, RecordingSink, ShapeKind, SinkCapabilities, SinkOp,
    UnitConverter, WarningKind, composite,
};
use deck_core::{
    BackgroundElement, Border, BorderSet, BorderSide, BorderStyle, Color, Fill, Gradient,
    GradientKind, GradientStop, ImageElement, ImageFit, Rect, ShapeElement, StyledTextElement,
    TableCell, TableElement, TableRow, TextAlign, TextElement, TextRun, VisualElement,
};
use image::{ColorType, ImageEncoder as _, codecs::png::PngEncoder};
use std::fs;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sink_with(capabilities: SinkCapabilities) -> RecordingSink {
    let mut sink = RecordingSink::new(capabilities);
    sink.begin_slide().expect("slide");
    sink
}

fn run(content: &str, font_size_pt: f32) -> TextRun {
    TextRun {
        content: content.to_owned(),
        font_family: "Arial".to_owned(),
        font_size_pt,
        bold: false,
        italic: false,
        color: Color::BLACK,
        alignment: TextAlign::Left,
        gradient_overlay: None,
    }
}

fn text(geometry: Rect, content: &str) -> VisualElement {
    VisualElement::Text(TextElement {
        geometry,
        runs: vec![run(content, 18.0)],
        bullet: None,
        border: None,
    })
}

fn shape(geometry: Rect, fill: Option<Fill>) -> ShapeElement {
    ShapeElement {
        geometry,
        fill,
        border: None,
        corner_radius_px: 0.0,
    }
}

fn two_stop_gradient() -> Gradient {
    Gradient::new(
        GradientKind::Linear,
        Some(0.0),
        vec![
            GradientStop::new(0.0, Color::rgb(255, 113, 184)),
            GradientStop::new(1.0, Color::rgb(107, 92, 255)),
        ],
    )
    .expect("gradient")
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let pixels = vec![200_u8; (width * height * 4) as usize];
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(&pixels, width, height, ColorType::Rgba8.into())
        .expect("encode png");
    buf
}

fn image(source: &str, geometry: Rect) -> VisualElement {
    VisualElement::Image(ImageElement {
        geometry,
        source: source.to_owned(),
        alt: String::new(),
        natural_width: 0.0,
        natural_height: 0.0,
        fit: ImageFit::Fill,
        circular: false,
        corner_radius_px: 0.0,
    })
}

fn fills(sink: &RecordingSink) -> Vec<Color> {
    sink.ops(0)
        .iter()
        .filter_map(|op| match op {
            SinkOp::SolidFill { color, .. } => Some(*color),
            _ => None,
        })
        .collect()
}

#[test]
fn images_end_up_above_everything() {
    init_logs();
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("logo.png"), png_bytes(4, 2)).expect("write png");
    let loader = LocalImageLoader::new(Some(dir.path().to_path_buf()));

    let elements = vec![
        image("logo.png", Rect::new(10.0, 10.0, 40.0, 20.0)),
        text(Rect::new(0.0, 100.0, 300.0, 40.0), "Caption under the logo"),
        VisualElement::Shape(shape(
            Rect::new(0.0, 0.0, 400.0, 300.0),
            Some(Fill::Solid(Color::rgb(240, 240, 240))),
        )),
    ];
    let mut sink = sink_with(SinkCapabilities::default());
    let report = composite(&elements, &mut sink, &UnitConverter::default(), &loader);

    assert!(report.is_clean(), "{report:?}");
    assert_eq!(report.drawn, 3);
    let z_order = sink.z_order(0);
    let top = z_order.last().copied().expect("shapes drawn");
    assert!(matches!(
        sink.creation_of(0, top),
        Some(SinkOp::AddImage { width_px: 4, height_px: 2, .. })
    ));
    assert!(matches!(
        sink.creation_of(0, z_order[0]),
        Some(SinkOp::AddShape { .. })
    ));
}

#[test]
fn missing_image_is_skipped_with_a_warning() {
    init_logs();
    let elements = vec![
        VisualElement::Circle(shape(
            Rect::new(0.0, 0.0, 80.0, 80.0),
            Some(Fill::Solid(Color::rgb(102, 126, 234))),
        )),
        image("does-not-exist.png", Rect::new(10.0, 10.0, 60.0, 60.0)),
        image("https://cdn.example.com/a.png", Rect::new(10.0, 10.0, 60.0, 60.0)),
    ];
    let mut sink = sink_with(SinkCapabilities::default());
    let report = composite(
        &elements,
        &mut sink,
        &UnitConverter::default(),
        &LocalImageLoader::default(),
    );

    assert_eq!(report.drawn, 1);
    assert_eq!(report.dropped, 2);
    assert_eq!(report.warnings_of(WarningKind::ResourceFetch), 2);
    assert_eq!(report.warnings[0].element_index, 1);
    assert!(matches!(
        sink.ops(0)[1],
        SinkOp::AddShape {
            kind: ShapeKind::Oval,
            ..
        }
    ));
}

#[test]
fn translucent_fill_flattens_against_white() {
    init_logs();
    let elements = vec![VisualElement::Shape(shape(
        Rect::new(0.0, 0.0, 100.0, 100.0),
        Some(Fill::Solid(Color::rgba(0, 0, 0, 0.5))),
    ))];
    let mut sink = sink_with(SinkCapabilities::default());
    composite(
        &elements,
        &mut sink,
        &UnitConverter::default(),
        &LocalImageLoader::default(),
    );
    assert_eq!(fills(&sink), vec![Color::rgb(128, 128, 128)]);
}

#[test]
fn translucent_fill_flattens_against_slide_background() {
    init_logs();
    let elements = vec![
        VisualElement::Background(BackgroundElement {
            geometry: Rect::new(0.0, 0.0, 1920.0, 1080.0),
            color: Some(Color::rgb(0, 0, 0)),
            gradient: None,
        }),
        VisualElement::Shape(shape(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Some(Fill::Solid(Color::rgba(255, 255, 255, 0.5))),
        )),
    ];
    let mut sink = sink_with(SinkCapabilities::default());
    composite(
        &elements,
        &mut sink,
        &UnitConverter::default(),
        &LocalImageLoader::default(),
    );
    assert_eq!(
        sink.ops(0)[1],
        SinkOp::SetBackground {
            color: Color::BLACK
        }
    );
    assert_eq!(fills(&sink), vec![Color::rgb(128, 128, 128)]);
}

#[test]
fn rejected_gradient_falls_back_to_first_stop() {
    init_logs();
    let elements = vec![VisualElement::Shape(shape(
        Rect::new(0.0, 0.0, 100.0, 50.0),
        Some(Fill::Gradient(two_stop_gradient())),
    ))];
    let mut sink = sink_with(SinkCapabilities::default()).rejecting_gradient_fills();
    let report = composite(
        &elements,
        &mut sink,
        &UnitConverter::default(),
        &LocalImageLoader::default(),
    );

    assert_eq!(report.drawn, 1);
    assert_eq!(report.warnings_of(WarningKind::UnsupportedCapability), 1);
    assert_eq!(fills(&sink), vec![Color::rgb(255, 113, 184)]);
}

#[test]
fn gradient_background_is_sent_to_back() {
    init_logs();
    let elements = vec![
        VisualElement::Shape(shape(
            Rect::new(0.0, 0.0, 100.0, 50.0),
            Some(Fill::Solid(Color::WHITE)),
        )),
        VisualElement::Background(BackgroundElement {
            geometry: Rect::new(0.0, 0.0, 1920.0, 1080.0),
            color: None,
            gradient: Some(two_stop_gradient()),
        }),
    ];
    let converter = UnitConverter::default();
    let mut sink = sink_with(SinkCapabilities::default());
    let report = composite(&elements, &mut sink, &converter, &LocalImageLoader::default());

    assert!(report.is_clean(), "{report:?}");
    let back = sink.z_order(0)[0];
    assert_eq!(
        sink.creation_of(0, back),
        Some(&SinkOp::AddShape {
            id: back,
            kind: ShapeKind::Rectangle,
            frame: converter.page_frame(),
        })
    );
    assert!(
        sink.ops(0)
            .iter()
            .any(|op| matches!(op, SinkOp::GradientFill { .. }))
    );
}

#[test]
fn mismatched_sides_become_edge_strips() {
    init_logs();
    let mut set = BorderSet::default();
    set.top = Some(BorderSide::new(Color::rgb(255, 0, 0), 4.0, BorderStyle::Solid));
    set.left = Some(BorderSide::new(Color::rgb(0, 0, 255), 2.0, BorderStyle::Solid));
    let card = ShapeElement {
        border: Some(Border::PerSide(set)),
        corner_radius_px: 12.0,
        ..shape(Rect::new(100.0, 100.0, 200.0, 100.0), None)
    };

    let mut plain = sink_with(SinkCapabilities::default());
    let report = composite(
        &[VisualElement::Shape(card.clone())],
        &mut plain,
        &UnitConverter::default(),
        &LocalImageLoader::default(),
    );
    let kinds: Vec<ShapeKind> = plain
        .ops(0)
        .iter()
        .filter_map(|op| match op {
            SinkOp::AddShape { kind, .. } => Some(*kind),
            _ => None,
        })
        .collect();
    assert_eq!(kinds.len(), 3);
    assert!(
        kinds
            .iter()
            .all(|kind| matches!(kind, ShapeKind::RoundedRectangle { .. }))
    );
    assert_eq!(report.warnings_of(WarningKind::UnsupportedCapability), 1);
    assert_eq!(
        fills(&plain),
        vec![Color::rgb(255, 0, 0), Color::rgb(0, 0, 255)]
    );

    let mut full = sink_with(SinkCapabilities::full());
    let full_report = composite(
        &[VisualElement::Shape(card)],
        &mut full,
        &UnitConverter::default(),
        &LocalImageLoader::default(),
    );
    assert!(full_report.is_clean(), "{full_report:?}");
    let corners: Vec<Corners> = full
        .ops(0)
        .iter()
        .filter_map(|op| match op {
            SinkOp::AddShape {
                kind: ShapeKind::PartiallyRounded { corners, .. },
                ..
            } => Some(*corners),
            _ => None,
        })
        .collect();
    assert_eq!(corners, vec![Corners::TOP, Corners::LEFT]);
}

#[test]
fn uniform_sides_become_one_outline() {
    init_logs();
    let side = BorderSide::new(Color::rgb(20, 20, 20), 2.0, BorderStyle::Dashed);
    let set = BorderSet {
        top: Some(side),
        right: Some(side),
        bottom: Some(side),
        left: Some(side),
    };
    let boxed = ShapeElement {
        border: Some(Border::PerSide(set)),
        ..shape(Rect::new(0.0, 0.0, 50.0, 50.0), None)
    };
    let mut sink = sink_with(SinkCapabilities::default());
    composite(
        &[VisualElement::Shape(boxed)],
        &mut sink,
        &UnitConverter::default(),
        &LocalImageLoader::default(),
    );
    let outline = sink
        .ops(0)
        .iter()
        .find_map(|op| match op {
            SinkOp::Outline { outline, .. } => Some(*outline),
            _ => None,
        })
        .expect("outline");
    assert_eq!(outline.dash, DashStyle::Dash);
    assert!((outline.width_pt - 1.44).abs() < 1e-4);
}

fn sample_table() -> TableElement {
    let cell = |x: f32, content: &str, header: bool| TableCell {
        geometry: Rect::new(x, 0.0, 100.0, 30.0),
        text: content.to_owned(),
        header,
        alignment: TextAlign::Left,
        font_family: "Arial".to_owned(),
        font_size_pt: 12.0,
        bold: false,
        color: Color::BLACK,
        background: Some(Color::rgba(0, 0, 0, 0.2)),
        borders: BorderSet {
            bottom: Some(BorderSide::new(Color::BLACK, 1.0, BorderStyle::Solid)),
            ..BorderSet::default()
        },
        separators: BorderSet::default(),
    };
    TableElement {
        geometry: Rect::new(0.0, 0.0, 200.0, 30.0),
        rows: vec![TableRow {
            cells: vec![cell(0.0, "Name", true), cell(100.0, "Value", false)],
        }],
    }
}

#[test]
fn tables_decompose_without_native_support() {
    init_logs();
    let mut sink = sink_with(SinkCapabilities::default());
    let report = composite(
        &[VisualElement::Table(sample_table())],
        &mut sink,
        &UnitConverter::default(),
        &LocalImageLoader::default(),
    );
    assert!(report.is_clean(), "{report:?}");

    let ops = sink.ops(0);
    let lines = ops
        .iter()
        .filter(|op| matches!(op, SinkOp::AddLine { .. }))
        .count();
    assert_eq!(lines, 2);
    let bodies: Vec<_> = ops
        .iter()
        .filter_map(|op| match op {
            SinkOp::SetText { body, .. } => Some(body),
            _ => None,
        })
        .collect();
    assert_eq!(bodies.len(), 2);
    assert!(bodies[0].runs[0].bold);
    assert!(!bodies[1].runs[0].bold);
    assert_eq!(bodies[0].margins.top, inches(0.03));
    assert_eq!(fills(&sink)[0], Color::rgb(204, 204, 204));
}

#[test]
fn tables_go_through_native_support_when_available() {
    init_logs();
    let mut sink = sink_with(SinkCapabilities::full());
    composite(
        &[VisualElement::Table(sample_table())],
        &mut sink,
        &UnitConverter::default(),
        &LocalImageLoader::default(),
    );
    assert!(matches!(
        sink.ops(0)[1],
        SinkOp::AddTable {
            rows: 1,
            columns: 2,
            ..
        }
    ));
    assert_eq!(sink.ops(0).len(), 2);
}

#[test]
fn bullet_badge_aligns_with_first_line() {
    init_logs();
    let badge = StyledTextElement {
        geometry: Rect::new(70.0, 205.0, 20.0, 20.0),
        run: run("1", 10.0),
        fill: Some(Fill::Solid(Color::rgb(107, 92, 255))),
        border: None,
        corner_radius_px: 10.0,
    };
    let elements = vec![
        VisualElement::StyledText(badge),
        text(Rect::new(100.0, 200.0, 400.0, 40.0), "First point of the list"),
    ];
    let converter = UnitConverter::default();
    let mut sink = sink_with(SinkCapabilities::default());
    composite(&elements, &mut sink, &converter, &LocalImageLoader::default());

    let frame = sink
        .ops(0)
        .iter()
        .find_map(|op| match op {
            SinkOp::AddShape { frame, .. } => Some(*frame),
            _ => None,
        })
        .expect("badge shape");
    let expected = converter.y(200.0) + points(18.0 * 0.6) - converter.y(20.0) / 2;
    assert_eq!(frame.top, expected);
    assert_eq!(frame.left, converter.x(70.0));
}

#[test]
fn gradient_text_keeps_first_stop_color_without_support() {
    init_logs();
    let mut gradient_run = run("faster", 24.0);
    gradient_run.color = Color::TRANSPARENT;
    gradient_run.gradient_overlay = Some(two_stop_gradient());
    let element = VisualElement::Text(TextElement {
        geometry: Rect::new(0.0, 0.0, 300.0, 40.0),
        runs: vec![run("Build", 24.0), gradient_run],
        bullet: None,
        border: None,
    });

    let mut sink = sink_with(SinkCapabilities::default());
    let report = composite(
        &[element.clone()],
        &mut sink,
        &UnitConverter::default(),
        &LocalImageLoader::default(),
    );
    assert_eq!(report.warnings_of(WarningKind::UnsupportedCapability), 1);
    let body = sink
        .ops(0)
        .iter()
        .find_map(|op| match op {
            SinkOp::SetText { body, .. } => Some(body.clone()),
            _ => None,
        })
        .expect("text body");
    assert_eq!(body.runs[1].color, Color::rgb(255, 113, 184));
    assert!(body.runs[1].gradient_overlay.is_none());
    assert_eq!(body.margins.left, inches(0.01));

    let mut full = sink_with(SinkCapabilities::full());
    let full_report = composite(
        &[element],
        &mut full,
        &UnitConverter::default(),
        &LocalImageLoader::default(),
    );
    assert!(full_report.is_clean(), "{full_report:?}");
}
