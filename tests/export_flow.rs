use genba_board::config::{CompositorConfig, ExportFormat, HexColor};
use genba_board::domain::{
    BrushEffect, DisplayRect, GeometryFrame, NativeRect, OverlayBounds, Point, Stroke,
};
use genba_board::photo::SitePhoto;
use genba_board::session::{EditMsg, PointerEvent, Session, ToolMode, handle_edit_msg};
use image::{Rgba, RgbaImage};

const PHOTO: Rgba<u8> = Rgba([60, 120, 180, 255]);

fn send(session: &mut Session, msgs: impl IntoIterator<Item = EditMsg>) {
    for msg in msgs {
        handle_edit_msg(session, msg).unwrap();
    }
}

fn png_session(native: (u32, u32), display: (f32, f32)) -> Session {
    let config = CompositorConfig {
        export_format: ExportFormat::Png,
        ..Default::default()
    };
    let mut session = Session::new(config, None);
    session.set_photo(SitePhoto::new(RgbaImage::from_pixel(native.0, native.1, PHOTO)));
    send(
        &mut session,
        [EditMsg::SetViewport(DisplayRect::new(0.0, 0.0, display.0, display.1))],
    );
    session
}

#[test]
fn test_projection_at_five_times_scale() {
    let frame = GeometryFrame::new(4000, 3000, DisplayRect::new(0.0, 0.0, 800.0, 600.0)).unwrap();

    assert_eq!(
        OverlayBounds::default().to_native(&frame),
        NativeRect {
            x: 100.0,
            y: 100.0,
            width: 1200.0,
            height: 900.0
        }
    );

    let stroke = Stroke {
        points: vec![Point::new(50.0, 50.0), Point::new(60.0, 60.0)],
        radius: 30.0,
        effect: BrushEffect::Fill,
        fill_color: HexColor::BLACK,
    };
    let projected = stroke.to_native(&frame);
    assert_eq!(projected.radius, 150.0);
    assert_eq!(projected.width(), 300.0);
    assert_eq!(
        projected.points,
        vec![Point::new(250.0, 250.0), Point::new(300.0, 300.0)]
    );
}

#[test]
fn test_painted_export_is_native_resolution() {
    let mut session = png_session((400, 300), (80.0, 60.0));
    send(
        &mut session,
        [
            EditMsg::HideBoard,
            EditMsg::SetToolMode(ToolMode::Erase),
            EditMsg::SetBrushEffect(BrushEffect::Fill),
            EditMsg::SetFillColor("#ffffff".into()),
            EditMsg::SetBrushRadius(5.0),
            EditMsg::Pointer(PointerEvent::Down(Point::new(40.0, 30.0))),
            EditMsg::Pointer(PointerEvent::Move(Point::new(60.0, 30.0))),
            EditMsg::Pointer(PointerEvent::Up),
        ],
    );

    let exported = session.export().unwrap();
    let img = image::load_from_memory(&exported.bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (400, 300));
    // Stroke runs (200,150)-(300,150) natively, 50px wide
    assert_eq!(*img.get_pixel(250, 150), Rgba([255, 255, 255, 255]));
    assert_eq!(*img.get_pixel(250, 170), Rgba([255, 255, 255, 255]));
    assert_eq!(*img.get_pixel(250, 200), PHOTO);
    assert_eq!(*img.get_pixel(10, 10), PHOTO);
}

#[test]
fn test_undo_restores_original_pixels() {
    let mut session = png_session((200, 100), (200.0, 100.0));
    send(&mut session, [EditMsg::HideBoard]);
    let clean = session.export().unwrap().bytes;

    send(
        &mut session,
        [
            EditMsg::SetToolMode(ToolMode::Erase),
            EditMsg::SetBrushEffect(BrushEffect::Fill),
            EditMsg::Pointer(PointerEvent::Down(Point::new(150.0, 50.0))),
            EditMsg::Pointer(PointerEvent::Move(Point::new(180.0, 60.0))),
            EditMsg::Pointer(PointerEvent::Up),
        ],
    );
    assert_ne!(session.export().unwrap().bytes, clean);

    send(&mut session, [EditMsg::Undo]);
    assert_eq!(session.export().unwrap().bytes, clean);
}

#[test]
fn test_board_is_drawn_in_native_space() {
    let mut session = png_session((400, 300), (80.0, 60.0));
    let exported = session.export().unwrap();
    let img = image::load_from_memory(&exported.bytes).unwrap().to_rgba8();

    // Default bounds project to (100,100) 1200x900, clipped to the photo
    assert_eq!(*img.get_pixel(50, 50), PHOTO);
    assert_ne!(*img.get_pixel(300, 250), PHOTO);

    send(&mut session, [EditMsg::HideBoard]);
    let hidden = image::load_from_memory(&session.export().unwrap().bytes)
        .unwrap()
        .to_rgba8();
    assert_eq!(*hidden.get_pixel(300, 250), PHOTO);
}

#[test]
fn test_exports_are_deterministic() {
    let mut session = png_session((320, 240), (160.0, 120.0));
    send(
        &mut session,
        [
            EditMsg::SetText(genba_board::domain::TextField::Title, "Tower B".into()),
            EditMsg::SetToolMode(ToolMode::Erase),
            EditMsg::Pointer(PointerEvent::Down(Point::new(20.0, 110.0))),
            EditMsg::Pointer(PointerEvent::Move(Point::new(60.0, 100.0))),
            EditMsg::Pointer(PointerEvent::Move(Point::new(90.0, 110.0))),
            EditMsg::Pointer(PointerEvent::Up),
        ],
    );

    let first = session.export().unwrap();
    let second = session.export().unwrap();
    assert_eq!(first.bytes, second.bytes);
    assert!(first.filename.starts_with("genba-photo-"));
    assert!(first.filename.ends_with(".png"));
}

#[test]
fn test_widest_blur_on_large_photo() {
    let mut session = png_session((2000, 1500), (400.0, 300.0));
    send(
        &mut session,
        [
            EditMsg::HideBoard,
            EditMsg::SetToolMode(ToolMode::Erase),
            EditMsg::SetBrushEffect(BrushEffect::Blur),
            EditMsg::SetBrushRadius(100.0),
            EditMsg::Pointer(PointerEvent::Down(Point::new(100.0, 150.0))),
            EditMsg::Pointer(PointerEvent::Move(Point::new(300.0, 150.0))),
            EditMsg::Pointer(PointerEvent::Up),
        ],
    );

    let exported = session.export().unwrap();
    let img = image::load_from_memory(&exported.bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2000, 1500));
    // Blurring a flat photo leaves it flat, even at the widest brush
    for (x, y) in [(1000, 750), (600, 500), (10, 10)] {
        let p = img.get_pixel(x, y);
        for c in 0..3 {
            assert!((p[c] as i32 - PHOTO[c] as i32).abs() <= 2, "{x},{y}: {p:?}");
        }
    }
}
