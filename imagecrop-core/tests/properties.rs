use imagecrop_core::{
    clamp, clamp_toward, constrain, is_contained, to_image, to_viewport, AspectRatio, CropEngine,
    Flags, HandleId, Point, Rect, Scale, Size, WidgetToHost,
};

const EPS: f64 = 1e-9;

fn sample_points() -> Vec<Point> {
    let coords = [-1234.5, -1.0, 0.0, 0.25, 1.0, 99.9, 450.0, 899.999, 1e6];
    coords
        .iter()
        .flat_map(|&x| coords.iter().map(move |&y| Point::new(x, y)))
        .collect()
}

fn sample_scales() -> Vec<Scale> {
    [1e-3, 0.1, 0.5, 1.0, 1.5, 2.0, 3.7, 100.0]
        .into_iter()
        .map(|s| Scale::new(s).unwrap())
        .collect()
}

fn sample_rects() -> Vec<Rect> {
    let points = sample_points();
    points
        .iter()
        .step_by(5)
        .flat_map(|&a| points.iter().step_by(7).map(move |&b| Rect::from_corners(a, b)))
        .collect()
}

fn sample_images() -> Vec<Size> {
    vec![
        Size::new(900.0, 600.0),
        Size::new(1.0, 1.0),
        Size::new(4000.0, 3000.0),
        Size::new(123.4, 5678.9),
    ]
}

fn sample_ratios() -> Vec<AspectRatio> {
    [(1.0, 1.0), (16.0, 9.0), (9.0, 16.0), (4.0, 3.0), (2.35, 1.0)]
        .into_iter()
        .map(|(w, h)| AspectRatio::new(w, h).unwrap())
        .collect()
}

#[test]
fn viewport_image_round_trip() {
    for scale in sample_scales() {
        for p in sample_points() {
            let back = to_image(to_viewport(p, scale), scale);
            let tolerance = EPS * (1.0 + p.x.abs().max(p.y.abs()));
            assert!(
                back.approx_eq(&p, tolerance),
                "{p:?} at scale {} came back as {back:?}",
                scale.value()
            );
        }
    }
}

#[test]
fn zero_or_non_finite_scale_is_rejected() {
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(Scale::new(bad).is_err(), "{bad} accepted");
    }
}

#[test]
fn clamp_is_idempotent() {
    for image in sample_images() {
        for r in sample_rects() {
            let once = clamp(r, image);
            assert_eq!(clamp(once, image), once, "{r:?} in {image:?}");
            assert!(is_contained(&once, image));
            assert!(once.is_valid());
        }
    }
}

#[test]
fn clamp_toward_is_idempotent_and_contained() {
    let handles = HandleId::RESIZE_HANDLES;
    for image in sample_images() {
        for r in sample_rects() {
            for handle in handles {
                let once = clamp_toward(r, image, handle, None);
                assert_eq!(clamp_toward(once, image, handle, None), once);
                assert!(is_contained(&once, image), "{r:?} {handle:?} -> {once:?}");
            }
        }
    }
}

#[test]
fn constrain_enforces_ratio() {
    let anchors = [Point::new(100.0, 100.0), Point::new(0.0, 0.0), Point::new(450.0, 300.0)];
    for ratio in sample_ratios() {
        for anchor in anchors {
            for p in sample_points() {
                let proposed = Rect::from_corners(anchor, p);
                if proposed.width() == 0.0 && proposed.height() == 0.0 {
                    continue;
                }
                let handle = HandleId::SouthEast.facing(anchor, p);
                let result = constrain(proposed, Some(ratio), Some(handle));
                let actual = result.width() / result.height();
                assert!(
                    (actual / ratio.value() - 1.0).abs() < 1e-9,
                    "{ratio:?} {proposed:?} -> {result:?}"
                );
            }
        }
    }
}

#[test]
fn constrain_then_clamp_keeps_ratio_inside_image() {
    let image = Size::new(900.0, 600.0);
    let anchor = Point::new(300.0, 200.0);
    for ratio in sample_ratios() {
        for p in sample_points() {
            let handle = HandleId::SouthEast.facing(anchor, p);
            let proposed = Rect::from_corners(anchor, p);
            let constrained = constrain(proposed, Some(ratio), Some(handle));
            let clamped = clamp_toward(constrained, image, handle, Some(ratio));
            assert!(is_contained(&clamped, image));
            if clamped.height() > 1e-6 {
                assert!(
                    ratio.matches(&clamped, 1e-6),
                    "{ratio:?} {p:?} -> {clamped:?}"
                );
            }
        }
    }
}

#[test]
fn published_rectangles_are_normalized() {
    let flags = Flags {
        offset: Some(Point::ORIGIN),
        ..Flags::new(Size::new(900.0, 600.0), 900.0)
    };
    let targets = [(50.0, 50.0), (800.0, 20.0), (20.0, 550.0), (890.0, 590.0)];
    for ratio in [None, Some(Size::new(3.0, 2.0))] {
        for target in targets {
            let mut engine = CropEngine::new(&Flags {
                aspect_ratio: ratio,
                ..flags.clone()
            })
            .unwrap();
            engine.pointer_down(Point::new(450.0, 300.0));
            engine.pointer_move(Point::new(target.0, target.1));
            let live = engine.live_selection().unwrap();
            assert!(live.is_valid(), "live {live:?}");

            for signal in engine.pointer_up(Point::new(target.0, target.1)) {
                if let WidgetToHost::SelectionChanged {
                    selection: Some(rect),
                } = signal
                {
                    assert!(rect.top_left.x <= rect.bottom_right.x);
                    assert!(rect.top_left.y <= rect.bottom_right.y);
                }
            }
        }
    }
}
