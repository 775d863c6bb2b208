use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use egui::{Rect, pos2, vec2};
use stripchart::frame::Recorder;
use stripchart::persist::{KEY_CAPTION, Persistent, PropertyStore, SettingsFile};
use stripchart::{
    ChartRenderer, ChartTheme, Color, ColorStop, Domain, Labels, LiveChart, PersistError,
    Primitive, SampleRing, StaticChart,
};

fn live_chart(capacity: usize) -> (Arc<SampleRing>, LiveChart) {
    let ring = Arc::new(SampleRing::new(capacity).unwrap());
    let mut chart = LiveChart::new(
        Arc::clone(&ring),
        Domain::new(-1.0, 1.0).unwrap(),
        ChartTheme::default(),
    );
    chart.set_stops(&[
        ColorStop::new(-1.0, Color::BLACK),
        ColorStop::new(1.0, Color::WHITE),
    ]);
    (ring, chart)
}

#[test]
fn replayed_frame_matches_display_list() {
    let (ring, mut chart) = live_chart(50);
    chart.labels = Labels {
        caption: "temp".into(),
        header: "21.5".into(),
        footer: "°C".into(),
    };
    for i in 0..73 {
        ring.append((i as f32 * 0.3).sin());
    }

    let frame = chart.render(Rect::from_min_size(pos2(10.0, 20.0), vec2(300.0, 80.0)));
    let mut recorder = Recorder::default();
    frame.replay(&mut recorder);
    assert_eq!(recorder.frame, frame);

    assert!(matches!(frame.primitives().first(), Some(Primitive::FillRect { .. })));
    assert!(matches!(frame.primitives().last(), Some(Primitive::StrokeRect { .. })));
    let texts = frame
        .primitives()
        .iter()
        .filter(|p| matches!(p, Primitive::Text { .. }))
        .count();
    assert_eq!(texts, 3);
}

#[test]
fn static_area_replays_as_one_fill() {
    let mut chart = StaticChart::new(ChartTheme::default());
    chart.set_values((0..40).map(|i| (i as f32 / 6.0).sin() * 0.5 + 0.5).collect());

    let frame = chart.render(Rect::from_min_size(pos2(0.0, 0.0), vec2(390.0, 50.0)));
    let mut recorder = Recorder::default();
    frame.replay(&mut recorder);
    assert_eq!(recorder.frame, frame);

    let areas: Vec<_> = frame
        .primitives()
        .iter()
        .filter_map(|p| match p {
            Primitive::FillArea { points, floor, .. } => Some((points.len(), *floor)),
            _ => None,
        })
        .collect();
    assert_eq!(areas, vec![(40, 50.0)]);
    assert!(
        !frame
            .primitives()
            .iter()
            .any(|p| matches!(p, Primitive::FillPath { .. }))
    );
}

#[test]
fn every_quad_stays_inside_bounds() {
    let bounds = Rect::from_min_size(pos2(5.0, 5.0), vec2(200.0, 60.0));
    let (ring, chart) = live_chart(32);
    let wild = [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, 1e9, -1e9, 0.25];
    for n in 0..100 {
        ring.append(wild[n % wild.len()]);
        let frame = chart.render(bounds);
        for primitive in frame.primitives() {
            if let Primitive::FillPath { points, color } = primitive {
                for p in points {
                    assert!(p.x >= bounds.min.x - 1e-3 && p.x <= bounds.max.x + 1e-3);
                    assert!(p.y >= bounds.min.y && p.y <= bounds.max.y);
                }
                assert!(color.r.is_finite() && color.a.is_finite());
            }
        }
    }
}

#[test]
fn settings_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("state.cfg");

    let (ring, mut chart) = live_chart(4);
    ring.extend(&[0.5, -0.25, 1.0]);
    chart.labels = Labels {
        caption: "  padded caption".into(),
        header: "multi\nline".into(),
        footer: "back\\slash and crlf\r".into(),
    };
    let mut file = SettingsFile::open(&path).unwrap();
    assert!(file.is_empty());
    chart.save(&mut file);
    file.save().unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("footer=back\\\\slash and crlf\\r\n"));

    let reopened = SettingsFile::open(&path).unwrap();
    let (other_ring, mut other) = live_chart(4);
    other.load(&reopened).unwrap();
    assert_eq!(other.labels, chart.labels);
    assert_eq!(other.theme(), chart.theme());
    assert_eq!(other_ring.snapshot().values, vec![0.5, -0.25, 1.0, 0.0]);
}

#[test]
fn settings_file_skips_comments_and_reports_gaps() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.cfg");
    std::fs::write(&path, "# saved by hand\n\ncaption=hello\nheader=\n").unwrap();

    let file = SettingsFile::open(&path).unwrap();
    assert_eq!(file.get::<String>(KEY_CAPTION).unwrap(), "hello");

    let mut chart = StaticChart::new(ChartTheme::default());
    let err = chart.load(&file).unwrap_err();
    assert!(matches!(err, PersistError::MissingKey(ref key) if key == "footer"));
    assert_eq!(chart.labels.caption, "hello");
    assert_eq!(chart.labels.header, "");
}

#[test]
fn reader_never_sees_torn_or_foreign_values() {
    let ring = Arc::new(SampleRing::new(257).unwrap());
    let done = Arc::new(AtomicBool::new(false));

    let producer = {
        let ring = Arc::clone(&ring);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            for i in 1..=200_000u32 {
                ring.append(i as f32);
            }
            done.store(true, Ordering::Release);
        })
    };

    while !done.load(Ordering::Acquire) {
        let snapshot = ring.snapshot();
        assert!(snapshot.cursor < 257);
        for v in &snapshot.values {
            assert!(*v >= 0.0 && *v <= 200_000.0 && v.fract() == 0.0);
        }
    }
    producer.join().unwrap();

    assert_eq!(ring.current_cursor(), 200_000 % 257);
    assert_eq!(ring.latest(), 200_000.0);
}
