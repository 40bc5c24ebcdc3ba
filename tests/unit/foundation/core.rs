use super::*;

use rand::SeedableRng;
use rand_pcg::Pcg32;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn frames_approx(a: &Frame, b: &Frame) -> bool {
    approx(a.a, b.a)
        && approx(a.b, b.b)
        && approx(a.c, b.c)
        && approx(a.d, b.d)
        && approx(a.e, b.e)
        && approx(a.f, b.f)
}

#[test]
fn premultiply_scales_colour_by_alpha() {
    let px = Rgba8Premul::from_straight_rgba(255, 0, 0, 128);
    assert_eq!(px, Rgba8Premul { r: 128, g: 0, b: 0, a: 128 });
    assert_eq!(
        Rgba8Premul::from_straight_rgba(10, 20, 30, 255).to_array(),
        [10, 20, 30, 255]
    );
    assert_eq!(Rgba8Premul::from_straight_rgba(255, 255, 255, 0).a, 0);
}

#[test]
fn corners_of_axis_aligned_frame() {
    let frame = Frame::new(100.0, 0.0, 0.0, 100.0, 10.0, 20.0);
    assert_eq!(frame.top_left(), Point::new(10.0, 20.0));
    assert_eq!(frame.top_right(), Point::new(110.0, 20.0));
    assert_eq!(frame.bottom_right(), Point::new(110.0, 120.0));
    assert_eq!(frame.bottom_left(), Point::new(10.0, 120.0));
    assert_eq!(frame.corner(Corner::BottomRight), frame.bottom_right());
}

#[test]
fn to_affine_maps_unit_square_onto_corners() {
    let frame = Frame::new(80.0, 10.0, 5.0, 60.0, 30.0, 40.0);
    let t = frame.to_affine();
    assert_eq!(t * Point::new(0.0, 0.0), frame.top_left());
    assert_eq!(t * Point::new(1.0, 0.0), frame.top_right());
    assert_eq!(t * Point::new(1.0, 1.0), frame.bottom_right());
    assert_eq!(t * Point::new(0.0, 1.0), frame.bottom_left());
}

#[test]
fn scale_about_keeps_its_fixed_point() {
    let zoom = Frame::scale_about(2.0, 50.0, 60.0);
    let mapped = zoom.to_affine() * Point::new(50.0, 60.0);
    assert!(approx(mapped.x, 50.0));
    assert!(approx(mapped.y, 60.0));

    let far = zoom.to_affine() * Point::new(51.0, 60.0);
    assert!(approx(far.x, 52.0));
}

#[test]
fn similarity_centred_lands_centre_on_target() {
    let frame = Frame::similarity_centred(2.0, 0.0, 10.0, 10.0);
    let centre = frame.top_left().midpoint(frame.bottom_right());
    assert!(approx(centre.x, 10.0));
    assert!(approx(centre.y, 10.0));

    let edge = frame.top_right() - frame.top_left();
    assert!(approx(edge.length(), 2.0));

    // A rotated similarity keeps edge length and centre.
    let rotated = Frame::similarity_centred(3.0, 1.2, -5.0, 7.0);
    let centre = rotated.top_left().midpoint(rotated.bottom_right());
    assert!(approx(centre.x, -5.0));
    assert!(approx(centre.y, 7.0));
    assert!(approx((rotated.top_right() - rotated.top_left()).length(), 3.0));
}

#[test]
fn transformed_by_translation_shifts_origin_only() {
    let frame = Frame::new(80.0, 10.0, 5.0, 60.0, 30.0, 40.0);
    let moved = frame.transformed_by(&Frame::translation(7.0, -3.0));
    assert!(frames_approx(
        &moved,
        &Frame::new(80.0, 10.0, 5.0, 60.0, 37.0, 37.0)
    ));
}

#[test]
fn transformed_by_composes_associatively() {
    let frame = Frame::new(80.0, 10.0, 5.0, 60.0, 30.0, 40.0);
    let g1 = Frame::scale_about(0.5, 12.0, 34.0);
    let g2 = Frame::new(0.8, 0.2, -0.2, 0.8, 5.0, -5.0);

    let stepwise = frame.transformed_by(&g1).transformed_by(&g2);
    let composed = frame.transformed_by(&g1.transformed_by(&g2));
    assert!(frames_approx(&stepwise, &composed));
}

#[test]
fn relative_to_recovers_known_half_scale() {
    let reference = Frame::new(100.0, 0.0, 0.0, 100.0, 0.0, 0.0);
    let generator = Frame::new(50.0, 0.0, 0.0, 50.0, 25.0, 25.0);
    let rel = generator.relative_to(&reference);
    assert!(frames_approx(
        &rel,
        &Frame::new(0.5, 0.0, 0.0, 0.5, 25.0, 25.0)
    ));
}

#[test]
fn relative_to_maps_reference_corners_onto_frame_corners() {
    let reference = Frame::new(90.0, 12.0, -8.0, 110.0, 40.0, 25.0);
    let generator = Frame::new(30.0, -20.0, 15.0, 45.0, 140.0, 90.0);
    let rel = generator.relative_to(&reference).to_affine();

    for corner in Corner::ALL {
        let mapped = rel * reference.corner(corner);
        let expected = generator.corner(corner);
        assert!(approx(mapped.x, expected.x));
        assert!(approx(mapped.y, expected.y));
    }
}

#[test]
fn seeded_scene_has_centred_reference_and_three_generators() {
    let mut rng = Pcg32::seed_from_u64(7);
    let frames = FrameList::seeded(
        SurfaceSize {
            width: 300,
            height: 300,
        },
        &mut rng,
    );

    assert_eq!(frames.len(), 4);
    assert_eq!(frames.generators().len(), 3);

    let reference = frames.reference();
    assert!(frames_approx(
        reference,
        &Frame::new(100.0, 0.0, 0.0, 100.0, 100.0, 100.0)
    ));

    // Generators start strictly smaller than the reference.
    for generator in frames.generators() {
        let edge = (generator.a * generator.a + generator.c * generator.c).sqrt();
        assert!(edge < 100.0);
        assert!(edge > 0.0);
    }
}

#[test]
fn seeded_is_deterministic_for_a_seed() {
    let size = SurfaceSize {
        width: 640,
        height: 480,
    };
    let a = FrameList::seeded(size, &mut Pcg32::seed_from_u64(42));
    let b = FrameList::seeded(size, &mut Pcg32::seed_from_u64(42));
    assert_eq!(a, b);
}

#[test]
fn from_frames_rejects_empty() {
    assert!(FrameList::from_frames(vec![]).is_err());
    assert!(FrameList::from_frames(vec![Frame::translation(0.0, 0.0)]).is_ok());
}

#[test]
fn reference_frame_is_never_removable() {
    let mut frames = FrameList::from_frames(vec![
        Frame::new(100.0, 0.0, 0.0, 100.0, 0.0, 0.0),
        Frame::new(50.0, 0.0, 0.0, 50.0, 10.0, 10.0),
    ])
    .unwrap();

    assert!(frames.remove(0).is_none());
    assert_eq!(frames.len(), 2);
    assert!(frames.remove(5).is_none());
    assert!(frames.remove(1).is_some());
    assert_eq!(frames.len(), 1);
}

#[test]
fn selection_roundtrips_through_serde() {
    let sel = Selection {
        index: Some(3),
        corner: Some(Corner::BottomLeft),
    };
    let json = serde_json::to_string(&sel).unwrap();
    let back: Selection = serde_json::from_str(&json).unwrap();
    assert_eq!(sel, back);
    assert_eq!(Selection::none().index, None);
}
