use approx::assert_relative_eq;
use collision_lab::*;

fn square() -> Bounds {
    Bounds::new(0.0, 0.0, 10.0, 10.0).unwrap()
}

#[test]
fn vector_arithmetic_is_componentwise() {
    let a = Vector::xy(3.0, 4.0);
    let b = Vector::xy(1.0, 2.0);

    assert_eq!(a.add(&b).unwrap(), Vector::xy(4.0, 6.0));
    assert_eq!(a.sub(&b).unwrap(), Vector::xy(2.0, 2.0));
    assert_eq!(a.mul(&b).unwrap(), Vector::xy(3.0, 8.0));
    assert_eq!(a.div(&b).unwrap(), Vector::xy(3.0, 2.0));
    assert_eq!(a.neg(), Vector::xy(-3.0, -4.0));
    assert_relative_eq!(a.dot(&b).unwrap(), 11.0);
    assert_relative_eq!(a.magnitude(), 5.0);
    assert_relative_eq!(a.distance(&b).unwrap(), 8.0_f64.sqrt());
}

#[test]
fn vector_arity_mismatch_fails_instead_of_truncating() {
    let planar = Vector::xy(1.0, 2.0);
    let spatial = Vector::new([1.0, 2.0, 3.0]);

    assert_eq!(
        planar.add(&spatial),
        Err(CollisionError::LengthMismatch { left: 2, right: 3 })
    );
    assert!(planar.dot(&spatial).is_err());
    assert!(spatial.distance(&planar).is_err());
    assert!(spatial.to_dvec2().is_err());
}

#[test]
fn vector_supports_any_arity() {
    let v = Vector::new([1.0, 2.0, 2.0]);
    assert_eq!(v.len(), 3);
    assert_relative_eq!(v.magnitude(), 3.0);
    assert_eq!(v.to_string(), "(1, 2, 2)");
}

#[test]
fn bounds_reject_unordered_corners() {
    assert!(Bounds::new(10.0, 0.0, 0.0, 10.0).is_err());
    assert!(Bounds::new(0.0, 0.0, f64::NAN, 10.0).is_err());
    assert!(Bounds::new(5.0, 5.0, 5.0, 5.0).is_ok());
}

#[test]
fn circle_containment_boundary_law() {
    let bounds = square();
    assert!(!Circle::at(0.0, 0.0, 1.0).lies_within(&bounds));
    assert!(Circle::at(1.0, 1.0, 1.0).lies_within(&bounds));
    assert!(!Circle::at(10.0, 10.0, 1.0).lies_within(&bounds));
    assert!(Circle::at(9.0, 9.0, 1.0).lies_within(&bounds));
}

#[test]
fn quadrants_tile_the_parent() {
    let bounds = Bounds::new(-4.0, 2.0, 12.0, 10.0).unwrap();
    let quadrants = bounds.quadrants();

    let total: f64 = quadrants.iter().map(Bounds::area).sum();
    assert_relative_eq!(total, bounds.area());
    for q in &quadrants {
        assert_relative_eq!(q.area(), bounds.area() / 4.0);
        assert!(bounds.contains_bounds(q));
    }

    // y grows downwards, so "top" is the low-y half
    let top_right = bounds.quadrant(Quadrant::TopRight);
    assert_eq!((top_right.x0(), top_right.y0()), (4.0, 2.0));
    let bottom_left = bounds.quadrant(Quadrant::BottomLeft);
    assert_eq!((bottom_left.x1(), bottom_left.y1()), (4.0, 10.0));
    assert_eq!(quadrants[Quadrant::BottomRight.index()], bounds.quadrant(Quadrant::BottomRight));
}

#[test]
fn quadrant_interiors_do_not_overlap() {
    let quadrants = square().quadrants();
    for (i, a) in quadrants.iter().enumerate() {
        for b in &quadrants[i + 1..] {
            let overlap_w = a.x1().min(b.x1()) - a.x0().max(b.x0());
            let overlap_h = a.y1().min(b.y1()) - a.y0().max(b.y0());
            assert!(overlap_w <= 0.0 || overlap_h <= 0.0);
        }
    }
}

#[test]
fn circle_predicate_is_inclusive() {
    let a = Circle::at(0.0, 0.0, 1.0);
    assert!(a.collides_with(&Circle::at(2.0, 0.0, 1.0)));
    assert!(!a.collides_with(&Circle::at(2.0001, 0.0, 1.0)));
    assert!(a.collides_with(&a.clone()));
}

#[test]
fn shapes_dispatch_by_variant() {
    let circle: Shape = Circle::at(5.0, 5.0, 1.0).into();
    let near_rect: Shape = Rect::at(7.0, 5.0, 1.0, 1.0).into();
    let far_rect: Shape = Rect::at(5.0, 9.0, 1.0, 1.0).into();

    assert!(circle.collides_with(&near_rect));
    assert!(near_rect.collides_with(&circle));
    assert!(!circle.collides_with(&far_rect));
    assert!(near_rect.lies_within(&square()));
    assert!(!Shape::from(Rect::at(9.5, 5.0, 1.0, 1.0)).lies_within(&square()));
}
