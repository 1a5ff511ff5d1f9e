//! Pieces module tests - geometry, skirt and rotation cycles

use tetris_board::core::{build_rotation_cycle, pieces, Piece, PieceParseError, PieceRef};
use tetris_board::types::{Coord, PieceKind, PYRAMID_STR, S1_STR, STICK_STR};

fn piece(s: &str) -> Piece {
    s.parse().expect("valid piece string")
}

// ============== Size Tests ==============

#[test]
fn test_sample_sizes() {
    let pyr1 = piece(PYRAMID_STR);
    let pyr2 = pyr1.rotate_ccw();
    assert_eq!((pyr1.width(), pyr1.height()), (3, 2));
    assert_eq!((pyr2.width(), pyr2.height()), (2, 3));

    let stick = piece(STICK_STR);
    assert_eq!((stick.width(), stick.height()), (1, 4));

    let fast = PieceRef::root(PieceKind::Stick);
    assert_eq!((fast.piece().width(), fast.piece().height()), (1, 4));
    assert_eq!((fast.next().piece().width(), fast.next().piece().height()), (4, 1));

    let l1 = PieceRef::root(PieceKind::L1);
    assert_eq!((l1.piece().width(), l1.piece().height()), (2, 3));
    assert_eq!((l1.next().piece().width(), l1.next().piece().height()), (3, 2));
}

// ============== Skirt Tests ==============

#[test]
fn test_sample_skirts() {
    let pyr1 = piece(PYRAMID_STR);
    let pyr3 = pyr1.rotate_ccw().rotate_ccw();
    assert_eq!(pyr1.skirt(), &[0, 0, 0]);
    assert_eq!(pyr3.skirt(), &[1, 0, 1]);

    let s = piece(S1_STR);
    assert_eq!(s.skirt(), &[0, 0, 1]);
    assert_eq!(s.rotate_ccw().skirt(), &[1, 0]);
}

#[test]
fn test_skirt_is_lowest_body_cell_per_column() {
    for kind in PieceKind::ALL {
        for p in pieces().cycle(kind).iter() {
            assert_eq!(p.skirt().len(), p.width() as usize);
            for (x, &low) in p.skirt().iter().enumerate() {
                let expected = p
                    .body()
                    .iter()
                    .filter(|c| c.x == x as i32)
                    .map(|c| c.y)
                    .min()
                    .unwrap();
                assert_eq!(low, expected, "{:?} column {}", kind, x);
            }
        }
    }
}

#[test]
fn test_bodies_touch_origin() {
    for kind in PieceKind::ALL {
        for p in pieces().cycle(kind).iter() {
            assert!(p.body().iter().all(|c| c.x >= 0 && c.y >= 0));
            assert!(p.body().iter().any(|c| c.x == 0));
            assert!(p.body().iter().any(|c| c.y == 0));
        }
    }
}

// ============== Rotation Tests ==============

#[test]
fn test_rotation_circle() {
    let l1 = PieceRef::root(PieceKind::L1);
    assert_eq!(l1.next().next().next().next(), l1);
    assert!(l1.next().next().next().next().piece().geometric_eq(l1.piece()));

    let pyr1 = piece(PYRAMID_STR);
    let pyr5 = pyr1.rotate_ccw().rotate_ccw().rotate_ccw().rotate_ccw();
    assert!(pyr1.geometric_eq(&pyr5));

    let square = PieceRef::root(PieceKind::Square);
    assert!(square.piece().geometric_eq(square.next().piece()));
}

#[test]
fn test_every_cycle_closes_without_repeats() {
    for kind in PieceKind::ALL {
        let root = PieceRef::root(kind);
        let len = root.rotations();
        assert_eq!(4 % len, 0, "{:?} cycle length {} does not divide 4", kind, len);

        let mut r = root.next();
        for step in 1..len {
            assert!(
                !r.piece().geometric_eq(root.piece()),
                "{:?} repeats its root after {} step(s)",
                kind,
                step
            );
            r = r.next();
        }
        assert_eq!(r, root);
        assert!(root.piece().rotate_ccw().geometric_eq(root.next().piece()));
    }
}

#[test]
fn test_cycle_links_follow_rotate_ccw() {
    for kind in PieceKind::ALL {
        let cycle = pieces().cycle(kind);
        for i in 0..cycle.len() {
            let next = &cycle[cycle.next_index(i)];
            assert!(cycle[i].rotate_ccw().geometric_eq(next));
        }
    }
}

#[test]
fn test_registry_roots_match_canonical_strings() {
    let roots: Vec<&Piece> = pieces().roots().collect();
    assert_eq!(roots.len(), 7);
    for (kind, root) in PieceKind::ALL.iter().zip(roots) {
        assert!(root.geometric_eq(&piece(kind.body_str())));
    }
}

#[test]
fn test_build_cycle_for_custom_shape() {
    // Pentomino "P": asymmetric, so four orientations
    let p = piece("0 0  1 0  0 1  1 1  0 2");
    let cycle = build_rotation_cycle(p.clone());
    assert_eq!(cycle.len(), 4);
    assert!(cycle.root().geometric_eq(&p));
    assert!(cycle[3].rotate_ccw().geometric_eq(&p));

    let single = build_rotation_cycle(Piece::new([Coord::new(0, 0)]));
    assert_eq!(single.len(), 1);
}

// ============== Parsing Tests ==============

#[test]
fn test_parse_tolerates_mixed_whitespace() {
    let p = piece("0 0\t1 0\n 1 1   2 0");
    assert!(p.geometric_eq(&piece(PYRAMID_STR)));
}

#[test]
fn test_parse_rejects_malformed_text() {
    assert!(matches!(
        "0 0 1 0 1".parse::<Piece>(),
        Err(PieceParseError::OddTokenCount { count: 5 })
    ));
    assert!(matches!(
        "0 0 a 1".parse::<Piece>(),
        Err(PieceParseError::InvalidToken { .. })
    ));
    assert!(matches!(
        "0 0 1.5 1".parse::<Piece>(),
        Err(PieceParseError::InvalidToken { .. })
    ));
}
