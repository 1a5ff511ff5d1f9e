use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tetris_board::core::{pieces, Board, PieceRef};
use tetris_board::engine::drop_piece;
use tetris_board::types::PieceKind;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = layout;
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = (layout, new_size);
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn board_hot_paths_do_not_allocate() {
    // Counting is process-wide, so every gate lives in this one test.
    // Setup (outside counting): build the rotation table and both grid buffers.
    let _ = pieces();
    let mut board = Board::new(10, 20);
    let flat = PieceRef::root(PieceKind::Stick).next().piece();
    let pyramid = PieceRef::root(PieceKind::Pyramid).piece();

    let allocs = with_alloc_counting(|| {
        for _ in 0..100 {
            // place -> undo
            let _ = board.place(pyramid, 3, 0);
            board.undo();

            // place -> clear -> commit
            let _ = board.place(flat, 0, 0);
            board.commit();
            let _ = board.place(flat, 4, 0);
            board.commit();
            let _ = board.place(&pieces().cycle(PieceKind::Square)[0], 8, 0);
            let _ = board.clear_rows();
            board.commit();

            // Failed placement and rollback
            let _ = board.place(flat, 8, 0);
            board.undo();

            let _ = board.drop_height(pyramid, 5);
            let _ = board.check_invariants();
        }
    });

    assert_eq!(allocs, 0);

    // Drops run the whole place -> clear -> commit sequence.
    let mut board = Board::new(10, 40);
    let allocs = with_alloc_counting(|| {
        for i in 0..60 {
            let kind = PieceKind::ALL[i % PieceKind::ALL.len()];
            let r = PieceRef::root(kind);
            let x = (i % 7) as i32;
            let _ = drop_piece(&mut board, r.piece(), x);
        }
    });

    assert_eq!(allocs, 0);
}
