use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use packtris::core::line_clear::clear_lines;
use packtris::core::{GameEngine, PackedGrid};
use packtris::term::{FrameBuffer, GameView, Viewport};
use packtris::types::{CellValue, InputState, RIGHT_WALL_COL};

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

// Single test: the counter is process-global.
#[test]
fn hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut engine = GameEngine::new(1);
    let mut full = PackedGrid::new();
    for row in 15..20 {
        for col in 1..RIGHT_WALL_COL {
            full.set(row, col, CellValue::Locked);
        }
    }
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    // Warm-up.
    engine.tick(InputState::IDLE);
    view.render_into(&engine, viewport, &mut fb);

    let inputs = [
        InputState::IDLE,
        InputState {
            shift_left: true,
            rotate: true,
            ..InputState::IDLE
        },
        InputState {
            shift_right: true,
            fast_drop: true,
            ..InputState::IDLE
        },
    ];

    let allocs = with_alloc_counting(|| {
        // Ticks cover fall, lock, clear, spawn and game over.
        for i in 0..2000 {
            engine.tick(inputs[i % inputs.len()]);
            if engine.is_game_over() {
                engine.reset(i as u32);
            }
        }

        for _ in 0..10 {
            let mut grid = full.clone();
            let _ = clear_lines(&mut grid);
        }

        for _ in 0..10 {
            engine.tick(InputState::IDLE);
            view.render_into(&engine, viewport, &mut fb);
        }
    });

    assert_eq!(allocs, 0);
}
