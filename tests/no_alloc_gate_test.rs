use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tui_snake::core::{GameSnapshot, GameState};
use tui_snake::term::{FrameBuffer, GameView, Viewport};
use tui_snake::types::{Direction, GameAction, Position};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
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

// Both checks run in one test so the global counter is never shared
// between concurrently running tests.
#[test]
fn steady_state_hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut gs = GameState::new(1);
    gs.start();
    gs.set_treasure(Position::new(10, 10));

    let mut snap = GameSnapshot::default();
    snap.snake.reserve(gs.config().cell_count());
    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(vp.width, vp.height);

    let core_allocs = with_alloc_counting(|| {
        // Eat, then circle inside the board for a while.
        for turn in [Direction::Down, Direction::Left, Direction::Up, Direction::Right] {
            for _ in 0..3 {
                gs.advance();
            }
            gs.apply_action(GameAction::Turn(turn));
        }
        gs.tick(1_000);
        gs.snapshot_into(&mut snap);
    });
    assert_eq!(core_allocs, 0, "engine allocated {core_allocs} times");

    let render_allocs = with_alloc_counting(|| {
        view.render_into(&snap, vp, &mut fb);
    });
    assert_eq!(render_allocs, 0, "renderer allocated {render_allocs} times");
}
