use std::collections::HashMap;

use vscroll::{HostCapabilities, Rect, ScrollerOptions, SlotId, SlotKey};
use vscroll_adapter::{Controller, IdStateStore};

#[derive(Clone)]
struct Entry {
    id: u64,
    lines: u32,
}

#[derive(Default)]
struct EntryState {
    expanded: bool,
}

fn main() -> Result<(), vscroll::Error> {
    // Example: a frame loop driving a measured-height list without holding any UI objects.
    //
    // An adapter would:
    // - forward scroll / resize / visibility events to the controller
    // - call tick(now_ms, measure) once per display frame, after layout
    // - render the slots whenever tick returns an outcome
    let entries: Vec<Entry> = (0..5_000)
        .map(|id| Entry {
            id,
            lines: (id % 4) as u32 + 1,
        })
        .collect();
    let heights: HashMap<u64, u32> = entries.iter().map(|e| (e.id, e.lines * 16)).collect();

    let mut c = Controller::new(ScrollerOptions::dynamic(16, |e: &Entry| Some(e.id)))?;
    let mut ui_state = IdStateStore::<u64, EntryState>::new();
    c.set_items(entries);
    c.mount(HostCapabilities::default());
    c.on_resize(Rect::new(320, 400));
    c.on_scroll(0, 400);

    let measure = |_: SlotId, key: &SlotKey<u64>| key.key().and_then(|id| heights.get(id).copied());

    let mut now_ms = 0u64;
    for frame in 0..40u64 {
        // A fling: fast scrolling for a few frames, then a jump and silence.
        match frame {
            1..=10 => c.on_scroll(frame * 700, 400),
            20 => {
                let offset = c.scroll_to_item(4_000);
                println!("t={now_ms} scroll_to_item(4000) -> offset={offset}");
            }
            _ => {}
        }

        if let Some(out) = c.tick(now_ms, measure)? {
            println!(
                "t={now_ms} window={:?} total={} continuous={} reassigned={}",
                out.window,
                out.total_height,
                out.continuous(),
                out.stats.reassignments()
            );
        }
        now_ms += 16;
    }

    for slot in c.scroller().slots().iter().filter(|s| s.is_used()).take(3) {
        if let Some(state) = ui_state.for_slot_key(slot.key(), EntryState::default) {
            state.expanded = !state.expanded;
        }
    }
    println!("id states: {}", ui_state.len());

    c.teardown();
    assert_eq!(c.tick(now_ms, measure)?, None);
    Ok(())
}
