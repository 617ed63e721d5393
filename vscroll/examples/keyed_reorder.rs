// Example: slots follow stable keys across reorders and replacements.
use vscroll::{ScrollerOptions, SlotKey, VirtualScroller};

#[derive(Clone, Debug)]
struct Task {
    id: Option<u64>,
    kind: u64,
}

fn main() -> Result<(), vscroll::Error> {
    let tasks: Vec<Task> = (0..50)
        .map(|i| Task {
            id: Some(i),
            kind: i % 2,
        })
        .collect();

    let opts = ScrollerOptions::fixed(20, |t: &Task| t.id)
        .with_type_of(|t: &Task| t.kind)
        .with_buffer(0);
    let mut s = VirtualScroller::new(opts)?;
    s.set_items(tasks.clone());
    s.set_element_scroll(0, 200);
    s.update_visible_items()?;
    let before = s.pool().slot_for_key(&SlotKey::Key(3)).map(|slot| slot.id());

    // Reverse the visible part: every item keeps its slot, only offsets change.
    let mut reordered = tasks.clone();
    reordered[..10].reverse();
    s.set_items(reordered);
    let out = s.update_visible_items()?;
    let after = s.pool().slot_for_key(&SlotKey::Key(3)).map(|slot| (slot.id(), slot.top()));
    println!("reorder: stats={:?} key 3 {before:?} -> {after:?}", out.stats);

    // Items without a key (or with a duplicate one) fall back to their position.
    let mut broken = tasks;
    broken[4].id = None;
    broken[6].id = Some(1);
    s.set_items(broken);
    println!("diagnostics: {:?}", s.diagnostics());
    let out = s.update_visible_items()?;
    println!("after replacement: stats={:?}", out.stats);
    Ok(())
}
