// Example: fixed-height list, windowing and slot recycling.
use vscroll::{ScrollerOptions, VirtualScroller};

struct Row {
    id: u64,
    label: String,
}

fn main() -> Result<(), vscroll::Error> {
    let rows: Vec<Row> = (0..100_000)
        .map(|id| Row {
            id,
            label: format!("row #{id}"),
        })
        .collect();

    let mut s = VirtualScroller::new(ScrollerOptions::fixed(24, |r: &Row| Some(r.id)))?;
    s.set_items(rows);
    s.set_element_scroll(0, 480);
    let out = s.update_visible_items()?;
    println!(
        "window={:?} total_height={} slots={}",
        out.window,
        out.total_height,
        s.slots().len()
    );

    // A small scroll reuses the slots that left the window.
    s.set_element_scroll(240, 480);
    let out = s.update_visible_items()?;
    println!("scrolled: window={:?} stats={:?}", out.window, out.stats);

    let offset = s.scroll_to_item(50_000);
    let out = s.update_visible_items()?;
    println!(
        "scroll_to_item(50000): offset={offset} window={:?} continuous={}",
        out.window,
        out.continuous()
    );

    for (slot, line) in s.render(|row, index, active| {
        format!("{index:>6} {} {}", row.label, if active { "" } else { "(parked)" })
    }) {
        println!("slot {:>2}: {line}", slot.0);
    }
    Ok(())
}
