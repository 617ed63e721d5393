// Example: measured heights fed back into the height table.
use vscroll::{HostCapabilities, ScrollerEvent, ScrollerOptions, SlotKey, VirtualScroller};

#[derive(Clone)]
struct Message {
    id: u64,
    text: String,
}

// Stand-in for a layout engine: one 18px line per 40 characters, plus padding.
fn rendered_height(m: &Message) -> u32 {
    let lines = m.text.len().div_ceil(40).max(1) as u32;
    lines * 18 + 8
}

fn main() -> Result<(), vscroll::Error> {
    let messages: Vec<Message> = (0..1_000)
        .map(|id| Message {
            id,
            text: "lorem ipsum ".repeat((id % 7) as usize + 1),
        })
        .collect();

    let opts = ScrollerOptions::dynamic(26, |m: &Message| Some(m.id))
        .with_buffer(100)
        .with_emit_item_resize(true)
        .with_on_event(Some(|e: &ScrollerEvent<u64>| {
            if let ScrollerEvent::ItemResize { key } = e {
                println!("  item resized: {key:?}");
            }
        }));
    let mut s = VirtualScroller::new(opts)?;
    s.set_items(messages.clone());
    s.mount(HostCapabilities::default());
    s.set_element_scroll(0, 300);

    let out = s.update_visible_items()?;
    println!(
        "before measuring: window={:?} total={}",
        out.window, out.total_height
    );

    // After layout, read the real heights of the rendered slots. Repeat until stable.
    loop {
        let committed = s.flush_measurements(|_, key| {
            let SlotKey::Key(id) = key else {
                return None;
            };
            messages.get(*id as usize).map(rendered_height)
        });
        if committed == 0 {
            break;
        }
        let out = s.update_visible_items()?;
        println!(
            "committed {committed}: window={:?} total={}",
            out.window, out.total_height
        );
    }

    // A container resize invalidates every measurement.
    s.handle_resize(vscroll::Rect::new(320, 300));
    s.handle_resize(vscroll::Rect::new(200, 300));
    let out = s.update_visible_items()?;
    println!("after resize: window={:?} total={}", out.window, out.total_height);
    Ok(())
}
