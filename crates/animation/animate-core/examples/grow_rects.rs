//! Two rectangles grow to 800x600 in turn. The second animation is attached
//! from the first one's `on_end`, so it starts on the frame after the first
//! finishes. Runs headless at a fixed 60 Hz step and prints each state change.

use std::cell::RefCell;
use std::rc::Rc;

use animate_core::{AnimationEvents, Engine};

#[derive(Debug, Default, Clone, Copy)]
struct Rect {
    name: &'static str,
    width: f32,
    height: f32,
}

type Target = Rc<RefCell<Rect>>;

const FULL_WIDTH: f32 = 800.0;
const FULL_HEIGHT: f32 = 600.0;
const DT: f32 = 1.0 / 60.0;

fn main() -> animate_core::Result<()> {
    let mut engine: Engine<Target> = Engine::default();

    let grow = engine.create_animation(
        AnimationEvents::new()
            .on_start(|_, r: &Target| println!("{}: start", r.borrow().name))
            .on_each_repeat_start(|_, r: &Target| println!("{}: cycle start", r.borrow().name))
            .on_update(|_, progress, r: &Target| {
                let mut r = r.borrow_mut();
                r.width = FULL_WIDTH * progress;
                r.height = FULL_HEIGHT * progress;
            })
            .on_each_repeat_end(|_, r: &Target| {
                let mut r = r.borrow_mut();
                println!("{}: cycle end at {}x{}", r.name, r.width, r.height);
                r.width = 0.0;
                r.height = 0.0;
            })
            .on_end(|_, r: &Target| println!("{}: end", r.borrow().name)),
    );

    let first = Rc::new(RefCell::new(Rect {
        name: "first",
        ..Rect::default()
    }));
    let second = Rc::new(RefCell::new(Rect {
        name: "second",
        ..Rect::default()
    }));

    let chained = second.clone();
    engine.attach_animation(
        grow,
        first.clone(),
        3.0,
        2,
        AnimationEvents::new().on_end(move |eng, r: &Target| {
            println!("{}: end, handing over", r.borrow().name);
            let next = AnimationEvents::new();
            if let Err(e) = eng.attach_animation(grow, chained.clone(), 2.0, 3, next) {
                eprintln!("could not chain: {e}");
            }
        }),
    )?;

    let mut frames = 0u32;
    while engine.instance_count() > 0 {
        engine.update_animations(DT);
        frames += 1;
        if frames % 60 == 0 {
            let (a, b) = (first.borrow(), second.borrow());
            println!(
                "t={:>5.2}s first={:>5.1}x{:<5.1} second={:>5.1}x{:<5.1}",
                frames as f32 * DT,
                a.width,
                a.height,
                b.width,
                b.height
            );
        }
    }
    println!("done after {frames} frames");
    Ok(())
}
