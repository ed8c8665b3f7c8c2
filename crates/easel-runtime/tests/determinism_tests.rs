//! Determinism: identical sources give identical artifacts, whichever
//! session or thread runs them.

use easel_runtime::{RunReport, Session, Snapshot};
use std::thread;

const PAINTING: &str = r#"
title = "Aurora"
content = ""
for x = 0, width - 1 do
  for y = 0, height - 1 do
    image[x][y] = hsl(x / width, 0.8, 0.2 + 0.6 * y / height)
  end
  if x % 16 == 0 then content = content .. x .. ";" end
end
"#;

fn paint() -> Snapshot {
    Session::new(PAINTING)
        .expect("failed to create session")
        .run()
        .expect("run failed")
}

#[test]
fn two_sessions_produce_identical_snapshots() {
    let a = paint();
    let b = paint();
    assert_eq!(a, b);
    assert_eq!(a.digest(), b.digest());
    assert_eq!(a.content, "0;16;32;48;");
}

#[test]
fn reports_are_byte_identical() {
    let a = RunReport::from(&paint()).to_json().unwrap();
    let b = RunReport::from(&paint()).to_json().unwrap();
    assert_eq!(a, b);
}

#[test]
fn sessions_on_separate_threads_agree() {
    let expected = paint().digest();
    let handles: Vec<_> = (0..4)
        .map(|_| thread::spawn(|| paint().digest()))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn painting_uses_the_whole_canvas() {
    let snapshot = paint();
    assert_ne!(snapshot.pixel(0, 0), snapshot.pixel(63, 35));
    assert!(snapshot.canvas.pixels().iter().all(|c| c.packed() != 0));
}
