// SPDX-License-Identifier: MIT
//
// End-to-end: markup → screen buffer → bounded flush → sink.

use std::cell::Cell;

use ink_markup::TagProcessor;
use ink_screen::{Coord, FlushReport, Row, Screen, ScreenError};
use ink_term::terminal::{Fixed, Size, SizeError, SizeProvider, Unavailable};
use pretty_assertions::assert_eq;

/// A terminal whose size can change between calls, like a resized window.
struct Resizable {
    size: Cell<Size>,
    queries: Cell<usize>,
}

impl Resizable {
    fn new(cols: u16, rows: u16) -> Self {
        Self {
            size: Cell::new(Size::new(cols, rows)),
            queries: Cell::new(0),
        }
    }
}

impl SizeProvider for Resizable {
    fn query_size(&self) -> Result<Size, SizeError> {
        self.queries.set(self.queries.get() + 1);
        Ok(self.size.get())
    }
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[test]
fn styled_lines_reach_the_sink_in_order() {
    let mut screen = Screen::new(Fixed(Size::new(80, 24)), Vec::new());
    screen.write_tagged("{G%v{0 passed\n", &[&12]);
    screen.write_tagged("{R%v{0 failed\n", &[&0]);

    let sink = screen.finish().unwrap();
    assert_eq!(
        text(&sink),
        "\x1b[1m\x1b[32m12\x1b[0m passed\n\x1b[1m\x1b[31m0\x1b[0m failed\n"
    );
}

#[test]
fn status_line_placed_below_content() {
    let mut screen = Screen::new(Fixed(Size::new(80, 24)), Vec::new());
    screen.write_line("one");
    screen.write_line("two");
    screen.write_line("three");
    screen.move_cursor_to(1, Row::Below).unwrap();
    screen.write_tagged("{_b%v{0", &[&"status"]);

    let sink = screen.finish().unwrap();
    assert_eq!(
        text(&sink),
        "one\ntwo\nthree\n\x1b[4;1H\x1b[44mstatus\x1b[0m"
    );
}

#[test]
fn percentages_follow_a_resize() {
    let term = Resizable::new(100, 50);
    let mut screen = Screen::new(&term, Vec::new());

    screen.move_cursor_to(Coord::pct(50), Coord::pct(50)).unwrap();
    term.size.set(Size::new(200, 10));
    screen.move_cursor_to(Coord::pct(50), Coord::pct(50)).unwrap();

    assert_eq!(screen.contents(), "\x1b[25;50H\x1b[5;100H");
    assert_eq!(term.queries.get(), 2);
}

#[test]
fn flush_bound_follows_a_resize() {
    let term = Resizable::new(80, 2);
    let mut screen = Screen::new(&term, Vec::new());

    screen.write("1\n2\n3\n");
    assert_eq!(screen.flush().unwrap(), FlushReport { emitted: 2, dropped: 1 });

    term.size.set(Size::new(80, 10));
    screen.write("4\n5\n6\n");
    assert_eq!(screen.flush().unwrap(), FlushReport { emitted: 3, dropped: 0 });

    assert_eq!(text(screen.sink()), "1\n2\n4\n5\n6\n");
}

#[test]
fn headless_output_is_unbounded_but_refuses_percentages() {
    let mut screen = Screen::new(Unavailable, Vec::new());
    for i in 0..100 {
        screen.write_line(&i.to_string());
    }

    assert!(matches!(
        screen.move_cursor_to(Coord::pct(50), 1),
        Err(ScreenError::Resolve(_))
    ));
    screen.move_cursor_to(1, Row::Below).unwrap();

    // 100 lines plus the unterminated cursor move after them.
    assert_eq!(screen.flush().unwrap(), FlushReport { emitted: 101, dropped: 0 });
    assert!(text(screen.sink()).ends_with("99\n\x1b[101;1H"));
}

#[test]
fn plain_screen_strips_markup_but_keeps_positioning() {
    let mut screen = Screen::new(Fixed(Size::new(80, 24)), Vec::new())
        .with_processor(TagProcessor::standard().plain(true));
    screen.write_tagged("{Yhello{0 %v", &[&"world"]);
    screen.move_to("x\ny", 2, 3).unwrap();

    let sink = screen.finish().unwrap();
    assert_eq!(text(&sink), "hello world\x1b[3;2Hx\x1b[4;2Hy");
}

#[test]
fn unknown_tags_survive_the_whole_pipeline() {
    let mut screen = Screen::new(Fixed(Size::new(80, 24)), Vec::new());
    screen.write_tagged("{json: %v}", &[&1]);
    let sink = screen.finish().unwrap();
    assert_eq!(text(&sink), "{json: 1}");
}
