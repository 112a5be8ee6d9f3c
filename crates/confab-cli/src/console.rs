//! Terminal output: banner, prompts, and the streaming renderer.

use std::io::{self, Write};

use confab_core::TurnRenderer;

const BANNER: &str = r#"
                  __       _
  ___ ___  _ __  / _| __ _| |__
 / __/ _ \| '_ \| |_ / _` | '_ \
| (_| (_) | | | |  _| (_| | |_) |
 \___\___/|_| |_|_|  \__,_|_.__/
"#;

const REPLY_PROMPT: &str = "Confab > ";
const SPINNER_DOTS: [&str; 4] = ["", ".", "..", "..."];

pub fn print_banner() {
    println!("{BANNER}");
    println!("Your personal local AI chatbot\n");
}

pub fn print_farewell() {
    println!("Goodbye!");
}

/// Plain-text terminal implementation of [`TurnRenderer`].
///
/// While waiting it animates dots after the reply prompt, redrawing in
/// place with a carriage return. Once tokens arrive it prints only the
/// suffix of the accumulated reply that has not been written yet, so the
/// transcript grows without ever being reprinted from the start.
pub struct TermRenderer<W: Write> {
    out: W,
    written: usize,
    frame: usize,
}

impl Default for TermRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl TermRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write> TermRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            written: 0,
            frame: 0,
        }
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    fn paint_indicator(&mut self) {
        let dots = SPINNER_DOTS[self.frame % SPINNER_DOTS.len()];
        write!(self.out, "\r{REPLY_PROMPT}{dots:<3}").ok();
        self.out.flush().ok();
    }
}

impl<W: Write> TurnRenderer for TermRenderer<W> {
    fn indicator_start(&mut self) {
        self.frame = 0;
        self.paint_indicator();
    }

    fn indicator_tick(&mut self) {
        self.frame += 1;
        self.paint_indicator();
    }

    fn indicator_stop(&mut self) {
        // Erase the dots and leave the cursor right after the prompt.
        write!(self.out, "\r{REPLY_PROMPT}   \r{REPLY_PROMPT}").ok();
        self.out.flush().ok();
    }

    fn render(&mut self, text_so_far: &str) {
        // `written` only ever points at a delta boundary, so slicing is
        // always on a char boundary.
        self.out.write_all(text_so_far[self.written..].as_bytes()).ok();
        self.out.flush().ok();
        self.written = text_so_far.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_appends_only_the_new_suffix() {
        let mut renderer = TermRenderer::with_writer(Vec::new());
        renderer.render("Hel");
        renderer.render("Hello");
        renderer.render("Hello");
        let out = String::from_utf8(renderer.into_writer()).unwrap();
        assert_eq!(out, "Hello");
    }

    #[test]
    fn indicator_stop_leaves_cursor_after_prompt() {
        let mut renderer = TermRenderer::with_writer(Vec::new());
        renderer.indicator_start();
        renderer.indicator_tick();
        renderer.indicator_stop();
        let out = String::from_utf8(renderer.into_writer()).unwrap();
        assert!(out.ends_with(REPLY_PROMPT));
    }
}
