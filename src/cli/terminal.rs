//! Console styling for printed reports

use owo_colors::{OwoColorize, colors::css};
use supports_color::Stream;

fn has_color(stream: Stream) -> bool {
    supports_color::on_cached(stream).is_some()
}

/// Width of the attached terminal, if any.
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(width, _)| width.0)
}

/// Whether the terminal is too narrow for column layouts (< 60 columns).
pub fn is_narrow() -> bool {
    terminal_width().is_some_and(|width| width < 60)
}

/// Styles for the parts of a printed report.
pub trait Paint {
    /// Report headings
    fn heading(&self) -> String;
    /// Category labels and counts
    fn label(&self) -> String;
    /// Secondary details such as file names and elisions
    fn muted(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Paint for T {
    fn heading(&self) -> String {
        paint(self.as_ref(), |s| s.bold().to_string())
    }

    fn label(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::LightBlue>().to_string())
    }

    fn muted(&self) -> String {
        paint(self.as_ref(), |s| s.dimmed().to_string())
    }
}

fn paint(text: &str, style: impl Fn(&str) -> String) -> String {
    // reports are printed on stdout
    if has_color(Stream::Stdout) {
        style(text)
    } else {
        text.to_string()
    }
}
