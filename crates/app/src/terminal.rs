use std::fmt;
use std::io::{self, Write};

use quiz_core::model::{ClipRef, QuestionOptions, SessionStats};
use services::PresentationPort;

const TIMER_CELLS: usize = 10;

/// Line-oriented presentation for a text terminal.
///
/// Writes never fail the session; the first I/O error is kept and later
/// output is dropped. Check [`TerminalPresentation::take_error`].
pub struct TerminalPresentation<W> {
    out: W,
    shown_cells: Option<usize>,
    error: Option<io::Error>,
}

impl<W: Write> TerminalPresentation<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            shown_cells: None,
            error: None,
        }
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.out.write_fmt(args).and_then(|()| self.out.flush()) {
            self.error = Some(err);
        }
    }
}

impl<W: Write> PresentationPort for TerminalPresentation<W> {
    fn render_options(&mut self, options: &QuestionOptions) {
        self.shown_cells = None;
        self.emit(format_args!("\nQuestion {}\n", options.number()));
        for (i, clip) in options.options().iter().enumerate() {
            self.emit(format_args!("  {}) {}\n", i + 1, clip.name()));
        }
    }

    fn render_timer(&mut self, fraction: f32) {
        // An empty bar only once time is really out.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let filled = (fraction.clamp(0.0, 1.0) * TIMER_CELLS as f32).ceil() as usize;
        if self.shown_cells == Some(filled) {
            return;
        }
        self.shown_cells = Some(filled);
        let bar = format!("{}{}", "#".repeat(filled), "-".repeat(TIMER_CELLS - filled));
        self.emit(format_args!("  [{bar}]\n"));
    }

    fn play_clip(&mut self, _clip: &ClipRef) {
        self.emit(format_args!("  ~ playing clip ~\n"));
    }

    fn stop_clip(&mut self) {}

    fn render_stats(&mut self, stats: &SessionStats) {
        self.emit(format_args!(
            "  correct {} | wrong {} | timeout {}\n",
            stats.correct_count, stats.wrong_count, stats.timeout_count
        ));
    }

    fn render_end_of_game(&mut self, score: u32) {
        self.emit(format_args!("\nGame over. Final score: {score}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::ClipId;

    fn render(f: impl FnOnce(&mut TerminalPresentation<Vec<u8>>)) -> String {
        let mut term = TerminalPresentation::new(Vec::new());
        f(&mut term);
        String::from_utf8(term.into_inner()).unwrap()
    }

    #[test]
    fn options_are_numbered_from_one() {
        let clips = vec![
            ClipRef::new(ClipId::new(1), "Heroes").unwrap(),
            ClipRef::new(ClipId::new(2), "Airbag").unwrap(),
        ];
        let options = QuestionOptions::new(2, clips, 1).unwrap();

        let text = render(|t| t.render_options(&options));
        assert_eq!(text, "\nQuestion 2\n  1) Heroes\n  2) Airbag\n");
    }

    #[test]
    fn timer_bar_redraws_only_when_a_cell_empties() {
        let text = render(|t| {
            t.render_timer(1.0);
            t.render_timer(0.95);
            t.render_timer(0.5);
            t.render_timer(0.0);
        });
        assert_eq!(text, "  [##########]\n  [#####-----]\n  [----------]\n");
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_are_kept_not_raised() {
        let mut term = TerminalPresentation::new(Broken);
        term.render_end_of_game(3);
        term.render_end_of_game(4);
        let err = term.take_error().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(term.take_error().is_none());
    }
}
