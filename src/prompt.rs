// src/prompt.rs
//
// Interactive input. Reads block on stdin, so the terminal implementation
// moves them onto the blocking pool; that keeps Ctrl-C observable while a
// prompt is waiting.

use std::io::{self, BufRead, IsTerminal, Write};

use console::Term;

/// Source of user answers. Frontends implement this; tests script it.
#[allow(async_fn_in_trait)]
pub trait Prompter {
    /// True when a human is at the keyboard (stdin is a TTY).
    fn interactive(&self) -> bool;

    /// Print a line for the user.
    fn say(&mut self, msg: &str);

    /// Read one line. `None` at end of input.
    async fn line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Read one line without echo when interactive. `None` at end of input.
    async fn secret(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// stdin/stdout prompter. Prompts are only printed on a TTY; piped input is
/// consumed one line per answer.
pub struct TerminalPrompter {
    tty: bool,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self { tty: io::stdin().is_terminal() }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn interactive(&self) -> bool {
        self.tty
    }

    fn say(&mut self, msg: &str) {
        println!("{msg}");
    }

    async fn line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let tty = self.tty;
        let prompt = s!(prompt);
        blocking(move || {
            if tty {
                let mut out = io::stdout();
                out.write_all(prompt.as_bytes())?;
                out.flush()?;
            }
            read_stdin_line()
        })
        .await
    }

    async fn secret(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if !self.tty {
            return self.line(prompt).await;
        }
        let prompt = s!(prompt);
        blocking(move || {
            let term = Term::stdout();
            term.write_str(&prompt)?;
            term.read_secure_line().map(Some)
        })
        .await
    }
}

async fn blocking<F>(f: F) -> io::Result<Option<String>>
where
    F: FnOnce() -> io::Result<Option<String>> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(io::Error::other)?
}

fn read_stdin_line() -> io::Result<Option<String>> {
    let mut buf = s!();
    let n = io::stdin().lock().read_line(&mut buf)?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(s!(buf.trim_end_matches(['\r', '\n']))))
}
