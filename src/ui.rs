//! Update dialog
//!
//! The update check runs on a worker thread; everything the user sees is
//! produced on the thread that owns the UI, which receives `UiEvent`s over a
//! channel.

use std::collections::HashSet;
use std::io::{self, BufRead, Write};

use crossbeam_channel::{Receiver, Sender};

use crate::updater::UpdatePrompt;

/// Messages from the update check to the UI thread
#[derive(Debug, Clone)]
pub enum UiEvent {
    UpdateAvailable(UpdatePrompt),
}

pub fn channel() -> (Sender<UiEvent>, Receiver<UiEvent>) {
    crossbeam_channel::unbounded()
}

/// Something that can put an update prompt in front of the user
pub trait Presenter {
    fn show_update(&mut self, prompt: &UpdatePrompt);
}

/// Present events until every sender has been dropped.
///
/// A version is only announced once per loop, so periodic checks don't nag.
/// Returns how many prompts were shown.
pub fn run_event_loop<P: Presenter>(events: Receiver<UiEvent>, presenter: &mut P) -> usize {
    let mut announced = HashSet::new();

    for event in events.iter() {
        match event {
            UiEvent::UpdateAvailable(prompt) => {
                if !announced.insert(prompt.new_version.clone()) {
                    tracing::debug!(version = %prompt.new_version, "Update already announced");
                    continue;
                }
                presenter.show_update(&prompt);
            }
        }
    }

    announced.len()
}

type Opener = Box<dyn FnMut(&str) -> io::Result<()>>;

/// Text-mode update dialog.
///
/// With links enabled the user can pick the release page or the direct
/// download, which is then opened with the system's default handler.
pub struct TerminalDialog<W: Write, R: BufRead> {
    out: W,
    input: R,
    open_links: bool,
    opener: Opener,
}

impl TerminalDialog<Box<dyn Write>, io::StdinLock<'static>> {
    /// Dialog on the process's stdio. `to_stderr` keeps stdout free for
    /// machine-readable output.
    pub fn stdio(open_links: bool, to_stderr: bool) -> Self {
        let out: Box<dyn Write> = if to_stderr {
            Box::new(io::stderr())
        } else {
            Box::new(io::stdout())
        };
        Self::new(out, io::stdin().lock(), open_links)
    }
}

impl<W: Write, R: BufRead> TerminalDialog<W, R> {
    pub fn new(out: W, input: R, open_links: bool) -> Self {
        Self {
            out,
            input,
            open_links,
            opener: Box::new(|url: &str| open::that(url)),
        }
    }

    /// Replace how links are opened
    #[allow(dead_code)]
    pub fn with_opener(mut self, opener: impl FnMut(&str) -> io::Result<()> + 'static) -> Self {
        self.opener = Box::new(opener);
        self
    }

    fn present(&mut self, prompt: &UpdatePrompt) -> io::Result<()> {
        write!(self.out, "{}", render_dialog(prompt))?;

        if !self.open_links {
            return self.out.flush();
        }

        let choices = if prompt.download_url.is_some() { "1/2" } else { "1" };
        write!(self.out, "Open a link [{choices}, Enter to dismiss]: ")?;
        self.out.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;

        let target = match answer.trim() {
            "1" => Some(prompt.release_url.as_str()),
            "2" => prompt.download_url.as_deref(),
            _ => None,
        };

        if let Some(url) = target {
            tracing::info!(%url, "Opening link");
            if let Err(e) = (self.opener)(url) {
                tracing::warn!(%url, "Failed to open link: {}", e);
            }
        }

        Ok(())
    }
}

impl<W: Write, R: BufRead> Presenter for TerminalDialog<W, R> {
    fn show_update(&mut self, prompt: &UpdatePrompt) {
        if let Err(e) = self.present(prompt) {
            tracing::warn!("Failed to show update dialog: {}", e);
        }
    }
}

/// Dialog body: versions and the links the user can follow
pub fn render_dialog(prompt: &UpdatePrompt) -> String {
    let mut text = String::new();
    text.push_str("A new version is available!\n\n");
    text.push_str(&format!("  New version:      {}\n", prompt.new_version));
    text.push_str(&format!("  Current version:  {}\n\n", prompt.current_version));
    text.push_str(&format!("  [1] Release page: {}\n", prompt.release_url));
    if let Some(download) = &prompt.download_url {
        text.push_str(&format!("  [2] Download:     {}\n", download));
    }
    if let Some(notes) = &prompt.release_notes {
        text.push_str("\nRelease notes:\n");
        for line in notes.lines() {
            text.push_str(&format!("  {}\n", line));
        }
    }
    text.push('\n');
    text
}
