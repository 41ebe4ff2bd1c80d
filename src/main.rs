use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use chordmap::cli::CliArgs;
use chordmap::keymap::{chord_from_crossterm, Dispatcher, Keymap};
use chordmap::{AppConfig, Exit, Prompt};

const PROMPT_PREFIX: &str = "QUERY> ";

/// How long to wait for input before checking timers
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Process exit status when the prompt is cancelled
const CANCEL_STATUS: i32 = 130;

fn main() -> Result<()> {
    chordmap::tracing::init();

    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::load(),
    };

    let keymap = config.build_keymap();
    for problem in keymap.errors() {
        eprintln!("chordmap: {}", problem);
    }

    if args.check {
        if !keymap.is_clean() {
            std::process::exit(1);
        }
        println!("{} bindings, no problems", keymap.bindings().len());
        return Ok(());
    }

    if args.list {
        print_bindings(&keymap);
        return Ok(());
    }

    let candidates = args
        .read_candidates()
        .context("Failed to read candidates from stdin")?;
    let mut prompt = Prompt::new(candidates);
    let mut dispatcher = keymap
        .dispatcher()
        .with_timeout(config.sequence_timeout());

    match run_interactive(&mut prompt, &mut dispatcher)? {
        Exit::Finished { code, selection } => {
            let mut stdout = io::stdout().lock();
            for line in selection {
                writeln!(stdout, "{}", line)?;
            }
            stdout.flush()?;
            std::process::exit(code);
        }
        Exit::Cancelled => std::process::exit(CANCEL_STATUS),
    }
}

fn print_bindings(keymap: &Keymap) {
    let width = keymap
        .bindings()
        .iter()
        .map(|(spec, _)| spec.len())
        .max()
        .unwrap_or(0);
    for (spec, binding) in keymap.bindings().iter() {
        println!("{:width$}  {}", spec, binding.action, width = width);
    }
}

/// Run the prompt in raw mode on stderr, leaving stdout for the selection
fn run_interactive(prompt: &mut Prompt, dispatcher: &mut Dispatcher) -> Result<Exit> {
    let mut out = io::stderr();
    enable_raw_mode().context("Failed to enable raw mode")?;
    if let Err(e) = execute!(out, EnterAlternateScreen, Hide) {
        let _ = disable_raw_mode();
        return Err(e).context("Failed to enter alternate screen");
    }

    let result = event_loop(prompt, dispatcher, &mut out);

    let _ = execute!(out, Show, LeaveAlternateScreen);
    let _ = disable_raw_mode();
    result
}

fn event_loop(prompt: &mut Prompt, dispatcher: &mut Dispatcher, out: &mut impl Write) -> Result<Exit> {
    loop {
        let now = Instant::now();
        if let Some((chord, dispatched)) = dispatcher.expire(now) {
            dispatched.execute(prompt, &chord);
        }
        prompt.status.expire(now);

        if let Some(exit) = prompt.exit() {
            return Ok(exit.clone());
        }

        draw(prompt, out).context("Failed to draw prompt")?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            let Some(chord) = chord_from_crossterm(&key) else {
                continue;
            };
            let dispatched = dispatcher.handle(chord);
            dispatched.execute(prompt, &chord);
        }
    }
}

fn draw(prompt: &Prompt, out: &mut impl Write) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let cols = cols as usize;
    let list_rows = (rows as usize).saturating_sub(2);

    queue!(out, Hide, MoveTo(0, 0), Clear(ClearType::All))?;
    queue!(out, Print(truncate(&format!("{}{}", PROMPT_PREFIX, prompt.query()), cols)))?;

    let matches = prompt.matches();
    let first = prompt.selected().saturating_sub(list_rows.saturating_sub(1));
    for (row, (pos, &index)) in matches
        .iter()
        .enumerate()
        .skip(first)
        .take(list_rows)
        .enumerate()
    {
        let mark = if prompt.is_marked(index) { '*' } else { ' ' };
        let line = truncate(&format!("{} {}", mark, prompt.candidates()[index]), cols);
        queue!(out, MoveTo(0, row as u16 + 1))?;
        if pos == prompt.selected() {
            queue!(
                out,
                SetAttribute(Attribute::Reverse),
                Print(line),
                SetAttribute(Attribute::Reset)
            )?;
        } else {
            queue!(out, Print(line))?;
        }
    }

    let status = format!(
        "[{}/{}] {}",
        matches.len(),
        prompt.candidates().len(),
        prompt.status.text()
    );
    queue!(
        out,
        MoveTo(0, rows.saturating_sub(1)),
        Print(truncate(&status, cols))
    )?;

    let caret_col = PROMPT_PREFIX.width() + prompt.caret_column();
    queue!(out, MoveTo(caret_col.min(cols.saturating_sub(1)) as u16, 0), Show)?;
    out.flush()
}

/// Longest prefix of `text` that fits in `width` terminal columns
fn truncate(text: &str, width: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= width
        })
        .collect()
}
