//! oneos - One OS terminal shell
//!
//! A themed shell with a nav bar, three views and overlay panels, all
//! driven by a single configuration file.
//!
//! Features:
//! - Hub, Modes and Settings views built from static placeholder content
//! - Modes, Settings and Support overlays above the current view
//! - Nav bar that hides while scrolling down
//! - Skins (color palettes) selected in the config
//!
//! Usage: oneos [--config PATH] [--skin NAME] [--view KEY] [--overlay KIND]

mod app;
mod config;
mod logging;
mod overlay;
mod scroll;
mod types;
mod ui;

use anyhow::{bail, Context, Result};
use app::App;
use config::Config;
use crossterm::{
    cursor::Show,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

/// Parsed command line
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    config_path: Option<PathBuf>,
    skin: Option<String>,
    view: Option<String>,
    overlay: Option<String>,
    init_config: bool,
    help: bool,
    version: bool,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        let arg = arg.as_str();
        let mut value = |name: &str| {
            iter.next()
                .cloned()
                .with_context(|| format!("{} requires a value", name))
        };

        match arg {
            "-c" | "--config" => options.config_path = Some(PathBuf::from(value(arg)?)),
            "--skin" => options.skin = Some(value(arg)?),
            "--view" => options.view = Some(value(arg)?),
            "--overlay" => options.overlay = Some(value(arg)?),
            "--init-config" => options.init_config = true,
            "-h" | "--help" => options.help = true,
            "-v" | "--version" => options.version = true,
            other => bail!("unknown argument {:?} (see --help)", other),
        }
    }

    Ok(options)
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    };

    if options.help {
        print_help();
        return Ok(());
    }

    if options.version {
        println!("oneos {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let logging_guard = logging::init();

    // Run the application
    let result = run(options);

    // Terminal is already restored here
    if let Err(e) = result {
        tracing::error!(error = %format!("{:#}", e), "exiting with error");
        eprintln!("Error: {:#}", e);
        if let Some(guard) = &logging_guard {
            eprintln!("Logs: {}", guard.log_dir().display());
        }
        std::process::exit(1);
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"oneos - One OS terminal shell

USAGE:
    oneos [OPTIONS]

OPTIONS:
    -c, --config <PATH>  Use this config file instead of the default
        --skin <NAME>    Override the active skin for this run
        --view <KEY>     Start on a view: home, modes or settings
        --overlay <KIND> Start with an overlay open: modes, settings or support
        --init-config    Write the default config file and exit
    -h, --help           Print help information
    -v, --version        Print version information

KEYBINDINGS:
    1 / h            Hub
    2 / m            Modes (opens the modes overlay)
    3 / s            Settings (opens the settings overlay)
    a                Support overlay
    j/k, PgUp/PgDn   Scroll
    Tab / Shift-Tab  Move between cards
    Enter            Open the focused card
    Esc              Close overlay
    q                Quit

    Mouse clicks work on nav buttons, cards and overlays.

CONFIG:
    ~/.config/oneos/config.toml
"#
    );
}

fn run(options: Options) -> Result<()> {
    let path = match options.config_path {
        Some(path) => path,
        None => Config::path()?,
    };

    if options.init_config {
        if path.exists() {
            bail!("Config already exists at {:?}", path);
        }
        Config::default().save_to(&path)?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    // Load configuration
    let mut config = Config::load_from(&path).context("Failed to load configuration")?;
    if let Some(skin) = options.skin {
        config.active_skin = skin;
    }

    // Create application state
    let mut app = App::new(config);
    if let Some(view) = options.view {
        app.navigate(&view);
    }
    if let Some(overlay) = options.overlay {
        app.overlays.open_named(&overlay);
    }

    // Setup terminal; restored when the guard drops, whatever happens below
    let _guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    main_loop(&mut terminal, &mut app)
}

/// Raw mode, alternate screen and mouse capture for as long as it lives
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let guard = TerminalGuard;

        // A panic message printed on the alternate screen is lost
        let previous_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            restore_terminal();
            previous_hook(panic_info);
        }));

        execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to setup terminal")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        tracing::warn!(error = %e, "failed to disable raw mode");
    }
    if let Err(e) = execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture, Show) {
        tracing::warn!(error = %e, "failed to restore terminal");
    }
}

fn main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Render UI
        terminal.draw(|frame| {
            app.set_viewport(frame.area());
            ui::render(frame, app);
        })?;

        app.clear_expired_flash();

        // Poll for events with timeout (for the clock and flash expiry)
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                // Only handle key press events (not release)
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        // Check if should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("oneos")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_help_does_not_panic() {
        print_help();
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(&args(&["--skin", "dusk", "--view", "modes", "-c", "/tmp/x.toml"]))
            .unwrap();
        assert_eq!(options.skin.as_deref(), Some("dusk"));
        assert_eq!(options.view.as_deref(), Some("modes"));
        assert_eq!(options.config_path, Some(PathBuf::from("/tmp/x.toml")));
        assert!(!options.init_config);

        assert_eq!(parse_args(&args(&[])).unwrap(), Options::default());
        assert!(parse_args(&args(&["--init-config"])).unwrap().init_config);
        assert_eq!(
            parse_args(&args(&["--overlay", "support"])).unwrap().overlay.as_deref(),
            Some("support")
        );
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&["--skin"])).is_err());
        assert!(parse_args(&args(&["--bogus"])).is_err());
    }

    #[test]
    fn test_terminal_guard_never_leaves_raw_mode_on() {
        // Without a tty `enter` fails part-way; the guard must still undo raw mode
        drop(TerminalGuard::enter());
        assert!(!crossterm::terminal::is_raw_mode_enabled().unwrap_or(false));

        // Restoring twice is harmless
        restore_terminal();
        restore_terminal();
    }

    #[test]
    fn test_init_config_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let options = Options {
            config_path: Some(path.clone()),
            init_config: true,
            ..Options::default()
        };

        run(options).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        // Refuses to overwrite
        let again = Options {
            config_path: Some(path),
            init_config: true,
            ..Options::default()
        };
        assert!(run(again).is_err());
    }
}
