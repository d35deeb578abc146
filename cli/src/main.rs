//! structured-nav CLI - table of contents generator for Markdown notes

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};

use structured_nav::render::{to_html, to_json, to_text};
use structured_nav::source::read_content_async;
use structured_nav::{
    extract_annotations, find_nav_blocks, load_settings, render_nav_blocks, save_settings,
    scan_headings, DisplayConfig, JsonFormat, NavBlockConfig, NavEvent, NavRender, NavStyle,
    NavView, Visibility,
};

#[derive(Parser)]
#[command(name = "structured-nav")]
#[command(version)]
#[command(about = "Generate tables of contents from Markdown headings", long_about = None)]
struct Cli {
    /// Input Markdown file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Settings file (JSON)
    #[arg(long, global = true, env = "STRUCTURED_NAV_SETTINGS", value_name = "FILE")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a table of contents for a document
    Toc {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Render every ```nav block found in a document
    Blocks {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// List the headings of a document with their references
    Headings {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Re-render a table of contents whenever the document or settings change
    Watch {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Debounce delay for file events in milliseconds
        #[arg(long, default_value = "200")]
        debounce: u64,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Show the effective settings
    Settings {
        /// Write the default settings to the settings file
        #[arg(long)]
        init: bool,
    },

    /// Show version information
    Version,
}

/// Per-run overrides, applied like a nav block.
#[derive(Args, Clone)]
struct DisplayArgs {
    /// Nav block file (YAML) to apply over the settings
    #[arg(long, value_name = "FILE")]
    block: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Layout style
    #[arg(long, value_enum)]
    style: Option<StyleArg>,

    /// Smallest heading level to include
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=6))]
    min_depth: Option<u8>,

    /// Largest heading level to include
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=6))]
    max_depth: Option<u8>,

    /// Title shown above the table of contents
    #[arg(long)]
    title: Option<String>,

    /// Separator for the inline style
    #[arg(long)]
    delimiter: Option<String>,

    /// Symbol for bullet lists
    #[arg(long)]
    bullet_symbol: Option<String>,

    /// Hide +[[Note]] references
    #[arg(long)]
    no_refs: bool,

    /// Hide -- [[Note]] quick-links
    #[arg(long)]
    no_quick_links: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Indented plain text
    Text,
    /// HTML fragment
    Html,
    /// Pretty JSON
    Json,
    /// Compact JSON
    JsonCompact,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum StyleArg {
    /// Bullet list
    Bullet,
    /// Numbered (1, 2, 3)
    Number,
    /// Decimal (1.1, 1.2.1)
    Decimal,
    /// Traditional (I, A, 1, a)
    Outline,
    /// Inline (single line)
    Inline,
}

impl From<StyleArg> for NavStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Bullet => NavStyle::Bullet,
            StyleArg::Number => NavStyle::Number,
            StyleArg::Decimal => NavStyle::Decimal,
            StyleArg::Outline => NavStyle::Outline,
            StyleArg::Inline => NavStyle::Inline,
        }
    }
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let settings_path = cli.settings.clone();

    let result = match cli.command {
        Some(Commands::Toc {
            input,
            output,
            display,
        }) => cmd_toc(&input, output.as_deref(), &display, settings_path.as_deref()),
        Some(Commands::Blocks { input, format }) => {
            cmd_blocks(&input, format, settings_path.as_deref())
        }
        Some(Commands::Headings { input }) => cmd_headings(&input),
        Some(Commands::Watch {
            input,
            debounce,
            display,
        }) => cmd_watch(&input, debounce, &display, settings_path.as_deref()),
        Some(Commands::Settings { init }) => cmd_settings(init, settings_path.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: render a table of contents if input is provided
            if let Some(input) = cli.input {
                cmd_toc(
                    &input,
                    None,
                    &DisplayArgs::defaults(),
                    settings_path.as_deref(),
                )
            } else {
                println!("{}", "Usage: structured-nav <FILE>".yellow());
                println!("       structured-nav --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

impl DisplayArgs {
    fn defaults() -> Self {
        Self {
            block: None,
            format: Format::Text,
            style: None,
            min_depth: None,
            max_depth: None,
            title: None,
            delimiter: None,
            bullet_symbol: None,
            no_refs: false,
            no_quick_links: false,
        }
    }

    /// Build the view for a document from the block file and flags.
    ///
    /// A malformed block file gives a view that renders the parse error.
    fn view(&self, path: &str) -> CliResult<NavView> {
        let source = match &self.block {
            Some(block) => fs::read_to_string(block)?,
            None => String::new(),
        };
        let view = NavView::new(path, &source);
        let Some(block) = view.block() else {
            return Ok(view);
        };

        let mut block = block.clone();
        self.apply(&mut block);
        Ok(NavView::with_block(path, block))
    }

    fn apply(&self, block: &mut NavBlockConfig) {
        if let Some(style) = self.style {
            block.style = Some(style.into());
        }
        if self.min_depth.is_some() {
            block.min_depth = self.min_depth;
        }
        if self.max_depth.is_some() {
            block.max_depth = self.max_depth;
        }
        if self.title.is_some() {
            block.title = self.title.clone();
        }
        if self.delimiter.is_some() {
            block.delimiter = self.delimiter.clone();
        }
        if self.bullet_symbol.is_some() {
            block.bullet_symbol = self.bullet_symbol.clone();
        }
        if self.no_refs {
            block.refs = Some(Visibility::Hide);
        }
        if self.no_quick_links {
            block.quick_links = Some(Visibility::Hide);
        }
    }
}

fn effective_settings(path: Option<&Path>) -> CliResult<DisplayConfig> {
    Ok(match path {
        Some(path) => load_settings(path)?,
        None => DisplayConfig::default(),
    })
}

fn format_render(render: &NavRender, format: Format) -> CliResult<String> {
    Ok(match format {
        Format::Text => to_text(render),
        Format::Html => to_html(render),
        Format::Json => to_json(render, JsonFormat::Pretty)?,
        Format::JsonCompact => to_json(render, JsonFormat::Compact)?,
    })
}

fn render_file(input: &Path, view: &NavView, settings: &DisplayConfig) -> CliResult<NavRender> {
    let text = fs::read_to_string(input)?;
    let headings = scan_headings(&text);
    Ok(view.render_with_content(settings, Some(headings), Some(&text)))
}

fn cmd_toc(
    input: &Path,
    output: Option<&Path>,
    display: &DisplayArgs,
    settings_path: Option<&Path>,
) -> CliResult<()> {
    let settings = effective_settings(settings_path)?;
    let view = display.view(&input.to_string_lossy())?;
    let render = render_file(input, &view, &settings)?;
    let content = format_render(&render, display.format)?;

    if let Some(path) = output {
        fs::write(path, &content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }

    if render.is_error() {
        return Err("nav block could not be parsed".into());
    }
    Ok(())
}

fn cmd_blocks(input: &Path, format: Format, settings_path: Option<&Path>) -> CliResult<()> {
    let settings = effective_settings(settings_path)?;
    let text = fs::read_to_string(input)?;
    let renders = render_nav_blocks(&input.to_string_lossy(), &text, &settings);

    if renders.is_empty() {
        println!("{}", "No nav blocks found".yellow());
        return Ok(());
    }

    for (block, render) in &renders {
        println!(
            "{}",
            format!("nav block at line {}", block.line + 1).cyan().bold()
        );
        println!("{}", "─".repeat(40).dimmed());
        let content = format_render(render, format)?;
        if render.is_error() {
            println!("{}", content.red());
        } else {
            println!("{}", content);
        }
        println!();
    }

    Ok(())
}

fn cmd_headings(input: &Path) -> CliResult<()> {
    let text = fs::read_to_string(input)?;
    let headings = scan_headings(&text);
    let annotations = extract_annotations(&text, &headings);

    println!("{}", "Headings".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for (heading, found) in headings.iter().zip(&annotations) {
        let indent = "  ".repeat(usize::from(heading.level.saturating_sub(1)));
        println!(
            "{} {}{} {}",
            format!("[{}]", heading.line + 1).dimmed(),
            indent,
            format!("H{}", heading.level).bold(),
            found.text
        );
        for reference in &found.cross_refs {
            println!("{}    {} {}", indent, "+".green(), reference.target);
        }
        for link in &found.quick_links {
            println!("{}    {} {}", indent, "--".blue(), link.target);
        }
    }

    let blocks = find_nav_blocks(&text);
    println!();
    println!(
        "{}: {}   {}: {}",
        "Headings".bold(),
        headings.len(),
        "Nav blocks".bold(),
        blocks.len()
    );

    Ok(())
}

/// Watched files of a `watch` run and the state kept between renders.
struct WatchSession {
    input: PathBuf,
    view: NavView,
    format: Format,
    document: PathBuf,
    settings_path: Option<PathBuf>,
    settings_file: Option<PathBuf>,
    settings: DisplayConfig,
}

impl WatchSession {
    fn new(
        input: &Path,
        view: NavView,
        format: Format,
        settings_path: Option<&Path>,
    ) -> CliResult<Self> {
        let settings = effective_settings(settings_path)?;
        let settings_file = match settings_path {
            Some(path) => Some(absolute_path(path)?),
            None => None,
        };
        Ok(Self {
            input: input.to_path_buf(),
            view,
            format,
            document: absolute_path(input)?,
            settings_path: settings_path.map(Path::to_path_buf),
            settings_file,
            settings,
        })
    }

    /// Directories to watch: editors often replace files on save.
    fn watched_dirs(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        for file in std::iter::once(&self.document).chain(self.settings_file.as_ref()) {
            if let Some(dir) = file.parent() {
                if !dirs.iter().any(|d| d.as_path() == dir) {
                    dirs.push(dir.to_path_buf());
                }
            }
        }
        dirs
    }

    /// Map a changed path onto a navigation event.
    fn classify(&self, changed: &Path) -> Option<NavEvent> {
        if changed == self.document.as_path() {
            Some(NavEvent::DocumentChanged {
                path: self.view.source_path().to_string(),
            })
        } else if self.settings_file.as_deref() == Some(changed) {
            Some(NavEvent::SettingsChanged)
        } else {
            None
        }
    }

    /// Handle a batch of events, returning the new output if the view reacted.
    ///
    /// Settings that fail to load are reported and the last good ones kept.
    async fn on_events(&mut self, events: &[NavEvent]) -> Option<String> {
        if !events.iter().any(|event| self.view.handle(event)) {
            return None;
        }

        if events.contains(&NavEvent::SettingsChanged) {
            match effective_settings(self.settings_path.as_deref()) {
                Ok(settings) => self.settings = settings,
                Err(e) => {
                    log::warn!("Keeping previous settings: {}", e);
                    eprintln!("{}: {}", "Settings not reloaded".yellow().bold(), e);
                }
            }
        }

        log::debug!(
            "Re-rendering {} after {} event(s)",
            self.view.source_path(),
            events.len()
        );
        let text = read_content_async(&self.input).await;
        let headings = text.as_deref().map(scan_headings);
        let render = self
            .view
            .render_with_content(&self.settings, headings, text.as_deref());

        match format_render(&render, self.format) {
            Ok(output) => Some(output),
            Err(e) => {
                log::error!("Failed to format navigation: {}", e);
                None
            }
        }
    }
}

/// Absolute form of a path whose file may not exist yet.
fn absolute_path(path: &Path) -> CliResult<PathBuf> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let name = path.file_name().ok_or("path has no file name")?;
    Ok(dir.canonicalize()?.join(name))
}

fn print_watch_output(output: &str) {
    println!("{}", "─".repeat(40).dimmed());
    println!("{}", output);
}

fn cmd_watch(
    input: &Path,
    debounce: u64,
    display: &DisplayArgs,
    settings_path: Option<&Path>,
) -> CliResult<()> {
    let view = display.view(&input.to_string_lossy())?;
    let mut session = WatchSession::new(input, view, display.format, settings_path)?;

    let (tx, rx) = mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(debounce), tx)?;
    for dir in session.watched_dirs() {
        debouncer
            .watcher()
            .watch(&dir, RecursiveMode::NonRecursive)?;
        log::info!("Watching {}", dir.display());
    }

    // Use tokio runtime for async document reads
    let rt = tokio::runtime::Builder::new_current_thread().build()?;

    let initial = NavEvent::DocumentChanged {
        path: session.view.source_path().to_string(),
    };
    if let Some(output) = rt.block_on(session.on_events(&[initial])) {
        print_watch_output(&output);
    }

    for result in rx {
        match result {
            Ok(changes) => {
                let mut events: Vec<NavEvent> = Vec::new();
                for change in changes {
                    if change.kind != DebouncedEventKind::Any {
                        continue;
                    }
                    if let Some(event) = session.classify(&change.path) {
                        if !events.contains(&event) {
                            events.push(event);
                        }
                    }
                }
                if let Some(output) = rt.block_on(session.on_events(&events)) {
                    print_watch_output(&output);
                }
            }
            Err(e) => log::warn!("Watch error: {}", e),
        }
    }

    Ok(())
}

fn cmd_settings(init: bool, settings_path: Option<&Path>) -> CliResult<()> {
    if init {
        let path = settings_path.ok_or("--settings is required with --init")?;
        save_settings(path, &DisplayConfig::default())?;
        println!("{} {}", "Saved to".green(), path.display());
        return Ok(());
    }

    let settings = effective_settings(settings_path)?;
    println!("{}", settings.to_json()?);
    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "structured-nav".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Table of contents generator for Markdown notes");
    println!();
    println!("License: MIT");
}
