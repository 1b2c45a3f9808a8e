use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use pscale_bsp_config::Config;
use pscale_bsp_engine::io::{self, DirectoryLoader};
use pscale_bsp_engine::resolve::{
    DEFAULT_MAX_DEPTH, SpreadChild, block_navigate, subtree, walk_tree,
};
use pscale_bsp_engine::{
    Address, Block, BlockLoader, Resolver, Selector, Spindle, SpindleNode, Spread, SubtreeNode,
    lateral_read,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{self, Borders, List, ListItem, ListState, Paragraph},
};
use std::{
    env,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

/// What the lower right panel shows for the open block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Children,
    Subtree,
}

/// A block being browsed, positioned at one address
struct OpenBlock {
    name: String,
    block: Block,
    address: Address,
    chain: Vec<SpindleNode>,
    spread: Option<Spread>,
    child_state: ListState,
}

impl OpenBlock {
    fn new(name: String, block: Block) -> Self {
        let mut open = Self {
            name,
            block,
            address: Address::root(),
            chain: Vec::new(),
            spread: None,
            child_state: ListState::default(),
        };
        open.refresh();
        open
    }

    fn refresh(&mut self) {
        self.chain = walk_tree(&self.block.tree, &self.address.to_parsed());
        self.spread = lateral_read(&self.block, self.address.path().as_deref());
        let first = if self.children().is_empty() { None } else { Some(0) };
        self.child_state.select(first);
    }

    fn children(&self) -> &[SpreadChild] {
        self.spread
            .as_ref()
            .map(|spread| spread.children.as_slice())
            .unwrap_or(&[])
    }

    fn selected_child(&self) -> Option<&SpreadChild> {
        self.children().get(self.child_state.selected()?)
    }

    fn next_child(&mut self) {
        let len = self.children().len();
        if len == 0 {
            return;
        }
        let i = match self.child_state.selected() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.child_state.select(Some(i));
    }

    fn previous_child(&mut self) {
        let len = self.children().len();
        if len == 0 {
            return;
        }
        let i = match self.child_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.child_state.select(Some(i));
    }

    /// Move one level deeper into the selected child, if it has children
    fn descend(&mut self) -> bool {
        let Some(child) = self.selected_child().filter(|child| child.branch) else {
            return false;
        };
        self.address = self.address.child(child.digit.clone());
        self.refresh();
        true
    }

    /// Move one level up, keeping the child we came from selected
    fn ascend(&mut self) -> bool {
        let Some(parent) = self.address.parent() else {
            return false;
        };
        let from = self.address.last_digit().map(str::to_string);
        self.address = parent;
        self.refresh();
        if let Some(from) = from
            && let Some(i) = self.children().iter().position(|child| child.digit == from)
        {
            self.child_state.select(Some(i));
        }
        true
    }

    fn subtree_lines(&self, max_depth: usize) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(view) = block_navigate(&self.block.tree, self.address.path().as_deref())
            .and_then(|node| subtree(node, max_depth))
        {
            push_subtree_lines(&view, 0, &mut lines);
        }
        lines
    }
}

fn push_subtree_lines(node: &SubtreeNode, depth: usize, lines: &mut Vec<String>) {
    let label = if node.path.is_empty() { "·" } else { &node.path };
    lines.push(format!(
        "{}{} {}",
        "  ".repeat(depth),
        label,
        node.text.as_deref().unwrap_or("")
    ));
    for child in &node.children {
        push_subtree_lines(child, depth + 1, lines);
    }
}

struct App {
    loader: DirectoryLoader,
    block_names: Vec<String>,
    block_list_state: ListState,
    open: Option<OpenBlock>,
    view: View,
    max_depth: usize,
    status: Option<String>,
}

impl App {
    fn new(blocks_path: PathBuf, max_depth: usize) -> Result<Self> {
        let block_names = io::list_blocks(&blocks_path)?;

        let mut app = Self {
            loader: DirectoryLoader::new(blocks_path),
            block_names,
            block_list_state: ListState::default(),
            open: None,
            view: View::Children,
            max_depth,
            status: None,
        };

        // Select first block if available
        if !app.block_names.is_empty() {
            app.block_list_state.select(Some(0));
        }

        Ok(app)
    }

    fn next_block(&mut self) {
        if self.block_names.is_empty() {
            return;
        }
        let i = match self.block_list_state.selected() {
            Some(i) => (i + 1) % self.block_names.len(),
            None => 0,
        };
        self.block_list_state.select(Some(i));
    }

    fn previous_block(&mut self) {
        if self.block_names.is_empty() {
            return;
        }
        let i = match self.block_list_state.selected() {
            Some(0) | None => self.block_names.len() - 1,
            Some(i) => i - 1,
        };
        self.block_list_state.select(Some(i));
    }

    fn open_selected_block(&mut self) {
        let Some(name) = self
            .block_list_state
            .selected()
            .and_then(|i| self.block_names.get(i))
        else {
            return;
        };
        match self.loader.load(name) {
            Some(block) => {
                log::info!("opened block {name}");
                self.open = Some(OpenBlock::new(name.clone(), block));
                self.status = None;
            }
            None => self.status = Some(format!("Could not load block '{name}'")),
        }
    }

    /// Returns true when the app should quit
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if code == KeyCode::Char('q') {
            return true;
        }
        if code == KeyCode::Char('t') {
            self.view = match self.view {
                View::Children => View::Subtree,
                View::Subtree => View::Children,
            };
            return false;
        }

        if self.open.is_none() {
            match code {
                KeyCode::Down | KeyCode::Char('j') => self.next_block(),
                KeyCode::Up | KeyCode::Char('k') => self.previous_block(),
                KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => self.open_selected_block(),
                _ => {}
            }
            return false;
        }
        let Some(open) = self.open.as_mut() else {
            return false;
        };

        match code {
            KeyCode::Down | KeyCode::Char('j') => open.next_child(),
            KeyCode::Up | KeyCode::Char('k') => open.previous_child(),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
                open.descend();
            }
            KeyCode::Left | KeyCode::Backspace | KeyCode::Char('h') => {
                if !open.ascend() {
                    // Leaving the root closes the block
                    self.open = None;
                }
            }
            _ => {}
        }
        false
    }
}

/// Resolve one address and print the result as JSON
fn run_query(
    blocks_path: PathBuf,
    block: &str,
    spindle: Option<&str>,
    point: Option<&str>,
) -> Result<()> {
    io::validate_blocks_dir(&blocks_path)?;
    let resolver = Resolver::with_loader(DirectoryLoader::new(blocks_path));

    // "-" skips the spindle so a point mode can run on the root
    let spindle = spindle.filter(|s| *s != "-").map(Spindle::from);
    let selector = point.map(Selector::from);

    let result = resolver.resolve(block, spindle.as_ref(), selector.as_ref());
    println!("{}", serde_json::to_string_pretty(&result)?);

    if result.is_error() {
        process::exit(1);
    }
    Ok(())
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} [blocks-folder-path]");
    eprintln!("       {program} <blocks-folder-path> <block> [spindle|-] [point]");
    process::exit(1);
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    // Determine blocks path from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring config file: {e}");
            None
        }
    };
    let max_depth = config
        .as_ref()
        .and_then(|config| config.max_depth)
        .unwrap_or(DEFAULT_MAX_DEPTH);

    let blocks_path = match args.len() {
        1 => match config {
            Some(config) => config.blocks_path,
            None => {
                eprintln!("Error: No blocks path provided and no config file found");
                eprintln!("Or create a config file at {}", config_path.display());
                usage(&args[0]);
            }
        },
        2 => PathBuf::from(&args[1]),
        3..=5 => {
            return run_query(
                PathBuf::from(&args[1]),
                &args[2],
                args.get(3).map(String::as_str),
                args.get(4).map(String::as_str),
            );
        }
        _ => usage(&args[0]),
    };

    if let Err(e) = io::validate_blocks_dir(&blocks_path) {
        eprintln!(
            "Error: Blocks path '{}' is invalid: {e}",
            blocks_path.display()
        );
        process::exit(1);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(blocks_path, max_depth)?;
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && app.handle_key(key.code)
        {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)].as_ref())
        .split(rows[0]);

    // Block list panel
    let open_name = app.open.as_ref().map(|open| open.name.as_str());
    let block_items: Vec<ListItem> = app
        .block_names
        .iter()
        .map(|name| {
            let marker = if open_name == Some(name.as_str()) { "▸ " } else { "  " };
            ListItem::new(Line::from(format!("{marker}{name}")))
        })
        .collect();
    let blocks_list = List::new(block_items)
        .block(widgets::Block::default().borders(Borders::ALL).title("Blocks"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));
    f.render_stateful_widget(blocks_list, chunks[0], &mut app.block_list_state);

    match app.open.as_mut() {
        None => {
            let text = app
                .status
                .clone()
                .unwrap_or_else(|| "Select a block to browse it".to_string());
            let content = Paragraph::new(vec![Line::from(text)])
                .block(widgets::Block::default().borders(Borders::ALL).title("Spindle"));
            f.render_widget(content, chunks[1]);
        }
        Some(open) => {
            let panels = Layout::default()
                .direction(Direction::Vertical)
                .constraints(
                    [
                        Constraint::Length((open.chain.len() as u16).saturating_add(2)),
                        Constraint::Min(0),
                    ]
                    .as_ref(),
                )
                .split(chunks[1]);

            let chain_lines: Vec<Line> = open
                .chain
                .iter()
                .map(|node| {
                    let pscale = node
                        .pscale
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "·".to_string());
                    let digit = node.digit.as_deref().unwrap_or("_");
                    Line::from(vec![
                        Span::styled(
                            format!("{pscale:>3} [{digit}] "),
                            Style::default().fg(Color::Cyan),
                        ),
                        Span::raw(node.text.clone()),
                    ])
                })
                .collect();
            let title = format!("{} @ {}", open.name, open.address.spindle());
            let chain = Paragraph::new(chain_lines)
                .block(widgets::Block::default().borders(Borders::ALL).title(title))
                .wrap(ratatui::widgets::Wrap { trim: true });
            f.render_widget(chain, panels[0]);

            match app.view {
                View::Children => {
                    let child_items: Vec<ListItem> = open
                        .children()
                        .iter()
                        .map(|child| {
                            let more = if child.branch { " ▸" } else { "" };
                            let text = child.text.as_deref().unwrap_or("");
                            ListItem::new(Line::from(format!("[{}] {text}{more}", child.digit)))
                        })
                        .collect();
                    let children = List::new(child_items)
                        .block(widgets::Block::default().borders(Borders::ALL).title("Spread"))
                        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));
                    f.render_stateful_widget(children, panels[1], &mut open.child_state);
                }
                View::Subtree => {
                    let lines: Vec<Line> = open
                        .subtree_lines(app.max_depth)
                        .into_iter()
                        .map(Line::from)
                        .collect();
                    let tree = Paragraph::new(lines)
                        .block(widgets::Block::default().borders(Borders::ALL).title("Subtree"));
                    f.render_widget(tree, panels[1]);
                }
            }
        }
    }

    let help = Paragraph::new(vec![Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k ↓/j: Select | "),
        Span::raw("→/Enter: Deeper | ←: Up | "),
        Span::raw("t: Spread/Subtree"),
    ])])
    .block(widgets::Block::default());
    f.render_widget(help, rows[1]);
}
