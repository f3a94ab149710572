use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use foliochat_core::{
    render_message, Message, Sender, WidgetCommand, WidgetEvent, WidgetHandle,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame, Terminal,
};

const MAX_LINES: usize = 500;

struct App {
    handle: WidgetHandle,
    open: bool,
    typing: bool,
    input: String,
    lines: Vec<Line<'static>>,
    should_quit: bool,
}

impl App {
    fn new(handle: WidgetHandle) -> Self {
        Self {
            handle,
            open: false,
            typing: false,
            input: String::new(),
            lines: Vec::new(),
            should_quit: false,
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.handle.events.try_recv() {
            match event {
                WidgetEvent::VisibilityChanged(open) => self.open = open,
                WidgetEvent::Typing(typing) => self.typing = typing,
                WidgetEvent::MessageAppended(message) => self.push_message(message),
            }
        }
    }

    fn push_message(&mut self, message: Message) {
        let label = match message.sender {
            Sender::User => Span::styled(
                "You",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Sender::Bot => Span::styled(
                "Assistant",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        };
        self.lines.push(Line::from(vec![
            label,
            Span::styled(
                format!("  {}", message.at.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

        for rendered in render_message(&message.body) {
            let mut spans = vec![Span::raw("  ")];
            for span in rendered.spans {
                let style = if span.bold {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                spans.push(Span::styled(span.text, style));
            }
            self.lines.push(Line::from(spans));
        }

        if self.lines.len() > MAX_LINES {
            let excess = self.lines.len() - MAX_LINES;
            self.lines.drain(..excess);
        }
    }

    fn on_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Esc
            || (key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
        {
            self.should_quit = true;
            return;
        }

        match key {
            KeyCode::Tab => {
                let _ = self.handle.commands.send(WidgetCommand::Toggle);
            }
            KeyCode::Enter if self.open => {
                let text = std::mem::take(&mut self.input);
                let _ = self.handle.commands.send(WidgetCommand::Send(text));
            }
            KeyCode::Backspace if self.open => {
                self.input.pop();
            }
            KeyCode::Char(c) if self.open => {
                self.input.push(c);
            }
            _ => {}
        }
    }
}

pub async fn run_tui(handle: WidgetHandle) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(handle);
    let run_result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.drain_events();

        terminal.draw(|frame| ui(frame, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key.code, key.modifiers);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn ui(frame: &mut Frame, app: &App) {
    if !app.open {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from("Chat is closed."),
            Line::from(""),
            Line::from(Span::styled(
                "[Tab] open chat   [Esc] quit",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" foliochat "));
        frame.render_widget(hint, frame.area());
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    // Stick to the bottom of the transcript.
    let visible = layout[0].height.saturating_sub(2) as usize;
    let start = app.lines.len().saturating_sub(visible);
    let items: Vec<ListItem> = app.lines[start..]
        .iter()
        .cloned()
        .map(ListItem::new)
        .collect();
    let messages = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Conversation "),
    );
    frame.render_widget(messages, layout[0]);

    let indicator = if app.typing {
        Line::from(Span::styled(
            " Assistant is typing…",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(indicator), layout[1]);

    let input = Paragraph::new(app.input.as_str())
        .block(Block::default().borders(Borders::ALL).title(" Message "));
    frame.render_widget(input, layout[2]);

    let bar = Line::from(vec![
        Span::styled(
            " [Enter]",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" send ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            "[Tab]",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" close ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            "[Esc]",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" quit ", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(bar), layout[3]);
}
