use std::io::stdout;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use crate::{
    service::data_manager::DataManager,
    ui::{menu::Menu, views::*, Controller, RenderContext},
};

use super::ReplError;

enum AppState {
    Menu,
    ViewingChampion(AbilityDetailView),
}

struct App {
    menu: Menu,
    should_quit: bool,
    should_refresh: bool,
    state: AppState,
    scroll_offset: u16,
}

impl App {
    fn new(manager: &DataManager) -> Result<Self, ReplError> {
        Ok(Self {
            menu: Menu::new(manager.get_champions()?),
            should_quit: false,
            should_refresh: false,
            state: AppState::Menu,
            scroll_offset: 0,
        })
    }

    fn is_in_menu(&self) -> bool {
        matches!(self.state, AppState::Menu)
    }

    fn next(&mut self) {
        match &self.state {
            AppState::Menu => self.menu.next(),
            AppState::ViewingChampion(_) => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
            }
        }
    }

    fn previous(&mut self) {
        match &self.state {
            AppState::Menu => self.menu.previous(),
            AppState::ViewingChampion(_) => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
            }
        }
    }

    fn page_down(&mut self, amount: u16) {
        match &self.state {
            AppState::Menu => self.menu.jump(amount as usize, true),
            AppState::ViewingChampion(_) => {
                self.scroll_offset = self.scroll_offset.saturating_add(amount);
            }
        }
    }

    fn page_up(&mut self, amount: u16) {
        match &self.state {
            AppState::Menu => self.menu.jump(amount as usize, false),
            AppState::ViewingChampion(_) => {
                self.scroll_offset = self.scroll_offset.saturating_sub(amount);
            }
        }
    }

    fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
        manager: &mut DataManager,
    ) -> Result<(), ReplError> {
        loop {
            loop {
                terminal.draw(|f| {
                    let chunks = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([Constraint::Length(3), Constraint::Min(0)])
                        .split(f.size());

                    let title = Paragraph::new(" Browse champions and their abilities")
                        .style(Style::default().add_modifier(Modifier::BOLD))
                        .block(
                            Block::default()
                                .borders(Borders::ALL)
                                .border_style(Style::default().fg(Color::Cyan))
                                .title("ChampView - LoL Champion Browser")
                                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                        );
                    f.render_widget(title, chunks[0]);

                    match &self.state {
                        AppState::Menu => {
                            self.menu.render(f, chunks[1]);
                        }
                        AppState::ViewingChampion(view) => {
                            let block = Block::default()
                                .borders(Borders::ALL)
                                .padding(ratatui::widgets::Padding::horizontal(1))
                                .title(format!(
                                    "{} (←/→ or 1-5 to switch ability, ↑/↓ to scroll, Esc/q to return)",
                                    view.title()
                                ))
                                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                                .border_style(Style::default().fg(Color::Cyan));

                            let rc = RenderContext {
                                frame: f,
                                area: chunks[1],
                                scroll_offset: self.scroll_offset,
                                block,
                            };
                            let _ = view.render(rc);
                        }
                    }
                })?;

                if event::poll(std::time::Duration::from_millis(100))? {
                    if let Event::Key(key) = event::read()? {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }

                        match key.code {
                            KeyCode::Char('q') if self.is_in_menu() => {
                                self.should_quit = true;
                                break;
                            }
                            KeyCode::Char('r') if self.is_in_menu() => {
                                self.should_refresh = true;
                                break;
                            }
                            KeyCode::Up => self.previous(),
                            KeyCode::Down => self.next(),
                            KeyCode::PageUp => self.page_up(10),
                            KeyCode::PageDown => self.page_down(10),
                            KeyCode::Esc | KeyCode::Char('q') if !self.is_in_menu() => {
                                self.state = AppState::Menu;
                                self.scroll_offset = 0;
                            }
                            KeyCode::Enter if self.is_in_menu() => {
                                if let Some(key) = self.menu.selected_champion() {
                                    let ctrl = Controller { manager };
                                    let view = AbilityDetailView::new(&ctrl, key);

                                    terminal.clear()?;
                                    self.state = AppState::ViewingChampion(view);
                                    self.scroll_offset = 0;
                                }
                            }
                            code => {
                                if let AppState::ViewingChampion(view) = &mut self.state {
                                    let ctrl = Controller { manager };
                                    view.update(&ctrl, code);
                                }
                            }
                        }
                    }
                }
            }

            if self.should_quit {
                return Ok(());
            }

            if self.should_refresh {
                self.should_refresh = false;
                manager.refresh()?;
                self.menu = Menu::new(manager.get_champions()?);
            }
        }
    }
}

pub fn run(mut manager: DataManager) -> Result<(), ReplError> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&manager)?;
    let result = app.run(&mut terminal, &mut manager);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        eprintln!("Error: {}", err);
    }

    result
}
