use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::model::{champion::ChampionSummary, ids::ChampionKey};

/// Selectable champion list, the terminal stand-in for the original
/// portrait grid.
pub struct Menu {
    entries: Vec<MenuEntry>,
    selected: usize,
}

struct MenuEntry {
    key: ChampionKey,
    label: String,
}

impl Menu {
    pub fn new(champions: &[ChampionSummary]) -> Self {
        let entries = champions
            .iter()
            .map(|champ| MenuEntry {
                key: champ.key.clone(),
                label: format!("{}, {}", champ.name, champ.title),
            })
            .collect();

        Self { entries, selected: 0 }
    }

    pub fn selected_champion(&self) -> Option<&ChampionKey> {
        self.entries.get(self.selected).map(|entry| &entry.key)
    }

    pub fn next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.entries.len();
    }

    pub fn previous(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.entries.len() - 1
        } else {
            self.selected - 1
        };
    }

    pub fn jump(&mut self, amount: usize, forward: bool) {
        if self.entries.is_empty() {
            return;
        }
        if forward {
            self.selected = (self.selected + amount).min(self.entries.len() - 1);
        } else {
            self.selected = self.selected.saturating_sub(amount);
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        // Split the provided area into the main list area and a small footer
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let prefix = if i == self.selected { "  ► " } else { "    " };
                ListItem::new(format!("{}{}", prefix, entry.label))
            })
            .collect();

        let mut list_state = ListState::default();
        list_state.select(Some(self.selected));

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .padding(ratatui::widgets::Padding::uniform(1))
                    .title(format!(
                        "Champions [{}] (↑/↓ to navigate, Enter to select)",
                        self.entries.len()
                    ))
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            )
            .highlight_style(Style::default().bg(Color::White).fg(Color::Black))
            .highlight_symbol("");

        frame.render_stateful_widget(list, chunks[0], &mut list_state);

        let footer = Paragraph::new("Refresh data: (r)    Quit: (q)")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::NONE));
        frame.render_widget(footer, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn champs(names: &[&str]) -> Vec<ChampionSummary> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| ChampionSummary {
                key: ChampionKey::from(*name),
                id: i as i32,
                name: name.to_string(),
                title: "the Test Subject".to_string(),
                image_full: format!("{}.png", name),
            })
            .collect()
    }

    #[test]
    fn selection_wraps_around() {
        let mut menu = Menu::new(&champs(&["Ahri", "Brand", "Corki"]));
        assert_eq!(menu.selected_champion().unwrap().as_str(), "Ahri");
        menu.previous();
        assert_eq!(menu.selected_champion().unwrap().as_str(), "Corki");
        menu.next();
        assert_eq!(menu.selected_champion().unwrap().as_str(), "Ahri");
    }

    #[test]
    fn jump_clamps_at_the_ends() {
        let mut menu = Menu::new(&champs(&["Ahri", "Brand", "Corki"]));
        menu.jump(10, true);
        assert_eq!(menu.selected_champion().unwrap().as_str(), "Corki");
        menu.jump(10, false);
        assert_eq!(menu.selected_champion().unwrap().as_str(), "Ahri");
    }

    #[test]
    fn empty_menu_has_no_selection() {
        let mut menu = Menu::new(&[]);
        menu.next();
        menu.previous();
        assert!(menu.selected_champion().is_none());
    }
}
