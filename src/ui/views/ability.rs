use crossterm::event::KeyCode;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::model::{
    ability::{AbilityRecord, AbilitySlot},
    champion::ChampionDetail,
    ids::ChampionKey,
};
use crate::service::formatter::format_ability;
use crate::ui::{Controller, RenderContext, ViewError, ViewResult};

use super::{styled_runs_to_lines, RenderableView};

// ============================================================================
// Champion Detail / Ability View
// ============================================================================

/// Detailed view of one champion: name, title, lore, the five ability slots
/// and the formatted text of the selected ability.
pub struct AbilityDetailView {
    title: String,
    detail: Option<ChampionDetail>,
    slot: AbilitySlot,
    lines: Vec<Line<'static>>,
    error: Option<String>,
}

impl AbilityDetailView {
    pub fn new(controller: &Controller, key: &ChampionKey) -> Self {
        match controller.manager.get_champion_detail(key) {
            Ok(detail) => {
                let detail = detail.clone();
                let mut view = Self {
                    title: format!("{}, {}", detail.name, detail.title),
                    detail: Some(detail),
                    slot: AbilitySlot::Passive,
                    lines: Vec::new(),
                    error: None,
                };
                view.rebuild(controller);
                view
            }
            Err(error) => Self {
                title: key.to_string(),
                detail: None,
                slot: AbilitySlot::Passive,
                lines: Vec::new(),
                error: Some(format!("{}", error)),
            },
        }
    }

    fn rebuild(&mut self, controller: &Controller) {
        let Some(detail) = &self.detail else {
            return;
        };

        match build_lines(controller, detail, self.slot) {
            Ok(lines) => {
                self.lines = lines;
                self.error = None;
            }
            Err(error) => self.error = Some(format!("{}", error)),
        }
    }

    fn set_slot(&mut self, controller: &Controller, slot: AbilitySlot) {
        if slot != self.slot {
            self.slot = slot;
            self.rebuild(controller);
        }
    }
}

impl RenderableView for AbilityDetailView {
    fn title(&self) -> &str {
        &self.title
    }

    fn update(&mut self, controller: &Controller, key: KeyCode) {
        match key {
            KeyCode::Left => self.set_slot(controller, self.slot.previous()),
            KeyCode::Right => self.set_slot(controller, self.slot.next()),
            KeyCode::Char('1') => self.set_slot(controller, AbilitySlot::Passive),
            KeyCode::Char('2') => self.set_slot(controller, AbilitySlot::Q),
            KeyCode::Char('3') => self.set_slot(controller, AbilitySlot::W),
            KeyCode::Char('4') => self.set_slot(controller, AbilitySlot::E),
            KeyCode::Char('5') => self.set_slot(controller, AbilitySlot::R),
            _ => {}
        }
    }

    fn render(&self, rc: RenderContext) -> ViewResult {
        if let Some(error) = &self.error {
            rc.error(error);
            return Ok(());
        }

        let paragraph = Paragraph::new(self.lines.clone())
            .block(rc.block)
            .wrap(Wrap { trim: false })
            .scroll((rc.scroll_offset, 0));

        rc.frame.render_widget(paragraph, rc.area);
        Ok(())
    }
}

fn build_lines(
    controller: &Controller,
    detail: &ChampionDetail,
    slot: AbilitySlot,
) -> Result<Vec<Line<'static>>, ViewError> {
    let mut lines = Vec::new();

    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled(
            detail.name.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", detail.title), Style::default().fg(Color::DarkGray)),
    ]));

    let splash = controller.manager.splash_url(&detail.key)?;
    lines.push(Line::styled(
        format!("Splash: {}", splash),
        Style::default().fg(Color::DarkGray),
    ));
    lines.push(Line::default());

    if !detail.lore.is_empty() {
        lines.push(Line::raw(detail.lore.clone()));
        lines.push(Line::default());
    }

    lines.push(slot_selector_line(slot));
    lines.push(Line::default());

    let ability = match slot.spell_index() {
        None => Some(&detail.passive),
        Some(index) => detail.spells.get(index),
    };

    match ability {
        Some(ability) => lines.extend(ability_lines(controller, ability, slot)?),
        None => lines.push(Line::styled(
            format!("No data for ability slot {}.", slot),
            Style::default().fg(Color::Yellow),
        )),
    }

    Ok(lines)
}

/// One line showing all five slots, with the active one highlighted.
fn slot_selector_line(selected: AbilitySlot) -> Line<'static> {
    let mut spans = vec![Span::styled("Abilities:  ", Style::default().fg(Color::DarkGray))];
    for slot in AbilitySlot::ALL {
        let style = if slot == selected {
            Style::default().bg(Color::White).fg(Color::Black)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", slot), style));
        spans.push(Span::raw("  "));
    }
    Line::from(spans)
}

fn ability_lines(
    controller: &Controller,
    ability: &AbilityRecord,
    slot: AbilitySlot,
) -> Result<Vec<Line<'static>>, ViewError> {
    let icon = match slot {
        AbilitySlot::Passive => controller.manager.passive_icon_url(&ability.image_full)?,
        _ => controller.manager.spell_icon_url(&ability.image_full)?,
    };

    let mut lines = vec![
        Line::styled(
            ability.name.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Line::styled(format!("Icon: {}", icon), Style::default().fg(Color::DarkGray)),
        Line::default(),
    ];

    let runs = format_ability(ability)?;
    lines.extend(styled_runs_to_lines(&runs));

    Ok(lines)
}
