use std::{fmt, io};

use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::{layout::Rect, Frame};

use crate::service::data_manager::{DataManager, DataRetrievalError};
use crate::service::formatter::FormatError;

pub mod menu;
pub mod repl;
pub mod views;

pub type ViewResult = Result<(), ViewError>;

pub struct Controller<'a> {
    pub manager: &'a DataManager,
}

pub struct RenderContext<'a, 'b> {
    pub frame: &'a mut Frame<'b>,
    pub area: Rect,
    pub scroll_offset: u16,
    pub block: Block<'b>,
}

impl<'a, 'b> RenderContext<'a, 'b> {
    pub fn error(self, error: &str) {
        let paragraph = Paragraph::new(format!("\n  [!] Error: {}", error))
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(self.block)
            .scroll((0, 0));

        self.frame.render_widget(paragraph, self.area);
    }
}

#[derive(Debug)]
pub enum ViewError {
    ManagerFailed(DataRetrievalError),
    FormatFailed(FormatError),
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ViewError::ManagerFailed(err) => write!(f, "Data manager error: {}", err),
            ViewError::FormatFailed(err) => write!(f, "Formatter error: {}", err),
        }
    }
}

impl From<DataRetrievalError> for ViewError {
    fn from(error: DataRetrievalError) -> Self {
        ViewError::ManagerFailed(error)
    }
}

impl From<FormatError> for ViewError {
    fn from(error: FormatError) -> Self {
        ViewError::FormatFailed(error)
    }
}

#[derive(Debug)]
pub enum ReplError {
    Init(DataRetrievalError),
    View(ViewError),
    Console(io::Error),
}

impl fmt::Display for ReplError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReplError::Init(err) => write!(f, "Init error: {}", err),
            ReplError::View(err) => write!(f, "View error: {}", err),
            ReplError::Console(err) => write!(f, "Console error: {}", err),
        }
    }
}

impl From<DataRetrievalError> for ReplError {
    fn from(error: DataRetrievalError) -> Self {
        ReplError::Init(error)
    }
}

impl From<ViewError> for ReplError {
    fn from(error: ViewError) -> Self {
        ReplError::View(error)
    }
}

impl From<io::Error> for ReplError {
    fn from(error: io::Error) -> Self {
        ReplError::Console(error)
    }
}
