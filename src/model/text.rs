/// Visual style of one run of formatted ability text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub italic: bool,
    pub underline: bool,
    /// "#RRGGBB" literal extracted from a font colour tag.
    pub color: Option<String>,
}

impl TextStyle {
    pub fn is_empty(&self) -> bool {
        !self.italic && !self.underline && self.color.is_none()
    }

    /// Merge `self` over `other`; attributes set on `self` win.
    pub fn merge_over(self, other: TextStyle) -> TextStyle {
        TextStyle {
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
            color: self.color.or(other.color),
        }
    }
}

/// One styled unit of formatted output, in document order. The text may be
/// empty (stripped regions, closing tags) or begin with a newline (line
/// break tags); empty runs never carry a style of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub style: TextStyle,
}
