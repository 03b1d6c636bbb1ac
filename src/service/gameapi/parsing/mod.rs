pub mod champion;
pub mod realm;

#[derive(Debug)]
pub enum ParsingError {
    InvalidType(String),
}

impl std::fmt::Display for ParsingError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ParsingError::InvalidType(field) => write!(f, "Unexpected json type for '{}'", field),
        }
    }
}
