#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    Input,
    Validation,
    NotFound,
    Provider,
    Config,
    Io,
    Unknown,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Input => "Input",
            ErrorKind::Validation => "Validation",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::Provider => "Provider",
            ErrorKind::Config => "Config",
            ErrorKind::Io => "Io",
            ErrorKind::Unknown => "Unknown",
        }
    }
}
