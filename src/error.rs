use std::{error, fmt, io};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    EndOfInput,
    Parse,
    Stream,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::EndOfInput => write!(f, "end of input"),
            ErrorKind::Parse => write!(f, "parse"),
            ErrorKind::Stream => write!(f, "stream"),
        }
    }
}

pub struct Error {
    kind: ErrorKind,
    message: String,
    source: Option<Box<dyn error::Error>>,
}

impl Error {
    pub fn end_of_input() -> Self {
        Self {
            kind: ErrorKind::EndOfInput,
            message: "no more lines in the input".into(),
            source: None,
        }
    }

    pub fn parse<E: error::Error + 'static>(message: &str, source: E) -> Self {
        Self {
            kind: ErrorKind::Parse,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} error: {}", self.kind, self)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Some(err) => write!(f, "{}. Source error: {}", self.message, err),
            None => write!(f, "{}", self.message),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.source {
            Some(ref err) => Some(&**err),
            None => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self {
            kind: ErrorKind::Stream,
            message: "reading from the underlying stream failed".into(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        format!("{}", err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
