use std::{fmt, io};
use std::panic::Location;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug)]
pub struct Error {
    detail: Box<dyn ErrorDetail>,
    prev: Option<Box<Error>>,
    _location: &'static Location<'static>,
}

pub trait ErrorDetail: fmt::Display + fmt::Debug + Send + Sync {
    fn context(&self) -> Vec<(Option<String>, String)> { vec![] }
}

impl Error {
    /// Push `self` to the back of `other`'s chain; `other` becomes the
    /// outermost error.
    pub fn chain(self, mut other: Error) -> Self {
        fn rearmost(error: &mut Error) -> &mut Error {
            match error.prev {
                Some(ref mut prev) => rearmost(prev),
                None => error,
            }
        }

        rearmost(&mut other).prev = Some(Box::new(self));
        other
    }
}

macro_rules! impl_error_detail_for_std_error {
    ($($T:ty),* $(,)?) => ($(
        impl $crate::error::ErrorDetail for $T {
            fn context(&self) -> Vec<(Option<String>, String)> {
                let mut ctxt = vec![];
                let mut source = std::error::Error::source(self);
                while let Some(e) = source {
                    ctxt.push((None, e.to_string()));
                    source = e.source();
                }

                ctxt
            }
        }
    )*)
}

impl_error_detail_for_std_error!(io::Error, toml::de::Error, jwalk::Error);

impl ErrorDetail for String { }
impl ErrorDetail for &str { }

impl<T: ErrorDetail + 'static> From<T> for Error {
    #[track_caller]
    fn from(detail: T) -> Self {
        Error {
            prev: None,
            detail: Box::new(detail),
            _location: Location::caller(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn render(error: &Error, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let indent = "    ".repeat(depth);
            let indented_newline = format!("\n{indent}");

            let message = format!("{:#}", error.detail).replace('\n', &indented_newline);
            writeln!(f, "{indent}{message}")?;
            if let Some(ref prev) = error.prev {
                render(prev, depth + 1, f)?;
            }

            for (key, value) in error.detail.context() {
                let value = value.replace('\n', &indented_newline);
                match key {
                    Some(key) => writeln!(f, "{indent}{key}: {value}")?,
                    None => writeln!(f, "{indent}{value}")?,
                }
            }

            if std::env::var_os("RUST_BACKTRACE").is_some() {
                writeln!(f, "{indent}[{}]", error._location)?;
            }

            Ok(())
        }

        render(self, 0, f)
    }
}

/// An error built from a message and a list of key/value context fields.
/// `error!` and `err!` produce one of these.
#[derive(Debug)]
pub struct ContextError {
    pub message: String,
    pub fields: Vec<(Option<String>, String)>,
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.message.fmt(f)
    }
}

impl ErrorDetail for ContextError {
    fn context(&self) -> Vec<(Option<String>, String)> {
        self.fields.clone()
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! err {
    ($($token:tt)*) => (Err($crate::error!($($token)*)));
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($msg:expr $(, $($rest:tt)*)?) => (
        $crate::error::Error::from($crate::error::ContextError {
            message: $msg.to_string(),
            fields: {
                #[allow(unused_mut)]
                let mut v: Vec<(Option<String>, String)> = Vec::new();
                $($crate::error!(@field v $($rest)*);)?
                v
            },
        })
    );

    (@field $v:ident $key:expr => $value:expr, $($rest:tt)*) => {
        $crate::error!(@field $v $key => $value);
        $crate::error!(@field $v $($rest)*);
    };

    (@field $v:ident $key:expr => $value:expr) => {
        $v.push((Some($key.to_string()), $value.to_string()));
    };

    (@field $v:ident $value:expr, $($rest:tt)*) => {
        $crate::error!(@field $v $value);
        $crate::error!(@field $v $($rest)*);
    };

    (@field $v:ident $value:expr) => {
        $v.push((None, $value.to_string()));
    };

    (@field $v:ident $(,)?) => { };
}

pub trait Chainable<T> {
    fn chain(self, other: impl Into<Error>) -> Result<T>;

    fn chain_with<F, E>(self, f: F) -> Result<T>
        where F: FnOnce() -> E, E: Into<Error>;
}

impl<T, E: Into<Error>> Chainable<T> for Result<T, E> {
    #[track_caller]
    fn chain(self, other: impl Into<Error>) -> Result<T> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(e.into().chain(other.into())),
        }
    }

    #[track_caller]
    fn chain_with<F, Err>(self, f: F) -> Result<T>
        where F: FnOnce() -> Err, Err: Into<Error>
    {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(e.into().chain(f().into())),
        }
    }
}
