#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Image(image::ImageError),
    Convert(artcrop_core::Error),
    Format(std::fmt::Error),
    NoImages,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {err}"),
            Error::Image(err) => write!(f, "image error: {err}"),
            Error::Convert(err) => write!(f, "conversion failed: {err}"),
            Error::Format(err) => write!(f, "failed to render C source: {err}"),
            Error::NoImages => write!(f, "no image arrays of the source size found in input"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Image(err)
    }
}

impl From<artcrop_core::Error> for Error {
    fn from(err: artcrop_core::Error) -> Self {
        Error::Convert(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::Format(err)
    }
}
