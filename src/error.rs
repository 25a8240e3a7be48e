// A tiny error type so we don't rely on anyhow/thiserror.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    WindowInit(String),   // Creating the window failed
    WindowUpdate(String), // Updating the window buffer failed
    ModelLoad(String),    // Model file missing or not valid JSON
    ModelShape(String),   // Model file parsed but layer sizes don't line up
    ClassifierMissing,    // Predict asked for before a classifier was attached
    Inference(String),    // The classifier returned something that isn't a distribution
}

impl Display for Error {
    // This decides how the error is printed to your console.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::ModelLoad(s) => write!(f, "Failed to load model: {s}"),
            Error::ModelShape(s) => write!(f, "Model shape error: {s}"),
            Error::ClassifierMissing => write!(f, "Model is not loaded."),
            Error::Inference(s) => write!(f, "Inference error: {s}"),
        }
    }
}

impl std::error::Error for Error {}
