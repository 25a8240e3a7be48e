// The recognizer: canvas + exporter + classifier, glued together.
// No windowing here; the binary drives it with pointer events and actions.

use crate::classifier::{to_prediction, Classifier};
use crate::error::Error;
use crate::export::export;
use crate::input::PointerEvent;
use crate::stroke::StrokeSurface;
use crate::types::Prediction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellState {
    Uninitialized, // no classifier yet; predict is rejected
    Ready,         // classifier attached, stays this way for the run
}

pub struct RecognizerShell {
    surface: StrokeSurface,
    classifier: Option<Box<dyn Classifier>>,
    last_prediction: Option<Prediction>,
}

impl RecognizerShell {
    pub fn new(surface: StrokeSurface) -> Self {
        Self { surface, classifier: None, last_prediction: None }
    }

    /// Shell that is `Ready` from the start.
    pub fn with_classifier(surface: StrokeSurface, classifier: Box<dyn Classifier>) -> Self {
        let mut shell = Self::new(surface);
        shell.attach(classifier);
        shell
    }

    /// Hand the shell its classifier. Moves `Uninitialized -> Ready`.
    ///
    /// `Ready` lasts for the whole run: once a classifier is attached, further
    /// calls are refused (logged, returns false) and the first one stays.
    pub fn attach(&mut self, classifier: Box<dyn Classifier>) -> bool {
        if let Some(current) = &self.classifier {
            eprintln!(
                "Warning: {} already attached, ignoring {}",
                current.name(),
                classifier.name()
            );
            return false;
        }
        println!("Classifier attached: {}", classifier.name());
        self.classifier = Some(classifier);
        true
    }

    pub fn state(&self) -> ShellState {
        if self.classifier.is_some() { ShellState::Ready } else { ShellState::Uninitialized }
    }

    pub fn surface(&self) -> &StrokeSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut StrokeSurface {
        &mut self.surface
    }

    pub fn pointer(&mut self, event: PointerEvent) {
        self.surface.dispatch(event);
    }

    /// The result currently on display, if any.
    pub fn last_prediction(&self) -> Option<Prediction> {
        self.last_prediction
    }

    /// Snapshot -> export -> classify. The display state only changes on success.
    pub fn on_predict(&mut self) -> Result<Prediction, Error> {
        let classifier = self.classifier.as_ref().ok_or(Error::ClassifierMissing)?;
        let tensor = export(self.surface.snapshot());
        let distribution = classifier.predict(&tensor)?;
        let prediction = to_prediction(&distribution)?;
        self.last_prediction = Some(prediction);
        Ok(prediction)
    }

    pub fn on_clear(&mut self) {
        self.surface.clear();
    }
}
