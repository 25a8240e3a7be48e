// Run-time settings. Everything has a default; only the model path can be
// changed from outside (first CLI argument, else DIGIT_SKETCH_MODEL).

use std::path::PathBuf;

pub const DEFAULT_MODEL_PATH: &str = "digit_recognizer.json";
pub const MODEL_ENV_VAR: &str = "DIGIT_SKETCH_MODEL";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub canvas_side: usize, // square drawing area in pixels
    pub title: String,
    pub target_fps: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            canvas_side: 300,
            title: "Digit Recognizer".to_string(),
            target_fps: 60,
        }
    }
}

impl AppConfig {
    /// `args` excludes the program name. The argument beats the environment.
    pub fn from_sources<I>(args: I, env_model: Option<String>) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut cfg = Self::default();
        if let Some(p) = env_model.filter(|p| !p.is_empty()) {
            cfg.model_path = PathBuf::from(p);
        }
        if let Some(p) = args.into_iter().next() {
            cfg.model_path = PathBuf::from(p);
        }
        cfg
    }

    pub fn from_env() -> Self {
        Self::from_sources(std::env::args().skip(1), std::env::var(MODEL_ENV_VAR).ok())
    }
}
