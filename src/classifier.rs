use std::fs;
use std::path::Path;

use ndarray::{Array1, Array2, Array4};
use serde::Deserialize;

use crate::error::Error;
use crate::export::INPUT_SIDE;
use crate::types::Prediction;

/// Number of classes the recognizer knows about (digits 0..=9).
pub const NUM_CLASSES: usize = 10;

/// The external digit model, treated as a black box.
///
/// Takes the `[1, 28, 28, 1]` tensor from the exporter and returns a probability
/// distribution over the ten digits.
pub trait Classifier {
    fn predict(&self, input: &Array4<f32>) -> Result<Vec<f32>, Error>;

    /// Short description for log lines.
    fn name(&self) -> String;
}

/// Pick the most likely digit. The first maximum wins on ties.
pub fn to_prediction(distribution: &[f32]) -> Result<Prediction, Error> {
    if distribution.len() != NUM_CLASSES {
        return Err(Error::Inference(format!(
            "expected {NUM_CLASSES} class scores, got {}",
            distribution.len()
        )));
    }
    if distribution.iter().any(|p| !p.is_finite()) {
        return Err(Error::Inference("class scores contain NaN or infinity".into()));
    }

    let mut best = 0;
    for (i, &p) in distribution.iter().enumerate() {
        if p > distribution[best] {
            best = i;
        }
    }
    Ok(Prediction { label: best as u8, confidence: distribution[best] })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Relu,
    Sigmoid,
    Linear,
    Softmax,
}

/// On-disk form of one layer; `weights` is `[out][in]`.
#[derive(Deserialize)]
struct LayerFile {
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
    activation: Activation,
}

#[derive(Deserialize)]
struct ModelFile {
    layers: Vec<LayerFile>,
}

#[derive(Clone, Debug)]
pub struct DenseLayer {
    weights: Array2<f32>, // (out, in)
    bias: Array1<f32>,
    activation: Activation,
}

impl DenseLayer {
    pub fn new(weights: Array2<f32>, bias: Array1<f32>, activation: Activation) -> Result<Self, Error> {
        if weights.nrows() != bias.len() {
            return Err(Error::ModelShape(format!(
                "layer has {} outputs but {} biases",
                weights.nrows(),
                bias.len()
            )));
        }
        Ok(Self { weights, bias, activation })
    }

    pub fn inputs(&self) -> usize { self.weights.ncols() }
    pub fn outputs(&self) -> usize { self.weights.nrows() }

    fn forward(&self, x: &Array1<f32>) -> Array1<f32> {
        let z = self.weights.dot(x) + &self.bias;
        match self.activation {
            Activation::Relu => z.mapv(|v| v.max(0.0)),
            Activation::Sigmoid => z.mapv(|v| 1.0 / (1.0 + (-v).exp())),
            Activation::Linear => z,
            Activation::Softmax => softmax(z),
        }
    }
}

fn softmax(z: Array1<f32>) -> Array1<f32> {
    let max = z.fold(f32::NEG_INFINITY, |m, &v| m.max(v));
    let e = z.mapv(|v| (v - max).exp());
    let sum = e.sum();
    e / sum
}

/// A small feed-forward network: 784 inputs, any hidden layers, 10 outputs.
#[derive(Clone, Debug)]
pub struct DenseNetwork {
    layers: Vec<DenseLayer>,
    source: String,
}

impl DenseNetwork {
    /// Build from layers, checking that the sizes chain from 784 inputs to 10 outputs.
    pub fn new(layers: Vec<DenseLayer>, source: impl Into<String>) -> Result<Self, Error> {
        let first = layers.first().ok_or_else(|| Error::ModelShape("model has no layers".into()))?;
        let expected_in = INPUT_SIDE * INPUT_SIDE;
        if first.inputs() != expected_in {
            return Err(Error::ModelShape(format!(
                "first layer takes {} inputs, expected {expected_in}",
                first.inputs()
            )));
        }
        for (i, pair) in layers.windows(2).enumerate() {
            if pair[0].outputs() != pair[1].inputs() {
                return Err(Error::ModelShape(format!(
                    "layer {} outputs {} values but layer {} takes {}",
                    i,
                    pair[0].outputs(),
                    i + 1,
                    pair[1].inputs()
                )));
            }
        }
        let last = layers.last().map(DenseLayer::outputs).unwrap_or(0);
        if last != NUM_CLASSES {
            return Err(Error::ModelShape(format!(
                "last layer outputs {last} values, expected {NUM_CLASSES}"
            )));
        }
        Ok(Self { layers, source: source.into() })
    }

    /// Load a JSON model file: `{"layers": [{"weights": [[..]], "bias": [..], "activation": ".."}]}`.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Err(Error::ModelLoad(format!("Model file '{}' not found.", path.display())));
        }
        let text = fs::read_to_string(path)
            .map_err(|e| Error::ModelLoad(format!("{}: {e}", path.display())))?;
        Self::from_json(&text, &path.display().to_string())
    }

    pub fn from_json(text: &str, source: &str) -> Result<Self, Error> {
        let file: ModelFile = serde_json::from_str(text)
            .map_err(|e| Error::ModelLoad(format!("{source}: {e}")))?;

        let mut layers = Vec::with_capacity(file.layers.len());
        for (i, layer) in file.layers.into_iter().enumerate() {
            let rows = layer.weights.len();
            let cols = layer.weights.first().map(Vec::len).unwrap_or(0);
            if rows == 0 || cols == 0 || layer.weights.iter().any(|r| r.len() != cols) {
                return Err(Error::ModelShape(format!("layer {i} weights are empty or ragged")));
            }
            let flat: Vec<f32> = layer.weights.into_iter().flatten().collect();
            let weights = Array2::from_shape_vec((rows, cols), flat)
                .map_err(|e| Error::ModelShape(format!("layer {i}: {e}")))?;
            layers.push(DenseLayer::new(weights, Array1::from(layer.bias), layer.activation)?);
        }
        Self::new(layers, source)
    }
}

impl Classifier for DenseNetwork {
    fn predict(&self, input: &Array4<f32>) -> Result<Vec<f32>, Error> {
        let expected = INPUT_SIDE * INPUT_SIDE;
        if input.len() != expected {
            return Err(Error::Inference(format!("input has {} values, expected {expected}", input.len())));
        }
        // Row-major flatten of [1, 28, 28, 1].
        let mut x: Array1<f32> = input.iter().copied().collect();
        for layer in &self.layers {
            x = layer.forward(&x);
        }
        let ends_in_softmax = self.layers.last().map(|l| l.activation == Activation::Softmax).unwrap_or(false);
        if !ends_in_softmax {
            x = softmax(x);
        }
        Ok(x.to_vec())
    }

    fn name(&self) -> String {
        format!("dense network ({} layers, {})", self.layers.len(), self.source)
    }
}
