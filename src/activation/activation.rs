use std::f64::consts::E;
use std::fmt;

use crate::error::{NetError, Result};

/// A point-wise non-linearity: `f`, its derivative `f'`, and optionally an
/// inverse `f^-1`.
///
/// Instances are plain function pointers, so they are `Copy` and carry no
/// state. The engine ships [`ActivationFunction::SIGMOID`] (the default for
/// every network) plus [`ActivationFunction::TANH`] and
/// [`ActivationFunction::IDENTITY`]; anything else can be built with
/// [`ActivationFunction::new`].
#[derive(Clone, Copy)]
pub struct ActivationFunction {
    name: &'static str,
    function: fn(f64) -> f64,
    derivative: fn(f64) -> f64,
    inverse: Option<fn(f64) -> f64>,
}

impl ActivationFunction {
    pub const SIGMOID: ActivationFunction = ActivationFunction {
        name: "sigmoid",
        function: sigmoid,
        derivative: sigmoid_derivative,
        inverse: Some(sigmoid_inverse),
    };

    pub const TANH: ActivationFunction = ActivationFunction {
        name: "tanh",
        function: f64::tanh,
        derivative: tanh_derivative,
        inverse: Some(tanh_inverse),
    };

    pub const IDENTITY: ActivationFunction = ActivationFunction {
        name: "identity",
        function: identity,
        derivative: one,
        inverse: Some(identity),
    };

    pub const fn new(name: &'static str, function: fn(f64) -> f64, derivative: fn(f64) -> f64) -> Self {
        ActivationFunction {
            name,
            function,
            derivative,
            inverse: None,
        }
    }

    pub const fn with_inverse(mut self, inverse: fn(f64) -> f64) -> Self {
        self.inverse = Some(inverse);
        self
    }

    /// Resolves one of the built-in functions by the name used in config files.
    pub fn by_name(name: &str) -> Result<ActivationFunction> {
        match name.to_ascii_lowercase().as_str() {
            "sigmoid" => Ok(ActivationFunction::SIGMOID),
            "tanh" => Ok(ActivationFunction::TANH),
            "identity" => Ok(ActivationFunction::IDENTITY),
            other => Err(NetError::Config(format!("unknown activation function '{}'", other))),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn apply(&self, x: f64) -> f64 {
        (self.function)(x)
    }

    pub fn derivative(&self, x: f64) -> f64 {
        (self.derivative)(x)
    }

    /// `f^-1(y)`, or `None` when this function was built without an inverse.
    pub fn invert(&self, y: f64) -> Option<f64> {
        self.inverse.map(|inverse| inverse(y))
    }

    pub fn has_inverse(&self) -> bool {
        self.inverse.is_some()
    }
}

impl Default for ActivationFunction {
    fn default() -> Self {
        ActivationFunction::SIGMOID
    }
}

impl fmt::Debug for ActivationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivationFunction")
            .field("name", &self.name)
            .field("invertible", &self.inverse.is_some())
            .finish()
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

fn sigmoid_derivative(x: f64) -> f64 {
    let fx = sigmoid(x);
    fx * (1.0 - fx)
}

/// Logit, with the out-of-domain inputs pinned to 0 and 1 rather than the
/// infinities. Saved networks and their consumers rely on exactly these values.
fn sigmoid_inverse(y: f64) -> f64 {
    if y <= 0.0 {
        0.0
    } else if y >= 1.0 {
        1.0
    } else {
        (y / (1.0 - y)).ln()
    }
}

fn tanh_derivative(x: f64) -> f64 {
    let t = x.tanh();
    1.0 - t * t
}

fn tanh_inverse(y: f64) -> f64 {
    y.clamp(-1.0 + f64::EPSILON, 1.0 - f64::EPSILON).atanh()
}

fn identity(x: f64) -> f64 {
    x
}

fn one(_: f64) -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn sigmoid_values() {
        let s = ActivationFunction::SIGMOID;
        assert_eq!(s.apply(0.0), 0.5);
        assert!((s.apply(2.0) - 0.8807970779778823).abs() < TOL);
        assert!((s.apply(-2.0) + s.apply(2.0) - 1.0).abs() < TOL);
        assert_eq!(s.derivative(0.0), 0.25);
    }

    #[test]
    fn sigmoid_derivative_matches_finite_difference() {
        let s = ActivationFunction::SIGMOID;
        let h = 1e-6;
        for &x in &[-3.0, -0.5, 0.0, 0.7, 4.0] {
            let numeric = (s.apply(x + h) - s.apply(x - h)) / (2.0 * h);
            assert!((numeric - s.derivative(x)).abs() < 1e-8, "x = {}", x);
        }
    }

    #[test]
    fn sigmoid_inverse_clamps_at_the_boundaries() {
        let s = ActivationFunction::SIGMOID;
        assert_eq!(s.invert(0.0), Some(0.0));
        assert_eq!(s.invert(-0.3), Some(0.0));
        assert_eq!(s.invert(1.0), Some(1.0));
        assert_eq!(s.invert(7.0), Some(1.0));
        assert_eq!(s.invert(0.5), Some(0.0));

        let y = s.apply(1.25);
        assert!((s.invert(y).unwrap() - 1.25).abs() < 1e-9);
    }

    #[test]
    fn custom_functions() {
        let relu = ActivationFunction::new("relu", |x| x.max(0.0), |x| if x > 0.0 { 1.0 } else { 0.0 });
        assert_eq!(relu.name(), "relu");
        assert_eq!(relu.apply(-2.0), 0.0);
        assert_eq!(relu.derivative(3.0), 1.0);
        assert_eq!(relu.invert(1.0), None);

        let doubled = ActivationFunction::new("double", |x| 2.0 * x, |_| 2.0).with_inverse(|y| y / 2.0);
        assert!(doubled.has_inverse());
        assert_eq!(doubled.invert(3.0), Some(1.5));
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(ActivationFunction::by_name("Sigmoid").unwrap().name(), "sigmoid");
        assert_eq!(ActivationFunction::by_name("tanh").unwrap().name(), "tanh");
        assert!(matches!(ActivationFunction::by_name("softmax"), Err(NetError::Config(_))));
    }

    #[test]
    fn tanh_round_trip() {
        let t = ActivationFunction::TANH;
        let y = t.apply(0.4);
        assert!((t.invert(y).unwrap() - 0.4).abs() < 1e-12);
        assert!(t.invert(1.0).unwrap().is_finite());
    }
}
