//! Built-in example functions offered in the preset grid.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub expression: &'static str,
}

pub const PRESETS: [Preset; 12] = [
    Preset {
        name: "Sine",
        expression: "Math.sin(x)",
    },
    Preset {
        name: "Cosine",
        expression: "Math.cos(x)",
    },
    Preset {
        name: "Tangent",
        expression: "Math.tan(x)",
    },
    Preset {
        name: "Damped Exponential",
        expression: "Math.exp(-x/10)*Math.cos(x)",
    },
    Preset {
        name: "Parabola",
        expression: "x**2 + 3*x - 5",
    },
    Preset {
        name: "Cubic",
        expression: "x**3 - 2*x**2 + x - 1",
    },
    Preset {
        name: "Logarithm",
        expression: "Math.log(Math.abs(x) + 0.1)",
    },
    Preset {
        name: "Square Root",
        expression: "Math.sqrt(Math.abs(x))",
    },
    Preset {
        name: "Absolute Value",
        expression: "Math.abs(x)",
    },
    Preset {
        name: "Hyperbolic Sine",
        expression: "(Math.exp(x) - Math.exp(-x))/2",
    },
    Preset {
        name: "Gaussian",
        expression: "Math.exp(-x**2/2)",
    },
    Preset {
        name: "Step Function",
        expression: "x >= 0 ? 1 : 0",
    },
];
