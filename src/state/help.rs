//! Static text for the help panel and the error box.

/// (syntax, meaning)
pub const SYNTAX: [(&str, &str); 9] = [
    ("+ - * / %", "Basic arithmetic"),
    ("** or ^", "Power (e.g. x**2 or x^2)"),
    ("sin(x), cos(x), tan(x)", "Trigonometric functions"),
    ("exp(x)", "Exponential e^x"),
    ("log(x)", "Natural logarithm"),
    ("sqrt(x)", "Square root"),
    ("abs(x)", "Absolute value"),
    ("Math.PI or pi", "The constant π"),
    ("Math.E or e", "The constant e"),
];

/// (expression, description)
pub const ADVANCED_EXAMPLES: [(&str, &str); 4] = [
    ("sin(x)/x", "Sinc function"),
    ("exp(-x**2/2)", "Gaussian bell"),
    ("1/(1+exp(-x))", "Sigmoid"),
    ("x*sin(1/x)", "Oscillating function"),
];

pub const ERROR_SUGGESTIONS: [&str; 4] = [
    "Check the syntax of the function",
    "Make sure you use 'x' as the variable",
    "Try a smaller X range",
    "Avoid divisions by zero",
];
