//! Two-terminal circuit elements.

use crate::node::Node;

/// A resistor element.
#[derive(Debug, Clone, PartialEq)]
pub struct Resistor {
    /// Element name (e.g., "R1").
    pub name: String,
    /// First terminal. Positive current flows from `n1` to `n2`.
    pub n1: Node,
    /// Second terminal.
    pub n2: Node,
    /// Resistance value in ohms.
    pub resistance: f64,
}

impl Resistor {
    /// Create a new resistor.
    pub fn new(
        name: impl Into<String>,
        n1: impl Into<Node>,
        n2: impl Into<Node>,
        resistance: f64,
    ) -> Self {
        Self {
            name: name.into(),
            n1: n1.into(),
            n2: n2.into(),
            resistance,
        }
    }

    /// Get the conductance (1/R).
    pub fn conductance(&self) -> f64 {
        1.0 / self.resistance
    }
}

/// An independent voltage source enforcing V(n_plus) - V(n_minus) = voltage.
#[derive(Debug, Clone, PartialEq)]
pub struct VoltageSource {
    /// Element name (e.g., "V1").
    pub name: String,
    /// Positive terminal.
    pub n_plus: Node,
    /// Negative terminal.
    pub n_minus: Node,
    /// Source voltage in volts.
    pub voltage: f64,
}

impl VoltageSource {
    /// Create a new voltage source.
    pub fn new(
        name: impl Into<String>,
        n_plus: impl Into<Node>,
        n_minus: impl Into<Node>,
        voltage: f64,
    ) -> Self {
        Self {
            name: name.into(),
            n_plus: n_plus.into(),
            n_minus: n_minus.into(),
            voltage,
        }
    }
}

/// An independent current source.
///
/// The source draws `current` out of `n_plus` and pushes it into `n_minus`.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSource {
    /// Element name (e.g., "I1").
    pub name: String,
    /// Positive terminal.
    pub n_plus: Node,
    /// Negative terminal.
    pub n_minus: Node,
    /// Source current in amperes.
    pub current: f64,
}

impl CurrentSource {
    /// Create a new current source.
    pub fn new(
        name: impl Into<String>,
        n_plus: impl Into<Node>,
        n_minus: impl Into<Node>,
        current: f64,
    ) -> Self {
        Self {
            name: name.into(),
            n_plus: n_plus.into(),
            n_minus: n_minus.into(),
            current,
        }
    }
}

/// Kind of element, selected by the first letter of its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Resistor,
    VoltageSource,
    CurrentSource,
}

impl ElementKind {
    /// Classify an element name by its first character (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.chars().next()?.to_ascii_uppercase() {
            'R' => Some(Self::Resistor),
            'V' => Some(Self::VoltageSource),
            'I' => Some(Self::CurrentSource),
            _ => None,
        }
    }
}

/// Any element a circuit can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Resistor(Resistor),
    VoltageSource(VoltageSource),
    CurrentSource(CurrentSource),
}

impl Element {
    /// Build an element of the given kind from a (name, node, node, value) tuple.
    pub fn new(
        kind: ElementKind,
        name: impl Into<String>,
        n1: impl Into<Node>,
        n2: impl Into<Node>,
        value: f64,
    ) -> Self {
        match kind {
            ElementKind::Resistor => Element::Resistor(Resistor::new(name, n1, n2, value)),
            ElementKind::VoltageSource => {
                Element::VoltageSource(VoltageSource::new(name, n1, n2, value))
            }
            ElementKind::CurrentSource => {
                Element::CurrentSource(CurrentSource::new(name, n1, n2, value))
            }
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Resistor(_) => ElementKind::Resistor,
            Element::VoltageSource(_) => ElementKind::VoltageSource,
            Element::CurrentSource(_) => ElementKind::CurrentSource,
        }
    }

    /// Get the element's name.
    pub fn name(&self) -> &str {
        match self {
            Element::Resistor(r) => &r.name,
            Element::VoltageSource(v) => &v.name,
            Element::CurrentSource(i) => &i.name,
        }
    }

    /// Get the two terminal nodes in declaration order.
    pub fn nodes(&self) -> [&Node; 2] {
        match self {
            Element::Resistor(r) => [&r.n1, &r.n2],
            Element::VoltageSource(v) => [&v.n_plus, &v.n_minus],
            Element::CurrentSource(i) => [&i.n_plus, &i.n_minus],
        }
    }

    /// Get the element's value (ohms, volts or amperes).
    pub fn value(&self) -> f64 {
        match self {
            Element::Resistor(r) => r.resistance,
            Element::VoltageSource(v) => v.voltage,
            Element::CurrentSource(i) => i.current,
        }
    }
}

impl From<Resistor> for Element {
    fn from(r: Resistor) -> Self {
        Element::Resistor(r)
    }
}

impl From<VoltageSource> for Element {
    fn from(v: VoltageSource) -> Self {
        Element::VoltageSource(v)
    }
}

impl From<CurrentSource> for Element {
    fn from(i: CurrentSource) -> Self {
        Element::CurrentSource(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_name() {
        assert_eq!(ElementKind::from_name("R1"), Some(ElementKind::Resistor));
        assert_eq!(ElementKind::from_name("rload"), Some(ElementKind::Resistor));
        assert_eq!(ElementKind::from_name("Vcc"), Some(ElementKind::VoltageSource));
        assert_eq!(ElementKind::from_name("i2"), Some(ElementKind::CurrentSource));
        assert_eq!(ElementKind::from_name("C1"), None);
        assert_eq!(ElementKind::from_name(""), None);
    }

    #[test]
    fn test_element_new() {
        let e = Element::new(ElementKind::VoltageSource, "V1", "1", "gnd", 12.0);
        assert_eq!(e.kind(), ElementKind::VoltageSource);
        assert_eq!(e.name(), "V1");
        assert_eq!(e.value(), 12.0);
        let [p, m] = e.nodes();
        assert_eq!(p.as_str(), "1");
        assert!(m.is_ground());
    }

    #[test]
    fn test_resistor_conductance() {
        let r = Resistor::new("R1", "1", "2", 1000.0);
        assert!((r.conductance() - 1e-3).abs() < 1e-15);
    }
}
