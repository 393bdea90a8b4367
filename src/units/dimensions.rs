/// A phantom marker type naming one physical dimension. Every `Quantity<U>`
/// is tagged with one of these at compile time, so arithmetic between
/// mismatched dimensions is a type error rather than a runtime check.
pub trait DimensionTag: Copy + Clone + 'static {
    /// The registry name used to look up scales and aliases for this
    /// dimension at runtime (display, classification, TOML overrides).
    const NAME: &'static str;
    /// The canonical (SI) unit symbol, e.g. `"Ω"`, `"V"`, `"A"`.
    const SYMBOL: &'static str;
}

macro_rules! dimension_tag {
    ($name:ident, $dimension_name:literal, $symbol:literal) => {
        #[doc = concat!("Phantom tag for the ", $dimension_name, " dimension.")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl DimensionTag for $name {
            const NAME: &'static str = $dimension_name;
            const SYMBOL: &'static str = $symbol;
        }
    };
}

dimension_tag!(Resistance, "Resistance", "Ω");
dimension_tag!(Voltage, "Voltage", "V");
dimension_tag!(Current, "Current", "A");
dimension_tag!(Capacitance, "Capacitance", "F");
dimension_tag!(Inductance, "Inductance", "H");
dimension_tag!(Time, "Time", "s");
dimension_tag!(Frequency, "Frequency", "Hz");
