/// Naming knobs shared by the prepare pass and the emitter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneratorConfig {
    /// Prepended to every generated wrapper type name, e.g. `SSKProto`.
    pub wrapper_prefix: String,
    /// Prefix of the SwiftProtobuf types being wrapped, e.g. `SignalServiceProtos`.
    pub proto_prefix:   String,
}

impl GeneratorConfig {
    pub fn new(wrapper_prefix: impl Into<String>, proto_prefix: impl Into<String>) -> Self {
        GeneratorConfig {
            wrapper_prefix: wrapper_prefix.into(),
            proto_prefix:   proto_prefix.into(),
        }
    }

    /// File name the generated source is written under.
    pub fn output_file_name(&self) -> String {
        format!("{}.swift", self.wrapper_prefix)
    }
}
